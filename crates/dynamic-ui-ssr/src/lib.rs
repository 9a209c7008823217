//! A headless target for dynamic-ui trees.
//!
//! [`SsrResolver`] materializes a [`Ui`](dynamic_ui::ui::Ui) tree as a tree of
//! [`SsrElement`]s that can be rendered to an HTML string, inspected and
//! driven from code. Displayed values follow their widgets' input streams
//! through tasks spawned on the resolver's [`Spawner`].
use std::{ops::DerefMut, sync::Arc};

use anyhow::Context;
use async_lock::RwLock;
use dynamic_ui::{
    binding::{Binding, Output},
    resolver::{Compose, Resolver},
    spawn::Spawner,
    ui::{Attributes, LayoutKind, WidgetKind},
};
use futures::{
    future::BoxFuture,
    stream::{BoxStream, StreamExt},
    FutureExt,
};

/// The kind of value an entry accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryType {
    /// A whole number, bound as `i32`.
    Decimal,
    /// Free text, bound as `String`.
    Text,
}

impl EntryType {
    fn from_attributes(attributes: &Attributes) -> Self {
        match attributes.get("entryType").map(String::as_str) {
            Some("decimal") => EntryType::Decimal,
            _ => EntryType::Text,
        }
    }

    fn input_type(&self) -> &'static str {
        match self {
            EntryType::Decimal => "number",
            EntryType::Text => "text",
        }
    }
}

/// Delivers raw user input to an entry's binding.
type Accept = Arc<dyn Fn(&str) -> anyhow::Result<()> + Send + Sync>;

/// Server side node variants.
pub enum SsrNode {
    /// A label.
    Text { text: String, edit: Output<String> },
    /// A clickable button.
    Button { label: String, click: Output<()> },
    /// An input field.
    Entry {
        entry_type: EntryType,
        value: String,
        accept: Accept,
    },
    /// A layout.
    Container {
        /// The layout's css class.
        class: String,
        /// Child node list.
        children: Vec<SsrElement>,
    },
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SsrNode {
    pub async fn html_string(&self) -> String {
        match self {
            SsrNode::Text { text, .. } => format!("<span>{}</span>", escape(text)),
            SsrNode::Button { label, .. } => format!("<button>{}</button>", escape(label)),
            SsrNode::Entry {
                entry_type, value, ..
            } => format!(
                r#"<input type="{}" value="{}" />"#,
                entry_type.input_type(),
                escape(value)
            ),
            SsrNode::Container { class, children } => {
                let mut kids = vec![];
                for kid in children.iter() {
                    kids.push(kid.html_string().await);
                }
                format!(
                    r#"<div class="{}">{}</div>"#,
                    escape(class),
                    kids.join(" ")
                )
            }
        }
    }
}

/// A server side element.
///
/// Cloning is cheap and every clone refers to the same node.
#[derive(Clone)]
pub struct SsrElement {
    /// The underlying node.
    pub node: Arc<RwLock<SsrNode>>,
}

impl std::fmt::Debug for SsrElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsrElement").finish()
    }
}

impl SsrElement {
    fn new(node: SsrNode) -> Self {
        SsrElement {
            node: Arc::new(RwLock::new(node)),
        }
    }

    /// Lock the node for reading, waiting out any display update in
    /// progress.
    fn read(&self) -> async_lock::RwLockReadGuard<'_, SsrNode> {
        futures::executor::block_on(self.node.read())
    }

    /// Creates a container of `children` styled with `class`.
    pub fn container(class: impl Into<String>, children: Vec<SsrElement>) -> Self {
        SsrElement::new(SsrNode::Container {
            class: class.into(),
            children,
        })
    }

    /// String value
    pub fn html_string(&self) -> BoxFuture<'static, String> {
        let node = self.node.clone();
        Box::pin(async move {
            let lock = node.read().await;
            lock.html_string().await
        })
    }

    /// The children of a container.
    ///
    /// Like the other inspection and interaction methods, this waits for a
    /// concurrent display update to finish, so it must not be called while
    /// holding a write lock on [`SsrElement::node`].
    ///
    /// Fails if this is not a container.
    pub fn children(&self) -> anyhow::Result<Vec<SsrElement>> {
        let lock = self.read();
        if let SsrNode::Container { children, .. } = &*lock {
            Ok(children.clone())
        } else {
            anyhow::bail!("not a container")
        }
    }

    /// The displayed text of a label, button or entry.
    ///
    /// Fails if this is a container.
    pub fn text(&self) -> anyhow::Result<String> {
        let lock = self.read();
        match &*lock {
            SsrNode::Text { text, .. } => Ok(text.clone()),
            SsrNode::Button { label, .. } => Ok(label.clone()),
            SsrNode::Entry { value, .. } => Ok(value.clone()),
            SsrNode::Container { .. } => anyhow::bail!("a container has no text"),
        }
    }

    /// Click a button.
    ///
    /// Fails if this is not a button.
    pub fn click(&self) -> anyhow::Result<()> {
        let click = {
            let lock = self.read();
            if let SsrNode::Button { click, .. } = &*lock {
                click.clone()
            } else {
                anyhow::bail!("not a button")
            }
        };
        click(());
        Ok(())
    }

    /// Enter `raw` as if the user typed it.
    ///
    /// Fails if this is not a label or entry, or if `raw` is not a value of
    /// the entry's type.
    pub fn input(&self, raw: &str) -> anyhow::Result<()> {
        let accept: Accept = {
            let lock = self.read();
            match &*lock {
                SsrNode::Entry { accept, .. } => accept.clone(),
                SsrNode::Text { edit, .. } => {
                    let edit = edit.clone();
                    let accept: Accept = Arc::new(move |raw: &str| -> anyhow::Result<()> {
                        edit(raw.to_string());
                        Ok(())
                    });
                    accept
                }
                _ => anyhow::bail!("not an entry"),
            }
        };
        accept(raw).map_err(|err| {
            log::warn!("rejected input {:?}: {}", raw, err);
            err
        })
    }

    /// Set the displayed text of a label or entry.
    async fn display(&self, s: String) {
        let mut lock = self.node.write().await;
        match lock.deref_mut() {
            SsrNode::Text { text, .. } => *text = s,
            SsrNode::Entry { value, .. } => *value = s,
            _ => log::error!("cannot display {:?} on this element", s),
        }
    }
}

/// Resolves the built-in widgets and layouts into [`SsrElement`]s.
pub struct SsrResolver<S> {
    spawner: S,
}

impl<S: Spawner> SsrResolver<S> {
    pub fn new(spawner: S) -> Self {
        SsrResolver { spawner }
    }

    /// Spawn a task that displays every value of `input` on `element`.
    fn follow<T: Send + 'static>(
        &self,
        element: &SsrElement,
        mut input: BoxStream<'static, T>,
        to_string: impl Fn(T) -> String + Send + 'static,
    ) {
        let element = element.clone();
        self.spawner.spawn(
            async move {
                while let Some(t) = input.next().await {
                    element.display(to_string(t)).await;
                }
            }
            .boxed(),
        );
    }

    fn text(&self, binding: Binding, attributes: &Attributes) -> Option<SsrElement> {
        let (input, edit) = binding.into_parts::<String, String>().ok()?;
        let element = SsrElement::new(SsrNode::Text {
            text: attribute(attributes, "initialText"),
            edit,
        });
        self.follow(&element, input, |s| s);
        Some(element)
    }

    fn button(&self, binding: Binding, attributes: &Attributes) -> Option<SsrElement> {
        // a button displays nothing it is sent
        let (_, click) = binding.into_parts::<(), ()>().ok()?;
        Some(SsrElement::new(SsrNode::Button {
            label: attribute(attributes, "text"),
            click,
        }))
    }

    fn entry(&self, binding: Binding, attributes: &Attributes) -> Option<SsrElement> {
        let entry_type = EntryType::from_attributes(attributes);
        let value = attribute(attributes, "text");
        match entry_type {
            EntryType::Decimal => {
                let (input, output) = binding.into_parts::<i32, i32>().ok()?;
                let accept: Accept = Arc::new(move |raw: &str| -> anyhow::Result<()> {
                    let n = raw
                        .trim()
                        .parse::<i32>()
                        .with_context(|| format!("'{}' is not a whole number", raw))?;
                    output(n);
                    Ok(())
                });
                let element = SsrElement::new(SsrNode::Entry {
                    entry_type,
                    value,
                    accept,
                });
                self.follow(&element, input, |n| n.to_string());
                Some(element)
            }
            EntryType::Text => {
                let (input, output) = binding.into_parts::<String, String>().ok()?;
                let accept: Accept = Arc::new(move |raw: &str| -> anyhow::Result<()> {
                    output(raw.to_string());
                    Ok(())
                });
                let element = SsrElement::new(SsrNode::Entry {
                    entry_type,
                    value,
                    accept,
                });
                self.follow(&element, input, |s| s);
                Some(element)
            }
        }
    }
}

/// An attribute's value, or empty if it is missing.
fn attribute(attributes: &Attributes, key: &str) -> String {
    attributes.get(key).cloned().unwrap_or_default()
}

impl<S: Spawner> Resolver for SsrResolver<S> {
    type Target = SsrElement;

    fn bind_widget(
        &self,
        kind: &WidgetKind,
        binding: Binding,
        attributes: &Attributes,
    ) -> Option<SsrElement> {
        match kind {
            WidgetKind::Text => self.text(binding, attributes),
            WidgetKind::Button => self.button(binding, attributes),
            WidgetKind::TextEntry => self.entry(binding, attributes),
            WidgetKind::Other(_) => None,
        }
    }

    fn resolve_layout(
        &self,
        kind: &LayoutKind,
        _: &Attributes,
    ) -> Option<Compose<'_, SsrElement>> {
        let class = match kind {
            LayoutKind::Column => "column",
            LayoutKind::Row => "row",
            LayoutKind::Other(_) => return None,
        };
        Some(Box::new(move |children| SsrElement::container(class, children)))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_executor::Executor;
    use dynamic_ui::prelude::*;
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn renders_escaped_html() {
        let executor = Arc::new(Executor::new());
        let ui = row(|ui| {
            ui.text("<b> & \"c\"");
            ui.column(|ui| {
                ui.button("+");
                ui.int_entry(-2);
            });
            ui.column(|_| {});
        });
        let root = ui.resolve(&SsrResolver::new(executor)).unwrap();
        assert_eq!(
            block_on(root.html_string()),
            r#"<div class="row"><span>&lt;b&gt; &amp; &quot;c&quot;</span> <div class="column"><button>+</button> <input type="number" value="-2" /></div> <div class="column"></div></div>"#
        );
    }

    #[test]
    fn missing_attributes_default_to_empty() {
        let executor = Arc::new(Executor::new());
        let resolver = SsrResolver::new(executor);
        let ui: Ui = Widget::new(
            WidgetKind::TextEntry,
            Binding::new(futures::stream::empty::<String>(), |_: String| {}),
        )
        .with_attribute("unknown", "ignored")
        .into();
        let entry = ui.resolve(&resolver).unwrap();
        assert_eq!(entry.text().unwrap(), "");
        assert_eq!(
            block_on(entry.html_string()),
            r#"<input type="text" value="" />"#
        );
    }

    #[test]
    fn interactions_check_the_element() {
        let executor = Arc::new(Executor::new());
        let root = column(|ui| {
            ui.text("label");
            ui.int_entry(0);
        })
        .resolve(&SsrResolver::new(executor))
        .unwrap();
        let children = root.children().unwrap();
        assert!(root.click().is_err());
        assert!(root.text().is_err());
        assert!(children[0].click().is_err());
        assert!(children[0].children().is_err());
        assert!(children[1].input("seven").is_err());
        assert!(children[1].input(" 7 ").is_ok());
    }

    #[test]
    fn decimal_entries_bind_integers() {
        let executor = Arc::new(Executor::new());
        let resolver = SsrResolver::new(executor);
        let ui: Ui = Widget::new(
            WidgetKind::TextEntry,
            Binding::new(futures::stream::empty::<String>(), |_: String| {}),
        )
        .with_attribute("entryType", "decimal")
        .into();
        assert_eq!(
            ui.try_resolve(&resolver).unwrap_err().to_string(),
            "unsupported widget 'TextEntry'"
        );
    }

    #[test]
    fn reads_wait_for_a_display_update() {
        let executor = Arc::new(Executor::new());
        let label = column(|ui| {
            ui.text("before");
        })
        .resolve(&SsrResolver::new(executor))
        .unwrap()
        .children()
        .unwrap()
        .remove(0);

        let mut lock = block_on(label.node.write());
        std::thread::scope(|scope| {
            scope.spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(20));
                if let SsrNode::Text { text, .. } = lock.deref_mut() {
                    *text = "after".to_string();
                }
                drop(lock);
            });
            assert_eq!(label.text().unwrap(), "after");
        });
    }
}
