//! Materializing interface trees.
//!
//! A [`Resolver`] knows how to turn some widget and layout kinds into a
//! `Target`, such as a native view or an HTML element. Resolution walks a
//! [`Ui`] tree depth first and fails as a whole the moment any node is
//! unsupported. No partial tree is ever produced.
use std::collections::HashMap;

use crate::{
    binding::Binding,
    ui::{Attributes, Layout, LayoutKind, Ui, Widget, WidgetKind},
};

/// Composes resolved children, in order, into their parent.
pub type Compose<'a, T> = Box<dyn FnOnce(Vec<T>) -> T + 'a>;

/// A target platform's capabilities.
///
/// Both operations return `None` for anything unsupported, including a
/// widget whose binding carries types the resolver cannot display.
pub trait Resolver {
    type Target;

    /// Materialize a widget that displays the binding's input and calls its
    /// output on user interaction.
    fn bind_widget(
        &self,
        kind: &WidgetKind,
        binding: Binding,
        attributes: &Attributes,
    ) -> Option<Self::Target>;

    /// A function that composes a layout from its resolved children.
    fn resolve_layout(
        &self,
        kind: &LayoutKind,
        attributes: &Attributes,
    ) -> Option<Compose<'_, Self::Target>>;
}

/// Which sort of node could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Widget,
    Layout,
}

/// The first node a resolver did not support.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unresolved {
    pub node: NodeKind,
    pub kind: String,
}

impl std::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node {
            NodeKind::Widget => write!(f, "unsupported widget '{}'", self.kind),
            NodeKind::Layout => write!(f, "unsupported layout '{}'", self.kind),
        }
    }
}

impl std::error::Error for Unresolved {}

impl Ui {
    /// Resolve this tree, reporting the first unsupported node.
    ///
    /// A layout's own kind is checked before any of its children are
    /// touched, and children are resolved in order, so nothing after the
    /// first failure is bound.
    pub fn try_resolve<R: Resolver + ?Sized>(self, resolver: &R) -> Result<R::Target, Unresolved> {
        match self {
            Ui::Widget(Widget {
                kind,
                attributes,
                binding,
            }) => {
                let unresolved = Unresolved {
                    node: NodeKind::Widget,
                    kind: kind.as_str().to_string(),
                };
                resolver
                    .bind_widget(&kind, binding, &attributes)
                    .ok_or(unresolved)
            }
            Ui::Layout(Layout {
                kind,
                attributes,
                children,
            }) => {
                let compose = resolver
                    .resolve_layout(&kind, &attributes)
                    .ok_or_else(|| Unresolved {
                        node: NodeKind::Layout,
                        kind: kind.as_str().to_string(),
                    })?;
                let children = children
                    .into_iter()
                    .map(|child| child.try_resolve(resolver))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(compose(children))
            }
        }
    }

    /// Resolve this tree, or `None` if any node is unsupported.
    pub fn resolve<R: Resolver + ?Sized>(self, resolver: &R) -> Option<R::Target> {
        match self.try_resolve(resolver) {
            Ok(target) => Some(target),
            Err(unresolved) => {
                log::debug!("could not resolve: {}", unresolved);
                None
            }
        }
    }
}

type WidgetHandler<'a, T> = Box<dyn Fn(Binding, &Attributes) -> Option<T> + 'a>;
type LayoutHandler<'a, T> = Box<dyn Fn(&Attributes) -> Compose<'a, T> + 'a>;

/// A resolver assembled from one handler per supported kind.
///
/// ```rust
/// use dynamic_ui::prelude::*;
///
/// let resolver = Table::default()
///     .with_widget(WidgetKind::Button, |_, attributes| attributes.get("text").cloned())
///     .with_layout(LayoutKind::Row, |_| Box::new(|children: Vec<String>| children.join("|")));
///
/// let ui = row(|ui| {
///     ui.button("a");
///     ui.button("b");
/// });
/// assert_eq!(ui.resolve(&resolver), Some("a|b".to_string()));
///
/// let ui = column(|ui| {
///     ui.button("a");
/// });
/// assert_eq!(ui.resolve(&resolver), None);
/// ```
pub struct Table<'a, T> {
    widgets: HashMap<WidgetKind, WidgetHandler<'a, T>>,
    layouts: HashMap<LayoutKind, LayoutHandler<'a, T>>,
}

impl<'a, T> Default for Table<'a, T> {
    fn default() -> Self {
        Table {
            widgets: HashMap::new(),
            layouts: HashMap::new(),
        }
    }
}

impl<'a, T> Table<'a, T> {
    /// Support widgets of `kind`.
    ///
    /// The handler may still decline a binding whose types it cannot
    /// display.
    pub fn with_widget(
        mut self,
        kind: impl Into<WidgetKind>,
        handler: impl Fn(Binding, &Attributes) -> Option<T> + 'a,
    ) -> Self {
        self.widgets.insert(kind.into(), Box::new(handler));
        self
    }

    /// Support layouts of `kind`.
    pub fn with_layout(
        mut self,
        kind: impl Into<LayoutKind>,
        handler: impl Fn(&Attributes) -> Compose<'a, T> + 'a,
    ) -> Self {
        self.layouts.insert(kind.into(), Box::new(handler));
        self
    }
}

impl<'a, T> Resolver for Table<'a, T> {
    type Target = T;

    fn bind_widget(
        &self,
        kind: &WidgetKind,
        binding: Binding,
        attributes: &Attributes,
    ) -> Option<T> {
        let handler = self.widgets.get(kind)?;
        handler(binding, attributes)
    }

    fn resolve_layout(&self, kind: &LayoutKind, attributes: &Attributes) -> Option<Compose<'_, T>> {
        let handler = self.layouts.get(kind)?;
        let compose: Compose<'_, T> = handler(attributes);
        Some(compose)
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::builder::{column, row, Builder};

    /// Records the tag of every widget it binds.
    struct Recording {
        bound: Arc<Mutex<Vec<String>>>,
        layouts: Vec<LayoutKind>,
        widgets: Vec<WidgetKind>,
    }

    impl Recording {
        fn new(layouts: Vec<LayoutKind>, widgets: Vec<WidgetKind>) -> Self {
            Recording {
                bound: Default::default(),
                layouts,
                widgets,
            }
        }

        fn bound(&self) -> Vec<String> {
            self.bound.lock().unwrap().clone()
        }
    }

    impl Resolver for Recording {
        type Target = String;

        fn bind_widget(
            &self,
            kind: &WidgetKind,
            binding: Binding,
            attributes: &Attributes,
        ) -> Option<String> {
            if !self.widgets.contains(kind) {
                return None;
            }
            if *kind == WidgetKind::Button && !binding.binds::<(), ()>() {
                return None;
            }
            let label = attributes
                .get("text")
                .or_else(|| attributes.get("initialText"))
                .cloned()
                .unwrap_or_default();
            self.bound.lock().unwrap().push(label.clone());
            Some(label)
        }

        fn resolve_layout(
            &self,
            kind: &LayoutKind,
            _: &Attributes,
        ) -> Option<Compose<'_, String>> {
            if !self.layouts.contains(kind) {
                return None;
            }
            let kind = kind.clone();
            Some(Box::new(move |children: Vec<String>| {
                format!("{}[{}]", kind, children.join(","))
            }))
        }
    }

    fn everything() -> Recording {
        Recording::new(
            vec![LayoutKind::Column, LayoutKind::Row],
            vec![WidgetKind::Text, WidgetKind::Button, WidgetKind::TextEntry],
        )
    }

    #[test]
    fn children_compose_in_order() {
        let resolver = everything();
        let ui = column(|ui| {
            ui.text("a");
            ui.row(|ui| {
                ui.button("b");
                ui.button("c");
            });
            ui.int_entry(4);
        });
        assert_eq!(
            ui.resolve(&resolver),
            Some("Column[a,Row[b,c],4]".to_string())
        );
        assert_eq!(resolver.bound(), vec!["a", "b", "c", "4"]);
    }

    #[test]
    fn one_unknown_leaf_fails_the_whole_tree() {
        let resolver = everything();
        let ui = column(|ui| {
            ui.row(|ui| {
                ui.text("fine");
            });
            ui.row(|ui| {
                ui.push(Widget::new(
                    "Slider",
                    Binding::new(futures::stream::empty::<f32>(), |_: f32| {}),
                ));
            });
            ui.row(|ui| {
                ui.text("also fine");
            });
        });
        assert_eq!(
            ui.try_resolve(&resolver),
            Err(Unresolved {
                node: NodeKind::Widget,
                kind: "Slider".to_string()
            })
        );
        // resolution stops at the first failure
        assert_eq!(resolver.bound(), vec!["fine"]);
    }

    #[test]
    fn unsupported_layout_binds_nothing() {
        let resolver = Recording::new(vec![LayoutKind::Column], vec![WidgetKind::Text]);
        let ui = column(|ui| {
            ui.text("a");
            ui.row(|ui| {
                ui.text("b");
            });
        });
        let err = ui.try_resolve(&resolver).unwrap_err();
        assert_eq!(err.node, NodeKind::Layout);
        assert_eq!(err.to_string(), "unsupported layout 'Row'");
        assert_eq!(resolver.bound(), vec!["a"]);

        let ui = row(|ui| {
            ui.text("never bound");
        });
        assert_eq!(ui.resolve(&resolver), None);
        assert_eq!(resolver.bound(), vec!["a"]);
    }

    #[test]
    fn type_mismatch_is_unsupported() {
        let resolver = everything();
        let mut nodes = Builder::build(|ui| {
            ui.push(Widget::new(
                WidgetKind::Button,
                Binding::new(futures::stream::empty::<String>(), |_: String| {}),
            ));
        });
        let ui = nodes.remove(0);
        assert_eq!(
            ui.try_resolve(&resolver).unwrap_err().to_string(),
            "unsupported widget 'Button'"
        );
    }

    #[test]
    fn empty_layouts_resolve() {
        let resolver = everything();
        assert_eq!(
            column(|_| {}).resolve(&resolver),
            Some("Column[]".to_string())
        );
    }
}
