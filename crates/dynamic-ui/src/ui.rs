//! The abstract interface tree.
use std::collections::BTreeMap;

use crate::binding::Binding;

/// Static configuration of a node, such as a button's label.
///
/// Keys are conventions of each widget kind. A resolver should ignore keys
/// it does not know and treat missing keys as empty.
pub type Attributes = BTreeMap<String, String>;

/// The kind of a leaf node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Text,
    Button,
    TextEntry,
    /// A kind only some resolvers know about.
    Other(String),
}

impl WidgetKind {
    pub fn as_str(&self) -> &str {
        match self {
            WidgetKind::Text => "Text",
            WidgetKind::Button => "Button",
            WidgetKind::TextEntry => "TextEntry",
            WidgetKind::Other(name) => name,
        }
    }
}

impl From<&str> for WidgetKind {
    fn from(s: &str) -> Self {
        match s {
            "Text" => WidgetKind::Text,
            "Button" => WidgetKind::Button,
            "TextEntry" => WidgetKind::TextEntry,
            other => WidgetKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of an inner node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Column,
    Row,
    /// A kind only some resolvers know about.
    Other(String),
}

impl LayoutKind {
    pub fn as_str(&self) -> &str {
        match self {
            LayoutKind::Column => "Column",
            LayoutKind::Row => "Row",
            LayoutKind::Other(name) => name,
        }
    }
}

impl From<&str> for LayoutKind {
    fn from(s: &str) -> Self {
        match s {
            "Column" => LayoutKind::Column,
            "Row" => LayoutKind::Row,
            other => LayoutKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf node, bound to its caller through a [`Binding`].
#[derive(Debug)]
pub struct Widget {
    pub kind: WidgetKind,
    pub attributes: Attributes,
    pub binding: Binding,
}

impl Widget {
    pub fn new(kind: impl Into<WidgetKind>, binding: Binding) -> Self {
        Widget {
            kind: kind.into(),
            attributes: Attributes::new(),
            binding,
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// An inner node with ordered children.
#[derive(Debug)]
pub struct Layout {
    pub kind: LayoutKind,
    pub attributes: Attributes,
    pub children: Vec<Ui>,
}

impl Layout {
    pub fn new(kind: impl Into<LayoutKind>, children: Vec<Ui>) -> Self {
        Layout {
            kind: kind.into(),
            attributes: Attributes::new(),
            children,
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// An unmaterialized interface fragment.
///
/// A `Ui` owns its children outright and is consumed by resolution, so a
/// node can only ever be materialized once.
#[derive(Debug)]
pub enum Ui {
    Widget(Widget),
    Layout(Layout),
}

impl From<Widget> for Ui {
    fn from(w: Widget) -> Self {
        Ui::Widget(w)
    }
}

impl From<Layout> for Ui {
    fn from(l: Layout) -> Self {
        Ui::Layout(l)
    }
}

impl Ui {
    /// The tag of this node, for diagnostics.
    pub fn kind_str(&self) -> &str {
        match self {
            Ui::Widget(w) => w.kind.as_str(),
            Ui::Layout(l) => l.kind.as_str(),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Ui::Widget(w) => &w.attributes,
            Ui::Layout(l) => &l.attributes,
        }
    }
}
