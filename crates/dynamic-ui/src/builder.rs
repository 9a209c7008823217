//! Declaring interface trees.
//!
//! A [`Builder`] is a scope that collects sibling nodes in the order they
//! are registered. Layout functions open a fresh scope for their children,
//! so scopes never leak into one another.
//!
//! ```rust
//! use dynamic_ui::prelude::*;
//!
//! let ui = column(|ui| {
//!     ui.text("title");
//!     ui.row(|ui| {
//!         ui.button("-");
//!         ui.button("+");
//!     });
//! });
//!
//! match ui {
//!     Ui::Layout(column) => {
//!         let kinds = column
//!             .children
//!             .iter()
//!             .map(|child| child.kind_str())
//!             .collect::<Vec<_>>();
//!         assert_eq!(kinds, vec!["Text", "Row"]);
//!     }
//!     Ui::Widget(_) => unreachable!(),
//! }
//! ```
use crate::ui::{Attributes, Layout, LayoutKind, Ui};

/// Accumulates sibling nodes.
#[derive(Debug, Default)]
pub struct Builder {
    children: Vec<Ui>,
}

impl Builder {
    /// Run `f` in a fresh scope and return everything it registered.
    pub fn build(f: impl FnOnce(&mut Builder)) -> Vec<Ui> {
        Builder::scoped(f).1
    }

    fn scoped<R>(f: impl FnOnce(&mut Builder) -> R) -> (R, Vec<Ui>) {
        let mut builder = Builder::default();
        let r = f(&mut builder);
        (r, builder.children)
    }

    /// Register `node` as the next sibling.
    pub fn push(&mut self, node: impl Into<Ui>) {
        self.children.push(node.into());
    }

    /// Register a layout whose children are built by `f`.
    ///
    /// Returns whatever `f` returns, so values created by the inner widgets
    /// can be handed out of the nested scope.
    pub fn layout<R>(
        &mut self,
        kind: impl Into<LayoutKind>,
        attributes: Attributes,
        f: impl FnOnce(&mut Builder) -> R,
    ) -> R {
        let (r, children) = Builder::scoped(f);
        let mut node = Layout::new(kind, children);
        node.attributes = attributes;
        self.push(node);
        r
    }

    /// Register a column whose children are built by `f`.
    pub fn column<R>(&mut self, f: impl FnOnce(&mut Builder) -> R) -> R {
        self.layout(LayoutKind::Column, Attributes::new(), f)
    }

    /// Register a row whose children are built by `f`.
    pub fn row<R>(&mut self, f: impl FnOnce(&mut Builder) -> R) -> R {
        self.layout(LayoutKind::Row, Attributes::new(), f)
    }
}

/// A layout whose children are built by `f`.
pub fn layout(
    kind: impl Into<LayoutKind>,
    attributes: Attributes,
    f: impl FnOnce(&mut Builder),
) -> Ui {
    let mut node = Layout::new(kind, Builder::build(f));
    node.attributes = attributes;
    node.into()
}

/// A column whose children are built by `f`.
pub fn column(f: impl FnOnce(&mut Builder)) -> Ui {
    layout(LayoutKind::Column, Attributes::new(), f)
}

/// A row whose children are built by `f`.
pub fn row(f: impl FnOnce(&mut Builder)) -> Ui {
    layout(LayoutKind::Row, Attributes::new(), f)
}
