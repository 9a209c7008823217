//! # dynamic-ui
//!
//! Abstract widget trees with two-way reactive bindings.
//!
//! Interfaces are declared with a [`Builder`](builder::Builder) as a tree of
//! widgets and layouts. Each widget constructor hands back the caller's end
//! of the widget's binding: a stream of [`Events`](event::Events) or a
//! [`Dynamic`](dynamic::Dynamic) value. These can be mapped, combined and
//! reduced into new values, and those values fed into other widgets.
//!
//! The tree itself is inert. A [`Resolver`](resolver::Resolver) for some
//! target platform turns it into something that can be displayed, or fails
//! as a whole if it meets a node it does not support.
//!
//! ```rust
//! use dynamic_ui::prelude::*;
//!
//! let executor = async_executor::Executor::new();
//! let ui = column(|ui| {
//!     let clicks = ui.button("+");
//!     let count = clicks.reduce(&executor, 0, |(), n| n + 1);
//!     ui.text(count.map(|n| n.to_string()));
//! });
//!
//! let resolver = Table::default()
//!     .with_widget(WidgetKind::Button, |_, attributes| attributes.get("text").cloned())
//!     .with_widget(WidgetKind::Text, |_, attributes| attributes.get("initialText").cloned())
//!     .with_layout(LayoutKind::Column, |_| {
//!         Box::new(|children: Vec<String>| children.join("\n"))
//!     });
//! assert_eq!(ui.resolve(&resolver), Some("+\n0".to_string()));
//! ```
pub mod binding;
pub mod builder;
pub mod channel;
pub mod combine;
pub mod dynamic;
pub mod event;
pub mod model;
pub mod reduce;
pub mod resolver;
pub mod spawn;
pub mod ui;
mod widgets;

pub mod prelude {
    //! Re-exports for convenience
    pub use futures::stream::{Stream, StreamExt};

    pub use super::binding::{Binding, Output, TypeToken};
    pub use super::builder::{column, layout, row, Builder};
    pub use super::combine::{combine, combine3, combine4, combine5};
    pub use super::dynamic::Dynamic;
    pub use super::event::Events;
    pub use super::model::Model;
    pub use super::reduce::reduce;
    pub use super::resolver::{Compose, Resolver, Table, Unresolved};
    pub use super::spawn::Spawner;
    pub use super::ui::{Attributes, Layout, LayoutKind, Ui, Widget, WidgetKind};
}
