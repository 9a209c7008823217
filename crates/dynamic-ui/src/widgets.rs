//! Widget constructors.
//!
//! Each constructor registers one [`Widget`] in the enclosing [`Builder`]
//! scope and hands back the caller's end of its binding. Input streams are
//! subscribed when the widget is constructed, so nothing sent between
//! building and resolving is lost.
use crate::{
    binding::Binding,
    builder::Builder,
    channel::broadcast::Sender,
    dynamic::Dynamic,
    event::{self, Events},
    model::Model,
    ui::{Widget, WidgetKind},
};

/// Send `item` to `tx`, logging rather than failing.
fn emit_or_log<T: Clone>(tx: &Sender<T>, item: T) {
    if let Err(err) = tx.emit(item) {
        log::error!("could not send {} output: {}", std::any::type_name::<T>(), err);
    }
}

impl Builder {
    /// A label displaying `value`.
    ///
    /// Returns the text the user produces, for resolvers whose labels are
    /// editable.
    pub fn text(&mut self, value: impl Into<Dynamic<String>>) -> Events<String> {
        let value = value.into();
        let (current, updates) = value.observe();
        let (tx, events) = event::channel::<String>();
        self.push(
            Widget::new(
                WidgetKind::Text,
                Binding::new(updates, move |s: String| emit_or_log(&tx, s)),
            )
            .with_attribute("initialText", current),
        );
        events
    }

    /// A button labelled `label`. Returns its clicks.
    pub fn button(&mut self, label: impl Into<String>) -> Events<()> {
        let (tx, events) = event::channel::<()>();
        self.push(
            Widget::new(
                WidgetKind::Button,
                Binding::new(futures::stream::empty::<()>(), move |()| emit_or_log(&tx, ())),
            )
            .with_attribute("text", label),
        );
        events
    }

    /// A numeric entry starting at `initial`. Returns the entered value.
    pub fn int_entry(&mut self, initial: i32) -> Dynamic<i32> {
        self.entry(initial, "decimal")
    }

    /// A free text entry starting at `initial`. Returns the entered value.
    pub fn text_entry(&mut self, initial: impl Into<String>) -> Dynamic<String> {
        self.entry(initial.into(), "text")
    }

    fn entry<T>(&mut self, initial: T, entry_type: &str) -> Dynamic<T>
    where
        T: Clone + ToString + Send + Sync + 'static,
    {
        let model = Model::new(initial);
        let (current, updates) = model.observe();
        let entered = model.clone();
        self.push(
            Widget::new(
                WidgetKind::TextEntry,
                Binding::new(updates, move |t: T| entered.set(t)),
            )
            .with_attribute("text", current.to_string())
            .with_attribute("entryType", entry_type),
        );
        model.dynamic()
    }
}

#[cfg(test)]
mod test {
    use futures::{executor::block_on, StreamExt};

    use crate::{model::Model, ui::Ui};

    use super::*;

    fn only_widget(mut nodes: Vec<Ui>) -> Widget {
        assert_eq!(nodes.len(), 1);
        match nodes.pop() {
            Some(Ui::Widget(w)) => w,
            other => panic!("expected a widget, got {:?}", other),
        }
    }

    #[test]
    fn text_follows_its_value() {
        let label = Model::new("a".to_string());
        let mut edits = None;
        let widget = only_widget(Builder::build(|ui| edits = Some(ui.text(label.dynamic()))));
        assert_eq!(widget.kind, WidgetKind::Text);
        assert_eq!(widget.attributes["initialText"], "a");

        let (input, output) = widget.binding.into_parts::<String, String>().unwrap();
        let edits = edits.unwrap().stream();
        label.set("b".to_string());
        output("typed".to_string());
        drop(label);
        drop(output);

        block_on(async move {
            assert_eq!(input.collect::<Vec<_>>().await, vec!["b".to_string()]);
            assert_eq!(edits.collect::<Vec<_>>().await, vec!["typed".to_string()]);
        });
    }

    #[test]
    fn button_reports_clicks() {
        let mut clicks = None;
        let widget = only_widget(Builder::build(|ui| clicks = Some(ui.button("+"))));
        assert_eq!(widget.attributes["text"], "+");
        assert!(widget.binding.binds::<(), ()>());

        let clicks = clicks.unwrap();
        let (_, click) = widget.binding.into_parts::<(), ()>().unwrap();
        let seen = clicks.stream();
        click(());
        click(());
        drop(click);
        assert_eq!(block_on(seen.collect::<Vec<_>>()).len(), 2);
    }

    #[test]
    fn int_entry_holds_the_latest_value() {
        let mut entered = None;
        let widget = only_widget(Builder::build(|ui| entered = Some(ui.int_entry(5))));
        assert_eq!(widget.kind, WidgetKind::TextEntry);
        assert_eq!(widget.attributes["text"], "5");
        assert_eq!(widget.attributes["entryType"], "decimal");
        assert!(!widget.binding.binds::<String, String>());

        let entered = entered.unwrap();
        let mut updates = entered.updated();
        let (mut input, output) = widget.binding.into_parts::<i32, i32>().unwrap();
        output(9);
        assert_eq!(entered.current(), 9);
        assert_eq!(block_on(updates.next()), Some(9));
        // the widget hears its own value back
        assert_eq!(block_on(input.next()), Some(9));
    }

    #[test]
    fn text_entry_binds_strings() {
        let mut entered = None;
        let widget = only_widget(Builder::build(|ui| entered = Some(ui.text_entry("hi"))));
        assert_eq!(widget.attributes["entryType"], "text");
        let (_, output) = widget.binding.into_parts::<String, String>().unwrap();
        output("hello".to_string());
        assert_eq!(entered.unwrap().current(), "hello");
    }
}
