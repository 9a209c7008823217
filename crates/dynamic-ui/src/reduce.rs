//! Folding a stream of events into a [`Dynamic`].
use futures::{FutureExt, Stream, StreamExt};

use crate::{dynamic::Dynamic, model::Model, spawn::Spawner};

/// Fold `events` into a value, starting at `initial`.
///
/// A task spawned on `spawner` applies `update` to each event and the state
/// as it stands after every earlier event, one event at a time. The returned
/// value's `current` reads that state, and its update stream carries each
/// new state exactly once, only after it has been committed.
///
/// The task ends when `events` ends.
///
/// ```rust
/// use dynamic_ui::prelude::*;
///
/// let executor = async_executor::Executor::new();
/// let total = reduce(futures::stream::iter(vec![1, 2, 3]), &executor, 0, |n, total| total + n);
/// assert_eq!(total.current(), 0);
///
/// while executor.try_tick() {}
/// assert_eq!(total.current(), 6);
/// ```
pub fn reduce<E, A, St, S, F>(events: St, spawner: &S, initial: A, mut update: F) -> Dynamic<A>
where
    St: Stream<Item = E> + Send + 'static,
    A: Clone + Send + Sync + 'static,
    S: Spawner + ?Sized,
    F: FnMut(E, A) -> A + Send + 'static,
{
    let model = Model::new(initial);
    let state = model.clone();
    spawner.spawn(
        async move {
            let mut events = Box::pin(events);
            while let Some(event) = events.next().await {
                // this task is the only writer, so the state cannot change
                // between the read and the write
                let next = update(event, state.current());
                state.set(next);
                log::trace!("folded a {} event", std::any::type_name::<E>());
            }
            log::trace!(
                "event stream ended, {} reduction is final",
                std::any::type_name::<A>()
            );
        }
        .boxed(),
    );
    model.dynamic()
}
