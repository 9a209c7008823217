//! Streams of user-originated events.
use futures::Stream;

use crate::{
    channel::broadcast::{Channel, Receiver, Sender, Subscribe},
    dynamic::Dynamic,
    spawn::Spawner,
};

/// A handle onto an event source, such as a button's clicks.
///
/// Every call to [`Events::stream`] subscribes to the events sent from then
/// on. Holding an `Events` does not keep the source alive: once every
/// [`Sender`] is dropped, every stream ends.
pub struct Events<T> {
    subscribe: Subscribe<T>,
}

impl<T> Clone for Events<T> {
    fn clone(&self) -> Self {
        Events {
            subscribe: self.subscribe.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Events<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(&format!("Events<{}>", std::any::type_name::<T>()))
            .finish()
    }
}

/// Create a new event source.
pub fn channel<T: Clone>() -> (Sender<T>, Events<T>) {
    let (tx, subscribe) = Channel::default().split();
    (tx, Events { subscribe })
}

impl<T: Clone + Send + Sync + 'static> Events<T> {
    /// Subscribe to the events sent from now on.
    pub fn stream(&self) -> impl Stream<Item = T> + Send + Unpin + 'static {
        let rx: Receiver<T> = self.subscribe.receiver();
        rx
    }

    /// Fold these events into a [`Dynamic`].
    ///
    /// See [`reduce`](crate::reduce::reduce).
    pub fn reduce<A, S, F>(&self, spawner: &S, initial: A, update: F) -> Dynamic<A>
    where
        A: Clone + Send + Sync + 'static,
        S: Spawner + ?Sized,
        F: FnMut(T, A) -> A + Send + 'static,
    {
        crate::reduce::reduce(self.stream(), spawner, initial, update)
    }
}

#[cfg(test)]
mod test {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn streams_end_with_their_senders() {
        let (tx, events) = channel::<u32>();
        let early = events.stream();
        tx.emit(1).unwrap();
        let late = events.stream();
        tx.emit(2).unwrap();
        drop(tx);

        futures::executor::block_on(async move {
            assert_eq!(early.collect::<Vec<_>>().await, vec![1, 2]);
            assert_eq!(late.collect::<Vec<_>>().await, vec![2]);
        });
        // the handle outlives the source without error
        assert!(futures::executor::block_on(events.stream().collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn streams_can_be_consumed_on_another_thread() {
        let (tx, events) = channel::<String>();
        let stream = events.stream();
        let consumer = std::thread::spawn(move || {
            futures::executor::block_on(stream.collect::<Vec<_>>())
        });
        tx.emit("a".to_string()).unwrap();
        tx.emit("b".to_string()).unwrap();
        drop(tx);
        assert_eq!(consumer.join().unwrap(), vec!["a", "b"]);
    }
}
