//! Async multicast channels.
//!
//! Every `updated` stream of a [`Dynamic`](crate::dynamic::Dynamic) and every
//! widget output is backed by a [`broadcast`] channel. Subscribers only see
//! messages sent after they subscribed, and sending never suspends.

/// The starting capacity of every broadcast channel.
///
/// Channels grow past this when a subscriber falls behind, up to
/// [`MAX_CAPACITY`].
pub const DEFAULT_CAPACITY: usize = 8;

/// The most messages a broadcast channel will buffer.
///
/// A subscriber that falls more than this many messages behind loses the
/// oldest ones. Every subscriber within this many messages of the newest
/// sees each message exactly once.
pub const MAX_CAPACITY: usize = 1024;

/// Errors returned when sending into a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Every receiver is gone.
    Closed,
    /// The channel is full.
    Full,
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SinkError::Closed => "channel is closed",
            SinkError::Full => "channel is full",
        })
    }
}

impl std::error::Error for SinkError {}

impl<T> From<async_broadcast::TrySendError<T>> for SinkError {
    fn from(e: async_broadcast::TrySendError<T>) -> Self {
        match e {
            async_broadcast::TrySendError::Full(_) => SinkError::Full,
            _ => SinkError::Closed,
        }
    }
}

pub mod broadcast {
    //! Async broadcast channel.
    //!
    //! An async multi-producer multi-consumer broadcast channel, where each
    //! consumer gets a clone of every message sent after it subscribed.
    //!
    //! This is a small wrapper around [`async_broadcast`].
    use std::{pin::Pin, task::Poll};

    use futures::{Stream, StreamExt};

    use super::{SinkError, DEFAULT_CAPACITY, MAX_CAPACITY};

    /// A broadcast sender that never suspends.
    pub struct Sender<T> {
        inner: async_broadcast::Sender<T>,
    }

    impl<T> Clone for Sender<T> {
        fn clone(&self) -> Self {
            Sender {
                inner: self.inner.clone(),
            }
        }
    }

    impl<T: Clone> Sender<T> {
        /// Send a message to every active [`Receiver`].
        ///
        /// A message sent while nobody is subscribed is dropped. If a
        /// subscriber has fallen behind the channel doubles its capacity
        /// instead of waiting, up to [`MAX_CAPACITY`]. Past that the oldest
        /// buffered message is dropped to make room, so only a subscriber
        /// more than [`MAX_CAPACITY`] messages behind misses anything.
        pub fn emit(&self, item: T) -> Result<(), SinkError> {
            match self.inner.try_broadcast(item) {
                Ok(None) => Ok(()),
                Ok(Some(_)) => {
                    log::trace!("broadcast channel at capacity, dropped its oldest message");
                    Ok(())
                }
                Err(async_broadcast::TrySendError::Inactive(_)) => {
                    log::trace!("no active subscribers, dropping message");
                    Ok(())
                }
                Err(async_broadcast::TrySendError::Full(item)) => {
                    // capacity and overflow are shared by every clone of the sender
                    let mut tx = self.inner.clone();
                    let cap = tx.capacity();
                    if cap < MAX_CAPACITY {
                        tx.set_capacity((cap.max(1) * 2).min(MAX_CAPACITY));
                        log::trace!("grew broadcast channel from {} to {}", cap, tx.capacity());
                    } else {
                        tx.set_overflow(true);
                        log::warn!(
                            "a subscriber is {} messages behind, dropping its oldest from now on",
                            cap
                        );
                    }
                    match tx.try_broadcast(item) {
                        Ok(_) => Ok(()),
                        Err(err) => Err(SinkError::from(err)),
                    }
                }
                Err(err) => Err(SinkError::from(err)),
            }
        }

        /// How many messages the channel currently buffers.
        pub fn capacity(&self) -> usize {
            self.inner.capacity()
        }

        /// Whether every receiver has been dropped.
        pub fn is_closed(&self) -> bool {
            self.inner.is_closed()
        }
    }

    /// A broadcast receiver.
    ///
    /// Yields every message sent after it was created and ends once every
    /// [`Sender`] is dropped.
    pub struct Receiver<T> {
        inner: async_broadcast::Receiver<T>,
    }

    impl<T: Clone> Stream for Receiver<T> {
        type Item = T;

        fn poll_next(
            self: Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> Poll<Option<Self::Item>> {
            let data = self.get_mut();
            data.inner.poll_next_unpin(cx)
        }
    }

    /// A [`Sender`] paired with an inactive receiver that can be activated
    /// for new subscribers.
    pub struct Channel<T> {
        sender: async_broadcast::Sender<T>,
        receiver: async_broadcast::InactiveReceiver<T>,
    }

    impl<T> Clone for Channel<T> {
        fn clone(&self) -> Self {
            Channel {
                sender: self.sender.clone(),
                receiver: self.receiver.clone(),
            }
        }
    }

    impl<T> Default for Channel<T> {
        fn default() -> Self {
            Channel::new(DEFAULT_CAPACITY)
        }
    }

    impl<T> Channel<T> {
        /// Create a new broadcast channel with the given starting capacity.
        pub fn new(cap: usize) -> Self {
            let (sender, rx) = async_broadcast::broadcast(cap.max(1));
            Channel {
                sender,
                receiver: rx.deactivate(),
            }
        }

        /// Create a new Sender out of this channel.
        pub fn sender(&self) -> Sender<T> {
            Sender {
                inner: self.sender.clone(),
            }
        }

        /// Subscribe to messages sent from now on.
        pub fn receiver(&self) -> Receiver<T> {
            Receiver {
                inner: self.receiver.activate_cloned(),
            }
        }

        /// Split into a sender and a subscription handle.
        ///
        /// The handle does not hold a sender, so the channel closes once
        /// every [`Sender`] is dropped.
        pub fn split(self) -> (Sender<T>, Subscribe<T>) {
            let Channel { sender, receiver } = self;
            (Sender { inner: sender }, Subscribe { receiver })
        }
    }

    /// Subscribes new receivers without keeping the channel open.
    pub struct Subscribe<T> {
        receiver: async_broadcast::InactiveReceiver<T>,
    }

    impl<T> Clone for Subscribe<T> {
        fn clone(&self) -> Self {
            Subscribe {
                receiver: self.receiver.clone(),
            }
        }
    }

    impl<T> Subscribe<T> {
        /// Subscribe to messages sent from now on.
        pub fn receiver(&self) -> Receiver<T> {
            Receiver {
                inner: self.receiver.activate_cloned(),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{broadcast::Channel, MAX_CAPACITY};
    use futures::StreamExt;

    #[test]
    fn receivers_only_see_later_messages() {
        let chan = Channel::<u32>::new(1);
        let tx = chan.sender();
        tx.emit(0).unwrap();

        let rx = chan.receiver();
        tx.emit(1).unwrap();
        tx.emit(2).unwrap();
        tx.emit(3).unwrap();
        drop(tx);
        drop(chan);

        let items = futures::executor::block_on(rx.collect::<Vec<_>>());
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn every_receiver_gets_every_message() {
        let (tx, subscribe) = Channel::<String>::new(1).split();
        let rx1 = subscribe.receiver();
        let rx2 = subscribe.receiver();
        for s in ["a", "b", "c"] {
            tx.emit(s.to_string()).unwrap();
        }
        drop(tx);

        futures::executor::block_on(async move {
            assert_eq!(rx1.collect::<Vec<_>>().await, vec!["a", "b", "c"]);
            assert_eq!(rx2.collect::<Vec<_>>().await, vec!["a", "b", "c"]);
        });
    }

    #[test]
    fn split_handle_does_not_keep_channel_open() {
        let (tx, subscribe) = Channel::<()>::default().split();
        let rx = subscribe.receiver();
        drop(tx);
        let items = futures::executor::block_on(rx.collect::<Vec<_>>());
        assert!(items.is_empty());
    }

    #[test]
    fn growth_stops_at_max_capacity() {
        let chan = Channel::<usize>::new(1);
        let tx = chan.sender();
        let stalled = chan.receiver();
        let mut live = chan.receiver();

        for i in 0..MAX_CAPACITY * 4 {
            tx.emit(i).unwrap();
            assert_eq!(futures::executor::block_on(live.next()), Some(i));
        }
        assert_eq!(tx.capacity(), MAX_CAPACITY);

        drop(tx);
        drop(chan);
        // the stalled receiver keeps only the newest MAX_CAPACITY messages
        let items = futures::executor::block_on(stalled.collect::<Vec<_>>());
        assert_eq!(items, (MAX_CAPACITY * 3..MAX_CAPACITY * 4).collect::<Vec<_>>());
        assert_eq!(futures::executor::block_on(live.next()), None);
    }
}
