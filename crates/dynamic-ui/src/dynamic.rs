//! Values that change over time.
use std::sync::Arc;

use futures::{
    stream::{self, BoxStream},
    FutureExt, Stream, StreamExt,
};

use crate::{model::Model, spawn::Spawner};

/// A value of type `A` now, plus every value it will take in the future.
///
/// A `Dynamic` is two things:
/// * a synchronous [`current`](Dynamic::current) snapshot that never
///   suspends
/// * a multicast stream of [`updated`](Dynamic::updated) values that only
///   carries values produced after the subscription, never a replay of the
///   value `current` already returned
///
/// Unlike a stream, mapping or combining a `Dynamic` gives back a `Dynamic`,
/// and no executor is needed to do so. Derived values are recomputed from
/// their sources on every read, never cached.
///
/// ```rust
/// use dynamic_ui::prelude::*;
///
/// let count = Model::new(1);
/// let label = count.dynamic().map(|n| format!("{} clicks", n));
/// assert_eq!(label.current(), "1 clicks");
///
/// count.set(2);
/// assert_eq!(label.current(), "2 clicks");
/// ```
pub struct Dynamic<A> {
    current: Arc<dyn Fn() -> A + Send + Sync>,
    updated: Arc<dyn Fn() -> BoxStream<'static, A> + Send + Sync>,
}

impl<A> Clone for Dynamic<A> {
    fn clone(&self) -> Self {
        Dynamic {
            current: self.current.clone(),
            updated: self.updated.clone(),
        }
    }
}

impl<A> std::fmt::Debug for Dynamic<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(&format!("Dynamic<{}>", std::any::type_name::<A>()))
            .finish()
    }
}

impl<A: Send + 'static> Dynamic<A> {
    /// Create a `Dynamic` from a snapshot function and a subscription
    /// function.
    ///
    /// `updated` is called once per subscriber and should subscribe to a
    /// shared source rather than generate a fresh sequence.
    pub fn new<C, U, St>(current: C, updated: U) -> Self
    where
        C: Fn() -> A + Send + Sync + 'static,
        U: Fn() -> St + Send + Sync + 'static,
        St: Stream<Item = A> + Send + 'static,
    {
        Dynamic {
            current: Arc::new(current),
            updated: Arc::new(move || updated().boxed()),
        }
    }

    /// The present value.
    pub fn current(&self) -> A {
        (self.current)()
    }

    /// Subscribe to every value produced from now on.
    pub fn updated(&self) -> BoxStream<'static, A> {
        (self.updated)()
    }

    /// Subscribe, then read the present value.
    ///
    /// Subscribing first means no update is lost between the two. For a
    /// `Dynamic` derived from several sources an update racing with this
    /// call may be reflected in both halves; use [`Model::observe`] where
    /// that matters.
    pub fn observe(&self) -> (A, BoxStream<'static, A>) {
        let updated = self.updated();
        (self.current(), updated)
    }

    /// Apply `f` to the present value on every read and to every update.
    ///
    /// Nothing is evaluated until the result is read or subscribed to.
    pub fn map<B, F>(&self, f: F) -> Dynamic<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let current = {
            let source = self.clone();
            let f = f.clone();
            move || f(source.current())
        };
        let source = self.clone();
        Dynamic::new(current, move || {
            let f = f.clone();
            source.updated().map(move |a| f(a))
        })
    }

    /// Mirror this value into a [`Model`].
    ///
    /// Spawns a task that copies every update into the model until this
    /// value's update stream ends.
    pub fn to_model<S: Spawner + ?Sized>(&self, spawner: &S) -> Model<A>
    where
        A: Clone + Sync,
    {
        let (current, mut updates) = self.observe();
        let model = Model::new(current);
        let mirror = model.clone();
        spawner.spawn(
            async move {
                while let Some(a) = updates.next().await {
                    mirror.set(a);
                }
            }
            .boxed(),
        );
        model
    }
}

impl<A: Clone + Send + Sync + 'static> Dynamic<A> {
    /// A value that never changes.
    ///
    /// Its update stream ends immediately.
    pub fn constant(a: A) -> Self {
        Dynamic::new(move || a.clone(), stream::empty)
    }
}

impl From<&str> for Dynamic<String> {
    fn from(s: &str) -> Self {
        Dynamic::constant(s.to_string())
    }
}

impl From<String> for Dynamic<String> {
    fn from(s: String) -> Self {
        Dynamic::constant(s)
    }
}
