//! Values with streams of updates.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::{
    channel::{
        broadcast::{Channel, Receiver},
        DEFAULT_CAPACITY,
    },
    dynamic::Dynamic,
};

/// Wraps a value `T` and provides a stream of every later value.
///
/// [`Model`] can be shared for mutual mutation by cloning, and it is the
/// mutable source behind entry widgets and [`reduce`](crate::reduce::reduce).
///
/// Unlike a lossy "latest value" cell, every call to [`Model::set`] or
/// [`Model::visit_mut`] is delivered to every subscriber, in order.
///
/// Writers take turns, but [`Model::current`] never waits on one: it reads
/// the last committed value while a write is being computed or sent.
///
/// ```rust
/// use dynamic_ui::{model::Model, prelude::*};
///
/// let model = Model::new("hello".to_string());
/// let updates = model.updates();
/// model.set("hi".to_string());
///
/// let model_b = model.clone();
/// assert_eq!(model_b.current(), "hi");
/// model_b.visit_mut(|t| t.push_str(" there"));
/// assert_eq!(model.current(), "hi there");
///
/// drop(model);
/// drop(model_b);
/// futures::executor::block_on(async move {
///     assert_eq!(
///         updates.collect::<Vec<_>>().await,
///         vec!["hi".to_string(), "hi there".to_string()]
///     );
/// });
/// ```
pub struct Model<T> {
    // the committed value, only swapped out whole
    value: Arc<RwLock<Arc<T>>>,
    // held by a writer from reading the old value until its update is sent
    writer: Arc<Mutex<()>>,
    chan: Channel<T>,
}

impl<T> std::fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(&format!("Model<{}>", std::any::type_name::<T>()))
            .finish()
    }
}

impl<T> Clone for Model<T> {
    fn clone(&self) -> Self {
        Model {
            value: self.value.clone(),
            writer: self.writer.clone(),
            chan: self.chan.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Model<T> {
    /// Create a new Model.
    pub fn new(t: T) -> Model<T> {
        Model::with_capacity(t, DEFAULT_CAPACITY)
    }

    /// Create a new Model whose update channel starts with the given
    /// capacity.
    pub fn with_capacity(t: T, cap: usize) -> Model<T> {
        Model {
            value: Arc::new(RwLock::new(Arc::new(t))),
            writer: Arc::new(Mutex::new(())),
            chan: Channel::new(cap),
        }
    }

    fn snapshot(&self) -> Arc<T> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A clone of the inner value.
    ///
    /// This only waits for another reader or for the instant a new value is
    /// swapped in, never for a writer's closure or its subscribers.
    pub fn current(&self) -> T {
        T::clone(&self.snapshot())
    }

    /// Replace the inner value and send it to all subscribers.
    pub fn set(&self, t: T) {
        self.visit_mut(move |value| *value = t);
    }

    /// Visits the inner value of the model mutably. After the closure returns
    /// the inner value will be sent to all subscribers.
    ///
    /// The closure works on a copy. It is committed before it is sent, so a
    /// subscriber can never observe an update that [`Model::current`] does
    /// not yet reflect. Until then `current` reads the previous value.
    ///
    /// Writing to the same model from inside `f` deadlocks.
    pub fn visit_mut<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let _writer = self.lock_writer();
        let mut next = T::clone(&self.snapshot());
        f(&mut next);
        let next = Arc::new(next);
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        if let Err(err) = self.chan.sender().emit(T::clone(&next)) {
            log::error!("could not send {} update: {}", std::any::type_name::<T>(), err);
        }
    }

    /// Subscribe to every value set after this call.
    pub fn updates(&self) -> Receiver<T> {
        self.chan.receiver()
    }

    /// The current value together with a subscription to every later one.
    ///
    /// Unlike reading and subscribing separately, no update can be both
    /// reflected in the returned value and sent down the stream, nor be
    /// missed by both.
    pub fn observe(&self) -> (T, Receiver<T>) {
        let _writer = self.lock_writer();
        let updates = self.chan.receiver();
        (self.current(), updates)
    }

    /// A [`Dynamic`] view of this model.
    pub fn dynamic(&self) -> Dynamic<T> {
        let current = self.clone();
        let updated = self.clone();
        Dynamic::new(move || current.current(), move || updated.updates())
    }
}
