//! Spawn async operations.
//!
//! Nothing in this crate reaches for an ambient executor. Operations that
//! need background work take a [`Spawner`] explicitly.
use std::sync::Arc;

use futures::future::BoxFuture;

/// Something that can run detached background tasks.
pub trait Spawner {
    /// Spawn a task, detaching it.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

impl Spawner for async_executor::Executor<'static> {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        async_executor::Executor::spawn(self, task).detach();
    }
}

impl<S: Spawner + ?Sized> Spawner for Arc<S> {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        (**self).spawn(task)
    }
}

impl<S: Spawner + ?Sized> Spawner for &S {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        (**self).spawn(task)
    }
}

/// Spawns onto the platform's global executor.
///
/// On native targets this is smol's global executor, on wasm32 it is the
/// browser's microtask queue.
#[cfg(any(target_arch = "wasm32", feature = "async-smol"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

#[cfg(all(not(target_arch = "wasm32"), feature = "async-smol"))]
impl Spawner for Detached {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        smol::spawn(task).detach();
    }
}

#[cfg(target_arch = "wasm32")]
impl Spawner for Detached {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task)
    }
}
