//! Combining several [`Dynamic`] values into one.
//!
//! A combined value's `current` reads every source on each call. Its update
//! stream fires whenever any one source fires, pairing the new value with
//! the other sources' present values. Simultaneous firings are never
//! coalesced, and no order is imposed across independent sources.
use std::sync::Arc;

use futures::{future::Either, stream, StreamExt};

use crate::dynamic::Dynamic;

/// Combine two values with `transform`.
///
/// ```rust
/// use dynamic_ui::prelude::*;
///
/// let x = Model::new(1);
/// let y = Model::new(2);
/// let sum = combine(&x.dynamic(), &y.dynamic(), |x, y| x + y);
/// assert_eq!(sum.current(), 3);
///
/// x.set(10);
/// assert_eq!(sum.current(), 12);
/// ```
pub fn combine<A, B, R, F>(a: &Dynamic<A>, b: &Dynamic<B>, transform: F) -> Dynamic<R>
where
    A: Send + 'static,
    B: Send + 'static,
    R: Send + 'static,
    F: Fn(A, B) -> R + Send + Sync + 'static,
{
    let transform = Arc::new(transform);
    let current = {
        let (a, b) = (a.clone(), b.clone());
        let transform = transform.clone();
        move || transform(a.current(), b.current())
    };
    let (a, b) = (a.clone(), b.clone());
    Dynamic::new(current, move || {
        let (left, right) = (a.clone(), b.clone());
        let transform = transform.clone();
        stream::select(a.updated().map(Either::Left), b.updated().map(Either::Right)).map(
            move |fired| match fired {
                Either::Left(a) => transform(a, right.current()),
                Either::Right(b) => transform(left.current(), b),
            },
        )
    })
}

/// Combine three values with `transform`.
pub fn combine3<A, B, C, R, F>(
    a: &Dynamic<A>,
    b: &Dynamic<B>,
    c: &Dynamic<C>,
    transform: F,
) -> Dynamic<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    R: Send + 'static,
    F: Fn(A, B, C) -> R + Send + Sync + 'static,
{
    combine(&a.zip(b), c, move |(a, b), c| transform(a, b, c))
}

/// Combine four values with `transform`.
pub fn combine4<A, B, C, D, R, F>(
    a: &Dynamic<A>,
    b: &Dynamic<B>,
    c: &Dynamic<C>,
    d: &Dynamic<D>,
    transform: F,
) -> Dynamic<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    R: Send + 'static,
    F: Fn(A, B, C, D) -> R + Send + Sync + 'static,
{
    let abc = combine3(a, b, c, |a, b, c| (a, b, c));
    combine(&abc, d, move |(a, b, c), d| transform(a, b, c, d))
}

/// Combine five values with `transform`.
///
/// Higher arities can be had by nesting.
pub fn combine5<A, B, C, D, E, R, F>(
    a: &Dynamic<A>,
    b: &Dynamic<B>,
    c: &Dynamic<C>,
    d: &Dynamic<D>,
    e: &Dynamic<E>,
    transform: F,
) -> Dynamic<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    E: Send + 'static,
    R: Send + 'static,
    F: Fn(A, B, C, D, E) -> R + Send + Sync + 'static,
{
    let abcd = combine4(a, b, c, d, |a, b, c, d| (a, b, c, d));
    combine(&abcd, e, move |(a, b, c, d), e| transform(a, b, c, d, e))
}

impl<A: Send + 'static> Dynamic<A> {
    /// Pair this value with another.
    pub fn zip<B: Send + 'static>(&self, other: &Dynamic<B>) -> Dynamic<(A, B)> {
        combine(self, other, |a, b| (a, b))
    }
}
