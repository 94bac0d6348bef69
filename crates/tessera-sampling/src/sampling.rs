//! The core `Sampling` trait.

use std::sync::Arc;

use tessera_core::Coordinate;

/// A set of coordinates with a defined visitation order.
///
/// # Contract
///
/// - [`iter`](Self::iter) returns a finite, forward-only iterator. Each call
///   starts over from the first point; an individual iterator cannot be
///   rewound.
/// - Every coordinate yielded is an owned value; callers may keep or mutate
///   it without affecting the sampling.
/// - [`contains`](Self::contains) agrees with iteration: a point is
///   contained iff some traversal yields it. Points of the wrong
///   dimensionality are never contained.
/// - A single traversal yields each point at most once.
///
/// The trait is object safe so combinators can hold `Box<dyn Sampling<C>>`.
pub trait Sampling<C: Coordinate> {
    /// Dimensionality of every coordinate in the sampling.
    fn num_dimensions(&self) -> usize;

    /// Whether `point` is a member.
    fn contains(&self, point: &C) -> bool;

    /// Start a fresh traversal.
    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_>;
}

impl<C: Coordinate, S: Sampling<C> + ?Sized> Sampling<C> for &S {
    fn num_dimensions(&self) -> usize {
        (**self).num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        (**self).contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        (**self).iter()
    }
}

impl<C: Coordinate, S: Sampling<C> + ?Sized> Sampling<C> for Box<S> {
    fn num_dimensions(&self) -> usize {
        (**self).num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        (**self).contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        (**self).iter()
    }
}

impl<C: Coordinate, S: Sampling<C> + ?Sized> Sampling<C> for Arc<S> {
    fn num_dimensions(&self) -> usize {
        (**self).num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        (**self).contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        (**self).iter()
    }
}
