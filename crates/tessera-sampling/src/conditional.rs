//! Predicate-filtered samplings.

use std::marker::PhantomData;

use tessera_core::Coordinate;

use crate::sampling::Sampling;

/// The points of a base sampling that satisfy a predicate.
///
/// # Examples
///
/// ```
/// use tessera_core::IntegerIndex;
/// use tessera_sampling::{ConditionalSampling, GridSampling, Sampling};
///
/// let grid = GridSampling::from_dims(&[4, 4]).unwrap();
/// let diagonal = ConditionalSampling::new(grid, |p: &IntegerIndex| p.get(0) == p.get(1));
/// assert_eq!(diagonal.iter().count(), 4);
///
/// let mut cursor = diagonal.cursor();
/// assert!(cursor.has_next());
/// assert!(cursor.has_next());
/// assert_eq!(cursor.next(), Some(IntegerIndex::from([0, 0])));
/// ```
pub struct ConditionalSampling<C, S, P> {
    base: S,
    predicate: P,
    _coord: PhantomData<fn() -> C>,
}

impl<C, S, P> ConditionalSampling<C, S, P>
where
    C: Coordinate,
    S: Sampling<C>,
    P: Fn(&C) -> bool,
{
    /// Filter `base` by `predicate`.
    pub fn new(base: S, predicate: P) -> Self {
        Self {
            base,
            predicate,
            _coord: PhantomData,
        }
    }

    /// Concrete, peek-caching iterator over the filtered points.
    pub fn cursor(&self) -> ConditionalCursor<'_, C, P> {
        ConditionalCursor {
            inner: self.base.iter(),
            predicate: &self.predicate,
            peeked: None,
        }
    }
}

impl<C, S, P> Sampling<C> for ConditionalSampling<C, S, P>
where
    C: Coordinate,
    S: Sampling<C>,
    P: Fn(&C) -> bool,
{
    fn num_dimensions(&self) -> usize {
        self.base.num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        self.base.contains(point) && (self.predicate)(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.cursor())
    }
}

/// Iterator over a [`ConditionalSampling`] with an explicit look-ahead.
///
/// The next matching point is searched for once and cached, so any number
/// of [`has_next`](Self::has_next) calls between two `next()` calls
/// evaluates the predicate on each base point only once.
pub struct ConditionalCursor<'a, C, P> {
    inner: Box<dyn Iterator<Item = C> + 'a>,
    predicate: &'a P,
    peeked: Option<C>,
}

impl<C, P> ConditionalCursor<'_, C, P>
where
    P: Fn(&C) -> bool,
{
    /// Whether another matching point remains. Does not consume it.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            let predicate = self.predicate;
            self.peeked = self.inner.by_ref().find(|p| predicate(p));
        }
        self.peeked.is_some()
    }

    /// The next matching point without consuming it.
    pub fn peek(&mut self) -> Option<&C> {
        self.has_next();
        self.peeked.as_ref()
    }
}

impl<C, P> Iterator for ConditionalCursor<'_, C, P>
where
    P: Fn(&C) -> bool,
{
    type Item = C;

    fn next(&mut self) -> Option<C> {
        self.has_next();
        self.peeked.take()
    }
}
