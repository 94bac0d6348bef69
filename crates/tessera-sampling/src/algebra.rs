//! Lazy set algebra over samplings.
//!
//! None of these combinators stores member coordinates. Membership is
//! answered by querying the operands; iteration walks one operand and
//! filters it against the other.

use std::marker::PhantomData;

use tessera_core::{Coordinate, SamplingError};

use crate::sampling::Sampling;

fn check_operands<C, A, B>(a: &A, b: &B) -> Result<(), SamplingError>
where
    C: Coordinate,
    A: Sampling<C>,
    B: Sampling<C>,
{
    SamplingError::check_dims(a.num_dimensions(), b.num_dimensions())
}

/// Points in either operand.
///
/// Iterates all of `a`, then the points of `b` that `a` does not contain,
/// so shared points are visited exactly once.
pub struct UnionSampling<C, A, B> {
    a: A,
    b: B,
    _coord: PhantomData<fn() -> C>,
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> UnionSampling<C, A, B> {
    /// Union of `a` and `b`, which must share dimensionality.
    pub fn new(a: A, b: B) -> Result<Self, SamplingError> {
        check_operands::<C, A, B>(&a, &b)?;
        Ok(Self {
            a,
            b,
            _coord: PhantomData,
        })
    }
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> Sampling<C> for UnionSampling<C, A, B> {
    fn num_dimensions(&self) -> usize {
        self.a.num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        self.a.contains(point) || self.b.contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(
            self.a
                .iter()
                .chain(self.b.iter().filter(move |p| !self.a.contains(p))),
        )
    }
}

/// Points in both operands, visited in `a`'s order.
pub struct IntersectionSampling<C, A, B> {
    a: A,
    b: B,
    _coord: PhantomData<fn() -> C>,
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> IntersectionSampling<C, A, B> {
    /// Intersection of `a` and `b`, which must share dimensionality.
    pub fn new(a: A, b: B) -> Result<Self, SamplingError> {
        check_operands::<C, A, B>(&a, &b)?;
        Ok(Self {
            a,
            b,
            _coord: PhantomData,
        })
    }
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> Sampling<C>
    for IntersectionSampling<C, A, B>
{
    fn num_dimensions(&self) -> usize {
        self.a.num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        self.a.contains(point) && self.b.contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.a.iter().filter(move |p| self.b.contains(p)))
    }
}

/// Points of `a` not in `b`, visited in `a`'s order.
pub struct DifferenceSampling<C, A, B> {
    a: A,
    b: B,
    _coord: PhantomData<fn() -> C>,
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> DifferenceSampling<C, A, B> {
    /// `a` minus `b`; the operands must share dimensionality.
    pub fn new(a: A, b: B) -> Result<Self, SamplingError> {
        check_operands::<C, A, B>(&a, &b)?;
        Ok(Self {
            a,
            b,
            _coord: PhantomData,
        })
    }
}

impl<C: Coordinate, A: Sampling<C>, B: Sampling<C>> Sampling<C> for DifferenceSampling<C, A, B> {
    fn num_dimensions(&self) -> usize {
        self.a.num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        self.a.contains(point) && !self.b.contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.a.iter().filter(move |p| !self.b.contains(p)))
    }
}

/// Points of a bounding sampling that are not in an excluded sampling.
///
/// A complement needs a finite universe to iterate; `bounds` provides it.
pub struct ComplementSampling<C, U, S> {
    bounds: U,
    excluded: S,
    _coord: PhantomData<fn() -> C>,
}

impl<C: Coordinate, U: Sampling<C>, S: Sampling<C>> ComplementSampling<C, U, S> {
    /// Complement of `excluded` within `bounds`.
    pub fn new(bounds: U, excluded: S) -> Result<Self, SamplingError> {
        check_operands::<C, U, S>(&bounds, &excluded)?;
        Ok(Self {
            bounds,
            excluded,
            _coord: PhantomData,
        })
    }
}

impl<C: Coordinate, U: Sampling<C>, S: Sampling<C>> Sampling<C> for ComplementSampling<C, U, S> {
    fn num_dimensions(&self) -> usize {
        self.bounds.num_dimensions()
    }

    fn contains(&self, point: &C) -> bool {
        self.bounds.contains(point) && !self.excluded.contains(point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(
            self.bounds
                .iter()
                .filter(move |p| !self.excluded.contains(p)),
        )
    }
}
