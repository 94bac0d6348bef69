//! Explicit point collections.

use tessera_core::{Coordinate, SamplingError};

use crate::sampling::Sampling;

/// A sampling made of explicitly listed points.
///
/// The points form a set kept in insertion order: adding a point that is
/// already present is a no-op. Membership is a linear scan, so this is meant
/// for modest point counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSampling<C: Coordinate> {
    ndim: usize,
    points: Vec<C>,
}

impl<C: Coordinate> PointSampling<C> {
    /// Empty collection of `ndim`-dimensional points.
    pub fn new(ndim: usize) -> Self {
        Self {
            ndim,
            points: Vec::new(),
        }
    }

    /// Collection holding `points` in the given order, repeats dropped.
    ///
    /// Every point must have dimensionality `ndim`.
    pub fn from_points(
        ndim: usize,
        points: impl IntoIterator<Item = C>,
    ) -> Result<Self, SamplingError> {
        let mut out = Self::new(ndim);
        for p in points {
            out.add(p)?;
        }
        Ok(out)
    }

    /// Materialize another sampling, keeping its visitation order.
    pub fn from_sampling<S: Sampling<C> + ?Sized>(sampling: &S) -> Self {
        Self {
            ndim: sampling.num_dimensions(),
            points: sampling.iter().collect(),
        }
    }

    /// Append a point unless it is already present.
    pub fn add(&mut self, point: C) -> Result<(), SamplingError> {
        SamplingError::check_dims(self.ndim, point.num_dimensions())?;
        if !self.points.contains(&point) {
            self.points.push(point);
        }
        Ok(())
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Stored points in insertion order.
    pub fn points(&self) -> &[C] {
        &self.points
    }
}

impl<C: Coordinate> Sampling<C> for PointSampling<C> {
    fn num_dimensions(&self) -> usize {
        self.ndim
    }

    fn contains(&self, point: &C) -> bool {
        self.points.iter().any(|p| p == point)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.points.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridSampling;
    use tessera_core::{IntegerIndex, RealIndex};

    #[test]
    fn preserves_insertion_order() {
        let pts = PointSampling::from_points(
            1,
            [IntegerIndex::from([3]), IntegerIndex::from([1]), IntegerIndex::from([2])],
        )
        .unwrap();
        let order: Vec<i64> = pts.iter().map(|p| p.get(0)).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn repeated_points_are_kept_once() {
        let mut pts = PointSampling::new(1);
        pts.add(IntegerIndex::from([1])).unwrap();
        pts.add(IntegerIndex::from([1])).unwrap();
        pts.add(IntegerIndex::from([2])).unwrap();
        assert_eq!(pts.len(), 2);

        let listed = PointSampling::from_points(
            2,
            [
                RealIndex::from([0.5, 1.0]),
                RealIndex::from([2.0, 3.0]),
                RealIndex::from([0.5, 1.0]),
            ],
        )
        .unwrap();
        assert_eq!(
            listed.points(),
            &[RealIndex::from([0.5, 1.0]), RealIndex::from([2.0, 3.0])]
        );
    }

    #[test]
    fn add_rejects_wrong_dimensionality() {
        let mut pts = PointSampling::new(2);
        assert!(pts.add(RealIndex::from([1.0, 2.0])).is_ok());
        assert_eq!(
            pts.add(RealIndex::from([1.0])),
            Err(SamplingError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn from_sampling_materializes_grid() {
        let grid = GridSampling::from_dims(&[2, 3]).unwrap();
        let pts = PointSampling::from_sampling(&grid);
        assert_eq!(pts.len(), 6);
        assert_eq!(pts.points(), grid.iter().collect::<Vec<_>>().as_slice());
        assert!(pts.contains(&IntegerIndex::from([1, 2])));
        assert!(!pts.contains(&IntegerIndex::from([2, 2])));
    }
}
