//! Rectangular integer grids and bounding boxes.

use tessera_core::{IntegerIndex, SamplingError};

use crate::sampling::Sampling;

/// Axis-aligned box of integer coordinates, both corners inclusive.
///
/// Corners are normalized at construction to a component-wise `(min, max)`
/// pair, so `GridSampling::new(a, b)` and `GridSampling::new(b, a)` describe
/// the same box. Iteration is an odometer: axis 0 varies fastest and carries
/// into axis 1 on overflow, and so on, which matches the linearization used
/// by N-dimensional data sources.
///
/// # Examples
///
/// ```
/// use tessera_core::IntegerIndex;
/// use tessera_sampling::{GridSampling, Sampling};
///
/// let grid = GridSampling::new(
///     IntegerIndex::from([-1, -2]),
///     IntegerIndex::from([1, 2]),
/// )
/// .unwrap();
/// let points: Vec<_> = grid.iter().collect();
/// assert_eq!(points.len(), 15);
/// assert_eq!(points[0], IntegerIndex::from([-1, -2]));
/// assert_eq!(points[1], IntegerIndex::from([0, -2]));
/// assert_eq!(points[3], IntegerIndex::from([-1, -1]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSampling {
    min: IntegerIndex,
    max: IntegerIndex,
    empty: bool,
}

impl GridSampling {
    /// Grid spanning the box with the given opposite corners.
    ///
    /// Returns `Err(SamplingError::DimensionMismatch)` if the corners differ
    /// in dimensionality.
    pub fn new(corner_a: IntegerIndex, corner_b: IntegerIndex) -> Result<Self, SamplingError> {
        SamplingError::check_dims(corner_a.num_dimensions(), corner_b.num_dimensions())?;
        let mut min = corner_a.clone();
        let mut max = corner_a;
        min.update_min(&corner_b)?;
        max.update_max(&corner_b)?;
        Ok(Self {
            min,
            max,
            empty: false,
        })
    }

    /// Grid covering `[0, dims[i])` on every axis, i.e. all valid indices of
    /// an array with shape `dims`.
    ///
    /// Any zero extent yields an empty grid. Negative extents are rejected.
    pub fn from_dims(dims: &[i64]) -> Result<Self, SamplingError> {
        if let Some(&d) = dims.iter().find(|&&d| d < 0) {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("negative extent {d} in {dims:?}"),
            });
        }
        let empty = dims.iter().any(|&d| d == 0);
        let min = IntegerIndex::new(dims.len());
        let max: IntegerIndex = dims
            .iter()
            .map(|&d| (d - 1).max(0))
            .collect::<Vec<_>>()
            .into();
        Ok(Self { min, max, empty })
    }

    /// Component-wise minimum corner.
    pub fn min(&self) -> &IntegerIndex {
        &self.min
    }

    /// Component-wise maximum corner.
    pub fn max(&self) -> &IntegerIndex {
        &self.max
    }

    /// Whether the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Number of points, `prod(max_i - min_i + 1)`, or `None` on overflow.
    pub fn point_count(&self) -> Option<u128> {
        if self.empty {
            return Some(0);
        }
        self.min
            .as_slice()
            .iter()
            .zip(self.max.as_slice())
            .try_fold(1u128, |acc, (&lo, &hi)| {
                let span = (hi as i128 - lo as i128 + 1) as u128;
                acc.checked_mul(span)
            })
    }

    /// Odometer iterator over the grid.
    pub fn grid_iter(&self) -> GridIter {
        GridIter {
            min: self.min.clone(),
            max: self.max.clone(),
            cursor: if self.empty {
                None
            } else {
                Some(self.min.clone())
            },
        }
    }
}

impl Sampling<IntegerIndex> for GridSampling {
    fn num_dimensions(&self) -> usize {
        self.min.num_dimensions()
    }

    fn contains(&self, point: &IntegerIndex) -> bool {
        if self.empty || point.num_dimensions() != self.min.num_dimensions() {
            return false;
        }
        point
            .as_slice()
            .iter()
            .zip(self.min.as_slice().iter().zip(self.max.as_slice()))
            .all(|(&p, (&lo, &hi))| lo <= p && p <= hi)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = IntegerIndex> + '_> {
        Box::new(self.grid_iter())
    }
}

/// Odometer iterator produced by [`GridSampling::grid_iter`].
#[derive(Clone, Debug)]
pub struct GridIter {
    min: IntegerIndex,
    max: IntegerIndex,
    cursor: Option<IntegerIndex>,
}

impl Iterator for GridIter {
    type Item = IntegerIndex;

    fn next(&mut self) -> Option<IntegerIndex> {
        let current = self.cursor.take()?;
        let mut next = current.clone();
        for axis in 0..next.num_dimensions() {
            let v = next.get(axis);
            if v < self.max.get(axis) {
                next.set(axis, v + 1);
                self.cursor = Some(next);
                return Some(current);
            }
            next.set(axis, self.min.get(axis));
        }
        // Every axis rolled over: `current` was the last point.
        Some(current)
    }
}

/// Smallest grid containing every point of `sampling`.
///
/// Returns `None` for a sampling with no points.
pub fn bounding_box<S>(sampling: &S) -> Option<GridSampling>
where
    S: Sampling<IntegerIndex> + ?Sized,
{
    let n = sampling.num_dimensions();
    let mut lo = IntegerIndex::new(n);
    let mut hi = IntegerIndex::new(n);
    lo.set_max();
    hi.set_min();
    let mut any = false;
    for p in sampling.iter() {
        // Members share the sampling's dimensionality, so these cannot fail.
        lo.update_min(&p).ok()?;
        hi.update_max(&p).ok()?;
        any = true;
    }
    if !any {
        return None;
    }
    GridSampling::new(lo, hi).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    fn ix<const N: usize>(c: [i64; N]) -> IntegerIndex {
        IntegerIndex::from(c)
    }

    #[test]
    fn visits_in_odometer_order() {
        let grid = GridSampling::new(ix([-1, -2]), ix([1, 2])).unwrap();
        let points: Vec<_> = grid.iter().collect();
        assert_eq!(points.len(), 15);
        assert_eq!(
            &points[..4],
            &[ix([-1, -2]), ix([0, -2]), ix([1, -2]), ix([-1, -1])]
        );
        assert_eq!(points.last(), Some(&ix([1, 2])));
    }

    #[test]
    fn corners_are_normalized() {
        let a = GridSampling::new(ix([3, 0]), ix([0, 2])).unwrap();
        assert_eq!(a.min(), &ix([0, 0]));
        assert_eq!(a.max(), &ix([3, 2]));
        assert_eq!(a.point_count(), Some(12));
    }

    #[test]
    fn single_point_grid() {
        let g = GridSampling::new(ix([5]), ix([5])).unwrap();
        assert_eq!(g.iter().collect::<Vec<_>>(), vec![ix([5])]);
    }

    #[test]
    fn mismatched_corners_rejected() {
        assert!(matches!(
            GridSampling::new(ix([0]), ix([0, 0])),
            Err(SamplingError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn from_dims_with_zero_extent_is_empty() {
        let g = GridSampling::from_dims(&[3, 0]).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.iter().count(), 0);
        assert!(!g.contains(&ix([0, 0])));
        assert_eq!(g.point_count(), Some(0));
    }

    #[test]
    fn from_dims_rejects_negative_extent() {
        assert!(GridSampling::from_dims(&[2, -1]).is_err());
    }

    #[test]
    fn iteration_restarts_on_every_call() {
        let g = GridSampling::from_dims(&[2, 2]).unwrap();
        let mut first = g.iter();
        first.next();
        assert_eq!(g.iter().count(), 4);
    }

    #[test]
    fn contains_rejects_wrong_dimensionality() {
        let g = GridSampling::from_dims(&[2, 2]).unwrap();
        assert!(!g.contains(&ix([0])));
        assert!(!g.contains(&ix([0, 0, 0])));
    }

    #[test]
    fn bounding_box_of_scattered_points() {
        let mut pts = crate::PointSampling::new(2);
        for p in [ix([4, -1]), ix([-2, 3]), ix([0, 0])] {
            pts.add(p).unwrap();
        }
        let bb = bounding_box(&pts).unwrap();
        assert_eq!(bb.min(), &ix([-2, -1]));
        assert_eq!(bb.max(), &ix([4, 3]));
        assert!(bounding_box(&crate::PointSampling::<IntegerIndex>::new(2)).is_none());
    }

    proptest! {
        #[test]
        fn grid_is_exhaustive_and_exact(
            lo in proptest::collection::vec(-4i64..4, 1..4),
            span in proptest::collection::vec(0i64..4, 1..4),
        ) {
            let n = lo.len().min(span.len());
            let lo = &lo[..n];
            let hi: Vec<i64> = lo.iter().zip(&span[..n]).map(|(l, s)| l + s).collect();
            let grid = GridSampling::new(IntegerIndex::from_slice(lo), IntegerIndex::from_slice(&hi)).unwrap();

            let visited: IndexSet<IntegerIndex> = grid.iter().collect();
            let expected: u128 = span[..n].iter().map(|&s| (s + 1) as u128).product();
            prop_assert_eq!(visited.len() as u128, expected);
            prop_assert_eq!(grid.iter().count() as u128, expected);
            for p in &visited {
                prop_assert!(grid.contains(p));
            }

            // One step outside the box on any axis is not contained.
            for axis in 0..n {
                let mut below = IntegerIndex::from_slice(lo);
                below.set(axis, lo[axis] - 1);
                prop_assert!(!grid.contains(&below));
                let mut above = IntegerIndex::from_slice(&hi);
                above.set(axis, hi[axis] + 1);
                prop_assert!(!grid.contains(&above));
            }
        }
    }
}
