//! Cartesian lattices of real-valued coordinates.

use tessera_core::{RealIndex, SamplingError};

use crate::sampling::Sampling;
use crate::tolerance::snap_to_step;

/// Regular lattice `origin + k * spacing`, `0 <= k_i < counts[i]`.
///
/// Iterates in the same odometer order as
/// [`GridSampling`](crate::GridSampling): axis 0 fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct RealGridSampling {
    origin: RealIndex,
    spacing: Vec<f64>,
    counts: Vec<u64>,
}

impl RealGridSampling {
    /// Lattice anchored at `origin`.
    ///
    /// `spacing` and `counts` need one entry per axis. Spacings must be
    /// finite and non-zero; counts must be at least one.
    pub fn new(origin: RealIndex, spacing: Vec<f64>, counts: Vec<u64>) -> Result<Self, SamplingError> {
        let n = origin.num_dimensions();
        SamplingError::check_dims(n, spacing.len())?;
        SamplingError::check_dims(n, counts.len())?;
        if let Some(s) = spacing.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("spacing must be finite and non-zero, got {s}"),
            });
        }
        if counts.contains(&0) {
            return Err(SamplingError::InvalidConstruction {
                reason: "every axis needs at least one sample".to_string(),
            });
        }
        Ok(Self {
            origin,
            spacing,
            counts,
        })
    }

    /// Number of lattice points.
    pub fn point_count(&self) -> Option<u64> {
        self.counts.iter().try_fold(1u64, |acc, &c| acc.checked_mul(c))
    }

    fn point_at(&self, steps: &[u64]) -> RealIndex {
        let mut p = self.origin.clone();
        for (axis, &k) in steps.iter().enumerate() {
            p.set(axis, self.origin.get(axis) + k as f64 * self.spacing[axis]);
        }
        p
    }
}

impl Sampling<RealIndex> for RealGridSampling {
    fn num_dimensions(&self) -> usize {
        self.origin.num_dimensions()
    }

    fn contains(&self, point: &RealIndex) -> bool {
        if point.num_dimensions() != self.num_dimensions() {
            return false;
        }
        (0..self.num_dimensions()).all(|axis| {
            let offset = point.get(axis) - self.origin.get(axis);
            match snap_to_step(offset, self.spacing[axis]) {
                Some(k) => k >= 0 && (k as u64) < self.counts[axis],
                None => false,
            }
        })
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RealIndex> + '_> {
        let mut steps = Some(vec![0u64; self.counts.len()]);
        Box::new(std::iter::from_fn(move || {
            let current = steps.take()?;
            let point = self.point_at(&current);
            let mut next = current;
            for axis in 0..next.len() {
                if next[axis] + 1 < self.counts[axis] {
                    next[axis] += 1;
                    steps = Some(next);
                    return Some(point);
                }
                next[axis] = 0;
            }
            Some(point)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_axis_zero_fastest() {
        let g = RealGridSampling::new(RealIndex::from([0.0, 1.0]), vec![0.5, 2.0], vec![3, 2]).unwrap();
        let pts: Vec<_> = g.iter().map(|p| (p.get(0), p.get(1))).collect();
        assert_eq!(
            pts,
            vec![(0.0, 1.0), (0.5, 1.0), (1.0, 1.0), (0.0, 3.0), (0.5, 3.0), (1.0, 3.0)]
        );
        assert_eq!(g.point_count(), Some(6));
    }

    #[test]
    fn contains_snaps_with_tolerance() {
        let g = RealGridSampling::new(RealIndex::from([0.0]), vec![0.1], vec![11]).unwrap();
        assert!(g.contains(&RealIndex::from([0.3])));
        assert!(g.contains(&RealIndex::from([1.0])));
        assert!(!g.contains(&RealIndex::from([1.1])));
        assert!(!g.contains(&RealIndex::from([0.35])));
        assert!(!g.contains(&RealIndex::from([-0.1])));
    }

    #[test]
    fn every_visited_point_is_contained() {
        let g = RealGridSampling::new(RealIndex::from([-1.0, 2.5]), vec![0.25, -0.5], vec![4, 3]).unwrap();
        for p in g.iter() {
            assert!(g.contains(&p), "{p:?} not contained");
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(RealGridSampling::new(RealIndex::from([0.0]), vec![0.0], vec![1]).is_err());
        assert!(RealGridSampling::new(RealIndex::from([0.0]), vec![1.0], vec![0]).is_err());
        assert!(RealGridSampling::new(RealIndex::from([0.0]), vec![1.0, 1.0], vec![1]).is_err());
    }
}
