//! Polar, cylindrical and spherical real-valued grids.
//!
//! Each grid steps radius from `0` to `max_radius` inclusive and converts
//! to Cartesian [`RealIndex`] points. Iteration is radius-fastest, then
//! angle, then height (cylindrical) or polar angle (spherical).
//!
//! Degenerate physical points are visited once: the origin (radius `0`)
//! is produced only on the first angular step, and the spherical poles are
//! produced only on the first azimuthal step. Membership tests are
//! unaffected by this.

use std::f64::consts::{PI, TAU};

use tessera_core::{RealIndex, SamplingError};

use crate::sampling::Sampling;
use crate::tolerance::{approx_eq, snap_to_step};

/// Radial stepping shared by all three grids.
#[derive(Clone, Debug, PartialEq)]
struct Radial {
    max_radius: f64,
    count: usize,
}

impl Radial {
    fn new(max_radius: f64, count: usize) -> Result<Self, SamplingError> {
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("max radius must be finite and positive, got {max_radius}"),
            });
        }
        if count < 2 {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("need at least 2 radial samples (0 and max), got {count}"),
            });
        }
        Ok(Self { max_radius, count })
    }

    fn step(&self) -> f64 {
        self.max_radius / (self.count - 1) as f64
    }

    fn radius(&self, i: usize) -> f64 {
        i as f64 * self.step()
    }

    /// Radial step index of `r`, if `r` lies on the grid.
    fn index_of(&self, r: f64) -> Option<usize> {
        let k = snap_to_step(r, self.step())?;
        (k >= 0 && (k as usize) < self.count).then_some(k as usize)
    }
}

/// Angular stepping over `[0, 2*pi)`.
fn angular_step(count: usize) -> f64 {
    TAU / count as f64
}

fn check_angular(count: usize, what: &str) -> Result<(), SamplingError> {
    if count == 0 {
        return Err(SamplingError::InvalidConstruction {
            reason: format!("need at least 1 {what} sample"),
        });
    }
    Ok(())
}

/// Whether `theta` (any real) lies on an angular grid of `count` steps.
fn on_angle(theta: f64, count: usize) -> bool {
    let theta = theta.rem_euclid(TAU);
    let step = angular_step(count);
    snap_to_step(theta, step).is_some() || approx_eq(theta, TAU)
}

/// Points on concentric circles around the origin in the plane.
///
/// # Examples
///
/// ```
/// use tessera_core::RealIndex;
/// use tessera_sampling::{PolarGridSampling, Sampling};
///
/// // Radii 0, 1, 2 at four angles; the origin appears once.
/// let g = PolarGridSampling::new(2.0, 3, 4).unwrap();
/// assert_eq!(g.iter().count(), 1 + 2 * 4);
/// assert!(g.contains(&RealIndex::from([0.0, 2.0])));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PolarGridSampling {
    radial: Radial,
    angular_count: usize,
}

impl PolarGridSampling {
    /// Grid of `radial_count` radii in `[0, max_radius]` and
    /// `angular_count` angles evenly spaced over a full turn.
    pub fn new(
        max_radius: f64,
        radial_count: usize,
        angular_count: usize,
    ) -> Result<Self, SamplingError> {
        check_angular(angular_count, "angular")?;
        Ok(Self {
            radial: Radial::new(max_radius, radial_count)?,
            angular_count,
        })
    }

    /// Number of distinct points visited.
    pub fn point_count(&self) -> usize {
        1 + (self.radial.count - 1) * self.angular_count
    }
}

impl Sampling<RealIndex> for PolarGridSampling {
    fn num_dimensions(&self) -> usize {
        2
    }

    fn contains(&self, point: &RealIndex) -> bool {
        if point.num_dimensions() != 2 {
            return false;
        }
        let (x, y) = (point.get(0), point.get(1));
        match self.radial.index_of(x.hypot(y)) {
            None => false,
            Some(0) => true,
            Some(_) => on_angle(y.atan2(x), self.angular_count),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RealIndex> + '_> {
        let d_theta = angular_step(self.angular_count);
        Box::new((0..self.angular_count).flat_map(move |j| {
            let theta = j as f64 * d_theta;
            (0..self.radial.count)
                .filter(move |&i| i != 0 || j == 0)
                .map(move |i| {
                    let r = self.radial.radius(i);
                    RealIndex::from([r * theta.cos(), r * theta.sin()])
                })
        }))
    }
}

/// Polar grid stacked along the z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CylindricalGridSampling {
    radial: Radial,
    angular_count: usize,
    z_min: f64,
    z_max: f64,
    height_count: usize,
}

impl CylindricalGridSampling {
    /// Polar grid repeated at `height_count` heights spanning
    /// `[z_min, z_max]` inclusive. A single height uses `z_min`.
    pub fn new(
        max_radius: f64,
        radial_count: usize,
        angular_count: usize,
        z_min: f64,
        z_max: f64,
        height_count: usize,
    ) -> Result<Self, SamplingError> {
        check_angular(angular_count, "angular")?;
        check_angular(height_count, "height")?;
        if !z_min.is_finite() || !z_max.is_finite() || z_max < z_min {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("invalid height range [{z_min}, {z_max}]"),
            });
        }
        Ok(Self {
            radial: Radial::new(max_radius, radial_count)?,
            angular_count,
            z_min,
            z_max,
            height_count,
        })
    }

    fn z_step(&self) -> f64 {
        if self.height_count == 1 {
            0.0
        } else {
            (self.z_max - self.z_min) / (self.height_count - 1) as f64
        }
    }

    fn on_height(&self, z: f64) -> bool {
        let step = self.z_step();
        if step == 0.0 {
            return approx_eq(z, self.z_min);
        }
        matches!(snap_to_step(z - self.z_min, step), Some(k) if k >= 0 && (k as usize) < self.height_count)
    }

    /// Number of distinct points visited.
    pub fn point_count(&self) -> usize {
        self.height_count * (1 + (self.radial.count - 1) * self.angular_count)
    }
}

impl Sampling<RealIndex> for CylindricalGridSampling {
    fn num_dimensions(&self) -> usize {
        3
    }

    fn contains(&self, point: &RealIndex) -> bool {
        if point.num_dimensions() != 3 || !self.on_height(point.get(2)) {
            return false;
        }
        let (x, y) = (point.get(0), point.get(1));
        match self.radial.index_of(x.hypot(y)) {
            None => false,
            Some(0) => true,
            Some(_) => on_angle(y.atan2(x), self.angular_count),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RealIndex> + '_> {
        let d_theta = angular_step(self.angular_count);
        let dz = self.z_step();
        Box::new((0..self.height_count).flat_map(move |k| {
            let z = self.z_min + k as f64 * dz;
            (0..self.angular_count).flat_map(move |j| {
                let theta = j as f64 * d_theta;
                (0..self.radial.count)
                    .filter(move |&i| i != 0 || j == 0)
                    .map(move |i| {
                        let r = self.radial.radius(i);
                        RealIndex::from([r * theta.cos(), r * theta.sin(), z])
                    })
            })
        }))
    }
}

/// Concentric spheres sampled by azimuth `theta` and polar angle `phi`.
///
/// `phi` runs from `0` (north pole) to `pi` (south pole) inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct SphericalGridSampling {
    radial: Radial,
    theta_count: usize,
    phi_count: usize,
}

impl SphericalGridSampling {
    /// Grid of `radial_count` radii, `theta_count` azimuths over a full turn
    /// and `phi_count >= 2` polar angles from pole to pole.
    pub fn new(
        max_radius: f64,
        radial_count: usize,
        theta_count: usize,
        phi_count: usize,
    ) -> Result<Self, SamplingError> {
        check_angular(theta_count, "azimuthal")?;
        if phi_count < 2 {
            return Err(SamplingError::InvalidConstruction {
                reason: format!("need at least 2 polar samples (both poles), got {phi_count}"),
            });
        }
        Ok(Self {
            radial: Radial::new(max_radius, radial_count)?,
            theta_count,
            phi_count,
        })
    }

    fn phi_step(&self) -> f64 {
        PI / (self.phi_count - 1) as f64
    }

    fn is_pole(&self, k: usize) -> bool {
        k == 0 || k == self.phi_count - 1
    }

    /// Number of distinct points visited.
    pub fn point_count(&self) -> usize {
        let per_sphere = 2 + (self.phi_count - 2) * self.theta_count;
        1 + (self.radial.count - 1) * per_sphere
    }
}

impl Sampling<RealIndex> for SphericalGridSampling {
    fn num_dimensions(&self) -> usize {
        3
    }

    fn contains(&self, point: &RealIndex) -> bool {
        if point.num_dimensions() != 3 {
            return false;
        }
        let (x, y, z) = (point.get(0), point.get(1), point.get(2));
        let r = (x * x + y * y + z * z).sqrt();
        match self.radial.index_of(r) {
            None => false,
            Some(0) => true,
            Some(_) => {
                let phi = (z / r).clamp(-1.0, 1.0).acos();
                match snap_to_step(phi, self.phi_step()) {
                    Some(k) if k >= 0 && (k as usize) < self.phi_count => {
                        self.is_pole(k as usize) || on_angle(y.atan2(x), self.theta_count)
                    }
                    _ => false,
                }
            }
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = RealIndex> + '_> {
        let d_theta = angular_step(self.theta_count);
        let d_phi = self.phi_step();
        Box::new((0..self.phi_count).flat_map(move |k| {
            let phi = k as f64 * d_phi;
            let pole = self.is_pole(k);
            (0..self.theta_count)
                .filter(move |&j| !pole || j == 0)
                .flat_map(move |j| {
                    let theta = j as f64 * d_theta;
                    (0..self.radial.count)
                        .filter(move |&i| i != 0 || (j == 0 && k == 0))
                        .map(move |i| {
                            let r = self.radial.radius(i);
                            RealIndex::from([
                                r * phi.sin() * theta.cos(),
                                r * phi.sin() * theta.sin(),
                                r * phi.cos(),
                            ])
                        })
                })
        }))
    }
}
