//! N-dimensional coordinate samplings for Tessera.
//!
//! A [`Sampling`] is a region of coordinate space plus a deterministic,
//! lazy visitation order. Every call to [`Sampling::iter`] starts a fresh
//! traversal; membership is answered by [`Sampling::contains`] without
//! iterating.
//!
//! # Samplings
//!
//! - [`GridSampling`]: integer Cartesian box, axis 0 fastest (odometer order)
//! - [`RealGridSampling`]: real Cartesian lattice with per-axis spacing
//! - [`PointSampling`]: explicit points in insertion order
//! - [`PolarGridSampling`], [`CylindricalGridSampling`], [`SphericalGridSampling`]
//!
//! # Set algebra
//!
//! [`UnionSampling`], [`IntersectionSampling`], [`DifferenceSampling`],
//! [`ComplementSampling`] and [`ConditionalSampling`] combine other
//! samplings lazily; none of them materializes its members.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algebra;
pub mod conditional;
pub mod grid;
pub mod points;
pub mod polar;
pub mod real_grid;
pub mod sampling;
mod tolerance;

pub use algebra::{ComplementSampling, DifferenceSampling, IntersectionSampling, UnionSampling};
pub use conditional::{ConditionalCursor, ConditionalSampling};
pub use grid::{bounding_box, GridIter, GridSampling};
pub use points::PointSampling;
pub use polar::{CylindricalGridSampling, PolarGridSampling, SphericalGridSampling};
pub use real_grid::RealGridSampling;
pub use sampling::Sampling;
