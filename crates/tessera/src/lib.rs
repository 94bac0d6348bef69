//! Tessera: out-of-core indexed storage, N-dimensional data sources and
//! coordinate samplings.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Tessera sub-crates. For most users, adding `tessera` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // A 4x3 grid of f32 paged to a temporary file, four elements per page.
//! let mut flat = FileStorage::<f32>::new(12, PagedConfig::new(4)).unwrap();
//! for i in 0..12 {
//!     flat.set(i, &(i as f32)).unwrap();
//! }
//! let grid = NdDataSource::new(flat, &[4, 3]).unwrap();
//!
//! // Read a 6x5 window around it with periodic boundaries.
//! let padded = PaddedNdDataSource::new(grid, BoundaryBehavior::Cyclic).unwrap();
//! let window = GridSampling::new(IntegerIndex::from([-1, -1]), IntegerIndex::from([4, 3])).unwrap();
//! let mut sum = 0.0;
//! for coord in window.iter() {
//!     sum += padded.read_at(&coord).unwrap();
//! }
//! assert_eq!(window.iter().count(), 30);
//! assert!(sum > 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Coordinates, element traits, ids, errors |
//! | [`sampling`] | `tessera-sampling` | Grids, point sets, polar grids, set algebra |
//! | [`storage`] | `tessera-storage` | Backends, page cache, decorators |
//! | [`nd`] | `tessera-nd` | Coordinate-addressed sources and boundary policies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and ids (`tessera-core`).
///
/// Contains [`types::Coord`], the [`types::Element`] capability traits,
/// [`types::StorageType`] and the error enums.
pub use tessera_core as types;

/// Coordinate samplings (`tessera-sampling`).
///
/// Provides the [`sampling::Sampling`] trait, concrete samplings such as
/// [`sampling::GridSampling`] and [`sampling::PolarGridSampling`], and the
/// lazy set-algebra combinators.
pub use tessera_sampling as sampling;

/// Flat sequence storage (`tessera-storage`).
///
/// The [`storage::IndexedDataSource`] trait, in-memory and file-backed
/// backends, and the decorators that wrap them.
pub use tessera_storage as storage;

/// N-dimensional sources (`tessera-nd`).
///
/// [`nd::NdDataSource`] and [`nd::PaddedNdDataSource`] with the boundary
/// policies.
pub use tessera_nd as nd;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessera_core::{
        Element, HasNan, IntegerIndex, RealIndex, SamplingError, StorageError, StorageType,
    };

    // Sampling
    pub use tessera_sampling::{GridSampling, PointSampling, RealGridSampling, Sampling};

    // Storage
    pub use tessera_storage::{
        ArrayStorage, BigArrayStorage, FileStorage, IndexedDataSource, PagedConfig, SharedSource,
        VirtualStorage,
    };

    // N-dimensional
    pub use tessera_nd::{BoundaryBehavior, NdDataSource, NdView, OobPolicy, PaddedNdDataSource};
}
