//! N-dimensional data sources for Tessera.
//!
//! [`NdDataSource`] gives a flat [`IndexedDataSource`](tessera_storage::IndexedDataSource)
//! a shape and coordinate access. [`PaddedNdDataSource`] extends it past
//! its edges under an [`OobPolicy`]: a constant, zero, NaN, or one of the
//! index-remapping policies (cyclic, mirror, clamp).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod padded;
pub mod policy;
pub mod source;

pub use padded::PaddedNdDataSource;
pub use policy::{
    clamp_axis, mirror_axis, wrap_axis, BoundaryBehavior, ClampPolicy, ConstantPolicy,
    CyclicPolicy, MirrorPolicy, NanPolicy, OobPolicy, ZeroPolicy,
};
pub use source::{NdDataSource, NdView};
