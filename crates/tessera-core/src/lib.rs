//! Core types for the Tessera storage framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the sampling, storage and
//! N-dimensional layers: coordinates, element capability traits, the
//! storage classification, instance ids and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod coord;
pub mod element;
pub mod error;
pub mod id;
pub mod storage_type;

pub use codec::ByteCodec;
pub use coord::{Component, Coord, Coordinate, IntegerIndex, RealIndex};
pub use element::{Element, HasNan};
pub use error::{SamplingError, StorageError};
pub use id::{SourceInstanceId, SubscriptionId};
pub use storage_type::StorageType;
