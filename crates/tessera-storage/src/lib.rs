//! Flat sequence storage for Tessera.
//!
//! Everything here implements [`IndexedDataSource`]: a 0-based,
//! fixed-length sequence with copy-in/copy-out `get` and `set`.
//!
//! # Backends
//!
//! - [`ArrayStorage`]: dense `Vec`, up to `i32::MAX` elements
//! - [`BigArrayStorage`]: chunked, for longer sequences
//! - [`ListStorage`]: adapter over a caller-owned collection
//! - [`VirtualStorage`]: values from a generation rule plus a write overlay
//! - [`FileStorage`]: paged to a file through a [`PageCache`]
//!
//! # Decorators
//!
//! [`ConcatDataSource`], [`TrimmedDataSource`], [`ReversedDataSource`],
//! [`FixedSizeDataSource`], [`ConvertDataSource`], [`NotifyingDataSource`]
//! and [`PaddedDataSource`] wrap other sources. Each is generic over what
//! it wraps and duplicates it on [`duplicate`](IndexedDataSource::duplicate);
//! wrap a [`SharedSource`] to alias backing state instead.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod big_array;
pub mod compliance;
pub mod concat;
pub mod config;
pub mod convert;
pub mod file;
pub mod fixed_size;
pub mod list;
pub mod notify;
pub mod padded;
pub mod page_cache;
pub mod publisher;
pub mod reverse;
pub mod shared;
pub mod source;
pub mod trim;
pub mod virtual_storage;

pub use array::ArrayStorage;
pub use big_array::BigArrayStorage;
pub use concat::ConcatDataSource;
pub use config::PagedConfig;
pub use convert::ConvertDataSource;
pub use file::{FilePageStore, FileStorage};
pub use fixed_size::FixedSizeDataSource;
pub use list::ListStorage;
pub use notify::NotifyingDataSource;
pub use padded::PaddedDataSource;
pub use page_cache::{EvictionPolicy, FrameStats, PageCache, PageStore};
pub use publisher::Publisher;
pub use reverse::ReversedDataSource;
pub use shared::SharedSource;
pub use source::IndexedDataSource;
pub use trim::TrimmedDataSource;
pub use virtual_storage::VirtualStorage;
