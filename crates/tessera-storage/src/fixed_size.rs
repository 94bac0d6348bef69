//! Sequences reporting a caller-chosen size.

use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Wraps a sequence and reports `size` regardless of the wrapped length.
///
/// Used to satisfy an external size constraint, such as a power of two.
/// Indices in `[0, size)` are delegated unchanged. When `size` exceeds
/// the wrapped length, accesses past the wrapped end fail with the wrapped
/// sequence's own error; wrap it in a
/// [`PaddedDataSource`](crate::PaddedDataSource) to fill that gap instead.
#[derive(Clone, Debug)]
pub struct FixedSizeDataSource<S> {
    inner: S,
    size: i64,
}

impl<S: IndexedDataSource> FixedSizeDataSource<S> {
    /// Report `size` elements over `inner`. `size` must be non-negative.
    pub fn new(inner: S, size: i64) -> Result<Self, StorageError> {
        if size < 0 {
            return Err(StorageError::invalid(format!("negative size {size}")));
        }
        Ok(Self { inner, size })
    }

    /// Borrow the wrapped sequence.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: IndexedDataSource> IndexedDataSource for FixedSizeDataSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.size
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size)?;
        self.inner.get(index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size)?;
        self.inner.set(index, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            inner: self.inner.duplicate()?,
            size: self.size,
        })
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}
