//! Contiguous windows onto a sequence.

use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// The sub-range `[first, first + count)` of a wrapped sequence.
///
/// Index `i` maps to `first + i`. The window checks its own bounds, so an
/// index outside `[0, count)` fails even if the wrapped sequence has an
/// element there.
#[derive(Clone, Debug)]
pub struct TrimmedDataSource<S> {
    inner: S,
    first: i64,
    count: i64,
}

impl<S: IndexedDataSource> TrimmedDataSource<S> {
    /// Window of `count` elements starting at `first`.
    ///
    /// Requires `first >= 0`, `count >= 0` and `first + count <= inner.size()`.
    pub fn new(inner: S, first: i64, count: i64) -> Result<Self, StorageError> {
        if first < 0 || count < 0 {
            return Err(StorageError::invalid(format!(
                "window start {first} and length {count} must be non-negative"
            )));
        }
        let fits = first
            .checked_add(count)
            .is_some_and(|end| end <= inner.size());
        if !fits {
            return Err(StorageError::invalid(format!(
                "window [{first}, {first} + {count}) exceeds source of size {}",
                inner.size()
            )));
        }
        Ok(Self {
            inner,
            first,
            count,
        })
    }

    /// Offset of the window in the wrapped sequence.
    pub fn offset(&self) -> i64 {
        self.first
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

impl<S: IndexedDataSource> IndexedDataSource for TrimmedDataSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.count
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        StorageError::check_index(index, self.count)?;
        self.inner.get(self.first + index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        StorageError::check_index(index, self.count)?;
        self.inner.set(self.first + index, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            inner: self.inner.duplicate()?,
            first: self.first,
            count: self.count,
        })
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compliance, ArrayStorage, SharedSource};

    fn digits() -> ArrayStorage<u8> {
        ArrayStorage::from_vec((0..10).collect()).unwrap()
    }

    #[test]
    fn maps_into_window() {
        let w = TrimmedDataSource::new(digits(), 3, 4).unwrap();
        assert_eq!(w.to_vec().unwrap(), vec![3, 4, 5, 6]);
        assert_eq!(w.offset(), 3);
        assert!(w.read(4).is_err());
        assert!(w.read(-1).is_err());
    }

    #[test]
    fn validates_window() {
        assert!(TrimmedDataSource::new(digits(), -1, 2).is_err());
        assert!(TrimmedDataSource::new(digits(), 0, -2).is_err());
        assert!(TrimmedDataSource::new(digits(), 8, 3).is_err());
        assert!(TrimmedDataSource::new(digits(), 10, 0).is_ok());
        assert!(TrimmedDataSource::new(digits(), 1, i64::MAX).is_err());
    }

    #[test]
    fn writes_reach_shared_backing() {
        let shared = SharedSource::new(digits());
        let mut w = TrimmedDataSource::new(shared.clone(), 5, 2).unwrap();
        w.set(1, &60).unwrap();
        assert_eq!(shared.read(6).unwrap(), 60);
    }

    #[test]
    fn passes_compliance() {
        let mut w = TrimmedDataSource::new(digits(), 2, 6).unwrap();
        compliance::run_full_compliance(&mut w, &[9, 8, 7]);
    }
}
