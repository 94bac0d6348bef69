//! Out-of-range padding over a flat sequence.

use std::fmt;

use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Wraps a sequence and synthesizes values for indices outside it.
///
/// In-range indices are delegated. For any other `i64` index, `get` asks
/// the fallback `fill(index, out)` for a value. Out-of-range positions are
/// read-only: `set` there succeeds, without storing anything, only if the
/// value equals what the fallback would produce, and otherwise fails with
/// [`StorageError::PolicyViolation`].
///
/// `size()` reports the wrapped size; padding widens the readable index
/// range without changing the sequence length.
pub struct PaddedDataSource<S, F> {
    inner: S,
    fill: F,
}

impl<S, F> PaddedDataSource<S, F>
where
    S: IndexedDataSource,
    F: Fn(i64, &mut S::Item) + Clone,
{
    /// Pad `inner` with values produced by `fill`.
    pub fn new(inner: S, fill: F) -> Self {
        Self { inner, fill }
    }

    /// Whether `index` addresses the wrapped sequence.
    pub fn in_range(&self, index: i64) -> bool {
        (0..self.inner.size()).contains(&index)
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

impl<S, F> IndexedDataSource for PaddedDataSource<S, F>
where
    S: IndexedDataSource,
    F: Fn(i64, &mut S::Item) + Clone,
{
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.inner.size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        if self.in_range(index) {
            self.inner.get(index, out)
        } else {
            (self.fill)(index, out);
            Ok(())
        }
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        if self.in_range(index) {
            return self.inner.set(index, value);
        }
        let mut synthesized = value.clone();
        (self.fill)(index, &mut synthesized);
        if synthesized == *value {
            Ok(())
        } else {
            Err(StorageError::PolicyViolation {
                position: index.to_string(),
            })
        }
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self::new(self.inner.duplicate()?, self.fill.clone()))
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}

impl<S: fmt::Debug, F> fmt::Debug for PaddedDataSource<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedDataSource")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayStorage;

    fn padded() -> PaddedDataSource<ArrayStorage<i32>, impl Fn(i64, &mut i32) + Clone> {
        let a = ArrayStorage::from_vec(vec![1, 2, 3]).unwrap();
        PaddedDataSource::new(a, |i, out: &mut i32| *out = -(i as i32))
    }

    #[test]
    fn out_of_range_reads_use_fallback() {
        let p = padded();
        assert_eq!(p.read(1).unwrap(), 2);
        assert_eq!(p.read(-4).unwrap(), 4);
        assert_eq!(p.read(10).unwrap(), -10);
        assert_eq!(p.size(), 3);
    }

    #[test]
    fn agreeing_out_of_range_write_is_a_no_op() {
        let mut p = padded();
        p.set(7, &-7).unwrap();
        assert_eq!(p.inner().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn disagreeing_out_of_range_write_is_rejected() {
        let mut p = padded();
        let err = p.set(-2, &0).unwrap_err();
        assert!(matches!(err, StorageError::PolicyViolation { ref position } if position == "-2"));
    }

    #[test]
    fn in_range_writes_reach_inner() {
        let mut p = padded();
        p.set(0, &100).unwrap();
        assert_eq!(p.duplicate().unwrap().read(0).unwrap(), 100);
    }
}
