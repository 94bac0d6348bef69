//! Reversed view of a sequence.

use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Index `i` maps to `size - 1 - i`.
#[derive(Clone, Debug)]
pub struct ReversedDataSource<S> {
    inner: S,
}

impl<S: IndexedDataSource> ReversedDataSource<S> {
    /// Reverse `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwrap the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn map(&self, index: i64) -> Result<i64, StorageError> {
        let size = self.inner.size();
        StorageError::check_index(index, size)?;
        Ok(size - 1 - index)
    }
}

impl<S: IndexedDataSource> IndexedDataSource for ReversedDataSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.inner.size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        let i = self.map(index)?;
        self.inner.get(i, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        let i = self.map(index)?;
        self.inner.set(i, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self::new(self.inner.duplicate()?))
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compliance, ArrayStorage};
    use proptest::prelude::*;

    #[test]
    fn reads_back_to_front() {
        let r = ReversedDataSource::new(ArrayStorage::from_vec(vec!['a', 'b', 'c']).unwrap());
        assert_eq!(r.to_vec().unwrap(), vec!['c', 'b', 'a']);
        assert!(matches!(
            r.read(3),
            Err(StorageError::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn passes_compliance() {
        let mut r = ReversedDataSource::new(ArrayStorage::<i32>::new(7).unwrap());
        compliance::run_full_compliance(&mut r, &[1, 2]);
    }

    proptest! {
        #[test]
        fn double_reversal_reads_original(values in proptest::collection::vec(any::<i32>(), 0..64)) {
            let original = ArrayStorage::from_vec(values.clone()).unwrap();
            let rr = ReversedDataSource::new(ReversedDataSource::new(original));
            prop_assert_eq!(rr.to_vec().unwrap(), values);
        }
    }
}
