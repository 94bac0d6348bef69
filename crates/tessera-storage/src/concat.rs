//! Concatenation of two sequences.

use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// `first` followed by `second`.
///
/// Index `i < first.size()` reads `first[i]`; larger indices read
/// `second[i - first.size()]`. Negative indices and indices past the end
/// are reported by whichever half they route to.
///
/// # Examples
///
/// ```
/// use tessera_storage::{ArrayStorage, ConcatDataSource, IndexedDataSource};
///
/// let a = ArrayStorage::from_vec(vec![1, 2]).unwrap();
/// let b = ArrayStorage::from_vec(vec![3, 4, 5]).unwrap();
/// let ab = ConcatDataSource::new(a, b).unwrap();
/// assert_eq!(ab.to_vec().unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct ConcatDataSource<A, B> {
    first: A,
    second: B,
    split: i64,
    size: i64,
}

impl<A, B> ConcatDataSource<A, B>
where
    A: IndexedDataSource,
    B: IndexedDataSource<Item = A::Item>,
{
    /// Concatenate `first` and `second`.
    ///
    /// Fails with `InvalidConstruction` if the combined size overflows `i64`.
    pub fn new(first: A, second: B) -> Result<Self, StorageError> {
        let split = first.size();
        let size = split.checked_add(second.size()).ok_or_else(|| {
            StorageError::invalid(format!(
                "concatenated size {split} + {} overflows",
                second.size()
            ))
        })?;
        Ok(Self {
            first,
            second,
            split,
            size,
        })
    }

    /// The leading sequence.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The trailing sequence.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Unwrap into `(first, second)`.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> IndexedDataSource for ConcatDataSource<A, B>
where
    A: IndexedDataSource,
    B: IndexedDataSource<Item = A::Item>,
{
    type Item = A::Item;

    fn size(&self) -> i64 {
        self.size
    }

    fn get(&self, index: i64, out: &mut A::Item) -> Result<(), StorageError> {
        if index < self.split {
            self.first.get(index, out)
        } else {
            self.second.get(index - self.split, out)
        }
    }

    fn set(&mut self, index: i64, value: &A::Item) -> Result<(), StorageError> {
        if index < self.split {
            self.first.set(index, value)
        } else {
            self.second.set(index - self.split, value)
        }
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            first: self.first.duplicate()?,
            second: self.second.duplicate()?,
            split: self.split,
            size: self.size,
        })
    }

    fn storage_type(&self) -> StorageType {
        self.first
            .storage_type()
            .combine(self.second.storage_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compliance, ArrayStorage, VirtualStorage};

    #[test]
    fn routes_by_split_point() {
        let a = ArrayStorage::from_vec(vec![10, 11]).unwrap();
        let b = ArrayStorage::from_vec(vec![20]).unwrap();
        let mut ab = ConcatDataSource::new(a, b).unwrap();
        ab.set(2, &21).unwrap();
        assert_eq!(ab.second().as_slice(), &[21]);
        assert!(matches!(
            ab.read(3),
            Err(StorageError::IndexOutOfRange { index: 1, size: 1 })
        ));
        assert!(matches!(
            ab.read(-1),
            Err(StorageError::IndexOutOfRange { index: -1, size: 2 })
        ));
    }

    #[test]
    fn classification_combines_halves() {
        let a = ArrayStorage::<i32>::new(2).unwrap();
        let v = VirtualStorage::new(2, |i, out: &mut i32| *out = i as i32).unwrap();
        let av = ConcatDataSource::new(a, v).unwrap();
        assert_eq!(av.storage_type(), StorageType::MemVirtual);
    }

    #[test]
    fn empty_halves_are_allowed() {
        let a = ArrayStorage::<u8>::new(0).unwrap();
        let b = ArrayStorage::from_vec(vec![1u8]).unwrap();
        let ab = ConcatDataSource::new(a, b).unwrap();
        assert_eq!(ab.to_vec().unwrap(), vec![1]);
    }

    #[test]
    fn overflowing_size_is_rejected() {
        let a = VirtualStorage::new(i64::MAX, |_, _: &mut u8| {}).unwrap();
        let b = ArrayStorage::from_vec(vec![1u8]).unwrap();
        assert!(matches!(
            ConcatDataSource::new(a, b),
            Err(StorageError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn passes_compliance() {
        let a = ArrayStorage::<i16>::new(5).unwrap();
        let b = ArrayStorage::<i16>::new(3).unwrap();
        let mut ab = ConcatDataSource::new(a, b).unwrap();
        compliance::run_full_compliance(&mut ab, &[4, 5, 6]);
    }
}
