//! Adapter over a caller-owned collection.

use std::marker::PhantomData;

use tessera_core::{Element, StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Storage view over any owned slice-like collection.
///
/// Used when the caller already holds the elements in a `Vec`, a boxed
/// slice, a fixed array or a `SmallVec`. The length is the collection's
/// length at construction and never changes.
///
/// # Examples
///
/// ```
/// use tessera_storage::{IndexedDataSource, ListStorage};
///
/// let mut list = ListStorage::new([1u8, 2, 3]);
/// list.set(0, &9).unwrap();
/// assert_eq!(list.into_inner(), [9, 2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct ListStorage<U, C> {
    items: C,
    _elem: PhantomData<fn() -> U>,
}

impl<U, C> ListStorage<U, C>
where
    U: Element,
    C: AsRef<[U]> + AsMut<[U]> + Clone,
{
    /// Wrap `items`.
    pub fn new(items: C) -> Self {
        Self {
            items,
            _elem: PhantomData,
        }
    }

    /// Borrow the wrapped collection.
    pub fn inner(&self) -> &C {
        &self.items
    }

    /// Unwrap the collection.
    pub fn into_inner(self) -> C {
        self.items
    }
}

impl<U, C> IndexedDataSource for ListStorage<U, C>
where
    U: Element,
    C: AsRef<[U]> + AsMut<[U]> + Clone,
{
    type Item = U;

    fn size(&self) -> i64 {
        self.items.as_ref().len() as i64
    }

    fn get(&self, index: i64, out: &mut U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size())?;
        out.clone_from(&self.items.as_ref()[index as usize]);
        Ok(())
    }

    fn set(&mut self, index: i64, value: &U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size())?;
        self.items.as_mut()[index as usize].clone_from(value);
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self::new(self.items.clone()))
    }

    fn storage_type(&self) -> StorageType {
        StorageType::MemArray
    }
}
