//! The flat sequence storage contract.

use tessera_core::{Element, StorageError, StorageType};

/// A 0-based, fixed-length sequence of elements.
///
/// # Contract
///
/// - [`size`](Self::size) never changes for the life of the instance.
///   Decorators that appear to resize build a new instance instead.
/// - [`get`](Self::get) copies the stored element into `out`; it never
///   hands out an alias. [`set`](Self::set) copies `value` in.
/// - Backends reject `index < 0` and `index >= size()` with
///   [`StorageError::IndexOutOfRange`]. Decorators either check the same
///   bound themselves or delegate and let the wrapped source report it;
///   they never translate an inner error.
/// - [`duplicate`](Self::duplicate) deep-copies owned backends and
///   duplicates whatever a decorator wraps. Use
///   [`SharedSource`](crate::SharedSource) when aliasing is wanted.
///
/// Reads take `&self`. Backends that cache (the file-paged backend) use
/// interior mutability and are therefore not `Sync`; share them across
/// threads through a [`SharedSource`](crate::SharedSource).
pub trait IndexedDataSource {
    /// Element type.
    type Item: Element;

    /// Number of elements.
    fn size(&self) -> i64;

    /// Copy the element at `index` into `out`.
    fn get(&self, index: i64, out: &mut Self::Item) -> Result<(), StorageError>;

    /// Copy `value` into position `index`.
    fn set(&mut self, index: i64, value: &Self::Item) -> Result<(), StorageError>;

    /// Independent instance per the backend's copy rules.
    fn duplicate(&self) -> Result<Self, StorageError>
    where
        Self: Sized;

    /// Addressability classification.
    fn storage_type(&self) -> StorageType;

    /// Read into a freshly constructed element.
    fn read(&self, index: i64) -> Result<Self::Item, StorageError>
    where
        Self::Item: Default,
    {
        let mut out = Self::Item::default();
        self.get(index, &mut out)?;
        Ok(out)
    }

    /// Read every element in index order.
    fn to_vec(&self) -> Result<Vec<Self::Item>, StorageError>
    where
        Self::Item: Default,
    {
        (0..self.size()).map(|i| self.read(i)).collect()
    }
}
