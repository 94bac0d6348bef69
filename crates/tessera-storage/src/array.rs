//! Dense in-memory backend.

use tessera_core::{Element, StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Fully materialized contiguous storage.
///
/// O(1) `get`/`set`. `duplicate` deep-copies every element. Lengths are
/// capped at [`MAX_LEN`](Self::MAX_LEN); larger sequences belong in
/// [`BigArrayStorage`](crate::BigArrayStorage).
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayStorage<U> {
    data: Vec<U>,
}

impl<U: Element> ArrayStorage<U> {
    /// Largest supported length (32-bit addressable).
    pub const MAX_LEN: i64 = i32::MAX as i64;

    /// `len` default-valued (zero for numeric types) elements.
    pub fn new(len: i64) -> Result<Self, StorageError>
    where
        U: Default,
    {
        Self::filled(len, U::default())
    }

    /// `len` copies of `value`.
    pub fn filled(len: i64, value: U) -> Result<Self, StorageError> {
        let len = Self::check_len(len)?;
        Ok(Self {
            data: vec![value; len],
        })
    }

    /// Take ownership of existing elements.
    pub fn from_vec(data: Vec<U>) -> Result<Self, StorageError> {
        Self::check_len(data.len() as i64)?;
        Ok(Self { data })
    }

    fn check_len(len: i64) -> Result<usize, StorageError> {
        if len < 0 {
            return Err(StorageError::invalid(format!("negative length {len}")));
        }
        if len > Self::MAX_LEN {
            return Err(StorageError::invalid(format!(
                "length {len} exceeds ArrayStorage::MAX_LEN ({}); use BigArrayStorage",
                Self::MAX_LEN
            )));
        }
        Ok(len as usize)
    }

    /// Elements as a slice.
    pub fn as_slice(&self) -> &[U] {
        &self.data
    }

    /// Elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [U] {
        &mut self.data
    }

    /// Unwrap into the backing vector.
    pub fn into_vec(self) -> Vec<U> {
        self.data
    }
}

impl<U: Element> IndexedDataSource for ArrayStorage<U> {
    type Item = U;

    fn size(&self) -> i64 {
        self.data.len() as i64
    }

    fn get(&self, index: i64, out: &mut U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size())?;
        out.clone_from(&self.data[index as usize]);
        Ok(())
    }

    fn set(&mut self, index: i64, value: &U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.size())?;
        self.data[index as usize].clone_from(value);
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(self.clone())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::MemArray
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    #[test]
    fn new_is_default_filled() {
        let a = ArrayStorage::<f64>::new(4).unwrap();
        assert_eq!(a.as_slice(), &[0.0; 4]);
        assert_eq!(a.storage_type(), StorageType::MemArray);
    }

    #[test]
    fn rejects_negative_and_oversized_lengths() {
        assert!(matches!(
            ArrayStorage::<u8>::new(-1),
            Err(StorageError::InvalidConstruction { .. })
        ));
        let err = ArrayStorage::<u8>::new(ArrayStorage::<u8>::MAX_LEN + 1).unwrap_err();
        assert!(err.to_string().contains("BigArrayStorage"));
    }

    #[test]
    fn duplicate_is_deep() {
        let mut a = ArrayStorage::from_vec(vec![1, 2, 3]).unwrap();
        let b = a.duplicate().unwrap();
        a.set(1, &20).unwrap();
        assert_eq!(b.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn empty_array_rejects_every_index() {
        let a = ArrayStorage::<i32>::new(0).unwrap();
        assert!(a.read(0).is_err());
    }

    #[test]
    fn passes_compliance() {
        let mut a = ArrayStorage::<i64>::new(17).unwrap();
        compliance::run_full_compliance(&mut a, &[3, -4, 5]);
    }
}
