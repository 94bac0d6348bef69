//! Deferred storage computed from a generation rule.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tessera_core::{Element, StorageError, StorageType};

use crate::array::ArrayStorage;
use crate::source::IndexedDataSource;

/// A sequence whose elements are produced on demand by a rule.
///
/// Nothing is materialized up front. Writes are kept in an
/// insertion-ordered overlay that shadows the rule, so `set` followed by
/// `get` returns the written value. Duplicates share the rule and copy the
/// overlay.
///
/// # Examples
///
/// ```
/// use tessera_storage::{IndexedDataSource, VirtualStorage};
///
/// let mut squares = VirtualStorage::new(1_000_000_000, |i, out: &mut i64| *out = i * i).unwrap();
/// assert_eq!(squares.read(12).unwrap(), 144);
/// squares.set(12, &-1).unwrap();
/// assert_eq!(squares.read(12).unwrap(), -1);
/// ```
pub struct VirtualStorage<U, F> {
    len: i64,
    rule: Arc<F>,
    overlay: IndexMap<i64, U>,
}

impl<U, F> VirtualStorage<U, F>
where
    U: Element,
    F: Fn(i64, &mut U),
{
    /// Sequence of `len` elements where element `i` is `rule(i)`.
    pub fn new(len: i64, rule: F) -> Result<Self, StorageError> {
        if len < 0 {
            return Err(StorageError::invalid(format!("negative length {len}")));
        }
        Ok(Self {
            len,
            rule: Arc::new(rule),
            overlay: IndexMap::new(),
        })
    }

    /// Number of positions overridden by `set`.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    /// Drop every override so all positions follow the rule again.
    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    /// Evaluate every position into a dense array.
    pub fn materialize(&self) -> Result<ArrayStorage<U>, StorageError>
    where
        U: Default,
    {
        let mut out = ArrayStorage::new(self.len)?;
        for (i, slot) in out.as_mut_slice().iter_mut().enumerate() {
            self.get(i as i64, slot)?;
        }
        Ok(out)
    }
}

impl<U, F> IndexedDataSource for VirtualStorage<U, F>
where
    U: Element,
    F: Fn(i64, &mut U),
{
    type Item = U;

    fn size(&self) -> i64 {
        self.len
    }

    fn get(&self, index: i64, out: &mut U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        match self.overlay.get(&index) {
            Some(v) => out.clone_from(v),
            None => (self.rule)(index, out),
        }
        Ok(())
    }

    fn set(&mut self, index: i64, value: &U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        match self.overlay.get_mut(&index) {
            Some(slot) => slot.clone_from(value),
            None => {
                self.overlay.insert(index, value.clone());
            }
        }
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            len: self.len,
            rule: Arc::clone(&self.rule),
            overlay: self.overlay.clone(),
        })
    }

    fn storage_type(&self) -> StorageType {
        StorageType::MemVirtual
    }
}

impl<U: fmt::Debug, F> fmt::Debug for VirtualStorage<U, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualStorage")
            .field("len", &self.len)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}
