//! Explicitly shared, lock-guarded sources.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tessera_core::{StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Reference-counted handle to a source behind its own lock.
///
/// Cloning a `SharedSource`, or calling [`duplicate`](IndexedDataSource::duplicate)
/// on it, yields another handle to the same backing source. Decorators built
/// over a `SharedSource` therefore alias their backing store when duplicated,
/// and the aliasing is visible in their type. Use [`deep_copy`](Self::deep_copy)
/// for an independent copy.
///
/// Every `get`/`set` takes the lock for the duration of the call, which is
/// how concurrent callers serialize access to a single instance.
///
/// # Examples
///
/// ```
/// use tessera_storage::{ArrayStorage, IndexedDataSource, SharedSource};
///
/// let mut a = SharedSource::new(ArrayStorage::<i32>::new(4).unwrap());
/// let b = a.duplicate().unwrap();
/// a.set(2, &7).unwrap();
/// assert_eq!(b.read(2).unwrap(), 7);
/// ```
pub struct SharedSource<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedSource<S> {
    /// Wrap `source` for shared use.
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(source)),
        }
    }

    /// Lock the backing source for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock()
    }

    /// Whether two handles share one backing source.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to the backing source.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Take back the source if this is the last handle.
    pub fn try_unwrap(self) -> Result<S, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<S: IndexedDataSource> SharedSource<S> {
    /// New handle over an independent duplicate of the backing source.
    pub fn deep_copy(&self) -> Result<Self, StorageError> {
        Ok(Self::new(self.inner.lock().duplicate()?))
    }
}

impl<S> Clone for SharedSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: IndexedDataSource> IndexedDataSource for SharedSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.inner.lock().size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        self.inner.lock().get(index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        self.inner.lock().set(index, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(self.clone())
    }

    fn storage_type(&self) -> StorageType {
        self.inner.lock().storage_type()
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SharedSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSource")
            .field("handles", &Arc::strong_count(&self.inner))
            .field("inner", &*self.inner.lock())
            .finish()
    }
}
