//! Element-type conversion over a sequence.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use tessera_core::{Element, StorageError, StorageType};

use crate::source::IndexedDataSource;

/// Exposes a sequence of `U` as a sequence of `W`.
///
/// `to_outer` converts a stored `U` into the `W` handed to callers;
/// `to_inner` converts a caller's `W` back for storage. A per-instance
/// scratch `U` is reused across calls instead of constructing a temporary
/// each time. The scratch is not a synchronization primitive; the
/// converter is `!Sync` like any source with interior state.
///
/// Duplicates share the conversion functions and duplicate the wrapped
/// sequence.
///
/// # Examples
///
/// ```
/// use tessera_storage::{ArrayStorage, ConvertDataSource, IndexedDataSource};
///
/// let bytes = ArrayStorage::from_vec(vec![0u8, 128, 255]).unwrap();
/// let mut unit = ConvertDataSource::new(
///     bytes,
///     |b: &u8, out: &mut f32| *out = *b as f32 / 255.0,
///     |x: &f32, out: &mut u8| *out = (x * 255.0).round() as u8,
/// );
/// assert_eq!(unit.read(2).unwrap(), 1.0);
/// unit.set(0, &0.5).unwrap();
/// assert_eq!(unit.into_inner().as_slice()[0], 128);
/// ```
pub struct ConvertDataSource<S: IndexedDataSource, W, F, G> {
    inner: S,
    to_outer: Arc<F>,
    to_inner: Arc<G>,
    scratch: RefCell<S::Item>,
    _outer: std::marker::PhantomData<fn() -> W>,
}

impl<S, W, F, G> ConvertDataSource<S, W, F, G>
where
    S: IndexedDataSource,
    W: Element,
    F: Fn(&S::Item, &mut W),
    G: Fn(&W, &mut S::Item),
{
    /// Convert `inner` through the given pair of functions.
    pub fn new(inner: S, to_outer: F, to_inner: G) -> Self
    where
        S::Item: Default,
    {
        Self::with_scratch(inner, to_outer, to_inner, S::Item::default())
    }

    /// Like [`new`](Self::new) with an explicit initial scratch value, for
    /// element types without a `Default`.
    pub fn with_scratch(inner: S, to_outer: F, to_inner: G, scratch: S::Item) -> Self {
        Self {
            inner,
            to_outer: Arc::new(to_outer),
            to_inner: Arc::new(to_inner),
            scratch: RefCell::new(scratch),
            _outer: std::marker::PhantomData,
        }
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

impl<S, W, F, G> IndexedDataSource for ConvertDataSource<S, W, F, G>
where
    S: IndexedDataSource,
    W: Element,
    F: Fn(&S::Item, &mut W),
    G: Fn(&W, &mut S::Item),
{
    type Item = W;

    fn size(&self) -> i64 {
        self.inner.size()
    }

    fn get(&self, index: i64, out: &mut W) -> Result<(), StorageError> {
        let mut scratch = self.scratch.borrow_mut();
        self.inner.get(index, &mut *scratch)?;
        (self.to_outer)(&*scratch, out);
        Ok(())
    }

    fn set(&mut self, index: i64, value: &W) -> Result<(), StorageError> {
        let scratch = self.scratch.get_mut();
        (self.to_inner)(value, &mut *scratch);
        self.inner.set(index, &*scratch)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            inner: self.inner.duplicate()?,
            to_outer: Arc::clone(&self.to_outer),
            to_inner: Arc::clone(&self.to_inner),
            scratch: RefCell::new(self.scratch.borrow().clone()),
            _outer: std::marker::PhantomData,
        })
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}

impl<S, W, F, G> fmt::Debug for ConvertDataSource<S, W, F, G>
where
    S: IndexedDataSource + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertDataSource")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compliance, ArrayStorage};

    /// Element type without `Default`.
    #[derive(Clone, Debug, PartialEq)]
    struct Pair(i32, i32);

    #[test]
    fn widens_and_narrows() {
        let a = ArrayStorage::from_vec(vec![1i32, -2, 3]).unwrap();
        let mut c = ConvertDataSource::new(
            a,
            |v: &i32, out: &mut i64| *out = *v as i64 * 1000,
            |v: &i64, out: &mut i32| *out = (*v / 1000) as i32,
        );
        assert_eq!(c.to_vec().unwrap(), vec![1000, -2000, 3000]);
        c.set(1, &7000).unwrap();
        assert_eq!(c.inner().as_slice(), &[1, 7, 3]);
        assert!(c.read(3).is_err());
    }

    #[test]
    fn scratch_supports_non_default_elements() {
        let a = ArrayStorage::filled(2, Pair(1, 2)).unwrap();
        let c = ConvertDataSource::with_scratch(
            a,
            |p: &Pair, out: &mut i32| *out = p.0 + p.1,
            |s: &i32, out: &mut Pair| *out = Pair(*s, 0),
            Pair(0, 0),
        );
        assert_eq!(c.read(1).unwrap(), 3);
    }

    #[test]
    fn duplicate_is_independent_over_owned_storage() {
        let a = ArrayStorage::from_vec(vec![1u8, 2]).unwrap();
        let mut c = ConvertDataSource::new(
            a,
            |v: &u8, out: &mut u16| *out = *v as u16,
            |v: &u16, out: &mut u8| *out = *v as u8,
        );
        let d = c.duplicate().unwrap();
        c.set(0, &9).unwrap();
        assert_eq!(d.read(0).unwrap(), 1);
    }

    #[test]
    fn passes_compliance() {
        let a = ArrayStorage::<f32>::new(6).unwrap();
        let mut c = ConvertDataSource::new(
            a,
            |v: &f32, out: &mut f64| *out = *v as f64,
            |v: &f64, out: &mut f32| *out = *v as f32,
        );
        compliance::run_full_compliance(&mut c, &[0.5, -1.25, 3.0]);
    }
}
