//! Write notification.

use std::fmt;

use tessera_core::{SourceInstanceId, StorageError, StorageType, SubscriptionId};

use crate::publisher::Publisher;
use crate::source::IndexedDataSource;

/// Wraps a sequence and notifies listeners after every `set`.
///
/// Listeners run strictly after the write has been committed to the wrapped
/// sequence, in subscription order. They receive a reference to this
/// wrapper, not to the wrapped sequence, plus the written index; the
/// wrapper's [`id`](Self::id) tells apart several wrappers sharing one
/// listener. Writes made directly to the wrapped sequence (through
/// [`inner_mut`](Self::inner_mut) or another alias) are not announced.
///
/// A failed `set` notifies nobody.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tessera_storage::{ArrayStorage, IndexedDataSource, NotifyingDataSource};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let mut src = NotifyingDataSource::new(ArrayStorage::<i32>::new(3).unwrap());
/// let log = Arc::clone(&seen);
/// src.subscribe(move |s, i| log.lock().unwrap().push((i, s.read(i).unwrap())));
/// src.set(1, &42).unwrap();
/// assert_eq!(*seen.lock().unwrap(), vec![(1, 42)]);
/// ```
pub struct NotifyingDataSource<S> {
    inner: S,
    id: SourceInstanceId,
    publisher: Publisher<NotifyingDataSource<S>>,
}

impl<S: IndexedDataSource> NotifyingDataSource<S> {
    /// Wrap `inner` with no listeners.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            id: SourceInstanceId::next(),
            publisher: Publisher::new(),
        }
    }

    /// Identity of this wrapper.
    pub fn id(&self) -> SourceInstanceId {
        self.id
    }

    /// Register a listener called with `(self, index)` after each write.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Self, i64) + Send + Sync + 'static,
    {
        self.publisher.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.publisher.len()
    }

    /// Borrow the wrapped sequence.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Mutably borrow the wrapped sequence; writes through it are silent.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the wrapped sequence, dropping all listeners.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: IndexedDataSource> IndexedDataSource for NotifyingDataSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.inner.size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        self.inner.get(index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        self.inner.set(index, value)?;
        self.publisher.notify(self, index);
        Ok(())
    }

    /// New wrapper over a duplicate of the wrapped sequence, with a fresh
    /// id and no listeners.
    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self::new(self.inner.duplicate()?))
    }

    fn storage_type(&self) -> StorageType {
        self.inner.storage_type()
    }
}

impl<S: fmt::Debug> fmt::Debug for NotifyingDataSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyingDataSource")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .field("publisher", &self.publisher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayStorage, SharedSource};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn listener_sees_committed_value() {
        let observed = Arc::new(Mutex::new(None));
        let mut n = NotifyingDataSource::new(ArrayStorage::<f64>::new(4).unwrap());
        let slot = Arc::clone(&observed);
        n.subscribe(move |src, i| *slot.lock() = Some(src.read(i).unwrap()));
        n.set(2, &3.5).unwrap();
        assert_eq!(*observed.lock(), Some(3.5));
    }

    #[test]
    fn failed_write_is_not_announced() {
        let hits = Arc::new(Mutex::new(0));
        let mut n = NotifyingDataSource::new(ArrayStorage::<u8>::new(2).unwrap());
        let h = Arc::clone(&hits);
        n.subscribe(move |_, _| *h.lock() += 1);
        assert!(n.set(5, &1).is_err());
        assert_eq!(*hits.lock(), 0);
    }

    #[test]
    fn one_listener_distinguishes_wrappers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let backing = SharedSource::new(ArrayStorage::<i32>::new(2).unwrap());
        let mut a = NotifyingDataSource::new(backing.clone());
        let mut b = NotifyingDataSource::new(backing.clone());
        for n in [&mut a, &mut b] {
            let log = Arc::clone(&log);
            n.subscribe(move |src, i| log.lock().push((src.id(), i)));
        }
        a.set(0, &1).unwrap();
        b.set(1, &2).unwrap();
        assert_eq!(*log.lock(), vec![(a.id(), 0), (b.id(), 1)]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn direct_writes_bypass_listeners() {
        let hits = Arc::new(Mutex::new(0));
        let mut n = NotifyingDataSource::new(ArrayStorage::<u8>::new(2).unwrap());
        let h = Arc::clone(&hits);
        n.subscribe(move |_, _| *h.lock() += 1);
        n.inner_mut().set(0, &9).unwrap();
        assert_eq!(*hits.lock(), 0);
        assert_eq!(n.read(0).unwrap(), 9);
    }

    #[test]
    fn duplicate_has_fresh_identity_and_no_listeners() {
        let mut n = NotifyingDataSource::new(ArrayStorage::<u8>::new(2).unwrap());
        n.subscribe(|_, _| {});
        let d = n.duplicate().unwrap();
        assert_ne!(d.id(), n.id());
        assert_eq!(d.listener_count(), 0);
        assert_eq!(n.listener_count(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let hits = Arc::new(Mutex::new(0));
        let mut n = NotifyingDataSource::new(ArrayStorage::<u8>::new(1).unwrap());
        let h = Arc::clone(&hits);
        let sub = n.subscribe(move |_, _| *h.lock() += 1);
        n.set(0, &1).unwrap();
        assert!(n.unsubscribe(sub));
        n.set(0, &2).unwrap();
        assert_eq!(*hits.lock(), 1);
    }
}
