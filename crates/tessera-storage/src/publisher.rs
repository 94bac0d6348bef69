//! Subscribe/notify component for write listeners.

use std::fmt;

use tessera_core::SubscriptionId;

type Listener<T> = Box<dyn Fn(&T, i64) + Send + Sync>;

/// Ordered list of `(source, index)` callbacks with removable handles.
///
/// Listeners run in subscription order. `T` is the type that fires the
/// notification; listeners receive a reference to it so one listener
/// subscribed to several sources can tell them apart.
pub struct Publisher<T: ?Sized> {
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: ?Sized> Publisher<T> {
    /// Publisher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register `listener`, returning the handle that removes it.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&T, i64) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the handle was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Invoke every listener with `(source, index)`.
    pub fn notify(&self, source: &T, index: i64) {
        for (_, listener) in &self.listeners {
            listener(source, index);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T: ?Sized> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.listeners.iter().map(|(id, _)| *id).collect();
        f.debug_struct("Publisher").field("listeners", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn notifies_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut p = Publisher::<str>::new();
        for tag in ["a", "b"] {
            let log = Arc::clone(&log);
            p.subscribe(move |src: &str, i| log.lock().push(format!("{tag}:{src}:{i}")));
        }
        p.notify("x", 3);
        assert_eq!(*log.lock(), vec!["a:x:3", "b:x:3"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let hits = Arc::new(Mutex::new(0));
        let mut p = Publisher::<()>::new();
        let h = Arc::clone(&hits);
        let first = p.subscribe(move |_, _| *h.lock() += 1);
        let h = Arc::clone(&hits);
        p.subscribe(move |_, _| *h.lock() += 10);

        assert!(p.unsubscribe(first));
        assert!(!p.unsubscribe(first));
        p.notify(&(), 0);
        assert_eq!(*hits.lock(), 10);
        assert_eq!(p.len(), 1);
    }
}
