//! Process-unique identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static SOURCE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);
static SUBSCRIPTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a data source.
///
/// Allocated from a monotonic atomic counter. Write listeners subscribed to
/// several notifying sources use it to tell which one fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceInstanceId(u64);

impl SourceInstanceId {
    /// Allocate a fresh, never-before-returned id. Thread-safe.
    pub fn next() -> Self {
        Self(SOURCE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SourceInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Allocate a fresh subscription handle. Thread-safe.
    pub fn next() -> Self {
        Self(SUBSCRIPTION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
