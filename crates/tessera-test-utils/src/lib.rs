//! Test utilities and mock types for Tessera development.
//!
//! Provides an in-memory [`PageStore`] with access counters
//! ([`MemoryPageStore`]), a [`RecordingListener`] for write notifications,
//! and deterministic value generators. Fixture sources live in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tessera_core::{SourceInstanceId, StorageError};
use tessera_storage::{IndexedDataSource, NotifyingDataSource, PageStore};

/// In-memory [`PageStore`] that counts page transfers.
///
/// Pages never written read back as `fill`.
pub struct MemoryPageStore<U> {
    pages: Vec<Vec<U>>,
    fill: U,
    pub loads: usize,
    pub stores: usize,
}

impl<U: Clone> MemoryPageStore<U> {
    pub fn new(fill: U) -> Self {
        Self {
            pages: Vec::new(),
            fill,
            loads: 0,
            stores: 0,
        }
    }

    /// Contents of `page` as last stored, if it ever was.
    pub fn page(&self, page: u64) -> Option<&[U]> {
        self.pages
            .get(page as usize)
            .filter(|p| !p.is_empty())
            .map(Vec::as_slice)
    }
}

impl<U: Clone> PageStore<U> for MemoryPageStore<U> {
    fn load_page(&mut self, page: u64, out: &mut [U]) -> Result<(), StorageError> {
        self.loads += 1;
        match self.pages.get(page as usize).filter(|p| !p.is_empty()) {
            Some(stored) => out.clone_from_slice(stored),
            None => out.iter_mut().for_each(|v| v.clone_from(&self.fill)),
        }
        Ok(())
    }

    fn store_page(&mut self, page: u64, data: &[U]) -> Result<(), StorageError> {
        self.stores += 1;
        let slot = page as usize;
        if self.pages.len() <= slot {
            self.pages.resize_with(slot + 1, Vec::new);
        }
        self.pages[slot] = data.to_vec();
        Ok(())
    }
}

/// Collects `(source id, index)` pairs from write notifications.
///
/// Clones share the same log, so one clone can be moved into a listener
/// while the test keeps another to inspect.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<(SourceInstanceId, i64)>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `source`, recording every write it reports.
    pub fn attach<S>(&self, source: &mut NotifyingDataSource<S>)
    where
        S: IndexedDataSource + 'static,
    {
        let events = Arc::clone(&self.events);
        source.subscribe(move |src: &NotifyingDataSource<S>, index| {
            events.lock().push((src.id(), index));
        });
    }

    pub fn events(&self) -> Vec<(SourceInstanceId, i64)> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// `n` reproducible values in `[-1000, 1000)` from `seed`.
pub fn seeded_values(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1000.0..1000.0)).collect()
}

/// `n` reproducible indices in `[0, len)` from `seed`.
pub fn seeded_indices(seed: u64, n: usize, len: i64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..len)).collect()
}
