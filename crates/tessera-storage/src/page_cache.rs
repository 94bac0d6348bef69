//! Fixed-capacity write-back page cache.
//!
//! A [`PageCache`] keeps up to `capacity` pages of elements in memory, each
//! with a dirty flag. Misses load through a [`PageStore`]; when the cache is
//! full, an [`EvictionPolicy`] picks the page to write back and drop. The
//! cache never touches I/O directly, so it is tested against an in-memory
//! store and reused by [`FileStorage`](crate::FileStorage) over a file.

use indexmap::IndexMap;
use tessera_core::{Element, StorageError};
use tracing::{debug, trace};

/// Secondary storage addressed in whole pages.
///
/// `out` and `data` are always exactly one page long.
pub trait PageStore<U> {
    /// Fill `out` with the contents of `page`.
    fn load_page(&mut self, page: u64, out: &mut [U]) -> Result<(), StorageError>;

    /// Persist `data` as the contents of `page`.
    fn store_page(&mut self, page: u64, data: &[U]) -> Result<(), StorageError>;
}

/// Access bookkeeping for one resident page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    /// Logical time the page was loaded.
    pub loaded_at: u64,
    /// Logical time of the most recent access.
    pub last_used: u64,
}

/// Victim selection for a full cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Evict the least recently used page.
    #[default]
    Lru,
    /// Evict the page that was loaded earliest.
    Fifo,
}

impl EvictionPolicy {
    /// Pick the page to evict among `(page, stats)` candidates.
    ///
    /// Returns `None` only when there are no candidates.
    pub fn choose_victim<I>(self, candidates: I) -> Option<u64>
    where
        I: IntoIterator<Item = (u64, FrameStats)>,
    {
        let key = |s: &FrameStats| match self {
            Self::Lru => s.last_used,
            Self::Fifo => s.loaded_at,
        };
        candidates
            .into_iter()
            .min_by_key(|(_, s)| key(s))
            .map(|(page, _)| page)
    }
}

struct Frame<U> {
    data: Vec<U>,
    dirty: bool,
    stats: FrameStats,
}

/// Write-back cache of fixed-length pages over a [`PageStore`].
///
/// With `capacity == 1` this is a single page buffer plus dirty flag:
/// touching another page flushes the current one if dirty, then loads the
/// new one.
pub struct PageCache<U, P> {
    store: P,
    page_len: usize,
    capacity: usize,
    eviction: EvictionPolicy,
    frames: IndexMap<u64, Frame<U>>,
    clock: u64,
    loads: u64,
    evictions: u64,
}

impl<U, P> PageCache<U, P>
where
    U: Element + Default,
    P: PageStore<U>,
{
    /// Empty cache of `capacity` pages of `page_len` elements over `store`.
    pub fn new(
        store: P,
        page_len: usize,
        capacity: usize,
        eviction: EvictionPolicy,
    ) -> Result<Self, StorageError> {
        if page_len == 0 || capacity == 0 {
            return Err(StorageError::invalid(format!(
                "page cache needs page_len >= 1 and capacity >= 1, got {page_len} and {capacity}"
            )));
        }
        debug!(page_len, capacity, ?eviction, "sized page cache");
        Ok(Self {
            store,
            page_len,
            capacity,
            eviction,
            frames: IndexMap::with_capacity(capacity),
            clock: 0,
            loads: 0,
            evictions: 0,
        })
    }

    /// Copy element `index` (in store coordinates) into `out`.
    pub fn get(&mut self, index: u64, out: &mut U) -> Result<(), StorageError> {
        let offset = (index % self.page_len as u64) as usize;
        let frame = self.frame_mut(index / self.page_len as u64)?;
        out.clone_from(&frame.data[offset]);
        Ok(())
    }

    /// Overwrite element `index` and mark its page dirty.
    pub fn set(&mut self, index: u64, value: &U) -> Result<(), StorageError> {
        let offset = (index % self.page_len as u64) as usize;
        let frame = self.frame_mut(index / self.page_len as u64)?;
        frame.data[offset].clone_from(value);
        frame.dirty = true;
        Ok(())
    }

    /// Write every dirty page back to the store.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        for (&page, frame) in self.frames.iter_mut().filter(|(_, f)| f.dirty) {
            self.store.store_page(page, &frame.data)?;
            frame.dirty = false;
            trace!(page, "flushed page");
        }
        Ok(())
    }

    fn frame_mut(&mut self, page: u64) -> Result<&mut Frame<U>, StorageError> {
        self.clock += 1;
        let now = self.clock;
        if !self.frames.contains_key(&page) {
            self.load(page, now)?;
        }
        let frame = self
            .frames
            .get_mut(&page)
            .ok_or_else(|| StorageError::invalid(format!("page {page} missing after load")))?;
        frame.stats.last_used = now;
        Ok(frame)
    }

    fn load(&mut self, page: u64, now: u64) -> Result<(), StorageError> {
        let mut data = if self.frames.len() >= self.capacity {
            self.evict()?
        } else {
            vec![U::default(); self.page_len]
        };
        self.store.load_page(page, &mut data)?;
        self.loads += 1;
        trace!(page, "loaded page");
        self.frames.insert(
            page,
            Frame {
                data,
                dirty: false,
                stats: FrameStats {
                    loaded_at: now,
                    last_used: now,
                },
            },
        );
        Ok(())
    }

    /// Write back and drop the policy's victim, returning its buffer for reuse.
    fn evict(&mut self) -> Result<Vec<U>, StorageError> {
        let victim = self
            .eviction
            .choose_victim(self.frames.iter().map(|(&p, f)| (p, f.stats)))
            .ok_or_else(|| StorageError::invalid("eviction from an empty page cache"))?;
        if let Some(frame) = self.frames.get_mut(&victim) {
            if frame.dirty {
                self.store.store_page(victim, &frame.data)?;
                frame.dirty = false;
            }
        }
        let frame = self
            .frames
            .swap_remove(&victim)
            .ok_or_else(|| StorageError::invalid(format!("victim page {victim} not resident")))?;
        self.evictions += 1;
        trace!(page = victim, "evicted page");
        Ok(frame.data)
    }

    /// Elements per page.
    pub fn page_len(&self) -> usize {
        self.page_len
    }

    /// Maximum resident pages.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `page` is currently in memory.
    pub fn is_resident(&self, page: u64) -> bool {
        self.frames.contains_key(&page)
    }

    /// Number of resident pages with unflushed writes.
    pub fn dirty_pages(&self) -> usize {
        self.frames.values().filter(|f| f.dirty).count()
    }

    /// Total page loads since construction.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Total evictions since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Mutably borrow the backing store.
    ///
    /// Writing to it directly bypasses resident pages; flush first.
    pub fn store_mut(&mut self) -> &mut P {
        &mut self.store
    }

    /// Flush, then give back the store.
    pub fn into_store(mut self) -> Result<P, StorageError> {
        self.flush()?;
        Ok(self.store)
    }
}
