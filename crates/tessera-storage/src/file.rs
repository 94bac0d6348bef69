//! File-paged backend for sequences larger than memory.
//!
//! # On-disk layout
//!
//! A flat, headerless run of fixed-width little-endian element encodings
//! ([`ByteCodec`]). The file is `(len + page_len) * BYTE_WIDTH` bytes long:
//! one spare page past the end, so the page holding the last element can
//! always be read and written whole. Fresh files are zero-filled.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tessera_core::{ByteCodec, Element, StorageError, StorageType};
use tracing::{debug, warn};

use crate::config::PagedConfig;
use crate::page_cache::{PageCache, PageStore};
use crate::source::IndexedDataSource;

/// Page-granular reads and writes against an open file.
pub struct FilePageStore<U> {
    file: File,
    page_bytes: usize,
    buf: Vec<u8>,
    _elem: PhantomData<fn() -> U>,
}

impl<U: ByteCodec> FilePageStore<U> {
    fn new(file: File, page_len: usize) -> Self {
        let page_bytes = page_len * U::BYTE_WIDTH;
        Self {
            file,
            page_bytes,
            buf: vec![0; page_bytes],
            _elem: PhantomData,
        }
    }

    fn seek_page(&mut self, page: u64) -> io::Result<()> {
        self.file
            .seek(SeekFrom::Start(page * self.page_bytes as u64))
            .map(|_| ())
    }
}

impl<U: ByteCodec> PageStore<U> for FilePageStore<U> {
    fn load_page(&mut self, page: u64, out: &mut [U]) -> Result<(), StorageError> {
        self.seek_page(page)?;
        self.file.read_exact(&mut self.buf)?;
        for (slot, bytes) in out.iter_mut().zip(self.buf.chunks_exact(U::BYTE_WIDTH)) {
            *slot = U::decode(bytes);
        }
        Ok(())
    }

    fn store_page(&mut self, page: u64, data: &[U]) -> Result<(), StorageError> {
        for (value, bytes) in data.iter().zip(self.buf.chunks_exact_mut(U::BYTE_WIDTH)) {
            value.encode(bytes);
        }
        self.seek_page(page)?;
        self.file.write_all(&self.buf)?;
        Ok(())
    }
}

/// Sequence storage paged to a file through a [`PageCache`].
///
/// [`new`](Self::new) claims an anonymous temporary file that the OS
/// reclaims when the storage is dropped. [`create`](Self::create) and
/// [`open`](Self::open) work with a named file that outlives the storage.
///
/// Reads go through the cache and may load pages, so `get` uses interior
/// mutability and `FileStorage` is not `Sync`. Wrap it in a
/// [`SharedSource`](crate::SharedSource) to share it between threads.
///
/// Dirty pages are written back on eviction, on [`flush`](Self::flush) and,
/// best effort, on drop.
///
/// # Examples
///
/// ```
/// use tessera_storage::{FileStorage, IndexedDataSource, PagedConfig};
///
/// let mut fs = FileStorage::<f64>::new(10_000, PagedConfig::new(256)).unwrap();
/// fs.set(9_999, &2.5).unwrap();
/// fs.set(0, &1.0).unwrap();
/// assert_eq!(fs.read(9_999).unwrap(), 2.5);
/// ```
pub struct FileStorage<U: ByteCodec + Element + Default> {
    len: i64,
    config: PagedConfig,
    path: Option<PathBuf>,
    cache: RefCell<PageCache<U, FilePageStore<U>>>,
}

impl<U: ByteCodec + Element + Default> FileStorage<U> {
    /// Zero-filled storage of `len` elements in an anonymous temporary file.
    pub fn new(len: i64, config: PagedConfig) -> Result<Self, StorageError> {
        let expected = Self::file_bytes(len, &config)?;
        let file = tempfile::tempfile()?;
        file.set_len(expected)?;
        debug!(len, page_len = config.page_len, bytes = expected, "created temporary file storage");
        Self::from_file(file, None, len, config)
    }

    /// Create (or truncate) `path` as zero-filled storage of `len` elements.
    pub fn create(path: impl AsRef<Path>, len: i64, config: PagedConfig) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let expected = Self::file_bytes(len, &config)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(expected)?;
        debug!(path = %path.display(), len, bytes = expected, "created file storage");
        Self::from_file(file, Some(path.to_path_buf()), len, config)
    }

    /// Reopen storage previously created with the same `len` and page length.
    ///
    /// Fails with `InvalidConstruction` if the file length is not
    /// `(len + page_len) * BYTE_WIDTH`.
    pub fn open(path: impl AsRef<Path>, len: i64, config: PagedConfig) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let expected = Self::file_bytes(len, &config)?;
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let actual = file.metadata()?.len();
        if actual != expected {
            return Err(StorageError::invalid(format!(
                "{} is {actual} bytes, expected {expected} for {len} elements of {} bytes with page length {}",
                path.display(),
                U::BYTE_WIDTH,
                config.page_len
            )));
        }
        debug!(path = %path.display(), len, "opened file storage");
        Self::from_file(file, Some(path.to_path_buf()), len, config)
    }

    fn from_file(
        file: File,
        path: Option<PathBuf>,
        len: i64,
        config: PagedConfig,
    ) -> Result<Self, StorageError> {
        let store = FilePageStore::new(file, config.page_len);
        let cache = PageCache::new(store, config.page_len, config.cache_pages, config.eviction)?;
        Ok(Self {
            len,
            config,
            path,
            cache: RefCell::new(cache),
        })
    }

    /// Validated backing file length in bytes.
    fn file_bytes(len: i64, config: &PagedConfig) -> Result<u64, StorageError> {
        config.validate()?;
        if len < 0 {
            return Err(StorageError::invalid(format!("negative length {len}")));
        }
        (len as u64)
            .checked_add(config.page_len as u64)
            .and_then(|n| n.checked_mul(U::BYTE_WIDTH as u64))
            .ok_or_else(|| StorageError::invalid(format!("{len} elements overflow the file size")))
    }

    /// Write every dirty page back to the file.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.cache.borrow_mut().flush()
    }

    /// Path of a named backing file; `None` for anonymous storage.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Paging configuration.
    pub fn config(&self) -> &PagedConfig {
        &self.config
    }

    /// Page loads since construction.
    pub fn page_loads(&self) -> u64 {
        self.cache.borrow().loads()
    }
}

impl<U: ByteCodec + Element + Default> IndexedDataSource for FileStorage<U> {
    type Item = U;

    fn size(&self) -> i64 {
        self.len
    }

    fn get(&self, index: i64, out: &mut U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        self.cache.borrow_mut().get(index as u64, out)
    }

    fn set(&mut self, index: i64, value: &U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        self.cache.get_mut().set(index as u64, value)
    }

    /// Flush, then copy the backing bytes into a new temporary file.
    fn duplicate(&self) -> Result<Self, StorageError> {
        let mut cache = self.cache.borrow_mut();
        cache.flush()?;
        let src = &mut cache.store_mut().file;
        src.seek(SeekFrom::Start(0))?;
        let mut copy = tempfile::tempfile()?;
        io::copy(src, &mut copy)?;
        debug!(len = self.len, "duplicated file storage");
        Self::from_file(copy, None, self.len, self.config.clone())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::MemArray
    }
}

impl<U: ByteCodec + Element + Default> Drop for FileStorage<U> {
    fn drop(&mut self) {
        if let Err(e) = self.cache.get_mut().flush() {
            warn!(len = self.len, error = %e, "failed to flush file storage on drop");
        }
    }
}

impl<U: ByteCodec + Element + Default> std::fmt::Debug for FileStorage<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("len", &self.len)
            .field("config", &self.config)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::page_cache::EvictionPolicy;

    #[test]
    fn fresh_storage_reads_zero() {
        let fs = FileStorage::<i32>::new(100, PagedConfig::new(16)).unwrap();
        assert!(fs.to_vec().unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn writes_survive_page_crossings() {
        let mut fs = FileStorage::<u16>::new(50, PagedConfig::new(8)).unwrap();
        for i in 0..50 {
            fs.set(i, &(i as u16 * 3)).unwrap();
        }
        for i in (0..50).rev() {
            assert_eq!(fs.read(i).unwrap(), i as u16 * 3);
        }
    }

    #[test]
    fn duplicate_copies_unflushed_writes() {
        let mut fs = FileStorage::<f32>::new(20, PagedConfig::new(4)).unwrap();
        fs.set(2, &1.5).unwrap();
        let dup = fs.duplicate().unwrap();
        fs.set(2, &9.0).unwrap();
        assert_eq!(dup.read(2).unwrap(), 1.5);
        assert!(dup.path().is_none());
    }

    #[test]
    fn rejects_invalid_config_and_length() {
        assert!(FileStorage::<u8>::new(-1, PagedConfig::default()).is_err());
        assert!(FileStorage::<u8>::new(4, PagedConfig::new(0)).is_err());
    }

    #[test]
    fn passes_compliance_with_multi_page_cache() {
        let config = PagedConfig::new(5)
            .with_cache_pages(3)
            .with_eviction(EvictionPolicy::Fifo);
        let mut fs = FileStorage::<i64>::new(41, config).unwrap();
        compliance::run_full_compliance(&mut fs, &[1, -1, 7, 1 << 40]);
    }
}
