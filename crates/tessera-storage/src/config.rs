//! Paging configuration for the file-backed backend.

use tessera_core::StorageError;

use crate::page_cache::EvictionPolicy;

/// Configuration for [`FileStorage`](crate::FileStorage) paging.
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagedConfig {
    /// Elements per page.
    ///
    /// Default: 1024. Must be in `[1, MAX_PAGE_LEN]`. The backing file is
    /// over-allocated by one page.
    pub page_len: usize,

    /// Pages held in memory at once.
    ///
    /// Default: 1, the classic single-page buffer. Must be at least 1.
    pub cache_pages: usize,

    /// Victim selection when the cache is full.
    pub eviction: EvictionPolicy,
}

impl PagedConfig {
    /// Default page length in elements.
    pub const DEFAULT_PAGE_LEN: usize = 1024;

    /// Default number of cached pages.
    pub const DEFAULT_CACHE_PAGES: usize = 1;

    /// Largest accepted page length.
    pub const MAX_PAGE_LEN: usize = 1 << 24;

    /// Default configuration with the given page length.
    pub fn new(page_len: usize) -> Self {
        Self {
            page_len,
            ..Self::default()
        }
    }

    /// Same configuration holding `cache_pages` pages.
    pub fn with_cache_pages(mut self, cache_pages: usize) -> Self {
        self.cache_pages = cache_pages;
        self
    }

    /// Same configuration using `eviction`.
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.page_len == 0 || self.page_len > Self::MAX_PAGE_LEN {
            return Err(StorageError::invalid(format!(
                "page_len {} outside [1, {}]",
                self.page_len,
                Self::MAX_PAGE_LEN
            )));
        }
        if self.cache_pages == 0 {
            return Err(StorageError::invalid("cache_pages must be at least 1"));
        }
        Ok(())
    }

    /// Size in bytes of one page of `byte_width`-byte elements.
    pub fn page_bytes(&self, byte_width: usize) -> usize {
        self.page_len * byte_width
    }
}

impl Default for PagedConfig {
    fn default() -> Self {
        Self {
            page_len: Self::DEFAULT_PAGE_LEN,
            cache_pages: Self::DEFAULT_CACHE_PAGES,
            eviction: EvictionPolicy::Lru,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_page_lru() {
        let c = PagedConfig::default();
        assert_eq!(c.page_len, 1024);
        assert_eq!(c.cache_pages, 1);
        assert_eq!(c.eviction, EvictionPolicy::Lru);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let c = PagedConfig::new(64)
            .with_cache_pages(4)
            .with_eviction(EvictionPolicy::Fifo);
        assert_eq!(c.page_len, 64);
        assert_eq!(c.cache_pages, 4);
        assert_eq!(c.page_bytes(8), 512);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(PagedConfig::new(0).validate().is_err());
        assert!(PagedConfig::new(PagedConfig::MAX_PAGE_LEN + 1)
            .validate()
            .is_err());
        assert!(PagedConfig::new(16).with_cache_pages(0).validate().is_err());
    }
}
