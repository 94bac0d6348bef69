//! Chunked in-memory backend for lengths beyond 32-bit addressing.

use tessera_core::{Element, StorageError, StorageType};
use tracing::debug;

use crate::source::IndexedDataSource;

/// In-memory storage split into fixed power-of-two chunks.
///
/// Same contract as [`ArrayStorage`](crate::ArrayStorage), but the total
/// length is bounded only by `i64` and available memory. Index `i` lives
/// in chunk `i >> shift` at offset `i & mask`. Every chunk is allocated at
/// construction except the last, which is trimmed to the remaining length.
#[derive(Clone, Debug, PartialEq)]
pub struct BigArrayStorage<U> {
    chunks: Vec<Vec<U>>,
    len: i64,
    shift: u32,
}

impl<U: Element> BigArrayStorage<U> {
    /// Default chunk length: 1M elements.
    pub const DEFAULT_CHUNK_LEN: usize = 1 << 20;

    /// `len` default-valued elements in chunks of [`DEFAULT_CHUNK_LEN`](Self::DEFAULT_CHUNK_LEN).
    pub fn new(len: i64) -> Result<Self, StorageError>
    where
        U: Default,
    {
        Self::with_chunk_len(len, Self::DEFAULT_CHUNK_LEN, U::default())
    }

    /// `len` copies of `value` in chunks of `chunk_len` elements.
    ///
    /// `chunk_len` must be a non-zero power of two.
    pub fn with_chunk_len(len: i64, chunk_len: usize, value: U) -> Result<Self, StorageError> {
        if len < 0 {
            return Err(StorageError::invalid(format!("negative length {len}")));
        }
        if !chunk_len.is_power_of_two() {
            return Err(StorageError::invalid(format!(
                "chunk length {chunk_len} is not a power of two"
            )));
        }
        let shift = chunk_len.trailing_zeros();
        let chunk_count = (len as u64).div_ceil(chunk_len as u64);
        let chunk_count = usize::try_from(chunk_count).map_err(|_| {
            StorageError::invalid(format!("{chunk_count} chunks exceed the address space"))
        })?;

        let mut chunks = Vec::with_capacity(chunk_count);
        let mut remaining = len as u64;
        for _ in 0..chunk_count {
            let this = remaining.min(chunk_len as u64) as usize;
            chunks.push(vec![value.clone(); this]);
            remaining -= this as u64;
        }
        debug!(len, chunk_len, chunk_count, "allocated big array storage");
        Ok(Self { chunks, len, shift })
    }

    /// Elements per full chunk.
    pub fn chunk_len(&self) -> usize {
        1 << self.shift
    }

    /// Number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn locate(&self, index: i64) -> (usize, usize) {
        let i = index as u64;
        ((i >> self.shift) as usize, (i & ((1u64 << self.shift) - 1)) as usize)
    }
}

impl<U: Element> IndexedDataSource for BigArrayStorage<U> {
    type Item = U;

    fn size(&self) -> i64 {
        self.len
    }

    fn get(&self, index: i64, out: &mut U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        let (chunk, offset) = self.locate(index);
        out.clone_from(&self.chunks[chunk][offset]);
        Ok(())
    }

    fn set(&mut self, index: i64, value: &U) -> Result<(), StorageError> {
        StorageError::check_index(index, self.len)?;
        let (chunk, offset) = self.locate(index);
        self.chunks[chunk][offset].clone_from(value);
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(self.clone())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::MemArray
    }
}
