//! Benchmark profiles and utilities for the Tessera storage framework.
//!
//! - [`file_grid`]: a square `f32` grid paged to a temporary file
//! - [`memory_grid`]: the same grid held in an [`ArrayStorage`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_core::StorageError;
use tessera_nd::NdDataSource;
use tessera_storage::{ArrayStorage, FileStorage, IndexedDataSource, PagedConfig};

/// `side x side` grid with element `i` equal to `i as f32`, paged to an
/// anonymous file under `config`.
pub fn file_grid(
    side: i64,
    config: PagedConfig,
) -> Result<NdDataSource<FileStorage<f32>>, StorageError> {
    let mut flat = FileStorage::new(side * side, config)?;
    for i in 0..side * side {
        flat.set(i, &(i as f32))?;
    }
    flat.flush()?;
    NdDataSource::new(flat, &[side, side])
}

/// In-memory counterpart of [`file_grid`].
pub fn memory_grid(side: i64) -> Result<NdDataSource<ArrayStorage<f32>>, StorageError> {
    let flat = ArrayStorage::from_vec((0..side * side).map(|i| i as f32).collect())?;
    NdDataSource::new(flat, &[side, side])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_agree() {
        let file = file_grid(8, PagedConfig::new(16)).unwrap();
        let mem = memory_grid(8).unwrap();
        assert_eq!(file.to_vec().unwrap(), mem.to_vec().unwrap());
    }
}
