//! Reusable source fixtures.
//!
//! - [`grid_3x3`]: a 3x3 grid holding `1.0..=9.0` in flat order.
//! - [`counting_array`]: `0..n` as `i64`.
//! - [`counting_virtual`]: the same sequence generated by rule.

use tessera_nd::NdDataSource;
use tessera_storage::{ArrayStorage, VirtualStorage};

/// 3x3 grid with `(x, y) -> 1 + x + 3y`.
///
/// ```text
/// y=2 | 7 8 9
/// y=1 | 4 5 6
/// y=0 | 1 2 3
///       x=0..2
/// ```
pub fn grid_3x3() -> NdDataSource<ArrayStorage<f64>> {
    let flat = ArrayStorage::from_vec((1..=9).map(f64::from).collect())
        .unwrap_or_else(|e| panic!("grid fixture: {e}"));
    NdDataSource::new(flat, &[3, 3]).unwrap_or_else(|e| panic!("grid fixture: {e}"))
}

pub fn counting_array(n: i64) -> ArrayStorage<i64> {
    ArrayStorage::from_vec((0..n).collect()).unwrap_or_else(|e| panic!("counting fixture: {e}"))
}

pub fn counting_virtual(n: i64) -> VirtualStorage<i64, fn(i64, &mut i64)> {
    fn rule(i: i64, out: &mut i64) {
        *out = i;
    }
    VirtualStorage::new(n, rule as fn(i64, &mut i64))
        .unwrap_or_else(|e| panic!("virtual fixture: {e}"))
}
