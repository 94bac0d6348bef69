//! IndexedDataSource compliance test helpers.
//!
//! These functions verify that a source satisfies the invariants of the
//! [`IndexedDataSource`] contract. Reused by every backend and decorator
//! test module, and available to downstream implementations.

use crate::source::IndexedDataSource;

/// Assert that `set(i, v); get(i)` yields `v` for every valid index.
///
/// Values are taken from `values` cyclically. Writes all positions first,
/// then reads them all back, so page evictions in between are exercised.
pub fn assert_round_trip<S>(source: &mut S, values: &[S::Item])
where
    S: IndexedDataSource,
    S::Item: Default,
{
    assert!(!values.is_empty(), "round trip needs at least one value");
    let n = source.size();
    for i in 0..n {
        let v = &values[i as usize % values.len()];
        source
            .set(i, v)
            .unwrap_or_else(|e| panic!("set({i}) failed: {e}"));
    }
    for i in 0..n {
        let expected = &values[i as usize % values.len()];
        let got = source
            .read(i)
            .unwrap_or_else(|e| panic!("get({i}) failed: {e}"));
        assert_eq!(&got, expected, "round trip mismatch at index {i}");
    }
}

/// Assert that `size()` does not change across reads and writes.
pub fn assert_size_invariant<S>(source: &mut S, value: &S::Item)
where
    S: IndexedDataSource,
    S::Item: Default,
{
    let before = source.size();
    if before > 0 {
        let mut scratch = S::Item::default();
        source
            .get(0, &mut scratch)
            .unwrap_or_else(|e| panic!("get(0) failed: {e}"));
        source
            .set(before - 1, value)
            .unwrap_or_else(|e| panic!("set({}) failed: {e}", before - 1));
        source
            .get(before / 2, &mut scratch)
            .unwrap_or_else(|e| panic!("get({}) failed: {e}", before / 2));
    }
    assert_eq!(source.size(), before, "size changed after access");
}

/// Assert that `-1` and `size()` are rejected by both `get` and `set`.
pub fn assert_bounds_checked<S>(source: &mut S, value: &S::Item)
where
    S: IndexedDataSource,
    S::Item: Default,
{
    let n = source.size();
    let mut scratch = S::Item::default();
    for bad in [-1, n] {
        assert!(
            source.get(bad, &mut scratch).is_err(),
            "get({bad}) accepted on size {n}"
        );
        assert!(
            source.set(bad, value).is_err(),
            "set({bad}) accepted on size {n}"
        );
    }
}

/// Assert that a duplicate reports the same size and contents.
pub fn assert_duplicate_matches<S>(source: &S)
where
    S: IndexedDataSource,
    S::Item: Default,
{
    let copy = source.duplicate().expect("duplicate failed");
    assert_eq!(copy.size(), source.size(), "duplicate size differs");
    assert_eq!(
        copy.to_vec().expect("read duplicate"),
        source.to_vec().expect("read source"),
        "duplicate contents differ"
    );
}

/// Run all compliance checks on a source.
pub fn run_full_compliance<S>(source: &mut S, values: &[S::Item])
where
    S: IndexedDataSource,
    S::Item: Default,
{
    assert_round_trip(source, values);
    assert_size_invariant(source, &values[0]);
    assert_bounds_checked(source, &values[0]);
    assert_duplicate_matches(source);
}
