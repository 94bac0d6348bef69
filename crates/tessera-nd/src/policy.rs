//! Boundary-extension policies.
//!
//! A policy synthesizes the value at a coordinate outside an
//! [`NdDataSource`]'s extent. Constant-style policies ignore the source;
//! index-remapping policies fold the coordinate back inside, axis by axis,
//! and read the element there.
//!
//! | Policy | `n = 3`, coordinate `-1` | coordinate `3` |
//! |---|---|---|
//! | [`CyclicPolicy`] | `2` | `0` |
//! | [`MirrorPolicy`] | `0` | `2` |
//! | [`ClampPolicy`] | `0` | `2` |

use num_traits::Zero;
use tessera_core::{Element, HasNan, IntegerIndex, StorageError};
use tessera_storage::IndexedDataSource;

use crate::source::{NdDataSource, NdView};

/// Synthesizes values for out-of-range coordinates.
///
/// Policies are bound to a source when a
/// [`PaddedNdDataSource`](crate::PaddedNdDataSource) is built, which calls
/// [`validate`](Self::validate) with that source's shape once. After that,
/// [`fill`](Self::fill) is called with the source and any coordinate of the
/// right dimensionality that lies outside it.
pub trait OobPolicy<U: Element> {
    /// Reject shapes this policy cannot serve.
    fn validate(&self, _dims: &[i64]) -> Result<(), StorageError> {
        Ok(())
    }

    /// Write the value for out-of-range `coord` into `out`.
    fn fill<S>(
        &self,
        source: &NdDataSource<S>,
        coord: &IntegerIndex,
        out: &mut U,
    ) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>;

    /// Whether a caller's write of `value` agrees with `synthesized`.
    fn agrees(&self, synthesized: &U, value: &U) -> bool {
        synthesized == value
    }
}

/// Wrap `c` into `[0, n)`, period `n`.
pub fn wrap_axis(c: i64, n: i64) -> i64 {
    c.rem_euclid(n)
}

/// Reflect `c` into `[0, n)`, period `2n`, repeating the edge sample
/// (`-1 -> 0`, `n -> n - 1`).
pub fn mirror_axis(c: i64, n: i64) -> i64 {
    let period = 2 * n as i128;
    let m = (c as i128).rem_euclid(period);
    if m < n as i128 {
        m as i64
    } else {
        (period - 1 - m) as i64
    }
}

/// Clamp `c` into `[0, n)`.
pub fn clamp_axis(c: i64, n: i64) -> i64 {
    c.clamp(0, n - 1)
}

fn require_nonempty(dims: &[i64], policy: &str) -> Result<(), StorageError> {
    if dims.iter().any(|&d| d == 0) {
        return Err(StorageError::invalid(format!(
            "{policy} padding needs an in-bounds element, shape {dims:?} has none"
        )));
    }
    Ok(())
}

fn read_remapped<S>(
    source: &NdDataSource<S>,
    coord: &IntegerIndex,
    out: &mut S::Item,
    remap: fn(i64, i64) -> i64,
) -> Result<(), StorageError>
where
    S: IndexedDataSource,
{
    let mut inside = coord.clone();
    for (c, &d) in inside.as_mut_slice().iter_mut().zip(source.dims()) {
        *c = remap(*c, d);
    }
    source.get_at(&inside, out)
}

/// Returns a fixed value everywhere outside the source.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantPolicy<U> {
    value: U,
}

impl<U: Element> ConstantPolicy<U> {
    /// Pad with `value`.
    pub fn new(value: U) -> Self {
        Self { value }
    }

    /// The padding value.
    pub fn value(&self) -> &U {
        &self.value
    }
}

impl<U: Element> OobPolicy<U> for ConstantPolicy<U> {
    fn fill<S>(&self, _: &NdDataSource<S>, _: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        out.clone_from(&self.value);
        Ok(())
    }
}

/// Returns the element type's zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroPolicy;

impl<U: Element + Zero> OobPolicy<U> for ZeroPolicy {
    fn fill<S>(&self, _: &NdDataSource<S>, _: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        out.set_zero();
        Ok(())
    }
}

/// Returns the element type's NaN.
///
/// Any NaN agrees with the padding on write, regardless of payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NanPolicy;

impl<U: HasNan> OobPolicy<U> for NanPolicy {
    fn fill<S>(&self, _: &NdDataSource<S>, _: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        *out = U::nan();
        Ok(())
    }

    fn agrees(&self, _synthesized: &U, value: &U) -> bool {
        value.is_nan_value()
    }
}

/// Wraps each component modulo its axis extent (periodic tiling).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CyclicPolicy;

impl<U: Element> OobPolicy<U> for CyclicPolicy {
    fn validate(&self, dims: &[i64]) -> Result<(), StorageError> {
        require_nonempty(dims, "cyclic")
    }

    fn fill<S>(&self, source: &NdDataSource<S>, coord: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        read_remapped(source, coord, out, wrap_axis)
    }
}

/// Reflects each component back and forth across its axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirrorPolicy;

impl<U: Element> OobPolicy<U> for MirrorPolicy {
    fn validate(&self, dims: &[i64]) -> Result<(), StorageError> {
        require_nonempty(dims, "mirror")
    }

    fn fill<S>(&self, source: &NdDataSource<S>, coord: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        read_remapped(source, coord, out, mirror_axis)
    }
}

/// Repeats the nearest edge element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClampPolicy;

impl<U: Element> OobPolicy<U> for ClampPolicy {
    fn validate(&self, dims: &[i64]) -> Result<(), StorageError> {
        require_nonempty(dims, "clamp")
    }

    fn fill<S>(&self, source: &NdDataSource<S>, coord: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        read_remapped(source, coord, out, clamp_axis)
    }
}

/// Runtime choice among the value-free policies.
///
/// # Examples
///
/// ```
/// use tessera_core::IntegerIndex;
/// use tessera_nd::{BoundaryBehavior, NdDataSource, NdView, PaddedNdDataSource};
/// use tessera_storage::ArrayStorage;
///
/// let flat = ArrayStorage::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
/// let nd = NdDataSource::new(flat, &[3]).unwrap();
/// let padded = PaddedNdDataSource::new(nd, BoundaryBehavior::Cyclic).unwrap();
/// assert_eq!(padded.read_at(&IntegerIndex::from([-1])).unwrap(), 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryBehavior {
    /// See [`ZeroPolicy`].
    Zero,
    /// See [`CyclicPolicy`].
    Cyclic,
    /// See [`MirrorPolicy`].
    Mirror,
    /// See [`ClampPolicy`].
    Clamp,
}

impl<U: Element + Zero> OobPolicy<U> for BoundaryBehavior {
    fn validate(&self, dims: &[i64]) -> Result<(), StorageError> {
        match self {
            Self::Zero => Ok(()),
            Self::Cyclic => require_nonempty(dims, "cyclic"),
            Self::Mirror => require_nonempty(dims, "mirror"),
            Self::Clamp => require_nonempty(dims, "clamp"),
        }
    }

    fn fill<S>(&self, source: &NdDataSource<S>, coord: &IntegerIndex, out: &mut U) -> Result<(), StorageError>
    where
        S: IndexedDataSource<Item = U>,
    {
        match self {
            Self::Zero => {
                out.set_zero();
                Ok(())
            }
            Self::Cyclic => read_remapped(source, coord, out, wrap_axis),
            Self::Mirror => read_remapped(source, coord, out, mirror_axis),
            Self::Clamp => read_remapped(source, coord, out, clamp_axis),
        }
    }
}
