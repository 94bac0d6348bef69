//! Coordinate-addressed padding.

use tessera_core::{IntegerIndex, StorageError, StorageType};
use tessera_storage::IndexedDataSource;

use crate::policy::OobPolicy;
use crate::source::{NdDataSource, NdView};

/// An [`NdDataSource`] readable at every coordinate of its dimensionality.
///
/// In-bounds coordinates reach the wrapped source. Anything else is
/// answered by the boundary policy `P`. Out-of-bounds positions are
/// read-only: a write there succeeds without storing anything if the
/// policy [`agrees`](OobPolicy::agrees) with the value, and fails with
/// [`StorageError::PolicyViolation`] otherwise.
///
/// Coordinates of the wrong dimensionality are still errors.
#[derive(Clone, Debug)]
pub struct PaddedNdDataSource<S, P> {
    nd: NdDataSource<S>,
    policy: P,
}

impl<S, P> PaddedNdDataSource<S, P>
where
    S: IndexedDataSource,
    P: OobPolicy<S::Item>,
{
    /// Wrap `nd` under `policy`.
    ///
    /// Fails if the policy cannot serve `nd`'s shape, e.g. an index-remapping
    /// policy over an axis of extent 0.
    pub fn new(nd: NdDataSource<S>, policy: P) -> Result<Self, StorageError> {
        policy.validate(nd.dims())?;
        Ok(Self { nd, policy })
    }

    /// Whether `coord` lies inside the wrapped shape.
    pub fn in_bounds(&self, coord: &IntegerIndex) -> bool {
        self.nd.contains(coord)
    }

    /// Borrow the wrapped source.
    pub fn inner(&self) -> &NdDataSource<S> {
        &self.nd
    }

    /// Borrow the policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Unwrap the source and policy.
    pub fn into_inner(self) -> (NdDataSource<S>, P) {
        (self.nd, self.policy)
    }

    fn check_dimensionality(&self, coord: &IntegerIndex) -> Result<(), StorageError> {
        let expected = self.nd.num_dimensions();
        if coord.num_dimensions() != expected {
            return Err(StorageError::DimensionMismatch {
                expected: expected as i64,
                actual: coord.num_dimensions() as i64,
            });
        }
        Ok(())
    }
}

impl<S, P> NdView for PaddedNdDataSource<S, P>
where
    S: IndexedDataSource,
    P: OobPolicy<S::Item>,
{
    type Item = S::Item;

    fn dims(&self) -> &[i64] {
        self.nd.dims()
    }

    fn get_at(&self, coord: &IntegerIndex, out: &mut S::Item) -> Result<(), StorageError> {
        self.check_dimensionality(coord)?;
        if self.nd.contains(coord) {
            self.nd.get_at(coord, out)
        } else {
            self.policy.fill(&self.nd, coord, out)
        }
    }

    fn set_at(&mut self, coord: &IntegerIndex, value: &S::Item) -> Result<(), StorageError> {
        self.check_dimensionality(coord)?;
        if self.nd.contains(coord) {
            return self.nd.set_at(coord, value);
        }
        let mut synthesized = value.clone();
        self.policy.fill(&self.nd, coord, &mut synthesized)?;
        if self.policy.agrees(&synthesized, value) {
            Ok(())
        } else {
            Err(StorageError::PolicyViolation {
                position: format!("{:?}", coord.as_slice()),
            })
        }
    }
}

impl<S, P> IndexedDataSource for PaddedNdDataSource<S, P>
where
    S: IndexedDataSource,
    P: OobPolicy<S::Item> + Clone,
{
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.nd.size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        self.nd.get(index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        self.nd.set(index, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            nd: self.nd.duplicate()?,
            policy: self.policy.clone(),
        })
    }

    fn storage_type(&self) -> StorageType {
        self.nd.storage_type()
    }
}
