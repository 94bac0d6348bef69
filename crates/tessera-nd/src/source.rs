//! Coordinate-addressed views over flat sequences.

use smallvec::SmallVec;
use tessera_core::{Element, IntegerIndex, StorageError, StorageType};
use tessera_sampling::GridSampling;
use tessera_storage::IndexedDataSource;

/// Element access by [`IntegerIndex`] over a fixed shape.
pub trait NdView {
    /// Element type.
    type Item: Element;

    /// Per-axis extents.
    fn dims(&self) -> &[i64];

    /// Number of axes.
    fn num_dimensions(&self) -> usize {
        self.dims().len()
    }

    /// Extent of `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.num_dimensions()`.
    fn dimension(&self, axis: usize) -> i64 {
        self.dims()[axis]
    }

    /// Copy the element at `coord` into `out`.
    fn get_at(&self, coord: &IntegerIndex, out: &mut Self::Item) -> Result<(), StorageError>;

    /// Copy `value` into position `coord`.
    fn set_at(&mut self, coord: &IntegerIndex, value: &Self::Item) -> Result<(), StorageError>;

    /// Read the element at `coord` into a fresh value.
    fn read_at(&self, coord: &IntegerIndex) -> Result<Self::Item, StorageError>
    where
        Self::Item: Default,
    {
        let mut out = Self::Item::default();
        self.get_at(coord, &mut out)?;
        Ok(out)
    }
}

/// A flat sequence addressed by coordinate through a fixed shape.
///
/// Coordinates linearize with axis 0 fastest:
/// `index = c0 + d0 * (c1 + d1 * (c2 + ...))`, which is the visiting order
/// of [`GridSampling`]. The flat sequence must hold exactly
/// `d0 * d1 * ...` elements.
///
/// The flat [`IndexedDataSource`] view stays available, so an
/// `NdDataSource` can itself be wrapped by any flat decorator.
///
/// # Examples
///
/// ```
/// use tessera_core::IntegerIndex;
/// use tessera_nd::{NdDataSource, NdView};
/// use tessera_storage::ArrayStorage;
///
/// let flat = ArrayStorage::from_vec((1..=6).collect::<Vec<i32>>()).unwrap();
/// let nd = NdDataSource::new(flat, &[3, 2]).unwrap();
/// assert_eq!(nd.read_at(&IntegerIndex::from([1, 1])).unwrap(), 5);
/// assert_eq!(nd.index_of(&IntegerIndex::from([2, 1])).unwrap(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct NdDataSource<S> {
    source: S,
    dims: SmallVec<[i64; 4]>,
}

/// Product of `dims`, rejecting negative extents and overflow.
pub(crate) fn element_count(dims: &[i64]) -> Result<i64, StorageError> {
    dims.iter().try_fold(1i64, |acc, &d| {
        if d < 0 {
            return Err(StorageError::invalid(format!(
                "negative extent {d} in shape {dims:?}"
            )));
        }
        acc.checked_mul(d)
            .ok_or_else(|| StorageError::invalid(format!("shape {dims:?} overflows i64")))
    })
}

impl<S: IndexedDataSource> NdDataSource<S> {
    /// View `source` with shape `dims`.
    ///
    /// Fails with `InvalidConstruction` if an extent is negative, the
    /// product overflows, or it differs from `source.size()`.
    pub fn new(source: S, dims: &[i64]) -> Result<Self, StorageError> {
        let count = element_count(dims)?;
        if count != source.size() {
            return Err(StorageError::invalid(format!(
                "shape {dims:?} holds {count} elements but source has {}",
                source.size()
            )));
        }
        Ok(Self {
            source,
            dims: SmallVec::from_slice(dims),
        })
    }

    /// Whether `coord` has the right dimensionality and lies inside the shape.
    pub fn contains(&self, coord: &IntegerIndex) -> bool {
        coord.num_dimensions() == self.dims.len()
            && coord
                .as_slice()
                .iter()
                .zip(&self.dims)
                .all(|(&c, &d)| (0..d).contains(&c))
    }

    /// Flat index of `coord`.
    pub fn index_of(&self, coord: &IntegerIndex) -> Result<i64, StorageError> {
        if coord.num_dimensions() != self.dims.len() {
            return Err(StorageError::DimensionMismatch {
                expected: self.dims.len() as i64,
                actual: coord.num_dimensions() as i64,
            });
        }
        let mut index = 0i64;
        for (axis, (&c, &d)) in coord.as_slice().iter().zip(&self.dims).enumerate().rev() {
            if !(0..d).contains(&c) {
                return Err(StorageError::AxisOutOfRange {
                    axis,
                    value: c,
                    extent: d,
                });
            }
            index = index * d + c;
        }
        Ok(index)
    }

    /// Write the coordinate of flat `index` into `coord`, resizing it to
    /// this shape's dimensionality if needed.
    pub fn coord_of(&self, index: i64, coord: &mut IntegerIndex) -> Result<(), StorageError> {
        StorageError::check_index(index, self.source.size())?;
        if coord.num_dimensions() != self.dims.len() {
            *coord = IntegerIndex::new(self.dims.len());
        }
        let mut rest = index;
        for (c, &d) in coord.as_mut_slice().iter_mut().zip(&self.dims) {
            *c = rest % d;
            rest /= d;
        }
        Ok(())
    }

    /// Change the shape to `dims`, which must hold the same element count.
    pub fn reshape(&mut self, dims: &[i64]) -> Result<(), StorageError> {
        let count = element_count(dims)?;
        if count != self.source.size() {
            return Err(StorageError::DimensionMismatch {
                expected: self.source.size(),
                actual: count,
            });
        }
        self.dims = SmallVec::from_slice(dims);
        Ok(())
    }

    /// Grid sampling of every valid coordinate, in flat-index order.
    pub fn grid(&self) -> Result<GridSampling, StorageError> {
        Ok(GridSampling::from_dims(&self.dims)?)
    }

    /// Borrow the flat sequence.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the flat sequence.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap the flat sequence.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: IndexedDataSource> NdView for NdDataSource<S> {
    type Item = S::Item;

    fn dims(&self) -> &[i64] {
        &self.dims
    }

    fn get_at(&self, coord: &IntegerIndex, out: &mut S::Item) -> Result<(), StorageError> {
        let index = self.index_of(coord)?;
        self.source.get(index, out)
    }

    fn set_at(&mut self, coord: &IntegerIndex, value: &S::Item) -> Result<(), StorageError> {
        let index = self.index_of(coord)?;
        self.source.set(index, value)
    }
}

impl<S: IndexedDataSource> IndexedDataSource for NdDataSource<S> {
    type Item = S::Item;

    fn size(&self) -> i64 {
        self.source.size()
    }

    fn get(&self, index: i64, out: &mut S::Item) -> Result<(), StorageError> {
        self.source.get(index, out)
    }

    fn set(&mut self, index: i64, value: &S::Item) -> Result<(), StorageError> {
        self.source.set(index, value)
    }

    fn duplicate(&self) -> Result<Self, StorageError> {
        Ok(Self {
            source: self.source.duplicate()?,
            dims: self.dims.clone(),
        })
    }

    fn storage_type(&self) -> StorageType {
        self.source.storage_type()
    }
}
