//! Fixed-arity coordinates in integer or real N-dimensional space.

use std::fmt;

use smallvec::SmallVec;

use crate::error::SamplingError;

/// Scalar type usable as a coordinate component.
pub trait Component: Copy + PartialOrd + Default + fmt::Debug + Send + Sync + 'static {
    /// Smallest representable component value.
    const MIN: Self;
    /// Largest representable component value.
    const MAX: Self;
}

impl Component for i64 {
    const MIN: Self = i64::MIN;
    const MAX: Self = i64::MAX;
}

impl Component for f64 {
    const MIN: Self = f64::MIN;
    const MAX: Self = f64::MAX;
}

/// A point in N-dimensional space with `T`-valued components.
///
/// The dimensionality is fixed at construction. Components are stored in a
/// `SmallVec<[T; 4]>` so coordinates up to 4D never touch the heap. Two
/// coordinates compare equal iff they have the same dimensionality and all
/// components are equal.
///
/// # Examples
///
/// ```
/// use tessera_core::IntegerIndex;
///
/// let mut lo = IntegerIndex::from_slice(&[3, -1]);
/// let other = IntegerIndex::from_slice(&[1, 4]);
/// lo.update_min(&other).unwrap();
/// assert_eq!(lo.as_slice(), &[1, -1]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord<T: Component> {
    components: SmallVec<[T; 4]>,
}

/// Integer-valued coordinate, used to address array elements.
pub type IntegerIndex = Coord<i64>;

/// Real-valued coordinate, produced by polar and real Cartesian grids.
pub type RealIndex = Coord<f64>;

impl<T: Component> Coord<T> {
    /// Create an `n`-dimensional coordinate with every component at its default (zero).
    pub fn new(n: usize) -> Self {
        Self {
            components: SmallVec::from_elem(T::default(), n),
        }
    }

    /// Create a coordinate from a component slice.
    pub fn from_slice(components: &[T]) -> Self {
        Self {
            components: SmallVec::from_slice(components),
        }
    }

    /// Number of components.
    pub fn num_dimensions(&self) -> usize {
        self.components.len()
    }

    /// Component on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.num_dimensions()`.
    pub fn get(&self, axis: usize) -> T {
        self.components[axis]
    }

    /// Overwrite the component on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.num_dimensions()`.
    pub fn set(&mut self, axis: usize, value: T) {
        self.components[axis] = value;
    }

    /// Component on `axis`, or `AxisOutOfRange`.
    pub fn try_get(&self, axis: usize) -> Result<T, SamplingError> {
        self.components
            .get(axis)
            .copied()
            .ok_or(SamplingError::AxisOutOfRange {
                axis,
                ndim: self.components.len(),
            })
    }

    /// Overwrite the component on `axis`, or fail with `AxisOutOfRange`.
    pub fn try_set(&mut self, axis: usize, value: T) -> Result<(), SamplingError> {
        let ndim = self.components.len();
        let slot = self
            .components
            .get_mut(axis)
            .ok_or(SamplingError::AxisOutOfRange { axis, ndim })?;
        *slot = value;
        Ok(())
    }

    /// Set every component to the representable minimum.
    pub fn set_min(&mut self) {
        self.components.fill(T::MIN);
    }

    /// Set every component to the representable maximum.
    pub fn set_max(&mut self) {
        self.components.fill(T::MAX);
    }

    /// Component-wise running minimum: `self[i] = min(self[i], other[i])`.
    pub fn update_min(&mut self, other: &Self) -> Result<(), SamplingError> {
        SamplingError::check_dims(self.num_dimensions(), other.num_dimensions())?;
        for (mine, theirs) in self.components.iter_mut().zip(&other.components) {
            if *theirs < *mine {
                *mine = *theirs;
            }
        }
        Ok(())
    }

    /// Component-wise running maximum: `self[i] = max(self[i], other[i])`.
    pub fn update_max(&mut self, other: &Self) -> Result<(), SamplingError> {
        SamplingError::check_dims(self.num_dimensions(), other.num_dimensions())?;
        for (mine, theirs) in self.components.iter_mut().zip(&other.components) {
            if *theirs > *mine {
                *mine = *theirs;
            }
        }
        Ok(())
    }

    /// Copy all components from `other`, adopting its dimensionality.
    pub fn assign(&mut self, other: &Self) {
        self.components.clear();
        self.components.extend_from_slice(&other.components);
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.components
    }

    /// Components as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.components
    }
}

impl<T: Component> fmt::Debug for Coord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Coord").field(&self.components.as_slice()).finish()
    }
}

impl<T: Component> From<Vec<T>> for Coord<T> {
    fn from(v: Vec<T>) -> Self {
        Self {
            components: SmallVec::from_vec(v),
        }
    }
}

impl<T: Component, const N: usize> From<[T; N]> for Coord<T> {
    fn from(v: [T; N]) -> Self {
        Self::from_slice(&v)
    }
}

/// Behaviour shared by every coordinate type a sampling can produce.
///
/// Lets samplings and bounding computations stay generic over integer and
/// real coordinates.
pub trait Coordinate: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Number of components.
    fn num_dimensions(&self) -> usize;
}

impl<T: Component> Coordinate for Coord<T> {
    fn num_dimensions(&self) -> usize {
        self.components.len()
    }
}
