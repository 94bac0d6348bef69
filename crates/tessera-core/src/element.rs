//! Capabilities the storage core requires of an element type.
//!
//! Numeric types are opaque to storage: it only needs to construct,
//! assign and compare them. Boundary policies that synthesize special
//! values ask for more through [`HasNan`] or `num_traits::Zero`.

use std::fmt;

use num_complex::Complex;

/// An element storable in any sequence.
///
/// Blanket-implemented for every `Clone + PartialEq + Debug` type.
/// Assignment is `Clone::clone_from`, equality is `PartialEq`.
pub trait Element: Clone + PartialEq + fmt::Debug {}

impl<T: Clone + PartialEq + fmt::Debug> Element for T {}

/// Element types that admit a NaN value.
pub trait HasNan: Element {
    /// The NaN value of this type.
    fn nan() -> Self;

    /// Whether `self` is NaN.
    fn is_nan_value(&self) -> bool;
}

impl HasNan for f32 {
    fn nan() -> Self {
        f32::NAN
    }

    fn is_nan_value(&self) -> bool {
        self.is_nan()
    }
}

impl HasNan for f64 {
    fn nan() -> Self {
        f64::NAN
    }

    fn is_nan_value(&self) -> bool {
        self.is_nan()
    }
}

impl HasNan for Complex<f32> {
    fn nan() -> Self {
        Complex::new(f32::NAN, f32::NAN)
    }

    fn is_nan_value(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}

impl HasNan for Complex<f64> {
    fn nan() -> Self {
        Complex::new(f64::NAN, f64::NAN)
    }

    fn is_nan_value(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}
