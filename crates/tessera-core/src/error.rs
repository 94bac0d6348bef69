//! Error types for the Tessera storage framework.
//!
//! Every variant is a precondition violation detected eagerly at the
//! offending call. Composite sources never translate a constituent's
//! error; the caller sees whatever the innermost component reported.

use std::io;

use thiserror::Error;

/// Errors from sequence storage, decorators and N-dimensional sources.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A flat index is outside `[0, size)`.
    #[error("index {index} out of range for sequence of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: i64,
        /// Size of the sequence that rejected it.
        size: i64,
    },
    /// A per-axis coordinate component is outside `[0, extent)`.
    #[error("coordinate component {value} on axis {axis} out of range [0, {extent})")]
    AxisOutOfRange {
        /// Axis of the offending component.
        axis: usize,
        /// The offending component value.
        value: i64,
        /// Extent of that axis.
        extent: i64,
    },
    /// A coordinate, shape or second source disagrees with the receiver.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What the receiver expected (dimensionality or element count).
        expected: i64,
        /// What it was given.
        actual: i64,
    },
    /// Malformed construction arguments.
    #[error("invalid construction: {reason}")]
    InvalidConstruction {
        /// What went wrong.
        reason: String,
    },
    /// A write to a padded out-of-range position disagreed with the
    /// boundary policy's synthesized value.
    #[error("write at {position} disagrees with boundary policy value")]
    PolicyViolation {
        /// Human-readable position (flat index or coordinate).
        position: String,
    },
    /// The secondary storage medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Shorthand for [`StorageError::InvalidConstruction`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConstruction {
            reason: reason.into(),
        }
    }

    /// Check `0 <= index < size`, returning the bounds error otherwise.
    pub fn check_index(index: i64, size: i64) -> Result<(), Self> {
        if index < 0 || index >= size {
            return Err(Self::IndexOutOfRange { index, size });
        }
        Ok(())
    }
}

/// Errors from coordinate manipulation and sampling construction.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SamplingError {
    /// Two operands have different dimensionality.
    #[error("dimension mismatch: expected {expected}D, got {actual}D")]
    DimensionMismatch {
        /// Dimensionality of the receiver.
        expected: usize,
        /// Dimensionality of the operand.
        actual: usize,
    },
    /// An axis index is not smaller than the dimensionality.
    #[error("axis {axis} out of range for {ndim}D coordinate")]
    AxisOutOfRange {
        /// The offending axis.
        axis: usize,
        /// Dimensionality of the coordinate.
        ndim: usize,
    },
    /// Malformed sampling parameters (zero step counts, bad radii, ...).
    #[error("invalid sampling: {reason}")]
    InvalidConstruction {
        /// What went wrong.
        reason: String,
    },
}

impl SamplingError {
    /// Return `DimensionMismatch` unless `expected == actual`.
    pub fn check_dims(expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            return Err(Self::DimensionMismatch { expected, actual });
        }
        Ok(())
    }
}

impl From<SamplingError> for StorageError {
    fn from(e: SamplingError) -> Self {
        match e {
            SamplingError::DimensionMismatch { expected, actual } => Self::DimensionMismatch {
                expected: expected as i64,
                actual: actual as i64,
            },
            SamplingError::AxisOutOfRange { axis, ndim } => {
                Self::invalid(format!("axis {axis} out of range for {ndim}D coordinate"))
            }
            SamplingError::InvalidConstruction { reason } => Self::InvalidConstruction { reason },
        }
    }
}
