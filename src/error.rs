//! Error types for the validated matrix layer.
//!
//! The raw kernels never report errors. Shape and length checks happen once
//! per call in [`crate::matrix`], which returns these instead of panicking.

use std::fmt;

/// Errors that can occur during lanekit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanekitError {
    /// A matrix was requested with a zero row or column count.
    ZeroLength {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A buffer or matrix does not have the length/shape the operation needs.
    Shape {
        /// The shape the operation expected, as `(rows, cols)`.
        expected: (usize, usize),
        /// The shape that was supplied.
        actual: (usize, usize),
        /// Human-readable error message.
        message: String,
    },
    /// Two operands cannot be combined (e.g. contraction dimensions differ).
    Incompatible {
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
        /// Human-readable error message.
        message: String,
    },
    /// A kernel name that does not match any known kernel.
    UnknownKernel {
        /// The name that failed to parse.
        name: String,
    },
}

impl fmt::Display for LanekitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanekitError::ZeroLength { rows, cols } => write!(
                f,
                "Zero length in matrix dimension (rows: {}, cols: {})",
                rows, cols
            ),
            LanekitError::Shape {
                expected,
                actual,
                message,
            } => write!(
                f,
                "Shape mismatch: {} (expected {}x{}, got {}x{})",
                message, expected.0, expected.1, actual.0, actual.1
            ),
            LanekitError::Incompatible {
                left,
                right,
                message,
            } => write!(
                f,
                "Incompatible operands: {} ({}x{} and {}x{})",
                message, left.0, left.1, right.0, right.1
            ),
            LanekitError::UnknownKernel { name } => {
                write!(f, "Unknown kernel: {:?} (expected \"portable\" or \"avx2\")", name)
            }
        }
    }
}

impl std::error::Error for LanekitError {}

/// Result type alias for lanekit operations.
pub type Result<T> = std::result::Result<T, LanekitError>;

/// Creates a zero-length error.
pub fn zero_length_error(rows: usize, cols: usize) -> LanekitError {
    LanekitError::ZeroLength { rows, cols }
}

/// Creates a shape error.
pub fn shape_error(
    expected: (usize, usize),
    actual: (usize, usize),
    message: impl Into<String>,
) -> LanekitError {
    LanekitError::Shape {
        expected,
        actual,
        message: message.into(),
    }
}

/// Creates an incompatible-operands error.
pub fn incompatible_error(
    left: (usize, usize),
    right: (usize, usize),
    message: impl Into<String>,
) -> LanekitError {
    LanekitError::Incompatible {
        left,
        right,
        message: message.into(),
    }
}

/// Creates an unknown-kernel error.
pub fn unknown_kernel_error(name: impl Into<String>) -> LanekitError {
    LanekitError::UnknownKernel { name: name.into() }
}
