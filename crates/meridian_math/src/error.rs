//! # Math Error Types
//!
//! Errors reported by checked accessors and by operations that have no
//! meaningful result for some inputs.

use thiserror::Error;

/// Errors that can occur in math operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A component, column or row index was outside the valid range.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The number of addressable elements.
        len: usize,
    },

    /// The matrix determinant is exactly zero.
    #[error("matrix determinant is zero and cannot be inverted")]
    SingularMatrix,

    /// An argument that must be unit length was not.
    #[error("argument `{argument}` is not normalized")]
    NotNormalized {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// A look-at basis cannot be built from the given directions.
    #[error("cannot look at target: {reason}")]
    DegenerateLookAt {
        /// Which input was degenerate.
        reason: &'static str,
    },

    /// Projection parameters describe an empty or inverted frustum.
    #[error("invalid projection: {reason}")]
    InvalidProjection {
        /// Which parameter was out of range.
        reason: &'static str,
    },
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// Panics with a [`MathError::NotNormalized`] message when `$cond` is false.
///
/// Only evaluated with `debug_assertions`; release builds skip the check and
/// the caller gets whatever the arithmetic produces.
macro_rules! debug_check_normalized {
    ($cond:expr, $argument:literal) => {
        #[cfg(debug_assertions)]
        {
            if !$cond {
                panic!(
                    "{}",
                    $crate::error::MathError::NotNormalized { argument: $argument }
                );
            }
        }
    };
}

pub(crate) use debug_check_normalized;
