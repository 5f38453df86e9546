//! # Variant Error Types
//!
//! Failures at the marshaling layer and at the runtime seam.

use thiserror::Error;

use crate::interop::RawHandle;
use crate::kind::VariantKind;

/// Errors reported by a [`NativeInterop`](crate::NativeInterop) runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteropError {
    /// The handle was never issued or has already been released.
    #[error("stale handle {handle}: unknown or already released")]
    StaleHandle {
        /// The offending handle.
        handle: RawHandle,
    },

    /// The handle refers to a payload of another kind.
    #[error("handle {handle} holds {found}, expected {expected}")]
    WrongKind {
        /// The offending handle.
        handle: RawHandle,
        /// What the operation needed.
        expected: &'static str,
        /// What the handle actually holds.
        found: VariantKind,
    },

    /// Array index past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Array length.
        len: usize,
    },

    /// The configured live-handle cap was reached.
    #[error("live handle limit of {limit} reached")]
    HandleLimit {
        /// Configured cap.
        limit: usize,
    },

    /// Invalid runtime configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for runtime calls.
pub type InteropResult<T> = Result<T, InteropError>;

/// Errors converting between Rust values and [`Variant`](crate::Variant)s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    /// The variant holds a different kind than the target type accepts.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the target type accepts.
        expected: VariantKind,
        /// Kind the variant holds.
        found: VariantKind,
    },

    /// A narrowing conversion lost information.
    #[error("value {value} does not fit in {target}")]
    OutOfRange {
        /// The value that was converted.
        value: i128,
        /// Name of the target type.
        target: &'static str,
    },

    /// No exported property with this name.
    #[error("unknown property: {name}")]
    UnknownProperty {
        /// Requested property name.
        name: String,
    },

    /// The runtime rejected the call.
    #[error(transparent)]
    Interop(#[from] InteropError),
}

/// Result type for marshaling operations.
pub type VariantResult<T> = Result<T, VariantError>;
