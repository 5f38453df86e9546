//! # Meridian Variant
//!
//! Marshaling between script values and the native runtime.
//!
//! ## Ownership Rules
//!
//! 1. **Trivial kinds are plain values** - numbers and every math struct copy
//!    bit-for-bit and never call the runtime
//! 2. **Everything else is a handle** - strings, names, paths, objects,
//!    collections and packed arrays belong to the runtime
//! 3. **One call per copy, one per drop** - `Clone` calls `new_copy` once,
//!    `Drop` calls `destroy` once
//! 4. **Closed type set** - only [`VariantType`] implementors marshal, and the
//!    trait is sealed
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use meridian_math::Vector3;
//! use meridian_variant::{HostHeap, Variant, VariantArray};
//!
//! let heap = Arc::new(HostHeap::new());
//! let rt = heap.runtime();
//!
//! let array = VariantArray::new(&rt).unwrap();
//! array.push(Variant::from(Vector3::UP)).unwrap();
//! assert_eq!(array.get(0).unwrap(), Variant::Vector3(Vector3::UP));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions, clippy::float_cmp)]

pub mod error;

mod collections;
mod config;
mod convert;
mod host;
mod interop;
mod kind;
mod object;
mod properties;
mod slots;
mod strings;
mod variant;

pub use collections::{PackedArray, TypedArray, TypedDictionary, VariantArray, VariantDictionary};
pub use config::RuntimeConfig;
pub use convert::{marshal_kind_of, VariantType};
pub use error::{InteropError, InteropResult, VariantError, VariantResult};
pub use host::{HeapStats, HostHeap};
pub use interop::{NativeHandle, NativeInterop, PackedData, RawHandle, RawVariant, Runtime};
pub use kind::{MarshalKind, VariantKind};
pub use object::{Callable, ObjectRef, Signal};
pub use properties::{PropertyInfo, ScriptProperties};
pub use strings::{GString, NodePath, StringName};
pub use variant::Variant;

/// Support items for `variant_enum!` and `export_properties!` only.
///
/// Not public API: implementing `Sealed` by hand puts a type outside the
/// closed marshaling set and is unsupported.
#[doc(hidden)]
pub mod __private {
    pub use crate::convert::{expect_int, Sealed};
}
