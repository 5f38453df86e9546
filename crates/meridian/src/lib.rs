//! # Meridian
//!
//! Script-side bindings to the engine, in one crate.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        SCRIPT CODE                       │
//! │   export_properties!  variant_enum!  templates/          │
//! ├──────────────────────────────────────────────────────────┤
//! │  meridian_variant                                        │
//! │   Variant ── VariantType ── NativeInterop ── HostHeap    │
//! ├──────────────────────────────────────────────────────────┤
//! │  meridian_math                                           │
//! │   Vector*  Basis  Transform*  Projection  Aabb  Color    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `math`: value types shared bit-for-bit with the runtime
//! - `variant`: marshaling and runtime-owned handles
//! - `templates`: starter scripts for new classes
//! - `movement`: the velocity step behind the basic-movement template
//!
//! ## Example
//!
//! ```rust
//! use meridian::templates::{builtin_templates, TemplateContext};
//!
//! let registry = builtin_templates().unwrap();
//! let source = registry
//!     .get("CharacterBody3D/basic_movement")
//!     .unwrap()
//!     .render(&TemplateContext::new("Player", "CharacterBody3D"))
//!     .unwrap();
//! assert!(source.contains("pub struct Player"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions, clippy::float_cmp)]

pub mod error;
pub mod movement;
pub mod templates;

pub use meridian_math as math;
pub use meridian_variant as variant;

pub use error::{TemplateError, TemplateResult};
pub use meridian_variant::{export_properties, variant_enum};
pub use movement::{basic_movement_step, BasicMovement, BodyState, MovementInput};
pub use templates::{builtin_templates, ScriptTemplate, TemplateContext, TemplateRegistry};

/// Everything a script usually needs.
pub mod prelude {
    pub use meridian_math::{
        Aabb, Basis, Color, Plane, Projection, Quaternion, Real, Rect2, Rect2i, Rid, Transform2D, Transform3D,
        Vector2, Vector2i, Vector3, Vector3i, Vector4, Vector4i,
    };
    pub use meridian_variant::{
        export_properties, variant_enum, Callable, GString, NodePath, ObjectRef, Runtime, ScriptProperties, Signal,
        StringName, TypedArray, TypedDictionary, Variant, VariantArray, VariantDictionary, VariantType,
    };
}
