//! # Meridian Math
//!
//! Geometric value types shared by scripts and the native runtime:
//! - Vectors in 2, 3 and 4 dimensions, real and integer
//! - `Basis`, `Quaternion`, `Transform2D`, `Transform3D`, `Projection`
//! - `Rect2`, `Rect2i`, `Aabb`, `Plane`, `Color`, `Rid`
//!
//! ## Layout Rules
//!
//! 1. **Every type is `#[repr(C)]` and `Pod`** - the runtime reads the bytes as-is
//! 2. **Pure values** - no allocation, no logging, no interior mutability
//! 3. **Engine semantics** - operators and tie-breaks match the native side exactly
//!
//! `Real` is `f32` unless the `double-precision` feature is enabled.
//!
//! ## Example
//!
//! ```rust
//! use meridian_math::{Transform2D, Vector2};
//!
//! let t = Transform2D::IDENTITY.translated(Vector2::new(3.0, 4.0));
//! assert_eq!(t * Vector2::ZERO, Vector2::new(3.0, 4.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::float_cmp, clippy::module_name_repetitions, clippy::many_single_char_names)]

pub mod error;
pub mod mathf;

mod aabb;
mod axis;
mod basis;
mod color;
mod ops;
mod plane;
mod projection;
mod quaternion;
mod rect2;
mod rid;
mod transform2d;
mod transform3d;
mod vector2;
mod vector2i;
mod vector3;
mod vector3i;
mod vector4;
mod vector4i;

pub use aabb::Aabb;
pub use axis::Axis;
pub use basis::Basis;
pub use color::Color;
pub use error::{MathError, MathResult};
pub use mathf::Real;
pub use plane::Plane;
pub use projection::Projection;
pub use quaternion::Quaternion;
pub use rect2::{Rect2, Rect2i};
pub use rid::Rid;
pub use transform2d::Transform2D;
pub use transform3d::Transform3D;
pub use vector2::Vector2;
pub use vector2i::Vector2i;
pub use vector3::Vector3;
pub use vector3i::Vector3i;
pub use vector4::Vector4;
pub use vector4i::Vector4i;
