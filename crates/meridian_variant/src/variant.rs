//! # Variant
//!
//! Tagged union over every value that can cross the native boundary.
//!
//! ## Copy Rules
//!
//! 1. **Trivial kinds** (`Nil` through `Rid`) copy bit-for-bit, no runtime call
//! 2. **Runtime-owned kinds** copy with exactly one `new_copy`
//! 3. **Drop** releases an owned handle exactly once

use std::sync::Arc;

use meridian_math::{
    Aabb, Basis, Color, Plane, Projection, Quaternion, Rect2, Rect2i, Rid, Transform2D, Transform3D, Vector2,
    Vector2i, Vector3, Vector3i, Vector4, Vector4i,
};

use crate::collections::{PackedArray, VariantArray, VariantDictionary};
use crate::convert::VariantType;
use crate::error::{InteropResult, VariantResult};
use crate::interop::{NativeHandle, RawVariant, Runtime};
use crate::kind::VariantKind;
use crate::object::{Callable, ObjectRef, Signal};
use crate::strings::{GString, NodePath, StringName};

/// A value of any marshal-compatible kind.
#[derive(Clone, Debug, Default)]
pub enum Variant {
    /// No value.
    #[default]
    Nil,
    /// `bool`
    Bool(bool),
    /// Integer of any width.
    Int(i64),
    /// Float of any width.
    Float(f64),
    /// `Vector2`
    Vector2(Vector2),
    /// `Vector2i`
    Vector2i(Vector2i),
    /// `Rect2`
    Rect2(Rect2),
    /// `Rect2i`
    Rect2i(Rect2i),
    /// `Vector3`
    Vector3(Vector3),
    /// `Vector3i`
    Vector3i(Vector3i),
    /// `Transform2D`
    Transform2D(Transform2D),
    /// `Vector4`
    Vector4(Vector4),
    /// `Vector4i`
    Vector4i(Vector4i),
    /// `Plane`
    Plane(Plane),
    /// `Quaternion`
    Quaternion(Quaternion),
    /// `Aabb`
    Aabb(Aabb),
    /// `Basis`
    Basis(Basis),
    /// `Transform3D`
    Transform3D(Transform3D),
    /// `Projection`
    Projection(Projection),
    /// `Color`
    Color(Color),
    /// `Rid`
    Rid(Rid),
    /// Runtime string.
    String(GString),
    /// Interned name.
    StringName(StringName),
    /// Scene tree path.
    NodePath(NodePath),
    /// Object reference.
    Object(ObjectRef),
    /// Bound method.
    Callable(Callable),
    /// Object signal.
    Signal(Signal),
    /// Dictionary.
    Dictionary(VariantDictionary),
    /// Array.
    Array(VariantArray),
    /// Any `Packed*Array`.
    PackedArray(PackedArray),
}

macro_rules! impl_from_trivial {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

impl_from_trivial!(
    Vector2, Vector2i, Rect2, Rect2i, Vector3, Vector3i, Transform2D, Vector4, Vector4i, Plane, Quaternion, Aabb,
    Basis, Transform3D, Projection, Color, Rid,
);

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl Variant {
    /// Runtime tag of the payload.
    #[must_use]
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Nil => VariantKind::Nil,
            Self::Bool(_) => VariantKind::Bool,
            Self::Int(_) => VariantKind::Int,
            Self::Float(_) => VariantKind::Float,
            Self::Vector2(_) => VariantKind::Vector2,
            Self::Vector2i(_) => VariantKind::Vector2i,
            Self::Rect2(_) => VariantKind::Rect2,
            Self::Rect2i(_) => VariantKind::Rect2i,
            Self::Vector3(_) => VariantKind::Vector3,
            Self::Vector3i(_) => VariantKind::Vector3i,
            Self::Transform2D(_) => VariantKind::Transform2D,
            Self::Vector4(_) => VariantKind::Vector4,
            Self::Vector4i(_) => VariantKind::Vector4i,
            Self::Plane(_) => VariantKind::Plane,
            Self::Quaternion(_) => VariantKind::Quaternion,
            Self::Aabb(_) => VariantKind::Aabb,
            Self::Basis(_) => VariantKind::Basis,
            Self::Transform3D(_) => VariantKind::Transform3D,
            Self::Projection(_) => VariantKind::Projection,
            Self::Color(_) => VariantKind::Color,
            Self::Rid(_) => VariantKind::Rid,
            Self::String(_) => VariantKind::String,
            Self::StringName(_) => VariantKind::StringName,
            Self::NodePath(_) => VariantKind::NodePath,
            Self::Object(_) => VariantKind::Object,
            Self::Callable(_) => VariantKind::Callable,
            Self::Signal(_) => VariantKind::Signal,
            Self::Dictionary(_) => VariantKind::Dictionary,
            Self::Array(_) => VariantKind::Array,
            Self::PackedArray(p) => p.kind(),
        }
    }

    /// Returns `true` for [`Variant::Nil`].
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Converts a marshal-compatible value; the routine is chosen by
    /// `T::MARSHAL_KIND`.
    ///
    /// # Errors
    ///
    /// Runtime failure for runtime-owned kinds, or
    /// [`VariantError::OutOfRange`](crate::VariantError::OutOfRange) for a
    /// `u64` above `i64::MAX`.
    pub fn from_marshaled<T: VariantType>(value: &T, rt: &Runtime) -> VariantResult<Self> {
        value.to_variant(rt)
    }

    /// Converts back to a marshal-compatible type.
    ///
    /// # Errors
    ///
    /// [`VariantError::TypeMismatch`](crate::VariantError::TypeMismatch) or
    /// [`VariantError::OutOfRange`](crate::VariantError::OutOfRange).
    pub fn to_marshaled<T: VariantType>(&self) -> VariantResult<T> {
        T::from_variant(self)
    }

    /// Copies the variant, reporting a failed runtime copy instead of
    /// degrading to a null handle like `Clone` does.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        Ok(match self {
            Self::String(s) => Self::String(s.try_clone()?),
            Self::StringName(n) => Self::StringName(n.try_clone()?),
            Self::NodePath(p) => Self::NodePath(p.try_clone()?),
            Self::Object(o) => Self::Object(o.try_clone()?),
            Self::Callable(c) => Self::Callable(c.try_clone()?),
            Self::Signal(s) => Self::Signal(s.try_clone()?),
            Self::Dictionary(d) => Self::Dictionary(d.try_clone()?),
            Self::Array(a) => Self::Array(a.try_clone()?),
            Self::PackedArray(p) => Self::PackedArray(p.try_clone()?),
            trivial => trivial.clone(),
        })
    }

    /// Hands the payload over in wire form. An owned handle moves into the
    /// returned value without being released.
    #[must_use]
    pub fn into_raw(self) -> RawVariant {
        let kind = self.kind();
        let handle = match self {
            Self::String(s) => s.into_raw(),
            Self::StringName(n) => n.into_raw(),
            Self::NodePath(p) => p.into_raw(),
            Self::Object(o) => o.into_raw(),
            Self::Callable(c) => c.into_raw(),
            Self::Signal(s) => s.into_raw(),
            Self::Dictionary(d) => d.into_raw(),
            Self::Array(a) => a.into_raw(),
            Self::PackedArray(p) => p.into_raw(),
            trivial => return RawVariant::inline(trivial),
        };
        RawVariant::owned(kind, handle)
    }

    /// Takes ownership of a payload in wire form.
    #[must_use]
    pub fn from_raw(raw: RawVariant, rt: &Runtime) -> Self {
        let (kind, handle) = match raw.into_inline() {
            Ok(value) => return value,
            Err(owned) => owned,
        };
        let owned = || NativeHandle::from_owned(Arc::clone(rt), handle);
        match kind {
            VariantKind::String => Self::String(GString::from_handle(owned())),
            VariantKind::StringName => Self::StringName(StringName::from_raw(rt, handle)),
            VariantKind::NodePath => Self::NodePath(NodePath::from_raw(rt, handle)),
            VariantKind::Object => Self::Object(ObjectRef::from_handle(owned())),
            VariantKind::Callable => Self::Callable(Callable::from_handle(owned())),
            VariantKind::Signal => Self::Signal(Signal::from_handle(owned())),
            VariantKind::Dictionary => Self::Dictionary(VariantDictionary::from_handle(owned())),
            VariantKind::Array => Self::Array(VariantArray::from_handle(owned())),
            packed if packed.is_packed_array() => Self::PackedArray(PackedArray::from_handle(owned(), packed)),
            trivial => {
                tracing::error!(kind = %trivial, handle = %handle, "handle carried under a trivial kind");
                drop(owned());
                Self::Nil
            }
        }
    }

    /// Borrowed wire view for lookups. Never hand this to a consuming call.
    pub(crate) fn raw_view(&self) -> RawVariant {
        let handle = match self {
            Self::String(s) => s.raw(),
            Self::StringName(n) => n.raw(),
            Self::NodePath(p) => p.raw(),
            Self::Object(o) => o.raw(),
            Self::Callable(c) => c.raw(),
            Self::Signal(s) => s.raw(),
            Self::Dictionary(d) => d.raw(),
            Self::Array(a) => a.raw(),
            Self::PackedArray(p) => p.raw(),
            trivial => return RawVariant::inline(trivial.clone()),
        };
        RawVariant::owned(self.kind(), handle)
    }
}

/// Trivial kinds compare by value. Runtime-owned kinds compare by payload, so a
/// copy equals its source; text kinds also compare equal on equal text.
impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Vector2(a), Self::Vector2(b)) => a == b,
            (Self::Vector2i(a), Self::Vector2i(b)) => a == b,
            (Self::Rect2(a), Self::Rect2(b)) => a == b,
            (Self::Rect2i(a), Self::Rect2i(b)) => a == b,
            (Self::Vector3(a), Self::Vector3(b)) => a == b,
            (Self::Vector3i(a), Self::Vector3i(b)) => a == b,
            (Self::Transform2D(a), Self::Transform2D(b)) => a == b,
            (Self::Vector4(a), Self::Vector4(b)) => a == b,
            (Self::Vector4i(a), Self::Vector4i(b)) => a == b,
            (Self::Plane(a), Self::Plane(b)) => a == b,
            (Self::Quaternion(a), Self::Quaternion(b)) => a == b,
            (Self::Aabb(a), Self::Aabb(b)) => a == b,
            (Self::Basis(a), Self::Basis(b)) => a == b,
            (Self::Transform3D(a), Self::Transform3D(b)) => a == b,
            (Self::Projection(a), Self::Projection(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a == b,
            (Self::Rid(a), Self::Rid(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::StringName(a), Self::StringName(b)) => a == b,
            (Self::NodePath(a), Self::NodePath(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => a == b,
            (Self::Signal(a), Self::Signal(b)) => a == b,
            (Self::Dictionary(a), Self::Dictionary(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::PackedArray(a), Self::PackedArray(b)) => a == b,
            _ => false,
        }
    }
}
