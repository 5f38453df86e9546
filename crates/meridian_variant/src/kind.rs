//! # Kind Tags
//!
//! Two closed tag sets describe every value that crosses the boundary:
//! - [`VariantKind`]: the runtime's own type tag, stored next to each payload
//! - [`MarshalKind`]: how a Rust type is converted, chosen at compile time
//!
//! Several marshal kinds collapse onto one variant kind (every integer width
//! becomes `Int`, object arrays become `Array`).

use std::fmt;

/// The runtime's type tag. Discriminants follow the native enum.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantKind {
    /// No value.
    Nil = 0,
    /// `bool`
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Runtime-owned string.
    String,
    /// `Vector2`
    Vector2,
    /// `Vector2i`
    Vector2i,
    /// `Rect2`
    Rect2,
    /// `Rect2i`
    Rect2i,
    /// `Vector3`
    Vector3,
    /// `Vector3i`
    Vector3i,
    /// `Transform2D`
    Transform2D,
    /// `Vector4`
    Vector4,
    /// `Vector4i`
    Vector4i,
    /// `Plane`
    Plane,
    /// `Quaternion`
    Quaternion,
    /// `Aabb`
    Aabb,
    /// `Basis`
    Basis,
    /// `Transform3D`
    Transform3D,
    /// `Projection`
    Projection,
    /// `Color`
    Color,
    /// Interned name.
    StringName,
    /// Scene tree path.
    NodePath,
    /// Server resource id.
    Rid,
    /// Object reference.
    Object,
    /// Bound method.
    Callable,
    /// Object signal.
    Signal,
    /// Ordered map of variants.
    Dictionary,
    /// Sequence of variants.
    Array,
    /// Packed `u8` array.
    PackedByteArray,
    /// Packed `i32` array.
    PackedInt32Array,
    /// Packed `i64` array.
    PackedInt64Array,
    /// Packed `f32` array.
    PackedFloat32Array,
    /// Packed `f64` array.
    PackedFloat64Array,
    /// Packed string array.
    PackedStringArray,
    /// Packed `Vector2` array.
    PackedVector2Array,
    /// Packed `Vector3` array.
    PackedVector3Array,
    /// Packed `Color` array.
    PackedColorArray,
    /// Packed `Vector4` array.
    PackedVector4Array,
}

impl VariantKind {
    /// Returns `true` when a value of this kind is copied bit-for-bit with no
    /// runtime call. Every fixed-layout struct kind qualifies.
    #[must_use]
    pub const fn is_trivially_copyable(self) -> bool {
        !matches!(
            self,
            Self::String
                | Self::StringName
                | Self::NodePath
                | Self::Object
                | Self::Callable
                | Self::Signal
                | Self::Dictionary
                | Self::Array
        ) && !self.is_packed_array()
    }

    /// Returns `true` for the `Packed*Array` kinds.
    #[must_use]
    pub const fn is_packed_array(self) -> bool {
        matches!(
            self,
            Self::PackedByteArray
                | Self::PackedInt32Array
                | Self::PackedInt64Array
                | Self::PackedFloat32Array
                | Self::PackedFloat64Array
                | Self::PackedStringArray
                | Self::PackedVector2Array
                | Self::PackedVector3Array
                | Self::PackedColorArray
                | Self::PackedVector4Array
        )
    }

    /// Native type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "Nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "String",
            Self::Vector2 => "Vector2",
            Self::Vector2i => "Vector2i",
            Self::Rect2 => "Rect2",
            Self::Rect2i => "Rect2i",
            Self::Vector3 => "Vector3",
            Self::Vector3i => "Vector3i",
            Self::Transform2D => "Transform2D",
            Self::Vector4 => "Vector4",
            Self::Vector4i => "Vector4i",
            Self::Plane => "Plane",
            Self::Quaternion => "Quaternion",
            Self::Aabb => "AABB",
            Self::Basis => "Basis",
            Self::Transform3D => "Transform3D",
            Self::Projection => "Projection",
            Self::Color => "Color",
            Self::StringName => "StringName",
            Self::NodePath => "NodePath",
            Self::Rid => "RID",
            Self::Object => "Object",
            Self::Callable => "Callable",
            Self::Signal => "Signal",
            Self::Dictionary => "Dictionary",
            Self::Array => "Array",
            Self::PackedByteArray => "PackedByteArray",
            Self::PackedInt32Array => "PackedInt32Array",
            Self::PackedInt64Array => "PackedInt64Array",
            Self::PackedFloat32Array => "PackedFloat32Array",
            Self::PackedFloat64Array => "PackedFloat64Array",
            Self::PackedStringArray => "PackedStringArray",
            Self::PackedVector2Array => "PackedVector2Array",
            Self::PackedVector3Array => "PackedVector3Array",
            Self::PackedColorArray => "PackedColorArray",
            Self::PackedVector4Array => "PackedVector4Array",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion routine for a marshal-compatible Rust type.
///
/// Closed: a type either maps to one of these or cannot cross the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarshalKind {
    /// `bool`
    Boolean,
    /// `char`, carried as an int code point
    Char,
    /// `i8`
    SByte,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u8`
    Byte,
    /// `u16`
    UInt16,
    /// `u32`
    UInt32,
    /// `u64`
    UInt64,
    /// `f32`
    Single,
    /// `f64`
    Double,
    /// `String`
    String,
    /// `Vector2`
    Vector2,
    /// `Vector2i`
    Vector2i,
    /// `Rect2`
    Rect2,
    /// `Rect2i`
    Rect2i,
    /// `Transform2D`
    Transform2D,
    /// `Vector3`
    Vector3,
    /// `Vector3i`
    Vector3i,
    /// `Basis`
    Basis,
    /// `Quaternion`
    Quaternion,
    /// `Transform3D`
    Transform3D,
    /// `Vector4`
    Vector4,
    /// `Vector4i`
    Vector4i,
    /// `Projection`
    Projection,
    /// `Aabb`
    Aabb,
    /// `Color`
    Color,
    /// `Plane`
    Plane,
    /// `Callable`
    Callable,
    /// `Signal`
    Signal,
    /// Enum declared through `variant_enum!`, carried as an int.
    Enum,
    /// `Vec<u8>`
    ByteArray,
    /// `Vec<i32>`
    Int32Array,
    /// `Vec<i64>`
    Int64Array,
    /// `Vec<f32>`
    Float32Array,
    /// `Vec<f64>`
    Float64Array,
    /// `Vec<String>`
    StringArray,
    /// `Vec<Vector2>`
    Vector2Array,
    /// `Vec<Vector3>`
    Vector3Array,
    /// `Vec<Vector4>`
    Vector4Array,
    /// `Vec<Color>`
    ColorArray,
    /// `Vec<ObjectRef>`
    ObjectArray,
    /// `Vec<StringName>`
    StringNameArray,
    /// `Vec<NodePath>`
    NodePathArray,
    /// `Vec<Rid>`
    RidArray,
    /// `Variant` itself, passed through unchanged.
    Variant,
    /// `ObjectRef`
    Object,
    /// `StringName`
    StringName,
    /// `NodePath`
    NodePath,
    /// `Rid`
    Rid,
    /// `VariantDictionary`
    Dictionary,
    /// `VariantArray`
    Array,
    /// `TypedDictionary<K, V>`
    TypedDictionary,
    /// `TypedArray<T>`
    TypedArray,
}

impl MarshalKind {
    /// The runtime tag values of this marshal kind are stored under.
    /// `None` for [`MarshalKind::Variant`], which carries any kind.
    #[must_use]
    pub const fn variant_kind(self) -> Option<VariantKind> {
        Some(match self {
            Self::Variant => return None,
            Self::Boolean => VariantKind::Bool,
            Self::Char
            | Self::SByte
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Byte
            | Self::UInt16
            | Self::UInt32
            | Self::UInt64
            | Self::Enum => VariantKind::Int,
            Self::Single | Self::Double => VariantKind::Float,
            Self::String => VariantKind::String,
            Self::Vector2 => VariantKind::Vector2,
            Self::Vector2i => VariantKind::Vector2i,
            Self::Rect2 => VariantKind::Rect2,
            Self::Rect2i => VariantKind::Rect2i,
            Self::Transform2D => VariantKind::Transform2D,
            Self::Vector3 => VariantKind::Vector3,
            Self::Vector3i => VariantKind::Vector3i,
            Self::Basis => VariantKind::Basis,
            Self::Quaternion => VariantKind::Quaternion,
            Self::Transform3D => VariantKind::Transform3D,
            Self::Vector4 => VariantKind::Vector4,
            Self::Vector4i => VariantKind::Vector4i,
            Self::Projection => VariantKind::Projection,
            Self::Aabb => VariantKind::Aabb,
            Self::Color => VariantKind::Color,
            Self::Plane => VariantKind::Plane,
            Self::Callable => VariantKind::Callable,
            Self::Signal => VariantKind::Signal,
            Self::ByteArray => VariantKind::PackedByteArray,
            Self::Int32Array => VariantKind::PackedInt32Array,
            Self::Int64Array => VariantKind::PackedInt64Array,
            Self::Float32Array => VariantKind::PackedFloat32Array,
            Self::Float64Array => VariantKind::PackedFloat64Array,
            Self::StringArray => VariantKind::PackedStringArray,
            Self::Vector2Array => VariantKind::PackedVector2Array,
            Self::Vector3Array => VariantKind::PackedVector3Array,
            Self::Vector4Array => VariantKind::PackedVector4Array,
            Self::ColorArray => VariantKind::PackedColorArray,
            Self::ObjectArray
            | Self::StringNameArray
            | Self::NodePathArray
            | Self::RidArray
            | Self::Array
            | Self::TypedArray => VariantKind::Array,
            Self::Object => VariantKind::Object,
            Self::StringName => VariantKind::StringName,
            Self::NodePath => VariantKind::NodePath,
            Self::Rid => VariantKind::Rid,
            Self::Dictionary | Self::TypedDictionary => VariantKind::Dictionary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_kinds() {
        assert!(VariantKind::Nil.is_trivially_copyable());
        assert!(VariantKind::Transform3D.is_trivially_copyable());
        assert!(VariantKind::Projection.is_trivially_copyable());
        assert!(VariantKind::Rid.is_trivially_copyable());
        assert!(!VariantKind::String.is_trivially_copyable());
        assert!(!VariantKind::Array.is_trivially_copyable());
        assert!(!VariantKind::PackedVector4Array.is_trivially_copyable());
    }

    #[test]
    fn test_native_discriminants() {
        assert_eq!(VariantKind::Nil as i32, 0);
        assert_eq!(VariantKind::String as i32, 4);
        assert_eq!(VariantKind::Color as i32, 20);
        assert_eq!(VariantKind::Array as i32, 28);
        assert_eq!(VariantKind::PackedVector4Array as i32, 38);
    }

    #[test]
    fn test_marshal_kinds_collapse() {
        assert_eq!(MarshalKind::UInt16.variant_kind(), Some(VariantKind::Int));
        assert_eq!(MarshalKind::Enum.variant_kind(), Some(VariantKind::Int));
        assert_eq!(MarshalKind::RidArray.variant_kind(), Some(VariantKind::Array));
        assert_eq!(MarshalKind::TypedDictionary.variant_kind(), Some(VariantKind::Dictionary));
        assert_eq!(MarshalKind::Variant.variant_kind(), None);
        assert_eq!(VariantKind::Aabb.to_string(), "AABB");
    }
}
