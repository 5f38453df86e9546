//! # Marshal-Compatible Types
//!
//! [`VariantType`] is implemented for a closed set of types and sealed, so a
//! generic `T: VariantType` parameter rejects anything else at compile time.
//! User enums join the set through [`variant_enum!`](crate::variant_enum).
//!
//! | Rust type | Marshal kind | Variant kind |
//! |---|---|---|
//! | `bool` | `Boolean` | `Bool` |
//! | `char`, `i8` .. `u64` | `Char`, `SByte` .. `UInt64` | `Int` |
//! | `f32`, `f64` | `Single`, `Double` | `Float` |
//! | `String` | `String` | `String` |
//! | math structs, `Rid` | same name | same name |
//! | `Vec<u8>` .. `Vec<Color>` | `ByteArray` .. `ColorArray` | `Packed*Array` |
//! | `Vec<ObjectRef>` .. `Vec<Rid>` | `ObjectArray` .. `RidArray` | `Array` |
//! | `Variant` | `Variant` | any |

use meridian_math::{
    Aabb, Basis, Color, Plane, Projection, Quaternion, Rect2, Rect2i, Rid, Transform2D, Transform3D, Vector2,
    Vector2i, Vector3, Vector3i, Vector4, Vector4i,
};

use crate::collections::{PackedArray, TypedArray, TypedDictionary, VariantArray, VariantDictionary};
use crate::error::{VariantError, VariantResult};
use crate::interop::{PackedData, Runtime};
use crate::kind::{MarshalKind, VariantKind};
use crate::object::{Callable, ObjectRef, Signal};
use crate::strings::{GString, NodePath, StringName};
use crate::variant::Variant;

/// Seal for [`VariantType`]. Only reachable through a hidden path.
pub trait Sealed {}

/// A type that can be marshaled to and from a [`Variant`].
pub trait VariantType: Sealed + Sized {
    /// Conversion routine for this type.
    const MARSHAL_KIND: MarshalKind;

    /// Converts to a variant. Runtime-owned kinds are created through `rt`.
    ///
    /// # Errors
    ///
    /// Runtime failure, or [`VariantError::OutOfRange`] when the value has no
    /// variant representation.
    fn to_variant(&self, rt: &Runtime) -> VariantResult<Variant>;

    /// Converts from a variant.
    ///
    /// # Errors
    ///
    /// [`VariantError::TypeMismatch`] for another kind,
    /// [`VariantError::OutOfRange`] when narrowing loses information.
    fn from_variant(variant: &Variant) -> VariantResult<Self>;
}

/// The conversion routine `T` marshals through.
#[must_use]
pub const fn marshal_kind_of<T: VariantType>() -> MarshalKind {
    T::MARSHAL_KIND
}

pub(crate) fn mismatch(expected: VariantKind, found: &Variant) -> VariantError {
    VariantError::TypeMismatch { expected, found: found.kind() }
}

/// Reads an `Int` payload. Used by [`variant_enum!`](crate::variant_enum).
///
/// # Errors
///
/// [`VariantError::TypeMismatch`] for any other kind.
#[doc(hidden)]
pub fn expect_int(variant: &Variant) -> VariantResult<i64> {
    match variant {
        Variant::Int(value) => Ok(*value),
        other => Err(mismatch(VariantKind::Int, other)),
    }
}

macro_rules! impl_trivial {
    ($($ty:ty => $marshal:ident, $arm:ident;)*) => {
        $(
            impl Sealed for $ty {}

            impl VariantType for $ty {
                const MARSHAL_KIND: MarshalKind = MarshalKind::$marshal;

                fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
                    Ok(Variant::$arm(*self))
                }

                fn from_variant(variant: &Variant) -> VariantResult<Self> {
                    match variant {
                        Variant::$arm(value) => Ok(*value),
                        other => Err(mismatch(VariantKind::$arm, other)),
                    }
                }
            }
        )*
    };
}

impl_trivial! {
    bool => Boolean, Bool;
    i64 => Int64, Int;
    f64 => Double, Float;
    Vector2 => Vector2, Vector2;
    Vector2i => Vector2i, Vector2i;
    Rect2 => Rect2, Rect2;
    Rect2i => Rect2i, Rect2i;
    Transform2D => Transform2D, Transform2D;
    Vector3 => Vector3, Vector3;
    Vector3i => Vector3i, Vector3i;
    Basis => Basis, Basis;
    Quaternion => Quaternion, Quaternion;
    Transform3D => Transform3D, Transform3D;
    Vector4 => Vector4, Vector4;
    Vector4i => Vector4i, Vector4i;
    Projection => Projection, Projection;
    Aabb => Aabb, Aabb;
    Color => Color, Color;
    Plane => Plane, Plane;
    Rid => Rid, Rid;
}

macro_rules! impl_narrow_int {
    ($($ty:ty => $marshal:ident;)*) => {
        $(
            impl Sealed for $ty {}

            impl VariantType for $ty {
                const MARSHAL_KIND: MarshalKind = MarshalKind::$marshal;

                fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
                    Ok(Variant::Int(i64::from(*self)))
                }

                fn from_variant(variant: &Variant) -> VariantResult<Self> {
                    let value = expect_int(variant)?;
                    <$ty>::try_from(value).map_err(|_| VariantError::OutOfRange {
                        value: i128::from(value),
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_narrow_int! {
    i8 => SByte;
    i16 => Int16;
    i32 => Int32;
    u8 => Byte;
    u16 => UInt16;
    u32 => UInt32;
}

impl Sealed for u64 {}

impl VariantType for u64 {
    const MARSHAL_KIND: MarshalKind = MarshalKind::UInt64;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        i64::try_from(*self)
            .map(Variant::Int)
            .map_err(|_| VariantError::OutOfRange { value: i128::from(*self), target: "i64" })
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        let value = expect_int(variant)?;
        u64::try_from(value).map_err(|_| VariantError::OutOfRange { value: i128::from(value), target: "u64" })
    }
}

impl Sealed for char {}

impl VariantType for char {
    const MARSHAL_KIND: MarshalKind = MarshalKind::Char;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        Ok(Variant::Int(i64::from(u32::from(*self))))
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        let value = expect_int(variant)?;
        u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or(VariantError::OutOfRange { value: i128::from(value), target: "char" })
    }
}

impl Sealed for f32 {}

impl VariantType for f32 {
    const MARSHAL_KIND: MarshalKind = MarshalKind::Single;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        Ok(Variant::Float(f64::from(*self)))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        match variant {
            Variant::Float(value) => Ok(*value as f32),
            other => Err(mismatch(VariantKind::Float, other)),
        }
    }
}

impl Sealed for String {}

/// Any of the three text kinds reads as a `String`.
impl VariantType for String {
    const MARSHAL_KIND: MarshalKind = MarshalKind::String;

    fn to_variant(&self, rt: &Runtime) -> VariantResult<Variant> {
        Ok(Variant::String(GString::new(rt, self)?))
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        let text = match variant {
            Variant::String(s) => s.text(),
            Variant::StringName(n) => n.text(),
            Variant::NodePath(p) => p.text(),
            other => return Err(mismatch(VariantKind::String, other)),
        };
        Ok(text?)
    }
}

macro_rules! impl_owned {
    ($($ty:ident => $marshal:ident, $arm:ident;)*) => {
        $(
            impl Sealed for $ty {}

            impl VariantType for $ty {
                const MARSHAL_KIND: MarshalKind = MarshalKind::$marshal;

                fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
                    Ok(Variant::$arm(self.try_clone()?))
                }

                fn from_variant(variant: &Variant) -> VariantResult<Self> {
                    match variant {
                        Variant::$arm(value) => Ok(value.try_clone()?),
                        other => Err(mismatch(VariantKind::$arm, other)),
                    }
                }
            }
        )*
    };
}

impl_owned! {
    StringName => StringName, StringName;
    NodePath => NodePath, NodePath;
    ObjectRef => Object, Object;
    Callable => Callable, Callable;
    Signal => Signal, Signal;
    VariantDictionary => Dictionary, Dictionary;
    VariantArray => Array, Array;
}

impl Sealed for Variant {}

impl VariantType for Variant {
    const MARSHAL_KIND: MarshalKind = MarshalKind::Variant;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        Ok(self.try_clone()?)
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        Ok(variant.try_clone()?)
    }
}

impl<T: VariantType> Sealed for TypedArray<T> {}

impl<T: VariantType> VariantType for TypedArray<T> {
    const MARSHAL_KIND: MarshalKind = MarshalKind::TypedArray;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        Ok(Variant::Array(self.as_untyped().try_clone()?))
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        match variant {
            Variant::Array(array) => Ok(Self::from_untyped(array.try_clone()?)),
            other => Err(mismatch(VariantKind::Array, other)),
        }
    }
}

impl<K: VariantType, V: VariantType> Sealed for TypedDictionary<K, V> {}

impl<K: VariantType, V: VariantType> VariantType for TypedDictionary<K, V> {
    const MARSHAL_KIND: MarshalKind = MarshalKind::TypedDictionary;

    fn to_variant(&self, _rt: &Runtime) -> VariantResult<Variant> {
        Ok(Variant::Dictionary(self.as_untyped().try_clone()?))
    }

    fn from_variant(variant: &Variant) -> VariantResult<Self> {
        match variant {
            Variant::Dictionary(dictionary) => Ok(Self::from_untyped(dictionary.try_clone()?)),
            other => Err(mismatch(VariantKind::Dictionary, other)),
        }
    }
}

macro_rules! impl_packed {
    ($($elem:ty => $marshal:ident, $data:ident, $kind:ident;)*) => {
        $(
            impl Sealed for Vec<$elem> {}

            impl VariantType for Vec<$elem> {
                const MARSHAL_KIND: MarshalKind = MarshalKind::$marshal;

                fn to_variant(&self, rt: &Runtime) -> VariantResult<Variant> {
                    let packed = PackedArray::new(rt, PackedData::$data(self.clone()))?;
                    Ok(Variant::PackedArray(packed))
                }

                fn from_variant(variant: &Variant) -> VariantResult<Self> {
                    let expected = VariantKind::$kind;
                    match variant {
                        Variant::PackedArray(packed) if packed.kind() == expected => match packed.read()? {
                            PackedData::$data(values) => Ok(values),
                            _ => Err(mismatch(expected, variant)),
                        },
                        other => Err(mismatch(expected, other)),
                    }
                }
            }
        )*
    };
}

impl_packed! {
    u8 => ByteArray, Byte, PackedByteArray;
    i32 => Int32Array, Int32, PackedInt32Array;
    i64 => Int64Array, Int64, PackedInt64Array;
    f32 => Float32Array, Float32, PackedFloat32Array;
    f64 => Float64Array, Float64, PackedFloat64Array;
    String => StringArray, String, PackedStringArray;
    Vector2 => Vector2Array, Vector2, PackedVector2Array;
    Vector3 => Vector3Array, Vector3, PackedVector3Array;
    Vector4 => Vector4Array, Vector4, PackedVector4Array;
    Color => ColorArray, Color, PackedColorArray;
}

macro_rules! impl_element_array {
    ($($elem:ty => $marshal:ident;)*) => {
        $(
            impl Sealed for Vec<$elem> {}

            impl VariantType for Vec<$elem> {
                const MARSHAL_KIND: MarshalKind = MarshalKind::$marshal;

                fn to_variant(&self, rt: &Runtime) -> VariantResult<Variant> {
                    let array = VariantArray::new(rt)?;
                    for element in self {
                        array.push(element.to_variant(rt)?)?;
                    }
                    Ok(Variant::Array(array))
                }

                fn from_variant(variant: &Variant) -> VariantResult<Self> {
                    match variant {
                        Variant::Array(array) => array.iter().map(|v| <$elem>::from_variant(&v?)).collect(),
                        other => Err(mismatch(VariantKind::Array, other)),
                    }
                }
            }
        )*
    };
}

impl_element_array! {
    ObjectRef => ObjectArray;
    StringName => StringNameArray;
    NodePath => NodePathArray;
    Rid => RidArray;
}

/// Declares a fieldless enum that marshals as an `Int` (marshal kind `Enum`).
///
/// The macro derives `Clone`, `Copy`, `Debug`, `PartialEq`, `Eq` and `Hash`.
///
/// ```rust
/// use meridian_variant::{variant_enum, VariantType, Variant};
///
/// variant_enum! {
///     /// Door state.
///     pub enum DoorState {
///         /// Shut.
///         Closed = 0,
///         /// Wide open.
///         Open = 2,
///     }
/// }
///
/// assert_eq!(DoorState::from_variant(&Variant::Int(2)).unwrap(), DoorState::Open);
/// assert!(DoorState::from_variant(&Variant::Int(1)).is_err());
/// ```
#[macro_export]
macro_rules! variant_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $value:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $(= $value)?
            ),+
        }

        impl $crate::__private::Sealed for $name {}

        impl $crate::VariantType for $name {
            const MARSHAL_KIND: $crate::MarshalKind = $crate::MarshalKind::Enum;

            fn to_variant(&self, _rt: &$crate::Runtime) -> $crate::VariantResult<$crate::Variant> {
                ::core::result::Result::Ok($crate::Variant::Int(*self as i64))
            }

            fn from_variant(variant: &$crate::Variant) -> $crate::VariantResult<Self> {
                let value = $crate::__private::expect_int(variant)?;
                $(
                    if value == $name::$variant as i64 {
                        return ::core::result::Result::Ok($name::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::VariantError::OutOfRange {
                    value: i128::from(value),
                    target: ::core::stringify!($name),
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::variant_enum! {
        enum Mode {
            A,
            B,
            C = 7,
        }
    }

    fn accepts<T: VariantType>() -> MarshalKind {
        marshal_kind_of::<T>()
    }

    #[test]
    fn test_marshal_kinds() {
        assert_eq!(accepts::<u16>(), MarshalKind::UInt16);
        assert_eq!(accepts::<Vec<Vector3>>(), MarshalKind::Vector3Array);
        assert_eq!(accepts::<Vec<Rid>>(), MarshalKind::RidArray);
        assert_eq!(accepts::<Mode>(), MarshalKind::Enum);
        assert_eq!(accepts::<TypedArray<i32>>(), MarshalKind::TypedArray);
        assert_eq!(accepts::<Variant>(), MarshalKind::Variant);
    }

    #[test]
    fn test_narrowing_is_checked() {
        assert_eq!(i8::from_variant(&Variant::Int(-128)).unwrap(), -128);
        assert_eq!(
            i8::from_variant(&Variant::Int(200)),
            Err(VariantError::OutOfRange { value: 200, target: "i8" })
        );
        assert!(u32::from_variant(&Variant::Int(-1)).is_err());
        assert!(char::from_variant(&Variant::Int(0xD800)).is_err());
        assert_eq!(char::from_variant(&Variant::Int(65)).unwrap(), 'A');
    }

    #[test]
    fn test_kind_mismatch() {
        assert_eq!(
            Vector3::from_variant(&Variant::Vector2(Vector2::ONE)),
            Err(VariantError::TypeMismatch { expected: VariantKind::Vector3, found: VariantKind::Vector2 })
        );
        assert!(bool::from_variant(&Variant::Int(1)).is_err());
        assert!(f32::from_variant(&Variant::Int(1)).is_err());
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(Mode::from_variant(&Variant::Int(1)).unwrap(), Mode::B);
        assert_eq!(Mode::from_variant(&Variant::Int(7)).unwrap(), Mode::C);
        assert_eq!(
            Mode::from_variant(&Variant::Int(3)),
            Err(VariantError::OutOfRange { value: 3, target: "Mode" })
        );
        assert_eq!(Mode::A as i64, 0);
    }
}
