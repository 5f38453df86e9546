//! # Exported Properties
//!
//! Glue between a script class and the editor: which fields are visible,
//! their kinds and defaults, and typed get/set through [`Variant`].
//!
//! [`export_properties!`](crate::export_properties) generates all of it from
//! one struct declaration.

use crate::convert::VariantType;
use crate::error::VariantResult;
use crate::interop::Runtime;
use crate::kind::{MarshalKind, VariantKind};
use crate::variant::Variant;

/// One exported property as the editor sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyInfo {
    /// Field name.
    pub name: &'static str,
    /// Conversion routine of the field type.
    pub marshal_kind: MarshalKind,
    /// Runtime tag the value is stored under.
    pub variant_kind: VariantKind,
    /// Value of the field initialiser.
    pub default: Variant,
}

impl PropertyInfo {
    /// Describes a field of type `T` whose initialiser produced `default`.
    ///
    /// # Errors
    ///
    /// Conversion or runtime failure while marshaling the default.
    pub fn of<T: VariantType>(name: &'static str, default: &T, rt: &Runtime) -> VariantResult<Self> {
        let default = default.to_variant(rt)?;
        let variant_kind = T::MARSHAL_KIND.variant_kind().unwrap_or_else(|| default.kind());
        Ok(Self { name, marshal_kind: T::MARSHAL_KIND, variant_kind, default })
    }
}

/// A script class with exported properties.
pub trait ScriptProperties {
    /// Exported properties in declaration order.
    ///
    /// # Errors
    ///
    /// Conversion or runtime failure while marshaling a default.
    fn property_list(rt: &Runtime) -> VariantResult<Vec<PropertyInfo>>;

    /// Reads an exported property.
    ///
    /// # Errors
    ///
    /// [`VariantError::UnknownProperty`](crate::VariantError::UnknownProperty)
    /// for a name that is not exported, or a conversion failure.
    fn get_property(&self, name: &str, rt: &Runtime) -> VariantResult<Variant>;

    /// Writes an exported property.
    ///
    /// # Errors
    ///
    /// [`VariantError::UnknownProperty`](crate::VariantError::UnknownProperty)
    /// for a name that is not exported,
    /// [`VariantError::TypeMismatch`](crate::VariantError::TypeMismatch) for a
    /// value of the wrong kind.
    fn set_property(&mut self, name: &str, value: &Variant) -> VariantResult<()>;
}

/// Declares a script class and its exported properties.
///
/// Every field carries an initialiser, which becomes both the `Default` value
/// and the default the editor shows. Fields marked `#[export]` are listed by
/// [`ScriptProperties`]; their types must implement
/// [`VariantType`](crate::VariantType), anything else fails to compile.
///
/// ```rust
/// use meridian_variant::{export_properties, ScriptProperties, Variant};
/// use meridian_math::Vector3;
///
/// export_properties! {
///     /// Player controller.
///     pub struct Player {
///         #[export] pub speed: f32 = 5.0,
///         #[export] pub spawn: Vector3 = Vector3::UP,
///         pub frames_airborne: u32 = 0,
///     }
/// }
///
/// let mut player = Player::default();
/// player.set_property("speed", &Variant::Float(7.5)).unwrap();
/// assert_eq!(player.speed, 7.5);
/// assert!(player.set_property("frames_airborne", &Variant::Int(1)).is_err());
/// ```
#[macro_export]
macro_rules! export_properties {
    (@parse $head:tt [$($all:tt)*] [$($exported:tt)*]) => {
        $crate::export_properties!(@emit $head [$($all)*] [$($exported)*]);
    };
    (@parse $head:tt [$($all:tt)*] [$($exported:tt)*]
        #[export] $fvis:vis $field:ident : $ty:ty = $default:expr $(, $($rest:tt)*)?
    ) => {
        $crate::export_properties!(@parse $head
            [$($all)* ($fvis $field : $ty = $default)]
            [$($exported)* ($field : $ty)]
            $($($rest)*)?
        );
    };
    (@parse $head:tt [$($all:tt)*] [$($exported:tt)*]
        $fvis:vis $field:ident : $ty:ty = $default:expr $(, $($rest:tt)*)?
    ) => {
        $crate::export_properties!(@parse $head
            [$($all)* ($fvis $field : $ty = $default)]
            [$($exported)*]
            $($($rest)*)?
        );
    };
    (@emit [$(#[$meta:meta])* $vis:vis struct $name:ident]
        [$(($fvis:vis $field:ident : $ty:ty = $default:expr))*]
        [$(($efield:ident : $ety:ty))*]
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($fvis $field: $ty,)*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        impl $crate::ScriptProperties for $name {
            fn property_list(
                rt: &$crate::Runtime,
            ) -> $crate::VariantResult<::std::vec::Vec<$crate::PropertyInfo>> {
                let defaults = <Self as ::core::default::Default>::default();
                let _ = (&defaults, rt);
                ::core::result::Result::Ok(::std::vec![
                    $($crate::PropertyInfo::of::<$ety>(::core::stringify!($efield), &defaults.$efield, rt)?,)*
                ])
            }

            fn get_property(
                &self,
                name: &str,
                rt: &$crate::Runtime,
            ) -> $crate::VariantResult<$crate::Variant> {
                let _ = rt;
                match name {
                    $(::core::stringify!($efield) => <$ety as $crate::VariantType>::to_variant(&self.$efield, rt),)*
                    _ => ::core::result::Result::Err($crate::VariantError::UnknownProperty {
                        name: ::std::borrow::ToOwned::to_owned(name),
                    }),
                }
            }

            fn set_property(
                &mut self,
                name: &str,
                value: &$crate::Variant,
            ) -> $crate::VariantResult<()> {
                let _ = value;
                match name {
                    $(::core::stringify!($efield) => {
                        self.$efield = <$ety as $crate::VariantType>::from_variant(value)?;
                        ::core::result::Result::Ok(())
                    })*
                    _ => ::core::result::Result::Err($crate::VariantError::UnknownProperty {
                        name: ::std::borrow::ToOwned::to_owned(name),
                    }),
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::export_properties!(@parse [$(#[$meta])* $vis struct $name] [] [] $($body)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VariantError;
    use meridian_math::{Plane, Vector3i};

    crate::variant_enum! {
        enum Choice {
            A,
            B,
            C,
        }
    }

    crate::export_properties! {
        struct Sample {
            #[export] count: i32 = 10,
            #[export] back: Vector3i = Vector3i::BACK,
            #[export] floor: Plane = Plane::PLANE_XZ,
            #[export] choice: Choice = Choice::C,
            scratch: u64 = 3,
        }
    }

    #[test]
    fn test_defaults_from_initialisers() {
        let sample = Sample::default();
        assert_eq!(sample.count, 10);
        assert_eq!(sample.back, Vector3i::BACK);
        assert_eq!(sample.choice, Choice::C);
        assert_eq!(sample.scratch, 3);
        assert_eq!(sample.floor, Plane::PLANE_XZ);
    }

    #[test]
    fn test_set_property_checks_kind() {
        let mut sample = Sample::default();
        sample.set_property("count", &Variant::Int(-4)).unwrap();
        assert_eq!(sample.count, -4);

        sample.set_property("choice", &Variant::Int(0)).unwrap();
        assert_eq!(sample.choice, Choice::A);

        assert_eq!(
            sample.set_property("count", &Variant::Float(1.0)),
            Err(VariantError::TypeMismatch { expected: VariantKind::Int, found: VariantKind::Float })
        );
        assert_eq!(
            sample.set_property("scratch", &Variant::Int(1)),
            Err(VariantError::UnknownProperty { name: "scratch".into() })
        );
    }
}
