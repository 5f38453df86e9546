//! Component-wise operator plumbing shared by the vector types.
//!
//! Every vector kind gets the same operator surface, so the impls are stamped
//! out here instead of being written six times.

/// Scalar arithmetic used by [`impl_vector_ops!`]. Reals follow IEEE rules;
/// integers wrap on overflow, matching the engine. Integer division by zero
/// still panics.
pub(crate) trait Component: Copy {
    fn add(a: Self, b: Self) -> Self;
    fn sub(a: Self, b: Self) -> Self;
    fn neg(a: Self) -> Self;
    fn mul(a: Self, b: Self) -> Self;
    fn div(a: Self, b: Self) -> Self;
    fn rem(a: Self, b: Self) -> Self;
}

macro_rules! impl_real_component {
    ($($t:ty),+) => {$(
        impl Component for $t {
            #[inline] fn add(a: Self, b: Self) -> Self { a + b }
            #[inline] fn sub(a: Self, b: Self) -> Self { a - b }
            #[inline] fn neg(a: Self) -> Self { -a }
            #[inline] fn mul(a: Self, b: Self) -> Self { a * b }
            #[inline] fn div(a: Self, b: Self) -> Self { a / b }
            #[inline] fn rem(a: Self, b: Self) -> Self { a % b }
        }
    )+};
}

impl_real_component!(f32, f64);

impl Component for i32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.wrapping_add(b)
    }
    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.wrapping_sub(b)
    }
    #[inline]
    fn neg(a: Self) -> Self {
        a.wrapping_neg()
    }
    #[inline]
    fn mul(a: Self, b: Self) -> Self {
        a.wrapping_mul(b)
    }
    #[inline]
    fn div(a: Self, b: Self) -> Self {
        a.wrapping_div(b)
    }
    #[inline]
    fn rem(a: Self, b: Self) -> Self {
        a.wrapping_rem(b)
    }
}

/// Implements `+ - * / %` (vector and scalar right-hand sides), unary `-`,
/// the `*Assign` forms and `scalar * vector` for a vector type.
macro_rules! impl_vector_ops {
    ($ty:ident, $scalar:ty, { $($field:ident),+ }) => {
        impl ::core::ops::Add for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: $crate::ops::Component::add(self.$field, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Sub for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: $crate::ops::Component::sub(self.$field, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: $crate::ops::Component::neg(self.$field)),+ }
            }
        }

        impl ::core::ops::Mul for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: $crate::ops::Component::mul(self.$field, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Mul<$scalar> for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $scalar) -> Self {
                Self { $($field: $crate::ops::Component::mul(self.$field, rhs)),+ }
            }
        }

        impl ::core::ops::Mul<$ty> for $scalar {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                $ty { $($field: $crate::ops::Component::mul(self, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Div for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self { $($field: $crate::ops::Component::div(self.$field, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Div<$scalar> for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $scalar) -> Self {
                Self { $($field: $crate::ops::Component::div(self.$field, rhs)),+ }
            }
        }

        // Truncating remainder: the result keeps the sign of the dividend.
        impl ::core::ops::Rem for $ty {
            type Output = Self;
            #[inline]
            fn rem(self, rhs: Self) -> Self {
                Self { $($field: $crate::ops::Component::rem(self.$field, rhs.$field)),+ }
            }
        }

        impl ::core::ops::Rem<$scalar> for $ty {
            type Output = Self;
            #[inline]
            fn rem(self, rhs: $scalar) -> Self {
                Self { $($field: $crate::ops::Component::rem(self.$field, rhs)),+ }
            }
        }

        impl ::core::ops::AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::core::ops::SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl ::core::ops::MulAssign for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl ::core::ops::MulAssign<$scalar> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: $scalar) {
                *self = *self * rhs;
            }
        }

        impl ::core::ops::DivAssign for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        impl ::core::ops::DivAssign<$scalar> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: $scalar) {
                *self = *self / rhs;
            }
        }

        impl ::core::ops::RemAssign for $ty {
            #[inline]
            fn rem_assign(&mut self, rhs: Self) {
                *self = *self % rhs;
            }
        }

        impl ::core::ops::RemAssign<$scalar> for $ty {
            #[inline]
            fn rem_assign(&mut self, rhs: $scalar) {
                *self = *self % rhs;
            }
        }
    };
}

/// Implements panicking `Index`/`IndexMut` plus checked `get`/`set` over the
/// components of a vector, in declaration order.
macro_rules! impl_vector_index {
    ($ty:ident, $scalar:ty, $len:literal, { $($index:literal => $field:ident),+ }) => {
        impl $ty {
            /// Returns the component at `index`.
            ///
            /// # Errors
            ///
            /// Returns [`MathError::IndexOutOfRange`](crate::MathError::IndexOutOfRange)
            /// if `index` does not name a component.
            #[inline]
            pub fn get(self, index: usize) -> $crate::MathResult<$scalar> {
                match index {
                    $($index => Ok(self.$field),)+
                    _ => Err($crate::MathError::IndexOutOfRange { index, len: $len }),
                }
            }

            /// Overwrites the component at `index`.
            ///
            /// # Errors
            ///
            /// Returns [`MathError::IndexOutOfRange`](crate::MathError::IndexOutOfRange)
            /// if `index` does not name a component.
            #[inline]
            pub fn set(&mut self, index: usize, value: $scalar) -> $crate::MathResult<()> {
                match index {
                    $($index => {
                        self.$field = value;
                        Ok(())
                    })+
                    _ => Err($crate::MathError::IndexOutOfRange { index, len: $len }),
                }
            }
        }

        impl ::core::ops::Index<usize> for $ty {
            type Output = $scalar;
            #[inline]
            fn index(&self, index: usize) -> &$scalar {
                match index {
                    $($index => &self.$field,)+
                    _ => panic!("{}", $crate::MathError::IndexOutOfRange { index, len: $len }),
                }
            }
        }

        impl ::core::ops::IndexMut<usize> for $ty {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut $scalar {
                match index {
                    $($index => &mut self.$field,)+
                    _ => panic!("{}", $crate::MathError::IndexOutOfRange { index, len: $len }),
                }
            }
        }
    };
}

/// Implements `Display` as `(x, y, ...)`.
macro_rules! impl_tuple_display {
    ($ty:ident, { $first:ident $(, $field:ident)* }) => {
        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "({}", self.$first)?;
                $(write!(f, ", {}", self.$field)?;)*
                write!(f, ")")
            }
        }
    };
}

pub(crate) use impl_tuple_display;
pub(crate) use impl_vector_index;
pub(crate) use impl_vector_ops;
