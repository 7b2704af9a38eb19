//! Compile-time side of the dtype set.
//!
//! Every Rust type that can live in a [`Buffer`] implements [`Element`]. The
//! arithmetic-capable subset implements [`Numeric`], and [`Promote`] fixes the
//! output type of every binary pairing. A missing `Promote` impl for a pair is
//! a build error at the dispatch site, never a runtime fallback.

use crate::buffer::Buffer;
use crate::types::{DType, Scalar};
use num_complex::Complex64;
use std::fmt::Debug;

/// A concrete element type of the closed dtype set.
pub trait Element: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Runtime tag of this type.
    const DTYPE: DType;
    /// Type used when this element takes part in arithmetic.
    type Arith: Numeric;
    /// Type produced by `exp`/`log` over this element.
    type Float: FloatElement;

    fn to_scalar(self) -> Scalar;
    /// Numeric conversion from any scalar. Floats saturate into integers,
    /// complex values keep their real part when narrowed.
    fn from_scalar(value: Scalar) -> Self;

    fn wrap(data: Vec<Self>) -> Buffer;
    fn slice(buffer: &Buffer) -> Option<&[Self]>;
    fn slice_mut(buffer: &mut Buffer) -> Option<&mut [Self]>;

    fn is_nonzero(self) -> bool {
        self.to_scalar().is_nonzero()
    }
}

/// Element-wise conversion between two element types.
#[inline]
pub fn cast<T: Element, U: Element>(value: T) -> U {
    U::from_scalar(value.to_scalar())
}

/// Elements that support the four arithmetic operations and negation.
///
/// Integer arithmetic wraps. Division returns `None` for an integer zero divisor.
/// Booleans keep only the nonzero-ness of each result: `plus` is `or`, `times`
/// is `and`, `minus` is `xor`, and dividing by `false` has no result.
pub trait Numeric: Element {
    fn zero() -> Self;
    fn one() -> Self;
    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn divide(self, rhs: Self) -> Option<Self>;
    fn negate(self) -> Self;
}

/// Elements with an exponential and a natural logarithm.
pub trait FloatElement: Numeric {
    fn exp(self) -> Self;
    fn ln(self) -> Self;
}

/// Result type of a binary arithmetic operation between `Self` and `Rhs`.
pub trait Promote<Rhs: Element>: Element {
    type Output: Numeric;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident, $arith:ty, $float:ty, |$v:ident| $from:expr) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;
            type Arith = $arith;
            type Float = $float;

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::$variant(self)
            }

            #[inline]
            fn from_scalar($v: Scalar) -> Self {
                $from
            }

            fn wrap(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }

            fn slice(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data.as_slice()),
                    _ => None,
                }
            }

            fn slice_mut(buffer: &mut Buffer) -> Option<&mut [Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data.as_mut_slice()),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(bool, Bool, u8, f64, |value| value.is_nonzero());
impl_element!(u8, U8, u8, f64, |value| match value {
    Scalar::Bool(b) => b as u8,
    Scalar::U8(v) => v,
    Scalar::I32(v) => v as u8,
    Scalar::F64(v) => v as u8,
    Scalar::C128(c) => c.re as u8,
});
impl_element!(i32, I32, i32, f64, |value| match value {
    Scalar::Bool(b) => b as i32,
    Scalar::U8(v) => v as i32,
    Scalar::I32(v) => v,
    Scalar::F64(v) => v as i32,
    Scalar::C128(c) => c.re as i32,
});
impl_element!(f64, F64, f64, f64, |value| value.to_f64());
impl_element!(Complex64, C128, Complex64, Complex64, |value| value.to_c128());

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn zero() -> Self {
                    <$t as num_traits::Zero>::zero()
                }
                fn one() -> Self {
                    <$t as num_traits::One>::one()
                }
                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }
                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }
                #[inline]
                fn times(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
                #[inline]
                fn divide(self, rhs: Self) -> Option<Self> {
                    if rhs == 0 {
                        None
                    } else {
                        Some(self.wrapping_div(rhs))
                    }
                }
                #[inline]
                fn negate(self) -> Self {
                    self.wrapping_neg()
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn zero() -> Self {
                    <$t as num_traits::Zero>::zero()
                }
                fn one() -> Self {
                    <$t as num_traits::One>::one()
                }
                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }
                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self - rhs
                }
                #[inline]
                fn times(self, rhs: Self) -> Self {
                    self * rhs
                }
                #[inline]
                fn divide(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }
                #[inline]
                fn negate(self) -> Self {
                    -self
                }
            }

            impl FloatElement for $t {
                #[inline]
                fn exp(self) -> Self {
                    <$t>::exp(self)
                }
                #[inline]
                fn ln(self) -> Self {
                    <$t>::ln(self)
                }
            }
        )*
    };
}

impl Numeric for bool {
    fn zero() -> Self {
        false
    }
    fn one() -> Self {
        true
    }
    #[inline]
    fn plus(self, rhs: Self) -> Self {
        self || rhs
    }
    #[inline]
    fn minus(self, rhs: Self) -> Self {
        self != rhs
    }
    #[inline]
    fn times(self, rhs: Self) -> Self {
        self && rhs
    }
    #[inline]
    fn divide(self, rhs: Self) -> Option<Self> {
        if rhs {
            Some(self)
        } else {
            None
        }
    }
    #[inline]
    fn negate(self) -> Self {
        self
    }
}

impl_numeric_int!(u8, i32);
impl_numeric_float!(f64, Complex64);

macro_rules! promote_table {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

promote_table! {
    bool, bool => bool;
    bool, u8 => u8;
    bool, i32 => i32;
    bool, f64 => f64;
    bool, Complex64 => Complex64;
    u8, bool => u8;
    u8, u8 => u8;
    u8, i32 => i32;
    u8, f64 => f64;
    u8, Complex64 => Complex64;
    i32, bool => i32;
    i32, u8 => i32;
    i32, i32 => i32;
    i32, f64 => f64;
    i32, Complex64 => Complex64;
    f64, bool => f64;
    f64, u8 => f64;
    f64, i32 => f64;
    f64, f64 => f64;
    f64, Complex64 => Complex64;
    Complex64, bool => Complex64;
    Complex64, u8 => Complex64;
    Complex64, i32 => Complex64;
    Complex64, f64 => Complex64;
    Complex64, Complex64 => Complex64;
}
