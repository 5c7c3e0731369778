//! Scalar values crossing the get/set boundary, and the per-kind write coercion.

use std::fmt;

use num_traits::ToPrimitive;

use crate::kind::ElementKind;

/// A single element value.
///
/// Every non-big kind reads back as `Number`; this is exact for all integer
/// kinds up to 32 bits and for `f32`. The two 64-bit integer kinds read back
/// as `BigInt`/`BigUint` and are never coerced to floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Number(f64),
    BigInt(i64),
    BigUint(u64),
}

const TWO_POW_127: f64 = 1.7014118346046923e38;

/// Low 64 bits of the integer part of `x`. Non-finite input maps to 0.
///
/// This is the wraparound rule of the integer kinds: truncate toward zero,
/// then reduce modulo 2^64 (narrower kinds keep the low bits of the result).
pub fn wrap_bits(x: f64) -> u64 {
    if !x.is_finite() {
        return 0;
    }
    let t = x.trunc();
    // any integer-valued f64 at or beyond 2^127 is a multiple of 2^64
    if t.abs() >= TWO_POW_127 {
        return 0;
    }
    (t as i128) as u64
}

/// Saturating coercion of the clamped 8-bit kind.
///
/// NaN maps to 0, values are clamped to `[0, 255]` and rounded half to even.
pub fn clamp_u8(value: Scalar) -> u8 {
    match value {
        Scalar::Number(x) if x.is_nan() => 0,
        Scalar::Number(x) => x.clamp(0.0, 255.0).round_ties_even() as u8,
        Scalar::BigInt(v) => v.clamp(0, 255) as u8,
        Scalar::BigUint(v) => v.min(255) as u8,
    }
}

impl Scalar {
    /// The zero element of `kind`.
    pub fn zero(kind: ElementKind) -> Self {
        match kind {
            ElementKind::BigInt64 => Scalar::BigInt(0),
            ElementKind::BigUint64 => Scalar::BigUint(0),
            _ => Scalar::Number(0.0),
        }
    }

    /// The unit element of `kind`.
    pub fn one(kind: ElementKind) -> Self {
        match kind {
            ElementKind::BigInt64 => Scalar::BigInt(1),
            ElementKind::BigUint64 => Scalar::BigUint(1),
            _ => Scalar::Number(1.0),
        }
    }

    pub fn is_big(&self) -> bool {
        !matches!(self, Scalar::Number(_))
    }

    /// Whether the value has no fractional part. Non-finite numbers are not integral.
    pub fn is_integral(&self) -> bool {
        match *self {
            Scalar::Number(x) => x.is_finite() && x.fract() == 0.0,
            Scalar::BigInt(_) | Scalar::BigUint(_) => true,
        }
    }

    /// Lossy widening to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Number(x) => x,
            Scalar::BigInt(v) => v as f64,
            Scalar::BigUint(v) => v as f64,
        }
    }

    /// Low 64 bits of the value's integer part, see [`wrap_bits`].
    pub fn to_bits64(self) -> u64 {
        match self {
            Scalar::Number(x) => wrap_bits(x),
            Scalar::BigInt(v) => v as u64,
            Scalar::BigUint(v) => v,
        }
    }
}

impl ToPrimitive for Scalar {
    fn to_i64(&self) -> Option<i64> {
        match *self {
            Scalar::Number(x) => x.to_i64(),
            Scalar::BigInt(v) => Some(v),
            Scalar::BigUint(v) => v.to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match *self {
            Scalar::Number(x) => x.to_u64(),
            Scalar::BigInt(v) => v.to_u64(),
            Scalar::BigUint(v) => Some(v),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.as_f64())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(x) => write!(f, "{x}"),
            Scalar::BigInt(v) => write!(f, "{v}"),
            Scalar::BigUint(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, u8, i16, u16, i32, u32, f32, f64);

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::BigInt(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::BigUint(value)
    }
}

/// Rust element types that back a buffer of a given [`ElementKind`].
///
/// `from_scalar` is the native write coercion of that kind; `to_scalar`
/// is the read conversion. The clamped 8-bit kind shares `u8` storage with
/// `Uint8` and uses [`clamp_u8`] instead of `u8::from_scalar`.
pub trait Element: Copy + Default + Send + Sync + 'static {
    const KIND: ElementKind;

    fn from_scalar(value: Scalar) -> Self;

    fn to_scalar(self) -> Scalar;
}

macro_rules! impl_wrapping_element {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn from_scalar(value: Scalar) -> Self {
                    value.to_bits64() as $t
                }

                #[inline]
                fn to_scalar(self) -> Scalar {
                    Scalar::Number(self as f64)
                }
            }
        )*
    };
}

impl_wrapping_element!(i8 => Int8, u8 => Uint8, i16 => Int16, u16 => Uint16, i32 => Int32, u32 => Uint32);

impl Element for f32 {
    const KIND: ElementKind = ElementKind::Float32;

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        match value {
            Scalar::Number(x) => x as f32,
            Scalar::BigInt(v) => v as f32,
            Scalar::BigUint(v) => v as f32,
        }
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Number(self as f64)
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Float64;

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        value.as_f64()
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Number(self)
    }
}

impl Element for i64 {
    const KIND: ElementKind = ElementKind::BigInt64;

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        value.to_bits64() as i64
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::BigInt(self)
    }
}

impl Element for u64 {
    const KIND: ElementKind = ElementKind::BigUint64;

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        value.to_bits64()
    }

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::BigUint(self)
    }
}
