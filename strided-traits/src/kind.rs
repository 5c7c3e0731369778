//! The closed set of element kinds a strided buffer can hold.

use std::fmt;
use std::str::FromStr;

/// Errors raised when an element kind cannot back a buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    /// The kind is part of the enumeration but has no buffer implementation.
    #[error("{0} not supported in this environment")]
    NotSupported(ElementKind),

    /// The name does not denote any element kind.
    #[error("Unsupported dtype: {0}")]
    Unknown(String),
}

/// Numeric representation shared by every element of an array.
///
/// Each kind has a fixed byte width and a numeric domain. `Float16` is
/// reserved: it can be named and inspected, but allocation rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ElementKind {
    Int8,
    Uint8,
    /// 8-bit unsigned, saturating on write instead of wrapping.
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    /// Reserved half-precision float.
    Float16,
    Float32,
    #[default]
    Float64,
    BigInt64,
    BigUint64,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 12] = [
        ElementKind::Int8,
        ElementKind::Uint8,
        ElementKind::Uint8Clamped,
        ElementKind::Int16,
        ElementKind::Uint16,
        ElementKind::Int32,
        ElementKind::Uint32,
        ElementKind::Float16,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::BigInt64,
        ElementKind::BigUint64,
    ];

    /// Size of one element in bytes.
    pub const fn byte_width(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 | ElementKind::Uint8Clamped => 1,
            ElementKind::Int16 | ElementKind::Uint16 | ElementKind::Float16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 | ElementKind::BigInt64 | ElementKind::BigUint64 => 8,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(
            self,
            ElementKind::Float16 | ElementKind::Float32 | ElementKind::Float64
        )
    }

    pub const fn is_integral(self) -> bool {
        !self.is_float()
    }

    /// Whether the kind can represent negative values.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ElementKind::Int8
                | ElementKind::Int16
                | ElementKind::Int32
                | ElementKind::BigInt64
                | ElementKind::Float16
                | ElementKind::Float32
                | ElementKind::Float64
        )
    }

    /// Out-of-range writes saturate rather than wrap.
    pub const fn is_clamped(self) -> bool {
        matches!(self, ElementKind::Uint8Clamped)
    }

    /// 64-bit integer kinds whose values are never read back as floats.
    pub const fn is_big(self) -> bool {
        matches!(self, ElementKind::BigInt64 | ElementKind::BigUint64)
    }

    /// Whether a buffer can be allocated for this kind.
    pub const fn is_supported(self) -> bool {
        !matches!(self, ElementKind::Float16)
    }

    /// Canonical lowercase name, accepted back by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "int8",
            ElementKind::Uint8 => "uint8",
            ElementKind::Uint8Clamped => "uint8_clamped",
            ElementKind::Int16 => "int16",
            ElementKind::Uint16 => "uint16",
            ElementKind::Int32 => "int32",
            ElementKind::Uint32 => "uint32",
            ElementKind::Float16 => "float16",
            ElementKind::Float32 => "float32",
            ElementKind::Float64 => "float64",
            ElementKind::BigInt64 => "bigint64",
            ElementKind::BigUint64 => "biguint64",
        }
    }

    /// `Ok(self)` when the kind can back a buffer.
    pub fn ensure_supported(self) -> Result<Self, KindError> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(KindError::NotSupported(self))
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| KindError::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_widths() {
        assert_eq!(ElementKind::Int8.byte_width(), 1);
        assert_eq!(ElementKind::Uint8Clamped.byte_width(), 1);
        assert_eq!(ElementKind::Uint16.byte_width(), 2);
        assert_eq!(ElementKind::Float16.byte_width(), 2);
        assert_eq!(ElementKind::Int32.byte_width(), 4);
        assert_eq!(ElementKind::Float32.byte_width(), 4);
        assert_eq!(ElementKind::Float64.byte_width(), 8);
        assert_eq!(ElementKind::BigUint64.byte_width(), 8);
    }

    #[test]
    fn test_domains() {
        assert!(ElementKind::Float32.is_float());
        assert!(!ElementKind::Float32.is_integral());
        assert!(ElementKind::Int16.is_signed());
        assert!(!ElementKind::Uint32.is_signed());
        assert!(ElementKind::Uint8Clamped.is_clamped());
        assert!(!ElementKind::Uint8.is_clamped());
        assert!(ElementKind::BigInt64.is_big());
        assert!(!ElementKind::Int32.is_big());
    }

    #[test]
    fn test_default_is_float64() {
        assert_eq!(ElementKind::default(), ElementKind::Float64);
    }

    #[test]
    fn test_name_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.name().parse::<ElementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "InvalidType".parse::<ElementKind>().unwrap_err();
        assert_eq!(err, KindError::Unknown("InvalidType".into()));
        assert_eq!(err.to_string(), "Unsupported dtype: InvalidType");
    }

    #[test]
    fn test_float16_reserved() {
        assert!(!ElementKind::Float16.is_supported());
        let err = ElementKind::Float16.ensure_supported().unwrap_err();
        assert_eq!(err.to_string(), "float16 not supported in this environment");
        assert_eq!(ElementKind::Int8.ensure_supported(), Ok(ElementKind::Int8));
    }
}
