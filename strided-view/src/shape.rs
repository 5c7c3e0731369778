//! Shape validation and default stride layouts.

use num_traits::ToPrimitive;
use strided_traits::Scalar;

use crate::error::ShapeError;

/// A value that may appear as one entry of a shape.
///
/// Implemented for every primitive integer and float type, so shapes can be
/// passed as `&[usize]`, `&[i32]`, `&[f64]` and so on. Validation happens in
/// [`validate_shape`].
pub trait ShapeEntry: Copy {
    /// The dimension size, or `None` if the value is not a non-negative integer.
    fn to_dim(self) -> Option<usize>;

    /// The value as it should appear in an error message.
    fn describe(self) -> String;
}

macro_rules! impl_shape_entry_int {
    ($($t:ty),*) => {
        $(
            impl ShapeEntry for $t {
                #[inline]
                fn to_dim(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                fn describe(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_shape_entry_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Float tokens as they read in shape errors (`Infinity`, `-Infinity`, `NaN`).
fn describe_float(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        x.to_string()
    }
}

fn float_dim(x: f64) -> Option<usize> {
    if x.is_finite() && x.fract() == 0.0 && x >= 0.0 {
        x.to_usize()
    } else {
        None
    }
}

impl ShapeEntry for f64 {
    #[inline]
    fn to_dim(self) -> Option<usize> {
        float_dim(self)
    }

    fn describe(self) -> String {
        describe_float(self)
    }
}

impl ShapeEntry for f32 {
    #[inline]
    fn to_dim(self) -> Option<usize> {
        float_dim(self as f64)
    }

    fn describe(self) -> String {
        describe_float(self as f64)
    }
}

impl ShapeEntry for Scalar {
    fn to_dim(self) -> Option<usize> {
        match self {
            Scalar::Number(x) => float_dim(x),
            Scalar::BigInt(v) => v.to_dim(),
            Scalar::BigUint(v) => v.to_dim(),
        }
    }

    fn describe(self) -> String {
        match self {
            Scalar::Number(x) => describe_float(x),
            Scalar::BigInt(v) => v.to_string(),
            Scalar::BigUint(v) => v.to_string(),
        }
    }
}

/// Validate a shape and return its dimension sizes.
///
/// Fails on an empty shape and on the first entry (in index order) that is
/// not a non-negative integer.
pub fn validate_shape<S: ShapeEntry>(shape: &[S]) -> Result<Vec<usize>, ShapeError> {
    if shape.is_empty() {
        return Err(ShapeError::Empty);
    }
    let dims = shape
        .iter()
        .enumerate()
        .map(|(index, &entry)| {
            entry.to_dim().ok_or_else(|| ShapeError::InvalidValue {
                value: entry.describe(),
                index,
            })
        })
        .collect::<Result<Vec<usize>, ShapeError>>()?;
    if shape_size(&dims).is_none() {
        return Err(ShapeError::TooLarge(dims));
    }
    Ok(dims)
}

/// Number of elements of `dims`, or `None` on overflow.
///
/// The empty product is 1 and any zero dimension gives 0.
pub fn shape_size(dims: &[usize]) -> Option<usize> {
    if dims.contains(&0) {
        return Some(0);
    }
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Stride of the next dimension out: `stride * dim`, saturating.
///
/// Saturation only happens for shapes too large to allocate, or whose
/// element count is 0 anyway, so no reachable offset depends on it.
fn outer_stride(stride: isize, dim: usize) -> isize {
    stride.saturating_mul(isize::try_from(dim).unwrap_or(isize::MAX))
}

/// Compute row-major strides (C default: last index varies fastest).
///
/// A zero-sized dimension propagates a zero stride to every earlier
/// dimension: `[2, 0, 3]` gives `[0, 3, 1]`.
pub fn row_major_strides(dims: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; dims.len()];
    for i in (1..dims.len()).rev() {
        strides[i - 1] = outer_stride(strides[i], dims[i]);
    }
    strides
}

/// Compute column-major strides (first index varies fastest).
///
/// The mirror of [`row_major_strides`]; pass the result to
/// [`StridedArray::with_layout`](crate::StridedArray::with_layout) or
/// [`StridedArray::from_buffer`](crate::StridedArray::from_buffer) for a
/// Fortran-order array.
pub fn col_major_strides(dims: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; dims.len()];
    for i in 1..dims.len() {
        strides[i] = outer_stride(strides[i - 1], dims[i - 1]);
    }
    strides
}
