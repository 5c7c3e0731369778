//! Array creation functions.
//!
//! Each is a thin composition of [`StridedArray::new`] and a fill. Arrays
//! are row-major and own their buffer.

use strided_view::{ElementKind, Scalar, ShapeEntry, StridedArray};

use crate::{NdError, Result};

/// A new array without meaningful contents.
///
/// Buffers are always zero-initialised, so this is currently the same as
/// [`zeros`]; callers should not rely on that.
pub fn empty<S: ShapeEntry>(shape: &[S], kind: ElementKind) -> Result<StridedArray<'static>> {
    Ok(StridedArray::new(shape, kind)?)
}

/// A new array filled with zeros.
pub fn zeros<S: ShapeEntry>(shape: &[S], kind: ElementKind) -> Result<StridedArray<'static>> {
    Ok(StridedArray::new(shape, kind)?)
}

/// A new array filled with ones.
pub fn ones<S: ShapeEntry>(shape: &[S], kind: ElementKind) -> Result<StridedArray<'static>> {
    full(shape, Scalar::one(kind), kind)
}

/// A new array with every element set to `value`, coerced to `kind`.
pub fn full<S: ShapeEntry>(
    shape: &[S],
    value: impl Into<Scalar>,
    kind: ElementKind,
) -> Result<StridedArray<'static>> {
    let mut array = StridedArray::new(shape, kind)?;
    array.fill(value);
    Ok(array)
}

/// An `n × m` matrix with ones on the `k`-th diagonal and zeros elsewhere.
///
/// `m` defaults to `n`. `k > 0` selects a diagonal above the main one,
/// `k < 0` one below; the element at `[i, j]` is 1 where `j - i == k`.
///
/// # Example
/// ```
/// use strided_nd::{eye, ElementKind, Scalar};
///
/// let a = eye(2, Some(3), 1, ElementKind::Int32).unwrap();
/// assert_eq!(a.get(&[0, 1]).unwrap(), Scalar::Number(1.0));
/// assert_eq!(a.get(&[1, 1]).unwrap(), Scalar::Number(0.0));
/// ```
pub fn eye(
    n: usize,
    m: Option<usize>,
    k: isize,
    kind: ElementKind,
) -> Result<StridedArray<'static>> {
    if n == 0 {
        return Err(NdError::NonPositive { name: "N", value: n });
    }
    let cols = m.unwrap_or(n);
    if cols == 0 {
        return Err(NdError::NonPositive {
            name: "M",
            value: cols,
        });
    }
    let (one, zero) = (Scalar::one(kind), Scalar::zero(kind));
    let array = StridedArray::from_fn(&[n, cols], kind, |idx| {
        if idx[1] as isize - idx[0] as isize == k {
            one
        } else {
            zero
        }
    })?;
    Ok(array)
}

/// The `n × n` identity matrix.
pub fn identity(n: usize, kind: ElementKind) -> Result<StridedArray<'static>> {
    if n == 0 {
        return Err(NdError::NonPositive { name: "n", value: n });
    }
    eye(n, Some(n), 0, kind)
}
