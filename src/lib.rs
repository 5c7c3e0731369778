//! Minimal N-dimensional arrays over typed flat buffers.
//!
//! This crate re-exports the core types of [`strided_view`] and adds the
//! creation and conversion functions built on top of them.
//!
//! # Core Types
//!
//! - [`StridedArray`]: shape, strides and offset over an owned or shared [`Buffer`]
//! - [`ElementKind`] / [`Scalar`]: element kinds and the values read and written
//! - [`NestedSequence`]: recursive copy of an array's contents
//!
//! # Creation
//!
//! - [`empty`], [`zeros`], [`ones`], [`full`]: filled arrays of any shape
//! - [`eye`], [`identity`]: diagonal matrices
//!
//! # Conversion and Display
//!
//! - [`astype`]: element-wise copy into another kind
//! - [`format`], [`print`]: nested bracketed rendering
//! - [`to_array`]: nested-sequence conversion
//!
//! # Example
//!
//! ```rust
//! use strided_nd::{astype, format, full, ElementKind, FormatOptions, Scalar};
//!
//! let a = full(&[2, 3], 1.7, ElementKind::Float64).unwrap();
//! let b = astype(&a, ElementKind::Int32).unwrap();
//! assert_eq!(b.get(&[1, 2]).unwrap(), Scalar::Number(1.0));
//! assert_eq!(format(&b, &FormatOptions::default()), "[[1 1 1]\n [1 1 1]]");
//! ```

mod astype;
mod creation;
mod error;

// ============================================================================
// Core re-exports
// ============================================================================
pub use strided_view::{
    allocate, col_major_strides, for_each_index, format, format_number, indices,
    row_major_strides, shape_from_nested, shape_size, to_nested, validate_shape, Buffer, Data,
    Element, ElementKind, FormatOptions, IndexIter, KindError, NestedSequence, Scalar,
    ShapeEntry, ShapeError, StridedArray, StridedError,
};

// ============================================================================
// Creation and conversion
// ============================================================================
pub use astype::astype;
pub use creation::{empty, eye, full, identity, ones, zeros};

// ============================================================================
// Error types
// ============================================================================
pub use error::{NdError, Result};

/// Convert `array` to a nested sequence, see [`to_nested`].
pub fn to_array(array: &StridedArray<'_>) -> NestedSequence {
    to_nested(array)
}

/// Write `array` to stdout, formatted with `options`.
pub fn print(array: &StridedArray<'_>, options: &FormatOptions) {
    println!("{}", format(array, options));
}
