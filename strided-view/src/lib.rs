//! Dynamic-rank strided arrays over typed flat buffers.
//!
//! # Core Types
//!
//! - [`StridedArray`]: shape, strides and offset over a [`Buffer`], with
//!   bounds-checked [`get`](StridedArray::get) / [`set`](StridedArray::set)
//! - [`Buffer`]: closed tagged union of typed storage, owned or shared with
//!   the caller through `&[Cell<T>]`
//! - [`NestedSequence`]: recursive copy of an array's contents
//!
//! # Primitives
//!
//! - [`for_each_index`] / [`indices`]: row-major multi-index iteration
//! - [`allocate`]: zeroed buffer of a given [`ElementKind`]
//! - [`format`] / [`to_nested`]: display string and nested-sequence conversion

pub mod array;
pub mod buffer;
mod error;
pub mod format;
pub mod iter;
pub mod nested;
pub mod shape;

// ============================================================================
// Arrays and buffers
// ============================================================================
pub use array::StridedArray;
pub use buffer::{allocate, Buffer, Data};

// ============================================================================
// Shapes and iteration
// ============================================================================
pub use iter::{for_each_index, indices, IndexIter};
pub use shape::{col_major_strides, row_major_strides, shape_size, validate_shape, ShapeEntry};

// ============================================================================
// Formatting
// ============================================================================
pub use format::{format, format_number, FormatOptions};
pub use nested::{shape_from_nested, to_nested, NestedSequence};

// ============================================================================
// Element kinds
// ============================================================================
pub use strided_traits::{Element, ElementKind, KindError, Scalar};

// ============================================================================
// Error types
// ============================================================================
pub use error::{Result, ShapeError, StridedError};
