//! The strided array: a typed buffer viewed through shape, strides and offset.

use std::fmt;
use std::sync::Arc;

use num_traits::PrimInt;
use strided_traits::{ElementKind, Scalar};

use crate::buffer::{allocate, Buffer};
use crate::format::{format, FormatOptions};
use crate::iter::visit_dims;
use crate::nested::{to_nested, NestedSequence};
use crate::shape::{row_major_strides, shape_size, validate_shape, ShapeEntry};
use crate::{Result, StridedError};

/// Validate that all accessed offsets stay within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    // nothing is ever accessed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(StridedError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(StridedError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(StridedError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset < 0 || max_offset as usize >= len {
        return Err(StridedError::OffsetOverflow);
    }
    Ok(())
}

/// N-dimensional strided array over a typed buffer.
///
/// Element `idx` lives at buffer position `offset + Σ idx[i] * strides[i]`.
/// Shape, strides, offset and kind are fixed at construction; only the
/// buffer contents change, through [`set`](Self::set).
///
/// The buffer is either owned (freshly allocated and zero-filled) or shared
/// with the caller through a `&'a [Cell<T>]`, in which case several arrays
/// may view the same memory with different layouts. Cloning an owned array
/// copies its buffer; cloning a shared one yields another view of the same
/// cells.
#[derive(Clone)]
pub struct StridedArray<'a> {
    buffer: Buffer<'a>,
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: isize,
}

impl fmt::Debug for StridedArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedArray")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for StridedArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self, &FormatOptions::default()))
    }
}

impl StridedArray<'static> {
    /// Create a row-major, zero-filled array that owns its buffer.
    ///
    /// # Example
    /// ```
    /// use strided_view::{ElementKind, StridedArray};
    ///
    /// let a = StridedArray::new(&[2, 3], ElementKind::Int32).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert_eq!(a.strides(), &[3, 1]);
    /// assert_eq!(a.size(), 6);
    /// ```
    pub fn new<S: ShapeEntry>(shape: &[S], kind: ElementKind) -> Result<Self> {
        Self::with_layout(shape, kind, None, 0)
    }

    /// Create an owned array of `size` zeroed elements with a custom layout.
    ///
    /// `strides` defaults to row-major. Every element reachable through the
    /// layout must fall inside the `size`-element buffer.
    ///
    /// # Example
    /// ```
    /// use strided_view::{col_major_strides, ElementKind, Scalar, StridedArray};
    ///
    /// let strides = col_major_strides(&[2, 3]);
    /// let mut a =
    ///     StridedArray::with_layout(&[2, 3], ElementKind::Int32, Some(&strides), 0).unwrap();
    /// a.set(5, &[1, 0]).unwrap();
    /// assert_eq!(a.strides(), &[1, 2]);
    /// assert_eq!(a.buffer().read(1), Some(Scalar::Number(5.0)));
    /// ```
    pub fn with_layout<S: ShapeEntry>(
        shape: &[S],
        kind: ElementKind,
        strides: Option<&[isize]>,
        offset: isize,
    ) -> Result<Self> {
        let dims = validate_shape(shape)?;
        let size = shape_size(&dims).ok_or(StridedError::OffsetOverflow)?;
        let buffer = allocate(kind, size)?;
        Self::from_dims(buffer, dims, strides, offset)
    }

    /// Create a row-major array whose element at each index is `f(index)`.
    pub fn from_fn<S: ShapeEntry>(
        shape: &[S],
        kind: ElementKind,
        f: impl FnMut(&[usize]) -> Scalar,
    ) -> Result<Self> {
        let mut array = Self::new(shape, kind)?;
        array.fill_with(f);
        Ok(array)
    }
}

impl<'a> StridedArray<'a> {
    /// Wrap an existing buffer without copying it.
    ///
    /// The array's kind is the buffer's kind. `strides` defaults to row-major.
    /// Fails if the layout reaches outside the buffer.
    pub fn from_buffer<S: ShapeEntry>(
        buffer: Buffer<'a>,
        shape: &[S],
        strides: Option<&[isize]>,
        offset: isize,
    ) -> Result<Self> {
        let dims = validate_shape(shape)?;
        Self::from_dims(buffer, dims, strides, offset)
    }

    fn from_dims(
        buffer: Buffer<'a>,
        dims: Vec<usize>,
        strides: Option<&[isize]>,
        offset: isize,
    ) -> Result<Self> {
        let strides = match strides {
            Some(s) => s.to_vec(),
            None => row_major_strides(&dims),
        };
        validate_bounds(buffer.len(), &dims, &strides, offset)?;
        Ok(Self {
            buffer,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.buffer.kind()
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of elements, the product of the shape.
    #[inline]
    pub fn size(&self) -> usize {
        // validated at construction, so only a zero dimension is left to catch
        shape_size(&self.dims).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer<'a> {
        &self.buffer
    }

    pub fn into_buffer(self) -> Buffer<'a> {
        self.buffer
    }

    /// Buffer position of `indices`, after rank and bounds checks.
    ///
    /// Every dimension is checked in order before any position is returned,
    /// so the error names the first offending dimension.
    fn position<I: PrimInt + fmt::Display>(&self, indices: &[I]) -> Result<usize> {
        if indices.len() != self.dims.len() {
            return Err(StridedError::RankMismatch {
                expected: self.dims.len(),
                got: indices.len(),
            });
        }
        let mut checked = Vec::with_capacity(indices.len());
        for (dim, (&index, &size)) in indices.iter().zip(self.dims.iter()).enumerate() {
            match index.to_usize() {
                Some(i) if i < size => checked.push(i),
                _ => {
                    return Err(StridedError::IndexOutOfBounds {
                        index: index.to_string(),
                        dim,
                        size,
                    })
                }
            }
        }
        // all in bounds, so the array is non-empty and the layout was range-checked
        let pos = checked
            .iter()
            .zip(self.strides.iter())
            .fold(self.offset, |acc, (&i, &stride)| acc + i as isize * stride);
        Ok(pos as usize)
    }

    /// Read the element at `indices`.
    ///
    /// The big integer kinds read back as [`Scalar::BigInt`] /
    /// [`Scalar::BigUint`]; every other kind as [`Scalar::Number`].
    pub fn get<I: PrimInt + fmt::Display>(&self, indices: &[I]) -> Result<Scalar> {
        let pos = self.position(indices)?;
        self.buffer.read(pos).ok_or(StridedError::OffsetOverflow)
    }

    /// Coerce `value` to the array's kind and write it at `indices`.
    ///
    /// On error nothing is written.
    pub fn set<I: PrimInt + fmt::Display>(
        &mut self,
        value: impl Into<Scalar>,
        indices: &[I],
    ) -> Result<()> {
        let pos = self.position(indices)?;
        if self.buffer.write(pos, value.into()) {
            Ok(())
        } else {
            Err(StridedError::OffsetOverflow)
        }
    }

    /// Write `value` at every index.
    pub fn fill(&mut self, value: impl Into<Scalar>) {
        let value = value.into();
        self.fill_with(|_| value);
    }

    /// Write `f(index)` at every index, in row-major order.
    pub fn fill_with(&mut self, mut f: impl FnMut(&[usize]) -> Scalar) {
        let dims = Arc::clone(&self.dims);
        let strides = Arc::clone(&self.strides);
        let offset = self.offset;
        let buffer = &mut self.buffer;
        visit_dims(&dims, |idx| {
            let pos = idx
                .iter()
                .zip(strides.iter())
                .fold(offset, |acc, (&i, &s)| acc + i as isize * s);
            let written = buffer.write(pos as usize, f(idx));
            debug_assert!(written, "validated layout reached position {pos}");
        });
    }

    /// Convert to a nested sequence mirroring the shape.
    pub fn to_nested(&self) -> NestedSequence {
        to_nested(self)
    }
}
