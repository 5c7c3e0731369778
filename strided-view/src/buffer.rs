//! Typed flat buffers, owned or shared.

use std::cell::Cell;
use std::fmt;

use log::debug;
use strided_traits::{clamp_u8, Element, ElementKind, KindError, Scalar};

use crate::{Result, StridedError};

/// Storage behind a buffer: exclusively owned, or borrowed from the caller.
///
/// `Shared` cells may be aliased by several arrays on one thread; writes
/// through any of them are visible to all. The borrow keeps the caller's
/// storage alive for as long as any array uses it.
#[derive(Clone)]
pub enum Data<'a, T> {
    Owned(Vec<T>),
    Shared(&'a [Cell<T>]),
}

impl<T: Copy + fmt::Debug> fmt::Debug for Data<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Owned(v) => f.debug_tuple("Owned").field(v).finish(),
            Data::Shared(cells) => f.debug_tuple("Shared").field(cells).finish(),
        }
    }
}

impl<T: Copy> Data<'_, T> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Data::Owned(v) => v.len(),
            Data::Shared(cells) => cells.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Data::Shared(_))
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<T> {
        match self {
            Data::Owned(v) => v.get(pos).copied(),
            Data::Shared(cells) => cells.get(pos).map(Cell::get),
        }
    }

    /// Store `value` at `pos`; returns `false` if `pos` is out of range.
    #[inline]
    pub fn put(&mut self, pos: usize, value: T) -> bool {
        match self {
            Data::Owned(v) => match v.get_mut(pos) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            Data::Shared(cells) => match cells.get(pos) {
                Some(cell) => {
                    cell.set(value);
                    true
                }
                None => false,
            },
        }
    }

    /// Copy the contents out in buffer order.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Data::Owned(v) => v.clone(),
            Data::Shared(cells) => cells.iter().map(Cell::get).collect(),
        }
    }
}

/// A flat buffer of one supported element kind.
#[derive(Debug, Clone)]
pub enum Buffer<'a> {
    Int8(Data<'a, i8>),
    Uint8(Data<'a, u8>),
    /// `u8` storage with saturating writes.
    Uint8Clamped(Data<'a, u8>),
    Int16(Data<'a, i16>),
    Uint16(Data<'a, u16>),
    Int32(Data<'a, i32>),
    Uint32(Data<'a, u32>),
    Float32(Data<'a, f32>),
    Float64(Data<'a, f64>),
    BigInt64(Data<'a, i64>),
    BigUint64(Data<'a, u64>),
}

/// Apply `$body` to the data of whichever variant `$buf` holds.
macro_rules! with_data {
    ($buf:expr, $data:ident => $body:expr) => {
        match $buf {
            Buffer::Int8($data) => $body,
            Buffer::Uint8($data) => $body,
            Buffer::Uint8Clamped($data) => $body,
            Buffer::Int16($data) => $body,
            Buffer::Uint16($data) => $body,
            Buffer::Int32($data) => $body,
            Buffer::Uint32($data) => $body,
            Buffer::Float32($data) => $body,
            Buffer::Float64($data) => $body,
            Buffer::BigInt64($data) => $body,
            Buffer::BigUint64($data) => $body,
        }
    };
}

/// Zeroed owned storage, or an error if `size` elements cannot be reserved.
fn zeroed<T: Copy + Default>(kind: ElementKind, size: usize) -> Result<Data<'static, T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(size)
        .map_err(|_| StridedError::AllocationFailed { kind, size })?;
    values.resize(size, T::default());
    Ok(Data::Owned(values))
}

/// Allocate a zero-initialised, exclusively owned buffer of `size` elements.
///
/// Fails for the reserved `Float16` kind, and when the allocator cannot
/// provide `size` elements.
pub fn allocate(kind: ElementKind, size: usize) -> Result<Buffer<'static>> {
    let buffer = match kind {
        ElementKind::Int8 => Buffer::Int8(zeroed(kind, size)?),
        ElementKind::Uint8 => Buffer::Uint8(zeroed(kind, size)?),
        ElementKind::Uint8Clamped => Buffer::Uint8Clamped(zeroed(kind, size)?),
        ElementKind::Int16 => Buffer::Int16(zeroed(kind, size)?),
        ElementKind::Uint16 => Buffer::Uint16(zeroed(kind, size)?),
        ElementKind::Int32 => Buffer::Int32(zeroed(kind, size)?),
        ElementKind::Uint32 => Buffer::Uint32(zeroed(kind, size)?),
        ElementKind::Float16 => return Err(KindError::NotSupported(kind).into()),
        ElementKind::Float32 => Buffer::Float32(zeroed(kind, size)?),
        ElementKind::Float64 => Buffer::Float64(zeroed(kind, size)?),
        ElementKind::BigInt64 => Buffer::BigInt64(zeroed(kind, size)?),
        ElementKind::BigUint64 => Buffer::BigUint64(zeroed(kind, size)?),
    };
    debug!("allocated {kind} buffer of {size} elements");
    Ok(buffer)
}

impl<'a> Buffer<'a> {
    /// Owned clamped buffer over `values`.
    pub fn clamped(values: Vec<u8>) -> Self {
        Buffer::Uint8Clamped(Data::Owned(values))
    }

    /// Clamped buffer sharing the caller's cells.
    pub fn clamped_shared(cells: &'a [Cell<u8>]) -> Self {
        debug!("wrapping shared uint8_clamped buffer of {} elements", cells.len());
        Buffer::Uint8Clamped(Data::Shared(cells))
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Buffer::Int8(_) => ElementKind::Int8,
            Buffer::Uint8(_) => ElementKind::Uint8,
            Buffer::Uint8Clamped(_) => ElementKind::Uint8Clamped,
            Buffer::Int16(_) => ElementKind::Int16,
            Buffer::Uint16(_) => ElementKind::Uint16,
            Buffer::Int32(_) => ElementKind::Int32,
            Buffer::Uint32(_) => ElementKind::Uint32,
            Buffer::Float32(_) => ElementKind::Float32,
            Buffer::Float64(_) => ElementKind::Float64,
            Buffer::BigInt64(_) => ElementKind::BigInt64,
            Buffer::BigUint64(_) => ElementKind::BigUint64,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_data!(self, d => d.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the storage is borrowed from the caller.
    #[inline]
    pub fn is_shared(&self) -> bool {
        with_data!(self, d => d.is_shared())
    }

    /// Element at linear position `pos`, or `None` past the end.
    #[inline]
    pub fn read(&self, pos: usize) -> Option<Scalar> {
        with_data!(self, d => d.get(pos).map(Element::to_scalar))
    }

    /// Coerce `value` to this buffer's kind and store it at `pos`.
    ///
    /// Returns `false` if `pos` is past the end; nothing is written then.
    #[inline]
    pub fn write(&mut self, pos: usize, value: Scalar) -> bool {
        match self {
            Buffer::Uint8Clamped(d) => d.put(pos, clamp_u8(value)),
            Buffer::Int8(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Uint8(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Int16(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Uint16(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Int32(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Uint32(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Float32(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::Float64(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::BigInt64(d) => d.put(pos, Element::from_scalar(value)),
            Buffer::BigUint64(d) => d.put(pos, Element::from_scalar(value)),
        }
    }

    /// Every element in buffer order.
    pub fn to_scalars(&self) -> Vec<Scalar> {
        with_data!(self, d => d.to_vec().into_iter().map(Element::to_scalar).collect())
    }
}

macro_rules! impl_buffer_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<Vec<$t>> for Buffer<'static> {
                fn from(values: Vec<$t>) -> Self {
                    Buffer::$variant(Data::Owned(values))
                }
            }

            impl<'a> From<&'a [Cell<$t>]> for Buffer<'a> {
                fn from(cells: &'a [Cell<$t>]) -> Self {
                    debug!(
                        "wrapping shared {} buffer of {} elements",
                        ElementKind::$variant,
                        cells.len()
                    );
                    Buffer::$variant(Data::Shared(cells))
                }
            }
        )*
    };
}

impl_buffer_from!(
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
    i64 => BigInt64,
    u64 => BigUint64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zeroed() {
        for kind in ElementKind::ALL.into_iter().filter(|k| k.is_supported()) {
            let buf = allocate(kind, 4).unwrap();
            assert_eq!(buf.kind(), kind);
            assert_eq!(buf.len(), 4);
            assert!(!buf.is_shared());
            for pos in 0..4 {
                assert_eq!(buf.read(pos), Some(Scalar::zero(kind)));
            }
        }
    }

    #[test]
    fn test_allocate_empty() {
        let buf = allocate(ElementKind::Int16, 0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.read(0), None);
    }

    #[test]
    fn test_allocate_float16_fails() {
        let err = allocate(ElementKind::Float16, 3).unwrap_err();
        assert_eq!(err.to_string(), "float16 not supported in this environment");
    }

    #[test]
    fn test_allocate_unreservable_size() {
        let err = allocate(ElementKind::Float64, usize::MAX).unwrap_err();
        assert_eq!(
            err,
            StridedError::AllocationFailed {
                kind: ElementKind::Float64,
                size: usize::MAX
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot allocate 18446744073709551615 float64 elements"
        );
    }

    #[test]
    fn test_write_coerces_per_kind() {
        let mut buf = allocate(ElementKind::Uint8, 1).unwrap();
        assert!(buf.write(0, Scalar::Number(300.0)));
        assert_eq!(buf.read(0), Some(Scalar::Number(44.0)));

        let mut buf = Buffer::clamped(vec![0]);
        assert!(buf.write(0, Scalar::Number(300.0)));
        assert_eq!(buf.read(0), Some(Scalar::Number(255.0)));
        assert_eq!(buf.kind(), ElementKind::Uint8Clamped);

        let mut buf = allocate(ElementKind::Int32, 1).unwrap();
        buf.write(0, Scalar::Number(-3.7));
        assert_eq!(buf.read(0), Some(Scalar::Number(-3.0)));

        let mut buf = allocate(ElementKind::BigInt64, 1).unwrap();
        buf.write(0, Scalar::Number(42.9));
        assert_eq!(buf.read(0), Some(Scalar::BigInt(42)));
    }

    #[test]
    fn test_write_out_of_range() {
        let mut buf = allocate(ElementKind::Float64, 2).unwrap();
        assert!(!buf.write(2, Scalar::Number(1.0)));
        assert_eq!(buf.to_scalars(), vec![Scalar::Number(0.0); 2]);
    }

    #[test]
    fn test_shared_cells_alias() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut storage = vec![1.0f64, 2.0, 3.0];
        {
            let cells = Cell::from_mut(storage.as_mut_slice()).as_slice_of_cells();
            let mut a = Buffer::from(cells);
            let b = Buffer::from(cells);
            assert!(a.is_shared());
            a.write(1, Scalar::Number(20.0));
            assert_eq!(b.read(1), Some(Scalar::Number(20.0)));
        }
        assert_eq!(storage, vec![1.0, 20.0, 3.0]);
    }

    #[test]
    fn test_from_vec_kinds() {
        assert_eq!(Buffer::from(vec![1i8]).kind(), ElementKind::Int8);
        assert_eq!(Buffer::from(vec![1u8]).kind(), ElementKind::Uint8);
        assert_eq!(Buffer::from(vec![1.0f32]).kind(), ElementKind::Float32);
        assert_eq!(Buffer::from(vec![1u64]).kind(), ElementKind::BigUint64);
        assert_eq!(
            Buffer::from(vec![-1i64]).read(0),
            Some(Scalar::BigInt(-1))
        );
    }
}
