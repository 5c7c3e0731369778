use log::debug;
use strided_view::{for_each_index, ElementKind, StridedArray};

use crate::Result;

/// Copy `source` into a new row-major array of `kind`.
///
/// Each element is read from `source` and written with the target kind's
/// coercion: truncation toward zero for float to integer, wraparound for the
/// integer kinds, saturation for `Uint8Clamped`. The result owns a fresh
/// buffer; `source` is left untouched. Fails before copying if `kind` cannot
/// be allocated.
///
/// # Example
/// ```
/// use strided_nd::{astype, full, ElementKind, Scalar};
///
/// let a = full(&[2, 2], 1.7, ElementKind::Float64).unwrap();
/// let b = astype(&a, ElementKind::Int32).unwrap();
/// assert_eq!(b.get(&[1, 1]).unwrap(), Scalar::Number(1.0));
/// ```
pub fn astype(source: &StridedArray<'_>, kind: ElementKind) -> Result<StridedArray<'static>> {
    debug!(
        "astype {} -> {kind} over shape {:?}",
        source.kind(),
        source.shape()
    );
    let mut out = StridedArray::new(source.shape(), kind)?;
    let mut copied = Ok(());
    for_each_index(source.shape(), |idx| {
        if copied.is_ok() {
            copied = source.get(idx).and_then(|value| out.set(value, idx));
        }
    })?;
    copied?;
    Ok(out)
}
