//! Conversion between strided arrays and nested sequences.

use std::fmt;

use strided_traits::Scalar;

use crate::array::StridedArray;
use crate::error::ShapeError;
use crate::format::element;
use crate::shape::validate_shape;

/// A recursive sequence of scalars mirroring an array's shape.
///
/// A converted array has nesting depth equal to its rank. Values are copied
/// out, so the sequence is independent of the array it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedSequence {
    Leaf(Scalar),
    Seq(Vec<NestedSequence>),
}

impl NestedSequence {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, NestedSequence::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<Scalar> {
        match self {
            NestedSequence::Leaf(v) => Some(*v),
            NestedSequence::Seq(_) => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[NestedSequence]> {
        match self {
            NestedSequence::Leaf(_) => None,
            NestedSequence::Seq(items) => Some(items),
        }
    }

    /// Number of items of a sequence; 0 for a leaf.
    pub fn len(&self) -> usize {
        self.as_seq().map_or(0, <[_]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child `i` of a sequence.
    pub fn get(&self, i: usize) -> Option<&NestedSequence> {
        self.as_seq().and_then(|items| items.get(i))
    }

    /// Nesting depth, following first children. A leaf has depth 0 and an
    /// empty sequence depth 1.
    pub fn depth(&self) -> usize {
        match self {
            NestedSequence::Leaf(_) => 0,
            NestedSequence::Seq(items) => 1 + items.first().map_or(0, NestedSequence::depth),
        }
    }

    /// All leaves in depth-first order.
    pub fn leaves(&self) -> Vec<Scalar> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Scalar>) {
        match self {
            NestedSequence::Leaf(v) => out.push(*v),
            NestedSequence::Seq(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }
}

impl From<Scalar> for NestedSequence {
    fn from(value: Scalar) -> Self {
        NestedSequence::Leaf(value)
    }
}

impl From<Vec<NestedSequence>> for NestedSequence {
    fn from(items: Vec<NestedSequence>) -> Self {
        NestedSequence::Seq(items)
    }
}

impl fmt::Display for NestedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedSequence::Leaf(v) => write!(f, "{v}"),
            NestedSequence::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Copy `array` into a nested sequence of depth `ndim`.
///
/// Zero-sized dimensions yield empty sequences at that level, so `[2, 0]`
/// converts to `[[], []]` and `[0, 3]` to `[]`.
pub fn to_nested(array: &StridedArray<'_>) -> NestedSequence {
    let mut idx = Vec::with_capacity(array.ndim());
    build(array, &mut idx)
}

fn build(array: &StridedArray<'_>, idx: &mut Vec<usize>) -> NestedSequence {
    if idx.len() == array.ndim() {
        return NestedSequence::Leaf(element(array, idx));
    }
    let n = array.shape()[idx.len()];
    let mut items = Vec::with_capacity(n);
    for i in 0..n {
        idx.push(i);
        items.push(build(array, idx));
        idx.pop();
    }
    NestedSequence::Seq(items)
}

/// Read a shape given as a flat sequence of numbers.
///
/// A leaf, or a sequence holding sequences, is not a shape; the entries are
/// then validated as for any other shape.
pub fn shape_from_nested(shape: &NestedSequence) -> Result<Vec<usize>, ShapeError> {
    let items = shape.as_seq().ok_or(ShapeError::NotASequence)?;
    let entries = items
        .iter()
        .map(|item| item.as_leaf().ok_or(ShapeError::NotASequence))
        .collect::<Result<Vec<Scalar>, ShapeError>>()?;
    validate_shape(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_traits::ElementKind;

    fn leaf(x: f64) -> NestedSequence {
        NestedSequence::Leaf(Scalar::Number(x))
    }

    fn seq(items: Vec<NestedSequence>) -> NestedSequence {
        NestedSequence::Seq(items)
    }

    #[test]
    fn test_to_nested_2d() {
        let a = StridedArray::from_fn(&[2, 2], ElementKind::Int32, |idx| {
            Scalar::from((idx[0] * 2 + idx[1] + 1) as i32)
        })
        .unwrap();
        let nested = a.to_nested();
        assert_eq!(
            nested,
            seq(vec![seq(vec![leaf(1.0), leaf(2.0)]), seq(vec![leaf(3.0), leaf(4.0)])])
        );
        assert_eq!(nested.depth(), 2);
        assert_eq!(nested.to_string(), "[[1, 2], [3, 4]]");
    }

    #[test]
    fn test_to_nested_3d_float() {
        let mut a = StridedArray::new(&[2, 1, 2], ElementKind::Float32).unwrap();
        a.fill(1.5f32);
        let nested = to_nested(&a);
        assert_eq!(nested.to_string(), "[[[1.5, 1.5]], [[1.5, 1.5]]]");
        assert_eq!(nested.depth(), 3);
        assert_eq!(nested.leaves().len(), 4);
    }

    #[test]
    fn test_to_nested_zero_dims() {
        let a = StridedArray::new(&[2, 0], ElementKind::Float64).unwrap();
        assert_eq!(to_nested(&a), seq(vec![seq(vec![]), seq(vec![])]));
        let b = StridedArray::new(&[0, 3], ElementKind::Float64).unwrap();
        assert_eq!(to_nested(&b), seq(vec![]));
        let c = StridedArray::new(&[0, 0], ElementKind::Float64).unwrap();
        assert_eq!(to_nested(&c).to_string(), "[]");
        let d = StridedArray::new(&[0], ElementKind::Float64).unwrap();
        assert!(to_nested(&d).is_empty());
    }

    #[test]
    fn test_to_nested_is_a_copy() {
        let mut a = StridedArray::new(&[2], ElementKind::Int16).unwrap();
        a.fill(5);
        let mut nested = to_nested(&a);
        if let NestedSequence::Seq(items) = &mut nested {
            items[0] = leaf(99.0);
        }
        assert_eq!(a.get(&[0]).unwrap(), Scalar::Number(5.0));
        a.set(7, &[1]).unwrap();
        assert_eq!(nested.get(1).and_then(NestedSequence::as_leaf), Some(Scalar::Number(5.0)));
    }

    #[test]
    fn test_to_nested_big_values() {
        let mut a = StridedArray::new(&[2], ElementKind::BigInt64).unwrap();
        a.set(-3i64, &[1]).unwrap();
        assert_eq!(
            to_nested(&a),
            seq(vec![
                NestedSequence::Leaf(Scalar::BigInt(0)),
                NestedSequence::Leaf(Scalar::BigInt(-3)),
            ])
        );
    }

    #[test]
    fn test_accessors() {
        let s = seq(vec![leaf(1.0), leaf(2.0)]);
        assert!(!s.is_leaf());
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(0), Some(&leaf(1.0)));
        assert_eq!(s.get(2), None);
        assert!(leaf(1.0).is_leaf());
        assert_eq!(leaf(1.0).len(), 0);
        assert_eq!(leaf(1.0).depth(), 0);
    }

    #[test]
    fn test_shape_from_nested() {
        assert_eq!(
            shape_from_nested(&seq(vec![leaf(2.0), leaf(3.0)])).unwrap(),
            vec![2, 3]
        );
        let err = shape_from_nested(&leaf(2.0)).unwrap_err();
        assert_eq!(err.to_string(), "Shape must be an array of numbers");
        let err = shape_from_nested(&seq(vec![seq(vec![leaf(1.0)])])).unwrap_err();
        assert_eq!(err, ShapeError::NotASequence);
        let err = shape_from_nested(&seq(vec![])).unwrap_err();
        assert_eq!(err, ShapeError::Empty);
        let err = shape_from_nested(&seq(vec![leaf(2.0), leaf(-1.0)])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shape values must be non-negative integers, got -1 at index 1"
        );
    }
}
