//! Row-major multi-index iteration.

use crate::error::ShapeError;
use crate::shape::{shape_size, validate_shape, ShapeEntry};

/// Call `visit` once for every multi-index of `shape`, in row-major order.
///
/// The last dimension varies fastest. The shape is validated once up front;
/// if any dimension is 0, `visit` is never called. A single index buffer is
/// reused for the whole iteration and lent to `visit` for the duration of
/// each call; callers that keep an index copy it with `to_vec`.
///
/// # Example
/// ```
/// use strided_view::for_each_index;
///
/// let mut seen = Vec::new();
/// for_each_index(&[2, 2], |idx| seen.push(idx.to_vec())).unwrap();
/// assert_eq!(seen, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
pub fn for_each_index<S, F>(shape: &[S], visit: F) -> Result<(), ShapeError>
where
    S: ShapeEntry,
    F: FnMut(&[usize]),
{
    let dims = validate_shape(shape)?;
    visit_dims(&dims, visit);
    Ok(())
}

/// Odometer walk over dimensions that are already validated.
pub(crate) fn visit_dims(dims: &[usize], mut visit: impl FnMut(&[usize])) {
    let total = shape_size(dims).unwrap_or(0);
    let rank = dims.len();
    let mut idx = vec![0usize; rank];
    for _ in 0..total {
        visit(&idx);
        for d in (0..rank).rev() {
            idx[d] += 1;
            if idx[d] < dims[d] {
                break;
            }
            idx[d] = 0;
        }
    }
}

/// Owned-index iterator over a shape, see [`indices`].
#[derive(Debug, Clone)]
pub struct IndexIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            let mut idx = current.clone();
            for d in (0..self.dims.len()).rev() {
                idx[d] += 1;
                if idx[d] < self.dims[d] {
                    break;
                }
                idx[d] = 0;
            }
            self.next = Some(idx);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IndexIter {}

/// Iterate the multi-indices of `shape` in row-major order as owned vectors.
///
/// Yields the same sequence as [`for_each_index`], with every item a fresh
/// copy the caller may keep or mutate.
pub fn indices<S: ShapeEntry>(shape: &[S]) -> Result<IndexIter, ShapeError> {
    let dims = validate_shape(shape)?;
    let remaining = shape_size(&dims).unwrap_or(0);
    let next = (remaining > 0).then(|| vec![0usize; dims.len()]);
    Ok(IndexIter {
        dims,
        next,
        remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(shape: &[usize]) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        for_each_index(shape, |idx| out.push(idx.to_vec())).unwrap();
        out
    }

    #[test]
    fn test_row_major_order() {
        assert_eq!(
            collect(&[2, 3]),
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_count_matches_size() {
        assert_eq!(collect(&[2, 3, 4]).len(), 24);
        assert_eq!(collect(&[1, 1, 1, 1]), vec![vec![0, 0, 0, 0]]);
        assert_eq!(collect(&[5]).len(), 5);
    }

    #[test]
    fn test_zero_dimension_never_visits() {
        let mut calls = 0;
        for_each_index(&[2, 0, 3], |_| calls += 1).unwrap();
        assert_eq!(calls, 0);
        for_each_index(&[0], |_| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_invalid_shape_never_visits() {
        let mut calls = 0;
        let err = for_each_index(&[2i32, -1], |_| calls += 1).unwrap_err();
        assert_eq!(calls, 0);
        assert_eq!(
            err.to_string(),
            "Shape values must be non-negative integers, got -1 at index 1"
        );
        let err = for_each_index::<usize, _>(&[], |_| calls += 1).unwrap_err();
        assert_eq!(err, ShapeError::Empty);
    }

    #[test]
    fn test_float_shape() {
        assert_eq!(collect(&[2, 2]).len(), 4);
        let mut calls = 0;
        for_each_index(&[2.0f64, 2.0], |_| calls += 1).unwrap();
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_indices_matches_for_each_index() {
        let owned: Vec<Vec<usize>> = indices(&[3, 1, 2]).unwrap().collect();
        assert_eq!(owned, collect(&[3, 1, 2]));
    }

    #[test]
    fn test_indices_are_independent_copies() {
        let mut it = indices(&[2, 2]).unwrap();
        let mut first = it.next().unwrap();
        first[0] = 99;
        assert_eq!(it.next().unwrap(), vec![0, 1]);
        assert_eq!(it.len(), 2);
    }

    #[test]
    fn test_indices_empty() {
        assert_eq!(indices(&[3, 0]).unwrap().count(), 0);
        assert!(indices(&[1.5f32]).is_err());
    }
}
