use strided_traits::{ElementKind, KindError};

/// Errors raised while validating a shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The shape was not given as a flat sequence of numbers.
    #[error("Shape must be an array of numbers")]
    NotASequence,

    /// The shape has zero dimensions.
    #[error("Shape cannot be empty")]
    Empty,

    /// An entry is negative, fractional, NaN or infinite.
    #[error("Shape values must be non-negative integers, got {value} at index {index}")]
    InvalidValue { value: String, index: usize },

    /// The product of the entries does not fit in `usize`.
    #[error("Shape {0:?} has more elements than can be addressed")]
    TooLarge(Vec<usize>),
}

/// Errors that can occur during strided array operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    #[error(transparent)]
    InvalidShape(#[from] ShapeError),

    #[error(transparent)]
    UnsupportedKind(#[from] KindError),

    /// The allocator could not provide a buffer of `size` elements.
    #[error("cannot allocate {size} {kind} elements")]
    AllocationFailed { kind: ElementKind, size: usize },

    /// Wrong number of indices for the array rank.
    #[error("Expected {expected} indices, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// An index lies outside `[0, size)` of its dimension.
    #[error("Index {index} is out of bounds for dimension {dim} with size {size}")]
    IndexOutOfBounds {
        index: String,
        dim: usize,
        size: usize,
    },

    /// Stride array length doesn't match dimensions.
    #[error("stride and dims length mismatch")]
    StrideLengthMismatch,

    /// A reachable element lies outside the buffer, or its offset overflows.
    #[error("offset overflow while computing buffer position")]
    OffsetOverflow,
}

/// Result type for strided array operations.
pub type Result<T> = std::result::Result<T, StridedError>;
