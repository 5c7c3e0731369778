use strided_view::{KindError, ShapeError, StridedError};

/// Errors raised by the creation and conversion functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdError {
    #[error(transparent)]
    Strided(#[from] StridedError),

    /// A size argument that must be at least 1 was 0.
    #[error("{name} must be a positive integer, got {value}")]
    NonPositive { name: &'static str, value: usize },
}

impl From<ShapeError> for NdError {
    fn from(err: ShapeError) -> Self {
        NdError::Strided(err.into())
    }
}

impl From<KindError> for NdError {
    fn from(err: KindError) -> Self {
        NdError::Strided(err.into())
    }
}

pub type Result<T> = std::result::Result<T, NdError>;
