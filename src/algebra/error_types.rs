use thiserror::Error;

/// Error type returned by scalar engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// Divisor is zero, or is an interval containing zero
    #[error("division by zero")]
    DivisionByZero,
    /// Argument outside the domain of the function (e.g. sqrt of a negative)
    #[error("argument outside the domain of the operation")]
    Domain,
    /// Infinite or NaN value cannot be represented in the target context
    #[error("non-finite value cannot be represented in this context")]
    NonFinite,
    /// Text could not be parsed as a number
    #[error("cannot parse {0:?} as a number")]
    Parse(String),
    /// Lower interval endpoint exceeds the upper endpoint
    #[error("interval lower bound exceeds upper bound")]
    InvalidInterval,
}

/// Coarse classification of a [`MatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Incompatible dimensions (`ValueError`-class)
    Shape,
    /// Index or slice outside the addressable window (`IndexError`-class)
    Index,
    /// Singular matrix or a failing scalar operation
    Numerical,
}

/// Error type returned by matrix operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Operands have incompatible dimensions
    #[error("incompatible dimensions {left:?} and {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Operation requires a square matrix
    #[error("matrix of size {0:?} is not square")]
    NotSquare((usize, usize)),
    /// Variadic operation called without operands
    #[error("no operands supplied")]
    NoOperands,
    /// Index exceeds the current dimension
    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: isize, dim: usize },
    /// Slice selects no rows or no columns
    #[error("slice selects an empty range")]
    EmptySelection,
    /// Single-index access on a matrix with more than one row and column
    #[error("insufficient indices for matrix")]
    NotAVector,
    /// Matrix is singular or numerically singular
    #[error("matrix is numerically singular")]
    Singular,
    /// Failure inside the scalar engine
    #[error(transparent)]
    Scalar(#[from] ScalarError),
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::ShapeMismatch { .. } | MatrixError::NotSquare(_) | MatrixError::NoOperands => {
                ErrorKind::Shape
            }
            MatrixError::IndexOutOfRange { .. }
            | MatrixError::EmptySelection
            | MatrixError::NotAVector => ErrorKind::Index,
            MatrixError::Singular | MatrixError::Scalar(_) => ErrorKind::Numerical,
        }
    }
}

/// Error type returned when validating [`PrecisionSettings`](crate::settings::PrecisionSettings).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}
