//! Errors returned by noise construction and evaluation.

use std::result;

use perlin_utils::MathError;
use thiserror::Error;

/// An error that can occur while building or evaluating a [`crate::NoiseField`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    /// A constructor, configuration or call argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A coordinate is not a finite number.
    #[error("coordinate {index} is not a finite number ({value})")]
    TypeMismatch {
        /// Position of the offending coordinate.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// Two sequences that must share a dimensionality do not.
    #[error("{what}: expected {expected} dimensions but got {actual}")]
    DimensionMismatch {
        /// What was being compared.
        what: &'static str,
        /// The dimensionality that was required.
        expected: usize,
        /// The dimensionality that was given.
        actual: usize,
    },
    /// The fade curve was evaluated outside `[0, 1]`.
    #[error("fade input {0} is outside [0, 1]")]
    OutOfRange(f64),
    /// Internal vector lengths disagree. Never expected during normal evaluation.
    #[error("internal vector length mismatch ({left} != {right})")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

impl From<MathError> for NoiseError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::OutOfRange(value) => Self::OutOfRange(value),
            MathError::LengthMismatch { left, right } => Self::LengthMismatch { left, right },
        }
    }
}

/// Shorthand for results carrying a [`NoiseError`].
pub type Result<T> = result::Result<T, NoiseError>;
