//! Shared utilities for the noise workspace.
//!
//! - [`math`] - fade curve, dot product, lattice hashing and corner enumeration
//! - [`random`] - deterministic random sources used to draw gradients

pub mod math;
pub mod random;

use thiserror::Error;

/// An error raised by the vector helpers in [`math`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The fade curve was given a value outside `[0, 1]`.
    #[error("expected a value in [0, 1] but got {0}")]
    OutOfRange(f64),
    /// Two vectors that must have the same length did not.
    #[error("lengths of two vectors are not equal ({left} != {right})")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}
