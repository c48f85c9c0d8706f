//! Error taxonomy for the numerical core.
//!
//! Every core function is a pure computation over in-memory data, so a
//! failure always means a precondition violation by the caller. There is no
//! transient-failure or retry policy anywhere in this crate.

use std::fmt;

/// A precondition violation surfaced by the resampler or the spectral
/// transform. Fail-fast: callers never get silently clamped data back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// An input that requires at least one sample was empty.
    Empty,
    /// Stroke timestamps must be strictly ascending; `index` is the first
    /// offending sample.
    NonAscendingTimestamps { index: usize },
    /// Two parallel arrays that must share a length did not.
    LengthMismatch { left: usize, right: usize },
    /// The spectral transform only supports power-of-two lengths.
    NotPowerOfTwo { len: usize },
    /// The resampler was asked for zero output samples.
    ZeroOutputCount,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::Empty => write!(f, "input must contain at least one sample"),
            InvalidInput::NonAscendingTimestamps { index } => {
                write!(f, "timestamps must be strictly ascending (sample {})", index)
            }
            InvalidInput::LengthMismatch { left, right } => {
                write!(f, "parallel arrays differ in length ({} vs {})", left, right)
            }
            InvalidInput::NotPowerOfTwo { len } => {
                write!(f, "length {} is not a power of two", len)
            }
            InvalidInput::ZeroOutputCount => write!(f, "output sample count must be at least 1"),
        }
    }
}

impl std::error::Error for InvalidInput {}
