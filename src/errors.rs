//! Error types.

use core::fmt;

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// The failure cases of key construction, Montgomery arithmetic, and the
/// timing attack.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An odd modulus was required but an even or zero one was supplied.
    InvalidModulus,

    /// Division by zero.
    DivByZero,

    /// The public exponent has no inverse modulo φ(n).
    NonInvertible,

    /// An arithmetic result exceeded the fixed word count. Callers must size
    /// the limb count to the expected operand sizes.
    Overflow,

    /// A recovery round could not classify: one of the two timing classes
    /// fell below the configured minimum.
    InsufficientSamples {
        /// The round (bit index from the most significant) that failed.
        round: u32,
        /// Samples whose hypothesized product takes the slow path.
        class_a: usize,
        /// Samples whose hypothesized product takes the fast path.
        class_b: usize,
    },

    /// A CSV row failed to parse.
    MalformedInput {
        /// 1-based line number of the offending row.
        line: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModulus => write!(f, "modulus must be odd and nonzero"),
            Self::DivByZero => write!(f, "division by zero"),
            Self::NonInvertible => write!(f, "exponent is not invertible modulo phi(n)"),
            Self::Overflow => write!(f, "arithmetic overflow: operand exceeds the fixed width"),
            Self::InsufficientSamples {
                round,
                class_a,
                class_b,
            } => write!(
                f,
                "round {round}: cannot classify with {class_a}/{class_b} samples per class"
            ),
            Self::MalformedInput { line } => write!(f, "malformed CSV row at line {line}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            Error::InvalidModulus.to_string(),
            "modulus must be odd and nonzero"
        );
        assert_eq!(
            Error::MalformedInput { line: 7 }.to_string(),
            "malformed CSV row at line 7"
        );
    }
}
