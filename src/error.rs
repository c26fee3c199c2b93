use num_bigint::BigInt;
use thiserror::Error;

/// Everything that can abort a recovery or a deal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Base outside `[2, 36]`.
    #[error("Invalid base {0}: must be between 2 and 36")]
    InvalidBase(i64),
    /// A character that is not a digit of the stated base.
    #[error("Invalid character '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },
    /// A point entry that cannot be turned into an `(x, y)` pair.
    #[error("Malformed point '{key}': {reason}")]
    MalformedPoint { key: String, reason: String },
    /// Two points share the same abscissa.
    #[error("Duplicate abscissa x = {0}")]
    DuplicateAbscissa(BigInt),
    /// No points to interpolate.
    #[error("Cannot interpolate an empty point set")]
    EmptyPointSet,
    /// The interpolated value at zero is not an integer.
    #[error("Constant term {numerator}/{denominator} is not an integer")]
    NonIntegralConstant {
        numerator: BigInt,
        denominator: BigInt,
    },
    #[error("Need {required} shares, only {available} available")]
    InsufficientShares { required: usize, available: usize },
    #[error("Share document has no 'keys' record")]
    MissingMetadata,
    #[error("Share document has an unreadable 'keys' record: {0}")]
    InvalidMetadata(String),
    #[error("Threshold {threshold} is invalid for {shares} shares")]
    InvalidThreshold { threshold: usize, shares: usize },
    #[error("Secret must be non-negative")]
    NegativeSecret,
    #[error("Failed to read share file '{file}': {message}")]
    Import { file: String, message: String },
    #[error("Failed to write share file '{file}': {message}")]
    Export { file: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
