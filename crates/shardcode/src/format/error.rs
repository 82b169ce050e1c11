use thiserror::Error;

/// Errors raised while parsing a code back into its integer.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// The code has no digits.
    #[error("empty code")]
    Empty,

    /// A byte is not a digit of the formatter's radix.
    #[error("invalid digit {byte:#04x} at index {index}")]
    InvalidDigit { byte: u8, index: usize },

    /// The code names a value larger than `u64::MAX`.
    #[error("code overflows a 64-bit integer")]
    Overflow,
}

/// Errors raised when configuring a [`Radix`](crate::Radix).
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum RadixError {
    #[error("unsupported radix {0}, expected 2..=62")]
    Unsupported(u32),
}
