use super::DecodeError;

/// Turns a dispensed value into its public code.
///
/// Must be deterministic. Any `Fn(u64) -> String` is a formatter.
pub trait Formatter {
    fn format(&self, code: u64) -> String;
}

impl<F> Formatter for F
where
    F: Fn(u64) -> String,
{
    fn format(&self, code: u64) -> String {
        self(code)
    }
}

/// The inverse of a [`Formatter`]: recovers the integer behind a code.
///
/// Generators never parse their own output; this exists for hosts that
/// reason about shard ranges and for tests checking uniqueness.
pub trait CodeParser {
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `code` is empty, contains a byte outside
    /// the formatter's alphabet, or overflows `u64`.
    fn parse(&self, code: &str) -> Result<u64, DecodeError>;
}
