use core::fmt;

use crate::Result;

/// A minimal interface for producing public codes for new records.
///
/// Hosts (e.g. an HTTP handler creating a short link) depend on this trait
/// and map a failure to a server-side error themselves.
pub trait CodeGenerator {
    /// The error type returned by [`CodeGenerator::try_generate_code`].
    type Err: fmt::Debug;

    /// Produces the next code.
    ///
    /// This is the infallible counterpart to
    /// [`CodeGenerator::try_generate_code`], available when the error type
    /// is uninhabited.
    fn generate_code(&self) -> String
    where
        Self::Err: Into<core::convert::Infallible>,
    {
        match self.try_generate_code() {
            Ok(code) => code,
            Err(e) => {
                #[allow(unreachable_code)]
                // `into()` satisfies the trait bound at compile time.
                match e.into() {}
            }
        }
    }

    /// Produces the next code with fallible error handling.
    ///
    /// # Errors
    ///
    /// Implementation specific; see the implementing type.
    fn try_generate_code(&self) -> Result<String, Self::Err>;
}
