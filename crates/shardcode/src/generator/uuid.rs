use uuid::Uuid;

use crate::{CodeGenerator, Result};

/// Generates random version 4 UUIDs in their hyphenated form.
///
/// Needs no counter service at all, at the price of long (36 character)
/// codes whose uniqueness is probabilistic. Useful as a drop-in
/// [`CodeGenerator`] where short codes do not matter.
///
/// # Example
/// ```
/// use shardcode::{CodeGenerator, UuidGenerator};
///
/// let code = UuidGenerator.generate_code();
/// assert_eq!(code.len(), 36);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl CodeGenerator for UuidGenerator {
    type Err = core::convert::Infallible;

    fn try_generate_code(&self) -> Result<String, Self::Err> {
        Ok(Uuid::new_v4().hyphenated().to_string())
    }
}
