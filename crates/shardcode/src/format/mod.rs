mod error;
mod interface;
mod radix;

pub use error::*;
pub use interface::*;
pub use radix::*;
