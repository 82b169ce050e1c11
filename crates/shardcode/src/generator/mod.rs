mod dispenser;
mod distributed;
mod interface;
mod mutex;
#[cfg(test)]
mod tests;
#[cfg(feature = "uuid")]
mod uuid;

pub(crate) use dispenser::*;
pub use distributed::*;
pub use interface::*;
pub(crate) use mutex::*;
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
#[cfg(feature = "uuid")]
pub use self::uuid::*;
