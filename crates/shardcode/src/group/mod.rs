mod counter_group;
mod picker;
#[cfg(feature = "std")]
mod rng;

pub use counter_group::*;
pub use picker::*;
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use rng::*;
