mod chunked;
mod interface;
mod local;
mod transformer;

pub use chunked::*;
pub use interface::*;
pub use local::*;
pub use transformer::*;
