mod counter;
mod distributed;

pub use counter::*;
pub use distributed::*;
