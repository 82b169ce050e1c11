#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod counter;
mod error;
mod format;
#[cfg(feature = "async-tokio")]
mod futures;
mod generator;
mod group;
mod layout;

pub use crate::counter::*;
pub use crate::error::*;
pub use crate::format::*;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::group::*;
pub use crate::layout::*;
