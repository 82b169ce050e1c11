//! The lock guarding a [`DistributedGenerator`](crate::DistributedGenerator)'s
//! dispenser. `std` mutexes poison on panic and surface
//! [`Error::LockPoisoned`](crate::Error::LockPoisoned); `parking_lot` ones do
//! not.

#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::Mutex;
