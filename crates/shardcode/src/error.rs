use thiserror::Error;

/// A result type that is infallible by default.
///
/// Most building blocks in `shardcode` cannot fail. Code generation becomes
/// fallible only through the [`AtomicCounter`] backing a shard, whose error
/// type flows through as `E`.
///
/// [`AtomicCounter`]: crate::AtomicCounter
pub type Result<T, E = core::convert::Infallible> = core::result::Result<T, E>;

/// All errors a code generator can produce.
///
/// The generic parameter `E` is the error type of the shard counters. It is
/// kept as the [`source`](std::error::Error::source) of
/// [`Error::CounterReset`], so callers can inspect the original failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error<E = core::convert::Infallible> {
    /// Claiming a new count chunk from the selected shard failed.
    ///
    /// The local range is left exhausted and untouched, so the next call
    /// retries the claim from scratch. The external sequence may or may not
    /// have advanced.
    #[error("unable to reset the counter: unable to get the next count chunk")]
    CounterReset(#[source] E),

    /// The generator lock was **poisoned** by a thread that panicked while
    /// holding it.
    ///
    /// Never produced when the `parking-lot` feature is enabled, since
    /// `parking_lot` mutexes do not poison.
    #[error("the generator lock is poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T, E> From<PoisonError<MutexGuard<'_, T>>> for Error<E> {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
