use core::fmt;
use std::sync::Arc;

use crate::Result;

/// Client side of an authoritative, strictly increasing counter service.
///
/// Each implementation stands for one named sequence in an external store
/// (e.g. a consensus-backed key-value store). Every successful call to
/// [`AtomicCounter::next_count_chunk`] must return a value strictly greater
/// than every value previously returned for the same sequence, across all
/// processes and restarts.
///
/// Implementations take `&self` because a client is usually shared; any
/// timeout or cancellation policy belongs to the client, not to the
/// generator calling it.
///
/// # Example
/// ```
/// use shardcode::AtomicCounter;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// struct Sequence(AtomicU64);
///
/// impl AtomicCounter for Sequence {
///     type Err = core::convert::Infallible;
///
///     fn next_count_chunk(&self) -> Result<u64, Self::Err> {
///         Ok(self.0.fetch_add(1, Ordering::Relaxed) + 1)
///     }
/// }
///
/// let sequence = Sequence(AtomicU64::new(0));
/// assert_eq!(sequence.next_count_chunk(), Ok(1));
/// assert_eq!(sequence.next_count_chunk(), Ok(2));
/// ```
pub trait AtomicCounter {
    /// The error returned when the service cannot hand out a value.
    type Err: fmt::Debug;

    /// Claims the next exclusive count chunk of this sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service is unreachable or the
    /// operation cannot be completed. A failed call may still have advanced
    /// the external sequence.
    fn next_count_chunk(&self) -> Result<u64, Self::Err>;
}

impl<C> AtomicCounter for &C
where
    C: AtomicCounter + ?Sized,
{
    type Err = C::Err;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        (**self).next_count_chunk()
    }
}

impl<C> AtomicCounter for Box<C>
where
    C: AtomicCounter + ?Sized,
{
    type Err = C::Err;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        (**self).next_count_chunk()
    }
}

impl<C> AtomicCounter for Arc<C>
where
    C: AtomicCounter + ?Sized,
{
    type Err = C::Err;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        (**self).next_count_chunk()
    }
}
