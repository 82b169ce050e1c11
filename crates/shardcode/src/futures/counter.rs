use core::{convert::Infallible, fmt, future::Future};
use std::sync::Arc;

use crate::{AtomicCounter, LocalCounter, Result, TransformedCounter};

/// The async counterpart to [`AtomicCounter`], for counter services reached
/// over the network (a key-value store, a database sequence).
///
/// Each call must return a start value no other caller has received, exactly
/// like [`AtomicCounter::next_count_chunk`].
pub trait AsyncAtomicCounter {
    /// The error type returned when a claim fails.
    type Err: fmt::Debug;

    /// Claims the next chunk start.
    ///
    /// # Errors
    ///
    /// Implementation specific. A failed claim may still have been applied by
    /// the service; callers treat it as a gap, never as a retryable no-op.
    fn next_count_chunk_async(&self) -> impl Future<Output = Result<u64, Self::Err>>;
}

impl AsyncAtomicCounter for LocalCounter {
    type Err = Infallible;

    fn next_count_chunk_async(&self) -> impl Future<Output = Result<u64, Self::Err>> {
        core::future::ready(self.next_count_chunk())
    }
}

impl<C> AsyncAtomicCounter for TransformedCounter<C>
where
    C: AsyncAtomicCounter,
{
    type Err = C::Err;

    async fn next_count_chunk_async(&self) -> Result<u64, Self::Err> {
        let raw = self.counter.next_count_chunk_async().await?;
        Ok(self.transformer.apply(raw))
    }
}

impl<C> AsyncAtomicCounter for &C
where
    C: AsyncAtomicCounter + ?Sized,
{
    type Err = C::Err;

    fn next_count_chunk_async(&self) -> impl Future<Output = Result<u64, Self::Err>> {
        (**self).next_count_chunk_async()
    }
}

impl<C> AsyncAtomicCounter for Arc<C>
where
    C: AsyncAtomicCounter + ?Sized,
{
    type Err = C::Err;

    fn next_count_chunk_async(&self) -> impl Future<Output = Result<u64, Self::Err>> {
        (**self).next_count_chunk_async()
    }
}
