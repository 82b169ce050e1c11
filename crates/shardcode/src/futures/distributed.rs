use core::convert::Infallible;
use std::sync::Arc;

use tokio::sync::Mutex;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

use crate::{
    AsyncAtomicCounter, CounterGroup, Error, Formatter, Result, ShardPicker,
    generator::Dispenser,
};

/// An async generator of short, unique codes backed by sharded, chunked
/// counters.
///
/// Behaves like [`DistributedGenerator`], but claims chunks through an
/// [`AsyncAtomicCounter`] and serializes callers on a [`tokio::sync::Mutex`].
/// The lock is held across the awaited claim, so tasks queue behind an
/// in-flight claim instead of blocking a worker thread.
///
/// The tokio mutex never poisons, so [`Error::LockPoisoned`] is never
/// returned.
///
/// [`DistributedGenerator`]: crate::DistributedGenerator
pub struct AsyncDistributedGenerator<C, P, F> {
    state: Arc<Mutex<Dispenser<C, P>>>,
    formatter: Arc<F>,
}

impl<C, P, F> Clone for AsyncDistributedGenerator<C, P, F> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            formatter: Arc::clone(&self.formatter),
        }
    }
}

impl<C, P, F> AsyncDistributedGenerator<C, P, F>
where
    C: AsyncAtomicCounter,
    P: ShardPicker,
    F: Formatter,
{
    /// Creates a new generator that claims `chunk_size` values at a time.
    ///
    /// # Example
    /// ```
    /// # tokio_test();
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn tokio_test() {
    /// use shardcode::{AsyncDistributedGenerator, CounterGroup, LocalCounter, Radix, RoundRobin};
    ///
    /// let generator = AsyncDistributedGenerator::new(
    ///     100,
    ///     CounterGroup::new(vec![LocalCounter::from_components(0, 100)], RoundRobin::new()),
    ///     Radix::BASE62,
    /// );
    ///
    /// assert_eq!(generator.generate_code().await, "0");
    /// assert_eq!(generator.generate_code().await, "1");
    /// # }
    /// ```
    pub fn new(chunk_size: u64, group: CounterGroup<C, P>, formatter: F) -> Self {
        Self {
            state: Arc::new(Mutex::new(Dispenser::new(chunk_size, group))),
            formatter: Arc::new(formatter),
        }
    }

    /// Generates the next code.
    ///
    /// This infallible method is only available for counters with
    /// infallible error types.
    pub async fn generate_code(&self) -> String
    where
        C::Err: Into<Infallible>,
    {
        match self.next_code().await {
            Ok(code) => code,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                // `into()` satisfies the trait bound at compile time.
                match Into::<Infallible>::into(e) {}
            }
        }
    }

    /// Generates the next code, claiming a new range if the local one is
    /// exhausted.
    ///
    /// # Errors
    /// - [`Error::CounterReset`] if the shard claim fails. The local range is
    ///   left untouched and the next call retries the claim.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub async fn try_generate_code(&self) -> Result<String, Error<C::Err>> {
        self.next_code().await.map_err(Error::CounterReset)
    }

    // The tokio mutex cannot poison, so a failed claim is the only error.
    async fn next_code(&self) -> Result<String, C::Err> {
        let value = self.state.lock().await.try_dispense_async().await?;
        Ok(self.formatter.format(value))
    }
}

impl<C, P> Dispenser<C, P>
where
    C: AsyncAtomicCounter,
    P: ShardPicker,
{
    /// Async counterpart of `try_dispense`, with the same handling of failed
    /// claims and empty ranges.
    pub(crate) async fn try_dispense_async(&mut self) -> Result<u64, C::Err> {
        if let Some(value) = self.counter.try_increase() {
            return Ok(value);
        }

        let (_index, counter) = self.group.select_indexed();
        let start = match counter.next_count_chunk_async().await {
            Ok(start) => start,
            Err(e) => {
                #[cfg(feature = "tracing")]
                warn!(shard = _index, error = ?e, "unable to claim count chunk");
                return Err(e);
            }
        };

        #[cfg(feature = "tracing")]
        debug!(shard = _index, start, "claimed count chunk");
        self.counter.reset(start);
        Ok(self.counter.try_increase().unwrap_or(start))
    }
}
