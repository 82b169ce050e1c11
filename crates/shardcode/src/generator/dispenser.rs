#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::{AtomicCounter, ChunkedCounter, CounterGroup, Error, Result, ShardPicker};

/// State a generator keeps behind its lock: the local range and the shards
/// that refill it.
#[derive(Debug)]
pub(crate) struct Dispenser<C, P> {
    pub(crate) counter: ChunkedCounter,
    pub(crate) group: CounterGroup<C, P>,
}

impl<C, P> Dispenser<C, P>
where
    P: ShardPicker,
{
    pub(crate) const fn new(chunk_size: u64, group: CounterGroup<C, P>) -> Self {
        Self {
            counter: ChunkedCounter::new(chunk_size),
            group,
        }
    }

    /// Returns the next value, claiming a fresh range first if the current
    /// one is exhausted.
    ///
    /// On a failed claim the chunked counter is left untouched. A claim that
    /// yields an empty range (a zero chunk size, or a start at `u64::MAX`)
    /// dispenses its start alone and leaves the counter exhausted, so the
    /// next call claims again.
    pub(crate) fn try_dispense(&mut self) -> Result<u64, Error<C::Err>>
    where
        C: AtomicCounter,
    {
        if let Some(value) = self.counter.try_increase() {
            return Ok(value);
        }

        let start = self.reset_counter()?;
        Ok(self.counter.try_increase().unwrap_or(start))
    }

    fn reset_counter(&mut self) -> Result<u64, Error<C::Err>>
    where
        C: AtomicCounter,
    {
        let (_index, counter) = self.group.select_indexed();
        let start = match counter.next_count_chunk() {
            Ok(start) => start,
            Err(e) => {
                #[cfg(feature = "tracing")]
                warn!(shard = _index, error = ?e, "unable to claim count chunk");
                return Err(Error::CounterReset(e));
            }
        };

        #[cfg(feature = "tracing")]
        debug!(shard = _index, start, "claimed count chunk");
        self.counter.reset(start);
        Ok(start)
    }
}
