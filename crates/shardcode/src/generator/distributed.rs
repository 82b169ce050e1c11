use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    AtomicCounter, CodeGenerator, CounterGroup, Error, Formatter, Result, ShardPicker,
    generator::{Dispenser, Mutex},
};

/// A lock-based generator of short, unique codes backed by sharded, chunked
/// counters.
///
/// The generator dispenses values from a locally held range and only talks
/// to an [`AtomicCounter`] when that range runs out: it then asks its
/// [`CounterGroup`] for a shard, claims the next chunk start from it, and
/// keeps dispensing. Every call runs under one mutex, *including* the claim,
/// so callers queue behind an in-flight claim but the local range is never
/// read or written concurrently.
///
/// ## Features
/// - ✅ Thread-safe (share it behind a reference or clone it; clones share
///   state)
/// - ✅ Unique codes, given disjoint shard namespaces
/// - ✅ A failed claim leaves the state untouched; the next call retries it
/// - ❌ Codes are sequential, not unpredictable
///
/// ## Recommended When
/// - Claiming from the counter service is expensive relative to a local
///   increment
/// - Gaps in the code space (unused parts of a range on restart) are
///   acceptable
///
/// ## See Also
/// - [`ShardLayout`] to build disjoint shard transforms
///
/// [`ShardLayout`]: crate::ShardLayout
pub struct DistributedGenerator<C, P, F> {
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<Dispenser<C, P>>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<Dispenser<C, P>>>,
    pub(crate) formatter: Arc<F>,
}

impl<C, P, F> Clone for DistributedGenerator<C, P, F> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            formatter: Arc::clone(&self.formatter),
        }
    }
}

impl<C, P, F> DistributedGenerator<C, P, F>
where
    C: AtomicCounter,
    P: ShardPicker,
    F: Formatter,
{
    /// Creates a new generator that claims `chunk_size` values at a time.
    ///
    /// The generator starts exhausted, so the first call always claims a
    /// chunk. `chunk_size` must match the factor of the shards' transforms,
    /// or claimed ranges will overlap or leave gaps. A `chunk_size` of 0
    /// claims on every call and dispenses each claimed start once.
    ///
    /// # Example
    /// ```
    /// use shardcode::{
    ///     CounterGroup, DistributedGenerator, Linear, LocalCounter, Radix, RngPicker,
    ///     TransformedCounter,
    /// };
    ///
    /// let shards = (0..2)
    ///     .map(|i| {
    ///         TransformedCounter::new(
    ///             LocalCounter::new(),
    ///             Linear::new().with_factor(1000).with_offset(i * 1_000_000_000),
    ///         )
    ///     })
    ///     .collect();
    ///
    /// let generator = DistributedGenerator::new(
    ///     1000,
    ///     CounterGroup::new(shards, RngPicker::from_os_rng()),
    ///     Radix::BASE62,
    /// );
    ///
    /// let code = generator.try_generate_code().unwrap();
    /// assert!(code == "0" || code == "15FTGg");
    /// ```
    pub fn new(chunk_size: u64, group: CounterGroup<C, P>, formatter: F) -> Self {
        let state = Mutex::new(Dispenser::new(chunk_size, group));
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(state),
            formatter: Arc::new(formatter),
        }
    }

    /// Generates the next code.
    ///
    /// If the local range is exhausted, claims a new one from a shard picked
    /// by the group, then dispenses its first value.
    ///
    /// # Errors
    /// - [`Error::CounterReset`] if the shard claim fails. Nothing changes
    ///   locally and no code is returned; calling again retries the claim.
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate_code(&self) -> Result<String, Error<C::Err>> {
        let value = {
            #[cfg(feature = "parking-lot")]
            let mut state = self.state.lock();
            #[cfg(not(feature = "parking-lot"))]
            let mut state = self.state.lock()?;

            state.try_dispense()?
        };

        Ok(self.formatter.format(value))
    }

    #[cfg(test)]
    pub(crate) fn from_components(
        counter: crate::ChunkedCounter,
        group: CounterGroup<C, P>,
        formatter: F,
    ) -> Self {
        let generator = Self::new(counter.step(), group, formatter);
        generator.with_state(|state| state.counter = counter);
        generator
    }

    #[cfg(test)]
    pub(crate) fn counter_snapshot(&self) -> crate::ChunkedCounter {
        self.with_state(|state| state.counter)
    }

    #[cfg(test)]
    fn with_state<R>(&self, f: impl FnOnce(&mut Dispenser<C, P>) -> R) -> R {
        #[cfg(feature = "parking-lot")]
        let mut state = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

impl<C, P, F> CodeGenerator for DistributedGenerator<C, P, F>
where
    C: AtomicCounter,
    P: ShardPicker,
    F: Formatter,
{
    type Err = Error<C::Err>;

    fn try_generate_code(&self) -> Result<String, Self::Err> {
        self.try_generate_code()
    }
}
