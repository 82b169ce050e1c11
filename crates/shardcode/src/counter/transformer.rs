#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{AtomicCounter, Result};

/// Linear map `raw × factor + offset` from a counter's raw values into a
/// shard-local namespace.
///
/// With `factor` equal to the chunk size, consecutive raw values `0, 1, 2`
/// become chunk starts `0, S, 2S`. A per-shard `offset` then moves each shard
/// into its own disjoint slice of the code space.
///
/// Both parameters default to the identity (`factor = 1`, `offset = 0`).
/// Arithmetic wraps: parameters that overflow `u64` are a configuration
/// error, detectable ahead of time with [`Linear::checked_apply`] or
/// [`ShardLayout`](crate::ShardLayout).
///
/// # Example
/// ```
/// use shardcode::Linear;
///
/// let shard_one = Linear::new().with_factor(1000).with_offset(1_000_000_000);
/// assert_eq!(shard_one.apply(0), 1_000_000_000);
/// assert_eq!(shard_one.apply(3), 1_000_003_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Linear {
    factor: u64,
    offset: u64,
}

impl Default for Linear {
    fn default() -> Self {
        Self::new()
    }
}

impl Linear {
    /// The identity transform.
    pub const fn new() -> Self {
        Self {
            factor: 1,
            offset: 0,
        }
    }

    /// Sets the multiplier applied to every raw value.
    #[must_use]
    pub const fn with_factor(mut self, factor: u64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the value added after multiplying.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub const fn factor(&self) -> u64 {
        self.factor
    }

    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maps a raw counter value into the shard namespace.
    pub const fn apply(&self, raw: u64) -> u64 {
        raw.wrapping_mul(self.factor).wrapping_add(self.offset)
    }

    /// Like [`Self::apply`], but returns `None` instead of wrapping.
    pub const fn checked_apply(&self, raw: u64) -> Option<u64> {
        match raw.checked_mul(self.factor) {
            Some(scaled) => scaled.checked_add(self.offset),
            None => None,
        }
    }
}

/// An [`AtomicCounter`] whose claimed chunk starts pass through a [`Linear`]
/// transform.
///
/// This is how a shard is assembled: the inner counter talks to the external
/// service, and the generator only ever sees already-namespaced values.
///
/// # Example
/// ```
/// use shardcode::{AtomicCounter, Linear, LocalCounter, TransformedCounter};
///
/// let shard = TransformedCounter::new(
///     LocalCounter::new(),
///     Linear::new().with_factor(10).with_offset(1000),
/// );
/// assert_eq!(shard.next_count_chunk(), Ok(1000));
/// assert_eq!(shard.next_count_chunk(), Ok(1010));
/// ```
#[derive(Debug, Clone)]
pub struct TransformedCounter<C> {
    pub(crate) counter: C,
    pub(crate) transformer: Linear,
}

impl<C> TransformedCounter<C> {
    pub const fn new(counter: C, transformer: Linear) -> Self {
        Self {
            counter,
            transformer,
        }
    }

    pub const fn counter(&self) -> &C {
        &self.counter
    }

    pub const fn transformer(&self) -> &Linear {
        &self.transformer
    }

    pub fn into_inner(self) -> C {
        self.counter
    }
}

impl<C> AtomicCounter for TransformedCounter<C>
where
    C: AtomicCounter,
{
    type Err = C::Err;

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        let raw = self.counter.next_count_chunk()?;
        Ok(self.transformer.apply(raw))
    }
}
