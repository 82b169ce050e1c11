//! Planning of disjoint shard namespaces.
//!
//! A generator trusts its shard configuration blindly: overlapping offsets or
//! overflowing factors silently produce duplicate codes. [`ShardLayout`]
//! computes per-shard [`Linear`] transforms from three numbers and rejects
//! layouts that cannot be disjoint, so hosts can fail at startup instead.

use thiserror::Error;

use crate::Linear;

/// Reasons a [`ShardLayout`] cannot be built.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum LayoutError {
    #[error("shard count must be greater than 0")]
    NoShards,

    #[error("chunk size must be greater than 0")]
    EmptyChunk,

    #[error("shard range ({range}) must be at least one chunk ({chunk_size})")]
    RangeSmallerThanChunk { range: u64, chunk_size: u64 },

    #[error("{shard_count} shards of range {range} exceed the 64-bit code space")]
    Overflow { shard_count: usize, range: u64 },
}

/// `shard_count` shards, each owning `[i × range, (i + 1) × range)` and
/// claiming `chunk_size` values at a time.
///
/// Shard `i`'s raw counter value `r` becomes the chunk start
/// `r × chunk_size + i × range`. As long as every shard's raw counter stays
/// below [`ShardLayout::max_chunks_per_shard`], the value sets of two shards
/// never intersect.
///
/// # Example
/// ```
/// use shardcode::ShardLayout;
///
/// let layout = ShardLayout::new(2, 1000, 1_000_000_000).unwrap();
/// assert_eq!(layout.transformer(1).apply(3), 1_000_003_000);
/// assert_eq!(layout.shard_of(1_000_003_999), Some(1));
/// assert_eq!(layout.max_chunks_per_shard(), 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardLayout {
    shard_count: usize,
    chunk_size: u64,
    range: u64,
}

impl ShardLayout {
    /// # Errors
    ///
    /// Returns a [`LayoutError`] when there are no shards, the chunk is
    /// empty, a shard cannot hold one full chunk, or the last shard's range
    /// does not fit in `u64`.
    pub fn new(shard_count: usize, chunk_size: u64, range: u64) -> Result<Self, LayoutError> {
        if shard_count == 0 {
            return Err(LayoutError::NoShards);
        }
        if chunk_size == 0 {
            return Err(LayoutError::EmptyChunk);
        }
        if range < chunk_size {
            return Err(LayoutError::RangeSmallerThanChunk { range, chunk_size });
        }

        // The last value of the last shard must be representable.
        let overflow = LayoutError::Overflow { shard_count, range };
        let last_offset = u64::try_from(shard_count - 1)
            .ok()
            .and_then(|last| last.checked_mul(range))
            .ok_or_else(|| overflow.clone())?;
        last_offset.checked_add(range - 1).ok_or(overflow)?;

        Ok(Self {
            shard_count,
            chunk_size,
            range,
        })
    }

    pub const fn shard_count(&self) -> usize {
        self.shard_count
    }

    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub const fn range(&self) -> u64 {
        self.range
    }

    /// First value of shard `index`'s namespace.
    pub const fn offset(&self, index: usize) -> u64 {
        index as u64 * self.range
    }

    /// Number of chunks a shard can claim before leaving its namespace.
    pub const fn max_chunks_per_shard(&self) -> u64 {
        self.range / self.chunk_size
    }

    /// Transform for shard `index`: `factor = chunk_size`, `offset = index × range`.
    pub const fn transformer(&self, index: usize) -> Linear {
        Linear::new()
            .with_factor(self.chunk_size)
            .with_offset(self.offset(index))
    }

    /// Shard whose namespace contains `value`, if any.
    pub fn shard_of(&self, value: u64) -> Option<usize> {
        let index = usize::try_from(value / self.range).ok()?;
        (index < self.shard_count).then_some(index)
    }

    /// Whether `raw` is still inside the shard's namespace once transformed.
    pub const fn is_raw_in_bounds(&self, raw: u64) -> bool {
        raw < self.max_chunks_per_shard()
    }
}
