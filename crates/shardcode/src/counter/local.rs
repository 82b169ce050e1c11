use portable_atomic::{AtomicU64, Ordering};

use crate::{AtomicCounter, Result};

/// A lock-free, in-process [`AtomicCounter`].
///
/// Hands out `start`, `start + step`, `start + 2 × step`, ... Every claim is a
/// single atomic `fetch_add`, so values are unique across threads. Nothing is
/// persisted: the sequence restarts on every process start, which makes this
/// type suitable for tests, benchmarks, and single-process simulations, not
/// for coordinating several processes.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Infallible
/// - ❌ Not durable across restarts
///
/// # Example
/// ```
/// use shardcode::{AtomicCounter, LocalCounter};
///
/// let counter = LocalCounter::from_components(1000, 10);
/// assert_eq!(counter.next_count_chunk(), Ok(1000));
/// assert_eq!(counter.next_count_chunk(), Ok(1010));
/// ```
#[derive(Debug)]
pub struct LocalCounter {
    next: AtomicU64,
    step: u64,
}

impl Default for LocalCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalCounter {
    /// Creates a counter yielding `0, 1, 2, ...`.
    pub const fn new() -> Self {
        Self::from_components(0, 1)
    }

    /// Creates a counter yielding `start`, then advancing by `step` per claim.
    pub const fn from_components(start: u64, step: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
            step,
        }
    }

    /// Value the next claim will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl AtomicCounter for LocalCounter {
    type Err = core::convert::Infallible;

    fn next_count_chunk(&self) -> Result<u64, Self::Err> {
        Ok(self.next.fetch_add(self.step, Ordering::Relaxed))
    }
}
