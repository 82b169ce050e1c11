/// A capability that picks one shard index out of `len`.
///
/// This is deliberately **not** a general random number generator and is
/// **not** required to be safe for concurrent use: [`ShardPicker::pick`]
/// takes `&mut self`, and a [`CounterGroup`] only calls it while its owning
/// generator holds the lock. A picker therefore needs to be `Send` to live
/// inside a shared generator, but never `Sync`.
///
/// Any `FnMut(usize) -> usize` closure is a picker, which keeps fixed
/// selections in tests short.
///
/// # Example
/// ```
/// use shardcode::ShardPicker;
///
/// let mut always_last = |len: usize| len - 1;
/// assert_eq!(always_last.pick(3), 2);
/// ```
///
/// [`CounterGroup`]: crate::CounterGroup
pub trait ShardPicker {
    /// Returns an index in `0..len`.
    ///
    /// `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> ShardPicker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Walks the shards in order, wrapping around.
///
/// Deterministic and allocation-free; spreads claims evenly when every shard
/// has the same capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    next: usize,
}

impl RoundRobin {
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl ShardPicker for RoundRobin {
    fn pick(&mut self, len: usize) -> usize {
        let index = self.next % len;
        self.next = index + 1;
        index
    }
}
