use crate::ShardPicker;

/// A fixed set of shard counters plus the [`ShardPicker`] that chooses
/// between them.
///
/// Each counter is normally a [`TransformedCounter`] whose [`Linear`] offset
/// places it in its own disjoint namespace. The group only selects; claiming
/// and dispensing happen in the generator that owns it.
///
/// [`TransformedCounter`]: crate::TransformedCounter
/// [`Linear`]: crate::Linear
#[derive(Debug, Clone)]
pub struct CounterGroup<C, P> {
    counters: Vec<C>,
    picker: P,
}

impl<C, P> CounterGroup<C, P>
where
    P: ShardPicker,
{
    /// Creates a new group over `counters`.
    ///
    /// # Panics
    /// Panics if `counters` is empty. A group without shards is a
    /// configuration error.
    ///
    /// # Example
    /// ```
    /// use shardcode::{CounterGroup, LocalCounter};
    ///
    /// let mut group = CounterGroup::new(
    ///     vec![LocalCounter::from_components(0, 1), LocalCounter::from_components(100, 1)],
    ///     |_len: usize| 1_usize,
    /// );
    /// assert_eq!(group.select_counter().peek(), 100);
    /// ```
    pub fn new(counters: Vec<C>, picker: P) -> Self {
        assert!(!counters.is_empty(), "must have at least 1 counter");
        Self { counters, picker }
    }

    /// Picks the shard to claim the next chunk from.
    ///
    /// Takes `&mut self`: the picker is not required to be thread-safe, so the
    /// caller must hold exclusive access for the duration of the call.
    ///
    /// # Panics
    /// Panics if the picker returns an index outside `0..self.len()`.
    pub fn select_counter(&mut self) -> &C {
        self.select_indexed().1
    }

    /// Same as [`Self::select_counter`], also returning the shard index.
    pub fn select_indexed(&mut self) -> (usize, &C) {
        let index = self.picker.pick(self.counters.len());
        (index, &self.counters[index])
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always `false`; a group holds at least one counter.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn counters(&self) -> &[C] {
        &self.counters
    }

    pub fn into_parts(self) -> (Vec<C>, P) {
        (self.counters, self.picker)
    }
}
