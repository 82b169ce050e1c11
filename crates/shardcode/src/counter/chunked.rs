/// Tracks how much of the currently claimed numeric range remains.
///
/// The values not yet dispensed are exactly `[current, end)`. A freshly built
/// counter has `current == end == 0`, so it starts out exhausted and the first
/// use always claims a range.
///
/// `ChunkedCounter` does no synchronization of its own. It is meant to be
/// owned by a generator that serializes every `is_over`/`increase`/`reset`
/// sequence under one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkedCounter {
    step: u64,
    current: u64,
    end: u64,
}

impl ChunkedCounter {
    /// Creates an exhausted counter whose claimed ranges are `step` wide.
    pub const fn new(step: u64) -> Self {
        Self {
            step,
            current: 0,
            end: 0,
        }
    }

    /// Returns `true` when the claimed range has no values left.
    ///
    /// Covers both the initial zero state and a fully dispensed range.
    pub const fn is_over(&self) -> bool {
        self.current >= self.end
    }

    /// Returns the next value of the claimed range and advances past it.
    ///
    /// The caller must check [`Self::is_over`] first: increasing an exhausted
    /// counter yields a value outside the claimed range that may belong to
    /// another process. Past `u64::MAX` the counter stays put instead of
    /// wrapping back to zero.
    pub const fn increase(&mut self) -> u64 {
        let previous = self.current;
        self.current = self.current.saturating_add(1);
        previous
    }

    /// Like [`Self::increase`], but returns `None` once the range is
    /// exhausted.
    pub const fn try_increase(&mut self) -> Option<u64> {
        if self.is_over() {
            return None;
        }
        // `current < end <= u64::MAX`, so this cannot overflow.
        let previous = self.current;
        self.current += 1;
        Some(previous)
    }

    /// Starts dispensing a newly claimed range `[initial, initial + step)`.
    ///
    /// The end saturates at `u64::MAX`, so a range crossing it is cut short
    /// and one claimed at `u64::MAX` itself is empty. A zero `step` also
    /// yields an empty range.
    pub const fn reset(&mut self, initial: u64) {
        self.current = initial;
        self.end = initial.saturating_add(self.step);
    }

    /// Width of every claimed range.
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Next value to dispense.
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Exclusive upper bound of the claimed range.
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Number of values left in the claimed range.
    pub const fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.current)
    }

    #[cfg(test)]
    pub(crate) const fn from_components(step: u64, current: u64, end: u64) -> Self {
        Self { step, current, end }
    }
}
