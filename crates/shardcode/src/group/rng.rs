use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ShardPicker;

/// A [`ShardPicker`] drawing uniformly distributed indices from an owned
/// [`rand::Rng`].
///
/// The RNG is owned, not shared: it is only touched through `&mut self`
/// under the generator's lock, so no thread-safe RNG is needed.
///
/// # Example
/// ```
/// use shardcode::{RngPicker, ShardPicker};
///
/// let mut first = RngPicker::seeded(1);
/// let mut second = RngPicker::seeded(1);
/// for _ in 0..16 {
///     let index = first.pick(4);
///     assert!(index < 4);
///     assert_eq!(index, second.pick(4));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RngPicker<R = StdRng> {
    rng: R,
}

impl<R> RngPicker<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngPicker<StdRng> {
    /// Deterministic picker, reproducible across runs for the same `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Picker seeded from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R> ShardPicker for RngPicker<R>
where
    R: Rng,
{
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
