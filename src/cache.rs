//! Look-ahead ring cache for twist-based generators.
//!
//! Mersenne Twister style generators regenerate their whole state in one twist
//! and then hand out one tempered word per step. `RingCache` keeps `segments + 1`
//! twist periods of tempered output in a ring. A search loop can peek ahead from
//! a checkpoint with `get_rand` and `advance`, then move the checkpoint one step
//! with `move_next`, which is where the twists happen: exactly one twist per period
//! of checkpoint movement, however many segments are cached.

use super::ConfigError;

/// Largest number of cached segments `RingCache::new` accepts.
pub const MAX_SEGMENTS: usize = 100;

/// Generator whose outputs are produced in blocks by a twist of the whole state.
pub trait Twister {
    /// Number of 32-bit outputs produced per twist.
    const PERIOD: usize;

    /// Regenerates the state block.
    fn twist(&mut self);

    /// Writes the outputs of the current state block into `out`, which holds `PERIOD` words.
    fn temper_into(&self, out: &mut [u32]);
}

/// Ring of pre-tempered outputs with a movable checkpoint.
///
/// The `capacity - PERIOD` outputs following the checkpoint are always valid.
/// Reading past them with `get_rand` is a contract violation: debug builds panic,
/// release builds return stale outputs.
#[derive(Clone)]
pub struct RingCache<T> {
    twister: T,
    cache: Vec<u32>,
    /// Checkpoint position in the ring.
    head: usize,
    /// Logical step count at the checkpoint.
    head_index: u64,
    /// Reads since the checkpoint.
    temp_index: usize,
    /// Head position at which the next twist is due.
    next_period: usize,
}

impl<T> core::fmt::Debug for RingCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("RingCache")
            .field("capacity", &self.cache.len())
            .field("head", &self.head)
            .field("head_index", &self.head_index)
            .field("temp_index", &self.temp_index)
            .finish()
    }
}

impl<T: Twister> RingCache<T> {

    /// Fills the ring from a freshly seeded, not yet twisted generator.
    /// `segments` must be within 1..=`MAX_SEGMENTS`.
    pub fn new(mut twister: T, segments: usize) -> Result<Self, ConfigError> {
        if !(1 ..= MAX_SEGMENTS).contains(&segments) {
            return Err(ConfigError::SegmentsOutOfRange(segments));
        }
        let mut cache = vec![0u32; (segments + 1) * T::PERIOD];
        for block in cache.chunks_exact_mut(T::PERIOD) {
            twister.twist();
            twister.temper_into(block);
        }
        Ok(RingCache { twister, cache, head: 0, head_index: 0, temp_index: 0, next_period: T::PERIOD })
    }

    /// Total number of cached outputs.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cache.len()
    }

    /// Number of cached twist periods beyond the one being consumed.
    #[inline]
    pub fn segments(&self) -> usize {
        self.cache.len() / T::PERIOD - 1
    }

    /// Number of reads still safe before the next `move_next`.
    #[inline]
    pub fn lookahead(&self) -> usize {
        (self.cache.len() - T::PERIOD).saturating_sub(self.temp_index)
    }

    /// Logical step count: the checkpoint plus reads since it.
    #[inline]
    pub fn index(&self) -> u64 {
        self.head_index + self.temp_index as u64
    }

    /// Logical count of 64-bit draws.
    #[inline]
    pub fn index64(&self) -> u64 {
        self.index() / 2
    }

    /// Returns the next output after the checkpoint. Never twists.
    #[inline]
    pub fn get_rand(&mut self) -> u32 {
        debug_assert!(self.temp_index < self.cache.len() - T::PERIOD, "read past the cache look-ahead");
        let x = self.cache[(self.head + self.temp_index) % self.cache.len()];
        self.temp_index += 1;
        x
    }

    #[inline]
    pub fn get_rand_mod(&mut self, m: u32) -> u32 {
        self.get_rand() % m
    }

    /// Two consecutive outputs, low word first.
    #[inline]
    pub fn get_rand64(&mut self) -> u64 {
        let low = self.get_rand() as u64;
        low | (self.get_rand() as u64) << 32
    }

    #[inline]
    pub fn get_rand64_mod(&mut self, m: u32) -> u64 {
        self.get_rand64() % m as u64
    }

    /// Skips `k` outputs without reading them. The checkpoint does not move.
    #[inline]
    pub fn advance(&mut self, k: usize) {
        self.temp_index += k;
    }

    /// Moves the checkpoint one step forward and rewinds the peek position to it.
    /// Twists once each time the checkpoint crosses a period boundary.
    pub fn move_next(&mut self) {
        self.head += 1;
        self.head_index += 1;
        self.temp_index = 0;

        if self.head == self.next_period {
            let period = T::PERIOD;
            self.twister.twist();
            self.twister.temper_into(&mut self.cache[self.head - period .. self.head]);
            self.next_period += period;
            if self.head == self.cache.len() {
                self.head = 0;
            }
            if self.next_period > self.cache.len() {
                self.next_period = period;
            }
        }
    }
}
