use std::sync::OnceLock;
use super::lcg::{Affine, AffineTable, Seeds};
use super::ConfigError;

/// 64-bit linear congruential generator with constant-time jumps.
/// Seeds are plain `u64` values. Unlike `Lcg32`, there is no index recovery.
#[derive(Clone, Debug)]
pub struct Lcg64 {
    table: AffineTable<u64>,
}

impl Lcg64 {

    /// Builds jump tables for the step seed <- seed * mul + add.
    /// Fails if the multiplier is even.
    pub fn new(step: Affine<u64>) -> Result<Self, ConfigError> {
        Ok(Lcg64 { table: AffineTable::new(step)? })
    }

    /// Shared instance for `super::LCG64_STANDARD`.
    pub fn standard() -> &'static Lcg64 {
        static LCG: OnceLock<Lcg64> = OnceLock::new();
        LCG.get_or_init(|| Lcg64 { table: AffineTable::build(super::LCG64_STANDARD) })
    }

    pub fn step(&self) -> Affine<u64> {
        self.table.step()
    }

    #[inline]
    pub fn next_seed(&self, seed: u64) -> u64 {
        self.table.step().apply(seed)
    }

    #[inline]
    pub fn next_seed_by(&self, seed: u64, n: u64) -> u64 {
        self.table.advance(seed, n)
    }

    #[inline]
    pub fn prev_seed(&self, seed: u64) -> u64 {
        self.table.inverse().apply(seed)
    }

    #[inline]
    pub fn prev_seed_by(&self, seed: u64, n: u64) -> u64 {
        self.table.back(seed, n)
    }

    #[inline]
    pub fn advance(&self, seed: &mut u64) -> u64 {
        *seed = self.next_seed(*seed);
        *seed
    }

    #[inline]
    pub fn advance_by(&self, seed: &mut u64, n: u64) -> u64 {
        *seed = self.next_seed_by(*seed, n);
        *seed
    }

    #[inline]
    pub fn back(&self, seed: &mut u64) -> u64 {
        *seed = self.prev_seed(*seed);
        *seed
    }

    #[inline]
    pub fn back_by(&self, seed: &mut u64, n: u64) -> u64 {
        *seed = self.prev_seed_by(*seed, n);
        *seed
    }

    /// Advances the seed and returns its upper 32 bits.
    #[inline]
    pub fn get_rand(&self, seed: &mut u64) -> u32 {
        (self.advance(seed) >> 32) as u32
    }

    /// Advances the seed and returns `(upper 32 bits * m) >> 32`, a value in `0 .. m`.
    #[inline]
    pub fn get_rand_scaled(&self, seed: &mut u64, m: u32) -> u32 {
        ((self.get_rand(seed) as u64 * m as u64) >> 32) as u32
    }

    pub fn jump_fn(&self, n: u64) -> impl Fn(u64) -> u64 {
        let map = self.table.forward_map(n);
        move |seed| map.apply(seed)
    }

    pub fn back_fn(&self, n: u64) -> impl Fn(u64) -> u64 {
        let map = self.table.backward_map(n);
        move |seed| map.apply(seed)
    }

    /// Iterates over `seed` and every seed after it.
    pub fn seeds(&self, seed: u64) -> Seeds<u64> {
        Seeds::new(self.step(), seed)
    }

    /// Iterates over the outputs following `seed`.
    pub fn rands(&self, seed: u64) -> impl Iterator<Item = u32> {
        self.seeds(seed).skip(1).map(|s| (s >> 32) as u32)
    }
}
