use std::sync::OnceLock;
use super::lcg::{iterations_32, Affine, AffineTable, Seeds};
use super::ConfigError;

/// 32-bit linear congruential generator with constant-time jumps.
/// Seeds are plain `u32` values; the generator only holds the step tables.
#[derive(Clone, Debug)]
pub struct Lcg32 {
    table: AffineTable<u32>,
}

impl Lcg32 {

    /// Builds jump tables for the step seed <- seed * mul + add.
    /// The step must be full period, which `index` relies on:
    /// an even multiplier or any other partial-period step is rejected.
    pub fn new(step: Affine<u32>) -> Result<Self, ConfigError> {
        if step.mul & 1 == 1 && (step.mul & 3 != 1 || step.add & 1 == 0) {
            return Err(ConfigError::NotFullPeriod { mul: step.mul, add: step.add });
        }
        Ok(Lcg32 { table: AffineTable::new(step)? })
    }

    fn preset(step: Affine<u32>) -> Self {
        Lcg32 { table: AffineTable::build(step) }
    }

    /// Shared instance for `super::LCG32_STANDARD`.
    pub fn standard() -> &'static Lcg32 {
        static LCG: OnceLock<Lcg32> = OnceLock::new();
        LCG.get_or_init(|| Lcg32::preset(super::LCG32_STANDARD))
    }

    /// Shared instance for `super::LCG32_GC`.
    pub fn gc() -> &'static Lcg32 {
        static LCG: OnceLock<Lcg32> = OnceLock::new();
        LCG.get_or_init(|| Lcg32::preset(super::LCG32_GC))
    }

    /// Shared instance for `super::LCG32_STATIC`.
    pub fn fixed() -> &'static Lcg32 {
        static LCG: OnceLock<Lcg32> = OnceLock::new();
        LCG.get_or_init(|| Lcg32::preset(super::LCG32_STATIC))
    }

    /// Shared instance for `super::LCG32_DAILY`.
    pub fn daily() -> &'static Lcg32 {
        static LCG: OnceLock<Lcg32> = OnceLock::new();
        LCG.get_or_init(|| Lcg32::preset(super::LCG32_DAILY))
    }

    /// Base step of this generator.
    pub fn step(&self) -> Affine<u32> {
        self.table.step()
    }

    #[inline]
    pub fn next_seed(&self, seed: u32) -> u32 {
        self.table.step().apply(seed)
    }

    /// Seed `n` steps after `seed`.
    #[inline]
    pub fn next_seed_by(&self, seed: u32, n: u32) -> u32 {
        self.table.advance(seed, n)
    }

    #[inline]
    pub fn prev_seed(&self, seed: u32) -> u32 {
        self.table.inverse().apply(seed)
    }

    /// Seed `n` steps before `seed`.
    #[inline]
    pub fn prev_seed_by(&self, seed: u32, n: u32) -> u32 {
        self.table.back(seed, n)
    }

    /// Advances the seed by one step and returns the new value.
    #[inline]
    pub fn advance(&self, seed: &mut u32) -> u32 {
        *seed = self.next_seed(*seed);
        *seed
    }

    /// Advances the seed by `n` steps and returns the new value.
    #[inline]
    pub fn advance_by(&self, seed: &mut u32, n: u32) -> u32 {
        *seed = self.next_seed_by(*seed, n);
        *seed
    }

    /// Moves the seed back by one step and returns the new value.
    #[inline]
    pub fn back(&self, seed: &mut u32) -> u32 {
        *seed = self.prev_seed(*seed);
        *seed
    }

    /// Moves the seed back by `n` steps and returns the new value.
    #[inline]
    pub fn back_by(&self, seed: &mut u32, n: u32) -> u32 {
        *seed = self.prev_seed_by(*seed, n);
        *seed
    }

    /// Advances the seed and returns its upper 16 bits.
    #[inline]
    pub fn get_rand(&self, seed: &mut u32) -> u32 {
        self.advance(seed) >> 16
    }

    /// Advances the seed and returns its upper 16 bits modulo `m`.
    #[inline]
    pub fn get_rand_mod(&self, seed: &mut u32, m: u32) -> u32 {
        self.get_rand(seed) % m
    }

    /// Number of steps from 0 to `seed`, modulo 2**32.
    pub fn index(&self, seed: u32) -> u32 {
        iterations_32(self.step(), 0, seed)
    }

    /// Number of steps from `initial_seed` to `seed`.
    pub fn index_from(&self, seed: u32, initial_seed: u32) -> u32 {
        iterations_32(self.step(), initial_seed, seed)
    }

    /// Returns a function advancing any seed by `n` steps with a single multiply-add.
    /// Cheaper than `next_seed_by` when the same distance is applied many times.
    pub fn jump_fn(&self, n: u32) -> impl Fn(u32) -> u32 {
        let map = self.table.forward_map(n);
        move |seed| map.apply(seed)
    }

    /// Returns a function moving any seed back by `n` steps with a single multiply-add.
    pub fn back_fn(&self, n: u32) -> impl Fn(u32) -> u32 {
        let map = self.table.backward_map(n);
        move |seed| map.apply(seed)
    }

    /// Iterates over `seed` and every seed after it.
    pub fn seeds(&self, seed: u32) -> Seeds<u32> {
        Seeds::new(self.step(), seed)
    }

    /// Iterates over the 16-bit outputs following `seed`.
    pub fn rands(&self, seed: u32) -> impl Iterator<Item = u32> {
        self.seeds(seed).skip(1).map(|s| s >> 16)
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn run_tests() {
        let lcg = Lcg32::standard();
        let seed = 0xbeeffaceu32;

        assert_eq!(0xb3ecee29, lcg.next_seed(seed));
        assert_eq!(lcg.next_seed(lcg.next_seed(lcg.next_seed(seed))), lcg.next_seed_by(seed, 3));
        assert_eq!(12345678, lcg.index(lcg.next_seed_by(0, 12345678)));
        assert_eq!(12345678, lcg.index_from(lcg.next_seed_by(0xbeef, 12345678), 0xbeef));
        assert_eq!(0, lcg.index(0));
        assert_eq!(u32::MAX, lcg.index(lcg.prev_seed(0)));

        // Inverse constants agree with the published ones.
        assert_eq!(Affine::new(0xeeb9eb65, 0x0a3561a1), lcg.step().inverse());
        assert_eq!(Affine::new(0xb9b33155, 0xa170f641), Lcg32::gc().step().inverse());
        assert_eq!(Affine::new(0xeeb9eb65, 0xfc77a683), Lcg32::fixed().step().inverse());
        assert_eq!(Affine::new(0x9638806d, 0x69c77f93), Lcg32::daily().step().inverse());

        for lcg in [Lcg32::standard(), Lcg32::gc(), Lcg32::fixed(), Lcg32::daily()] {
            let mut a = seed;
            let mut b = seed;
            for (n, s) in lcg.seeds(seed).take(2000).enumerate() {
                assert_eq!(s, lcg.next_seed_by(seed, n as u32));
                assert_eq!(seed, lcg.prev_seed_by(s, n as u32));
                assert_eq!(n as u32, lcg.index_from(s, seed));
            }
            lcg.advance_by(&mut a, 1000);
            for _ in 0 .. 1000 { lcg.advance(&mut b); }
            assert_eq!(a, b);
            lcg.back_by(&mut a, 999);
            lcg.back(&mut a);
            assert_eq!(seed, a);
            assert_eq!(lcg.jump_fn(123456)(seed), lcg.next_seed_by(seed, 123456));
            assert_eq!(lcg.back_fn(123456)(seed), lcg.prev_seed_by(seed, 123456));
            assert_eq!(seed, lcg.next_seed_by(lcg.next_seed_by(seed, u32::MAX), 1));
        }

        let mut s = 0u32;
        assert_eq!(Some(lcg.next_seed(0) >> 16), lcg.rands(0).next());
        let x = lcg.get_rand(&mut s);
        assert_eq!(lcg.next_seed(0) >> 16, x);
        assert_eq!(lcg.next_seed(0), s);
        assert!(lcg.get_rand_mod(&mut s, 25) < 25);

        assert_eq!(Err(ConfigError::EvenMultiplier(0x41c64e6c)), Lcg32::new(Affine::new(0x41c64e6c, 0x6073)).map(|_| ()));
        assert_eq!(Err(ConfigError::NotFullPeriod { mul: 0x41c64e6f, add: 0x6073 }), Lcg32::new(Affine::new(0x41c64e6f, 0x6073)).map(|_| ()));
        assert_eq!(Err(ConfigError::NotFullPeriod { mul: 0x41c64e6d, add: 0x6072 }), Lcg32::new(Affine::new(0x41c64e6d, 0x6072)).map(|_| ()));
        let custom = Lcg32::new(Affine::new(0x41c64e6d, 0x6073)).unwrap();
        assert_eq!(lcg.next_seed_by(seed, 777), custom.next_seed_by(seed, 777));
        assert_eq!(seed, custom.prev_seed(custom.next_seed(seed)));
        assert_eq!(777, custom.index_from(custom.next_seed_by(seed, 777), seed));
    }
}
