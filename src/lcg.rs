use wrapping_arithmetic::wrappit;
use super::ConfigError;

// This module contains the affine jump machinery shared by the LCG families.
// An LCG iteration is seed <- seed * mul + add, so any number of iterations
// is again a single (mul, add) pair. Tables of these pairs, indexed by the
// bytes of a step count, give a jump of any length in one multiply-add per byte.

/// Unsigned word an LCG runs on. All arithmetic wraps.
pub trait LcgWord: Copy + Eq + core::fmt::Debug + Send + Sync + 'static {
    /// Width of the word in bytes.
    const BYTES: usize;
    const ZERO: Self;
    const ONE: Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    /// Returns byte `d` of the word, counting from the least significant.
    fn byte(self, d: usize) -> usize;
    fn to_u64(self) -> u64;
}

macro_rules! lcg_word {
    ($t:ty) => {
        impl LcgWord for $t {
            const BYTES: usize = core::mem::size_of::<$t>();
            const ZERO: Self = 0;
            const ONE: Self = 1;
            #[inline] fn wrapping_mul(self, rhs: Self) -> Self { <$t>::wrapping_mul(self, rhs) }
            #[inline] fn wrapping_add(self, rhs: Self) -> Self { <$t>::wrapping_add(self, rhs) }
            #[inline] fn wrapping_neg(self) -> Self { <$t>::wrapping_neg(self) }
            #[inline] fn byte(self, d: usize) -> usize { ((self >> (d << 3)) & 0xff) as usize }
            #[inline] fn to_u64(self) -> u64 { self as u64 }
        }
    };
}

lcg_word!(u32);
lcg_word!(u64);

/// The affine map x -> x * mul + add modulo 2**W.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Affine<T> {
    pub mul: T,
    pub add: T,
}

impl<T: LcgWord> Affine<T> {
    pub const fn new(mul: T, add: T) -> Self {
        Affine { mul, add }
    }

    /// The map that leaves every seed unchanged.
    pub fn identity() -> Self {
        Affine { mul: T::ONE, add: T::ZERO }
    }

    #[inline]
    pub fn apply(self, seed: T) -> T {
        seed.wrapping_mul(self.mul).wrapping_add(self.add)
    }

    /// Returns the map that applies `self` first, then `next`.
    #[inline]
    pub fn then(self, next: Self) -> Self {
        Affine { mul: self.mul.wrapping_mul(next.mul), add: self.add.wrapping_mul(next.mul).wrapping_add(next.add) }
    }

    /// Returns the map applied twice: (a, b)² = (a², b·(1 + a)).
    #[inline]
    pub fn squared(self) -> Self {
        Affine { mul: self.mul.wrapping_mul(self.mul), add: self.add.wrapping_mul(T::ONE.wrapping_add(self.mul)) }
    }

    /// Returns the inverse map. The multiplier must be odd.
    pub fn inverse(self) -> Self {
        debug_assert!(self.mul.byte(0) & 1 == 1, "affine map with even multiplier is not invertible");
        // Newton iteration; every odd a satisfies a * a = 1 (mod 8),
        // and each round doubles the number of correct low bits.
        let two = T::ONE.wrapping_add(T::ONE);
        let mut inv = self.mul;
        for _ in 0 .. 6 {
            inv = inv.wrapping_mul(two.wrapping_add(self.mul.wrapping_mul(inv).wrapping_neg()));
        }
        Affine { mul: inv, add: self.add.wrapping_mul(inv).wrapping_neg() }
    }

    /// Returns the map that iterates `self` n times.
    pub fn pow(self, n: u128) -> Self {
        // Algorithm from Brown, F. B., "Random Number Generation with Arbitrary Stride",
        // Transactions of the American Nuclear Society, 1994.
        let mut unit = self;
        let mut jump = Self::identity();
        let mut delta = n;
        while delta > 0 {
            if delta & 1 == 1 {
                jump = jump.then(unit);
            }
            unit = unit.squared();
            delta >>= 1;
        }
        jump
    }
}

/// Byte-indexed jump table: `forward[d][v]` iterates the base step `v * 256**d` times,
/// and `backward[d][v]` undoes the same number of steps.
#[derive(Clone)]
pub struct AffineTable<T> {
    step: Affine<T>,
    inverse: Affine<T>,
    forward: Vec<[Affine<T>; 256]>,
    backward: Vec<[Affine<T>; 256]>,
}

// The tables are a few kilobytes; keep them out of debug output.
impl<T> core::fmt::Debug for AffineTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "AffineTable {{}}")
    }
}

fn build_rows<T: LcgWord>(step: Affine<T>) -> Vec<[Affine<T>; 256]> {
    let mut rows = Vec::with_capacity(T::BYTES);
    let mut unit = step;
    for _ in 0 .. T::BYTES {
        let mut row = [Affine::identity(); 256];
        for v in 1 .. 256 {
            row[v] = row[v - 1].then(unit);
        }
        rows.push(row);
        for _ in 0 .. 8 {
            unit = unit.squared();
        }
    }
    rows
}

impl<T: LcgWord> AffineTable<T> {
    /// Builds forward and backward tables for the base step.
    /// Fails if the base multiplier is even, since the step then has no inverse.
    pub fn new(step: Affine<T>) -> Result<Self, ConfigError> {
        if step.mul.byte(0) & 1 == 0 {
            return Err(ConfigError::EvenMultiplier(step.mul.to_u64()));
        }
        Ok(Self::build(step))
    }

    /// Builds the tables for a step already known to be invertible.
    pub(crate) fn build(step: Affine<T>) -> Self {
        let inverse = step.inverse();
        AffineTable { step, inverse, forward: build_rows(step), backward: build_rows(inverse) }
    }

    /// Base step.
    pub fn step(&self) -> Affine<T> {
        self.step
    }

    /// Inverse of the base step.
    pub fn inverse(&self) -> Affine<T> {
        self.inverse
    }

    /// Seed after `n` steps forward.
    #[inline]
    pub fn advance(&self, seed: T, n: T) -> T {
        self.forward.iter().enumerate().fold(seed, |seed, (d, row)| row[n.byte(d)].apply(seed))
    }

    /// Seed after `n` steps backward.
    #[inline]
    pub fn back(&self, seed: T, n: T) -> T {
        self.backward.iter().enumerate().fold(seed, |seed, (d, row)| row[n.byte(d)].apply(seed))
    }

    /// Single map equivalent to `n` steps forward.
    pub fn forward_map(&self, n: T) -> Affine<T> {
        self.forward.iter().enumerate().fold(Affine::identity(), |map, (d, row)| map.then(row[n.byte(d)]))
    }

    /// Single map equivalent to `n` steps backward.
    pub fn backward_map(&self, n: T) -> Affine<T> {
        self.backward.iter().enumerate().fold(Affine::identity(), |map, (d, row)| map.then(row[n.byte(d)]))
    }
}

/// Endless iterator over successive seeds, starting with the initial one.
#[derive(Clone, Debug)]
pub struct Seeds<T> {
    step: Affine<T>,
    seed: T,
}

impl<T: LcgWord> Seeds<T> {
    pub fn new(step: Affine<T>, seed: T) -> Self {
        Seeds { step, seed }
    }
}

impl<T: LcgWord> Iterator for Seeds<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let seed = self.seed;
        self.seed = self.step.apply(seed);
        Some(seed)
    }
}

/// Returns the number of iterations between origin and state for a 32-bit LCG.
/// The step must be full period (multiplier 1 mod 4, odd increment); `Lcg32::new` checks this.
#[wrappit]
pub fn iterations_32(step: Affine<u32>, origin: u32, state: u32) -> u32 {
    // Bit k of the distance is decided by bit k of the seeds once all lower bits agree:
    // the map iterated 2**k times fixes the low k bits and toggles bit k.
    let mut jump_m = step.mul;
    let mut jump_p = step.add;
    let mut ordinal: u32 = 0;
    let mut address = origin;

    for k in 0 .. 32 {
        let bit = 1u32 << k;
        if (bit & address) != (bit & state) {
            address = address * jump_m + jump_p;
            ordinal = ordinal | bit;
        }
        jump_p = (jump_m + 1) * jump_p;
        jump_m *= jump_m;
    }
    ordinal
}

#[cfg(test)] mod tests {
    use super::*;
    use super::super::*;

    #[test] pub fn run_tests() {

        let mut r: u64 = 0;
        let mut rnd = || -> u64 { r = r.wrapping_mul(LCG64_MULTIPLIER).wrapping_add(0xffff); r >> 16 };

        for _ in 0 .. 1 << 6 {

            // Full period: multiplier 1 mod 4, odd increment.
            let m = ((rnd() as u32) & !3) | 1;
            let p = (rnd() as u32) | 1;
            let step = Affine::new(m, p);
            let table = AffineTable::new(step).unwrap();
            let origin = rnd() as u32;

            assert_eq!(origin.wrapping_mul(m).wrapping_add(p), table.advance(origin, 1));
            assert_eq!(origin, table.back(table.advance(origin, 1), 1));
            assert_eq!(Affine::identity(), step.then(step.inverse()));
            assert_eq!(origin, table.advance(origin, 0));

            let mut state = origin;
            for n in 0 .. 300u32 {
                assert_eq!(state, table.advance(origin, n));
                assert_eq!(origin, table.back(state, n));
                assert_eq!(n, iterations_32(step, origin, state));
                state = step.apply(state);
            }

            let n = rnd() as u32;
            let h = n & rnd() as u32;
            let state = table.advance(origin, n);
            assert_eq!(state, step.pow(n as u128).apply(origin));
            assert_eq!(state, table.forward_map(n).apply(origin));
            assert_eq!(origin, table.backward_map(n).apply(state));
            assert_eq!(n, iterations_32(step, origin, state));
            assert_eq!(n - h, iterations_32(step, table.advance(origin, h), state));
            assert_eq!(table.advance(table.advance(origin, h), n - h), state);
            assert_eq!(origin, table.advance(origin, u32::MAX).wrapping_mul(m).wrapping_add(p));
        }

        for _ in 0 .. 1 << 6 {
            let m = (rnd() << 32 | rnd()) | 1;
            let p = rnd() << 32 | rnd();
            let step = Affine::new(m, p);
            let table = AffineTable::new(step).unwrap();
            let origin = rnd() << 32 | rnd();
            let n = rnd() << 32 | rnd();
            let state = table.advance(origin, n);
            assert_eq!(state, step.pow(n as u128).apply(origin));
            assert_eq!(origin, table.back(state, n));
            assert_eq!(step.pow(n as u128), table.forward_map(n));
        }

        assert_eq!(Err(ConfigError::EvenMultiplier(0x41c64e6c)), AffineTable::new(Affine::new(0x41c64e6cu32, 0x6073)).map(|_| ()));
        assert_eq!(Err(ConfigError::EvenMultiplier(0)), AffineTable::new(Affine::new(0u64, 1)).map(|_| ()));
        assert!(AffineTable::new(Affine::new(3u32, 0)).is_ok());
    }
}
