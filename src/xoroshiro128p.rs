use std::sync::OnceLock;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::gf2::{LinearJump, LinearState};
use super::hex::HexState;

/// xoroshiro128+ by Blackman and Vigna (rotations 24, 16, 37): 128-bit state, 64-bit output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Xoroshiro128p {
    pub s0: u64,
    pub s1: u64,
}

/// Increment of the additive 64-bit seed sequence that the games step between xoroshiro128+ seedings.
pub const SEED_INCREMENT: u64 = 0x82a2b175229d6a5b;

/// Moves a 64-bit seed `n` places forward in the additive sequence and returns the new value.
#[inline]
pub fn advance_seed64(seed: &mut u64, n: u64) -> u64 {
    *seed = seed.wrapping_add(SEED_INCREMENT.wrapping_mul(n));
    *seed
}

/// Moves a 64-bit seed `n` places back in the additive sequence and returns the new value.
#[inline]
pub fn back_seed64(seed: &mut u64, n: u64) -> u64 {
    *seed = seed.wrapping_sub(SEED_INCREMENT.wrapping_mul(n));
    *seed
}

/// One SplitMix64 output for `seed + offset`.
#[wrappit] #[inline]
fn splitmix(seed: u32, offset: u64) -> u64 {
    let x = offset + seed as u64;
    let x = (x ^ (x >> 30)) * 0xbf58476d1ce4e5b9;
    let x = (x ^ (x >> 27)) * 0x94d049bb133111eb;
    x ^ (x >> 31)
}

impl Xoroshiro128p {

    pub const fn new(s0: u64, s1: u64) -> Self {
        Xoroshiro128p { s0, s1 }
    }

    /// Expands a 32-bit seed into a full state with two SplitMix64 rounds.
    pub fn from_seed32(seed: u32) -> Self {
        Xoroshiro128p { s0: splitmix(seed, 0x9e3779b97f4a7c15), s1: splitmix(seed, 0x3c6ef372fe94f82a) }
    }

    /// Shared jump tables, built on first use.
    pub fn jumps() -> &'static LinearJump<Xoroshiro128p> {
        static JUMPS: OnceLock<LinearJump<Xoroshiro128p>> = OnceLock::new();
        JUMPS.get_or_init(|| LinearJump::new(Xoroshiro128p::next_state, Xoroshiro128p::prev_state))
    }

    /// Returns the following state.
    #[inline]
    pub fn next_state(self) -> Self {
        let s0 = self.s0;
        let s1 = self.s0 ^ self.s1;
        Xoroshiro128p { s0: s0.rotate_left(24) ^ s1 ^ (s1 << 16), s1: s1.rotate_left(37) }
    }

    /// Returns the preceding state.
    #[inline]
    pub fn prev_state(self) -> Self {
        // x is the previous s0 ^ s1.
        let x = self.s1.rotate_right(37);
        let s0 = (self.s0 ^ x ^ (x << 16)).rotate_right(24);
        Xoroshiro128p { s0, s1: s0 ^ x }
    }

    /// Returns the state n steps ahead.
    pub fn next_state_by(self, n: u64) -> Self {
        Self::jumps().advance(self, n as u128)
    }

    /// Returns the state n steps back.
    pub fn prev_state_by(self, n: u64) -> Self {
        Self::jumps().back(self, n as u128)
    }

    #[inline]
    pub fn advance(&mut self) {
        *self = self.next_state();
    }

    #[inline]
    pub fn back(&mut self) {
        *self = self.prev_state();
    }

    pub fn advance_by(&mut self, n: u64) {
        *self = self.next_state_by(n);
    }

    pub fn back_by(&mut self, n: u64) {
        *self = self.prev_state_by(n);
    }

    /// Returns s0 + s1 and then advances.
    #[wrappit] #[inline]
    pub fn get_rand(&mut self) -> u64 {
        let result = self.s0 + self.s1;
        self.advance();
        result
    }

    /// Returns a value below `range` by masking to the enclosing power of two and rejecting.
    /// Every rejected draw consumes a step. `range` must be nonzero.
    pub fn get_rand_bounded(&mut self, range: u32) -> u64 {
        debug_assert!(range > 0, "range must be nonzero");
        let mask = (range as u64).next_power_of_two() - 1;
        loop {
            let x = self.get_rand() & mask;
            if x < range as u64 {
                return x;
            }
        }
    }
}

impl LinearState for Xoroshiro128p {
    const BITS: usize = 128;

    #[inline]
    fn to_bits(self) -> u128 {
        self.s0 as u128 | (self.s1 as u128) << 64
    }

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Xoroshiro128p { s0: bits as u64, s1: (bits >> 64) as u64 }
    }
}

impl HexState for Xoroshiro128p {
    const DIGITS: usize = 32;

    fn to_hex_value(&self) -> u128 {
        self.to_bits()
    }

    fn from_hex_value(value: u128) -> Self {
        Xoroshiro128p::from_bits(value)
    }
}

use rand_core::{Error, RngCore, SeedableRng};

impl RngCore for Xoroshiro128p {
    fn next_u32(&mut self) -> u32 {
        (self.get_rand() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.get_rand()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.get_rand();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoroshiro128p {
    type Seed = [u8; 16];

    /// s0 from the first 8 bytes, s1 from the last 8, both little-endian.
    fn from_seed(seed: Self::Seed) -> Self {
        Xoroshiro128p::from_bits(u128::from_le_bytes(seed))
    }
}
