use std::sync::OnceLock;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::gf2::{LinearJump, LinearState};
use super::hex::HexState;

/// Marsaglia's xorshift128: 128-bit state, 32-bit output.
/// The state is a plain value; every method either returns a new state or updates in place.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct XorShift128 {
    pub s0: u32,
    pub s1: u32,
    pub s2: u32,
    pub s3: u32,
}

impl XorShift128 {

    pub const fn new(s0: u32, s1: u32, s2: u32, s3: u32) -> Self {
        XorShift128 { s0, s1, s2, s3 }
    }

    /// Shared jump tables, built on first use.
    pub fn jumps() -> &'static LinearJump<XorShift128> {
        static JUMPS: OnceLock<LinearJump<XorShift128>> = OnceLock::new();
        JUMPS.get_or_init(|| LinearJump::new(XorShift128::next_state, XorShift128::prev_state))
    }

    /// Returns the following state.
    #[inline]
    pub fn next_state(self) -> Self {
        let t = self.s0 ^ (self.s0 << 11);
        let w = self.s3 ^ (self.s3 >> 19) ^ t ^ (t >> 8);
        XorShift128 { s0: self.s1, s1: self.s2, s2: self.s3, s3: w }
    }

    /// Returns the preceding state.
    #[inline]
    pub fn prev_state(self) -> Self {
        // Undo w = s3 ^ (s3 >> 19) ^ t ^ (t >> 8) and then t = s0 ^ (s0 << 11).
        let t = self.s3 ^ self.s2 ^ (self.s2 >> 19);
        let t = t ^ (t >> 8) ^ (t >> 16) ^ (t >> 24);
        let t = t ^ (t << 11) ^ (t << 22);
        XorShift128 { s0: t, s1: self.s0, s2: self.s1, s3: self.s2 }
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

    /// Advances and returns the raw new word.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        self.advance();
        self.s3
    }

    /// Advances and returns the game draw: the new word reduced modulo 0xffffffff,
    /// then offset by 0x80000000 with wrapping.
    #[inline]
    pub fn get_rand(&mut self) -> u32 {
        (self.next_word() % 0xffff_ffff).wrapping_add(0x8000_0000)
    }

    #[inline]
    pub fn get_rand_mod(&mut self, m: u32) -> u32 {
        self.get_rand() % m
    }

    /// Advances and returns the low 23 bits of the raw word scaled to [0, 1].
    #[inline]
    pub fn get_rand_f(&mut self) -> f32 {
        (self.next_word() & 0x7f_ffff) as f32 / 8388607.0
    }

    /// Advances and returns r * min + (1 - r) * max with r from `get_rand_f`.
    #[inline]
    pub fn get_rand_f_range(&mut self, min: f32, max: f32) -> f32 {
        let r = self.get_rand_f();
        r * min + (1.0 - r) * max
    }
}

impl LinearState for XorShift128 {
    const BITS: usize = 128;

    #[inline]
    fn to_bits(self) -> u128 {
        self.s0 as u128 | (self.s1 as u128) << 32 | (self.s2 as u128) << 64 | (self.s3 as u128) << 96
    }

    #[inline]
    fn from_bits(bits: u128) -> Self {
        XorShift128 { s0: bits as u32, s1: (bits >> 32) as u32, s2: (bits >> 64) as u32, s3: (bits >> 96) as u32 }
    }
}

impl HexState for XorShift128 {
    const DIGITS: usize = 32;

    fn to_hex_value(&self) -> u128 {
        (self.s0 as u128) << 96 | (self.s1 as u128) << 64 | (self.s2 as u128) << 32 | self.s3 as u128
    }

    fn from_hex_value(value: u128) -> Self {
        XorShift128 { s0: (value >> 96) as u32, s1: (value >> 64) as u32, s2: (value >> 32) as u32, s3: value as u32 }
    }
}

use rand_core::{impls, Error, RngCore, SeedableRng};

impl RngCore for XorShift128 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift128 {
    type Seed = [u8; 16];

    /// Words s0 to s3, each little-endian. The all-zero state is a fixed point.
    fn from_seed(seed: Self::Seed) -> Self {
        XorShift128::from_bits(u128::from_le_bytes(seed))
    }
}
