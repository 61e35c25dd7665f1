use std::sync::OnceLock;
use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use super::gf2::{LinearJump, LinearState};
use super::hex::HexState;

// TinyMT32 parameters from Saito and Matsumoto's reference implementation.
const MAT1: u32 = 0x8f7011ee;
const MAT2: u32 = 0xfc78ff1f;
const TMAT: u32 = 0x3793fdff;
const MASK: u32 = 0x7fffffff;
const SH0: u32 = 1;
const SH1: u32 = 10;
const SH8: u32 = 8;

/// TinyMT32: 127-bit state, 32-bit output.
/// The top bit of `s0` never influences the sequence and `prev_state` always clears it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct TinyMt {
    pub s0: u32,
    pub s1: u32,
    pub s2: u32,
    pub s3: u32,
}

impl TinyMt {

    pub const fn new(s0: u32, s1: u32, s2: u32, s3: u32) -> Self {
        TinyMt { s0, s1, s2, s3 }
    }

    /// Seeds the generator with the reference initialisation.
    #[wrappit]
    pub fn from_seed32(seed: u32) -> Self {
        let mut v = [seed, MAT1, MAT2, TMAT];
        for i in 1 .. 8u32 {
            let p = v[((i - 1) & 3) as usize];
            v[(i & 3) as usize] ^= i + (p ^ (p >> 30)) * 0x6c078965;
        }
        let mut state = TinyMt::new(v[0], v[1], v[2], v[3]);
        for _ in 0 .. 8 {
            state.advance();
        }
        state
    }

    /// Shared jump tables, built on first use.
    pub fn jumps() -> &'static LinearJump<TinyMt> {
        static JUMPS: OnceLock<LinearJump<TinyMt>> = OnceLock::new();
        JUMPS.get_or_init(|| LinearJump::new(TinyMt::next_state, TinyMt::prev_state))
    }

    /// Returns the following state.
    #[inline]
    pub fn next_state(self) -> Self {
        let mut x = (self.s0 & MASK) ^ self.s1 ^ self.s2;
        x ^= x << SH0;
        let y = self.s3 ^ (self.s3 >> SH0) ^ x;
        // Conditional XOR by the low bit of y keeps the step linear.
        let lsb = (y & 1).wrapping_neg();
        TinyMt { s0: self.s1, s1: self.s2 ^ (lsb & MAT1), s2: x ^ (y << SH1) ^ (lsb & MAT2), s3: y }
    }

    /// Returns the preceding state, with the unused top bit of `s0` cleared.
    #[inline]
    pub fn prev_state(self) -> Self {
        let y = self.s3;
        let lsb = (y & 1).wrapping_neg();
        let s2 = self.s1 ^ (lsb & MAT1);
        let x = self.s2 ^ (lsb & MAT2) ^ (y << SH1);
        // Undo s3 ^ (s3 >> 1) and x ^ (x << 1).
        let mut s3 = y ^ x;
        let mut x0 = x;
        for k in [1, 2, 4, 8, 16] {
            s3 ^= s3 >> k;
            x0 ^= x0 << k;
        }
        // The top bit of self.s0 is unused, so the top bit of s1 comes from x0 = (s0 & MASK) ^ s1 ^ s2.
        let s1 = (self.s0 & MASK) | ((x0 ^ s2) & !MASK);
        TinyMt { s0: (x0 ^ s1 ^ s2) & MASK, s1, s2, s3 }
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

    /// Output of the current state, without stepping.
    #[wrappit] #[inline]
    pub fn temper(&self) -> u32 {
        let t1 = self.s0 + (self.s2 >> SH8);
        let t0 = self.s3 ^ t1;
        if t1 & 1 == 1 { t0 ^ TMAT } else { t0 }
    }

    /// Advances and returns the tempered output.
    #[inline]
    pub fn get_rand(&mut self) -> u32 {
        self.advance();
        self.temper()
    }

    #[inline]
    pub fn get_rand_mod(&mut self, m: u32) -> u32 {
        self.get_rand() % m
    }

    /// State with the unused top bit of `s0` cleared.
    pub fn masked(self) -> Self {
        TinyMt { s0: self.s0 & MASK, ..self }
    }
}

impl LinearState for TinyMt {
    const BITS: usize = 128;

    #[inline]
    fn to_bits(self) -> u128 {
        self.s0 as u128 | (self.s1 as u128) << 32 | (self.s2 as u128) << 64 | (self.s3 as u128) << 96
    }

    #[inline]
    fn from_bits(bits: u128) -> Self {
        TinyMt { s0: bits as u32, s1: (bits >> 32) as u32, s2: (bits >> 64) as u32, s3: (bits >> 96) as u32 }
    }
}

impl HexState for TinyMt {
    const DIGITS: usize = 32;

    fn to_hex_value(&self) -> u128 {
        (self.s0 as u128) << 96 | (self.s1 as u128) << 64 | (self.s2 as u128) << 32 | self.s3 as u128
    }

    fn from_hex_value(value: u128) -> Self {
        TinyMt { s0: (value >> 96) as u32, s1: (value >> 64) as u32, s2: (value >> 32) as u32, s3: value as u32 }
    }
}

use rand_core::{impls, Error, RngCore, SeedableRng};

impl RngCore for TinyMt {
    fn next_u32(&mut self) -> u32 {
        self.get_rand()
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

impl SeedableRng for TinyMt {
    type Seed = [u8; 4];

    /// Little-endian 32-bit seed passed through the reference initialisation.
    fn from_seed(seed: Self::Seed) -> Self {
        TinyMt::from_seed32(u32::from_le_bytes(seed))
    }
}
