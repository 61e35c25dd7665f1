use wrapping_arithmetic::wrappit;
use super::cache::{RingCache, Twister};
use super::ConfigError;

/// Number of 32-bit words in the SFMT-19937 state, also the outputs per twist.
pub const SFMT_N32: usize = 624;
const POS1: usize = 122;
const SL1: u32 = 18;
const SR1: u32 = 11;
const MSK: [u32; 4] = [0xdfffffef, 0xddfecb7f, 0xbffaffff, 0xbffffff6];
const PARITY: [u32; 4] = [0x00000001, 0x00000000, 0x00000000, 0x13c9e684];

/// Raw SFMT-19937 state block. The words are emitted as they are, without tempering.
#[derive(Clone)]
pub struct SfmtState {
    state: Box<[u32; SFMT_N32]>,
}

impl core::fmt::Debug for SfmtState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "SfmtState {{}}")
    }
}

impl SfmtState {

    /// Reference initialisation followed by the period certification.
    #[wrappit]
    pub fn from_seed32(seed: u32) -> Self {
        let mut state = Box::new([0u32; SFMT_N32]);
        state[0] = seed;
        for i in 1 .. SFMT_N32 {
            let p = state[i - 1];
            state[i] = (p ^ (p >> 30)) * 0x6c078965 + i as u32;
        }
        let mut sfmt = SfmtState { state };
        sfmt.certify_period();
        sfmt
    }

    /// Flips one bit if needed so the state lies on the full-period orbit.
    fn certify_period(&mut self) {
        let inner = (0 .. 4).fold(0u32, |acc, i| acc ^ (self.state[i] & PARITY[i]));
        if inner.count_ones() & 1 == 0 {
            if let Some(i) = PARITY.iter().position(|&p| p != 0) {
                self.state[i] ^= 1 << PARITY[i].trailing_zeros();
            }
        }
    }

    /// Regenerates the state, 128 bits at a time.
    pub fn twist(&mut self) {
        let p = &mut *self.state;
        let mut a = 0;
        let mut b = POS1 * 4;
        let mut c = (SFMT_N32 / 4 - 2) * 4;
        let mut d = (SFMT_N32 / 4 - 1) * 4;
        while a < SFMT_N32 {
            // Lanes are updated high to low so each 8-bit shift reads the old lower lane.
            p[a + 3] = p[a + 3] ^ (p[a + 3] << 8) ^ (p[a + 2] >> 24) ^ (p[c + 3] >> 8)
                ^ ((p[b + 3] >> SR1) & MSK[3]) ^ (p[d + 3] << SL1);
            p[a + 2] = p[a + 2] ^ (p[a + 2] << 8) ^ (p[a + 1] >> 24) ^ (p[c + 3] << 24) ^ (p[c + 2] >> 8)
                ^ ((p[b + 2] >> SR1) & MSK[2]) ^ (p[d + 2] << SL1);
            p[a + 1] = p[a + 1] ^ (p[a + 1] << 8) ^ (p[a] >> 24) ^ (p[c + 2] << 24) ^ (p[c + 1] >> 8)
                ^ ((p[b + 1] >> SR1) & MSK[1]) ^ (p[d + 1] << SL1);
            p[a] = p[a] ^ (p[a] << 8) ^ (p[c + 1] << 24) ^ (p[c] >> 8)
                ^ ((p[b] >> SR1) & MSK[0]) ^ (p[d] << SL1);
            c = d;
            d = a;
            a += 4;
            b += 4;
            if b >= SFMT_N32 {
                b = 0;
            }
        }
    }

    #[inline]
    pub fn word(&self, i: usize) -> u32 {
        self.state[i]
    }
}

impl Twister for SfmtState {
    const PERIOD: usize = SFMT_N32;

    #[inline]
    fn twist(&mut self) {
        SfmtState::twist(self);
    }

    fn temper_into(&self, out: &mut [u32]) {
        out.copy_from_slice(&self.state[.. out.len()]);
    }
}

/// Plain SFMT-19937 that twists on demand.
#[derive(Clone, Debug)]
pub struct Sfmt {
    state: SfmtState,
    /// Position within the current block; `SFMT_N32` means a twist is due.
    rand_index: usize,
    /// Number of 32-bit outputs drawn so far.
    index: u64,
}

impl Sfmt {

    pub fn from_seed32(seed: u32) -> Self {
        Sfmt { state: SfmtState::from_seed32(seed), rand_index: SFMT_N32, index: 0 }
    }

    /// Number of 32-bit outputs drawn or skipped so far.
    #[inline]
    pub fn index32(&self) -> u64 {
        self.index
    }

    /// Number of 64-bit draws, counting two 32-bit outputs per draw.
    #[inline]
    pub fn index64(&self) -> u64 {
        self.index / 2
    }

    #[inline]
    pub fn get_rand32(&mut self) -> u32 {
        if self.rand_index >= SFMT_N32 {
            self.state.twist();
            self.rand_index = 0;
        }
        let x = self.state.word(self.rand_index);
        self.rand_index += 1;
        self.index += 1;
        x
    }

    /// Two consecutive 32-bit outputs, low word first.
    #[inline]
    pub fn get_rand64(&mut self) -> u64 {
        let low = self.get_rand32() as u64;
        low | (self.get_rand32() as u64) << 32
    }

    #[inline]
    pub fn get_rand_mod(&mut self, m: u32) -> u32 {
        self.get_rand32() % m
    }

    #[inline]
    pub fn get_rand64_mod(&mut self, m: u32) -> u64 {
        self.get_rand64() % m as u64
    }

    /// Skips n 32-bit outputs.
    pub fn advance(&mut self, n: u64) {
        self.index += n;
        let mut position = self.rand_index as u64 + n;
        while position > SFMT_N32 as u64 {
            self.state.twist();
            position -= SFMT_N32 as u64;
        }
        self.rand_index = position as usize;
    }
}

/// SFMT-19937 behind a look-ahead ring cache.
pub type CachedSfmt = RingCache<SfmtState>;

impl CachedSfmt {
    /// Seeds like `Sfmt::from_seed32` and fills `segments + 1` blocks.
    pub fn from_seed32(seed: u32, segments: usize) -> Result<Self, ConfigError> {
        RingCache::new(SfmtState::from_seed32(seed), segments)
    }
}

use rand_core::{impls, Error, RngCore, SeedableRng};

impl RngCore for Sfmt {
    fn next_u32(&mut self) -> u32 {
        self.get_rand32()
    }

    fn next_u64(&mut self) -> u64 {
        self.get_rand64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Sfmt {
    type Seed = [u8; 4];

    /// Little-endian 32-bit seed.
    fn from_seed(seed: Self::Seed) -> Self {
        Sfmt::from_seed32(u32::from_le_bytes(seed))
    }
}
