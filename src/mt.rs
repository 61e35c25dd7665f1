use wrapping_arithmetic::wrappit;
use super::cache::{RingCache, Twister};
use super::ConfigError;

/// Number of 32-bit words in the MT19937 state, also the outputs per twist.
pub const MT_N: usize = 624;
const MT_M: usize = 397;
const MATRIX_A: u32 = 0x9908b0df;
const UPPER_MASK: u32 = 0x80000000;
const LOWER_MASK: u32 = 0x7fffffff;

/// Raw MT19937 state block. Outputs come from `temper` applied to each word after a twist.
#[derive(Clone)]
pub struct MtState {
    state: Box<[u32; MT_N]>,
}

impl core::fmt::Debug for MtState {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "MtState {{}}")
    }
}

#[inline] fn mix(s: &mut [u32; MT_N], k: usize, next: usize, far: usize) {
    let y = (s[k] & UPPER_MASK) | (s[next] & LOWER_MASK);
    let mag = (y & 1).wrapping_neg() & MATRIX_A;
    s[k] = s[far] ^ (y >> 1) ^ mag;
}

impl MtState {

    /// Knuth-style linear initialisation from a 32-bit seed. No twist has happened yet.
    #[wrappit]
    pub fn from_seed32(seed: u32) -> Self {
        let mut state = Box::new([0u32; MT_N]);
        state[0] = seed;
        for i in 1 .. MT_N {
            let p = state[i - 1];
            state[i] = (p ^ (p >> 30)) * 0x6c078965 + i as u32;
        }
        MtState { state }
    }

    /// Regenerates all 624 words.
    pub fn twist(&mut self) {
        let s = &mut *self.state;
        for k in 0 .. MT_N - MT_M {
            mix(s, k, k + 1, k + MT_M);
        }
        for k in MT_N - MT_M .. MT_N - 1 {
            mix(s, k, k + 1, k + MT_M - MT_N);
        }
        mix(s, MT_N - 1, 0, MT_M - 1);
    }

    /// Output of word `i` of the current block.
    #[inline]
    pub fn word(&self, i: usize) -> u32 {
        temper(self.state[i])
    }
}

/// MT19937 output tempering.
#[inline]
pub fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9d2c5680;
    y ^= (y << 15) & 0xefc60000;
    y ^ (y >> 18)
}

impl Twister for MtState {
    const PERIOD: usize = MT_N;

    #[inline]
    fn twist(&mut self) {
        MtState::twist(self);
    }

    fn temper_into(&self, out: &mut [u32]) {
        for (x, &y) in out.iter_mut().zip(self.state.iter()) {
            *x = temper(y);
        }
    }
}

/// Plain MT19937 that twists on demand.
#[derive(Clone, Debug)]
pub struct Mt {
    state: MtState,
    /// Position within the current block; `MT_N` means a twist is due.
    rand_index: usize,
    /// Number of outputs drawn so far.
    index: u64,
}

impl Mt {

    pub fn from_seed32(seed: u32) -> Self {
        Mt { state: MtState::from_seed32(seed), rand_index: MT_N, index: 0 }
    }

    /// Number of outputs drawn or skipped so far.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    #[inline]
    pub fn get_rand(&mut self) -> u32 {
        if self.rand_index >= MT_N {
            self.state.twist();
            self.rand_index = 0;
        }
        let x = self.state.word(self.rand_index);
        self.rand_index += 1;
        self.index += 1;
        x
    }

    #[inline]
    pub fn get_rand_mod(&mut self, m: u32) -> u32 {
        self.get_rand() % m
    }

    /// Skips n outputs. Whole blocks are skipped by twisting.
    pub fn advance(&mut self, n: u64) {
        self.index += n;
        let mut position = self.rand_index as u64 + n;
        while position > MT_N as u64 {
            self.state.twist();
            position -= MT_N as u64;
        }
        self.rand_index = position as usize;
    }
}

/// MT19937 behind a look-ahead ring cache.
pub type CachedMt = RingCache<MtState>;

impl CachedMt {
    /// Seeds like `Mt::from_seed32` and fills `segments + 1` blocks.
    pub fn from_seed32(seed: u32, segments: usize) -> Result<Self, ConfigError> {
        RingCache::new(MtState::from_seed32(seed), segments)
    }
}

use rand_core::{impls, Error, RngCore, SeedableRng};

impl RngCore for Mt {
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

impl SeedableRng for Mt {
    type Seed = [u8; 4];

    /// Little-endian 32-bit seed.
    fn from_seed(seed: Self::Seed) -> Self {
        Mt::from_seed32(u32::from_le_bytes(seed))
    }
}
