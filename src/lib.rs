//! Random number generators that jump: affine LCGs, GF(2)-linear xorshift variants,
//! and Mersenne Twister variants behind a look-ahead ring cache.

pub mod cache;
pub mod error;
pub mod gf2;
pub mod hex;
pub mod lcg;
pub mod lcg32;
pub mod lcg64;
pub mod mt;
pub mod sfmt;
pub mod tinymt;
pub mod xoroshiro128p;
pub mod xorshift128;

pub use cache::{RingCache, Twister, MAX_SEGMENTS};
pub use error::ConfigError;
pub use gf2::{BitMatrix, JumpPowers, LinearJump, LinearState};
pub use hex::HexState;
pub use lcg::{Affine, AffineTable, LcgWord, Seeds};
pub use lcg32::Lcg32;
pub use lcg64::Lcg64;
pub use mt::{CachedMt, Mt, MtState};
pub use sfmt::{CachedSfmt, Sfmt, SfmtState};
pub use tinymt::TinyMt;
pub use xoroshiro128p::Xoroshiro128p;
pub use xorshift128::XorShift128;
pub use rand_core::{RngCore, SeedableRng};

// 32-bit LCG presets, as (multiplier, increment).
pub const LCG32_STANDARD: Affine<u32> = Affine::new(0x41c64e6d, 0x6073);
pub const LCG32_GC: Affine<u32> = Affine::new(0x343fd, 0x269ec3);
pub const LCG32_STATIC: Affine<u32> = Affine::new(0x41c64e6d, 0x3039);
// Also the Mersenne Twister seeding multiplier.
pub const LCG32_DAILY: Affine<u32> = Affine::new(0x6c078965, 1);

// 64-bit LCG.
pub const LCG64_MULTIPLIER: u64 = 0x5d588b656c078965;
pub const LCG64_STANDARD: Affine<u64> = Affine::new(LCG64_MULTIPLIER, 0x269ec3);
