//! Jumps for generators whose step is linear over GF(2).
//!
//! The step of such a generator is a bit matrix M acting on the state vector.
//! Squaring M repeatedly gives M**(2**i) for every bit position i of a step count,
//! so a jump of n steps costs one matrix-vector product per set bit of n.

use core::marker::PhantomData;

/// Generator state usable with `LinearJump`: at most 128 bits, packed into a `u128`.
pub trait LinearState: Copy {
    /// Number of state bits.
    const BITS: usize;

    /// Packs the state, least significant word in the low bits.
    fn to_bits(self) -> u128;

    fn from_bits(bits: u128) -> Self;
}

#[inline] fn mask(width: usize) -> u128 {
    if width >= 128 { u128::MAX } else { (1u128 << width) - 1 }
}

#[inline] fn parity(x: u128) -> u128 {
    (x.count_ones() & 1) as u128
}

/// Square bit matrix of width up to 128. Row i holds the coefficients of output bit i.
#[derive(Clone, Eq, PartialEq)]
pub struct BitMatrix {
    rows: Vec<u128>,
}

impl core::fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "BitMatrix {{ width: {} }}", self.width())
    }
}

impl BitMatrix {

    pub fn identity(width: usize) -> Self {
        assert!(width > 0 && width <= 128, "bit matrix width must be within 1..=128");
        BitMatrix { rows: (0 .. width).map(|i| 1u128 << i).collect() }
    }

    /// Builds a matrix from its rows.
    pub fn from_rows(rows: Vec<u128>) -> Self {
        assert!(!rows.is_empty() && rows.len() <= 128, "bit matrix width must be within 1..=128");
        let m = mask(rows.len());
        BitMatrix { rows: rows.into_iter().map(|row| row & m).collect() }
    }

    /// Builds the matrix of a linear map by evaluating it on each unit vector.
    /// Column j of the result is `step(1 << j)`.
    pub fn from_linear_map(width: usize, step: impl Fn(u128) -> u128) -> Self {
        let columns = BitMatrix::from_rows((0 .. width).map(|j| step(1u128 << j)).collect());
        columns.transpose()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[u128] {
        &self.rows
    }

    pub fn transpose(&self) -> Self {
        let width = self.width();
        let mut rows = vec![0u128; width];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, out) in rows.iter_mut().enumerate() {
                *out |= ((row >> j) & 1) << i;
            }
        }
        BitMatrix { rows }
    }

    /// Matrix product self * rhs, that is, rhs is applied first.
    pub fn mul(&self, rhs: &BitMatrix) -> Self {
        assert_eq!(self.width(), rhs.width(), "bit matrix widths differ");
        // Entry (i, k) is the parity of row i of self AND column k of rhs,
        // so transposing rhs once turns every column into a row.
        let columns = rhs.transpose();
        let rows = self.rows.iter().map(|row| {
            columns.rows.iter().enumerate().fold(0u128, |acc, (k, column)| acc | (parity(row & column) << k))
        }).collect();
        BitMatrix { rows }
    }

    #[inline]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Matrix-vector product over GF(2).
    #[inline]
    pub fn apply(&self, bits: u128) -> u128 {
        self.rows.iter().enumerate().fold(0u128, |acc, (i, row)| acc | (parity(row & bits) << i))
    }
}

/// Powers M**(2**i) of a one-step matrix, one per bit of the state width.
#[derive(Clone, Debug)]
pub struct JumpPowers {
    levels: Vec<BitMatrix>,
}

impl JumpPowers {

    /// Builds all power levels by repeated squaring.
    pub fn build(one_step: BitMatrix) -> Self {
        let width = one_step.width();
        let mut levels = Vec::with_capacity(width);
        levels.push(one_step);
        while levels.len() < width {
            let next = levels[levels.len() - 1].square();
            levels.push(next);
        }
        JumpPowers { levels }
    }

    /// Number of power levels, equal to the state width.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Applies the step matrix n times to the packed state.
    /// Step counts must be below 2**width.
    pub fn apply(&self, mut bits: u128, n: u128) -> u128 {
        debug_assert!(self.len() >= 128 || n >> self.len() == 0, "step count exceeds jump table range");
        for (i, level) in self.levels.iter().enumerate() {
            if n >> i == 0 {
                break;
            }
            if (n >> i) & 1 == 1 {
                bits = level.apply(bits);
            }
        }
        bits
    }
}

/// Forward and backward jump tables for one GF(2)-linear generator family.
///
/// The backward table is built from the family's own inverse step rather than
/// by inverting the forward matrix.
pub struct LinearJump<S> {
    forward: JumpPowers,
    backward: JumpPowers,
    state: PhantomData<fn(S) -> S>,
}

impl<S> core::fmt::Debug for LinearJump<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "LinearJump {{ levels: {} }}", self.forward.len())
    }
}

impl<S: LinearState> LinearJump<S> {

    /// Builds jump tables from the one-step transition and its inverse.
    /// Both must be linear in the state bits.
    pub fn new(next: impl Fn(S) -> S, prev: impl Fn(S) -> S) -> Self {
        let forward = BitMatrix::from_linear_map(S::BITS, |bits| next(S::from_bits(bits)).to_bits());
        let backward = BitMatrix::from_linear_map(S::BITS, |bits| prev(S::from_bits(bits)).to_bits());
        LinearJump { forward: JumpPowers::build(forward), backward: JumpPowers::build(backward), state: PhantomData }
    }

    /// State after n steps forward.
    #[inline]
    pub fn advance(&self, state: S, n: u128) -> S {
        S::from_bits(self.forward.apply(state.to_bits(), n))
    }

    /// State after n steps backward.
    #[inline]
    pub fn back(&self, state: S, n: u128) -> S {
        S::from_bits(self.backward.apply(state.to_bits(), n))
    }

    pub fn forward(&self) -> &JumpPowers {
        &self.forward
    }

    pub fn backward(&self) -> &JumpPowers {
        &self.backward
    }
}

#[cfg(test)] mod tests {
    use super::*;

    /// Marsaglia's 32-bit xorshift, a small linear generator for exercising the tables.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct Xs32(u32);

    impl LinearState for Xs32 {
        const BITS: usize = 32;
        fn to_bits(self) -> u128 { self.0 as u128 }
        fn from_bits(bits: u128) -> Self { Xs32(bits as u32) }
    }

    fn unshift_left(mut x: u32, k: u32) -> u32 {
        let mut s = k;
        while s < 32 { x ^= x << s; s <<= 1; }
        x
    }

    fn unshift_right(mut x: u32, k: u32) -> u32 {
        let mut s = k;
        while s < 32 { x ^= x >> s; s <<= 1; }
        x
    }

    fn next(s: Xs32) -> Xs32 {
        let mut x = s.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        Xs32(x)
    }

    fn prev(s: Xs32) -> Xs32 {
        Xs32(unshift_left(unshift_right(unshift_left(s.0, 5), 17), 13))
    }

    #[test] pub fn matrix_tests() {
        let id = BitMatrix::identity(32);
        let m = BitMatrix::from_linear_map(32, |b| next(Xs32::from_bits(b)).to_bits());
        assert_eq!(32, m.width());
        assert_eq!(m, m.mul(&id));
        assert_eq!(m, id.mul(&m));
        assert_eq!(m, m.transpose().transpose());
        let inv = BitMatrix::from_linear_map(32, |b| prev(Xs32::from_bits(b)).to_bits());
        assert_eq!(id, m.mul(&inv));
        assert_eq!(id, inv.mul(&m));

        let mut x = 0x12345678u32;
        for _ in 0 .. 100 {
            assert_eq!(next(Xs32(x)).0 as u128, m.apply(x as u128));
            assert_eq!(next(next(Xs32(x))).0 as u128, m.square().apply(x as u128));
            x = next(Xs32(x)).0;
        }
        let rows = m.rows().to_vec();
        assert_eq!(m, BitMatrix::from_rows(rows));
    }

    #[test] pub fn jump_tests() {
        let jump = LinearJump::new(next, prev);
        assert_eq!(32, jump.forward().len());
        assert_eq!(32, jump.backward().len());

        let origin = Xs32(0xbeefcafe);
        let mut s = origin;
        for n in 0 .. 2000u128 {
            assert_eq!(s, jump.advance(origin, n));
            assert_eq!(origin, jump.back(s, n));
            s = next(s);
        }

        let mut r: u32 = 1;
        let mut rnd = || -> u32 { r = r.wrapping_mul(0x41c64e6d).wrapping_add(0x6073); r };
        for _ in 0 .. 200 {
            let state = Xs32(rnd() | 1);
            let n = rnd() as u128 >> 1;
            let m = rnd() as u128 >> 1;
            let there = jump.advance(state, n);
            assert_eq!(jump.advance(there, m), jump.advance(state, n + m));
            assert_eq!(state, jump.back(there, n));
            assert_eq!(jump.back(state, m), jump.advance(state, (1u128 << 32) - 1 - m));
        }
        assert_eq!(origin, jump.advance(origin, 0));
        assert_eq!(origin, jump.back(origin, 0));
    }
}
