use thiserror::Error;

/// Rejected constructor or parser input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cache segments must be within 1..=100, got {0}")]
    SegmentsOutOfRange(usize),

    #[error("LCG multiplier must be odd, got {0:#x}")]
    EvenMultiplier(u64),

    #[error("LCG step ({mul:#x}, {add:#x}) is not full period: the multiplier must be 1 mod 4 and the increment odd")]
    NotFullPeriod { mul: u32, add: u32 },

    #[error("expected 1 to {expected} hex digits, got {found}")]
    HexLength { expected: usize, found: usize },

    #[error("invalid hex digit {digit:?} at position {position}")]
    HexDigit { digit: char, position: usize },
}
