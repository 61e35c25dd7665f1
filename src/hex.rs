use super::ConfigError;

/// Fixed-width hexadecimal text form of a generator state.
///
/// The state is viewed as one big-endian number of `DIGITS` hex digits.
/// Rendering is upper case and zero padded. Parsing accepts either case
/// and left-pads short input with zeros.
pub trait HexState: Sized {
    /// Number of hex digits in the rendered form.
    const DIGITS: usize;

    /// State as an unsigned number, most significant word first.
    fn to_hex_value(&self) -> u128;

    /// Inverse of `to_hex_value`.
    fn from_hex_value(value: u128) -> Self;

    fn to_hex(&self) -> String {
        format!("{:0width$X}", self.to_hex_value(), width = Self::DIGITS)
    }

    fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let found = hex.chars().count();
        if found == 0 || found > Self::DIGITS {
            return Err(ConfigError::HexLength { expected: Self::DIGITS, found });
        }
        let mut value: u128 = 0;
        for (position, digit) in hex.chars().enumerate() {
            let nibble = digit.to_digit(16).ok_or(ConfigError::HexDigit { digit, position })?;
            value = (value << 4) | nibble as u128;
        }
        Ok(Self::from_hex_value(value))
    }
}

impl HexState for u32 {
    const DIGITS: usize = 8;

    fn to_hex_value(&self) -> u128 {
        *self as u128
    }

    fn from_hex_value(value: u128) -> Self {
        value as u32
    }
}

impl HexState for u64 {
    const DIGITS: usize = 16;

    fn to_hex_value(&self) -> u128 {
        *self as u128
    }

    fn from_hex_value(value: u128) -> Self {
        value as u64
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn run_tests() {
        assert_eq!("00000000", 0u32.to_hex());
        assert_eq!("BEEFFACE", 0xbeefface_u32.to_hex());
        assert_eq!("FFFFFFFFFFFFFFFF", u64::MAX.to_hex());
        assert_eq!(Ok(0xbeefu32), u32::from_hex("beef"));
        assert_eq!(Ok(0x1u64), u64::from_hex("0000000000000001"));

        assert_eq!(Err(ConfigError::HexLength { expected: 8, found: 0 }), u32::from_hex(""));
        assert_eq!(Err(ConfigError::HexLength { expected: 8, found: 9 }), u32::from_hex("123456789"));
        assert_eq!(Err(ConfigError::HexDigit { digit: 'g', position: 2 }), u32::from_hex("12g4"));
        assert_eq!(Err(ConfigError::HexDigit { digit: '+', position: 0 }), u64::from_hex("+1"));

        let mut r: u64 = 1;
        for _ in 0 .. 1 << 10 {
            r = r.wrapping_mul(super::super::LCG64_MULTIPLIER).wrapping_add(1);
            assert_eq!(Ok(r), u64::from_hex(&r.to_hex()));
            assert_eq!(Ok(r as u32), u32::from_hex(&(r as u32).to_hex()));
        }
    }
}
