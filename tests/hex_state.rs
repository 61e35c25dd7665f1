use proptest::prelude::*;
use rand_leap::*;

proptest! {
    #[test]
    fn words_round_trip(a: u32, b: u64) {
        prop_assert_eq!(Ok(a), u32::from_hex(&a.to_hex()));
        prop_assert_eq!(Ok(b), u64::from_hex(&b.to_hex()));
        prop_assert_eq!(8, a.to_hex().len());
        prop_assert_eq!(16, b.to_hex().len());
        prop_assert_eq!(Ok(b), u64::from_hex(&b.to_hex().to_lowercase()));
    }

    #[test]
    fn states_round_trip(s: [u32; 4], t: [u64; 2]) {
        let xs = XorShift128::new(s[0], s[1], s[2], s[3]);
        let tm = TinyMt::new(s[0], s[1], s[2], s[3]);
        let xo = Xoroshiro128p::new(t[0], t[1]);
        prop_assert_eq!(Ok(xs), XorShift128::from_hex(&xs.to_hex()));
        prop_assert_eq!(Ok(tm), TinyMt::from_hex(&tm.to_hex()));
        prop_assert_eq!(Ok(xo), Xoroshiro128p::from_hex(&xo.to_hex()));
        prop_assert_eq!(32, xs.to_hex().len());
    }

    #[test]
    fn short_input_is_left_padded(a: u32) {
        let digits = format!("{:x}", a);
        prop_assert_eq!(Ok(a), u32::from_hex(&digits));
        prop_assert_eq!(Ok(a as u64), u64::from_hex(&digits));
    }

    #[test]
    fn non_hex_input_is_rejected(s in "[0-9a-f]{0,6}[g-zG-Z_+]") {
        let position = s.len() - 1;
        let digit = s.chars().last().unwrap();
        prop_assert_eq!(Err(ConfigError::HexDigit { digit, position }), u32::from_hex(&s));
    }
}

#[test]
fn extreme_states() {
    let zero = XorShift128::new(0, 0, 0, 0);
    let ones = XorShift128::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
    assert_eq!("00000000000000000000000000000000", zero.to_hex());
    assert_eq!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", ones.to_hex());
    assert_eq!(Ok(zero), XorShift128::from_hex(&zero.to_hex()));
    assert_eq!(Ok(ones), XorShift128::from_hex(&ones.to_hex()));
    assert_eq!(Ok(Xoroshiro128p::new(u64::MAX, u64::MAX)), Xoroshiro128p::from_hex("ffffffffffffffffffffffffffffffff"));
    assert_eq!("00000000", 0u32.to_hex());
    assert_eq!("FFFFFFFFFFFFFFFF", u64::MAX.to_hex());
}

#[test]
fn bad_lengths() {
    assert_eq!(Err(ConfigError::HexLength { expected: 8, found: 0 }), u32::from_hex(""));
    assert_eq!(Err(ConfigError::HexLength { expected: 8, found: 9 }), u32::from_hex("123456789"));
    assert_eq!(Err(ConfigError::HexLength { expected: 32, found: 33 }), TinyMt::from_hex(&"1".repeat(33)));
    assert!(u64::from_hex("12345678").is_ok());
}
