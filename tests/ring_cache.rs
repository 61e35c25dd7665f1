use proptest::prelude::*;
use rand_leap::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn cached_mt_peeks_match_plain(seed: u32, segments in 1usize .. 6, peeks in prop::collection::vec(0usize .. 4000, 1 .. 40)) {
        let mut cached = CachedMt::from_seed32(seed, segments).unwrap();
        let mut plain = Mt::from_seed32(seed);
        let outputs: Vec<u32> = (0 .. 3000 + segments * 624).map(|_| plain.get_rand()).collect();

        for (start, &peek) in peeks.iter().enumerate() {
            let skip = peek % cached.lookahead();
            cached.advance(skip);
            prop_assert_eq!(outputs[start + skip], cached.get_rand());
            prop_assert_eq!((start + skip + 1) as u64, cached.index());
            cached.move_next();
        }
    }

    #[test]
    fn cached_sfmt_walk_matches_plain(seed: u32, segments in 1usize .. 4, steps in 1usize .. 2000) {
        let mut cached = CachedSfmt::from_seed32(seed, segments).unwrap();
        let mut plain = Sfmt::from_seed32(seed);
        for _ in 0 .. steps {
            cached.move_next();
        }
        plain.advance(steps as u64);
        prop_assert_eq!(plain.index32(), cached.index());
        for _ in 0 .. cached.lookahead() / 2 {
            prop_assert_eq!(plain.get_rand64(), cached.get_rand64());
        }
    }
}

#[test]
fn segment_bounds() {
    assert_eq!(Err(ConfigError::SegmentsOutOfRange(0)), CachedMt::from_seed32(1, 0).map(|_| ()));
    assert_eq!(Err(ConfigError::SegmentsOutOfRange(101)), CachedSfmt::from_seed32(1, 101).map(|_| ()));
    assert_eq!(101 * 624, CachedMt::from_seed32(1, MAX_SEGMENTS).unwrap().capacity());
    assert_eq!(2 * 624, CachedSfmt::from_seed32(1, 1).unwrap().capacity());
    assert_eq!(
        "cache segments must be within 1..=100, got 0",
        ConfigError::SegmentsOutOfRange(0).to_string()
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "read past the cache look-ahead")]
fn over_read_panics() {
    let mut cached = CachedMt::from_seed32(0xbeefcafe, 1).unwrap();
    for _ in 0 .. 625 {
        cached.get_rand();
    }
}
