//! Property-based tests for the CRC-32 accumulator.
//!
//! Uses proptest to verify:
//! - chunking: folding `a` then `b` equals folding `a ++ b`, for any seed
//! - empty input is the identity
//! - determinism
//! - table-driven and bitwise forms agree
//! - agreement with `crc32fast` (zlib-compatible) for arbitrary inputs

use ihparah_crc32::{Crc32, SEED, checksum, update, update_bitwise};
use proptest::prelude::*;

fn reference(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_chunking_invariant(
        seed: u32,
        data in proptest::collection::vec(any::<u8>(), 0..512),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(data.len() + 1);
        let (head, tail) = data.split_at(at);
        prop_assert_eq!(update(update(seed, head), tail), update(seed, &data));
    }

    #[test]
    fn prop_three_way_chunking(
        seed: u32,
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64),
        c in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let joined: Vec<u8> = a.iter().chain(&b).chain(&c).copied().collect();
        let stepwise = update(update(update(seed, &a), &b), &c);
        prop_assert_eq!(stepwise, update(seed, &joined));
    }

    #[test]
    fn prop_empty_is_identity(seed: u32) {
        prop_assert_eq!(update(seed, &[]), seed);
        prop_assert_eq!(update_bitwise(seed, &[]), seed);
    }

    #[test]
    fn prop_deterministic(seed: u32, data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(update(seed, &data), update(seed, &data));
    }

    #[test]
    fn prop_table_matches_bitwise(seed: u32, data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(update(seed, &data), update_bitwise(seed, &data));
    }

    #[test]
    fn prop_matches_crc32fast(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(checksum(&data), reference(&data));
        prop_assert_eq!(!update(SEED, &data), reference(&data));
    }

    #[test]
    fn prop_matches_crc32fast_single_byte(byte: u8) {
        prop_assert_eq!(checksum(&[byte]), reference(&[byte]));
    }

    #[test]
    fn prop_hasher_matches_free_function(
        chunks in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..64), 0..16),
    ) {
        let mut hasher = Crc32::new();
        let mut acc = SEED;
        for chunk in &chunks {
            hasher.update(chunk);
            acc = update(acc, chunk);
        }
        prop_assert_eq!(hasher.state(), acc);
        prop_assert_eq!(hasher.finalize(), !acc);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_matches_crc32fast_large(data in proptest::collection::vec(any::<u8>(), 16 * 1024..64 * 1024)) {
        prop_assert_eq!(checksum(&data), reference(&data));
    }
}
