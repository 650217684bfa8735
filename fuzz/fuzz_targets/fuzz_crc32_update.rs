//! Fuzzes the CRC-32 accumulator against the bitwise form and crc32fast.
//!
//! The first four bytes seed the accumulator, the fifth picks a split point
//! for the chunking check, the rest is the payload.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_crc32_update
#![no_main]
use ihparah_crc32::{SEED, update, update_bitwise};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&[s0, s1, s2, s3, at], payload)) = data.split_first_chunk::<5>() else {
        return;
    };
    let seed = u32::from_le_bytes([s0, s1, s2, s3]);
    let split = usize::from(at).min(payload.len());

    let whole = update(seed, payload);
    assert_eq!(whole, update_bitwise(seed, payload));

    let (head, tail) = payload.split_at(split);
    assert_eq!(update(update(seed, head), tail), whole);

    let mut reference = crc32fast::Hasher::new();
    reference.update(payload);
    assert_eq!(!update(SEED, payload), reference.finalize());
});
