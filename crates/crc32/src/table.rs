//! Table-driven CRC-32.
//!
//! `TABLE[i]` holds the result of eight bitwise rounds applied to `i`, so a
//! whole byte can be folded with one lookup, one shift and one XOR.

use crate::bitwise::step;

/// Lookup table built at compile time from [`crate::POLYNOMIAL`].
pub static TABLE: [u32; 256] = build_table();

#[allow(
    clippy::indexing_slicing,
    reason = "the loop bound keeps i below the table length"
)]
const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut entry = i as u32;
        let mut round = 0;
        while round < 8 {
            entry = step(entry);
            round += 1;
        }
        table[i] = entry;
        i += 1;
    }
    table
}

/// Folds `data` into `accumulator` and returns the new accumulator.
///
/// Bit-identical to [`crate::update_bitwise`] for every input. The function
/// is pure: it keeps no state between calls, so independent accumulators may
/// be advanced concurrently from any number of threads, and chunked input
/// gives the same result as the concatenated input.
#[must_use]
pub fn update(mut accumulator: u32, data: &[u8]) -> u32 {
    for &byte in data {
        accumulator = (accumulator >> 8) ^ lookup(accumulator as u8 ^ byte);
    }
    accumulator
}

#[inline]
#[allow(
    clippy::indexing_slicing,
    reason = "a u8 index is always within the 256-entry table"
)]
fn lookup(index: u8) -> u32 {
    TABLE[usize::from(index)]
}
