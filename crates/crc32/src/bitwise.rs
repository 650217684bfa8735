//! Bit-at-a-time CRC-32.
//!
//! This is the reference definition of the accumulator step. It is slower
//! than [`crate::update`] by roughly a factor of eight and exists so the
//! table-driven form has something to be checked against.

use crate::POLYNOMIAL;

/// Folds `data` into `accumulator` one bit at a time.
///
/// For each byte the low eight bits of the accumulator are XOR-ed with the
/// byte, then eight rounds of "shift right, XOR the polynomial if the bit
/// shifted out was set" are applied. An empty slice leaves the accumulator
/// unchanged.
#[must_use]
pub fn update_bitwise(mut accumulator: u32, data: &[u8]) -> u32 {
    for &byte in data {
        accumulator ^= u32::from(byte);
        for _ in 0..8 {
            accumulator = step(accumulator);
        }
    }
    accumulator
}

/// A single shift/XOR round.
#[inline]
pub(crate) const fn step(accumulator: u32) -> u32 {
    if accumulator & 1 != 0 {
        (accumulator >> 1) ^ POLYNOMIAL
    } else {
        accumulator >> 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SEED;

    #[test]
    fn empty_is_identity() {
        for seed in [0, 1, SEED, 0xDEAD_BEEF] {
            assert_eq!(update_bitwise(seed, &[]), seed);
        }
    }

    #[test]
    fn fox_vector() {
        let acc = update_bitwise(SEED, b"The quick brown fox jumps over the lazy dog");
        assert_eq!(!acc, 0x414F_A339);
    }

    #[test]
    fn zero_byte_from_zero_state_stays_zero() {
        assert_eq!(update_bitwise(0, &[0]), 0);
    }

    #[test]
    fn step_shifts_even_values() {
        assert_eq!(step(0x10), 0x08);
        assert_eq!(step(0x01), POLYNOMIAL);
    }
}
