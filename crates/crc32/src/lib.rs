//! Reflected CRC-32 checksum (polynomial `0xEDB88320`).
//!
//! This is the CRC-32 variant used by zlib, PNG, gzip and Ethernet. The core
//! entry point is [`update`], a pure function of `(accumulator, bytes)` that
//! returns the new accumulator:
//!
//! ```
//! let acc = ihparah_crc32::update(ihparah_crc32::SEED, b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(!acc, 0x414F_A339);
//! ```
//!
//! Seeding with [`SEED`] and complementing the final accumulator is the
//! caller's job; [`update`] never does either. Because the accumulator is
//! passed and returned by value, input may be fed in arbitrary chunks:
//!
//! ```
//! use ihparah_crc32::{update, SEED};
//!
//! let whole = update(SEED, b"hello world");
//! let split = update(update(SEED, b"hello "), b"world");
//! assert_eq!(whole, split);
//! ```
//!
//! [`Crc32`] wraps the same accumulator for callers that prefer an
//! incremental hasher, and [`checksum`] is the one-shot seeded + finalised
//! form.
//!
//! # Modules
//! - [`bitwise`]: the canonical bit-at-a-time definition
//! - [`table`]: the 256-entry table-driven form used by [`update`]
//! - [`hasher`]: the [`Crc32`] incremental hasher

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod bitwise;
pub mod hasher;
pub mod table;

pub use bitwise::update_bitwise;
pub use hasher::{Crc32, checksum_reader};
pub use table::{TABLE, update};

/// Reflected form of the CRC-32 generator polynomial `0x04C11DB7`.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Conventional initial accumulator value.
pub const SEED: u32 = 0xFFFF_FFFF;

/// One-shot CRC-32: seed with [`SEED`], fold `data`, complement.
///
/// Matches `crc32()` from zlib for every input.
#[must_use]
pub fn checksum(data: &[u8]) -> u32 {
    !update(SEED, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn fox_vector() {
        assert_eq!(FOX.len(), 43);
        assert_eq!(checksum(FOX), 0x414F_A339);
    }

    #[test]
    fn check_vector() {
        // CRC-32/ISO-HDLC catalogue check value
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_checksum_is_zero() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn polynomial_is_reflection_of_normal_form() {
        assert_eq!(0x04C1_1DB7_u32.reverse_bits(), POLYNOMIAL);
    }
}
