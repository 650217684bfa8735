//! Incremental CRC-32 hasher.

use std::io::{self, Read};

use crate::{SEED, update};

const READ_CHUNK: usize = 8 * 1024;

/// Owns a running accumulator and counts the bytes folded into it.
///
/// `finalize` does not consume the hasher, so a checksum can be observed
/// mid-stream and then extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    seed: u32,
    state: u32,
    amount: u64,
}

impl Crc32 {
    /// A hasher seeded with [`SEED`].
    pub const fn new() -> Self {
        Self::with_seed(SEED)
    }

    /// A hasher starting from an arbitrary accumulator, e.g. one saved from
    /// an earlier [`Crc32::state`].
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            state: seed,
            amount: 0,
        }
    }

    /// Folds `data` into the accumulator.
    pub fn update(&mut self, data: &[u8]) {
        self.state = update(self.state, data);
        self.amount = self.amount.saturating_add(data.len() as u64);
    }

    /// The raw, un-complemented accumulator.
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// The complemented accumulator.
    pub const fn finalize(&self) -> u32 {
        !self.state
    }

    /// Bytes folded in since construction or the last [`Crc32::reset`].
    pub const fn bytes_processed(&self) -> u64 {
        self.amount
    }

    /// Returns to the seed this hasher was built with.
    pub fn reset(&mut self) {
        self.state = self.seed;
        self.amount = 0;
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::hash::Hasher for Crc32 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(&self) -> u64 {
        u64::from(self.finalize())
    }
}

impl io::Write for Crc32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Streams `reader` to the end and returns its finalised CRC-32.
///
/// # Errors
///
/// Returns the first read error other than [`io::ErrorKind::Interrupted`].
pub fn checksum_reader<R: Read>(mut reader: R) -> io::Result<u32> {
    let mut hasher = Crc32::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(buf.get(..n).unwrap_or_default()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hasher.finalize())
}
