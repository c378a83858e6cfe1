//! Byte sources and uniform sampling.

use std::sync::{Mutex, PoisonError};

use gridlock_core::{Digit, DigitSet};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{generate::GenerateError, seed::Seed};

/// A stream of random bytes with uniform sampling helpers.
///
/// The sampling methods are shared by every source, so a puzzle generated
/// from the OS entropy pool and one generated from a [`Seed`] consume their
/// byte streams identically.
pub trait ByteSource {
    /// Returns the next byte of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Entropy`] when the underlying source cannot
    /// produce bytes.
    fn next_byte(&mut self) -> Result<u8, GenerateError>;

    /// Returns a uniform integer in `[0, n)`.
    ///
    /// Bytes are masked down to the smallest power of two covering `n` and
    /// rejected while they land on or above `n`, so no value is favored the
    /// way a plain modulo would favor small ones.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`next_byte`](Self::next_byte).
    #[expect(clippy::cast_possible_truncation)]
    fn below(&mut self, n: u8) -> Result<u8, GenerateError> {
        debug_assert!(n > 0);
        let mask = u16::from(n).next_power_of_two() - 1;
        loop {
            let value = u16::from(self.next_byte()?) & mask;
            if value < u16::from(n) {
                return Ok(value as u8);
            }
        }
    }

    /// Returns a uniformly random permutation of the cell indices `0..81`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`next_byte`](Self::next_byte).
    fn permutation(&mut self) -> Result<[u8; 81], GenerateError> {
        // Inside-out Fisher-Yates.
        let mut order = [0_u8; 81];
        for i in 1..81 {
            let j = self.below(i + 1)?;
            order[usize::from(i)] = order[usize::from(j)];
            order[usize::from(j)] = i;
        }
        Ok(order)
    }

    /// Returns a uniformly random digit from a non-empty set.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`next_byte`](Self::next_byte).
    fn pick(&mut self, digits: DigitSet) -> Result<Digit, GenerateError> {
        let n = usize::from(self.below(digits.len())?);
        for (i, digit) in digits.into_iter().enumerate() {
            if i == n {
                return Ok(digit);
            }
        }
        unreachable!("sampled index is below the set length");
    }
}

const POOL_SIZE: usize = 256;

/// A buffered pool of cryptographically sourced random bytes.
///
/// Bytes come from the operating system via [`getrandom`] and are fetched in
/// fixed-size batches; the pool refills itself when the batch is exhausted.
/// The process-wide instance behind [`generate`](crate::generate()) sits in
/// a `Mutex`, so concurrent generation requests never interleave a refill
/// with a read.
pub struct EntropyPool {
    buf: [u8; POOL_SIZE],
    index: usize,
}

impl EntropyPool {
    /// Creates an empty pool; the first read triggers a refill.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; POOL_SIZE],
            index: POOL_SIZE,
        }
    }
}

impl Default for EntropyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for EntropyPool {
    fn next_byte(&mut self) -> Result<u8, GenerateError> {
        if self.index == self.buf.len() {
            getrandom::fill(&mut self.buf).map_err(GenerateError::Entropy)?;
            self.index = 0;
        }
        let byte = self.buf[self.index];
        self.index += 1;
        Ok(byte)
    }
}

static POOL: Mutex<EntropyPool> = Mutex::new(EntropyPool::new());

/// Runs `f` with exclusive access to the process-wide entropy pool.
pub(crate) fn with_pool<T>(f: impl FnOnce(&mut EntropyPool) -> T) -> T {
    let mut pool = POOL.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut pool)
}

/// A deterministic byte source expanded from a [`Seed`].
///
/// The stream is a PCG generator keyed by the seed, buffered the same way as
/// [`EntropyPool`]. Two sources built from equal seeds produce identical
/// streams, which makes generation reproducible and tests deterministic.
pub struct SeededBytes {
    rng: Pcg64Mcg,
    buf: [u8; 64],
    index: usize,
}

impl SeededBytes {
    /// Creates the byte stream keyed by `seed`.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: Pcg64Mcg::from_seed(seed.stream_key()),
            buf: [0; 64],
            index: 64,
        }
    }
}

impl ByteSource for SeededBytes {
    fn next_byte(&mut self) -> Result<u8, GenerateError> {
        if self.index == self.buf.len() {
            self.rng.fill_bytes(&mut self.buf);
            self.index = 0;
        }
        let byte = self.buf[self.index];
        self.index += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SeededBytes {
        SeededBytes::new(Seed::from_phrase("entropy tests"))
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut source = source();
        for n in 1..=81 {
            for _ in 0..100 {
                assert!(source.below(n).unwrap() < n);
            }
        }
    }

    #[test]
    fn test_below_one_is_zero() {
        let mut source = source();
        assert_eq!(source.below(1).unwrap(), 0);
    }

    #[test]
    fn test_permutation_covers_every_cell() {
        let mut source = source();
        let order = source.permutation().unwrap();
        let mut seen = [false; 81];
        for index in order {
            assert!(!seen[usize::from(index)]);
            seen[usize::from(index)] = true;
        }
    }

    #[test]
    fn test_pick_returns_member() {
        let mut source = source();
        let digits = DigitSet::from_iter([Digit::D2, Digit::D5, Digit::D9]);
        for _ in 0..50 {
            assert!(digits.contains(source.pick(digits).unwrap()));
        }
    }

    #[test]
    fn test_seeded_streams_are_reproducible() {
        let take = |mut s: SeededBytes| -> Vec<u8> {
            (0..200).map(|_| s.next_byte().unwrap()).collect()
        };

        assert_eq!(take(source()), take(source()));
        assert_ne!(
            take(source()),
            take(SeededBytes::new(Seed::from_phrase("a different phrase")))
        );
    }

    #[test]
    fn test_entropy_pool_produces_bytes() {
        let mut pool = EntropyPool::new();
        // Drain past one batch to exercise the refill path.
        for _ in 0..(POOL_SIZE + 10) {
            let _ = pool.next_byte().unwrap();
        }
    }
}
