//! Seeds for reproducible generation.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

use crate::{
    entropy::{self, ByteSource as _},
    generate::GenerateError,
};

/// A 32-byte value identifying one generated puzzle.
///
/// Seeds print as 64 lowercase hex characters and parse back from the same
/// form; [`Seed::from_phrase`] hashes an arbitrary string into a seed so
/// humans can use memorable ones. Feeding equal seeds to
/// [`generate_with_seed`](crate::generate_with_seed) yields equal puzzles.
///
/// # Examples
///
/// ```
/// use gridlock_generator::Seed;
///
/// let seed = Seed::from_phrase("rainy sunday");
/// let hex = seed.to_string();
/// assert_eq!(hex.len(), 64);
/// assert_eq!(hex.parse::<Seed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 32]);

impl Seed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a seed from an arbitrary phrase.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Draws a fresh seed from the process-wide entropy pool.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Entropy`] when the operating system cannot
    /// provide random bytes.
    pub fn from_entropy() -> Result<Self, GenerateError> {
        entropy::with_pool(|pool| {
            let mut bytes = [0_u8; 32];
            for byte in &mut bytes {
                *byte = pool.next_byte()?;
            }
            Ok(Self(bytes))
        })
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the 16-byte key for the seeded byte stream.
    ///
    /// The seed is hashed first so that every seed byte influences the
    /// stream.
    pub(crate) fn stream_key(&self) -> [u8; 16] {
        let digest = Sha256::digest(self.0);
        let mut key = [0_u8; 16];
        key.copy_from_slice(&digest[..16]);
        key
    }
}

impl Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`Seed`] from text fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex characters")]
    Length,
    /// The input contains a character outside `0-9a-fA-F`.
    #[display("seed contains a non-hex character")]
    InvalidCharacter,
}

impl FromStr for Seed {
    type Err = ParseSeedError;

    fn from_str(input: &str) -> Result<Self, ParseSeedError> {
        if !input.is_ascii() {
            return Err(ParseSeedError::InvalidCharacter);
        }
        if input.len() != 64 {
            return Err(ParseSeedError::Length);
        }
        let mut bytes = [0_u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&input[2 * i..2 * i + 2], 16)
                .map_err(|_| ParseSeedError::InvalidCharacter)?;
        }
        Ok(Self(bytes))
    }
}
