//! Secure random backend on top of the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::TryRngCore;

use super::{SecureWordSource, SourceError};

/// Word source drawing from the operating system CSPRNG.
///
/// Backed by the same facilities as `getrandom` (`getrandom(2)`,
/// `/dev/urandom`, `BCryptGenRandom` and friends depending on platform).
#[derive(Debug)]
pub struct OsRandom;

/// Static instance used for feature-flag provider selection.
pub(super) static OS_RANDOM: OsRandom = OsRandom;

impl SecureWordSource for OsRandom {
    fn fill_words(&self, buf: &mut [u32]) -> Result<(), SourceError> {
        let mut bytes = vec![0u8; buf.len() * 4];

        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        for (word, chunk) in buf.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes(chunk.try_into().expect("4 byte chunk"));
        }

        Ok(())
    }
}
