//! Pluggable secure random backends.
//!
//! This module defines the trait-based interface for the randomness every
//! generator in the crate draws from, allowing users to provide their own
//! backend in place of the default OS one.
//!
//! Implementors of a backend only need to depend on this module.

use std::fmt::Debug;
use std::sync::OnceLock;

use thiserror::Error;

#[cfg(feature = "os-random")]
mod os;
#[cfg(feature = "os-random")]
pub use os::OsRandom;

mod words;
pub use words::DEFAULT_REFILL_WORDS;
pub(crate) use words::WordSource;

/// Errors from the secure random backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The backend failed or refused to produce randomness.
    ///
    /// This is fatal for the generation call in flight. The library never
    /// retries and never substitutes a non-cryptographic source.
    #[error("secure randomness unavailable: {0}")]
    Unavailable(String),
}

/// Marker trait for types usable as random backend trait objects.
///
/// Combines the bounds required of a backend: [`Send`] + [`Sync`] for use
/// from any thread, [`Debug`] to support debugging.
pub trait RandomSafe: Send + Sync + Debug {}

/// Blanket implementation: any type satisfying the bounds implements [`RandomSafe`].
impl<T: Send + Sync + Debug> RandomSafe for T {}

/// A cryptographically secure source of 32-bit words.
pub trait SecureWordSource: RandomSafe {
    /// Fill the entire buffer with independently uniform random words.
    ///
    /// Implementations must fail with an error rather than degrade to a
    /// weaker non-cryptographic source.
    fn fill_words(&self, buf: &mut [u32]) -> Result<(), SourceError>;
}

/// Random provider all generators draw from.
///
/// The provider uses a static trait object reference (`&'static dyn Trait`)
/// which gives zero runtime overhead for dispatch. Generators resolve their
/// provider once, at construction.
#[derive(Debug, Clone, Copy)]
pub struct RandomProvider {
    /// The secure word source backing all generators.
    pub word_source: &'static dyn SecureWordSource,
}

/// Static storage for the default random provider.
static DEFAULT: OnceLock<RandomProvider> = OnceLock::new();

impl RandomProvider {
    /// Create a provider based on enabled feature flags.
    #[allow(unreachable_code)]
    pub fn from_feature_flags() -> RandomProvider {
        #[cfg(feature = "os-random")]
        return RandomProvider {
            word_source: &os::OS_RANDOM,
        };

        panic!("No random backend available. Enable the os-random feature or install a provider.");
    }

    /// Install this provider as the process-wide default.
    ///
    /// Has no effect if a default is already installed.
    pub fn install_process_default(self) {
        let _ = DEFAULT.set(self);
    }

    /// Get the installed default provider, if any.
    pub fn get_default() -> Option<&'static RandomProvider> {
        DEFAULT.get()
    }

    /// The installed default, falling back to feature-flag selection.
    pub(crate) fn process_default() -> RandomProvider {
        *DEFAULT.get_or_init(RandomProvider::from_feature_flags)
    }
}
