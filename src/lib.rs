//! Fixed-width random identifiers backed by a secure random source.
//!
//! fixid renders identifiers of a requested bit-strength in any radix from
//! 2 to 36. Every identifier produced for one (bits, base) shape has exactly
//! the same character length (small values are zero-padded on the left), so
//! session ids, keys and nonces can be treated as fixed-width by consumers.
//!
//! The library has no process boundary of its own: no I/O, no threads, no
//! async. The only blocking point is the call into the secure random backend
//! when the internal word buffer needs a refill.
//!
//! # Usage
//!
//! The common case is a 128-bit hexadecimal identifier:
//!
//! ```
//! let id = fixid::generate()?;
//!
//! assert_eq!(id.len(), 32);
//! # Ok::<_, fixid::IdError>(())
//! ```
//!
//! Other shapes go through [`generate_with`]:
//!
//! ```
//! // 8 random bits rendered in binary. Always 8 characters.
//! let id = fixid::generate_with(8, 2)?;
//!
//! assert_eq!(id.len(), 8);
//! # Ok::<_, fixid::IdError>(())
//! ```
//!
//! Both functions cache the constructed generator per (bits, base) shape in
//! a process-wide [`Registry`]. Holding an own registry avoids the shared
//! cache:
//!
//! ```
//! use fixid::Registry;
//!
//! let registry = Registry::new();
//!
//! let generator = registry.string(64, 36)?;
//! let mut generator = generator.lock().unwrap();
//!
//! let id = generator.next()?;
//! assert_eq!(id.len(), 13);
//! # Ok::<_, fixid::IdError>(())
//! ```
//!
//! Numeric identifiers up to 53 bits skip string rendering entirely:
//!
//! ```
//! use fixid::NumberGenerator;
//!
//! let mut numbers = NumberGenerator::new(20)?;
//!
//! let v = numbers.next()?;
//! assert!(v < (1 << 20));
//! # Ok::<_, fixid::IdError>(())
//! ```
//!
//! # Random backend
//!
//! Randomness comes from a [`random::SecureWordSource`] selected through a
//! [`random::RandomProvider`]. The default `os-random` feature provides a
//! backend on top of the operating system CSPRNG. A failing backend is a
//! fatal error for the call in flight; the library never falls back to a
//! non-cryptographic source.

#![forbid(unsafe_code)]
#![allow(clippy::manual_range_contains)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

use once_cell::sync::Lazy;
use thiserror::Error;

pub mod random;
use random::SourceError;

mod convert;
mod plan;

mod generator;
pub use generator::{IdentifierGenerator, NumberGenerator};

mod registry;
pub use registry::{Registry, RegistryConfig};

/// Default bit-strength for [`generate`].
pub const DEFAULT_BITS: u32 = 128;

/// Default radix for [`generate`].
pub const DEFAULT_BASE: u32 = 16;

/// Errors for identifier generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdError {
    /// Bit-strength outside the valid range for the requested generator.
    ///
    /// `bits` must be at least 1, and numeric generation is capped at
    /// [`NumberGenerator::MAX_BITS`].
    #[error("bits out of range: {0}")]
    InvalidBits(u32),

    /// Radix outside 2-36.
    #[error("base out of range (2-36): {0}")]
    InvalidBase(u32),

    /// The secure random backend failed during a refill.
    #[error("{0}")]
    Source(#[from] SourceError),
}

/// Registry backing [`generate`] and [`generate_with`].
static PROCESS_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Generates a 128-bit identifier in base 16.
///
/// Equivalent to `generate_with(DEFAULT_BITS, DEFAULT_BASE)`. The result is
/// always 32 lowercase hexadecimal characters.
pub fn generate() -> Result<String, IdError> {
    generate_with(DEFAULT_BITS, DEFAULT_BASE)
}

/// Generates an identifier of `bits` bit-strength rendered in `base`.
///
/// The generator for the (bits, base) shape is built on first use and cached
/// for the lifetime of the process. All identifiers for one shape have the
/// same length, `ceil(bits · ln 2 / ln base)` characters.
pub fn generate_with(bits: u32, base: u32) -> Result<String, IdError> {
    let generator = PROCESS_REGISTRY.string(bits, base)?;
    let mut generator = generator.lock().expect("generator lock");
    generator.next()
}
