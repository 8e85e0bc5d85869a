//! Process-lifetime caching of constructed generators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::generator::{IdentifierGenerator, NumberGenerator};
use crate::random::{RandomProvider, DEFAULT_REFILL_WORDS};
use crate::IdError;

/// Customized config for creating a [`Registry`].
///
/// ```
/// use fixid::RegistryConfig;
///
/// let registry = RegistryConfig::new()
///     .set_refill_words(256)
///     .build();
/// # let _ = registry;
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    provider: Option<RandomProvider>,
    refill_words: usize,
}

impl RegistryConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        RegistryConfig::default()
    }

    /// Set the random provider.
    ///
    /// This overrides what is set in
    /// [`RandomProvider::install_process_default()`].
    pub fn set_provider(mut self, provider: RandomProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Number of words fetched per backend refill.
    ///
    /// Defaults to [`DEFAULT_REFILL_WORDS`].
    pub fn set_refill_words(mut self, refill_words: usize) -> Self {
        self.refill_words = refill_words;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        Registry {
            config: self,
            numbers: Mutex::new(HashMap::new()),
            strings: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            provider: None,
            refill_words: DEFAULT_REFILL_WORDS,
        }
    }
}

/// Cache of constructed generators keyed by their shape.
///
/// Generators are built on first request and kept for the registry's
/// lifetime; repeated requests for the same shape return the same shared
/// instance. There is no eviction, so the registry grows monotonically,
/// bounded by the number of distinct shapes actually requested.
///
/// Handed-out generators are `Arc<Mutex<…>>` because each one owns scratch
/// buffers that require exclusive access per call.
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    numbers: Mutex<HashMap<u32, Arc<Mutex<NumberGenerator>>>>,
    strings: Mutex<HashMap<(u32, u32), Arc<Mutex<IdentifierGenerator>>>>,
}

impl Registry {
    /// Creates a registry with default config.
    pub fn new() -> Self {
        RegistryConfig::new().build()
    }

    fn provider(&self) -> RandomProvider {
        self.config
            .provider
            .unwrap_or_else(RandomProvider::process_default)
    }

    /// Numeric generator for `bits` (1-53), built on first request.
    ///
    /// Holding the map lock across construction serializes concurrent
    /// first-time requests for the same shape.
    pub fn number(&self, bits: u32) -> Result<Arc<Mutex<NumberGenerator>>, IdError> {
        let mut numbers = self.numbers.lock().expect("number map lock");

        if let Some(generator) = numbers.get(&bits) {
            return Ok(generator.clone());
        }

        debug!("Build number generator for {} bits", bits);
        let generator = NumberGenerator::with_provider(
            bits,
            self.provider(),
            self.config.refill_words,
        )?;

        let generator = Arc::new(Mutex::new(generator));
        numbers.insert(bits, generator.clone());

        Ok(generator)
    }

    /// String generator for the (bits, base) shape, built on first request.
    pub fn string(
        &self,
        bits: u32,
        base: u32,
    ) -> Result<Arc<Mutex<IdentifierGenerator>>, IdError> {
        let mut strings = self.strings.lock().expect("string map lock");

        if let Some(generator) = strings.get(&(bits, base)) {
            return Ok(generator.clone());
        }

        debug!("Build identifier generator for {} bits in base {}", bits, base);
        let generator = IdentifierGenerator::with_provider(
            bits,
            base,
            self.provider(),
            self.config.refill_words,
        )?;

        let generator = Arc::new(Mutex::new(generator));
        strings.insert((bits, base), generator.clone());

        Ok(generator)
    }
}
