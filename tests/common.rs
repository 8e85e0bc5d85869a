#![allow(unused)]
use std::sync::{Mutex, Once};

use fixid::random::{RandomProvider, SecureWordSource, SourceError};

pub fn init_log() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    static START: Once = Once::new();

    START.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter)
            .init();
    });
}

/// Word source handing out a scripted sequence, then zeros.
#[derive(Debug)]
pub struct Script(Mutex<Vec<u32>>);

impl SecureWordSource for Script {
    fn fill_words(&self, buf: &mut [u32]) -> Result<(), SourceError> {
        let mut sequence = self.0.lock().unwrap();
        for word in buf.iter_mut() {
            *word = sequence.pop().unwrap_or(0);
        }
        Ok(())
    }
}

/// Provider over a scripted word sequence. Leaks the source (tests only).
pub fn script_provider(sequence: &[u32]) -> RandomProvider {
    let mut rev = sequence.to_vec();
    rev.reverse();
    let source = Box::leak(Box::new(Script(Mutex::new(rev))));
    RandomProvider {
        word_source: source,
    }
}
