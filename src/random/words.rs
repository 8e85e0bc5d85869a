use super::{RandomProvider, SourceError};

/// Default number of 32-bit words fetched per backend refill.
///
/// Sized so one backend call is amortized over many draws.
pub const DEFAULT_REFILL_WORDS: usize = 1024;

/// Buffered reader of secure random 32-bit words.
///
/// Owns a pre-fetched buffer and a cursor. When the cursor reaches the end,
/// the entire buffer is refilled in a single backend call. One instance
/// belongs to exactly one generator; it is not for concurrent use.
#[derive(Debug)]
pub(crate) struct WordSource {
    provider: RandomProvider,
    buf: Vec<u32>,
    /// Next word to hand out. `buf.len()` means exhausted.
    offset: usize,
}

impl WordSource {
    /// Creates a source that refills `capacity` words at a time.
    ///
    /// The buffer starts exhausted; no randomness is drawn until the first
    /// [`WordSource::next_word`].
    pub fn new(provider: RandomProvider, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        WordSource {
            provider,
            buf: vec![0; capacity],
            offset: capacity,
        }
    }

    /// Next uniformly random word, refilling the buffer if exhausted.
    pub fn next_word(&mut self) -> Result<u32, SourceError> {
        if self.offset == self.buf.len() {
            trace!("Refill {} random words", self.buf.len());
            self.provider.word_source.fill_words(&mut self.buf)?;
            self.offset = 0;
        }

        let word = self.buf[self.offset];
        self.offset += 1;

        Ok(word)
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::super::SecureWordSource;
    use super::*;

    #[derive(Debug)]
    struct Counting(AtomicU32);

    impl SecureWordSource for Counting {
        fn fill_words(&self, buf: &mut [u32]) -> Result<(), SourceError> {
            for word in buf.iter_mut() {
                *word = self.0.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl SecureWordSource for Failing {
        fn fill_words(&self, _: &mut [u32]) -> Result<(), SourceError> {
            Err(SourceError::Unavailable("entropy pool gone".into()))
        }
    }

    #[test]
    fn refills_lazily_and_in_order() {
        let source = Box::leak(Box::new(Counting(AtomicU32::new(0))));
        let provider = RandomProvider {
            word_source: source,
        };

        let mut words = WordSource::new(provider, 4);

        // Words come out in fill order across refill boundaries.
        for expect in 0..10 {
            assert_eq!(words.next_word().unwrap(), expect);
        }
    }

    #[test]
    fn backend_failure_is_fatal() {
        let provider = RandomProvider {
            word_source: &Failing,
        };

        let mut words = WordSource::new(provider, 4);

        assert!(words.next_word().is_err());
    }
}
