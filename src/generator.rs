//! Numeric and textual identifier generators.

use crate::convert;
use crate::plan;
use crate::random::{RandomProvider, WordSource, DEFAULT_REFILL_WORDS};
use crate::IdError;

/// Generates uniform random integers of a fixed bit-strength.
///
/// Values are uniform in `0..2^bits` for `1 <= bits <= 53`. For wider
/// identifiers use [`IdentifierGenerator`], which renders text instead of
/// composing a native value.
#[derive(Debug)]
pub struct NumberGenerator {
    words: WordSource,
    strategy: Strategy,
}

/// How to compose a value from the word source. Fixed at construction.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    /// `bits < 32`: one word, masked.
    Masked(u32),
    /// `bits == 32`: one raw word.
    Full,
    /// `32 < bits <= 53`: two words; the second is masked and becomes the
    /// high part.
    Wide(u32),
}

impl NumberGenerator {
    /// Upper bound for `bits`.
    ///
    /// 53 bits is the widest integer that survives a round-trip through an
    /// f64 mantissa, which is where numeric identifiers commonly end up
    /// (JSON numbers, JavaScript callers). Wider shapes must go through
    /// [`IdentifierGenerator`].
    pub const MAX_BITS: u32 = 53;

    /// Creates a generator using the process default random provider.
    pub fn new(bits: u32) -> Result<Self, IdError> {
        Self::with_provider(bits, RandomProvider::process_default(), DEFAULT_REFILL_WORDS)
    }

    /// Creates a generator with an explicit provider and refill size.
    ///
    /// Fails with [`IdError::InvalidBits`] unless `1 <= bits <= 53`. The
    /// check happens here so the contract violation surfaces before any
    /// randomness is drawn.
    pub fn with_provider(
        bits: u32,
        provider: RandomProvider,
        refill_words: usize,
    ) -> Result<Self, IdError> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(IdError::InvalidBits(bits));
        }

        let strategy = if bits < 32 {
            Strategy::Masked((1_u32 << bits) - 1)
        } else if bits == 32 {
            Strategy::Full
        } else {
            Strategy::Wide((1_u32 << (bits - 32)) - 1)
        };

        Ok(NumberGenerator {
            words: WordSource::new(provider, refill_words),
            strategy,
        })
    }

    /// Next random value, uniform in `0..2^bits`.
    pub fn next(&mut self) -> Result<u64, IdError> {
        let value = match self.strategy {
            Strategy::Masked(mask) => (self.words.next_word()? & mask) as u64,
            Strategy::Full => self.words.next_word()? as u64,
            Strategy::Wide(high_mask) => {
                let low = self.words.next_word()? as u64;
                let high = (self.words.next_word()? & high_mask) as u64;
                (high << 32) | low
            }
        };

        Ok(value)
    }
}

/// Generates fixed-width identifier strings for one (bits, base) shape.
///
/// Every produced string has exactly the same length, with `'0'` padding on
/// the left when the random value is small. The generator owns reusable
/// scratch buffers, so each call allocates only the returned [`String`].
#[derive(Debug)]
pub struct IdentifierGenerator {
    base: u32,
    /// Reused output buffer. Fully rewritten on every call.
    digits: Vec<u8>,
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    /// `bits <= 53`: compose a native value and render it directly.
    Narrow(NumberGenerator),
    /// `bits > 53`: big-endian scratch words fed to the base converter.
    Wide {
        words: WordSource,
        /// Holds the random value only for the duration of one conversion.
        scratch: Vec<u32>,
        top_mask: u32,
    },
}

impl IdentifierGenerator {
    /// Creates a generator using the process default random provider.
    pub fn new(bits: u32, base: u32) -> Result<Self, IdError> {
        Self::with_provider(
            bits,
            base,
            RandomProvider::process_default(),
            DEFAULT_REFILL_WORDS,
        )
    }

    /// Creates a generator with an explicit provider and refill size.
    ///
    /// Fails with [`IdError::InvalidBase`] unless `2 <= base <= 36` and with
    /// [`IdError::InvalidBits`] for `bits == 0`, before any randomness is
    /// drawn.
    pub fn with_provider(
        bits: u32,
        base: u32,
        provider: RandomProvider,
        refill_words: usize,
    ) -> Result<Self, IdError> {
        if base < 2 || base > 36 {
            return Err(IdError::InvalidBase(base));
        }
        if bits == 0 {
            return Err(IdError::InvalidBits(bits));
        }

        let digits = vec![0; plan::max_digits(bits, base)];

        let inner = if bits <= NumberGenerator::MAX_BITS {
            Inner::Narrow(NumberGenerator::with_provider(bits, provider, refill_words)?)
        } else {
            Inner::Wide {
                words: WordSource::new(provider, refill_words),
                scratch: vec![0; plan::word_count(bits)],
                top_mask: plan::top_word_mask(bits),
            }
        };

        Ok(IdentifierGenerator {
            base,
            digits,
            inner,
        })
    }

    /// Length of every identifier this generator produces.
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Next identifier. Always exactly [`digit_count`][Self::digit_count]
    /// characters.
    pub fn next(&mut self) -> Result<String, IdError> {
        match &mut self.inner {
            Inner::Narrow(numbers) => {
                let value = numbers.next()?;
                convert::format_fixed(value, self.base, &mut self.digits);
            }
            Inner::Wide {
                words,
                scratch,
                top_mask,
            } => {
                // Least-significant word first; the most-significant word is
                // drawn last and is the only one masked.
                for word in scratch.iter_mut().rev() {
                    *word = words.next_word()?;
                }
                scratch[0] &= *top_mask;

                if self.base == 16 {
                    convert::convert_hex(scratch, &mut self.digits);
                } else {
                    convert::convert_any(scratch, self.base, &mut self.digits);
                }
            }
        }

        let id = std::str::from_utf8(&self.digits).expect("ascii digits");
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;
    use crate::random::{SecureWordSource, SourceError};

    /// Hands out a scripted word sequence, then zeros.
    #[derive(Debug)]
    struct Script(Mutex<Vec<u32>>);

    impl Script {
        fn provider(sequence: &[u32]) -> RandomProvider {
            let mut rev = sequence.to_vec();
            rev.reverse();
            let source = Box::leak(Box::new(Script(Mutex::new(rev))));
            RandomProvider {
                word_source: source,
            }
        }
    }

    impl SecureWordSource for Script {
        fn fill_words(&self, buf: &mut [u32]) -> Result<(), SourceError> {
            let mut sequence = self.0.lock().unwrap();
            for word in buf.iter_mut() {
                *word = sequence.pop().unwrap_or(0);
            }
            Ok(())
        }
    }

    #[test]
    fn number_bits_must_be_1_to_53() {
        assert!(matches!(
            NumberGenerator::new(0),
            Err(IdError::InvalidBits(0))
        ));
        assert!(matches!(
            NumberGenerator::new(54),
            Err(IdError::InvalidBits(54))
        ));
        assert!(NumberGenerator::new(1).is_ok());
        assert!(NumberGenerator::new(53).is_ok());
    }

    #[test]
    fn number_masks_to_bit_strength() {
        let provider = Script::provider(&[u32::MAX, u32::MAX, u32::MAX, u32::MAX]);

        let mut numbers = NumberGenerator::with_provider(7, provider, 4).unwrap();
        assert_eq!(numbers.next().unwrap(), 0x7f);
    }

    #[test]
    fn number_32_bits_is_raw_word() {
        let provider = Script::provider(&[0xdead_beef]);

        let mut numbers = NumberGenerator::with_provider(32, provider, 4).unwrap();
        assert_eq!(numbers.next().unwrap(), 0xdead_beef);
    }

    #[test]
    fn number_wide_combines_two_words() {
        // First word is the low half, second is masked for the high bits.
        let provider = Script::provider(&[0xffff_ffff, 0xffff_ffff]);

        let mut numbers = NumberGenerator::with_provider(33, provider, 4).unwrap();
        assert_eq!(numbers.next().unwrap(), (1_u64 << 33) - 1);
    }

    #[test]
    fn identifier_validates_shape() {
        assert!(matches!(
            IdentifierGenerator::new(128, 1),
            Err(IdError::InvalidBase(1))
        ));
        assert!(matches!(
            IdentifierGenerator::new(128, 37),
            Err(IdError::InvalidBase(37))
        ));
        assert!(matches!(
            IdentifierGenerator::new(0, 16),
            Err(IdError::InvalidBits(0))
        ));
    }

    #[test]
    fn narrow_path_pads_with_zeros() {
        let provider = Script::provider(&[0]);

        let mut ids = IdentifierGenerator::with_provider(8, 16, provider, 4).unwrap();
        assert_eq!(ids.next().unwrap(), "00");
    }

    #[test]
    fn wide_path_masks_and_trims() {
        // 60 bits: two words, top masked to 28 bits, 15 hex digits. The
        // low word is drawn first; the scripted draw [1, 0] yields the
        // big-endian array [0x00000000, 0x00000001].
        let provider = Script::provider(&[1, 0]);

        let mut ids = IdentifierGenerator::with_provider(60, 16, provider, 4).unwrap();
        assert_eq!(ids.next().unwrap(), "000000000000001");
    }

    #[test]
    fn wide_path_general_base_matches_value() {
        // 64 bits in base 10: value is exactly the two drawn words.
        let provider = Script::provider(&[0x0000_0001, 0x0000_0001]);

        let mut ids = IdentifierGenerator::with_provider(64, 10, provider, 4).unwrap();

        let expected = (1_u64 << 32) + 1;
        let digit_count = ids.digit_count();
        assert_eq!(ids.next().unwrap(), format!("{expected:0digit_count$}"));
    }

    #[test]
    fn length_is_stable_across_calls() {
        let mut ids = IdentifierGenerator::new(128, 36).unwrap();
        let len = ids.digit_count();

        for _ in 0..200 {
            assert_eq!(ids.next().unwrap().len(), len);
        }
    }
}
