//! Latin text and pattern-based string generators

use crate::data::latin::LATIN_WORDS;
use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::{Generator, OneOfGenerator};
use crate::hashing::{HashArgument, hash_arguments};
use crate::rng::SharedRng;

const DEFAULT_MIN_WORDS: usize = 3;
const DEFAULT_MAX_WORDS: usize = 8;
const DEFAULT_MIN_SENTENCE_WORDS: usize = 5;
const DEFAULT_MAX_SENTENCE_WORDS: usize = 15;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

pub(crate) fn draw_char(rng: &SharedRng, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.next_index(alphabet.len())])
}

pub(crate) fn draw_count(rng: &SharedRng, min: usize, max: usize) -> usize {
    let low = i32::try_from(min).unwrap_or(i32::MAX);
    let high = i32::try_from(max).unwrap_or(i32::MAX);
    rng.next_in_range(low, high.saturating_add(1)) as usize
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Latin Text Generator
// ============================================================================

/// Generator for sequences of lorem ipsum words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatinTextGenerator {
    min_words: usize,
    max_words: usize,
}

impl LatinTextGenerator {
    /// Exactly `count` words, or 3 to 8 words when no count is given
    pub fn new(count: Option<usize>) -> Result<Self, FuzzError> {
        match count {
            Some(0) => Err(FuzzError::invalid_range(
                "count",
                0,
                0,
                "at least one word is required",
            )),
            Some(count) => Ok(Self::between(count, count)),
            None => Ok(Self::between(DEFAULT_MIN_WORDS, DEFAULT_MAX_WORDS)),
        }
    }

    pub(crate) fn between(min_words: usize, max_words: usize) -> Self {
        debug_assert!(min_words >= 1 && min_words <= max_words);
        Self {
            min_words,
            max_words,
        }
    }
}

impl Generator<Vec<String>> for LatinTextGenerator {
    fn generate(&self, rng: &SharedRng) -> Vec<String> {
        let vocabulary = OneOfGenerator::from_table(LATIN_WORDS);
        let count = draw_count(rng, self.min_words, self.max_words);
        (0..count)
            .map(|_| vocabulary.generate(rng).to_string())
            .collect()
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&"latin", &self.min_words, &self.max_words])
    }
}

// ============================================================================
// Sentence Generator
// ============================================================================

/// Generator for capitalized latin sentences ending with a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceGenerator {
    words: LatinTextGenerator,
}

impl SentenceGenerator {
    /// Exactly `words` words, or 5 to 15 words when no count is given
    pub fn new(words: Option<usize>) -> Result<Self, FuzzError> {
        let words = match words {
            Some(_) => LatinTextGenerator::new(words)?,
            None => {
                LatinTextGenerator::between(DEFAULT_MIN_SENTENCE_WORDS, DEFAULT_MAX_SENTENCE_WORDS)
            }
        };
        Ok(Self { words })
    }
}

impl Generator<String> for SentenceGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        let words = self.words.generate(rng);
        format!("{}.", capitalize(&words.join(" ")))
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&"sentence", &self.words.arguments_hash()])
    }
}

// ============================================================================
// Pattern Generator
// ============================================================================

/// Generator expanding a character pattern
///
/// `X` becomes an upper-case letter, `x` a lower-case letter and `N` a digit.
/// A backslash emits the next character literally; every other character is
/// copied as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGenerator {
    pattern: String,
}

impl PatternGenerator {
    /// Create a pattern generator; the pattern must not be empty
    pub fn new(pattern: &str) -> Result<Self, FuzzError> {
        if pattern.is_empty() {
            return Err(FuzzError::EmptyPattern);
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }
}

impl Generator<String> for PatternGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        let mut output = String::with_capacity(self.pattern.len());
        let mut chars = self.pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => output.push(chars.next().unwrap_or('\\')),
                'X' => output.push(draw_char(rng, UPPERCASE)),
                'x' => output.push(draw_char(rng, LOWERCASE)),
                'N' => output.push(draw_char(rng, DIGITS)),
                other => output.push(other),
            }
        }
        output
    }

    fn arguments_hash(&self) -> u64 {
        self.pattern.argument_hash()
    }
}

impl Fuzzer {
    /// Lorem ipsum words; `count` words, or 3 to 8 when omitted
    pub fn generate_latin_words(&mut self, count: Option<usize>) -> Result<Vec<String>, FuzzError> {
        let generator = LatinTextGenerator::new(count)?;
        self.generate_from("generate_latin_words", &generator)
    }

    /// A capitalized lorem ipsum sentence
    pub fn generate_sentence(&mut self, words: Option<usize>) -> Result<String, FuzzError> {
        let generator = SentenceGenerator::new(words)?;
        self.generate_from("generate_sentence", &generator)
    }

    /// Expand `pattern` (`X` upper, `x` lower, `N` digit, `\` escape)
    pub fn generate_string_from_pattern(&mut self, pattern: &str) -> Result<String, FuzzError> {
        let generator = PatternGenerator::new(pattern)?;
        self.generate_from("generate_string_from_pattern", &generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzer::test_fuzzer;

    #[test]
    fn test_latin_words_count() {
        let mut fuzzer = test_fuzzer(13);
        let words = fuzzer.generate_latin_words(Some(4)).unwrap();
        assert_eq!(words.len(), 4);
        assert!(words.iter().all(|word| LATIN_WORDS.contains(&word.as_str())));

        let default = fuzzer.generate_latin_words(None).unwrap();
        assert!((DEFAULT_MIN_WORDS..=DEFAULT_MAX_WORDS).contains(&default.len()));

        assert!(fuzzer.generate_latin_words(Some(0)).is_err());
    }

    #[test]
    fn test_sentence_shape() {
        let mut fuzzer = test_fuzzer(13);
        let sentence = fuzzer.generate_sentence(Some(6)).unwrap();

        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_uppercase());
        assert_eq!(sentence.split(' ').count(), 6);
    }

    #[test]
    fn test_pattern_expansion() {
        let mut fuzzer = test_fuzzer(13);
        let value = fuzzer.generate_string_from_pattern("XX-xx-NN").unwrap();
        let chars: Vec<char> = value.chars().collect();

        assert_eq!(chars.len(), 8);
        assert!(chars[0].is_ascii_uppercase() && chars[1].is_ascii_uppercase());
        assert_eq!(chars[2], '-');
        assert!(chars[3].is_ascii_lowercase() && chars[4].is_ascii_lowercase());
        assert!(chars[6].is_ascii_digit() && chars[7].is_ascii_digit());
    }

    #[test]
    fn test_pattern_escapes() {
        let mut fuzzer = test_fuzzer(13);
        assert_eq!(
            fuzzer.generate_string_from_pattern(r"\X\x\N!").unwrap(),
            "XxN!"
        );
        assert_eq!(fuzzer.generate_string_from_pattern(r"a\").unwrap(), r"a\");
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        let mut fuzzer = test_fuzzer(13);
        assert_eq!(
            fuzzer.generate_string_from_pattern(""),
            Err(FuzzError::EmptyPattern)
        );
    }

    #[test]
    fn test_pattern_pool_exhausts() {
        let mut fuzzer = test_fuzzer(13).no_duplication_fuzzer();
        fuzzer.set_max_failing_attempts(1_000).unwrap();
        let values = fuzzer
            .collect_distinct(20, |f| f.generate_string_from_pattern("N"))
            .unwrap();
        assert_eq!(values.len(), 10);
    }
}
