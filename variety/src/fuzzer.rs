//! The [`Fuzzer`] entry point: seed handling, announcement, no-duplication scopes.

use std::fmt::Debug;
use std::hash::Hash;

use crate::config::{ConfigError, FuzzerConfig};
use crate::error::FuzzError;
use crate::generator::Generator;
use crate::hashing::{combine_hashes, hash_value};
use crate::introspect::{Fuzzable, GraphFuzzer};
use crate::log_sink::{announcement, global_log_sink};
use crate::memoizer::{Memoizer, MemoizerKey};
use crate::rng::{SharedRng, entropy_seed};

/// Deterministic source of test data
///
/// Two fuzzers built with the same seed produce the same values for the same
/// sequence of calls, whatever their names.
///
/// ```rust
/// use variety::Fuzzer;
///
/// variety::register_log_sink(|_: &str| {});
///
/// let mut first = Fuzzer::with_seed(1226354269).unwrap();
/// let mut second = Fuzzer::builder().seed(1226354269).name("other").build().unwrap();
///
/// assert_eq!(
///     first.generate_positive_integer(None).unwrap(),
///     second.generate_positive_integer(None).unwrap()
/// );
/// ```
#[derive(Debug)]
pub struct Fuzzer {
    seed: i32,
    name: String,
    rng: SharedRng,
    memoizer: Memoizer,
    avoid_duplicates: bool,
    max_failing_attempts: usize,
}

impl Fuzzer {
    /// Create a fuzzer, drawing a seed from entropy when none is given
    pub fn new(seed: Option<i32>) -> Result<Self, FuzzError> {
        Self::from_config(FuzzerConfig {
            seed,
            ..FuzzerConfig::default()
        })
    }

    /// Create a fuzzer replaying `seed`
    pub fn with_seed(seed: i32) -> Result<Self, FuzzError> {
        Self::new(Some(seed))
    }

    /// Start a fluent builder
    pub fn builder() -> FuzzerBuilder {
        FuzzerBuilder::new()
    }

    /// Create a fuzzer from a validated configuration and announce its seed
    pub fn from_config(config: FuzzerConfig) -> Result<Self, FuzzError> {
        config.validate()?;

        let sink = global_log_sink();
        if !sink.is_configured() {
            return Err(FuzzError::LogSinkNotConfigured);
        }

        let seed = config.seed.unwrap_or_else(entropy_seed);
        let name = config.name.unwrap_or_else(current_test_name);
        sink.log(&announcement(seed, &name))?;

        Ok(Self {
            seed,
            name,
            rng: SharedRng::new(seed),
            memoizer: Memoizer::new(),
            avoid_duplicates: config.avoid_duplicates,
            max_failing_attempts: config.max_failing_attempts,
        })
    }

    /// Seed of the PRNG stream, for replaying a test
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Informational name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether generators avoid returning values they already returned
    pub fn avoid_duplicates(&self) -> bool {
        self.avoid_duplicates
    }

    /// Attempt budget of the no-duplication guard
    pub fn max_failing_attempts(&self) -> usize {
        self.max_failing_attempts
    }

    /// Change the attempt budget of the no-duplication guard
    ///
    /// A budget of zero is rejected and leaves the current budget in place.
    pub fn set_max_failing_attempts(&mut self, attempts: usize) -> Result<(), ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::InvalidMaxFailingAttempts(attempts));
        }
        self.max_failing_attempts = attempts;
        Ok(())
    }

    /// A fuzzer drawing from this fuzzer's stream with its own, empty duplicate-avoidance scope
    pub fn no_duplication_fuzzer(&self) -> Fuzzer {
        tracing::debug!(parent = %self.name, seed = self.seed, "creating no-duplication fuzzer");

        Fuzzer {
            seed: self.seed,
            name: format!("{} (no duplication)", self.name),
            rng: self.rng.clone(),
            memoizer: Memoizer::new(),
            avoid_duplicates: true,
            max_failing_attempts: self.max_failing_attempts,
        }
    }

    /// The PRNG stream behind this fuzzer
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// Values already returned for `operation` called with `arguments_hash`, sorted
    pub fn already_provided<T>(&self, operation: &'static str, arguments_hash: u64) -> Vec<T>
    where
        T: Ord + Clone + 'static,
    {
        self.memoizer
            .already_provided::<T>(&MemoizerKey::new::<T>(operation, arguments_hash))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Run `generate` until it yields a value not yet returned for this stream
    ///
    /// Fails with [`FuzzError::Duplication`] after `max_attempts` stale draws.
    /// Errors from `generate` itself are returned immediately.
    pub fn generate_without_duplication<T, F>(
        &mut self,
        operation: &'static str,
        arguments_hash: u64,
        max_attempts: usize,
        mut generate: F,
    ) -> Result<T, FuzzError>
    where
        T: Ord + Clone + Debug + 'static,
        F: FnMut(&mut Fuzzer) -> Result<T, FuzzError>,
    {
        let key = MemoizerKey::new::<T>(operation, arguments_hash);

        for _ in 0..max_attempts {
            let candidate = generate(self)?;
            if self.memoizer.record(&key, &candidate) {
                return Ok(candidate);
            }
        }

        let failure = self.memoizer.exhausted::<T>(&key, max_attempts);
        tracing::debug!(
            operation,
            max_attempts,
            provided = failure.already_provided.len(),
            "no-duplication attempts exhausted"
        );
        Err(failure.into())
    }

    /// Draw once, or through the no-duplication guard when this fuzzer avoids duplicates
    pub fn generate_value<T, F>(
        &mut self,
        operation: &'static str,
        arguments_hash: u64,
        mut generate: F,
    ) -> Result<T, FuzzError>
    where
        T: Ord + Clone + Debug + 'static,
        F: FnMut(&mut Fuzzer) -> Result<T, FuzzError>,
    {
        if self.avoid_duplicates {
            let attempts = self.max_failing_attempts;
            self.generate_without_duplication(operation, arguments_hash, attempts, generate)
        } else {
            generate(self)
        }
    }

    /// Draw from `generator`, honouring the no-duplication mode
    pub fn generate_from<T, G>(
        &mut self,
        operation: &'static str,
        generator: &G,
    ) -> Result<T, FuzzError>
    where
        T: Ord + Clone + Debug + 'static,
        G: Generator<T>,
    {
        let arguments_hash = generator.arguments_hash();
        self.generate_value(operation, arguments_hash, |fuzzer| {
            Ok(generator.generate(&fuzzer.rng))
        })
    }

    /// Call `generate` up to `count` times, stopping early once its pool is exhausted
    ///
    /// Meant for no-duplication fuzzers: collects as many distinct values as
    /// the pool holds without treating exhaustion as an error.
    pub fn collect_distinct<T, F>(&mut self, count: usize, mut generate: F) -> Result<Vec<T>, FuzzError>
    where
        F: FnMut(&mut Fuzzer) -> Result<T, FuzzError>,
    {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            match generate(self) {
                Ok(value) => values.push(value),
                Err(err) if err.is_exhausted() => break,
                Err(err) => return Err(err),
            }
        }
        Ok(values)
    }

    /// Heads or tails
    pub fn flip_coin(&mut self) -> bool {
        self.rng.flip_coin()
    }

    /// Pick one of `candidates` uniformly
    ///
    /// `None` and an empty slice are rejected with distinct errors.
    pub fn pick_one_from<'a, T, C>(&mut self, candidates: C) -> Result<T, FuzzError>
    where
        T: Hash + Ord + Clone + Debug + 'static,
        C: Into<Option<&'a [T]>>,
    {
        let candidates = candidates.into().ok_or(FuzzError::NullCandidates {
            parameter: "candidates",
        })?;
        if candidates.is_empty() {
            return Err(FuzzError::EmptyCandidates {
                parameter: "candidates",
            });
        }

        let arguments_hash = combine_hashes(candidates.iter().map(hash_value));
        self.generate_value("pick_one_from", arguments_hash, |fuzzer| {
            Ok(candidates[fuzzer.rng.next_index(candidates.len())].clone())
        })
    }

    /// Build a fully populated instance of `T` from its type descriptor
    ///
    /// Never fails: branches past the recursion ceiling and types whose
    /// constructors all fail come back degraded instead.
    pub fn generate_instance_of<T: Fuzzable>(&mut self) -> T {
        GraphFuzzer::new(self).fuzz::<T>()
    }

    /// Pick a value of an enumeration, honouring the no-duplication mode
    pub fn generate_enum<T>(&mut self) -> Result<T, FuzzError>
    where
        T: Fuzzable + Ord + Clone + Debug,
    {
        let arguments_hash = hash_value(std::any::type_name::<T>());
        self.generate_value("generate_enum", arguments_hash, |fuzzer| {
            Ok(fuzzer.generate_instance_of::<T>())
        })
    }
}

/// Fluent builder for [`Fuzzer`]
#[derive(Debug, Clone, Default)]
pub struct FuzzerBuilder {
    config: FuzzerConfig,
}

impl FuzzerBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: FuzzerConfig::default(),
        }
    }

    /// Replay a specific seed
    pub fn seed(mut self, seed: i32) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the informational name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Never return a value twice for the same operation and arguments
    pub fn avoid_duplicates(mut self, avoid: bool) -> Self {
        self.config.avoid_duplicates = avoid;
        self
    }

    /// Set the attempt budget of the no-duplication guard
    pub fn max_failing_attempts(mut self, attempts: usize) -> Self {
        self.config.max_failing_attempts = attempts;
        self
    }

    /// Validate, create and announce the fuzzer
    pub fn build(self) -> Result<Fuzzer, FuzzError> {
        Fuzzer::from_config(self.config)
    }
}

fn current_test_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("unnamed")
        .to_string()
}

/// Fuzzer with a silent sink registered, for unit tests
#[cfg(test)]
pub(crate) fn test_fuzzer(seed: i32) -> Fuzzer {
    crate::register_log_sink(|_: &str| {});
    Fuzzer::with_seed(seed).unwrap()
}
