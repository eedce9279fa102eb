#![allow(clippy::result_large_err)]

//! # Variety - Deterministic Test Data for Rust
//!
//! Variety generates realistic, seed-reproducible test data: numbers, dates,
//! GUIDs, text, persons, addresses and whole object graphs of your own types.
//! Every fuzzer announces its seed, so a failing test can be replayed exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use variety::{Fuzzer, TracingSink};
//!
//! // Once per process, before the first fuzzer
//! variety::register_log_sink(TracingSink);
//!
//! let mut fuzzer = Fuzzer::with_seed(1226354269).unwrap();
//! let quantity = fuzzer.generate_integer(Some(1), Some(10)).unwrap();
//! assert!((1..=10).contains(&quantity));
//!
//! let person = fuzzer.generate_person().unwrap();
//! assert!(person.email.contains('@'));
//! ```
//!
//! ## Avoiding duplicates
//!
//! ```rust
//! use variety::Fuzzer;
//!
//! variety::register_log_sink(|_: &str| {});
//!
//! let fuzzer = Fuzzer::with_seed(7).unwrap();
//! let mut distinct = fuzzer.no_duplication_fuzzer();
//! let first = distinct.generate_integer(Some(1), Some(2)).unwrap();
//! let second = distinct.generate_integer(Some(1), Some(2)).unwrap();
//! assert_ne!(first, second);
//! assert!(distinct.generate_integer(Some(1), Some(2)).is_err());
//! ```

// Lets the derive macro's `::variety::` paths resolve inside this crate
extern crate self as variety;

pub mod config;
mod data;
pub mod error;
pub mod fuzzer;
pub mod generator;
pub mod generators;
pub mod hashing;
pub mod introspect;
pub mod log_sink;
pub mod memoizer;
pub mod rng;

// Re-export the main public API
pub use config::{
    COLLECTION_SIZE, ConfigError, DEFAULT_MAX_FAILING_ATTEMPTS, FuzzerConfig, MAX_RECURSION_LEVEL,
    MAX_SELF_NESTING,
};
pub use error::{DuplicationFailure, FuzzError};
pub use fuzzer::{Fuzzer, FuzzerBuilder};
pub use generator::{Generator, OneOfGenerator};
pub use generators::{Address, Country, Gender, Person};
pub use hashing::{HashArgument, combine_hashes, hash_arguments};
pub use introspect::{
    Constructor, ConstructorError, Fuzzable, GraphFuzzer, Setter, TypeDescriptor, TypeShape,
    Variant,
};
pub use log_sink::{LogSink, LogSinkRegistry, TracingSink, register_log_sink};
pub use memoizer::{Memoizer, MemoizerKey};
pub use rng::{SharedRng, SubtractiveRng};

// Re-export derive macro from separate crate when derive feature is enabled
#[cfg(feature = "derive")]
pub use variety_derive::Fuzzable;
