//! Semantic generators and the [`Fuzzer`](crate::Fuzzer) operations built on them
//!
//! This module provides generators for:
//! - Numbers (integers, longs, decimals, booleans)
//! - Dates and date-times
//! - GUIDs
//! - Text (latin words, sentences, patterns)
//! - Persons (names, ages, emails, passwords)
//! - Postal addresses
//!
//! Every generator validates its parameters when built and draws only through
//! the shared PRNG, so a seed reproduces every value.

pub mod addresses;
pub mod dates;
pub mod guids;
pub mod numbers;
pub mod persons;
pub mod strings;

pub use addresses::{Address, AddressGenerator, Country};
pub use dates::{DateGenerator, DateTimeGenerator};
pub use guids::GuidGenerator;
pub use numbers::{
    BooleanGenerator, DECIMAL_MAX, DecimalGenerator, IntegerGenerator, LongGenerator,
};
pub use persons::{
    AgeGenerator, EmailGenerator, FirstNameGenerator, Gender, LastNameGenerator,
    PasswordGenerator, Person, PersonGenerator,
};
pub use strings::{LatinTextGenerator, PatternGenerator, SentenceGenerator};
