//! Person-related generators: names, ages, emails, passwords and whole persons

use std::fmt;

use crate::data::names::{EMAIL_DOMAINS, FEMALE_FIRST_NAMES, LAST_NAMES, MALE_FIRST_NAMES};
use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::{Generator, OneOfGenerator};
use crate::generators::numbers::IntegerGenerator;
use crate::generators::strings::{draw_char, draw_count};
use crate::hashing::{HashArgument, hash_arguments};
use crate::introspect::{Fuzzable, TypeShape, Variant};
use crate::rng::SharedRng;

/// Youngest generated age
pub const MIN_AGE: u32 = 18;
/// Oldest generated age
pub const MAX_AGE: u32 = 97;

/// Smallest password length accepted
pub const MIN_PASSWORD_SIZE: usize = 3;
/// Largest password length accepted
pub const MAX_PASSWORD_SIZE: usize = 40;
const DEFAULT_MIN_PASSWORD_SIZE: usize = 7;
const DEFAULT_MAX_PASSWORD_SIZE: usize = 12;

const PASSWORD_LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const PASSWORD_UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PASSWORD_DIGITS: &[u8] = b"0123456789";
const PASSWORD_SPECIALS: &[u8] = b"!#$%&*+-=?@^_~";

/// Gender used to pick a first name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

impl HashArgument for Gender {
    fn argument_hash(&self) -> u64 {
        match self {
            Gender::Female => 1,
            Gender::Male => 2,
        }
    }
}

impl Fuzzable for Gender {
    fn shape() -> TypeShape<Self> {
        TypeShape::Enumeration(vec![
            Variant::new("Female", |_| Gender::Female),
            Variant::new("Male", |_| Gender::Male),
        ])
    }

    fn degraded() -> Self {
        Gender::Female
    }
}

fn draw_gender(rng: &SharedRng) -> Gender {
    if rng.flip_coin() {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// A generated person whose email matches their name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub gender: Gender,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Name Generators
// ============================================================================

/// Generator for first names, optionally restricted to one gender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstNameGenerator {
    gender: Option<Gender>,
}

impl FirstNameGenerator {
    /// First names for `gender`, or for a random gender on each draw
    pub fn new(gender: Option<Gender>) -> Self {
        Self { gender }
    }
}

impl Generator<String> for FirstNameGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        let gender = self.gender.unwrap_or_else(|| draw_gender(rng));
        let table = match gender {
            Gender::Female => FEMALE_FIRST_NAMES,
            Gender::Male => MALE_FIRST_NAMES,
        };
        OneOfGenerator::from_table(table).generate(rng).to_string()
    }

    fn arguments_hash(&self) -> u64 {
        self.gender.argument_hash()
    }
}

/// Generator for last names
#[derive(Debug, Clone, Copy, Default)]
pub struct LastNameGenerator;

impl Generator<String> for LastNameGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        OneOfGenerator::from_table(LAST_NAMES).generate(rng).to_string()
    }

    fn arguments_hash(&self) -> u64 {
        "last_name".argument_hash()
    }
}

// ============================================================================
// Age Generator
// ============================================================================

/// Generator for adult ages
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeGenerator;

impl Generator<u32> for AgeGenerator {
    fn generate(&self, rng: &SharedRng) -> u32 {
        let age = IntegerGenerator::between(MIN_AGE as i32, MAX_AGE as i32).generate(rng);
        age.unsigned_abs()
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&MIN_AGE, &MAX_AGE])
    }
}

// ============================================================================
// Email Generator
// ============================================================================

/// Generator for `first.last@domain` addresses
///
/// Missing name parts are drawn from the name tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailGenerator {
    first_name: Option<String>,
    last_name: Option<String>,
}

impl EmailGenerator {
    /// Emails for the given names
    pub fn new(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
        }
    }
}

fn email_local_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Generator<String> for EmailGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        let first = self
            .first_name
            .clone()
            .unwrap_or_else(|| FirstNameGenerator::default().generate(rng));
        let last = self
            .last_name
            .clone()
            .unwrap_or_else(|| LastNameGenerator.generate(rng));
        let domain = OneOfGenerator::from_table(EMAIL_DOMAINS).generate(rng);

        format!(
            "{}.{}@{}",
            email_local_part(&first),
            email_local_part(&last),
            domain
        )
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.first_name, &self.last_name])
    }
}

// ============================================================================
// Password Generator
// ============================================================================

/// Generator for passwords mixing lower-case, upper-case and digit characters
///
/// Every password holds at least one character of each class, plus one
/// special character when requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGenerator {
    min_size: usize,
    max_size: usize,
    include_special: bool,
}

impl PasswordGenerator {
    /// Create a password generator; sizes default to 7..=12 and must lie within 3..=40
    pub fn new(
        min_size: Option<usize>,
        max_size: Option<usize>,
        include_special: Option<bool>,
    ) -> Result<Self, FuzzError> {
        let include_special = include_special.unwrap_or(false);
        let (min_size, max_size) = match (min_size, max_size) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, min.max(DEFAULT_MAX_PASSWORD_SIZE)),
            (None, Some(max)) => (max.min(DEFAULT_MIN_PASSWORD_SIZE), max),
            (None, None) => (DEFAULT_MIN_PASSWORD_SIZE, DEFAULT_MAX_PASSWORD_SIZE),
        };

        if min_size > max_size {
            return Err(FuzzError::invalid_range(
                "min_size",
                min_size,
                max_size,
                "min must be <= max",
            ));
        }
        let required = Self::required_classes(include_special);
        if min_size < MIN_PASSWORD_SIZE.max(required) {
            return Err(FuzzError::invalid_range(
                "min_size",
                min_size,
                max_size,
                format!(
                    "passwords need at least {} characters",
                    MIN_PASSWORD_SIZE.max(required)
                ),
            ));
        }
        if max_size > MAX_PASSWORD_SIZE {
            return Err(FuzzError::invalid_range(
                "max_size",
                min_size,
                max_size,
                format!("passwords hold at most {MAX_PASSWORD_SIZE} characters"),
            ));
        }

        Ok(Self {
            min_size,
            max_size,
            include_special,
        })
    }

    fn required_classes(include_special: bool) -> usize {
        if include_special { 4 } else { 3 }
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_PASSWORD_SIZE,
            max_size: DEFAULT_MAX_PASSWORD_SIZE,
            include_special: false,
        }
    }
}

impl Generator<String> for PasswordGenerator {
    fn generate(&self, rng: &SharedRng) -> String {
        let length = draw_count(rng, self.min_size, self.max_size);

        let mut classes = vec![PASSWORD_LOWERCASE, PASSWORD_UPPERCASE, PASSWORD_DIGITS];
        if self.include_special {
            classes.push(PASSWORD_SPECIALS);
        }
        let pool: Vec<u8> = classes.concat();

        let mut chars: Vec<char> = classes.iter().map(|class| draw_char(rng, class)).collect();
        while chars.len() < length {
            chars.push(draw_char(rng, &pool));
        }

        for i in (1..chars.len()).rev() {
            let j = rng.next_index(i + 1);
            chars.swap(i, j);
        }
        chars.into_iter().collect()
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min_size, &self.max_size, &self.include_special])
    }
}

// ============================================================================
// Person Generator
// ============================================================================

/// Generator for consistent persons
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonGenerator;

impl Generator<Person> for PersonGenerator {
    fn generate(&self, rng: &SharedRng) -> Person {
        let gender = draw_gender(rng);
        let first_name = FirstNameGenerator::new(Some(gender)).generate(rng);
        let last_name = LastNameGenerator.generate(rng);
        let age = AgeGenerator.generate(rng);
        let email = EmailGenerator::new(Some(&first_name), Some(&last_name)).generate(rng);
        let password = PasswordGenerator::default().generate(rng);

        Person {
            gender,
            first_name,
            last_name,
            age,
            email,
            password,
        }
    }

    fn arguments_hash(&self) -> u64 {
        "person".argument_hash()
    }
}

impl Fuzzer {
    /// A first name, for `gender` when given
    pub fn generate_first_name(&mut self, gender: Option<Gender>) -> Result<String, FuzzError> {
        self.generate_from("generate_first_name", &FirstNameGenerator::new(gender))
    }

    /// A last name
    pub fn generate_last_name(&mut self) -> Result<String, FuzzError> {
        self.generate_from("generate_last_name", &LastNameGenerator)
    }

    /// An age in `18..=97`
    pub fn generate_age(&mut self) -> Result<u32, FuzzError> {
        self.generate_from("generate_age", &AgeGenerator)
    }

    /// An email address, built from the given names when provided
    pub fn generate_email(
        &mut self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<String, FuzzError> {
        self.generate_from("generate_email", &EmailGenerator::new(first_name, last_name))
    }

    /// A password of `min_size ..= max_size` characters
    pub fn generate_password(
        &mut self,
        min_size: Option<usize>,
        max_size: Option<usize>,
        include_special: Option<bool>,
    ) -> Result<String, FuzzError> {
        let generator = PasswordGenerator::new(min_size, max_size, include_special)?;
        self.generate_from("generate_password", &generator)
    }

    /// A whole person
    pub fn generate_person(&mut self) -> Result<Person, FuzzError> {
        self.generate_from("generate_person", &PersonGenerator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzer::test_fuzzer;

    #[test]
    fn test_first_name_respects_gender() {
        let mut fuzzer = test_fuzzer(3);
        for _ in 0..20 {
            let name = fuzzer.generate_first_name(Some(Gender::Female)).unwrap();
            assert!(FEMALE_FIRST_NAMES.contains(&name.as_str()));
        }
        for _ in 0..20 {
            let name = fuzzer.generate_first_name(Some(Gender::Male)).unwrap();
            assert!(MALE_FIRST_NAMES.contains(&name.as_str()));
        }
    }

    #[test]
    fn test_first_names_pool_is_exhaustible() {
        let mut fuzzer = test_fuzzer(3).no_duplication_fuzzer();
        let names = fuzzer
            .collect_distinct(100, |f| f.generate_first_name(Some(Gender::Male)))
            .unwrap();
        assert_eq!(names.len(), MALE_FIRST_NAMES.len());
    }

    #[test]
    fn test_age_range() {
        let mut fuzzer = test_fuzzer(3);
        for _ in 0..200 {
            let age = fuzzer.generate_age().unwrap();
            assert!((MIN_AGE..=MAX_AGE).contains(&age));
        }
    }

    #[test]
    fn test_email_uses_names() {
        let mut fuzzer = test_fuzzer(3);
        let email = fuzzer.generate_email(Some("Jean-Luc"), Some("Picard")).unwrap();
        assert!(email.starts_with("jeanluc.picard@"));

        let random = fuzzer.generate_email(None, None).unwrap();
        assert_eq!(random.matches('@').count(), 1);
    }

    #[test]
    fn test_password_classes() {
        let mut fuzzer = test_fuzzer(3);
        for _ in 0..50 {
            let password = fuzzer.generate_password(None, None, Some(true)).unwrap();
            assert!((7..=12).contains(&password.len()));
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.bytes().any(|b| PASSWORD_SPECIALS.contains(&b)));
        }
    }

    #[test]
    fn test_password_inverted_range_always_fails() {
        let mut fuzzer = test_fuzzer(3);
        for _ in 0..5 {
            let err = fuzzer.generate_password(Some(2), Some(1), None).unwrap_err();
            assert_eq!(
                err,
                FuzzError::invalid_range("min_size", 2, 1, "min must be <= max")
            );
        }
    }

    #[test]
    fn test_password_absolute_bounds() {
        let mut fuzzer = test_fuzzer(3);
        assert!(fuzzer.generate_password(Some(2), Some(5), None).is_err());
        assert!(fuzzer.generate_password(Some(3), Some(41), None).is_err());
        assert!(fuzzer.generate_password(Some(3), Some(3), Some(true)).is_err());
        assert_eq!(fuzzer.generate_password(Some(40), Some(40), None).unwrap().len(), 40);
        assert_eq!(fuzzer.generate_password(Some(3), Some(3), None).unwrap().len(), 3);
    }

    #[test]
    fn test_person_is_consistent() {
        let mut fuzzer = test_fuzzer(3);
        let person = fuzzer.generate_person().unwrap();
        let table = match person.gender {
            Gender::Female => FEMALE_FIRST_NAMES,
            Gender::Male => MALE_FIRST_NAMES,
        };

        assert!(table.contains(&person.first_name.as_str()));
        assert!(person.email.starts_with(&format!(
            "{}.{}@",
            person.first_name.to_lowercase(),
            person.last_name.to_lowercase()
        )));
        assert!((MIN_AGE..=MAX_AGE).contains(&person.age));
    }

    #[test]
    fn test_gender_enumeration() {
        let mut fuzzer = test_fuzzer(3).no_duplication_fuzzer();
        let mut genders = vec![
            fuzzer.generate_enum::<Gender>().unwrap(),
            fuzzer.generate_enum::<Gender>().unwrap(),
        ];
        genders.sort();
        assert_eq!(genders, vec![Gender::Female, Gender::Male]);
        assert!(fuzzer.generate_enum::<Gender>().unwrap_err().is_exhausted());
    }
}
