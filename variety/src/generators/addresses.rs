//! Postal address generator

use std::fmt;

use crate::data::places::{
    AMERICAN_CITIES, AMERICAN_STREETS, BRITISH_CITIES, BRITISH_POSTCODE, BRITISH_STREETS,
    FIVE_DIGIT_ZIP, FRENCH_CITIES, FRENCH_STREETS, GERMAN_CITIES, GERMAN_STREETS,
    SPANISH_CITIES, SPANISH_STREETS,
};
use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::{Generator, OneOfGenerator};
use crate::generators::numbers::IntegerGenerator;
use crate::generators::strings::PatternGenerator;
use crate::hashing::HashArgument;
use crate::introspect::{Fuzzable, TypeShape, Variant};
use crate::rng::SharedRng;

const MAX_STREET_NUMBER: i32 = 200;

/// Countries addresses can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Country {
    France,
    Germany,
    Spain,
    UnitedKingdom,
    UnitedStates,
}

impl Country {
    /// Every supported country
    pub const ALL: [Country; 5] = [
        Country::France,
        Country::Germany,
        Country::Spain,
        Country::UnitedKingdom,
        Country::UnitedStates,
    ];

    fn cities(self) -> &'static [&'static str] {
        match self {
            Country::France => FRENCH_CITIES,
            Country::Germany => GERMAN_CITIES,
            Country::Spain => SPANISH_CITIES,
            Country::UnitedKingdom => BRITISH_CITIES,
            Country::UnitedStates => AMERICAN_CITIES,
        }
    }

    fn streets(self) -> &'static [&'static str] {
        match self {
            Country::France => FRENCH_STREETS,
            Country::Germany => GERMAN_STREETS,
            Country::Spain => SPANISH_STREETS,
            Country::UnitedKingdom => BRITISH_STREETS,
            Country::UnitedStates => AMERICAN_STREETS,
        }
    }

    fn zip_pattern(self) -> &'static str {
        match self {
            Country::UnitedKingdom => BRITISH_POSTCODE,
            _ => FIVE_DIGIT_ZIP,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Spain => "Spain",
            Country::UnitedKingdom => "United Kingdom",
            Country::UnitedStates => "United States",
        };
        write!(f, "{}", name)
    }
}

impl HashArgument for Country {
    fn argument_hash(&self) -> u64 {
        *self as u64 + 1
    }
}

impl Fuzzable for Country {
    fn shape() -> TypeShape<Self> {
        TypeShape::Enumeration(
            Country::ALL
                .iter()
                .map(|country| {
                    let country = *country;
                    Variant::new(country_label(country), move |_| country)
                })
                .collect(),
        )
    }

    fn degraded() -> Self {
        Country::France
    }
}

fn country_label(country: Country) -> &'static str {
    match country {
        Country::France => "France",
        Country::Germany => "Germany",
        Country::Spain => "Spain",
        Country::UnitedKingdom => "UnitedKingdom",
        Country::UnitedStates => "UnitedStates",
    }
}

/// A generated postal address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub street_number: u32,
    pub street_name: String,
    pub city: String,
    pub zip_code: String,
    pub country: Country,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}, {}",
            self.street_number, self.street_name, self.zip_code, self.city, self.country
        )
    }
}

/// Generator for addresses in one country, or in a random country per draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressGenerator {
    country: Option<Country>,
}

impl AddressGenerator {
    /// Addresses located in `country` when given
    pub fn new(country: Option<Country>) -> Self {
        Self { country }
    }
}

impl Generator<Address> for AddressGenerator {
    fn generate(&self, rng: &SharedRng) -> Address {
        let country = self
            .country
            .unwrap_or_else(|| OneOfGenerator::from_table(&Country::ALL[..]).generate(rng));

        let street_number = IntegerGenerator::between(1, MAX_STREET_NUMBER)
            .generate(rng)
            .unsigned_abs();
        let street_name = OneOfGenerator::from_table(country.streets())
            .generate(rng)
            .to_string();
        let city = OneOfGenerator::from_table(country.cities())
            .generate(rng)
            .to_string();
        let zip_code = match PatternGenerator::new(country.zip_pattern()) {
            Ok(pattern) => pattern.generate(rng),
            Err(_) => String::new(),
        };

        Address {
            street_number,
            street_name,
            city,
            zip_code,
            country,
        }
    }

    fn arguments_hash(&self) -> u64 {
        self.country.argument_hash()
    }
}

impl Fuzzer {
    /// A postal address, in `country` when given
    pub fn generate_address(&mut self, country: Option<Country>) -> Result<Address, FuzzError> {
        self.generate_from("generate_address", &AddressGenerator::new(country))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzer::test_fuzzer;

    #[test]
    fn test_address_in_requested_country() {
        let mut fuzzer = test_fuzzer(44);
        for _ in 0..20 {
            let address = fuzzer.generate_address(Some(Country::Germany)).unwrap();
            assert_eq!(address.country, Country::Germany);
            assert!(GERMAN_CITIES.contains(&address.city.as_str()));
            assert!(GERMAN_STREETS.contains(&address.street_name.as_str()));
            assert_eq!(address.zip_code.len(), 5);
            assert!(address.zip_code.chars().all(|c| c.is_ascii_digit()));
            assert!((1..=200).contains(&address.street_number));
        }
    }

    #[test]
    fn test_british_postcode_layout() {
        let mut fuzzer = test_fuzzer(44);
        let address = fuzzer.generate_address(Some(Country::UnitedKingdom)).unwrap();
        let chars: Vec<char> = address.zip_code.chars().collect();

        assert_eq!(chars.len(), 7);
        assert!(chars[0].is_ascii_uppercase() && chars[1].is_ascii_uppercase());
        assert!(chars[2].is_ascii_digit());
        assert_eq!(chars[3], ' ');
        assert!(chars[4].is_ascii_digit());
    }

    #[test]
    fn test_random_country_addresses() {
        let mut fuzzer = test_fuzzer(44);
        for _ in 0..20 {
            let address = fuzzer.generate_address(None).unwrap();
            assert!(address.country.cities().contains(&address.city.as_str()));
        }
    }

    #[test]
    fn test_address_display() {
        let address = Address {
            street_number: 10,
            street_name: "Downing Street".to_string(),
            city: "London".to_string(),
            zip_code: "SW1A 2AA".to_string(),
            country: Country::UnitedKingdom,
        };
        assert_eq!(
            address.to_string(),
            "10 Downing Street, SW1A 2AA London, United Kingdom"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_address_serde_roundtrip() {
        let mut fuzzer = test_fuzzer(45);
        let address = fuzzer.generate_address(Some(Country::France)).unwrap();

        let json = serde_json::to_string(&address).unwrap();
        assert!(json.contains("\"country\":\"France\""));
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address);
    }
}
