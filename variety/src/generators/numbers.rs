//! Integer, long, decimal and boolean generators
//!
//! Ranges are inclusive on both ends. The one exception is the default
//! positive integer (and positive decimal) range, `[1, i32::MAX)`, which
//! keeps the historical stream documented seeds reproduce.

use std::cmp::Ordering;
use std::fmt;

use num_traits::ToPrimitive;

use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::Generator;
use crate::hashing::{HashArgument, hash_arguments};
use crate::rng::SharedRng;

/// Largest magnitude a decimal bound may take
pub const DECIMAL_MAX: f64 = 7.922_816_251_426_434e28;

// ============================================================================
// Integer Generator
// ============================================================================

/// Generator for `i32` values in an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerGenerator {
    min: i32,
    max: i32,
    open_max: bool,
}

impl IntegerGenerator {
    /// Create an integer generator; missing bounds default to the full `i32` range
    pub fn new(min: Option<i32>, max: Option<i32>) -> Result<Self, FuzzError> {
        let min = min.unwrap_or(i32::MIN);
        let max = max.unwrap_or(i32::MAX);
        if min > max {
            return Err(FuzzError::invalid_range(
                "min_value",
                min,
                max,
                "min must be <= max",
            ));
        }
        Ok(Self::between(min, max))
    }

    /// Strictly positive integers up to `max`
    ///
    /// Without `max` the range is `[1, i32::MAX)`.
    pub fn positive(max: Option<i32>) -> Result<Self, FuzzError> {
        let Some(max) = max else {
            return Ok(Self::half_open(1, i32::MAX));
        };
        if max < 1 {
            return Err(FuzzError::invalid_range(
                "max_value",
                1,
                max,
                "max must be strictly positive",
            ));
        }
        Ok(Self::between(1, max))
    }

    /// Every `i32`
    pub fn full_range() -> Self {
        Self::between(i32::MIN, i32::MAX)
    }

    pub(crate) fn between(min: i32, max: i32) -> Self {
        debug_assert!(min <= max);
        Self {
            min,
            max,
            open_max: false,
        }
    }

    /// `[min, max)`
    pub(crate) fn half_open(min: i32, max: i32) -> Self {
        debug_assert!(min < max);
        Self {
            min,
            max,
            open_max: true,
        }
    }
}

impl Generator<i32> for IntegerGenerator {
    fn generate(&self, rng: &SharedRng) -> i32 {
        if self.open_max {
            return rng.next_in_range(self.min, self.max);
        }
        match self.max.checked_add(1) {
            Some(exclusive_max) => rng.next_in_range(self.min, exclusive_max),
            // i32::MAX cannot be widened by one
            None => {
                let widened = LongGenerator::between(i64::from(self.min), i64::from(self.max));
                widened.generate(rng) as i32
            }
        }
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min, &self.max, &self.open_max])
    }
}

// ============================================================================
// Long Generator
// ============================================================================

/// Generator for `i64` values in an inclusive range
///
/// Eight drawn bytes are reduced modulo the width of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongGenerator {
    min: i64,
    max: i64,
}

impl LongGenerator {
    /// Create a long generator; missing bounds default to the full `i64` range
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, FuzzError> {
        let min = min.unwrap_or(i64::MIN);
        let max = max.unwrap_or(i64::MAX);
        if min > max {
            return Err(FuzzError::invalid_range(
                "min_value",
                min,
                max,
                "min must be <= max",
            ));
        }
        Ok(Self { min, max })
    }

    /// Strictly positive longs up to `max` (default `i64::MAX`)
    pub fn positive(max: Option<i64>) -> Result<Self, FuzzError> {
        let max = max.unwrap_or(i64::MAX);
        if max < 1 {
            return Err(FuzzError::invalid_range(
                "max_value",
                1,
                max,
                "max must be strictly positive",
            ));
        }
        Ok(Self { min: 1, max })
    }

    /// Every `i64`
    pub fn full_range() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    pub(crate) fn between(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }
}

impl Generator<i64> for LongGenerator {
    fn generate(&self, rng: &SharedRng) -> i64 {
        let mut bytes = [0u8; 8];
        rng.fill_bytes(&mut bytes);
        let drawn = u64::from_le_bytes(bytes);

        let width = (i128::from(self.max) - i128::from(self.min) + 1) as u128;
        let offset = if width > u128::from(u64::MAX) {
            u128::from(drawn)
        } else {
            u128::from(drawn) % width
        };
        (i128::from(self.min) + offset as i128) as i64
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min, &self.max])
    }
}

// ============================================================================
// Decimal Generator
// ============================================================================

/// Generator for decimal values, represented as `f64`
///
/// Whenever the range contains a whole number that fits an `i32`, the value
/// is drawn with the integer primitive, then with the long draw when it fits
/// an `i64`. Ranges holding no whole number fall back to a uniform double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalGenerator {
    min: f64,
    max: f64,
    open_max: bool,
}

impl DecimalGenerator {
    /// Create a decimal generator; missing bounds default to the decimal domain
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, FuzzError> {
        let min = min.unwrap_or(-DECIMAL_MAX);
        let max = max.unwrap_or(DECIMAL_MAX);
        Self::validated(min, max)
    }

    /// Strictly positive decimals; bounds default to `1` and `i32::MAX`
    ///
    /// The default upper bound is exclusive, like [`IntegerGenerator::positive`].
    pub fn positive(min: Option<f64>, max: Option<f64>) -> Result<Self, FuzzError> {
        let open_max = max.is_none();
        let min = min.unwrap_or(1.0);
        let max = max.unwrap_or(f64::from(i32::MAX));
        if min <= 0.0 {
            return Err(FuzzError::invalid_range(
                "min_value",
                min,
                max,
                "min must be strictly positive",
            ));
        }
        let generator = Self::validated(min, max)?;
        Ok(Self {
            open_max: open_max && generator.min < generator.max,
            ..generator
        })
    }

    fn validated(min: f64, max: f64) -> Result<Self, FuzzError> {
        for (parameter, bound) in [("min_value", min), ("max_value", max)] {
            if !bound.is_finite() {
                return Err(FuzzError::invalid_range(
                    parameter,
                    min,
                    max,
                    "bounds must be finite",
                ));
            }
            if bound.abs() > DECIMAL_MAX {
                return Err(FuzzError::invalid_range(
                    parameter,
                    min,
                    max,
                    format!("bounds must lie within +/-{DECIMAL_MAX:e}"),
                ));
            }
        }
        if min > max {
            return Err(FuzzError::invalid_range(
                "min_value",
                min,
                max,
                "min must be <= max",
            ));
        }
        Ok(Self {
            min,
            max,
            open_max: false,
        })
    }
}

impl Generator<f64> for DecimalGenerator {
    fn generate(&self, rng: &SharedRng) -> f64 {
        let low = self.min.ceil();
        let high = self.max.floor();

        if low <= high {
            if let (Some(low), Some(high)) = (low.to_i32(), high.to_i32()) {
                let integers = if self.open_max && low < high {
                    IntegerGenerator::half_open(low, high)
                } else {
                    IntegerGenerator::between(low, high)
                };
                return f64::from(integers.generate(rng));
            }
            if let (Some(low), Some(high)) = (low.to_i64(), high.to_i64()) {
                return LongGenerator::between(low, high).generate(rng) as f64;
            }
        }

        self.min + rng.next_double() * (self.max - self.min)
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min, &self.max, &self.open_max])
    }
}

/// `f64` with a total order, so decimals can be memoized
#[derive(Clone, Copy)]
struct TotalF64(f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for TotalF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

// ============================================================================
// Boolean Generator
// ============================================================================

/// Generator for fair coin flips
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGenerator;

impl Generator<bool> for BooleanGenerator {
    fn generate(&self, rng: &SharedRng) -> bool {
        rng.flip_coin()
    }

    fn arguments_hash(&self) -> u64 {
        "boolean".argument_hash()
    }
}

impl Fuzzer {
    /// Integer in `[min, max]`; bounds default to the full `i32` range
    pub fn generate_integer(
        &mut self,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Result<i32, FuzzError> {
        let generator = IntegerGenerator::new(min, max)?;
        self.generate_from("generate_integer", &generator)
    }

    /// Integer in `[1, max]`
    pub fn generate_positive_integer(&mut self, max: Option<i32>) -> Result<i32, FuzzError> {
        let generator = IntegerGenerator::positive(max)?;
        self.generate_from("generate_positive_integer", &generator)
    }

    /// Long in `[min, max]`; bounds default to the full `i64` range
    pub fn generate_long(&mut self, min: Option<i64>, max: Option<i64>) -> Result<i64, FuzzError> {
        let generator = LongGenerator::new(min, max)?;
        self.generate_from("generate_long", &generator)
    }

    /// Long in `[1, max]`
    pub fn generate_positive_long(&mut self, max: Option<i64>) -> Result<i64, FuzzError> {
        let generator = LongGenerator::positive(max)?;
        self.generate_from("generate_positive_long", &generator)
    }

    /// Decimal in `[min, max]`
    pub fn generate_decimal(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64, FuzzError> {
        let generator = DecimalGenerator::new(min, max)?;
        self.generate_decimal_from("generate_decimal", generator)
    }

    /// Strictly positive decimal in `[min, max]`
    pub fn generate_positive_decimal(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64, FuzzError> {
        let generator = DecimalGenerator::positive(min, max)?;
        self.generate_decimal_from("generate_positive_decimal", generator)
    }

    /// Heads or tails, honouring the no-duplication mode
    pub fn generate_boolean(&mut self) -> Result<bool, FuzzError> {
        self.generate_from("generate_boolean", &BooleanGenerator)
    }

    fn generate_decimal_from(
        &mut self,
        operation: &'static str,
        generator: DecimalGenerator,
    ) -> Result<f64, FuzzError> {
        let arguments_hash = generator.arguments_hash();
        self.generate_value(operation, arguments_hash, |fuzzer| {
            Ok(TotalF64(generator.generate(fuzzer.rng())))
        })
        .map(|value| value.0)
    }
}
