//! Date and date-time generators
//!
//! Dates are drawn as a whole number of seconds (or days) past the lower
//! bound, through the long draw.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::Generator;
use crate::generators::numbers::LongGenerator;
use crate::hashing::hash_arguments;
use crate::rng::SharedRng;

/// Earliest year accepted by the year-based generator
pub const MIN_YEAR: i32 = 1;
/// Latest year accepted by the year-based generator
pub const MAX_YEAR: i32 = 9999;

const DEFAULT_MIN_YEAR: i32 = 1970;
const DEFAULT_MAX_YEAR: i32 = 2050;

/// First instant of the default window, 1970-01-01T00:00:00
pub fn default_min_date_time() -> NaiveDateTime {
    year_start(DEFAULT_MIN_YEAR)
}

/// Last instant of the default window, 2050-12-31T23:59:59
pub fn default_max_date_time() -> NaiveDateTime {
    year_end(DEFAULT_MAX_YEAR)
}

fn year_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn year_end(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .unwrap_or(NaiveDateTime::MAX)
}

// ============================================================================
// Date-Time Generator
// ============================================================================

/// Generator for date-times in an inclusive window, at second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeGenerator {
    min: NaiveDateTime,
    max: NaiveDateTime,
}

impl DateTimeGenerator {
    /// Create a date-time generator; missing bounds use the default window
    pub fn new(
        min: Option<NaiveDateTime>,
        max: Option<NaiveDateTime>,
    ) -> Result<Self, FuzzError> {
        let min = min.unwrap_or_else(default_min_date_time);
        let max = max.unwrap_or_else(default_max_date_time);
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

    /// Date-times from the first second of `min_year` to the last of `max_year`
    pub fn between_years(min_year: i32, max_year: i32) -> Result<Self, FuzzError> {
        for (parameter, year) in [("min_year", min_year), ("max_year", max_year)] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(FuzzError::invalid_range(
                    parameter,
                    min_year,
                    max_year,
                    format!("years must lie within {MIN_YEAR}..={MAX_YEAR}"),
                ));
            }
        }
        if min_year > max_year {
            return Err(FuzzError::invalid_range(
                "min_year",
                min_year,
                max_year,
                "min must be <= max",
            ));
        }
        Self::new(Some(year_start(min_year)), Some(year_end(max_year)))
    }
}

impl Default for DateTimeGenerator {
    fn default() -> Self {
        Self {
            min: default_min_date_time(),
            max: default_max_date_time(),
        }
    }
}

impl Generator<NaiveDateTime> for DateTimeGenerator {
    fn generate(&self, rng: &SharedRng) -> NaiveDateTime {
        let span = (self.max - self.min).num_seconds();
        let offset = LongGenerator::between(0, span).generate(rng);
        self.min + Duration::seconds(offset)
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min, &self.max])
    }
}

// ============================================================================
// Date Generator
// ============================================================================

/// Generator for calendar dates in an inclusive window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateGenerator {
    min: NaiveDate,
    max: NaiveDate,
}

impl DateGenerator {
    /// Create a date generator; missing bounds use the default window
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Result<Self, FuzzError> {
        let min = min.unwrap_or_else(|| default_min_date_time().date());
        let max = max.unwrap_or_else(|| default_max_date_time().date());
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
}

impl Default for DateGenerator {
    fn default() -> Self {
        Self {
            min: default_min_date_time().date(),
            max: default_max_date_time().date(),
        }
    }
}

impl Generator<NaiveDate> for DateGenerator {
    fn generate(&self, rng: &SharedRng) -> NaiveDate {
        let span = (self.max - self.min).num_days();
        let offset = LongGenerator::between(0, span).generate(rng);
        self.min + Duration::days(offset)
    }

    fn arguments_hash(&self) -> u64 {
        hash_arguments(&[&self.min, &self.max])
    }
}

impl Fuzzer {
    /// Date-time in `[min, max]`, defaulting to 1970-01-01 .. 2050-12-31
    pub fn generate_date_time(
        &mut self,
        min: Option<NaiveDateTime>,
        max: Option<NaiveDateTime>,
    ) -> Result<NaiveDateTime, FuzzError> {
        let generator = DateTimeGenerator::new(min, max)?;
        self.generate_from("generate_date_time", &generator)
    }

    /// Date-time anywhere within the years `min_year ..= max_year`
    pub fn generate_date_time_between_years(
        &mut self,
        min_year: i32,
        max_year: i32,
    ) -> Result<NaiveDateTime, FuzzError> {
        let generator = DateTimeGenerator::between_years(min_year, max_year)?;
        self.generate_from("generate_date_time_between_years", &generator)
    }

    /// Calendar date in `[min, max]`
    pub fn generate_date(
        &mut self,
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    ) -> Result<NaiveDate, FuzzError> {
        let generator = DateGenerator::new(min, max)?;
        self.generate_from("generate_date", &generator)
    }

    /// Year of a date-time drawn from the default window
    pub fn generate_year(&mut self) -> Result<i32, FuzzError> {
        self.generate_date_time(None, None).map(|date_time| date_time.year())
    }
}
