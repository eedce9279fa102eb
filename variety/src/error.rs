//! Error types raised by fuzzers.

use std::fmt;

use crate::config::ConfigError;

/// Everything a fuzzer operation can fail with
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzError {
    /// The no-duplication guard ran out of attempts
    Duplication(DuplicationFailure),

    /// A "pick one of" operation received no candidate collection at all
    NullCandidates { parameter: &'static str },

    /// A "pick one of" operation received an empty candidate collection
    EmptyCandidates { parameter: &'static str },

    /// A numeric, date or size range is malformed or outside its domain
    InvalidRange {
        parameter: &'static str,
        min: String,
        max: String,
        reason: String,
    },

    /// A string pattern had nothing to expand
    EmptyPattern,

    /// No log sink was registered before the first fuzzer was created
    LogSinkNotConfigured,

    /// The fuzzer configuration is invalid
    Config(ConfigError),
}

impl fmt::Display for FuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuzzError::Duplication(failure) => write!(f, "{}", failure),
            FuzzError::NullCandidates { parameter } => {
                write!(f, "Value cannot be null: no candidates were provided (parameter: {})", parameter)
            }
            FuzzError::EmptyCandidates { parameter } => {
                write!(f, "The candidates collection must not be empty (parameter: {})", parameter)
            }
            FuzzError::InvalidRange {
                parameter,
                min,
                max,
                reason,
            } => write!(
                f,
                "Invalid range for {}: min = {}, max = {} ({})",
                parameter, min, max, reason
            ),
            FuzzError::EmptyPattern => write!(f, "The pattern must contain at least one character"),
            FuzzError::LogSinkNotConfigured => write!(
                f,
                "No log sink registered. Every fuzzer announces its seed so a failing test can be \
                 replayed; register a sink once before creating fuzzers, e.g. \
                 `variety::register_log_sink(variety::TracingSink)` or \
                 `variety::register_log_sink(|message: &str| println!(\"{{}}\", message))`"
            ),
            FuzzError::Config(err) => write!(f, "Configuration error: {}", err),
        }
    }
}

impl std::error::Error for FuzzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FuzzError::Duplication(failure) => Some(failure),
            FuzzError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for FuzzError {
    fn from(err: ConfigError) -> Self {
        FuzzError::Config(err)
    }
}

impl From<DuplicationFailure> for FuzzError {
    fn from(failure: DuplicationFailure) -> Self {
        FuzzError::Duplication(failure)
    }
}

impl FuzzError {
    /// Create an invalid range error naming the parameter and both bounds
    pub fn invalid_range(
        parameter: &'static str,
        min: impl fmt::Display,
        max: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRange {
            parameter,
            min: min.to_string(),
            max: max.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error means a no-duplication pool ran dry
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FuzzError::Duplication(_))
    }
}

/// Raised once the attempt budget is spent without finding a fresh value
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicationFailure {
    /// Name of the requested type
    pub type_name: &'static str,
    /// Attempt budget that was exhausted
    pub max_attempts: usize,
    /// Already-provided values, sorted, rendered with `Debug`
    pub already_provided: Vec<String>,
}

impl fmt::Display for DuplicationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Couldn't find a non-already provided value of type {} after {} attempts. \
             Already provided values ({}): [{}].",
            self.type_name,
            self.max_attempts,
            self.already_provided.len(),
            self.already_provided.join(", ")
        )?;
        writeln!(f, "You can either:")?;
        writeln!(
            f,
            "- create a fresh duplicate-avoidance scope for a sub-group of values with \
             `fuzzer.no_duplication_fuzzer()`"
        )?;
        write!(
            f,
            "- raise the attempt budget with `fuzzer.set_max_failing_attempts(..)` (currently {})",
            self.max_attempts
        )
    }
}

impl std::error::Error for DuplicationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplication_failure_display() {
        let failure = DuplicationFailure {
            type_name: "i32",
            max_attempts: 10,
            already_provided: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        };
        let message = FuzzError::from(failure).to_string();

        assert!(message.contains("of type i32 after 10 attempts"));
        assert!(message.contains("[1, 2, 3]"));
        assert!(message.contains("no_duplication_fuzzer()"));
        assert!(message.contains("set_max_failing_attempts"));
    }

    #[test]
    fn test_candidate_errors_are_distinguished() {
        let null = FuzzError::NullCandidates {
            parameter: "candidates",
        };
        let empty = FuzzError::EmptyCandidates {
            parameter: "candidates",
        };

        assert_ne!(null, empty);
        assert!(null.to_string().contains("cannot be null"));
        assert!(empty.to_string().contains("must not be empty"));
        assert!(empty.to_string().contains("candidates"));
    }

    #[test]
    fn test_invalid_range_names_parameter_and_bounds() {
        let error = FuzzError::invalid_range("min_size", 2, 1, "min must be <= max");
        assert_eq!(
            error.to_string(),
            "Invalid range for min_size: min = 2, max = 1 (min must be <= max)"
        );
        assert!(!error.is_exhausted());
    }

    #[test]
    fn test_log_sink_error_explains_setup() {
        let message = FuzzError::LogSinkNotConfigured.to_string();
        assert!(message.contains("register_log_sink"));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: FuzzError = ConfigError::InvalidMaxFailingAttempts(0).into();
        assert!(matches!(error, FuzzError::Config(_)));
        assert!(std::error::Error::source(&error).is_some());
    }
}
