//! Configuration for fuzzer construction and library-wide generation limits.

/// Attempts the no-duplication guard makes before giving up
pub const DEFAULT_MAX_FAILING_ATTEMPTS: usize = 100_000;

/// Nesting depth of an object graph past which values are degraded
pub const MAX_RECURSION_LEVEL: usize = 400;

/// Times a type may appear nested inside itself on one branch of an object graph
pub const MAX_SELF_NESTING: usize = 2;

/// Number of elements generated for every collection-typed member
pub const COLLECTION_SIZE: usize = 5;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid attempt budget (must be > 0)
    InvalidMaxFailingAttempts(usize),
    /// Invalid fuzzer name (must not be blank when provided)
    BlankName,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidMaxFailingAttempts(n) => {
                write!(f, "Invalid max failing attempts: {} (must be > 0)", n)
            }
            ConfigError::BlankName => {
                write!(f, "Invalid fuzzer name (must not be blank)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings a [`Fuzzer`](crate::Fuzzer) is built from
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzerConfig {
    /// Seed of the PRNG stream; drawn from entropy when `None`
    pub seed: Option<i32>,
    /// Informational name; defaults to the current thread (test) name
    pub name: Option<String>,
    /// Route every generator through the no-duplication guard
    pub avoid_duplicates: bool,
    /// Attempt budget of the no-duplication guard
    pub max_failing_attempts: usize,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            name: None,
            avoid_duplicates: false,
            max_failing_attempts: DEFAULT_MAX_FAILING_ATTEMPTS,
        }
    }
}

impl FuzzerConfig {
    /// Create a configuration with validation
    pub fn new(
        seed: Option<i32>,
        name: Option<String>,
        avoid_duplicates: bool,
        max_failing_attempts: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            seed,
            name,
            avoid_duplicates,
            max_failing_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_failing_attempts == 0 {
            return Err(ConfigError::InvalidMaxFailingAttempts(
                self.max_failing_attempts,
            ));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::BlankName);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = FuzzerConfig::default();
        assert!(config.seed.is_none());
        assert!(config.name.is_none());
        assert!(!config.avoid_duplicates);
        assert_eq!(config.max_failing_attempts, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            FuzzerConfig::new(Some(1), None, true, 0),
            Err(ConfigError::InvalidMaxFailingAttempts(0))
        );
        assert_eq!(
            FuzzerConfig::new(None, Some("   ".to_string()), false, 10),
            Err(ConfigError::BlankName)
        );

        let config = FuzzerConfig::new(Some(3), Some("orders".to_string()), true, 10).unwrap();
        assert_eq!(config.seed, Some(3));
        assert!(config.avoid_duplicates);
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidMaxFailingAttempts(0).to_string(),
            "Invalid max failing attempts: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::BlankName.to_string(),
            "Invalid fuzzer name (must not be blank)"
        );
    }
}
