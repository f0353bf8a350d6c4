use thiserror::Error;

/// Main error type for the tier calculator
#[derive(Error, Debug)]
pub enum TierCalcError {
    /// Tier identifier does not match `db-custom-<cpus>-<ram_mb>`
    #[error("Invalid tier format: '{0}'. Use: db-custom-<cpus>-<ram_mb>")]
    InvalidTier(String),

    /// Tier identifier matched but a number could not be represented
    #[error("Invalid tier numbers: '{0}'")]
    InvalidTierNumbers(String),

    /// Memory quantity was empty
    #[error("Invalid memory format: empty memory string")]
    EmptyMemory,

    /// Memory quantity is not a number followed by an optional unit
    #[error("Invalid memory format: '{0}'")]
    InvalidMemory(String),

    /// Memory unit suffix is not one of G, g, M, m
    #[error("Invalid memory unit: '{0}'")]
    InvalidUnit(String),

    /// Invalid input/arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Log file error
    #[error("File error: {0}")]
    FileError(String),
}

impl TierCalcError {
    /// Whether the error came from malformed user input rather than the environment
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TierCalcError::InvalidTier(_)
                | TierCalcError::InvalidTierNumbers(_)
                | TierCalcError::EmptyMemory
                | TierCalcError::InvalidMemory(_)
                | TierCalcError::InvalidUnit(_)
        )
    }
}

/// Helper type alias for Results
pub type Result<T> = std::result::Result<T, TierCalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_are_classified() {
        assert!(TierCalcError::InvalidTier("x".into()).is_parse_error());
        assert!(TierCalcError::EmptyMemory.is_parse_error());
        assert!(TierCalcError::InvalidUnit("T".into()).is_parse_error());
        assert!(!TierCalcError::InvalidInput("x".into()).is_parse_error());
        assert!(!TierCalcError::from(ConfigError::InvalidValue("x".into())).is_parse_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            TierCalcError::InvalidTier("db-4-15360".into()).to_string(),
            "Invalid tier format: 'db-4-15360'. Use: db-custom-<cpus>-<ram_mb>"
        );
        assert_eq!(
            TierCalcError::InvalidUnit("T".into()).to_string(),
            "Invalid memory unit: 'T'"
        );
    }
}
