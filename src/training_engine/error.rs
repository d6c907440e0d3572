//! Error types for drill configuration.
//!
//! Generation itself never fails: running out of legal moves is reported as
//! `None` (incremental) or a shorter sequence (batch).

use thiserror::Error;

/// Result type alias for configuration-checked operations.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Caller misconfiguration. Not retryable; fix the input and call again.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Digit count must be between 1 and 4.
    #[error("digit count {0} out of range (must be 1..=4)")]
    DigitCountOutOfRange(u8),

    /// At least one formula category is required.
    #[error("allowed formula set is empty")]
    EmptyFormulaSet,

    /// Carry probability must be a valid probability.
    #[error("carry probability {0} outside 0.0..=1.0")]
    CarryProbabilityOutOfRange(f64),

    /// A formula category name that is not one of the canonical names.
    #[error("unknown formula category: {0:?}")]
    UnknownFormula(String),

    /// A legacy formula name missing from the compatibility table.
    #[error("unknown legacy formula name: {0:?}")]
    UnknownLegacyFormula(String),

    /// Config JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
