//! Error types for beam analysis

use thiserror::Error;

/// Main error type for analysis operations
///
/// Every variant is terminal for the current request; nothing is retried
/// internally. A failed remote catalog fetch is not an error at this level -
/// the catalog provider absorbs it by serving the embedded table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Section '{0}' not found in catalog")]
    SectionNotFound(String),

    #[error("Section '{designation}' has invalid catalog data: {field}")]
    DataIntegrity { designation: String, field: String },

    #[error("Calculation produced a non-finite {0}")]
    Calculation(String),

    #[error("No suitable section found for the applied loading")]
    NoSuitableSection,
}

impl AnalysisError {
    /// Shorthand for the most common validation failure
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for analysis operations
pub type CalcResult<T> = Result<T, AnalysisError>;
