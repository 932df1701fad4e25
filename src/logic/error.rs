//! Scoring Errors
//!
//! Fatal error taxonomy for the scoring pipeline. Attribution inconsistencies
//! are warnings, not errors, and live in `explain::types`.

use serde::Serialize;

pub type ScoringResult<T> = Result<T, ScoringError>;

#[derive(Debug)]
pub enum ScoringError {
    /// Feature key set/order drifted from the locked layout
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// Model artifact could not be loaded (fatal at startup)
    ModelUnavailable(String),
    /// Raw input outside the documented boundary range
    InputOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Classifier returned something that is not a probability
    InvalidModelOutput(String),
    /// Explainer output could not be normalized
    InvalidExplanation(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl ScoringError {
    /// Stable machine-readable kind, used by the host's error lines
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::SchemaMismatch { .. } => "schema_mismatch",
            ScoringError::ModelUnavailable(_) => "model_unavailable",
            ScoringError::InputOutOfRange { .. } => "input_out_of_range",
            ScoringError::InvalidModelOutput(_) => "invalid_model_output",
            ScoringError::InvalidExplanation(_) => "invalid_explanation",
            ScoringError::IoError(_) => "io",
            ScoringError::SerializationError(_) => "serialization",
        }
    }

    /// Errors that must stop the process rather than a single request
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScoringError::ModelUnavailable(_))
    }
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::SchemaMismatch { expected, actual } => write!(
                f,
                "Feature schema mismatch: expected [{}], got [{}]",
                expected.join(", "),
                actual.join(", ")
            ),
            ScoringError::ModelUnavailable(msg) => write!(f, "Model unavailable: {}", msg),
            ScoringError::InputOutOfRange { field, value, min, max } => write!(
                f,
                "Input '{}' = {} is outside [{}, {}]",
                field, value, min, max
            ),
            ScoringError::InvalidModelOutput(msg) => write!(f, "Invalid model output: {}", msg),
            ScoringError::InvalidExplanation(msg) => write!(f, "Invalid explanation: {}", msg),
            ScoringError::IoError(e) => write!(f, "IO Error: {}", e),
            ScoringError::SerializationError(e) => write!(f, "Serialization Error: {}", e),
        }
    }
}

impl std::error::Error for ScoringError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoringError::IoError(e) => Some(e),
            ScoringError::SerializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScoringError {
    fn from(err: std::io::Error) -> Self {
        ScoringError::IoError(err)
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::SerializationError(err)
    }
}

/// JSON shape of an error reported on the output boundary
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: &'static str,
    pub message: String,
}

impl From<&ScoringError> for ErrorReport {
    fn from(err: &ScoringError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_model_unavailable_is_fatal() {
        assert!(ScoringError::ModelUnavailable("missing".into()).is_fatal());
        assert!(!ScoringError::InvalidModelOutput("nan".into()).is_fatal());
        assert!(!ScoringError::SchemaMismatch { expected: vec![], actual: vec![] }.is_fatal());
    }

    #[test]
    fn test_error_report_carries_kind() {
        let err = ScoringError::InputOutOfRange { field: "likes", value: 600.0, min: 0.0, max: 500.0 };
        let report = ErrorReport::from(&err);
        assert_eq!(report.error, "input_out_of_range");
        assert!(report.message.contains("likes"));
    }
}
