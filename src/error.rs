//! Error types for wellness-cluster operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wellness-cluster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading assets, running inference or
/// rendering a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A model artifact or reference table could not be read or parsed.
    #[error("Artifact load failed: {path}: {reason}")]
    Artifact {
        /// Path to the artifact that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The category table has no column for a survey question.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn {
        /// Path to the table.
        path: PathBuf,
        /// Column that was expected.
        column: String,
    },

    /// A survey question has no permissible answers.
    #[error("Question '{question}' has an empty answer domain")]
    EmptyDomain {
        /// Question identifier.
        question: String,
    },

    /// Assets are individually valid but inconsistent with each other.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A question identifier is not part of the survey.
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// A selected value is outside the question's domain.
    #[error("Value '{value}' is not a valid answer for '{question}'")]
    InvalidAnswer {
        /// Question identifier.
        question: String,
        /// Rejected value.
        value: String,
    },

    /// The response row has no value for a question the encoder was fitted on.
    #[error("Missing answer for '{question}'")]
    MissingAnswer {
        /// Question identifier.
        question: String,
    },

    /// The response row contains a category the encoder never saw at fit time.
    #[error("Unseen category '{value}' for '{question}'")]
    UnseenCategory {
        /// Question identifier.
        question: String,
        /// Category value.
        value: String,
    },

    /// The response row contains a column the encoder was not fitted on.
    #[error("Unexpected column '{0}' in response row")]
    UnexpectedColumn(String),

    /// Vector length does not match what a pipeline stage was fitted with.
    #[error("Dimension mismatch in {stage}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Pipeline stage that rejected the vector.
        stage: &'static str,
        /// Fitted dimensionality.
        expected: usize,
        /// Dimensionality received.
        actual: usize,
    },

    /// A cluster id has no entry in the interpretation map.
    #[error("No interpretation configured for cluster {0}")]
    UnknownCluster(usize),

    /// Report rendering failed.
    #[error("Report error: {0}")]
    Render(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error comes from the deployed assets rather than the
    /// submitted answers.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Artifact { .. }
                | Self::MissingColumn { .. }
                | Self::EmptyDomain { .. }
                | Self::Config(_)
                | Self::UnknownCluster(_)
        )
    }
}
