//! Error types for schema exploration

use thiserror::Error;

/// Errors that can occur while analyzing a set of documents
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplorerError {
    /// No documents to sample the schema from
    #[error("No documents provided for analysis")]
    EmptyInput,

    /// A date-wrapper value could not be parsed as an ISO-8601 instant
    #[error("Invalid date value '{value}': {reason}")]
    DateParse { value: String, reason: String },

    /// Numeric aggregation requested over zero conforming values
    #[error("Cannot aggregate an empty group of {kind} values")]
    EmptyGroup { kind: String },

    /// The sampled value of a field has a kind the explorer does not handle
    #[error("Unsupported value kind '{kind}' for field '{field}'")]
    UnsupportedKind { field: String, kind: String },

    /// An error raised while collating a specific field
    #[error("Field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<ExplorerError>,
    },
}

impl ExplorerError {
    /// Attach the path of the field being processed
    pub fn in_field(self, field: impl Into<String>) -> Self {
        ExplorerError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with all field context layers removed
    pub fn root_cause(&self) -> &ExplorerError {
        match self {
            ExplorerError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result alias used throughout the explorer
pub type Result<T> = std::result::Result<T, ExplorerError>;
