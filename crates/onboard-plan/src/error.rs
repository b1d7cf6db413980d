//! Error types for plan records
//!
//! The validator and layout engine are total and never return these.
//! They cover strict parsing of textual input, where the caller wants to
//! know why a value was rejected instead of silently treating it as unset.

/// Errors raised while interpreting textual plan input
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Date text is not a valid `YYYY-MM-DD` calendar date
    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        /// Raw input as supplied
        input: String,
        /// Underlying chrono parse error
        #[source]
        source: chrono::ParseError,
    },

    /// Field name does not name a date field
    #[error("unknown date field: {0}")]
    UnknownDateField(String),

    /// Flag name does not name an artefact checklist entry
    #[error("unknown artefact flag: {0}")]
    UnknownArtefactFlag(String),
}
