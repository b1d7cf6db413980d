//! Error types for Onboard Core
//!
//! Covers:
//! - Edits addressed to phases that are not in the form
//! - Plan and config file loading
//! - Textual input rejected by strict parsing

use std::path::PathBuf;

use onboard_plan::{PhaseId, PlanError};

/// Main onboarding error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// No phase with this id
    #[error("phase not found: {0}")]
    PhaseNotFound(PhaseId),

    /// A phase with this id is already in the form
    #[error("duplicate phase id: {0}")]
    DuplicatePhase(PhaseId),

    /// Textual plan input rejected
    #[error("plan input error: {0}")]
    Plan(#[from] PlanError),

    /// Reading a file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML decode failed
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encode failed
    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON decode or encode failed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Plan file extension not recognised
    #[error("unsupported plan format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// Configuration value rejected
    #[error("configuration error: {0}")]
    Config(String),
}

impl FormError {
    /// Wrap an I/O error with the path being read
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from the caller's input rather than the environment
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_not_found_display() {
        let id = PhaseId::new();
        let err = FormError::PhaseNotFound(id);
        assert_eq!(err.to_string(), format!("phase not found: {id}"));
    }

    #[test]
    fn io_error_names_path() {
        let err = FormError::io(
            "/missing/plan.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/missing/plan.toml"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn plan_error_converts() {
        let err: FormError = PlanError::UnknownDateField("x".into()).into();
        assert!(matches!(err, FormError::Plan(_)));
        assert!(err.is_input_error());
    }
}
