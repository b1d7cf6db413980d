//! Onboarding configuration
//!
//! Defaults mirror the stock form: a project placeholder, a first phase
//! called "Phase 1 - Discovery", US-style timeline labels and a Markdown
//! summary named `project-summary.md`. Every section is optional in TOML.

use std::path::Path;

use onboard_plan::LayoutOptions;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardConfig {
    /// Initial project metadata
    pub project: ProjectDefaults,
    /// Phase naming
    pub phases: PhaseNaming,
    /// Timeline presentation
    pub layout: LayoutOptions,
    /// Export bundle naming
    pub export: ExportSettings,
}

impl OnboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With project name placeholder
    #[inline]
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project.name = name.into();
        self
    }

    /// With timeline label format
    #[inline]
    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.layout.label_format = format.into();
        self
    }

    /// With first phase name
    #[inline]
    #[must_use]
    pub fn with_first_phase_name(mut self, name: impl Into<String>) -> Self {
        self.phases.first_phase_name = name.into();
        self
    }

    /// Parse from TOML text and validate
    ///
    /// # Errors
    /// Returns error if TOML is invalid or a value is rejected
    pub fn from_toml_str(text: &str) -> Result<Self, FormError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FormError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check values that would otherwise surface as odd output later
    ///
    /// # Errors
    /// Returns [`FormError::Config`] naming the offending key
    pub fn validate(&self) -> Result<(), FormError> {
        if self.layout.label_format.trim().is_empty() {
            return Err(FormError::Config("layout.label_format must not be empty".into()));
        }
        if self.phases.name_prefix.trim().is_empty() {
            return Err(FormError::Config("phases.name_prefix must not be empty".into()));
        }
        if self.export.summary_file_name.trim().is_empty()
            || self.export.summary_file_name.contains(['/', '\\'])
        {
            return Err(FormError::Config(
                "export.summary_file_name must be a plain file name".into(),
            ));
        }
        Ok(())
    }
}

/// Placeholder project metadata for a fresh form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub name: String,
    pub scope: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: "My Awesome Project".to_string(),
            scope: "This project aims to deliver an innovative solution by leveraging \
                    cutting-edge technologies to solve a critical business problem."
                .to_string(),
        }
    }
}

/// Default names for new phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseNaming {
    /// Name of the phase a fresh form starts with
    pub first_phase_name: String,
    /// Prefix for added phases, followed by the 1-based position
    pub name_prefix: String,
}

impl PhaseNaming {
    /// Default name for a phase added at 1-based `position`
    #[must_use]
    pub fn nth(&self, position: usize) -> String {
        format!("{} {}", self.name_prefix, position)
    }
}

impl Default for PhaseNaming {
    fn default() -> Self {
        Self {
            first_phase_name: "Phase 1 - Discovery".to_string(),
            name_prefix: "Phase".to_string(),
        }
    }
}

/// Export bundle naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Summary document name inside the bundle
    pub summary_file_name: String,
    /// Appended to the sanitized project name to form the archive name
    pub archive_suffix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            summary_file_name: "project-summary.md".to_string(),
            archive_suffix: "-onboarding.zip".to_string(),
        }
    }
}
