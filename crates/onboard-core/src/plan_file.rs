//! Plan files
//!
//! A plan file is the form's content on disk, as TOML or JSON:
//!
//! ```toml
//! [project]
//! name = "Search Platform"
//! scope = "Migrate logging to Elastic"
//!
//! [[phases]]
//! name = "Discovery"
//! start_date = "2024-01-01"
//! end_date = "2024-01-31"
//! milestone_date = ""
//!
//! [phases.design_plan]
//! notes = "Architecture review"
//! attachment = "docs/design.pdf"
//! ```
//!
//! Dates may be empty. Phase ids are not stored; they are assigned on load.
//! Relative attachment paths resolve against the plan file's directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use onboard_plan::{ArtefactChecklist, Attachment, DocumentSlot, Phase, PhaseId};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::OnboardConfig;
use crate::error::FormError;
use crate::form::{FormSnapshot, OnboardingForm};

/// Supported on-disk encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Json,
}

impl PlanFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// Returns [`FormError::UnsupportedFormat`] for anything but `.toml`/`.json`
    pub fn from_path(path: &Path) -> Result<Self, FormError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(FormError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Project section of a plan file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub scope: Option<String>,
}

/// One document category as stored in a plan file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecord {
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<PathBuf>,
    pub not_available: bool,
}

impl DocumentRecord {
    fn into_slot(self, base_dir: Option<&Path>) -> DocumentSlot {
        // A blank path or one without a file name is no attachment.
        let attachment = self
            .attachment
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| !name.to_string_lossy().trim().is_empty())
            })
            .map(|path| {
                let source = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(&path),
                    _ => path.clone(),
                };
                let mut attachment = Attachment::from_path(&path);
                attachment.source = source;
                attachment
            });
        DocumentSlot {
            notes: self.notes,
            attachment,
            not_available: self.not_available,
        }
    }

    fn from_slot(slot: &DocumentSlot) -> Self {
        Self {
            notes: slot.notes.clone(),
            attachment: slot.attachment.as_ref().map(|a| a.source.clone()),
            not_available: slot.not_available,
        }
    }
}

/// One phase as stored in a plan file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseRecord {
    pub name: String,
    #[serde(with = "onboard_plan::date::lenient")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(with = "onboard_plan::date::lenient")]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(with = "onboard_plan::date::lenient")]
    pub milestone_date: Option<chrono::NaiveDate>,
    #[serde(with = "onboard_plan::date::lenient")]
    pub support_handover_date: Option<chrono::NaiveDate>,
    pub design_plan: DocumentRecord,
    pub test_plan: DocumentRecord,
    pub artefacts: DocumentRecord,
    pub artefact_checklist: ArtefactChecklist,
}

impl PhaseRecord {
    fn into_phase(self, base_dir: Option<&Path>) -> Phase {
        Phase {
            id: PhaseId::new(),
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            milestone_date: self.milestone_date,
            support_handover_date: self.support_handover_date,
            design_plan: self.design_plan.into_slot(base_dir),
            test_plan: self.test_plan.into_slot(base_dir),
            artefacts: self.artefacts.into_slot(base_dir),
            artefact_checklist: self.artefact_checklist,
        }
    }

    fn from_phase(phase: &Phase) -> Self {
        Self {
            name: phase.name.clone(),
            start_date: phase.start_date,
            end_date: phase.end_date,
            milestone_date: phase.milestone_date,
            support_handover_date: phase.support_handover_date,
            design_plan: DocumentRecord::from_slot(&phase.design_plan),
            test_plan: DocumentRecord::from_slot(&phase.test_plan),
            artefacts: DocumentRecord::from_slot(&phase.artefacts),
            artefact_checklist: phase.artefact_checklist.clone(),
        }
    }
}

/// Plan file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDocument {
    pub project: ProjectSection,
    pub phases: Vec<PhaseRecord>,
}

impl PlanDocument {
    /// Parse TOML plan text
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml_str(text: &str) -> Result<Self, FormError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse JSON plan text
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    pub fn from_json_str(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode in the given format
    ///
    /// # Errors
    /// Returns error if encoding fails
    pub fn encode(&self, format: PlanFormat) -> Result<String, FormError> {
        match format {
            PlanFormat::Toml => Ok(toml::to_string_pretty(self)?),
            PlanFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Capture a form snapshot as plan content
    #[must_use]
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        Self {
            project: ProjectSection {
                name: Some(snapshot.project_name.clone()),
                scope: Some(snapshot.project_scope.clone()),
            },
            phases: snapshot.phases.iter().map(PhaseRecord::from_phase).collect(),
        }
    }

    /// Build a form, filling missing metadata from configuration
    ///
    /// `base_dir` anchors relative attachment paths.
    ///
    /// # Errors
    /// Propagates form construction errors
    pub fn into_form(
        self,
        config: OnboardConfig,
        clock: Arc<dyn Clock>,
        base_dir: Option<&Path>,
    ) -> Result<OnboardingForm, FormError> {
        let name = self.project.name.unwrap_or_else(|| config.project.name.clone());
        let scope = self.project.scope.unwrap_or_else(|| config.project.scope.clone());
        let phases: Vec<Phase> = self
            .phases
            .into_iter()
            .map(|record| record.into_phase(base_dir))
            .collect();
        OnboardingForm::from_phases(config, clock, name, scope, phases)
    }
}

/// Read and parse a plan file, choosing the format by extension
///
/// # Errors
/// Returns error if the file cannot be read, has an unknown extension or
/// does not parse
pub fn read_plan(path: impl AsRef<Path>) -> Result<PlanDocument, FormError> {
    let path = path.as_ref();
    let format = PlanFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| FormError::io(path, e))?;
    let document = match format {
        PlanFormat::Toml => PlanDocument::from_toml_str(&text)?,
        PlanFormat::Json => PlanDocument::from_json_str(&text)?,
    };
    tracing::info!(
        "Loaded plan {} with {} phases",
        path.display(),
        document.phases.len()
    );
    Ok(document)
}

/// Read a plan file straight into a form
///
/// # Errors
/// See [`read_plan`] and [`PlanDocument::into_form`]
pub fn load_form(
    path: impl AsRef<Path>,
    config: OnboardConfig,
    clock: Arc<dyn Clock>,
) -> Result<OnboardingForm, FormError> {
    let path = path.as_ref();
    let document = read_plan(path)?;
    document.into_form(config, clock, path.parent())
}
