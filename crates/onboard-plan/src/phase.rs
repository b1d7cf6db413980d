//! Phase records
//!
//! A [`Phase`] is a plain value. Edits never mutate a phase in place:
//! [`Phase::with_update`] returns a new value with one field replaced,
//! driven by the closed [`PhaseUpdate`] enum.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::PlanError;

/// Unique phase identifier (ULID, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseId(pub Ulid);

impl PhaseId {
    /// Generate new phase ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PhaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four dated fields of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    /// Phase start
    StartDate,
    /// Phase end
    EndDate,
    /// Optional milestone inside the phase
    MilestoneDate,
    /// Optional support handover
    SupportHandoverDate,
}

impl DateField {
    /// All date fields in form order
    pub const ALL: [DateField; 4] = [
        DateField::StartDate,
        DateField::EndDate,
        DateField::MilestoneDate,
        DateField::SupportHandoverDate,
    ];

    /// Field key as exposed to the UI layer
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DateField::StartDate => "startDate",
            DateField::EndDate => "endDate",
            DateField::MilestoneDate => "milestoneDate",
            DateField::SupportHandoverDate => "supportHandoverDate",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DateField::StartDate => "Start",
            DateField::EndDate => "End",
            DateField::MilestoneDate => "Milestone",
            DateField::SupportHandoverDate => "Support handover",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateField {
    type Err = PlanError;

    /// Accepts both `camelCase` keys and `snake_case` plan-file names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "startDate" | "start_date" | "start" => Ok(DateField::StartDate),
            "endDate" | "end_date" | "end" => Ok(DateField::EndDate),
            "milestoneDate" | "milestone_date" | "milestone" => Ok(DateField::MilestoneDate),
            "supportHandoverDate" | "support_handover_date" | "handover" => {
                Ok(DateField::SupportHandoverDate)
            }
            other => Err(PlanError::UnknownDateField(other.to_string())),
        }
    }
}

/// Document categories attached to each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Design plan
    DesignPlan,
    /// Test plan
    TestPlan,
    /// Elastic artefacts notes and export
    Artefacts,
}

impl DocumentKind {
    /// All categories in form order
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::DesignPlan,
        DocumentKind::TestPlan,
        DocumentKind::Artefacts,
    ];

    /// Human-readable title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            DocumentKind::DesignPlan => "Design Plan",
            DocumentKind::TestPlan => "Test Plan",
            DocumentKind::Artefacts => "Elastic Artefacts",
        }
    }

    /// Path-safe slug
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            DocumentKind::DesignPlan => "design-plan",
            DocumentKind::TestPlan => "test-plan",
            DocumentKind::Artefacts => "elastic-artefacts",
        }
    }
}

/// An uploaded file, referenced by name and source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name shown to the user and used inside the export
    pub file_name: String,
    /// Where the file's bytes live
    pub source: PathBuf,
}

impl Attachment {
    /// Create attachment from an explicit name and source
    #[inline]
    #[must_use]
    pub fn new(file_name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Create attachment named after the last path component
    #[must_use]
    pub fn from_path(source: impl AsRef<Path>) -> Self {
        let source = source.as_ref();
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            source: source.to_path_buf(),
        }
    }
}

/// Notes, optional attachment and not-available flag for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSlot {
    /// Free-text notes
    pub notes: String,
    /// Uploaded file, if any
    pub attachment: Option<Attachment>,
    /// Marked as not available for this phase
    pub not_available: bool,
}

impl DocumentSlot {
    /// Whether anything was supplied for this category
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.notes.trim().is_empty() && self.attachment.is_none() && !self.not_available
    }
}

/// Edits applicable to a [`DocumentSlot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentUpdate {
    /// Replace notes text
    Notes(String),
    /// Attach or replace the uploaded file
    Attach(Attachment),
    /// Remove the uploaded file
    Detach,
    /// Set the not-available flag
    NotAvailable(bool),
}

/// Checklist entries for elastic artefacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtefactFlag {
    /// Agent monitoring
    AgentMonitoring,
    /// Index templates
    IndexTemplates,
    /// Index lifecycle management
    Ilm,
    /// Watchers
    Watchers,
    /// Transforms
    Transforms,
    /// Ingest pipelines
    IngestPipelines,
    /// Logstash pipelines
    LogstashPipelines,
    /// Python scripting
    PythonScripting,
    /// AI / ML
    AiMl,
    /// Others (see free text)
    Others,
}

impl ArtefactFlag {
    /// All flags in form order
    pub const ALL: [ArtefactFlag; 10] = [
        ArtefactFlag::AgentMonitoring,
        ArtefactFlag::IndexTemplates,
        ArtefactFlag::Ilm,
        ArtefactFlag::Watchers,
        ArtefactFlag::Transforms,
        ArtefactFlag::IngestPipelines,
        ArtefactFlag::LogstashPipelines,
        ArtefactFlag::PythonScripting,
        ArtefactFlag::AiMl,
        ArtefactFlag::Others,
    ];

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ArtefactFlag::AgentMonitoring => "Agent Monitoring",
            ArtefactFlag::IndexTemplates => "Index Templates",
            ArtefactFlag::Ilm => "ILM",
            ArtefactFlag::Watchers => "Watchers",
            ArtefactFlag::Transforms => "Transforms",
            ArtefactFlag::IngestPipelines => "Ingest Pipelines",
            ArtefactFlag::LogstashPipelines => "Logstash Pipelines",
            ArtefactFlag::PythonScripting => "Python Scripting",
            ArtefactFlag::AiMl => "AI/ML",
            ArtefactFlag::Others => "Others",
        }
    }
}

impl FromStr for ArtefactFlag {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "agent_monitoring" => Ok(ArtefactFlag::AgentMonitoring),
            "index_templates" => Ok(ArtefactFlag::IndexTemplates),
            "ilm" => Ok(ArtefactFlag::Ilm),
            "watchers" => Ok(ArtefactFlag::Watchers),
            "transforms" => Ok(ArtefactFlag::Transforms),
            "ingest_pipelines" => Ok(ArtefactFlag::IngestPipelines),
            "logstash_pipelines" => Ok(ArtefactFlag::LogstashPipelines),
            "python_scripting" => Ok(ArtefactFlag::PythonScripting),
            "ai_ml" | "ai/ml" => Ok(ArtefactFlag::AiMl),
            "others" => Ok(ArtefactFlag::Others),
            _ => Err(PlanError::UnknownArtefactFlag(s.to_string())),
        }
    }
}

/// Elastic artefact checklist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ArtefactChecklist {
    pub agent_monitoring: bool,
    pub index_templates: bool,
    pub ilm: bool,
    pub watchers: bool,
    pub transforms: bool,
    pub ingest_pipelines: bool,
    pub logstash_pipelines: bool,
    pub python_scripting: bool,
    pub ai_ml: bool,
    pub others: bool,
    /// Free text describing "others"
    pub others_text: String,
}

impl ArtefactChecklist {
    /// Whether a flag is ticked
    #[must_use]
    pub fn is_set(&self, flag: ArtefactFlag) -> bool {
        match flag {
            ArtefactFlag::AgentMonitoring => self.agent_monitoring,
            ArtefactFlag::IndexTemplates => self.index_templates,
            ArtefactFlag::Ilm => self.ilm,
            ArtefactFlag::Watchers => self.watchers,
            ArtefactFlag::Transforms => self.transforms,
            ArtefactFlag::IngestPipelines => self.ingest_pipelines,
            ArtefactFlag::LogstashPipelines => self.logstash_pipelines,
            ArtefactFlag::PythonScripting => self.python_scripting,
            ArtefactFlag::AiMl => self.ai_ml,
            ArtefactFlag::Others => self.others,
        }
    }

    /// Copy with one flag replaced
    #[must_use]
    pub fn with_flag(&self, flag: ArtefactFlag, value: bool) -> Self {
        let mut next = self.clone();
        let slot = match flag {
            ArtefactFlag::AgentMonitoring => &mut next.agent_monitoring,
            ArtefactFlag::IndexTemplates => &mut next.index_templates,
            ArtefactFlag::Ilm => &mut next.ilm,
            ArtefactFlag::Watchers => &mut next.watchers,
            ArtefactFlag::Transforms => &mut next.transforms,
            ArtefactFlag::IngestPipelines => &mut next.ingest_pipelines,
            ArtefactFlag::LogstashPipelines => &mut next.logstash_pipelines,
            ArtefactFlag::PythonScripting => &mut next.python_scripting,
            ArtefactFlag::AiMl => &mut next.ai_ml,
            ArtefactFlag::Others => &mut next.others,
        };
        *slot = value;
        next
    }

    /// Ticked flags in form order
    pub fn checked(&self) -> impl Iterator<Item = ArtefactFlag> + '_ {
        ArtefactFlag::ALL.into_iter().filter(|f| self.is_set(*f))
    }
}

/// One project phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Stable identity
    pub id: PhaseId,
    /// Display label
    pub name: String,
    #[serde(default, with = "crate::date::lenient")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "crate::date::lenient")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "crate::date::lenient")]
    pub milestone_date: Option<NaiveDate>,
    #[serde(default, with = "crate::date::lenient")]
    pub support_handover_date: Option<NaiveDate>,
    #[serde(default)]
    pub design_plan: DocumentSlot,
    #[serde(default)]
    pub test_plan: DocumentSlot,
    #[serde(default)]
    pub artefacts: DocumentSlot,
    #[serde(default)]
    pub artefact_checklist: ArtefactChecklist,
}

impl Phase {
    /// Create a phase starting today with every other field empty
    #[must_use]
    pub fn new(name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id: PhaseId::new(),
            name: name.into(),
            start_date: Some(today),
            end_date: None,
            milestone_date: None,
            support_handover_date: None,
            design_plan: DocumentSlot::default(),
            test_plan: DocumentSlot::default(),
            artefacts: DocumentSlot::default(),
            artefact_checklist: ArtefactChecklist::default(),
        }
    }

    /// Create an undated phase
    #[must_use]
    pub fn unscheduled(name: impl Into<String>) -> Self {
        Self {
            start_date: None,
            ..Self::new(name, NaiveDate::MIN)
        }
    }

    /// With start and end dates
    #[inline]
    #[must_use]
    pub fn with_span(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// With milestone date
    #[inline]
    #[must_use]
    pub fn with_milestone(mut self, milestone: Option<NaiveDate>) -> Self {
        self.milestone_date = milestone;
        self
    }

    /// With support handover date
    #[inline]
    #[must_use]
    pub fn with_handover(mut self, handover: Option<NaiveDate>) -> Self {
        self.support_handover_date = handover;
        self
    }

    /// Read a date field
    #[inline]
    #[must_use]
    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::StartDate => self.start_date,
            DateField::EndDate => self.end_date,
            DateField::MilestoneDate => self.milestone_date,
            DateField::SupportHandoverDate => self.support_handover_date,
        }
    }

    /// Document slot for a category
    #[inline]
    #[must_use]
    pub fn document(&self, kind: DocumentKind) -> &DocumentSlot {
        match kind {
            DocumentKind::DesignPlan => &self.design_plan,
            DocumentKind::TestPlan => &self.test_plan,
            DocumentKind::Artefacts => &self.artefacts,
        }
    }

    /// Both start and end are set, so the phase can be drawn
    #[inline]
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }

    /// Return a new phase with one field replaced
    ///
    /// The identifier never changes.
    #[must_use]
    pub fn with_update(&self, update: PhaseUpdate) -> Self {
        let mut next = self.clone();
        match update {
            PhaseUpdate::Name(name) => next.name = name,
            PhaseUpdate::Date(field, value) => match field {
                DateField::StartDate => next.start_date = value,
                DateField::EndDate => next.end_date = value,
                DateField::MilestoneDate => next.milestone_date = value,
                DateField::SupportHandoverDate => next.support_handover_date = value,
            },
            PhaseUpdate::Document(kind, doc) => {
                let slot = match kind {
                    DocumentKind::DesignPlan => &mut next.design_plan,
                    DocumentKind::TestPlan => &mut next.test_plan,
                    DocumentKind::Artefacts => &mut next.artefacts,
                };
                match doc {
                    DocumentUpdate::Notes(notes) => slot.notes = notes,
                    DocumentUpdate::Attach(attachment) => slot.attachment = Some(attachment),
                    DocumentUpdate::Detach => slot.attachment = None,
                    DocumentUpdate::NotAvailable(flag) => slot.not_available = flag,
                }
            }
            PhaseUpdate::Checklist(flag, value) => {
                next.artefact_checklist = next.artefact_checklist.with_flag(flag, value);
            }
            PhaseUpdate::ChecklistOthersText(text) => next.artefact_checklist.others_text = text,
        }
        next
    }
}

/// Closed set of edits for a phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseUpdate {
    /// Rename
    Name(String),
    /// Set or clear a date
    Date(DateField, Option<NaiveDate>),
    /// Edit a document slot
    Document(DocumentKind, DocumentUpdate),
    /// Tick or untick a checklist entry
    Checklist(ArtefactFlag, bool),
    /// Replace the checklist "others" text
    ChecklistOthersText(String),
}

impl PhaseUpdate {
    /// Date update from raw form input, empty or malformed text clears it
    #[must_use]
    pub fn date_input(field: DateField, input: &str) -> Self {
        PhaseUpdate::Date(field, crate::date::parse_date_input(input))
    }
}
