//! Cross-field date validation
//!
//! Checks each phase's dates against each other and reports rule
//! violations per field. Validation never blocks an edit; the report is
//! recomputed from scratch whenever the phase list changes.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::phase::{DateField, Phase, PhaseId};

/// A broken date rule, displayed as the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DateRuleViolation {
    /// End precedes start
    #[error("End date cannot be before the start date.")]
    EndBeforeStart,

    /// Milestone outside `[start, end]`
    #[error("Milestone must be between the start and end date.")]
    MilestoneOutsidePhase,

    /// Handover precedes the milestone
    #[error("Handover must be on or after the milestone date.")]
    HandoverBeforeMilestone,

    /// Handover precedes the end date (no milestone set)
    #[error("Handover must be on or after the end date.")]
    HandoverBeforeEnd,
}

impl DateRuleViolation {
    /// Field the violation is reported on
    #[inline]
    #[must_use]
    pub const fn field(self) -> DateField {
        match self {
            DateRuleViolation::EndBeforeStart => DateField::EndDate,
            DateRuleViolation::MilestoneOutsidePhase => DateField::MilestoneDate,
            DateRuleViolation::HandoverBeforeMilestone | DateRuleViolation::HandoverBeforeEnd => {
                DateField::SupportHandoverDate
            }
        }
    }
}

/// Field-level errors for a single phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseErrors {
    errors: BTreeMap<DateField, DateRuleViolation>,
}

impl PhaseErrors {
    /// No errors
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, violation: DateRuleViolation) {
        self.errors.insert(violation.field(), violation);
    }

    /// Violation on a field, if any
    #[inline]
    #[must_use]
    pub fn get(&self, field: DateField) -> Option<DateRuleViolation> {
        self.errors.get(&field).copied()
    }

    /// User-facing message for a field, if any
    #[must_use]
    pub fn message(&self, field: DateField) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    /// Whether a field carries an error
    #[inline]
    #[must_use]
    pub fn has(&self, field: DateField) -> bool {
        self.errors.contains_key(&field)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Violations in field order
    pub fn iter(&self) -> impl Iterator<Item = (DateField, DateRuleViolation)> + '_ {
        self.errors.iter().map(|(f, v)| (*f, *v))
    }
}

impl Serialize for PhaseErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, violation) in &self.errors {
            map.serialize_entry(field.as_str(), &violation.to_string())?;
        }
        map.end()
    }
}

/// Validation result: one entry per input phase, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: IndexMap<PhaseId, PhaseErrors>,
}

impl ValidationReport {
    /// Errors for a phase, `None` if the id was not in the input
    #[inline]
    #[must_use]
    pub fn get(&self, id: &PhaseId) -> Option<&PhaseErrors> {
        self.entries.get(id)
    }

    /// Message for one field of one phase
    #[must_use]
    pub fn message(&self, id: &PhaseId, field: DateField) -> Option<String> {
        self.get(id).and_then(|e| e.message(field))
    }

    /// Whether the id was part of the validated input
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &PhaseId) -> bool {
        self.entries.contains_key(id)
    }

    /// No phase has any error
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(PhaseErrors::is_empty)
    }

    /// Total number of field errors across all phases
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries.values().map(PhaseErrors::len).sum()
    }

    /// Number of phases covered
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in input order
    pub fn iter(&self) -> impl Iterator<Item = (&PhaseId, &PhaseErrors)> {
        self.entries.iter()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, errors) in &self.entries {
            map.serialize_entry(&id.to_string(), errors)?;
        }
        map.end()
    }
}

/// Validate every phase independently
///
/// The report has an entry for every phase in `phases` and no other ids.
/// Unset dates never trigger a rule that needs them.
pub fn validate<'a, I>(phases: I) -> ValidationReport
where
    I: IntoIterator<Item = &'a Phase>,
{
    let entries = phases
        .into_iter()
        .map(|phase| (phase.id, check_phase(phase)))
        .collect();
    ValidationReport { entries }
}

/// Apply the date rules to one phase
#[must_use]
pub fn check_phase(phase: &Phase) -> PhaseErrors {
    let mut errors = PhaseErrors::new();
    let start = phase.start_date;
    let end = phase.end_date;
    let milestone = phase.milestone_date;

    if let Some((start, end)) = start.zip(end) {
        if end < start {
            errors.record(DateRuleViolation::EndBeforeStart);
        }
        if let Some(milestone) = milestone {
            if milestone < start || milestone > end {
                errors.record(DateRuleViolation::MilestoneOutsidePhase);
            }
        }
    }

    if let Some(handover) = phase.support_handover_date {
        match (milestone, end) {
            (Some(milestone), _) if handover < milestone => {
                errors.record(DateRuleViolation::HandoverBeforeMilestone);
            }
            (None, Some(end)) if handover < end => {
                errors.record(DateRuleViolation::HandoverBeforeEnd);
            }
            _ => {}
        }
    }

    errors
}
