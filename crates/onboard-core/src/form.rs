//! Onboarding form state
//!
//! [`OnboardingForm`] owns the project metadata and the ordered phase list.
//! Every mutator replaces values rather than editing them in place, then
//! recomputes the validation report and timeline layout before returning,
//! so reads always see derived state that matches the phases.

use std::sync::Arc;

use im::Vector;
use onboard_plan::{
    layout, validate, Phase, PhaseId, PhaseUpdate, TimelineLayout, ValidationReport,
};

use crate::clock::{Clock, SystemClock};
use crate::config::OnboardConfig;
use crate::error::FormError;

/// Read-only copy of the form taken at one revision
///
/// Cloning is cheap: the phase list is structurally shared.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub revision: u64,
    pub project_name: String,
    pub project_scope: String,
    pub phases: Vector<Phase>,
    pub validation: ValidationReport,
    pub timeline: TimelineLayout,
}

/// Single-writer owner of the onboarding form
#[derive(Debug, Clone)]
pub struct OnboardingForm {
    config: OnboardConfig,
    clock: Arc<dyn Clock>,
    project_name: String,
    project_scope: String,
    phases: Vector<Phase>,
    validation: ValidationReport,
    timeline: TimelineLayout,
    revision: u64,
}

impl OnboardingForm {
    /// Fresh form on the system clock, seeded with the first phase
    #[must_use]
    pub fn new(config: OnboardConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Fresh form on a given clock, seeded with the first phase
    #[must_use]
    pub fn with_clock(config: OnboardConfig, clock: Arc<dyn Clock>) -> Self {
        let first = Phase::new(config.phases.first_phase_name.clone(), clock.today());
        let mut form = Self::empty(config, clock);
        form.phases.push_back(first);
        form.recompute();
        form
    }

    /// Form with placeholder metadata and no phases
    #[must_use]
    pub fn empty(config: OnboardConfig, clock: Arc<dyn Clock>) -> Self {
        let project_name = config.project.name.clone();
        let project_scope = config.project.scope.clone();
        Self {
            config,
            clock,
            project_name,
            project_scope,
            phases: Vector::new(),
            validation: ValidationReport::default(),
            timeline: TimelineLayout::empty(),
            revision: 0,
        }
    }

    /// Form built from existing phases, in order
    ///
    /// # Errors
    /// Returns [`FormError::DuplicatePhase`] if two phases share an id
    pub fn from_phases(
        config: OnboardConfig,
        clock: Arc<dyn Clock>,
        project_name: impl Into<String>,
        project_scope: impl Into<String>,
        phases: impl IntoIterator<Item = Phase>,
    ) -> Result<Self, FormError> {
        let mut form = Self::empty(config, clock);
        form.project_name = project_name.into();
        form.project_scope = project_scope.into();
        for phase in phases {
            if form.position(&phase.id).is_some() {
                return Err(FormError::DuplicatePhase(phase.id));
            }
            form.phases.push_back(phase);
        }
        form.recompute();
        Ok(form)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &OnboardConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[inline]
    #[must_use]
    pub fn project_scope(&self) -> &str {
        &self.project_scope
    }

    /// Phases in display order
    #[inline]
    #[must_use]
    pub fn phases(&self) -> &Vector<Phase> {
        &self.phases
    }

    /// Phase by id
    #[must_use]
    pub fn phase(&self, id: &PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| &p.id == id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Current validation report
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    /// Current timeline layout
    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &TimelineLayout {
        &self.timeline
    }

    /// Bumped on every mutation
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Cheap read-only copy for export or rendering
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            revision: self.revision,
            project_name: self.project_name.clone(),
            project_scope: self.project_scope.clone(),
            phases: self.phases.clone(),
            validation: self.validation.clone(),
            timeline: self.timeline.clone(),
        }
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
        self.revision += 1;
    }

    pub fn set_project_scope(&mut self, scope: impl Into<String>) {
        self.project_scope = scope.into();
        self.revision += 1;
    }

    /// Append a phase named after its position, starting today
    pub fn add_phase(&mut self) -> PhaseId {
        let name = self.config.phases.nth(self.phases.len() + 1);
        let phase = Phase::new(name, self.clock.today());
        let id = phase.id;
        self.phases.push_back(phase);
        self.recompute();
        tracing::debug!("Added phase {} ({} total)", id, self.phases.len());
        id
    }

    /// Append an existing phase value
    ///
    /// # Errors
    /// Returns [`FormError::DuplicatePhase`] if the id is already present
    pub fn push_phase(&mut self, phase: Phase) -> Result<PhaseId, FormError> {
        if self.position(&phase.id).is_some() {
            return Err(FormError::DuplicatePhase(phase.id));
        }
        let id = phase.id;
        self.phases.push_back(phase);
        self.recompute();
        Ok(id)
    }

    /// Remove a phase; removal is final
    ///
    /// # Errors
    /// Returns [`FormError::PhaseNotFound`] if no phase has this id
    pub fn remove_phase(&mut self, id: PhaseId) -> Result<Phase, FormError> {
        let Some(index) = self.position(&id) else {
            tracing::warn!("Remove requested for unknown phase {}", id);
            return Err(FormError::PhaseNotFound(id));
        };
        let removed = self.phases.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Replace a phase with an updated copy
    ///
    /// # Errors
    /// Returns [`FormError::PhaseNotFound`] if no phase has this id
    pub fn update_phase(&mut self, id: PhaseId, update: PhaseUpdate) -> Result<&Phase, FormError> {
        let index = self.position(&id).ok_or(FormError::PhaseNotFound(id))?;
        let next = self.phases[index].with_update(update);
        self.phases = self.phases.update(index, next);
        self.recompute();
        Ok(&self.phases[index])
    }

    fn position(&self, id: &PhaseId) -> Option<usize> {
        self.phases.iter().position(|p| &p.id == id)
    }

    fn recompute(&mut self) {
        self.validation = validate(&self.phases);
        self.timeline = layout(&self.phases, &self.config.layout);
        self.revision += 1;
        tracing::debug!(
            "Recomputed form revision {}: {} phases, {} date errors, {} drawable",
            self.revision,
            self.phases.len(),
            self.validation.error_count(),
            self.timeline.timeline_phases.len()
        );
    }
}
