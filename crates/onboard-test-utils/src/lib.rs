//! Testing utilities for Onboard workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use std::sync::Arc;

use chrono::NaiveDate;
use onboard_core::{FixedClock, OnboardConfig, OnboardingForm};
use onboard_plan::{Attachment, DocumentKind, DocumentUpdate, Phase, PhaseUpdate};

/// Date the fixed test clock reports
pub const TEST_TODAY: &str = "2024-01-01";

/// Parse `YYYY-MM-DD`, panicking on bad fixtures
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

/// Optional date; empty text is unset
pub fn maybe_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        None
    } else {
        Some(date(text))
    }
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(date(TEST_TODAY)))
}

/// Phase with start and end; empty strings leave a date unset
pub fn dated_phase(name: &str, start: &str, end: &str) -> Phase {
    Phase::unscheduled(name).with_span(maybe_date(start), maybe_date(end))
}

pub fn with_attachment(phase: Phase, kind: DocumentKind, path: &str) -> Phase {
    phase.with_update(PhaseUpdate::Document(
        kind,
        DocumentUpdate::Attach(Attachment::from_path(path)),
    ))
}

/// Fresh form on the fixed clock
pub fn setup_test_form() -> OnboardingForm {
    OnboardingForm::with_clock(OnboardConfig::new(), fixed_clock())
}

/// Form holding exactly the given phases
pub fn form_with_phases(phases: Vec<Phase>) -> OnboardingForm {
    OnboardingForm::from_phases(
        OnboardConfig::new(),
        fixed_clock(),
        "Test Project",
        "Scope under test",
        phases,
    )
    .unwrap()
}

/// Assert two percentages agree to within floating-point noise
#[track_caller]
pub fn assert_percent(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}%, got {actual}%"
    );
}
