//! Terminal rendering of validation reports and timelines

use std::fmt::Write as _;

use onboard_core::OnboardingForm;
use onboard_plan::{LayoutPhase, TimelineLayout};

/// Default bar width in character cells
pub const BAR_COLUMNS: usize = 50;

const FILLED: char = '#';
const EMPTY: char = '.';
const MILESTONE: char = 'M';
const HANDOVER: char = 'H';

/// Per-phase validation listing
#[must_use]
pub fn validation_text(form: &OnboardingForm) -> String {
    let mut out = String::new();
    let report = form.validation();
    for phase in form.phases() {
        match report.get(&phase.id).filter(|errors| !errors.is_empty()) {
            None => {
                let _ = writeln!(out, "ok    {}", phase.name);
            }
            Some(errors) => {
                let _ = writeln!(out, "FAIL  {}", phase.name);
                for (field, violation) in errors.iter() {
                    let _ = writeln!(out, "      {}: {}", field.label(), violation);
                }
            }
        }
    }
    let _ = writeln!(
        out,
        "{} phase(s) checked, {} error(s)",
        report.len(),
        report.error_count()
    );
    out
}

/// Bar chart of the laid-out phases
#[must_use]
pub fn timeline_text(timeline: &TimelineLayout, columns: usize) -> String {
    if timeline.is_empty() {
        return "Nothing to draw: no phase spans a drawable date range.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} to {} ({} days)",
        timeline.project_start_label, timeline.project_end_label, timeline.total_duration_days
    );

    let name_width = timeline
        .timeline_phases
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    for phase in &timeline.timeline_phases {
        let _ = writeln!(
            out,
            "{:<name_width$} |{}| {}",
            phase.name,
            bar(phase, columns),
            phase.color()
        );
    }
    out
}

/// One phase as a row of cells, with milestone and handover markers
#[must_use]
pub fn bar(phase: &LayoutPhase, columns: usize) -> String {
    if columns == 0 {
        return String::new();
    }
    let mut cells = vec![EMPTY; columns];
    let start = cell(phase.left, columns);
    let end = cell(phase.right(), columns).max(start);
    for c in &mut cells[start..end] {
        *c = FILLED;
    }
    for (offset, mark) in [
        (phase.milestone_marker(), MILESTONE),
        (phase.handover_marker(), HANDOVER),
    ] {
        // Markers past the axis are not drawn.
        if let Some(offset) = offset.filter(|o| *o <= 100.0) {
            cells[cell(offset, columns).min(columns - 1)] = mark;
        }
    }
    cells.into_iter().collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn cell(percent: f64, columns: usize) -> usize {
    let scaled = (percent.clamp(0.0, 100.0) / 100.0 * columns as f64).round();
    (scaled as usize).min(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_plan::{PhaseId, MARKER_HIDDEN};
    use onboard_test_utils::date;

    fn laid_out(left: f64, width: f64) -> LayoutPhase {
        let day = date("2024-01-01");
        LayoutPhase {
            id: PhaseId::new(),
            name: "P".into(),
            start_date: day,
            end_date: day,
            milestone_date: None,
            support_handover_date: None,
            left,
            width,
            milestone_left: MARKER_HIDDEN,
            handover_left: MARKER_HIDDEN,
            color_index: 0,
        }
    }

    #[test]
    fn bar_fills_its_share() {
        assert_eq!(bar(&laid_out(0.0, 50.0), 10), "#####.....");
        assert_eq!(bar(&laid_out(50.0, 50.0), 10), ".....#####");
    }

    #[test]
    fn zero_width_bar_is_blank() {
        assert_eq!(bar(&laid_out(100.0, 0.0), 4), "....");
    }

    #[test]
    fn markers_overlay_the_bar() {
        let mut phase = laid_out(0.0, 50.0);
        phase.milestone_left = 20.0;
        phase.handover_left = 100.0;
        assert_eq!(bar(&phase, 10), "##M##....H");
    }

    #[test]
    fn markers_beyond_axis_are_skipped() {
        let mut phase = laid_out(0.0, 100.0);
        phase.milestone_left = 200.0;
        assert_eq!(bar(&phase, 4), "####");
    }

    #[test]
    fn empty_timeline_message() {
        assert!(timeline_text(&TimelineLayout::empty(), 10).starts_with("Nothing to draw"));
    }
}
