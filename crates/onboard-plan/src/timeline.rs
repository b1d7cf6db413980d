//! Timeline layout
//!
//! Maps phase date ranges onto a normalized 0–100 horizontal axis spanning
//! the project bounds. The result is a view model for a renderer; nothing
//! here draws anything.
//!
//! # Bounds
//! - start: earliest start date among drawable phases
//! - end: latest end date or handover date among drawable phases
//!
//! Milestones never extend the bounds. Markers before the project start
//! are hidden ([`MARKER_HIDDEN`]), never clamped to zero.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::ISO_DATE_FORMAT;
use crate::phase::{Phase, PhaseId};

/// Colour palette cycled over drawable phases
pub const PALETTE: [&str; 8] = [
    "blue", "emerald", "amber", "indigo", "pink", "sky", "rose", "lime",
];

/// Marker offset meaning "not drawn"
pub const MARKER_HIDDEN: f64 = -1.0;

/// Default label format, US-style `M/D/YYYY`
pub const DEFAULT_LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Layout presentation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// chrono format string for the project start/end labels
    pub label_format: String,
}

impl LayoutOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With label format
    #[inline]
    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    /// Render a bound label, falling back to ISO if the format is unusable
    #[must_use]
    pub fn format_label(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.label_format)).is_err() {
            tracing::debug!(
                "label format '{}' rejected, falling back to ISO",
                self.label_format
            );
            return date.format(ISO_DATE_FORMAT).to_string();
        }
        out
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
        }
    }
}

/// A drawable phase positioned on the axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPhase {
    pub id: PhaseId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub milestone_date: Option<NaiveDate>,
    pub support_handover_date: Option<NaiveDate>,
    /// Offset from the axis start, percent
    pub left: f64,
    /// Bar width, percent
    pub width: f64,
    /// Milestone marker offset, percent, or [`MARKER_HIDDEN`]
    pub milestone_left: f64,
    /// Handover marker offset, percent, or [`MARKER_HIDDEN`]
    pub handover_left: f64,
    /// Index into [`PALETTE`]
    pub color_index: usize,
}

impl LayoutPhase {
    /// Palette colour name
    #[inline]
    #[must_use]
    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index % PALETTE.len()]
    }

    /// Milestone offset if the marker is drawn
    #[inline]
    #[must_use]
    pub fn milestone_marker(&self) -> Option<f64> {
        visible(self.milestone_left)
    }

    /// Handover offset if the marker is drawn
    #[inline]
    #[must_use]
    pub fn handover_marker(&self) -> Option<f64> {
        visible(self.handover_left)
    }

    /// Right edge of the bar, percent
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

fn visible(offset: f64) -> Option<f64> {
    (offset >= 0.0).then_some(offset)
}

/// Timeline view model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout {
    /// Span in whole days, 0 when nothing is drawable
    pub total_duration_days: i64,
    pub project_start_label: String,
    pub project_end_label: String,
    pub project_start: Option<NaiveDate>,
    pub project_end: Option<NaiveDate>,
    pub timeline_phases: Vec<LayoutPhase>,
}

impl TimelineLayout {
    /// Nothing drawable
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timeline_phases.is_empty()
    }

    /// Laid-out phase by id
    #[must_use]
    pub fn phase(&self, id: &PhaseId) -> Option<&LayoutPhase> {
        self.timeline_phases.iter().find(|p| &p.id == id)
    }
}

/// Lay out every phase that has both a start and an end date
///
/// Total over well-formed input: degenerate or reversed project spans give
/// [`TimelineLayout::empty`].
pub fn layout<'a, I>(phases: I, options: &LayoutOptions) -> TimelineLayout
where
    I: IntoIterator<Item = &'a Phase>,
{
    let drawable: Vec<(&Phase, NaiveDate, NaiveDate)> = phases
        .into_iter()
        .filter_map(|p| p.span().map(|(start, end)| (p, start, end)))
        .collect();

    let Some((project_start, project_end)) = project_bounds(&drawable) else {
        return TimelineLayout::empty();
    };

    let total_days = (project_end - project_start).num_days();
    if total_days <= 0 {
        tracing::debug!(
            "non-positive project span {} -> {}, nothing to draw",
            project_start,
            project_end
        );
        return TimelineLayout::empty();
    }

    let percent = |date: NaiveDate, from: NaiveDate| {
        #[allow(clippy::cast_precision_loss)]
        let ratio = (date - from).num_days() as f64 / total_days as f64;
        ratio * 100.0
    };
    let marker = |date: Option<NaiveDate>| match date {
        Some(date) if date >= project_start => percent(date, project_start),
        _ => MARKER_HIDDEN,
    };

    let laid_out = drawable
        .into_iter()
        .enumerate()
        .map(|(index, (phase, start, end))| LayoutPhase {
            id: phase.id,
            name: phase.name.clone(),
            start_date: start,
            end_date: end,
            milestone_date: phase.milestone_date,
            support_handover_date: phase.support_handover_date,
            left: percent(start, project_start).max(0.0),
            width: percent(end, start).max(0.0),
            milestone_left: marker(phase.milestone_date),
            handover_left: marker(phase.support_handover_date),
            color_index: index % PALETTE.len(),
        })
        .collect();

    TimelineLayout {
        total_duration_days: total_days,
        project_start_label: options.format_label(project_start),
        project_end_label: options.format_label(project_end),
        project_start: Some(project_start),
        project_end: Some(project_end),
        timeline_phases: laid_out,
    }
}

fn project_bounds(drawable: &[(&Phase, NaiveDate, NaiveDate)]) -> Option<(NaiveDate, NaiveDate)> {
    let start = drawable.iter().map(|(_, start, _)| *start).min()?;
    let end = drawable
        .iter()
        .flat_map(|(phase, _, end)| std::iter::once(*end).chain(phase.support_handover_date))
        .max()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn phase(start: &str, end: &str) -> Phase {
        Phase::unscheduled("p").with_span(Some(d(start)), Some(d(end)))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let result = layout(&Vec::<Phase>::new(), &LayoutOptions::default());
        assert_eq!(result, TimelineLayout::empty());
        assert_eq!(result.total_duration_days, 0);
        assert!(result.project_start_label.is_empty());
    }

    #[test]
    fn undated_phases_give_empty_layout() {
        let phases = vec![
            Phase::unscheduled("a"),
            Phase::unscheduled("b").with_span(Some(d("2024-01-01")), None),
        ];
        assert!(layout(&phases, &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn single_month_phase() {
        let result = layout(&[phase("2024-01-01", "2024-01-31")], &LayoutOptions::default());
        assert_eq!(result.total_duration_days, 30);
        assert_eq!(result.timeline_phases.len(), 1);
        assert!(close(result.timeline_phases[0].left, 0.0));
        assert!(close(result.timeline_phases[0].width, 100.0));
        assert_eq!(result.project_start_label, "1/1/2024");
        assert_eq!(result.project_end_label, "1/31/2024");
    }

    #[test]
    fn adjacent_phases_split_the_axis() {
        let a = phase("2024-01-01", "2024-01-11");
        let b = phase("2024-01-11", "2024-01-21");
        let result = layout(&[a.clone(), b.clone()], &LayoutOptions::default());

        assert_eq!(result.project_start, Some(d("2024-01-01")));
        assert_eq!(result.project_end, Some(d("2024-01-21")));

        let la = result.phase(&a.id).unwrap();
        let lb = result.phase(&b.id).unwrap();
        assert!(close(la.left, 0.0) && close(la.width, 50.0));
        assert!(close(lb.left, 50.0) && close(lb.width, 50.0));
    }

    #[test]
    fn same_day_span_is_not_drawable() {
        assert!(layout(&[phase("2024-01-01", "2024-01-01")], &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn reversed_lone_phase_is_not_drawable() {
        assert!(layout(&[phase("2024-02-01", "2024-01-01")], &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn reversed_phase_next_to_valid_one_has_zero_width() {
        let good = phase("2024-01-01", "2024-03-01");
        let reversed = phase("2024-02-01", "2024-01-15");
        let result = layout(&[good, reversed.clone()], &LayoutOptions::default());

        let lr = result.phase(&reversed.id).unwrap();
        assert!(close(lr.width, 0.0));
        assert!(lr.left > 0.0);
    }

    #[test]
    fn handover_extends_project_end() {
        let p = phase("2024-01-01", "2024-01-11").with_handover(Some(d("2024-01-21")));
        let result = layout(&[p], &LayoutOptions::default());

        assert_eq!(result.project_end, Some(d("2024-01-21")));
        assert_eq!(result.total_duration_days, 20);
        let lp = &result.timeline_phases[0];
        assert!(close(lp.width, 50.0));
        assert_eq!(lp.handover_marker().map(|v| (v * 1e6).round() / 1e6), Some(100.0));
    }

    #[test]
    fn milestone_does_not_extend_project_end() {
        let p = phase("2024-01-01", "2024-01-11").with_milestone(Some(d("2024-01-21")));
        let result = layout(&[p], &LayoutOptions::default());

        assert_eq!(result.project_end, Some(d("2024-01-11")));
        // Unclamped: a milestone past the bar is drawn past 100%.
        assert!(close(result.timeline_phases[0].milestone_left, 200.0));
    }

    #[test]
    fn markers_before_project_start_are_hidden() {
        let p = phase("2024-01-10", "2024-01-20")
            .with_milestone(Some(d("2024-01-01")))
            .with_handover(Some(d("2024-01-05")));
        let result = layout(&[p], &LayoutOptions::default());
        let lp = &result.timeline_phases[0];

        assert_eq!(lp.milestone_left, MARKER_HIDDEN);
        assert_eq!(lp.handover_left, MARKER_HIDDEN);
        assert_eq!(lp.milestone_marker(), None);
        assert_eq!(lp.handover_marker(), None);
    }

    #[test]
    fn markers_on_project_start_sit_at_zero() {
        let p = phase("2024-01-01", "2024-01-11")
            .with_milestone(Some(d("2024-01-01")))
            .with_handover(Some(d("2024-01-01")));
        let result = layout(&[p], &LayoutOptions::default());
        let lp = &result.timeline_phases[0];

        assert_eq!(lp.milestone_left, 0.0);
        assert_eq!(lp.handover_left, 0.0);
        assert_eq!(lp.milestone_marker(), Some(0.0));
        assert_eq!(lp.handover_marker(), Some(0.0));
    }

    #[test]
    fn unset_markers_are_hidden() {
        let result = layout(&[phase("2024-01-01", "2024-01-31")], &LayoutOptions::default());
        assert_eq!(result.timeline_phases[0].milestone_left, MARKER_HIDDEN);
        assert_eq!(result.timeline_phases[0].handover_left, MARKER_HIDDEN);
    }

    #[test]
    fn colors_cycle_over_drawable_phases_only() {
        let mut phases = vec![Phase::unscheduled("skipped")];
        for i in 0..10 {
            let start = d("2024-01-01") + chrono::Days::new(i);
            phases.push(Phase::unscheduled("p").with_span(Some(start), Some(start + chrono::Days::new(5))));
        }
        let result = layout(&phases, &LayoutOptions::default());

        let indices: Vec<usize> = result.timeline_phases.iter().map(|p| p.color_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
        assert_eq!(result.timeline_phases[0].color(), "blue");
        assert_eq!(result.timeline_phases[8].color(), "blue");
    }

    #[test]
    fn input_order_is_preserved() {
        let late = phase("2024-03-01", "2024-04-01");
        let early = phase("2024-01-01", "2024-02-01");
        let result = layout(&[late.clone(), early.clone()], &LayoutOptions::default());
        let ids: Vec<PhaseId> = result.timeline_phases.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![late.id, early.id]);
    }

    #[test]
    fn custom_label_format() {
        let options = LayoutOptions::new().with_label_format("%d %b %Y");
        let result = layout(&[phase("2024-01-01", "2024-01-31")], &options);
        assert_eq!(result.project_start_label, "01 Jan 2024");
    }

    #[test]
    fn broken_label_format_falls_back_to_iso() {
        let options = LayoutOptions::new().with_label_format("%Q");
        assert_eq!(options.format_label(d("2024-01-31")), "2024-01-31");
    }

    #[test]
    fn serializes_view_model_keys() {
        let result = layout(&[phase("2024-01-01", "2024-01-31")], &LayoutOptions::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalDurationDays"], 30);
        assert_eq!(json["timelinePhases"][0]["milestoneLeft"], -1.0);
        assert_eq!(json["timelinePhases"][0]["colorIndex"], 0);
    }
}
