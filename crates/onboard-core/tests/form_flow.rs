use onboard_core::{FormError, OnboardingForm};
use onboard_plan::{DateField, PhaseId, PhaseUpdate};
use onboard_test_utils::{
    assert_percent, date, dated_phase, form_with_phases, setup_test_form,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn set(form: &mut OnboardingForm, id: PhaseId, field: DateField, value: &str) {
    form.update_phase(id, PhaseUpdate::date_input(field, value)).unwrap();
}

#[test]
fn two_phase_plan_builds_up_step_by_step() {
    let mut form = setup_test_form();
    let discovery = form.phases()[0].id;

    // Start only: nothing to draw yet.
    assert!(form.timeline().is_empty());

    set(&mut form, discovery, DateField::EndDate, "2024-01-11");
    let build = form.add_phase();
    set(&mut form, build, DateField::StartDate, "2024-01-11");
    set(&mut form, build, DateField::EndDate, "2024-01-21");

    let timeline = form.timeline();
    assert_eq!(timeline.project_start, Some(date("2024-01-01")));
    assert_eq!(timeline.project_end, Some(date("2024-01-21")));
    assert_eq!(timeline.total_duration_days, 20);

    let a = timeline.phase(&discovery).unwrap();
    let b = timeline.phase(&build).unwrap();
    assert_percent(a.left, 0.0);
    assert_percent(a.width, 50.0);
    assert_percent(b.left, 50.0);
    assert_percent(b.width, 50.0);
    assert!(form.validation().is_valid());
}

#[test]
fn reversed_dates_flagged_but_edit_still_applied() {
    let mut form = setup_test_form();
    let id = form.phases()[0].id;

    set(&mut form, id, DateField::EndDate, "2023-12-01");

    assert_eq!(form.phase(&id).unwrap().end_date, Some(date("2023-12-01")));
    assert_eq!(
        form.validation().message(&id, DateField::EndDate).as_deref(),
        Some("End date cannot be before the start date.")
    );
    assert!(form.timeline().is_empty());
}

#[test]
fn milestone_without_end_is_silent_and_undrawn() {
    let mut form = setup_test_form();
    let id = form.phases()[0].id;
    set(&mut form, id, DateField::MilestoneDate, "2023-06-01");

    assert!(form.validation().get(&id).unwrap().is_empty());
    assert!(form.timeline().phase(&id).is_none());
}

#[test]
fn removing_last_phase_leaves_empty_results() {
    let mut form = setup_test_form();
    let id = form.phases()[0].id;
    form.remove_phase(id).unwrap();

    assert!(form.is_empty());
    assert!(form.validation().is_empty());
    assert!(form.timeline().is_empty());
    assert_eq!(form.timeline().total_duration_days, 0);
}

#[test]
fn removing_unknown_phase_reports_not_found() {
    let mut form = setup_test_form();
    let ghost = PhaseId::new();
    assert!(matches!(form.remove_phase(ghost), Err(FormError::PhaseNotFound(id)) if id == ghost));
    assert_eq!(form.len(), 1);
}

#[test]
fn removed_ids_are_not_reissued() {
    let mut form = setup_test_form();
    let first = form.add_phase();
    form.remove_phase(first).unwrap();
    let second = form.add_phase();
    assert_ne!(first, second);
}

#[test]
fn handover_extends_timeline_through_the_form() {
    let mut form = form_with_phases(vec![dated_phase("Go live", "2024-03-01", "2024-03-11")]);
    let id = form.phases()[0].id;
    set(&mut form, id, DateField::SupportHandoverDate, "2024-03-21");

    assert!(form.validation().is_valid());
    let laid_out = form.timeline().phase(&id).unwrap();
    assert_percent(laid_out.width, 50.0);
    assert_eq!(laid_out.handover_marker().map(|v| v.round()), Some(100.0));
}

proptest! {
    #[test]
    fn prop_derived_state_tracks_every_edit(
        ops in proptest::collection::vec((0..4u8, 0..60u64, 0..4usize), 1..30)
    ) {
        let mut form = setup_test_form();
        for (kind, offset, target) in ops {
            let ids: Vec<PhaseId> = form.phases().iter().map(|p| p.id).collect();
            match kind {
                0 => { form.add_phase(); }
                1 if !ids.is_empty() => { form.remove_phase(ids[target % ids.len()]).unwrap(); }
                _ if !ids.is_empty() => {
                    let field = if kind == 2 { DateField::EndDate } else { DateField::SupportHandoverDate };
                    let value = date("2024-01-01") + chrono::Days::new(offset);
                    form.update_phase(ids[target % ids.len()], PhaseUpdate::Date(field, Some(value))).unwrap();
                }
                _ => {}
            }

            // Derived state equals a from-scratch recomputation.
            let expected_report = onboard_plan::validate(form.phases());
            let expected_layout = onboard_plan::layout(form.phases(), &form.config().layout);
            prop_assert_eq!(form.validation(), &expected_report);
            prop_assert_eq!(form.timeline(), &expected_layout);
            prop_assert_eq!(form.validation().len(), form.len());
        }
    }
}
