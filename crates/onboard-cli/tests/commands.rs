use std::fs;

use onboard_cli::{execute, load_config, load_plan_with_clock, Action};
use onboard_core::OnboardConfig;
use onboard_test_utils::{dated_phase, fixed_clock, form_with_phases};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PLAN: &str = r#"
[project]
name = "Search Platform"

[[phases]]
name = "Discovery"
start_date = "2024-01-01"
end_date = "2024-01-11"

[[phases]]
name = "Build"
start_date = "2024-01-11"
end_date = "2024-01-21"
"#;

#[test]
fn valid_plan_passes_validation() {
    let form = form_with_phases(vec![
        dated_phase("Discovery", "2024-01-01", "2024-01-11"),
        dated_phase("Build", "2024-01-11", "2024-01-21"),
    ]);
    let outcome = execute(&form, Action::Validate { json: false }).unwrap();

    assert!(outcome.success);
    assert_eq!(
        outcome.output,
        "ok    Discovery\nok    Build\n2 phase(s) checked, 0 error(s)\n"
    );
}

#[test]
fn date_errors_fail_validation() {
    let form = form_with_phases(vec![dated_phase("Rollout", "2024-02-01", "2024-01-01")]);
    let outcome = execute(&form, Action::Validate { json: false }).unwrap();

    assert!(!outcome.success);
    assert!(outcome
        .output
        .contains("FAIL  Rollout\n      End: End date cannot be before the start date.\n"));
}

#[test]
fn validation_json_is_keyed_by_phase_and_field() {
    let form = form_with_phases(vec![dated_phase("Rollout", "2024-02-01", "2024-01-01")]);
    let id = form.phases()[0].id.to_string();
    let outcome = execute(&form, Action::Validate { json: true }).unwrap();

    let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
    assert_eq!(
        value[id.as_str()]["endDate"],
        "End date cannot be before the start date."
    );
}

#[test]
fn timeline_text_draws_bars() {
    let form = form_with_phases(vec![
        dated_phase("A", "2024-01-01", "2024-01-11"),
        dated_phase("B", "2024-01-11", "2024-01-21"),
    ]);
    let outcome = execute(&form, Action::Timeline { json: false }).unwrap();
    let lines: Vec<&str> = outcome.output.lines().collect();

    assert_eq!(lines[0], "1/1/2024 to 1/21/2024 (20 days)");
    assert!(lines[1].starts_with(&format!("A |{}{}|", "#".repeat(25), ".".repeat(25))));
    assert!(lines[2].starts_with(&format!("B |{}{}|", ".".repeat(25), "#".repeat(25))));
}

#[test]
fn timeline_json_uses_view_model_names() {
    let form = form_with_phases(vec![dated_phase("A", "2024-01-01", "2024-01-31")]);
    let outcome = execute(&form, Action::Timeline { json: true }).unwrap();

    let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
    assert_eq!(value["totalDurationDays"], 30);
    assert_eq!(value["timelinePhases"][0]["width"], 100.0);
}

#[test]
fn summary_and_manifest() {
    let form = form_with_phases(vec![dated_phase("A", "2024-01-01", "2024-01-31")]);

    let summary = execute(&form, Action::Summary { manifest: false }).unwrap();
    assert!(summary.output.starts_with("# Test Project"));

    let manifest = execute(&form, Action::Summary { manifest: true }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&manifest.output).unwrap();
    assert_eq!(value["archive_name"], "test-project-onboarding.zip");
}

#[test]
fn plan_and_config_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("plan.toml");
    let config = dir.path().join("onboard.toml");
    fs::write(&plan, PLAN).unwrap();
    fs::write(&config, "[layout]\nlabel_format = \"%Y-%m-%d\"\n").unwrap();

    let config = load_config(Some(&config)).unwrap();
    let form = load_plan_with_clock(&plan, config, fixed_clock()).unwrap();
    let outcome = execute(&form, Action::Timeline { json: false }).unwrap();

    assert!(outcome.output.starts_with("2024-01-01 to 2024-01-21 (20 days)"));
}

#[test]
fn missing_plan_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("absent.toml");
    let err = load_plan_with_clock(&plan, OnboardConfig::default(), fixed_clock()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn no_config_path_means_defaults() {
    assert_eq!(load_config(None).unwrap(), OnboardConfig::default());
}
