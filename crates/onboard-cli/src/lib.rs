//! Onboard CLI - command implementations
//!
//! The `onboard` binary parses arguments and hands off here. Each command
//! loads a plan file into an [`OnboardingForm`] and renders one of its
//! derived views as text or JSON.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod render;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use onboard_core::{build_manifest, load_form, Clock, OnboardConfig, OnboardingForm, SystemClock};

/// What to print for a loaded plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Per-phase date rule results
    Validate { json: bool },
    /// Timeline bars and project bounds
    Timeline { json: bool },
    /// Markdown summary, or the full export manifest as JSON
    Summary { manifest: bool },
}

/// Rendered command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    /// False when the plan has date errors and the command reports them
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self { output, success: true }
    }
}

/// Load configuration, falling back to defaults when no path is given
///
/// # Errors
/// Returns error if the config file cannot be read or is invalid
pub fn load_config(path: Option<&Path>) -> anyhow::Result<OnboardConfig> {
    match path {
        Some(path) => OnboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(OnboardConfig::default()),
    }
}

/// Load a plan file against today's date
///
/// # Errors
/// Returns error if the plan cannot be read or parsed
pub fn load_plan(plan: &Path, config: OnboardConfig) -> anyhow::Result<OnboardingForm> {
    load_plan_with_clock(plan, config, Arc::new(SystemClock))
}

/// Load a plan file with an explicit clock
///
/// # Errors
/// Returns error if the plan cannot be read or parsed
pub fn load_plan_with_clock(
    plan: &Path,
    config: OnboardConfig,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<OnboardingForm> {
    load_form(plan, config, clock).with_context(|| format!("loading plan {}", plan.display()))
}

/// Render the requested view of a form
///
/// # Errors
/// Returns error if JSON encoding fails
pub fn execute(form: &OnboardingForm, action: Action) -> anyhow::Result<Outcome> {
    tracing::debug!("Running {:?} on {} phases", action, form.len());
    match action {
        Action::Validate { json } => {
            let output = if json {
                serde_json::to_string_pretty(form.validation())
                    .context("encoding validation report")?
            } else {
                render::validation_text(form)
            };
            Ok(Outcome {
                output,
                success: form.validation().is_valid(),
            })
        }
        Action::Timeline { json } => {
            let output = if json {
                serde_json::to_string_pretty(form.timeline()).context("encoding timeline")?
            } else {
                render::timeline_text(form.timeline(), render::BAR_COLUMNS)
            };
            Ok(Outcome::ok(output))
        }
        Action::Summary { manifest } => {
            let snapshot = form.snapshot();
            if manifest {
                let manifest = build_manifest(&snapshot, &form.config().export);
                let output =
                    serde_json::to_string_pretty(&manifest).context("encoding export manifest")?;
                Ok(Outcome::ok(output))
            } else {
                Ok(Outcome::ok(onboard_core::render_summary(&snapshot)))
            }
        }
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
