//! Onboard Core - onboarding form state
//!
//! The layer a front end talks to:
//! - Owns project metadata and the ordered phase list
//! - Applies edits as value replacement and recomputes validation and
//!   timeline after each one
//! - Loads and saves plan files
//! - Assembles the export manifest (summary document plus attachments)
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use onboard_core::{FixedClock, OnboardConfig, OnboardingForm};
//! use onboard_plan::{DateField, PhaseUpdate};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let mut form = OnboardingForm::with_clock(OnboardConfig::new(), Arc::new(FixedClock(today)));
//!
//! let id = form.phases()[0].id;
//! form.update_phase(id, PhaseUpdate::date_input(DateField::EndDate, "2024-01-31"))?;
//!
//! assert!(form.validation().is_valid());
//! assert_eq!(form.timeline().total_duration_days, 30);
//! # Ok::<(), onboard_core::FormError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod plan_file;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ExportSettings, OnboardConfig, PhaseNaming, ProjectDefaults};
pub use error::FormError;
pub use export::{build_manifest, render_summary, ExportEntry, ExportManifest};
pub use form::{FormSnapshot, OnboardingForm};
pub use plan_file::{load_form, read_plan, PlanDocument, PlanFormat};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the onboarding form
    pub use crate::{
        build_manifest, Clock, FormError, FormSnapshot, OnboardConfig, OnboardingForm,
        PlanDocument,
    };
    pub use onboard_plan::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
