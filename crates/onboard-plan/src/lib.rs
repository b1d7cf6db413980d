//! Onboard Plan
//!
//! Phase records plus the two pure computations over them.
//!
//! # Overview
//!
//! - **Phase**: one named, dated segment of a project plan
//! - **validate**: cross-field date rules, reported per phase and field
//! - **layout**: proportional timeline view model on a 0–100 axis
//!
//! Both functions take any iterator of `&Phase`, have no side effects and
//! are cheap enough to rerun after every edit.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use onboard_plan::{layout, validate, LayoutOptions, Phase};
//!
//! let jan = |day| NaiveDate::from_ymd_opt(2024, 1, day);
//! let phases = vec![
//!     Phase::unscheduled("Discovery").with_span(jan(1), jan(11)),
//!     Phase::unscheduled("Build").with_span(jan(11), jan(21)),
//! ];
//!
//! let report = validate(&phases);
//! assert!(report.is_valid());
//!
//! let timeline = layout(&phases, &LayoutOptions::default());
//! assert_eq!(timeline.total_duration_days, 20);
//! assert_eq!(timeline.timeline_phases[1].left, 50.0);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod date;
pub mod error;
pub mod phase;
pub mod timeline;
pub mod validation;

// Re-exports
pub use error::PlanError;
pub use phase::{
    ArtefactChecklist, ArtefactFlag, Attachment, DateField, DocumentKind, DocumentSlot,
    DocumentUpdate, Phase, PhaseId, PhaseUpdate,
};
pub use timeline::{
    layout, LayoutOptions, LayoutPhase, TimelineLayout, DEFAULT_LABEL_FORMAT, MARKER_HIDDEN,
    PALETTE,
};
pub use validation::{check_phase, validate, DateRuleViolation, PhaseErrors, ValidationReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with phase plans
    pub use crate::{
        layout, validate, DateField, LayoutOptions, Phase, PhaseId, PhaseUpdate, TimelineLayout,
        ValidationReport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
