//! Export assembly
//!
//! Turns a [`FormSnapshot`] into an [`ExportManifest`]: the Markdown
//! summary document plus the attachments to bundle and where each one goes
//! inside the archive. Writing the archive itself is the caller's job.

use std::fmt::Write as _;
use std::path::PathBuf;

use onboard_plan::{
    date::format_date_input, DateField, DocumentKind, DocumentSlot, Phase, PhaseId,
};
use serde::Serialize;

use crate::config::ExportSettings;
use crate::form::FormSnapshot;

/// One file to copy into the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEntry {
    pub phase_id: PhaseId,
    pub kind: DocumentKind,
    /// Relative path inside the archive
    pub archive_path: String,
    /// Where the bytes come from
    pub source_path: PathBuf,
}

/// Everything an archive writer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportManifest {
    pub archive_name: String,
    pub summary_file_name: String,
    pub summary_markdown: String,
    pub attachments: Vec<ExportEntry>,
}

/// Build the manifest for a snapshot
///
/// Attachments of categories flagged "not available" are left out.
#[must_use]
pub fn build_manifest(snapshot: &FormSnapshot, settings: &ExportSettings) -> ExportManifest {
    let mut attachments = Vec::new();
    for (index, phase) in snapshot.phases.iter().enumerate() {
        let folder = phase_folder(index, phase);
        for kind in DocumentKind::ALL {
            let slot = phase.document(kind);
            if slot.not_available {
                continue;
            }
            if let Some(attachment) = &slot.attachment {
                attachments.push(ExportEntry {
                    phase_id: phase.id,
                    kind,
                    archive_path: format!("{}/{}/{}", folder, kind.slug(), attachment.file_name),
                    source_path: attachment.source.clone(),
                });
            }
        }
    }

    let manifest = ExportManifest {
        archive_name: format!("{}{}", slugify(&snapshot.project_name), settings.archive_suffix),
        summary_file_name: settings.summary_file_name.clone(),
        summary_markdown: render_summary(snapshot),
        attachments,
    };
    tracing::info!(
        "Assembled export '{}' with {} attachments",
        manifest.archive_name,
        manifest.attachments.len()
    );
    manifest
}

/// Render the project summary as Markdown
#[must_use]
pub fn render_summary(snapshot: &FormSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, snapshot);
    out
}

fn write_summary(out: &mut String, snapshot: &FormSnapshot) -> std::fmt::Result {
    writeln!(out, "# {}", snapshot.project_name)?;
    writeln!(out)?;
    writeln!(out, "## Project Scope")?;
    writeln!(out)?;
    writeln!(out, "{}", snapshot.project_scope)?;
    writeln!(out)?;

    writeln!(out, "## Timeline")?;
    writeln!(out)?;
    let timeline = &snapshot.timeline;
    if timeline.is_empty() {
        writeln!(out, "No phase spans a drawable date range yet.")?;
    } else {
        writeln!(
            out,
            "{} to {} ({} days)",
            timeline.project_start_label, timeline.project_end_label, timeline.total_duration_days
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Phases")?;
    for (index, phase) in snapshot.phases.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "### {}. {}", index + 1, phase.name)?;
        writeln!(out)?;
        writeln!(out, "| Date | Value |")?;
        writeln!(out, "| --- | --- |")?;
        for field in DateField::ALL {
            let value = match phase.date(field) {
                Some(date) => format_date_input(Some(date)),
                None => "Not set".to_string(),
            };
            writeln!(out, "| {} | {} |", field.label(), value)?;
        }

        if let Some(errors) = snapshot.validation.get(&phase.id) {
            if !errors.is_empty() {
                writeln!(out)?;
                writeln!(out, "Date issues:")?;
                for (field, violation) in errors.iter() {
                    writeln!(out, "- {}: {}", field.label(), violation)?;
                }
            }
        }

        for kind in DocumentKind::ALL {
            write_document(out, kind, phase)?;
        }
    }
    Ok(())
}

fn write_document(out: &mut String, kind: DocumentKind, phase: &Phase) -> std::fmt::Result {
    let slot: &DocumentSlot = phase.document(kind);
    writeln!(out)?;
    writeln!(out, "#### {}", kind.title())?;
    writeln!(out)?;

    if slot.not_available {
        writeln!(out, "Not available.")?;
        return Ok(());
    }

    if kind == DocumentKind::Artefacts {
        let checked: Vec<String> = phase
            .artefact_checklist
            .checked()
            .map(|flag| {
                let others = phase.artefact_checklist.others_text.trim();
                if flag == onboard_plan::ArtefactFlag::Others && !others.is_empty() {
                    format!("{} ({})", flag.label(), others)
                } else {
                    flag.label().to_string()
                }
            })
            .collect();
        if !checked.is_empty() {
            writeln!(out, "Artefacts: {}", checked.join(", "))?;
            writeln!(out)?;
        }
    }

    let notes = slot.notes.trim();
    if notes.is_empty() {
        writeln!(out, "No notes provided.")?;
    } else {
        writeln!(out, "{notes}")?;
    }
    if let Some(attachment) = &slot.attachment {
        writeln!(out)?;
        writeln!(out, "Attached file: {}", attachment.file_name)?;
    }
    Ok(())
}

fn phase_folder(index: usize, phase: &Phase) -> String {
    let slug = slugify(&phase.name);
    if slug.is_empty() {
        format!("phase-{:02}", index + 1)
    } else {
        format!("phase-{:02}-{}", index + 1, slug)
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
