//! Calendar date input handling
//!
//! Dates arrive as ISO `YYYY-MM-DD` text. An empty string means "unset".
//! Lenient parsing maps anything unparseable to unset as well, so the
//! validator and layout engine only ever see `Option<NaiveDate>`.

use chrono::NaiveDate;

use crate::error::PlanError;

/// ISO calendar date format used for input and serialization
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse date input, treating empty or malformed text as unset
#[must_use]
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!("treating malformed date '{}' as unset: {}", trimmed, e);
            None
        }
    }
}

/// Parse date input, rejecting malformed text
///
/// Empty input is still `Ok(None)`.
///
/// # Errors
/// Returns [`PlanError::InvalidDate`] if the text is non-empty and not a
/// valid calendar date.
pub fn parse_date_strict(input: &str) -> Result<Option<NaiveDate>, PlanError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map(Some)
        .map_err(|source| PlanError::InvalidDate {
            input: trimmed.to_string(),
            source,
        })
}

/// Render an optional date back to its input form
#[must_use]
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Serde adapter for `Option<NaiveDate>` stored as `""` or `YYYY-MM-DD`
///
/// Use with `#[serde(default, with = "onboard_plan::date::lenient")]`.
pub mod lenient {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize unset as an empty string
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_input(*date))
    }

    /// Deserialize empty, missing, null or malformed text as unset
    ///
    /// # Errors
    /// Only fails if the value is not a string or null.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_date_input))
    }
}
