//! Classification and display formatting of scalar values shown in leaf nodes.

use serde::{Deserialize, Serialize};

use crate::theme::ColorRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Numeric,
    Boolean(bool),
    String,
}

/// Whole-string finite number check (`"42"`, `"-3.5"`, `"1e3"`); surrounding whitespace is
/// ignored.
pub fn is_numeric(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Numbers first, then case-insensitive `true`/`false`, then everything else.
pub fn classify(raw: &str) -> ValueKind {
    if is_numeric(raw) {
        return ValueKind::Numeric;
    }
    match parse_boolean(raw) {
        Some(b) => ValueKind::Boolean(b),
        None => ValueKind::String,
    }
}

fn is_quoted(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"')
}

/// Display text for a value annotation.
///
/// Numbers pass through, booleans are lower-cased, blank strings stay as they are and other
/// strings are wrapped in double quotes unless already quoted.
pub fn format_display(raw: &str) -> String {
    match classify(raw) {
        ValueKind::Numeric => raw.to_string(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::String if raw.trim().is_empty() || is_quoted(raw) => raw.to_string(),
        ValueKind::String => format!("\"{raw}\""),
    }
}

/// Colour role of a value. `false` maps to [`ColorRole::Alert`], not [`ColorRole::Boolean`].
pub fn value_color_role(raw: &str) -> ColorRole {
    match classify(raw) {
        ValueKind::Numeric => ColorRole::Numeric,
        ValueKind::Boolean(true) => ColorRole::Boolean,
        ValueKind::Boolean(false) => ColorRole::Alert,
        ValueKind::String => ColorRole::Value,
    }
}
