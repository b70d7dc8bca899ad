//! Inspector rendering of a node's raw `key: value` blob.
//!
//! The same parsed [`DetailsBlock`] drives both the colourised spans and the plain text copied to
//! the clipboard, so the two never disagree.

use serde::{Deserialize, Serialize};

use crate::theme::{ColorRole, ThemeSettings};
use crate::value::{ValueKind, classify};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsLine {
    /// Quoted key (`"name"`).
    pub key: String,
    /// JSON-like value: numbers as-is, booleans lower-cased, everything else quoted.
    pub value: String,
    pub kind: ValueKind,
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DetailsBlock {
    /// Blob without any `key: value` line; rendered as one quoted string.
    Scalar { value: String },
    Object {
        lines: Vec<DetailsLine>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsSpan {
    pub text: String,
    pub color: Option<String>,
}

impl DetailsSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: &str) -> Self {
        Self {
            text: text.into(),
            color: Some(color.to_string()),
        }
    }
}

fn details_value(raw: &str) -> (String, ValueKind) {
    let kind = classify(raw);
    let value = match kind {
        ValueKind::Numeric => raw.to_string(),
        ValueKind::Boolean(b) => b.to_string(),
        ValueKind::String => {
            let inner = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            format!("\"{inner}\"")
        }
    };
    (value, kind)
}

impl DetailsBlock {
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw
            .split('\n')
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                let (value, kind) = details_value(value.trim());
                Some(DetailsLine {
                    key: format!("\"{}\"", key.trim()),
                    value,
                    kind,
                    trailing_comma: true,
                })
            })
            .collect::<Vec<_>>();

        if raw.trim().is_empty() || lines.is_empty() {
            return Self::Scalar {
                value: format!("\"{}\"", raw.trim()),
            };
        }
        if let Some(last) = lines.last_mut() {
            last.trailing_comma = false;
        }
        Self::Object { lines }
    }

    /// Canonical clipboard text.
    pub fn to_plain_text(&self) -> String {
        self.spans_with(|_| None)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    /// Colourised rendering using the palette's popup colours.
    pub fn spans(&self, theme: &ThemeSettings) -> Vec<DetailsSpan> {
        self.spans_with(|role| Some(theme.color(role)))
    }

    fn spans_with<'a>(&self, color: impl Fn(ColorRole) -> Option<&'a str>) -> Vec<DetailsSpan> {
        let span = |text: String, role: ColorRole| match color(role) {
            Some(c) => DetailsSpan::colored(text, c),
            None => DetailsSpan::plain(text),
        };
        match self {
            Self::Scalar { value } => vec![span(value.clone(), ColorRole::PopupValue)],
            Self::Object { lines } => {
                let mut out = vec![DetailsSpan::plain("{\n")];
                for line in lines {
                    out.push(DetailsSpan::plain(INDENT));
                    out.push(span(line.key.clone(), ColorRole::PopupKey));
                    out.push(span(": ".to_string(), ColorRole::PopupValue));
                    out.push(span(line.value.clone(), ColorRole::PopupValue));
                    let tail = if line.trailing_comma { ",\n" } else { "\n" };
                    out.push(DetailsSpan::plain(tail));
                }
                out.push(DetailsSpan::plain("}"));
                out
            }
        }
    }
}

/// Path shown above the details block: a leading `Root` is rendered as `{Root}`.
pub fn format_path(path: &str) -> String {
    match path.strip_prefix("Root") {
        Some(rest) => format!("{{Root}}{rest}"),
        None => path.to_string(),
    }
}
