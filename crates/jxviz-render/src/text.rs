use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthChar;

use crate::Error;

/// Font used to measure and draw annotation text (`12px Consolas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub font_family: String,
    pub font_size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            font_family: "Consolas".to_string(),
            font_size: 12.0,
        }
    }
}

impl FontSpec {
    /// Parses the `<size>px <family>` subset of the CSS `font` shorthand.
    ///
    /// Leading style/weight keywords (`bold 12px Consolas`) are skipped; quotes around the
    /// family are removed.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut tokens = spec.split_whitespace();
        let font_size = loop {
            let tok = tokens.next()?;
            if let Some(px) = tok.strip_suffix("px") {
                break px.parse::<f64>().ok()?;
            }
        };
        let family = tokens.collect::<Vec<_>>().join(" ");
        let family = family.trim_matches(|c| c == '"' || c == '\'');
        if family.is_empty() || !(font_size.is_finite() && font_size > 0.0) {
            return None;
        }
        Some(Self {
            font_family: family.to_string(),
            font_size,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.font_size, self.font_family)
    }
}

impl FromStr for FontSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidFont {
            font: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics;

    fn width(&self, text: &str, font: &FontSpec) -> f64 {
        self.measure(text, font).width
    }
}

/// Fixed-advance measurer for monospace fonts.
///
/// Each display column advances `font_size * char_width_factor` pixels; East Asian wide
/// characters take two columns, zero-width and control characters none.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    /// Consolas advance width in em.
    pub const DEFAULT_CHAR_WIDTH_FACTOR: f64 = 0.55;
    pub const DEFAULT_LINE_HEIGHT_FACTOR: f64 = 1.2;

    pub fn columns(line: &str) -> usize {
        line.chars()
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            Self::DEFAULT_CHAR_WIDTH_FACTOR
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            Self::DEFAULT_LINE_HEIGHT_FACTOR
        } else {
            self.line_height_factor
        };

        let font_size = font.font_size.max(1.0);
        let mut max_columns = 0usize;
        let mut line_count = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_columns = max_columns.max(Self::columns(line));
        }

        TextMetrics {
            width: max_columns as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests;
