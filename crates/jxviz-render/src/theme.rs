//! Named colour palettes and the theme switch.
//!
//! A palette is always complete: every colour role exists in both the light and the dark
//! palette. The active palette is held behind an `Arc` in the session context and is replaced as
//! a whole, so a styling pass sees either the old or the new palette, never a mix.

use jxviz_core::DiagramGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::search;
use crate::session::{SessionContext, Transition};
use crate::surface::SurfaceCommand;
use crate::Error;

/// Colour used for `false` values. Not part of any palette.
pub const ALERT_COLOR: &str = "red";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Theme name understood by the companion code editor.
    pub fn editor_theme(self) -> &'static str {
        match self {
            Self::Light => "vs",
            Self::Dark => "vs-dark",
        }
    }

    pub fn settings(self) -> ThemeSettings {
        match self {
            Self::Light => ThemeSettings::light(),
            Self::Dark => ThemeSettings::dark(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(Error::UnknownTheme {
                theme: s.to_string(),
            }),
        }
    }
}

/// Semantic colour slots that diagram text and chrome are painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Key,
    Value,
    Numeric,
    Boolean,
    /// `false` booleans; resolves to [`ALERT_COLOR`] regardless of palette.
    Alert,
    Count,
    PopupKey,
    PopupValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub theme: Theme,
    pub theme_url: String,
    pub diagram_background_color: String,
    pub gridlines_color: String,
    pub node_fill_color: String,
    pub node_stroke_color: String,
    pub text_key_color: String,
    pub text_value_color: String,
    pub text_value_null_color: String,
    pub expand_icon_fill_color: String,
    pub expand_icon_color: String,
    pub expand_icon_border: String,
    pub connector_stroke_color: String,
    pub child_count_color: String,
    pub boolean_color: String,
    pub numeric_color: String,
    pub popup_key_color: String,
    pub popup_value_color: String,
    pub popup_content_bg_color: String,
    pub highlight_fill_color: String,
    pub highlight_focus_color: String,
    pub highlight_stroke_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemeSettings {
    pub fn light() -> Self {
        Self {
            theme: Theme::Light,
            theme_url: "https://cdn.syncfusion.com/ej2/29.1.33/tailwind.css".to_string(),
            diagram_background_color: "#F8F9FA".to_string(),
            gridlines_color: "#EBE8E8".to_string(),
            node_fill_color: "rgb(255, 255, 255)".to_string(),
            node_stroke_color: "rgb(188, 190, 192)".to_string(),
            text_key_color: "#A020F0".to_string(),
            text_value_color: "rgb(83, 83, 83)".to_string(),
            text_value_null_color: "rgb(41, 41, 41)".to_string(),
            expand_icon_fill_color: "#e0dede".to_string(),
            expand_icon_color: "rgb(46, 51, 56)".to_string(),
            expand_icon_border: "rgb(188, 190, 192)".to_string(),
            connector_stroke_color: "rgb(188, 190, 192)".to_string(),
            child_count_color: "rgb(41, 41, 41)".to_string(),
            boolean_color: "rgb(74, 145, 67)".to_string(),
            numeric_color: "rgb(182, 60, 30)".to_string(),
            popup_key_color: "#5C940D".to_string(),
            popup_value_color: "#1864AB".to_string(),
            popup_content_bg_color: "#F8F9FA".to_string(),
            highlight_fill_color: "rgba(27, 255, 0, 0.1)".to_string(),
            highlight_focus_color: "rgba(252, 255, 166, 0.57)".to_string(),
            highlight_stroke_color: "rgb(0, 135, 54)".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme: Theme::Dark,
            theme_url: "https://cdn.syncfusion.com/ej2/29.1.33/tailwind-dark.css".to_string(),
            diagram_background_color: "#1e1e1e".to_string(),
            gridlines_color: "rgb(45, 45, 45)".to_string(),
            node_fill_color: "rgb(41, 41, 41)".to_string(),
            node_stroke_color: "rgb(66, 66, 66)".to_string(),
            text_key_color: "#4dabf7".to_string(),
            text_value_color: "rgb(207, 227, 225)".to_string(),
            text_value_null_color: "rgb(151, 150, 149)".to_string(),
            expand_icon_fill_color: "#1e1e1e".to_string(),
            expand_icon_color: "rgb(220, 221, 222)".to_string(),
            expand_icon_border: "rgb(66, 66, 66)".to_string(),
            connector_stroke_color: "rgb(66, 66, 66)".to_string(),
            child_count_color: "rgb(255, 255, 255)".to_string(),
            boolean_color: "rgb(61, 226, 49)".to_string(),
            numeric_color: "rgb(232, 196, 121)".to_string(),
            popup_key_color: "#A5D8FF".to_string(),
            popup_value_color: "#40C057".to_string(),
            popup_content_bg_color: "#1A1A1A".to_string(),
            highlight_fill_color: "rgba(27, 255, 0, 0.1)".to_string(),
            highlight_focus_color: "rgba(82, 102, 0, 0.61)".to_string(),
            highlight_stroke_color: "rgb(0, 135, 54)".to_string(),
        }
    }

    pub fn color(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Key => &self.text_key_color,
            ColorRole::Value | ColorRole::Count => &self.text_value_color,
            ColorRole::Numeric => &self.numeric_color,
            ColorRole::Boolean => &self.boolean_color,
            ColorRole::Alert => ALERT_COLOR,
            ColorRole::PopupKey => &self.popup_key_color,
            ColorRole::PopupValue => &self.popup_value_color,
        }
    }
}

/// Commands that push a palette's surface colours to the host.
pub fn palette_commands(settings: &ThemeSettings) -> Vec<SurfaceCommand> {
    vec![
        SurfaceCommand::SetEditorTheme {
            name: settings.theme.editor_theme().to_string(),
        },
        SurfaceCommand::SetDarkMode {
            enabled: settings.theme.is_dark(),
        },
        SurfaceCommand::SetBackground {
            color: settings.diagram_background_color.clone(),
        },
        SurfaceCommand::SetGridlineColor {
            color: settings.gridlines_color.clone(),
        },
        SurfaceCommand::SetStylesheetHref {
            href: settings.theme_url.clone(),
        },
    ]
}

/// Switches the active palette.
///
/// Re-selecting the active theme is a no-op. Otherwise the palette is swapped, the surfaces are
/// recoloured, the diagram is refreshed and refit, and any search highlighting is cleared since
/// its colours came from the previous palette.
pub fn set_theme(context: &SessionContext, graph: &DiagramGraph, theme: Theme) -> Transition {
    if context.theme().theme == theme {
        return Transition::unchanged(context);
    }
    tracing::debug!(from = %context.theme().theme, to = %theme, "theme switch");

    let settings = Arc::new(theme.settings());
    let next = context.with_theme(Arc::clone(&settings));

    let mut commands = palette_commands(&settings);
    commands.push(SurfaceCommand::Refresh);
    commands.push(SurfaceCommand::FitToPage);

    let cleared = search::clear(&next, graph);
    commands.extend(cleared.commands);
    Transition::new(cleared.context, commands)
}
