//! Session-scoped viewer state and the transitions that replace it.
//!
//! A [`SessionContext`] is never mutated in place. Every user action takes the current context
//! and returns a [`Transition`]: the next context plus the surface commands that bring the host's
//! widgets in line with it.

use jxviz_core::{
    ConversionDirection, ConversionService, DocumentMode, ImageExportRequest, ImageFormat,
    Orientation, ViewerConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::expand_collapse::CollapseState;
use crate::search::SearchState;
use crate::sizing::LayoutConstants;
use crate::surface::{DiagramSurface, SurfaceCommand};
use crate::theme::{Theme, ThemeSettings, palette_commands};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    pub show_grid: bool,
    pub show_child_count: bool,
    pub show_expand_collapse: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_child_count: true,
            show_expand_collapse: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    theme: Arc<ThemeSettings>,
    orientation: Orientation,
    collapse: CollapseState,
    search: SearchState,
    view: ViewOptions,
    constants: LayoutConstants,
    mode: DocumentMode,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        let defaults = ViewOptions::default();
        let theme = match config.get_str("theme") {
            Some(name) => name.parse::<Theme>()?,
            None => Theme::default(),
        };
        let orientation = match config.get_str("layout.orientation") {
            Some(o) => o.parse::<Orientation>()?,
            None => Orientation::default(),
        };
        let mode = match config.get_str("editor.mode") {
            Some(m) => m.parse::<DocumentMode>()?,
            None => DocumentMode::default(),
        };
        let view = ViewOptions {
            show_grid: config.get_bool("view.showGrid").unwrap_or(defaults.show_grid),
            show_child_count: config
                .get_bool("view.showChildCount")
                .unwrap_or(defaults.show_child_count),
            show_expand_collapse: config
                .get_bool("view.showExpandCollapse")
                .unwrap_or(defaults.show_expand_collapse),
        };

        Ok(Self {
            theme: Arc::new(theme.settings()),
            orientation,
            collapse: CollapseState::default(),
            search: SearchState::default(),
            view,
            constants: LayoutConstants::from_config(config)?,
            mode,
        })
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn theme_arc(&self) -> Arc<ThemeSettings> {
        Arc::clone(&self.theme)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn view(&self) -> ViewOptions {
        self.view
    }

    pub fn constants(&self) -> &LayoutConstants {
        &self.constants
    }

    pub fn mode(&self) -> DocumentMode {
        self.mode
    }

    pub fn with_theme(&self, theme: Arc<ThemeSettings>) -> Self {
        Self {
            theme,
            ..self.clone()
        }
    }

    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self.clone()
        }
    }

    pub fn with_collapse(&self, collapse: CollapseState) -> Self {
        Self {
            collapse,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: SearchState) -> Self {
        Self {
            search,
            ..self.clone()
        }
    }

    pub fn with_view(&self, view: ViewOptions) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: DocumentMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Commands that bring freshly created surfaces in line with this context.
    pub fn initial_commands(&self) -> Vec<SurfaceCommand> {
        let mut commands = palette_commands(&self.theme);
        commands.push(SurfaceCommand::SetGridVisible {
            visible: self.view.show_grid,
        });
        commands.push(SurfaceCommand::SetLayoutOrientation {
            orientation: self.orientation,
        });
        commands.push(SurfaceCommand::SetCollapseMenuLabel {
            label: self.collapse.menu_label().to_string(),
        });
        commands
    }
}

/// Result of one user action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub context: SessionContext,
    pub commands: Vec<SurfaceCommand>,
}

impl Transition {
    pub fn new(context: SessionContext, commands: Vec<SurfaceCommand>) -> Self {
        Self { context, commands }
    }

    pub fn unchanged(context: &SessionContext) -> Self {
        Self::new(context.clone(), Vec::new())
    }

    pub fn is_noop(&self) -> bool {
        self.commands.is_empty()
    }

    /// Applies the commands to `surface` and hands back the next context.
    pub fn apply(self, surface: &mut impl DiagramSurface) -> SessionContext {
        surface.apply_all(&self.commands);
        self.context
    }
}

pub fn toggle_grid(ctx: &SessionContext) -> Transition {
    let view = ViewOptions {
        show_grid: !ctx.view.show_grid,
        ..ctx.view
    };
    Transition::new(
        ctx.with_view(view),
        vec![SurfaceCommand::SetGridVisible {
            visible: view.show_grid,
        }],
    )
}

pub fn toggle_child_count(ctx: &SessionContext) -> Transition {
    let view = ViewOptions {
        show_child_count: !ctx.view.show_child_count,
        ..ctx.view
    };
    Transition::new(ctx.with_view(view), vec![SurfaceCommand::Refresh])
}

pub fn toggle_expand_collapse(ctx: &SessionContext) -> Transition {
    let view = ViewOptions {
        show_expand_collapse: !ctx.view.show_expand_collapse,
        ..ctx.view
    };
    Transition::new(ctx.with_view(view), vec![SurfaceCommand::Refresh])
}

pub fn export_image(
    ctx: &SessionContext,
    file_name: Option<&str>,
    format: Option<ImageFormat>,
) -> Transition {
    let request = ImageExportRequest::new(file_name, format);
    tracing::debug!(file_name = %request.file_name, format = ?request.format, "image export");
    Transition::new(ctx.clone(), vec![SurfaceCommand::ExportDiagram { request }])
}

/// Switches the editor between JSON and XML, converting its content.
///
/// Selecting the active mode is a no-op. A failed conversion leaves both the context and the
/// editor content untouched and returns the conversion message as the error.
pub fn switch_mode(
    ctx: &SessionContext,
    content: &str,
    mode: DocumentMode,
    converter: &dyn ConversionService,
) -> Result<Transition> {
    let Some(direction) = ConversionDirection::between(ctx.mode, mode) else {
        return Ok(Transition::unchanged(ctx));
    };
    let result = converter.convert(content, direction);
    let converted = match (result.success, result.content) {
        (true, Some(content)) => content,
        _ => {
            let message = result
                .message
                .unwrap_or_else(|| "Conversion failed".to_string());
            tracing::warn!(%message, "mode switch rejected");
            return Err(Error::Conversion { message });
        }
    };

    Ok(Transition::new(
        ctx.with_mode(mode),
        vec![
            SurfaceCommand::SetEditorLanguage { mode },
            SurfaceCommand::SetEditorContent { content: converted },
        ],
    ))
}
