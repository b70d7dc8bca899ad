//! Instructions a host applies to its diagram, editor and page surfaces.
//!
//! Transitions never touch a surface directly; they return [`SurfaceCommand`]s in the order the
//! host must apply them.

use jxviz_core::{DocumentMode, ImageExportRequest, NodeId, Orientation};
use serde::{Deserialize, Serialize};

use crate::geom::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SurfaceCommand {
    /// Repaint the diagram from the current styling hooks.
    Refresh,
    FitToPage,
    /// Reset pan and zoom.
    ResetView,
    SetBackground {
        color: String,
    },
    SetGridlineColor {
        color: String,
    },
    SetGridVisible {
        visible: bool,
    },
    SetEditorTheme {
        name: String,
    },
    SetDarkMode {
        enabled: bool,
    },
    SetStylesheetHref {
        href: String,
    },
    SetLayoutOrientation {
        orientation: Orientation,
    },
    SetIconOffset {
        node: NodeId,
        offset: Point,
    },
    SetNodeExpanded {
        node: NodeId,
        expanded: bool,
    },
    SetCollapseMenuLabel {
        label: String,
    },
    SetNodeStyle {
        node: NodeId,
        fill: String,
        stroke: String,
        stroke_width: f64,
    },
    BringToCenter {
        node: NodeId,
    },
    /// `current / total` search counter; hidden while the query is blank.
    UpdateSearchCounter {
        current: usize,
        total: usize,
        visible: bool,
    },
    ClearSearchInput,
    SetEditorLanguage {
        mode: DocumentMode,
    },
    /// Replace the editor text.
    SetEditorContent {
        content: String,
    },
    ExportDiagram {
        request: ImageExportRequest,
    },
}

/// A host-side surface (diagram widget, editor, page chrome).
///
/// Commands a surface does not support are ignored, as are all commands sent to a surface that
/// does not exist (`Option::None`).
pub trait DiagramSurface {
    fn apply(&mut self, command: &SurfaceCommand);

    fn apply_all(&mut self, commands: &[SurfaceCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

impl<S: DiagramSurface + ?Sized> DiagramSurface for &mut S {
    fn apply(&mut self, command: &SurfaceCommand) {
        (**self).apply(command);
    }
}

impl<S: DiagramSurface> DiagramSurface for Option<S> {
    fn apply(&mut self, command: &SurfaceCommand) {
        if let Some(surface) = self {
            surface.apply(command);
        }
    }
}

/// Records every command; handy for hosts that replay or serialize them.
impl DiagramSurface for Vec<SurfaceCommand> {
    fn apply(&mut self, command: &SurfaceCommand) {
        self.push(command.clone());
    }
}
