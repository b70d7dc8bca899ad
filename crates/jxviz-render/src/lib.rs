#![forbid(unsafe_code)]

//! Presentation engine for JSON/XML node-link diagrams.
//!
//! Given a [`jxviz_core::DiagramGraph`] and a [`SessionContext`], this crate derives everything a
//! host renderer needs to paint the diagram (node boxes, annotation offsets, icon descriptors,
//! palette colours) and turns user actions (search, collapse, rotate, theme, view toggles) into
//! [`Transition`]s carrying [`SurfaceCommand`]s for the host to apply.

pub mod annotations;
pub mod details;
pub mod error;
pub mod expand_collapse;
pub mod geom;
pub mod search;
pub mod session;
pub mod sizing;
pub mod style;
pub mod surface;
pub mod text;
pub mod theme;
pub mod value;

pub use annotations::{HorizontalAlignment, StyledAnnotation, TextStyle, place_annotations};
pub use details::{DetailsBlock, DetailsLine, DetailsSpan, format_path};
pub use error::{Error, Result};
pub use expand_collapse::{
    CollapseState, IconDescriptor, IconShape, icon_offset, rotate_orientation, toggle_collapse,
    toggle_node,
};
pub use geom::{Margin, Point};
pub use search::{HighlightKind, SearchState};
pub use session::{SessionContext, Transition, ViewOptions};
pub use sizing::{LayoutConstants, NodeSize, size_node};
pub use style::{
    NodeShape, StyledConnector, StyledDiagram, StyledNode, style_connector, style_diagram,
    style_node,
};
pub use surface::{DiagramSurface, SurfaceCommand};
pub use text::{DeterministicTextMeasurer, FontSpec, TextMeasurer, TextMetrics};
pub use theme::{ALERT_COLOR, ColorRole, Theme, ThemeSettings, set_theme};
pub use value::{ValueKind, classify, format_display, value_color_role};
