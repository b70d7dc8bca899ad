//! Pure styling hooks: model in, styled output out.
//!
//! A host renderer calls these for every node/connector on each layout pass and paints the
//! result. Nothing here touches the model or the session.

use jxviz_core::{Connector, DiagramGraph, Node, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

use crate::annotations::{StyledAnnotation, place_annotations};
use crate::expand_collapse::{IconDescriptor, icon_pair};
use crate::search::HighlightKind;
use crate::session::SessionContext;
use crate::sizing::size_node;
use crate::text::TextMeasurer;

pub const CONNECTOR_STROKE_WIDTH: f64 = 2.0;
pub const CONNECTOR_CORNER_RADIUS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
    Ellipse,
    Rectangle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub shape: NodeShape,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    /// Text lines laid out inside the node.
    pub lines: usize,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub highlight: HighlightKind,
    pub annotations: Vec<StyledAnnotation>,
    pub expand_icon: IconDescriptor,
    pub collapse_icon: IconDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
}

impl StyledNode {
    /// The icon currently shown: the minus while expanded, the plus while collapsed.
    pub fn active_icon(&self) -> Option<&IconDescriptor> {
        let icon = match self.is_expanded? {
            true => &self.expand_icon,
            false => &self.collapse_icon,
        };
        icon.visible.then_some(icon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectorRouting {
    Orthogonal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledConnector {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub routing: ConnectorRouting,
    pub corner_radius: f64,
    pub stroke: String,
    pub stroke_width: f64,
    /// Connectors are drawn without a target decorator.
    pub arrowhead: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledDiagram {
    pub background: String,
    pub gridlines: String,
    pub show_grid: bool,
    pub nodes: Vec<StyledNode>,
    pub connectors: Vec<StyledConnector>,
}

pub fn style_node(node: &Node, ctx: &SessionContext, measurer: &dyn TextMeasurer) -> StyledNode {
    let size = size_node(node, ctx.constants(), measurer);
    let annotations = place_annotations(node, &size, ctx, measurer);
    let (expand_icon, collapse_icon) = icon_pair(node, &size, ctx);

    let highlight = ctx.search().highlight(node.id.as_str());
    let (fill, stroke, stroke_width) = highlight.node_style(ctx.theme());

    StyledNode {
        id: node.id.clone(),
        kind: node.kind,
        shape: match node.kind {
            NodeKind::Root => NodeShape::Ellipse,
            _ => NodeShape::Rectangle,
        },
        width: size.width,
        height: size.height,
        corner_radius: ctx.constants().corner_radius,
        lines: size.lines,
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        stroke_width,
        highlight,
        annotations,
        expand_icon,
        collapse_icon,
        is_expanded: node.is_expanded,
    }
}

pub fn style_connector(connector: &Connector, ctx: &SessionContext) -> StyledConnector {
    StyledConnector {
        id: connector.id.clone(),
        source: connector.source.clone(),
        target: connector.target.clone(),
        routing: ConnectorRouting::Orthogonal,
        corner_radius: CONNECTOR_CORNER_RADIUS,
        stroke: ctx.theme().connector_stroke_color.clone(),
        stroke_width: CONNECTOR_STROKE_WIDTH,
        arrowhead: false,
    }
}

pub fn style_diagram(
    graph: &DiagramGraph,
    ctx: &SessionContext,
    measurer: &dyn TextMeasurer,
) -> StyledDiagram {
    let theme = ctx.theme();
    StyledDiagram {
        background: theme.diagram_background_color.clone(),
        gridlines: theme.gridlines_color.clone(),
        show_grid: ctx.view().show_grid,
        nodes: graph
            .nodes()
            .map(|n| style_node(n, ctx, measurer))
            .collect(),
        connectors: graph
            .connectors()
            .iter()
            .map(|c| style_connector(c, ctx))
            .collect(),
    }
}
