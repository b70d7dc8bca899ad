//! Expand/collapse affordances, the graph-wide collapse toggle and layout rotation.

use jxviz_core::{DiagramGraph, Node, NodeId, NodeKind, Orientation};
use serde::{Deserialize, Serialize};

use crate::geom::{Margin, Point};
use crate::session::{SessionContext, Transition};
use crate::sizing::NodeSize;
use crate::surface::SurfaceCommand;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconShape {
    #[default]
    None,
    Minus,
    Plus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub shape: IconShape,
    pub visible: bool,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub margin: Margin,
    pub offset: Point,
    pub fill: String,
    pub border_color: String,
    pub icon_color: String,
}

impl IconDescriptor {
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Where the expand/collapse icon sits on the node box for a layout direction.
pub fn icon_offset(orientation: Orientation) -> Point {
    match orientation {
        Orientation::LeftToRight => Point::new(0.5, 1.0),
        Orientation::RightToLeft => Point::new(0.5, 0.0),
        Orientation::TopToBottom | Orientation::BottomToTop => Point::new(1.0, 0.5),
    }
}

/// Only parent nodes carry icons, and only while the feature is switched on.
pub fn has_icons(node: &Node, ctx: &SessionContext) -> bool {
    node.kind == NodeKind::Parent && ctx.view().show_expand_collapse
}

/// The `(expand, collapse)` icon pair of a node.
///
/// The expand slot shows a minus (clicking it collapses the expanded subtree), the collapse slot
/// a plus. Nodes without icons get two hidden `None` descriptors.
pub fn icon_pair(
    node: &Node,
    size: &NodeSize,
    ctx: &SessionContext,
) -> (IconDescriptor, IconDescriptor) {
    if !has_icons(node, ctx) {
        return (IconDescriptor::hidden(), IconDescriptor::hidden());
    }
    let constants = ctx.constants();
    let theme = ctx.theme();
    let icon = |shape| IconDescriptor {
        shape,
        visible: true,
        width: constants.expand_icon_width,
        height: size.height,
        corner_radius: constants.corner_radius,
        margin: Margin::right(constants.expand_icon_width / 2.0),
        offset: icon_offset(ctx.orientation()),
        fill: theme.expand_icon_fill_color.clone(),
        border_color: theme.expand_icon_border.clone(),
        icon_color: theme.expand_icon_color.clone(),
    };
    (icon(IconShape::Minus), icon(IconShape::Plus))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseState {
    pub is_graph_collapsed: bool,
    /// Nodes the last collapse pass changed; the expand pass restores exactly these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collapsed: Vec<NodeId>,
}

impl CollapseState {
    /// Label of the menu entry that triggers the next toggle.
    pub fn menu_label(&self) -> &'static str {
        if self.is_graph_collapsed {
            "Expand Graph"
        } else {
            "Collapse Graph"
        }
    }

    /// Applies one toggle to `graph` and returns the flipped state with the nodes it changed.
    ///
    /// Collapsing acts on graph roots: a root with an icon collapses itself, any other root
    /// collapses its direct children instead. Expanding re-expands only the nodes that the
    /// collapse pass changed, so nodes collapsed one by one beforehand stay collapsed.
    pub fn toggle(
        &self,
        graph: &mut DiagramGraph,
        icons_enabled: bool,
    ) -> (Self, Vec<(NodeId, bool)>) {
        let targets: Vec<NodeId> = if self.is_graph_collapsed {
            self.collapsed.clone()
        } else {
            let mut out = Vec::new();
            for root in graph.graph_roots() {
                if icons_enabled && root.kind == NodeKind::Parent {
                    out.push(root.id.clone());
                } else {
                    out.extend(graph.outgoing(root.id.as_str()).map(|c| c.target.clone()));
                }
            }
            out
        };

        let expanded = self.is_graph_collapsed;
        let mut changed = Vec::new();
        for id in targets {
            let Some(node) = graph.node_mut(id.as_str()) else {
                continue;
            };
            if node.is_expanded.is_some_and(|cur| cur != expanded) {
                node.is_expanded = Some(expanded);
                changed.push((id, expanded));
            }
        }

        let collapsed = if expanded {
            Vec::new()
        } else {
            changed.iter().map(|(id, _)| id.clone()).collect()
        };
        let next = Self {
            is_graph_collapsed: !self.is_graph_collapsed,
            collapsed,
        };
        (next, changed)
    }
}

pub fn toggle_collapse(ctx: &SessionContext, graph: &mut DiagramGraph) -> Transition {
    let (state, changed) = ctx
        .collapse()
        .toggle(graph, ctx.view().show_expand_collapse);
    tracing::debug!(
        collapsed = state.is_graph_collapsed,
        changed = changed.len(),
        "collapse toggle"
    );

    let mut commands = changed
        .into_iter()
        .map(|(node, expanded)| SurfaceCommand::SetNodeExpanded { node, expanded })
        .collect::<Vec<_>>();
    commands.push(SurfaceCommand::SetCollapseMenuLabel {
        label: state.menu_label().to_string(),
    });
    Transition::new(ctx.with_collapse(state), commands)
}

/// Flips a single node from its own icon. Root nodes and unknown ids change nothing.
pub fn toggle_node(ctx: &SessionContext, graph: &mut DiagramGraph, id: &str) -> Transition {
    match graph.toggle_expanded(id) {
        Some(expanded) => Transition::new(
            ctx.clone(),
            vec![SurfaceCommand::SetNodeExpanded {
                node: NodeId::new(id),
                expanded,
            }],
        ),
        None => Transition::unchanged(ctx),
    }
}

/// Advances the layout to the next orientation and moves every icon to match.
pub fn rotate_orientation(ctx: &SessionContext, graph: &DiagramGraph) -> Transition {
    let orientation = ctx.orientation().next();
    tracing::debug!(from = %ctx.orientation(), to = %orientation, "layout rotated");
    let next = ctx.with_orientation(orientation);

    let offset = icon_offset(orientation);
    let mut commands = vec![SurfaceCommand::SetLayoutOrientation { orientation }];
    commands.extend(
        graph
            .nodes()
            .filter(|n| has_icons(n, &next))
            .map(|n| SurfaceCommand::SetIconOffset {
                node: n.id.clone(),
                offset,
            }),
    );
    commands.push(SurfaceCommand::FitToPage);
    Transition::new(next, commands)
}
