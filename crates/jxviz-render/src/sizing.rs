use jxviz_core::{AnnotationRole, Node, NodeKind, ViewerConfig};
use serde::{Deserialize, Serialize};

use crate::text::{FontSpec, TextMeasurer};
use crate::{Error, Result};

pub const MIN_NODE_WIDTH: f64 = 50.0;
pub const MIN_NODE_HEIGHT: f64 = 40.0;
pub const ROOT_NODE_SIZE: f64 = 40.0;

/// Fixed geometry inputs of node sizing and annotation placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstants {
    pub font: FontSpec,
    pub line_height: f64,
    /// Used both as the horizontal padding of a node and as the annotation margin.
    pub annotation_margin: f64,
    pub expand_icon_width: f64,
    pub corner_radius: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            line_height: 16.0,
            annotation_margin: 10.0,
            expand_icon_width: 36.0,
            corner_radius: 3.0,
        }
    }
}

impl LayoutConstants {
    /// Reads the `node.*` section of a viewer config; absent keys keep their defaults.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        let mut out = Self::default();
        if let Some(font) = config.get_str("node.font") {
            out.font = font.parse()?;
        }
        let number = |path: &str, slot: &mut f64| -> Result<()> {
            if let Some(v) = config.get_f64(path) {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(Error::InvalidConfig {
                        path: path.to_string(),
                        message: format!("expected a non-negative number, got {v}"),
                    });
                }
                *slot = v;
            }
            Ok(())
        };
        number("node.lineHeight", &mut out.line_height)?;
        number("node.annotationMargin", &mut out.annotation_margin)?;
        number("node.expandIconWidth", &mut out.expand_icon_width)?;
        number("node.cornerRadius", &mut out.corner_radius)?;
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
    /// Text lines inside the node: key/value pairs for leaves, 1 for parents, 0 for the root.
    pub lines: usize,
}

/// Computes a node's box from its annotation text.
///
/// Degenerate annotation lists never fail: missing keys/values/counts measure as empty text.
pub fn size_node(
    node: &Node,
    constants: &LayoutConstants,
    measurer: &dyn TextMeasurer,
) -> NodeSize {
    let font = &constants.font;
    let padding = constants.annotation_margin;

    let (text_width, lines, icon_room) = match node.kind {
        NodeKind::Root => {
            return NodeSize {
                width: ROOT_NODE_SIZE,
                height: ROOT_NODE_SIZE,
                lines: 0,
            };
        }
        NodeKind::Leaf => {
            let pairs = node.key_value_pairs();
            let mut max_width = pairs
                .iter()
                .map(|(key, value)| measurer.width(&format!("{key}   {value}"), font))
                .fold(0.0_f64, f64::max);
            if pairs.is_empty() {
                let content = node
                    .annotations
                    .first()
                    .map(|a| a.content.as_str())
                    .filter(|c| !c.is_empty())
                    .unwrap_or(" ");
                max_width = max_width.max(measurer.width(content, font));
            }
            (max_width, pairs.len(), 0.0)
        }
        NodeKind::Parent => {
            let key = node
                .annotations_with_role(AnnotationRole::Key)
                .next()
                .map(|a| a.content.as_str())
                .unwrap_or("");
            let count = node
                .annotations_with_role(AnnotationRole::Count)
                .next()
                .map(|a| a.content.as_str())
                .unwrap_or("");
            (
                measurer.width(&format!("{key}{count}"), font),
                1,
                constants.expand_icon_width * 2.0,
            )
        }
    };

    NodeSize {
        width: (text_width + padding + icon_room).max(MIN_NODE_WIDTH),
        height: (lines as f64 * constants.line_height + padding * 2.0).max(MIN_NODE_HEIGHT),
        lines,
    }
}
