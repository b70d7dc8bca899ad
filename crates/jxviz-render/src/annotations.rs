//! Placement and colouring of the text annotations inside a node.
//!
//! Offsets are normalised against the node box (see [`Point`]); the horizontal math divides
//! measured pixel widths by the node width computed by [`crate::sizing::size_node`].

use jxviz_core::{Annotation, AnnotationRole, Node, NodeKind};
use serde::{Deserialize, Serialize};

use crate::geom::{Margin, Point};
use crate::session::SessionContext;
use crate::sizing::NodeSize;
use crate::text::TextMeasurer;
use crate::theme::ColorRole;
use crate::value::{format_display, value_color_role};

/// Extra gap between a key and its value, on top of the annotation margin.
pub const VALUE_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledAnnotation {
    pub role: AnnotationRole,
    /// Display text (values are passed through the value formatter once placed).
    pub content: String,
    /// `None` leaves the annotation at the renderer's default position.
    pub offset: Option<Point>,
    pub margin: Margin,
    pub horizontal_alignment: HorizontalAlignment,
    pub visible: bool,
    pub color_role: ColorRole,
    pub style: TextStyle,
}

impl StyledAnnotation {
    fn unplaced(annotation: &Annotation, color_role: ColorRole, ctx: &SessionContext) -> Self {
        Self {
            role: annotation.role,
            content: annotation.content.clone(),
            offset: None,
            margin: Margin::default(),
            horizontal_alignment: HorizontalAlignment::Center,
            visible: true,
            color_role,
            style: text_style(ctx, color_role),
        }
    }
}

fn text_style(ctx: &SessionContext, role: ColorRole) -> TextStyle {
    let font = &ctx.constants().font;
    TextStyle {
        font_size: font.font_size,
        font_family: font.font_family.clone(),
        color: ctx.theme().color(role).to_string(),
    }
}

fn default_color_role(annotation: &Annotation) -> ColorRole {
    match annotation.role {
        AnnotationRole::Key => ColorRole::Key,
        AnnotationRole::Value => value_color_role(&annotation.content),
        AnnotationRole::Count => ColorRole::Count,
    }
}

pub fn place_annotations(
    node: &Node,
    size: &NodeSize,
    ctx: &SessionContext,
    measurer: &dyn TextMeasurer,
) -> Vec<StyledAnnotation> {
    match node.kind {
        NodeKind::Root => Vec::new(),
        NodeKind::Leaf => place_leaf(node, size, ctx, measurer),
        NodeKind::Parent if is_key_count_pair(node) => place_parent(node, ctx),
        NodeKind::Parent => node
            .annotations
            .iter()
            .map(|a| StyledAnnotation::unplaced(a, default_color_role(a), ctx))
            .collect(),
    }
}

fn is_key_count_pair(node: &Node) -> bool {
    matches!(
        node.annotations.as_slice(),
        [key, count] if key.role == AnnotationRole::Key && count.role == AnnotationRole::Count
    )
}

fn place_leaf(
    node: &Node,
    size: &NodeSize,
    ctx: &SessionContext,
    measurer: &dyn TextMeasurer,
) -> Vec<StyledAnnotation> {
    let font = &ctx.constants().font;
    let margin = ctx.constants().annotation_margin;
    let width = size.width;

    let key_lines = node.annotations_with_role(AnnotationRole::Key).count();
    let spacing = if key_lines > 0 {
        1.0 / (key_lines as f64 + 1.0)
    } else {
        0.5
    };

    // One line per key; a value shares the line of the key right before it.
    let mut line = 0usize;
    let mut out = Vec::with_capacity(node.annotations.len());
    for (idx, annotation) in node.annotations.iter().enumerate() {
        match annotation.role {
            AnnotationRole::Key => {
                line += 1;
                let y = line as f64 * spacing;
                let key_width = measurer.width(&annotation.content, font);
                let mut styled = StyledAnnotation::unplaced(annotation, ColorRole::Key, ctx);
                styled.offset = Some(Point::new(key_width / 2.0 / width + margin / width, y));
                out.push(styled);
            }
            AnnotationRole::Value => {
                let preceding_key = idx
                    .checked_sub(1)
                    .map(|prev| &node.annotations[prev])
                    .filter(|prev| prev.role == AnnotationRole::Key);
                let mut styled = StyledAnnotation::unplaced(
                    annotation,
                    value_color_role(&annotation.content),
                    ctx,
                );
                match preceding_key {
                    Some(key) => {
                        let key_half = measurer.width(&key.content, font) / 2.0 / width;
                        let value_half = measurer.width(&annotation.content, font) / 2.0 / width;
                        let x = key_half * 2.0 + value_half + (margin + VALUE_GAP) / width;
                        styled.offset = Some(Point::new(x, line as f64 * spacing));
                        styled.content = format_display(&annotation.content);
                    }
                    None if key_lines > 0 => {
                        tracing::warn!(
                            node = %node.id,
                            index = idx,
                            "value without a preceding key left unplaced"
                        );
                    }
                    None => {}
                }
                out.push(styled);
            }
            AnnotationRole::Count => {
                out.push(StyledAnnotation::unplaced(annotation, ColorRole::Count, ctx));
            }
        }
    }
    out
}

fn place_parent(node: &Node, ctx: &SessionContext) -> Vec<StyledAnnotation> {
    let margin = ctx.constants().annotation_margin;
    let icon_width = ctx.constants().expand_icon_width;
    let show_count = ctx.view().show_child_count;
    let show_icons = ctx.view().show_expand_collapse;

    let [key, count] = node.annotations.as_slice() else {
        return Vec::new();
    };

    let mut key = StyledAnnotation::unplaced(key, ColorRole::Key, ctx);
    if show_count {
        key.offset = Some(Point::new(0.0, 0.5));
        key.margin = Margin::left(margin);
        key.horizontal_alignment = HorizontalAlignment::Left;
    } else {
        key.offset = Some(Point::new(0.5, 0.5));
        key.margin = Margin::left(if show_icons { -margin } else { 0.0 });
        key.horizontal_alignment = HorizontalAlignment::Center;
    }

    let mut count = StyledAnnotation::unplaced(count, ColorRole::Count, ctx);
    if show_count {
        count.offset = Some(Point::new(1.0, 0.5));
        count.margin = Margin::right(margin + if show_icons { icon_width } else { 0.0 });
        count.horizontal_alignment = HorizontalAlignment::Right;
    } else {
        count.visible = false;
    }

    vec![key, count]
}
