//! Case-insensitive node search with a cyclic match cursor.

use jxviz_core::{DiagramGraph, NodeId};
use serde::{Deserialize, Serialize};

use crate::session::{SessionContext, Transition};
use crate::surface::SurfaceCommand;
use crate::theme::ThemeSettings;

pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;
pub const FOCUSED_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightKind {
    Default,
    Matched,
    Focused,
}

impl HighlightKind {
    /// `(fill, stroke, stroke width)` for this highlight in the given palette.
    pub fn node_style(self, theme: &ThemeSettings) -> (&str, &str, f64) {
        match self {
            Self::Default => (
                theme.node_fill_color.as_str(),
                theme.node_stroke_color.as_str(),
                DEFAULT_STROKE_WIDTH,
            ),
            Self::Matched => (
                theme.highlight_fill_color.as_str(),
                theme.highlight_stroke_color.as_str(),
                DEFAULT_STROKE_WIDTH,
            ),
            Self::Focused => (
                theme.highlight_focus_color.as_str(),
                theme.highlight_stroke_color.as_str(),
                FOCUSED_STROKE_WIDTH,
            ),
        }
    }
}

/// Matches of the current query in diagram enumeration order.
///
/// `cursor` is `Some` exactly when `matches` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub matches: Vec<NodeId>,
    pub cursor: Option<usize>,
}

impl SearchState {
    pub fn search(query: &str, graph: &DiagramGraph) -> Self {
        if query.is_empty() {
            return Self::default();
        }
        let needle = query.to_lowercase();
        let matches = graph
            .nodes()
            .filter(|n| n.data.to_lowercase().contains(&needle))
            .map(|n| n.id.clone())
            .collect::<Vec<_>>();
        let cursor = (!matches.is_empty()).then_some(0);
        Self {
            query: query.to_string(),
            matches,
            cursor,
        }
    }

    /// Moves the cursor to the next match, wrapping after the last one.
    pub fn advance(&self) -> Self {
        let mut next = self.clone();
        if let Some(cursor) = self.cursor {
            next.cursor = Some((cursor + 1) % self.matches.len());
        }
        next
    }

    pub fn reset() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&NodeId> {
        self.matches.get(self.cursor?)
    }

    pub fn highlight(&self, id: &str) -> HighlightKind {
        if self.focused().is_some_and(|f| f.as_str() == id) {
            HighlightKind::Focused
        } else if self.matches.iter().any(|m| m.as_str() == id) {
            HighlightKind::Matched
        } else {
            HighlightKind::Default
        }
    }

    /// One-based `(current, total)`; `(0, 0)` without matches.
    pub fn counter(&self) -> (usize, usize) {
        match self.cursor {
            Some(cursor) => (cursor + 1, self.matches.len()),
            None => (0, 0),
        }
    }
}

fn node_style_command(id: &NodeId, kind: HighlightKind, theme: &ThemeSettings) -> SurfaceCommand {
    let (fill, stroke, stroke_width) = kind.node_style(theme);
    SurfaceCommand::SetNodeStyle {
        node: id.clone(),
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        stroke_width,
    }
}

fn reset_styles(
    graph: &DiagramGraph,
    theme: &ThemeSettings,
) -> impl Iterator<Item = SurfaceCommand> {
    graph
        .nodes()
        .map(move |n| node_style_command(&n.id, HighlightKind::Default, theme))
}

fn highlight_commands(state: &SearchState, theme: &ThemeSettings) -> Vec<SurfaceCommand> {
    let mut commands = state
        .matches
        .iter()
        .map(|id| node_style_command(id, state.highlight(id.as_str()), theme))
        .collect::<Vec<_>>();
    if let Some(focused) = state.focused() {
        commands.push(SurfaceCommand::BringToCenter {
            node: focused.clone(),
        });
    }
    commands
}

fn counter_command(state: &SearchState) -> SurfaceCommand {
    let (current, total) = state.counter();
    SurfaceCommand::UpdateSearchCounter {
        current,
        total,
        visible: !state.query.trim().is_empty(),
    }
}

/// Runs a new search, replacing any previous one.
pub fn search(ctx: &SessionContext, graph: &DiagramGraph, query: &str) -> Transition {
    let state = SearchState::search(query, graph);
    tracing::debug!(query, matches = state.matches.len(), "search");

    let theme = ctx.theme();
    let mut commands = vec![SurfaceCommand::ResetView];
    commands.extend(reset_styles(graph, theme));
    commands.extend(highlight_commands(&state, theme));
    commands.push(counter_command(&state));
    Transition::new(ctx.with_search(state), commands)
}

/// Focuses the next match. Without matches nothing happens.
pub fn advance(ctx: &SessionContext) -> Transition {
    if ctx.search().matches.is_empty() {
        return Transition::unchanged(ctx);
    }
    let state = ctx.search().advance();
    tracing::debug!(cursor = ?state.cursor, total = state.matches.len(), "search advance");

    let mut commands = highlight_commands(&state, ctx.theme());
    commands.push(counter_command(&state));
    Transition::new(ctx.with_search(state), commands)
}

/// Drops the query and every highlight.
pub fn clear(ctx: &SessionContext, graph: &DiagramGraph) -> Transition {
    let state = SearchState::reset();
    let mut commands = vec![SurfaceCommand::ClearSearchInput];
    commands.extend(reset_styles(graph, ctx.theme()));
    commands.push(counter_command(&state));
    Transition::new(ctx.with_search(state), commands)
}
