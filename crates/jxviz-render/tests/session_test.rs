use jxviz_core::{
    DefaultConverter, DiagramGraph, DocumentMode, ImageFormat, Node, NodeId, Orientation,
    ViewerConfig, load_document,
};
use jxviz_render::search::{self, SearchState};
use jxviz_render::session::{self, SessionContext};
use jxviz_render::{
    DeterministicTextMeasurer, Error, HighlightKind, SurfaceCommand, Theme, ThemeSettings,
    icon_offset, rotate_orientation, set_theme, style_node, toggle_collapse, toggle_node,
};
use serde_json::json;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture_graph() -> DiagramGraph {
    let text = std::fs::read_to_string(workspace_root().join("fixtures/json/basic.json"))
        .expect("fixture");
    load_document(&text, DocumentMode::Json).expect("load ok")
}

fn ids(items: &[NodeId]) -> Vec<&str> {
    items.iter().map(NodeId::as_str).collect()
}

#[test]
fn search_collects_matches_in_node_order() {
    let graph = fixture_graph();
    let state = SearchState::search("FOO", &graph);
    assert_eq!(ids(&state.matches), vec!["node-1", "node-3", "node-6"]);
    assert_eq!(state.cursor, Some(0));
    assert_eq!(state.counter(), (1, 3));
    assert_eq!(state.highlight("node-1"), HighlightKind::Focused);
    assert_eq!(state.highlight("node-3"), HighlightKind::Matched);
    assert_eq!(state.highlight("node-2"), HighlightKind::Default);
}

#[test]
fn advance_cycles_through_every_match() {
    let graph = fixture_graph();
    let start = SearchState::search("foo", &graph);
    let m = start.matches.len();
    assert!(m > 0);

    let mut state = start.clone();
    let mut focused = Vec::new();
    for _ in 0..m {
        focused.push(state.focused().cloned().unwrap());
        state = state.advance();
    }
    assert_eq!(state.cursor, Some(0));
    assert_eq!(focused, start.matches);
}

#[test]
fn empty_query_has_no_matches_and_no_cursor() {
    let graph = fixture_graph();
    let state = SearchState::search("", &graph);
    assert!(state.matches.is_empty());
    assert_eq!(state.cursor, None);
    assert_eq!(state.advance(), state);

    let none = SearchState::search("zzz-not-there", &graph);
    assert!(none.matches.is_empty());
    assert_eq!(none.cursor, None);
    assert_eq!(none.counter(), (0, 0));
}

#[test]
fn search_transition_highlights_and_centres_the_focused_node() {
    let graph = fixture_graph();
    let ctx = SessionContext::new();
    let theme = ctx.theme().clone();

    let t = search::search(&ctx, &graph, "foo");
    assert_eq!(t.commands.first(), Some(&SurfaceCommand::ResetView));
    assert!(t.commands.contains(&SurfaceCommand::SetNodeStyle {
        node: NodeId::new("node-1"),
        fill: theme.highlight_focus_color.clone(),
        stroke: theme.highlight_stroke_color.clone(),
        stroke_width: 2.0,
    }));
    assert!(t.commands.contains(&SurfaceCommand::SetNodeStyle {
        node: NodeId::new("node-6"),
        fill: theme.highlight_fill_color.clone(),
        stroke: theme.highlight_stroke_color.clone(),
        stroke_width: 1.5,
    }));
    assert!(t.commands.contains(&SurfaceCommand::BringToCenter {
        node: NodeId::new("node-1"),
    }));
    assert_eq!(
        t.commands.last(),
        Some(&SurfaceCommand::UpdateSearchCounter {
            current: 1,
            total: 3,
            visible: true,
        })
    );

    let measurer = DeterministicTextMeasurer::default();
    let focused = style_node(graph.node("node-1").unwrap(), &t.context, &measurer);
    assert_eq!(focused.fill, theme.highlight_focus_color);

    let next = search::advance(&t.context);
    assert_eq!(next.context.search().cursor, Some(1));
    assert!(next.commands.contains(&SurfaceCommand::BringToCenter {
        node: NodeId::new("node-3"),
    }));

    let cleared = search::search(&next.context, &graph, "");
    assert!(cleared.context.search().matches.is_empty());
    assert!(!cleared
        .commands
        .iter()
        .any(|c| matches!(c, SurfaceCommand::BringToCenter { .. })));
    for node in graph.nodes() {
        let styled = style_node(node, &cleared.context, &measurer);
        assert_eq!(styled.highlight, HighlightKind::Default);
        assert_eq!(styled.fill, theme.node_fill_color);
        assert_eq!(styled.stroke, theme.node_stroke_color);
    }
}

#[test]
fn advance_without_matches_is_a_noop() {
    let ctx = SessionContext::new();
    let t = search::advance(&ctx);
    assert!(t.is_noop());
    assert_eq!(t.context, ctx);
}

#[test]
fn theme_round_trip_restores_the_palette() {
    let graph = fixture_graph();
    let ctx = SessionContext::new();
    let original = ctx.theme().clone();

    let dark = set_theme(&ctx, &graph, Theme::Dark);
    assert_eq!(*dark.context.theme(), ThemeSettings::dark());
    assert!(dark.commands.contains(&SurfaceCommand::SetEditorTheme {
        name: "vs-dark".to_string(),
    }));
    assert!(dark
        .commands
        .contains(&SurfaceCommand::SetDarkMode { enabled: true }));
    assert!(dark.commands.contains(&SurfaceCommand::SetBackground {
        color: "#1e1e1e".to_string(),
    }));
    assert!(dark.commands.contains(&SurfaceCommand::ClearSearchInput));

    let light = set_theme(&dark.context, &graph, Theme::Light);
    assert_eq!(*light.context.theme(), original);
}

#[test]
fn selecting_the_active_theme_does_nothing() {
    let graph = fixture_graph();
    let ctx = SessionContext::new();
    let t = set_theme(&ctx, &graph, Theme::Light);
    assert!(t.is_noop());
    assert!(std::sync::Arc::ptr_eq(
        &t.context.theme_arc(),
        &ctx.theme_arc()
    ));
}

#[test]
fn theme_switch_clears_search_highlighting() {
    let graph = fixture_graph();
    let searched = search::search(&SessionContext::new(), &graph, "foo").context;
    assert!(!searched.search().matches.is_empty());

    let t = set_theme(&searched, &graph, Theme::Dark);
    assert!(t.context.search().matches.is_empty());
    assert!(t.commands.contains(&SurfaceCommand::SetNodeStyle {
        node: NodeId::new("node-1"),
        fill: ThemeSettings::dark().node_fill_color,
        stroke: ThemeSettings::dark().node_stroke_color,
        stroke_width: 1.5,
    }));
}

#[test]
fn four_rotations_return_to_the_start() {
    let graph = fixture_graph();
    let ctx = SessionContext::new();
    let start = ctx.orientation();
    let start_offset = icon_offset(start);

    let mut cur = ctx;
    let mut seen = Vec::new();
    for _ in 0..4 {
        let t = rotate_orientation(&cur, &graph);
        let offsets = t
            .commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::SetIconOffset { .. }))
            .count();
        assert_eq!(offsets, 2, "one offset per parent node");
        assert_eq!(t.commands.last(), Some(&SurfaceCommand::FitToPage));
        cur = t.context;
        seen.push(cur.orientation());
    }
    assert_eq!(
        seen,
        vec![
            Orientation::TopToBottom,
            Orientation::RightToLeft,
            Orientation::BottomToTop,
            Orientation::LeftToRight,
        ]
    );
    assert_eq!(cur.orientation(), start);
    assert_eq!(icon_offset(cur.orientation()), start_offset);
}

#[test]
fn collapse_then_expand_restores_every_node() {
    let mut graph = fixture_graph();
    let before = graph
        .nodes()
        .map(|n| (n.id.clone(), n.is_expanded))
        .collect::<Vec<_>>();
    let ctx = SessionContext::new();
    assert_eq!(ctx.collapse().menu_label(), "Collapse Graph");

    let collapsed = toggle_collapse(&ctx, &mut graph);
    assert!(collapsed.context.collapse().is_graph_collapsed);
    assert!(collapsed.commands.contains(&SurfaceCommand::SetCollapseMenuLabel {
        label: "Expand Graph".to_string(),
    }));
    // The root has no icon, so its direct children collapse instead.
    for id in ["node-1", "node-2", "node-5"] {
        assert_eq!(graph.node(id).unwrap().is_expanded, Some(false), "{id}");
    }
    assert_eq!(graph.node("node-3").unwrap().is_expanded, Some(true));
    assert_eq!(graph.node("main-root").unwrap().is_expanded, None);

    let expanded = toggle_collapse(&collapsed.context, &mut graph);
    assert!(!expanded.context.collapse().is_graph_collapsed);
    let after = graph
        .nodes()
        .map(|n| (n.id.clone(), n.is_expanded))
        .collect::<Vec<_>>();
    assert_eq!(before, after);
}

#[test]
fn graph_expand_keeps_nodes_collapsed_by_hand() {
    let mut graph = fixture_graph();
    let ctx = SessionContext::new();
    toggle_node(&ctx, &mut graph, "node-3");
    let before = graph
        .nodes()
        .map(|n| (n.id.clone(), n.is_expanded))
        .collect::<Vec<_>>();
    assert_eq!(graph.node("node-3").unwrap().is_expanded, Some(false));

    let collapsed = toggle_collapse(&ctx, &mut graph);
    assert_eq!(
        ids(&collapsed.context.collapse().collapsed),
        vec!["node-1", "node-2", "node-5"]
    );
    let expanded = toggle_collapse(&collapsed.context, &mut graph);
    assert!(expanded.context.collapse().collapsed.is_empty());
    assert!(!expanded.commands.contains(&SurfaceCommand::SetNodeExpanded {
        node: NodeId::new("node-3"),
        expanded: true,
    }));

    let after = graph
        .nodes()
        .map(|n| (n.id.clone(), n.is_expanded))
        .collect::<Vec<_>>();
    assert_eq!(before, after);
}

#[test]
fn collapsible_graph_roots_collapse_themselves() {
    let mut graph = DiagramGraph::new();
    graph.add_node(Node::parent("p", "items", "[1]"));
    graph.add_node(Node::scalar("c", "1"));
    graph.add_connector(&NodeId::new("p"), &NodeId::new("c"));

    let ctx = SessionContext::new();
    toggle_collapse(&ctx, &mut graph);
    assert_eq!(graph.node("p").unwrap().is_expanded, Some(false));
    assert_eq!(graph.node("c").unwrap().is_expanded, Some(true));

    let mut graph_without_icons = DiagramGraph::new();
    graph_without_icons.add_node(Node::parent("p", "items", "[1]"));
    graph_without_icons.add_node(Node::scalar("c", "1"));
    graph_without_icons.add_connector(&NodeId::new("p"), &NodeId::new("c"));
    let no_icons = session::toggle_expand_collapse(&ctx).context;
    toggle_collapse(&no_icons, &mut graph_without_icons);
    assert_eq!(graph_without_icons.node("p").unwrap().is_expanded, Some(true));
    assert_eq!(graph_without_icons.node("c").unwrap().is_expanded, Some(false));
}

#[test]
fn single_node_toggle_ignores_the_root() {
    let mut graph = fixture_graph();
    let ctx = SessionContext::new();

    let t = toggle_node(&ctx, &mut graph, "node-2");
    assert_eq!(
        t.commands,
        vec![SurfaceCommand::SetNodeExpanded {
            node: NodeId::new("node-2"),
            expanded: false,
        }]
    );
    assert!(toggle_node(&ctx, &mut graph, "main-root").is_noop());
    assert!(toggle_node(&ctx, &mut graph, "missing").is_noop());
}

#[test]
fn view_toggles_flip_one_option_each() {
    let ctx = SessionContext::new();

    let grid = session::toggle_grid(&ctx);
    assert!(!grid.context.view().show_grid);
    assert_eq!(
        grid.commands,
        vec![SurfaceCommand::SetGridVisible { visible: false }]
    );

    let count = session::toggle_child_count(&ctx);
    assert!(!count.context.view().show_child_count);
    assert!(count.context.view().show_grid);
    assert_eq!(count.commands, vec![SurfaceCommand::Refresh]);

    let icons = session::toggle_expand_collapse(&count.context);
    assert!(!icons.context.view().show_expand_collapse);
    assert!(!icons.context.view().show_child_count);
}

#[test]
fn image_export_defaults_to_png_diagram() {
    let ctx = SessionContext::new();
    let t = session::export_image(&ctx, Some("  "), None);
    let [SurfaceCommand::ExportDiagram { request }] = t.commands.as_slice() else {
        panic!("expected one export command, got {:?}", t.commands);
    };
    assert_eq!(request.file_name, "Diagram");
    assert_eq!(request.format, ImageFormat::Png);

    let t = session::export_image(&ctx, Some("tree"), Some(ImageFormat::Svg));
    let value = serde_json::to_value(&t.commands[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "command": "exportDiagram",
            "request": { "fileName": "tree", "format": "SVG", "region": "Content" }
        })
    );
}

#[test]
fn mode_switch_converts_the_editor_content() {
    let ctx = SessionContext::new();
    let converter = DefaultConverter::new();

    let t = session::switch_mode(&ctx, r#"{"a": 1}"#, DocumentMode::Xml, &converter).unwrap();
    assert_eq!(t.context.mode(), DocumentMode::Xml);
    assert_eq!(
        t.commands,
        vec![
            SurfaceCommand::SetEditorLanguage {
                mode: DocumentMode::Xml
            },
            SurfaceCommand::SetEditorContent {
                content: "<a>1</a>".to_string()
            },
        ]
    );

    let same = session::switch_mode(&ctx, "{}", DocumentMode::Json, &converter).unwrap();
    assert!(same.is_noop());

    let err = session::switch_mode(&ctx, "   ", DocumentMode::Xml, &converter).unwrap_err();
    assert_eq!(err.to_string(), "Content is empty");
}

#[test]
fn context_is_derived_from_config() {
    let config = ViewerConfig::with_overrides(&json!({
        "theme": "dark",
        "layout": { "orientation": "TopToBottom" },
        "view": { "showChildCount": false },
        "node": { "lineHeight": 20 }
    }));
    let ctx = SessionContext::from_config(&config).unwrap();
    assert_eq!(ctx.theme().theme, Theme::Dark);
    assert_eq!(ctx.orientation(), Orientation::TopToBottom);
    assert!(!ctx.view().show_child_count);
    assert!(ctx.view().show_grid);
    assert_eq!(ctx.constants().line_height, 20.0);
    assert_eq!(ctx.constants().annotation_margin, 10.0);

    let initial = ctx.initial_commands();
    assert!(initial.contains(&SurfaceCommand::SetLayoutOrientation {
        orientation: Orientation::TopToBottom
    }));

    let bad_theme = ViewerConfig::with_overrides(&json!({ "theme": "neon" }));
    assert!(matches!(
        SessionContext::from_config(&bad_theme),
        Err(Error::UnknownTheme { .. })
    ));
    let bad_height = ViewerConfig::with_overrides(&json!({ "node": { "lineHeight": -1 } }));
    assert!(matches!(
        SessionContext::from_config(&bad_height),
        Err(Error::InvalidConfig { .. })
    ));
}
