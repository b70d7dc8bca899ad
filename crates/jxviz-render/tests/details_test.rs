use jxviz_core::{DocumentMode, load_document};
use jxviz_render::{
    DetailsBlock, DiagramSurface, SessionContext, SurfaceCommand, ThemeSettings, ValueKind,
    format_path, session,
};
use serde_json::json;

#[test]
fn key_value_blob_renders_as_an_object_block() {
    let block = DetailsBlock::parse("count: 3\nactive: true");
    let DetailsBlock::Object { lines } = &block else {
        panic!("expected an object block, got {block:?}");
    };
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].key, "\"count\"");
    assert_eq!(lines[0].value, "3");
    assert_eq!(lines[0].kind, ValueKind::Numeric);
    assert!(lines[0].trailing_comma);
    assert_eq!(lines[1].value, "true");
    assert_eq!(lines[1].kind, ValueKind::Boolean(true));
    assert!(!lines[1].trailing_comma);

    let plain = block.to_plain_text();
    assert_eq!(plain, "{\n    \"count\": 3,\n    \"active\": true\n}");
    let parsed: serde_json::Value = serde_json::from_str(&plain).unwrap();
    assert_eq!(parsed, json!({ "count": 3, "active": true }));
}

#[test]
fn spans_spell_out_the_plain_text() {
    let theme = ThemeSettings::dark();
    for raw in [
        "count: 3\nactive: true",
        "name: \"quoted\"\nurl: http://example.com\nempty: ",
        "just a scalar",
        "",
    ] {
        let block = DetailsBlock::parse(raw);
        let joined = block
            .spans(&theme)
            .into_iter()
            .map(|s| s.text)
            .collect::<String>();
        assert_eq!(joined, block.to_plain_text(), "{raw:?}");
    }
}

#[test]
fn span_colours_come_from_the_popup_palette() {
    let theme = ThemeSettings::light();
    let spans = DetailsBlock::parse("flag: FALSE").spans(&theme);
    let key = spans.iter().find(|s| s.text == "\"flag\"").unwrap();
    assert_eq!(key.color.as_deref(), Some(theme.popup_key_color.as_str()));
    let value = spans.iter().find(|s| s.text == "false").unwrap();
    assert_eq!(value.color.as_deref(), Some(theme.popup_value_color.as_str()));
}

#[test]
fn strings_are_quoted_once_and_split_on_the_first_colon() {
    let block = DetailsBlock::parse("name: \"quoted\"\nurl: http://example.com\nempty: ");
    assert_eq!(
        block.to_plain_text(),
        "{\n    \"name\": \"quoted\",\n    \"url\": \"http://example.com\",\n    \"empty\": \"\"\n}"
    );
}

#[test]
fn blob_without_pairs_is_a_quoted_scalar() {
    assert_eq!(
        DetailsBlock::parse("  hello world ").to_plain_text(),
        "\"hello world\""
    );
    assert_eq!(DetailsBlock::parse("").to_plain_text(), "\"\"");
}

#[test]
fn leaf_data_feeds_the_details_view() {
    let graph = load_document(r#"{"count": 3, "active": true}"#, DocumentMode::Json).unwrap();
    let leaf = graph.node("node-1").unwrap();
    assert_eq!(leaf.data, "count: 3\nactive: true");
    assert_eq!(format_path(&leaf.path), "{Root}");
    assert_eq!(format_path("Root.items[0]"), "{Root}.items[0]");
    assert_eq!(format_path("elsewhere"), "elsewhere");
}

#[test]
fn missing_surfaces_ignore_commands() {
    let ctx = SessionContext::new();
    let t = session::toggle_grid(&ctx);

    let mut absent: Option<Vec<SurfaceCommand>> = None;
    let next = t.clone().apply(&mut absent);
    assert!(absent.is_none());
    assert!(!next.view().show_grid);

    let mut recorded: Vec<SurfaceCommand> = Vec::new();
    recorded.apply_all(&t.commands);
    assert_eq!(recorded, vec![SurfaceCommand::SetGridVisible { visible: false }]);
    assert_eq!(
        serde_json::to_value(&recorded[0]).unwrap(),
        json!({ "command": "setGridVisible", "visible": false })
    );
}
