use crate::*;
use serde_json::json;

fn labels(node: &Node) -> Vec<(&AnnotationRole, &str)> {
    node.annotations
        .iter()
        .map(|a| (&a.role, a.content.as_str()))
        .collect()
}

#[test]
fn build_graph_groups_scalars_into_one_leaf_and_nests_containers() {
    let value = json!({
        "name": "Alice",
        "age": 30,
        "address": { "city": "Paris", "zip": "75001" },
        "tags": ["a", "b"]
    });
    let graph = build_graph(&value);

    let ids = graph.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec!["main-root", "node-1", "node-2", "node-3", "node-4", "node-5", "node-6"]
    );
    assert_eq!(graph.connectors().len(), 6);

    let root = graph.node(MAIN_ROOT_ID).unwrap();
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.is_expanded, None);

    let leaf = graph.node("node-1").unwrap();
    assert_eq!(leaf.kind, NodeKind::Leaf);
    assert_eq!(leaf.data, "name: Alice\nage: 30");
    assert_eq!(leaf.key_value_pairs(), vec![("name", "Alice"), ("age", "30")]);
    assert_eq!(leaf.path, "Root");

    let address = graph.node("node-2").unwrap();
    assert_eq!(address.kind, NodeKind::Parent);
    assert_eq!(
        labels(address),
        vec![(&AnnotationRole::Key, "address"), (&AnnotationRole::Count, "{2}")]
    );
    assert_eq!(address.path, "Root.address");

    let tags = graph.node("node-4").unwrap();
    assert_eq!(labels(tags)[1], (&AnnotationRole::Count, "[2]"));

    let item = graph.node("node-6").unwrap();
    assert_eq!(item.kind, NodeKind::Leaf);
    assert_eq!(labels(item), vec![(&AnnotationRole::Value, "b")]);
    assert_eq!(item.path, "Root.tags[1]");

    let targets = graph
        .outgoing("node-2")
        .map(|c| c.target.as_str())
        .collect::<Vec<_>>();
    assert_eq!(targets, vec!["node-3"]);
}

#[test]
fn only_the_main_root_is_a_graph_root() {
    let graph = build_graph(&json!({ "a": { "b": 1 }, "c": [1, { "d": true }] }));
    let roots = graph.graph_roots().map(|n| n.id.as_str()).collect::<Vec<_>>();
    assert_eq!(roots, vec![MAIN_ROOT_ID]);
}

#[test]
fn objects_inside_arrays_attach_to_the_array_node() {
    let graph = build_graph(&json!({ "users": [{ "id": 1 }, { "id": 2 }] }));
    let users = graph.node("node-1").unwrap();
    assert_eq!(users.annotations[0].content, "users");

    let children = graph
        .outgoing("node-1")
        .map(|c| graph.node(c.target.as_str()).unwrap().data.clone())
        .collect::<Vec<_>>();
    assert_eq!(children, vec!["id: 1", "id: 2"]);
}

#[test]
fn top_level_scalar_becomes_a_single_value_leaf() {
    let graph = build_graph(&json!("hello"));
    assert_eq!(graph.len(), 2);
    let leaf = graph.node("node-1").unwrap();
    assert_eq!(leaf.annotations, vec![Annotation::value("hello")]);
}

#[test]
fn load_document_rejects_blank_text() {
    let err = load_document("   ", DocumentMode::Json).unwrap_err();
    assert!(matches!(err, Error::EmptyContent));
}

#[test]
fn load_document_reports_invalid_json() {
    let err = load_document("{ nope", DocumentMode::Json).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn load_document_reads_xml_through_the_converter() {
    let graph = load_document(
        r#"<person id="7"><name>Bob</name></person>"#,
        DocumentMode::Xml,
    )
    .unwrap();
    assert_eq!(graph.len(), 3);

    let person = graph.node("node-1").unwrap();
    assert_eq!(person.kind, NodeKind::Parent);
    assert_eq!(person.annotations[1].content, "{2}");

    let leaf = graph.node("node-2").unwrap();
    assert_eq!(leaf.data, "@id: 7\nname: Bob");
}
