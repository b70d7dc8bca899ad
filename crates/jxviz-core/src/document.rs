//! Turns a parsed document into the node/connector graph the diagram engine lays out.
//!
//! Shape of the graph:
//! - a single `main-root` node anchors the document,
//! - the scalar members of an object are grouped into one leaf (one key/value line each),
//! - every nested object/array member becomes a parent node (key + child count) whose children
//!   are built recursively,
//! - scalar array items become single-value leaves.

use serde_json::Value;

use crate::convert::xml_to_json;
use crate::model::{DiagramGraph, MAIN_ROOT_ID, Node, NodeId};
use crate::{DocumentMode, Error, Result};

/// Parses editor text in the given mode and builds its graph.
///
/// XML is routed through the XML → JSON conversion first, so both modes share one graph shape.
pub fn load_document(text: &str, mode: DocumentMode) -> Result<DiagramGraph> {
    if text.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    let value: Value = match mode {
        DocumentMode::Json => serde_json::from_str(text)?,
        DocumentMode::Xml => serde_json::from_str(&xml_to_json(text)?)?,
    };
    let graph = build_graph(&value);
    tracing::debug!(
        %mode,
        nodes = graph.len(),
        connectors = graph.connectors().len(),
        "document loaded"
    );
    Ok(graph)
}

pub fn build_graph(value: &Value) -> DiagramGraph {
    let mut builder = GraphBuilder::default();
    let root = NodeId::new(MAIN_ROOT_ID);
    builder.graph.add_node(Node::root(root.clone()));
    builder.emit(value, &root, "Root");
    builder.graph
}

/// Text shown for a JSON scalar inside a node.
pub fn scalar_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Child-count label of a container: `{n}` for objects, `[n]` for arrays.
pub fn count_label(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => Some(format!("{{{}}}", map.len())),
        Value::Array(items) => Some(format!("[{}]", items.len())),
        _ => None,
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[derive(Default)]
struct GraphBuilder {
    graph: DiagramGraph,
    next_id: usize,
}

impl GraphBuilder {
    fn next_node_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(format!("node-{}", self.next_id))
    }

    fn attach(&mut self, parent: &NodeId, node: Node) -> NodeId {
        let id = node.id.clone();
        self.graph.add_node(node);
        self.graph.add_connector(parent, &id);
        id
    }

    fn emit(&mut self, value: &Value, parent: &NodeId, path: &str) {
        match value {
            Value::Object(members) => {
                let scalars = members
                    .iter()
                    .filter(|(_, v)| !is_container(v))
                    .map(|(k, v)| (k.as_str(), scalar_display(v)))
                    .collect::<Vec<_>>();
                if !scalars.is_empty() {
                    let id = self.next_node_id();
                    let leaf = Node::leaf(id, scalars.iter().map(|(k, v)| (*k, v.as_str())))
                        .with_path(path);
                    self.attach(parent, leaf);
                }

                for (key, member) in members.iter().filter(|(_, v)| is_container(v)) {
                    self.emit_container(key, member, parent, &format!("{path}.{key}"));
                }
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{idx}]");
                    match item {
                        Value::Object(_) => self.emit(item, parent, &item_path),
                        Value::Array(_) => {
                            self.emit_container(&idx.to_string(), item, parent, &item_path)
                        }
                        scalar => {
                            let id = self.next_node_id();
                            let leaf = Node::scalar(id, &scalar_display(scalar))
                                .with_path(item_path);
                            self.attach(parent, leaf);
                        }
                    }
                }
            }
            scalar => {
                let id = self.next_node_id();
                let leaf = Node::scalar(id, &scalar_display(scalar)).with_path(path);
                self.attach(parent, leaf);
            }
        }
    }

    fn emit_container(&mut self, key: &str, value: &Value, parent: &NodeId, path: &str) {
        let count = count_label(value).unwrap_or_default();
        let id = self.next_node_id();
        let node = Node::parent(id, key, &count).with_path(path);
        let id = self.attach(parent, node);
        self.emit(value, &id, path);
    }
}
