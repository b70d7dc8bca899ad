//! Diagram model shared by document loading and the presentation engine.
//!
//! Nodes and connectors are created once per document load and are otherwise only touched by the
//! collapse state machine (`is_expanded`). Geometry and style live in the render crate's styled
//! output, never on the model itself.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Id of the synthetic node every document hangs off.
pub const MAIN_ROOT_ID: &str = "main-root";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Root,
    Parent,
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationRole {
    Key,
    Value,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub role: AnnotationRole,
    pub content: String,
}

impl Annotation {
    pub fn key(content: impl Into<String>) -> Self {
        Self {
            role: AnnotationRole::Key,
            content: content.into(),
        }
    }

    pub fn value(content: impl Into<String>) -> Self {
        Self {
            role: AnnotationRole::Value,
            content: content.into(),
        }
    }

    pub fn count(content: impl Into<String>) -> Self {
        Self {
            role: AnnotationRole::Count,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub annotations: Vec<Annotation>,
    /// Raw searchable text: one `key: value` line per member for leaves, the key for parents.
    #[serde(default)]
    pub data: String,
    /// Dotted location of the node inside the source document (`Root.users[0]`).
    #[serde(default)]
    pub path: String,
    /// `None` for the root node, which cannot be collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
}

impl Node {
    pub fn root(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Root,
            annotations: Vec::new(),
            data: String::new(),
            path: "Root".to_string(),
            is_expanded: None,
        }
    }

    pub fn parent(id: impl Into<NodeId>, key: &str, count: &str) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Parent,
            annotations: vec![Annotation::key(key), Annotation::count(count)],
            data: key.to_string(),
            path: String::new(),
            is_expanded: Some(true),
        }
    }

    pub fn leaf<'a>(
        id: impl Into<NodeId>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut annotations = Vec::new();
        let mut lines = Vec::new();
        for (key, value) in pairs {
            annotations.push(Annotation::key(key));
            annotations.push(Annotation::value(value));
            lines.push(format!("{key}: {value}"));
        }
        Self {
            id: id.into(),
            kind: NodeKind::Leaf,
            annotations,
            data: lines.join("\n"),
            path: String::new(),
            is_expanded: Some(true),
        }
    }

    /// A leaf that carries a bare value (e.g. a scalar array item) instead of key/value lines.
    pub fn scalar(id: impl Into<NodeId>, value: &str) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Leaf,
            annotations: vec![Annotation::value(value)],
            data: value.to_string(),
            path: String::new(),
            is_expanded: Some(true),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn annotations_with_role(&self, role: AnnotationRole) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.role == role)
    }

    /// Pairs each key with the value right after it; a key without one reads as empty.
    ///
    /// Values that do not follow a key are skipped, matching how leaves lay out their lines.
    pub fn key_value_pairs(&self) -> Vec<(&str, &str)> {
        self.annotations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.role == AnnotationRole::Key)
            .map(|(idx, key)| {
                let value = self
                    .annotations
                    .get(idx + 1)
                    .filter(|next| next.role == AnnotationRole::Value)
                    .map(|v| v.content.as_str())
                    .unwrap_or("");
                (key.content.as_str(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

/// The live node/connector collection of one loaded document.
///
/// Node order is the diagram enumeration order (search results follow it).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagramGraph {
    nodes: IndexMap<NodeId, Node>,
    connectors: Vec<Connector>,
    #[serde(skip)]
    incoming: FxHashMap<NodeId, Vec<usize>>,
    #[serde(skip)]
    outgoing: FxHashMap<NodeId, Vec<usize>>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts (or replaces) a node, keeping its original enumeration position on replace.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_connector(&mut self, source: &NodeId, target: &NodeId) -> &Connector {
        let idx = self.connectors.len();
        self.connectors.push(Connector {
            id: format!("{source}-{target}"),
            source: source.clone(),
            target: target.clone(),
        });
        self.outgoing.entry(source.clone()).or_default().push(idx);
        self.incoming.entry(target.clone()).or_default().push(idx);
        &self.connectors[idx]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &Connector> {
        self.incoming
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.connectors[idx])
    }

    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &Connector> {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.connectors[idx])
    }

    /// Nodes without an incoming connector.
    pub fn graph_roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(|n| {
                self.incoming
                    .get(n.id.as_str())
                    .is_none_or(|v| v.is_empty())
            })
    }

    /// Flips a single node's expansion flag. Root nodes are left alone.
    pub fn toggle_expanded(&mut self, id: &str) -> Option<bool> {
        let node = self.nodes.get_mut(id)?;
        let next = !node.is_expanded?;
        node.is_expanded = Some(next);
        Some(next)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl Orientation {
    /// Rotation order used by the "Rotate Layout" action.
    pub const CYCLE: [Orientation; 4] = [
        Orientation::LeftToRight,
        Orientation::TopToBottom,
        Orientation::RightToLeft,
        Orientation::BottomToTop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "LeftToRight",
            Self::RightToLeft => "RightToLeft",
            Self::TopToBottom => "TopToBottom",
            Self::BottomToTop => "BottomToTop",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|o| *o == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lefttoright" | "ltr" => Ok(Self::LeftToRight),
            "righttoleft" | "rtl" => Ok(Self::RightToLeft),
            "toptobottom" | "ttb" => Ok(Self::TopToBottom),
            "bottomtotop" | "btt" => Ok(Self::BottomToTop),
            _ => Err(Error::UnknownOrientation {
                orientation: s.to_string(),
            }),
        }
    }
}
