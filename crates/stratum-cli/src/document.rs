//! Diagram documents as exchanged with the editor.
//!
//! Nodes and edges keep every field the layout does not understand (`type`,
//! `label`, `style`, `animated`, ...) so a document survives a round trip with
//! only node positions changed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stratum_core::{
    geometry::{Point, Size},
    graph::{Edge, Node},
};

/// A diagram: nodes, edges and any other top-level editor state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: Vec<EditorNode>,

    #[serde(default)]
    pub edges: Vec<EditorEdge>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An editor node. Only `id` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorNode {
    pub id: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    /// Top-left corner of the node box.
    #[serde(default)]
    pub position: Point,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Size>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EditorNode {
    /// Returns a layout node carrying this editor node as payload.
    pub fn to_node(&self) -> Node<&EditorNode> {
        let node = Node::new(self.id.as_str(), self).with_position(self.position);
        match self.measured {
            Some(size) => node.with_measured(size),
            None => node,
        }
    }

    /// Returns the editor node behind `node`, moved to the node's position.
    pub fn from_node(node: &Node<&EditorNode>) -> Self {
        Self {
            position: node.position(),
            ..(*node.data()).clone()
        }
    }
}

/// An editor edge. Only `id`, `source` and `target` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorEdge {
    pub id: String,
    pub source: String,
    pub target: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EditorEdge {
    pub fn to_edge(&self) -> Edge {
        Edge::new(self.id.as_str(), self.source.as_str(), self.target.as_str())
    }
}

impl Document {
    /// Returns the layout view of the nodes, in document order.
    pub fn layout_nodes(&self) -> Vec<Node<&EditorNode>> {
        self.nodes.iter().map(EditorNode::to_node).collect()
    }

    /// Returns the layout view of the edges, in document order.
    pub fn layout_edges(&self) -> Vec<Edge> {
        self.edges.iter().map(EditorEdge::to_edge).collect()
    }

    /// Returns a document with `nodes` and every other field of `self`.
    pub fn with_nodes(&self, nodes: &[Node<&EditorNode>]) -> Self {
        Self {
            nodes: nodes.iter().map(EditorNode::from_node).collect(),
            edges: self.edges.clone(),
            extra: self.extra.clone(),
        }
    }
}
