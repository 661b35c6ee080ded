//! Graph builder for the layout solver.
//!
//! Translates the caller's node and edge slices into a [`LayoutGraph`]: a
//! `petgraph` directed graph whose nodes carry the id and the resolved
//! bounding-box size of each caller node. Node indices follow the caller's
//! node order and edges keep the caller's edge order, which is what makes
//! the solver deterministic.

use std::collections::HashMap;

use log::{debug, trace, warn};
use petgraph::graph::{DiGraph, NodeIndex};

use stratum_core::{
    geometry::Size,
    graph::{Edge, Node},
};

use crate::StratumError;

/// Explicit node sizes keyed by node id.
///
/// Entries here take priority over sizes measured on the nodes themselves.
pub type SizeMap = HashMap<String, Size>;

/// A node of the [`LayoutGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: String,
    size: Size,
}

impl GraphNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the size the solver lays this node out with.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Directed graph annotated with resolved node sizes.
///
/// Parallel edges and self-loops are kept as given; the solver decides how
/// each of them contributes.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    graph: DiGraph<GraphNode, ()>,
}

impl LayoutGraph {
    /// Builds the layout graph for one layout call.
    ///
    /// The size of each node is resolved in this order:
    /// 1. the entry for its id in `sizes`,
    /// 2. the size measured on the node,
    /// 3. `default_size`.
    ///
    /// Sizes that are zero, negative or not finite are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::DuplicateNode`] if two nodes share an id and
    /// [`StratumError::UnknownNode`] if an edge references an id that is not
    /// in `nodes`.
    pub fn build<T>(
        nodes: &[Node<T>],
        edges: &[Edge],
        sizes: Option<&SizeMap>,
        default_size: Size,
    ) -> Result<Self, StratumError> {
        debug!(nodes_count = nodes.len(), edges_count = edges.len(); "Building layout graph");

        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let size = resolve_size(node, sizes, default_size);
            let index = graph.add_node(GraphNode {
                id: node.id().to_string(),
                size,
            });
            if indices.insert(node.id(), index).is_some() {
                return Err(StratumError::DuplicateNode(node.id().to_string()));
            }
            trace!(node_id = node.id(), width = size.width(), height = size.height(); "Registered node");
        }

        for edge in edges {
            let lookup = |id: &str| {
                indices
                    .get(id)
                    .copied()
                    .ok_or_else(|| StratumError::UnknownNode {
                        edge: edge.id().to_string(),
                        node: id.to_string(),
                    })
            };
            let source = lookup(edge.source())?;
            let target = lookup(edge.target())?;
            graph.add_edge(source, target, ());
        }

        Ok(Self { graph })
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, parallel edges and self-loops included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the node at `index`, counted in the caller's node order.
    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    /// Iterates over nodes in the caller's node order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Returns the underlying graph. Node indices follow the caller's node
    /// order and edge indices the caller's edge order.
    pub fn as_digraph(&self) -> &DiGraph<GraphNode, ()> {
        &self.graph
    }
}

fn resolve_size<T>(node: &Node<T>, sizes: Option<&SizeMap>, default_size: Size) -> Size {
    if let Some(size) = sizes.and_then(|sizes| sizes.get(node.id())).copied() {
        if size.is_measurable() {
            return size;
        }
        warn!(
            node_id = node.id(),
            width = size.width(),
            height = size.height();
            "Ignoring unusable size from size map"
        );
    }

    if let Some(size) = node.measured() {
        if size.is_measurable() {
            return size;
        }
        debug!(node_id = node.id(); "Node has no usable measured size yet");
    }

    default_size
}
