//! Stratum - Layered layout for flow-chart editors.
//!
//! Computes node positions for directed graphs shown in a diagram editor and
//! offers the manual alignment and distribution operations that work on the
//! same coordinates. The crate never renders, never stores layouts, and keeps
//! no state between calls: every operation borrows the caller's nodes and
//! edges and returns new ones.
//!
//! The automatic layout runs in three stages:
//!
//! 1. [`graph::LayoutGraph::build`] resolves a size for every node and checks
//!    that every edge references known nodes.
//! 2. [`layout::LayeredLayout`] ranks, orders and positions the nodes,
//!    producing box centers.
//! 3. [`arrange::place_nodes`] converts the centers into the editor's
//!    top-left positions.
//!
//! # Example
//!
//! ```
//! use stratum::{compute_layout, config::LayoutOptions};
//! use stratum_core::graph::{Edge, Node};
//!
//! let nodes = vec![Node::new("a", "Start"), Node::new("b", "Review"), Node::new("c", "Done")];
//! let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")];
//!
//! let result = compute_layout(&nodes, &edges, Some(&LayoutOptions::default()), None).unwrap();
//! let ys: Vec<f32> = result.nodes().iter().map(|node| node.position().y()).collect();
//! assert!(ys[0] < ys[1] && ys[1] < ys[2]);
//! ```

pub mod arrange;
pub mod config;
pub mod graph;
pub mod layout;

mod error;

pub use arrange::{align_nodes, distribute_nodes};
pub use config::DEFAULT_DISTRIBUTE_SPACING;
pub use error::StratumError;
pub use graph::SizeMap;

use log::{debug, info};

use stratum_core::{
    geometry::Bounds,
    graph::{Edge, Node},
};

use config::LayoutOptions;
use graph::LayoutGraph;
use layout::{LayeredLayout, LayoutSolution};

/// Laid-out nodes and edges, plus solver details.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult<T> {
    nodes: Vec<Node<T>>,
    edges: Vec<Edge>,
    solution: LayoutSolution,
}

impl<T> LayoutResult<T> {
    /// Returns the nodes with their new top-left positions, in input order.
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Returns the edges, unchanged.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the per-node placements computed by the solver.
    pub fn solution(&self) -> &LayoutSolution {
        &self.solution
    }

    /// Returns the box enclosing every node, or `None` when there are no nodes.
    pub fn bounds(&self) -> Option<Bounds> {
        self.solution.bounds()
    }

    /// Splits the result into its nodes and edges.
    pub fn into_parts(self) -> (Vec<Node<T>>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

/// Builder for running automatic layouts with fixed options.
///
/// # Examples
///
/// ```rust
/// use stratum::{LayoutBuilder, SizeMap, config::LayoutOptions};
/// use stratum_core::{geometry::Size, graph::{Edge, Node}, orientation::Direction};
///
/// let builder = LayoutBuilder::new(
///     LayoutOptions::default().with_direction(Direction::LeftToRight),
/// );
///
/// let nodes = vec![Node::new("a", ()), Node::new("b", ())];
/// let edges = vec![Edge::new("e1", "a", "b")];
/// let sizes = SizeMap::from([("a".to_string(), Size::new(200.0, 48.0))]);
///
/// let result = builder.compute(&nodes, &edges, Some(&sizes)).unwrap();
/// assert!(result.nodes()[0].position().x() < result.nodes()[1].position().x());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutBuilder {
    options: LayoutOptions,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Returns the options used for every layout.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lays out `nodes` and `edges`.
    ///
    /// Sizes come from `sizes` first, then from each node's measured size,
    /// then from the configured default. The returned nodes differ from the
    /// input only in their position; the edges are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError`] when the options are invalid, a node id is
    /// duplicated, or an edge references an unknown node. Nothing is
    /// computed in that case.
    pub fn compute<T: Clone>(
        &self,
        nodes: &[Node<T>],
        edges: &[Edge],
        sizes: Option<&SizeMap>,
    ) -> Result<LayoutResult<T>, StratumError> {
        self.options.validate()?;
        info!(
            nodes_count = nodes.len(),
            edges_count = edges.len(),
            direction = self.options.direction().as_str();
            "Computing layout"
        );

        let graph = LayoutGraph::build(nodes, edges, sizes, self.options.default_size())?;
        let solution = LayeredLayout::new(&self.options).compute(&graph)?;
        let laid_out = arrange::place_nodes(nodes, &solution)?;

        debug!(
            ranks = solution.rank_count(),
            crossings = solution.crossings();
            "Layout computed"
        );

        Ok(LayoutResult {
            nodes: laid_out,
            edges: edges.to_vec(),
            solution,
        })
    }
}

/// Lays out a graph in one call.
///
/// Uses [`LayoutOptions::default`] when `options` is `None`. See
/// [`LayoutBuilder::compute`] for details.
///
/// # Errors
///
/// Same as [`LayoutBuilder::compute`].
pub fn compute_layout<T: Clone>(
    nodes: &[Node<T>],
    edges: &[Edge],
    options: Option<&LayoutOptions>,
    sizes: Option<&SizeMap>,
) -> Result<LayoutResult<T>, StratumError> {
    LayoutBuilder::new(options.cloned().unwrap_or_default()).compute(nodes, edges, sizes)
}
