//! Layered layout solver.
//!
//! [`LayeredLayout`] places the nodes of a [`LayoutGraph`] in ranks, in the
//! classic Sugiyama phases:
//!
//! 1. **Cycle breaking**: depth-first back edges are reversed and self-loops
//!    are ignored, so every input terminates.
//! 2. **Ranking**: longest-path ranking; nodes without incoming edges start
//!    at rank 0.
//! 3. **Ordering**: long edges are split by virtual nodes and ranks are
//!    reordered with barycenter sweeps to reduce crossings.
//! 4. **Coordinates**: nodes are packed along each rank with `node_sep`
//!    gaps, ranks are stacked with `rank_sep` gaps, and the drawing is offset
//!    by the margins.
//!
//! The result holds box centers. Converting them to the editor's top-left
//! convention is left to [`crate::arrange`].

mod order;
mod position;
mod rank;

use indexmap::IndexMap;
use log::{debug, trace};

use stratum_core::{
    geometry::{Bounds, Point, Size},
    orientation::Direction,
};

use crate::{StratumError, config::LayoutOptions, graph::LayoutGraph};

use order::Layering;
use position::{Spacing, assign_coordinates};
use rank::{assign_ranks, break_cycles};

/// Where the solver put one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    center: Point,
    size: Size,
    rank: usize,
    order: usize,
}

impl Placement {
    /// Returns the center of the node box.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the size the node was laid out with.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the index of the rank the node was assigned to.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the position of the node within its rank.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the node box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.center, self.size)
    }

    /// Returns the top-left corner of the node box.
    pub fn top_left(&self) -> Point {
        self.bounds().min_point()
    }
}

/// Output of [`LayeredLayout::compute`]: one [`Placement`] per node, in the
/// order the nodes were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSolution {
    placements: IndexMap<String, Placement>,
    crossings: usize,
}

impl LayoutSolution {
    /// Returns the placement of the node with the given id.
    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// Iterates over `(id, placement)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.placements
            .iter()
            .map(|(id, placement)| (id.as_str(), placement))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the number of edge crossings between adjacent ranks in the
    /// chosen ordering.
    pub fn crossings(&self) -> usize {
        self.crossings
    }

    /// Returns the number of ranks.
    pub fn rank_count(&self) -> usize {
        self.placements
            .values()
            .map(|placement| placement.rank + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the ids of each rank, in rank order and in order within the rank.
    pub fn ranks(&self) -> Vec<Vec<&str>> {
        let mut ranks = vec![Vec::new(); self.rank_count()];
        for (id, placement) in self.iter() {
            ranks[placement.rank].push((placement.order, id));
        }
        ranks
            .into_iter()
            .map(|mut rank| {
                rank.sort_by_key(|&(order, _)| order);
                rank.into_iter().map(|(_, id)| id).collect()
            })
            .collect()
    }

    /// Returns the box enclosing every node, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.placements
            .values()
            .map(Placement::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Sugiyama-style layered layout.
///
/// # Examples
///
/// ```
/// # use stratum::{config::LayoutOptions, graph::LayoutGraph, layout::LayeredLayout};
/// # use stratum_core::{geometry::Size, graph::{Edge, Node}};
/// let nodes = vec![Node::new("a", ()), Node::new("b", ())];
/// let edges = vec![Edge::new("e1", "a", "b")];
/// let graph = LayoutGraph::build(&nodes, &edges, None, Size::new(280.0, 56.0)).unwrap();
///
/// let solution = LayeredLayout::new(&LayoutOptions::default()).compute(&graph).unwrap();
/// let a = solution.get("a").unwrap();
/// let b = solution.get("b").unwrap();
/// assert_eq!(a.rank(), 0);
/// assert_eq!(b.rank(), 1);
/// assert!(a.center().y() < b.center().y());
/// ```
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    direction: Direction,
    node_sep: f32,
    rank_sep: f32,
    margin_x: f32,
    margin_y: f32,
    ordering_passes: usize,
    alignment_passes: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self::new(&LayoutOptions::default())
    }
}

impl LayeredLayout {
    /// Creates a solver with the direction, spacing and effort of `options`.
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            direction: options.direction(),
            node_sep: options.node_sep(),
            rank_sep: options.rank_sep(),
            margin_x: options.margin_x(),
            margin_y: options.margin_y(),
            ordering_passes: options.ordering_passes(),
            alignment_passes: options.alignment_passes(),
        }
    }

    /// Lays out `graph`.
    ///
    /// The result is a pure function of the graph (node order, edge order,
    /// sizes) and the solver settings.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Layout`] if ranking fails, which cycle
    /// breaking rules out for any input graph.
    pub fn compute(&self, graph: &LayoutGraph) -> Result<LayoutSolution, StratumError> {
        if graph.is_empty() {
            debug!("Empty graph, nothing to lay out");
            return Ok(LayoutSolution::default());
        }

        let acyclic = break_cycles(graph.as_digraph());
        let ranks = assign_ranks(&acyclic)?;

        let layering = Layering::new(&ranks, &acyclic);
        let (layers, crossings) = layering.minimize_crossings(self.ordering_passes);
        debug!(
            ranks = layering.rank_count(),
            virtual_nodes = layering.virtual_count(),
            crossings;
            "Ordered ranks"
        );

        let vertical = self.direction.is_vertical();
        let extents: Vec<Size> = graph
            .nodes()
            .map(|node| {
                if vertical {
                    node.size()
                } else {
                    node.size().transpose()
                }
            })
            .collect();

        let (cross_margin, rank_margin) = if vertical {
            (self.margin_x, self.margin_y)
        } else {
            (self.margin_y, self.margin_x)
        };
        let frame = assign_coordinates(
            &layers,
            &extents,
            &acyclic,
            Spacing {
                node_sep: self.node_sep,
                rank_sep: self.rank_sep,
                cross_margin,
                rank_margin,
                alignment_passes: self.alignment_passes,
            },
        );

        let mut order = vec![0; graph.node_count()];
        for layer in &layers {
            for (index, &node) in layer.iter().enumerate() {
                order[node] = index;
            }
        }

        // Mirroring keeps the rank axis inside [margin, margin + span].
        let mirror = 2.0 * rank_margin + frame.rank_span;
        let placements = graph
            .nodes()
            .enumerate()
            .map(|(index, node)| {
                let mut center = frame.centers[index];
                if self.direction.is_reversed() {
                    center = center.with_y(mirror - center.y());
                }
                if !vertical {
                    center = center.transpose();
                }
                trace!(
                    node_id = node.id(),
                    rank = ranks[index],
                    x = center.x(),
                    y = center.y();
                    "Placed node"
                );

                let placement = Placement {
                    center,
                    size: node.size(),
                    rank: ranks[index],
                    order: order[index],
                };
                (node.id().to_string(), placement)
            })
            .collect();

        Ok(LayoutSolution {
            placements,
            crossings,
        })
    }
}

/// Builds a graph with `count` unit nodes and the given `(source, target)` edges.
#[cfg(test)]
fn arc_graph(count: usize, arcs: &[(usize, usize)]) -> rank::RankGraph {
    let mut graph = rank::RankGraph::with_capacity(count, arcs.len());
    for _ in 0..count {
        graph.add_node(());
    }
    for &(source, target) in arcs {
        graph.add_edge(
            petgraph::graph::NodeIndex::new(source),
            petgraph::graph::NodeIndex::new(target),
            (),
        );
    }
    graph
}
