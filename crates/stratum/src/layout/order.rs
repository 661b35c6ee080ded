//! Ordering of nodes within ranks.
//!
//! Edges spanning more than one rank are split into unit-length segments
//! through virtual nodes so that every segment connects adjacent ranks.
//! Ranks are then reordered by alternating barycenter sweeps and the
//! ordering with the fewest crossings is kept.

use log::trace;
use petgraph::{
    Direction::{self, Incoming, Outgoing},
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use super::rank::RankGraph;

/// Ranked graph with virtual nodes, ready for ordering.
///
/// Every edge connects adjacent ranks. Vertices `0..real_count` are the
/// graph nodes; the rest are virtual. Vertex weights are ranks.
#[derive(Debug)]
pub(super) struct Layering {
    real_count: usize,
    proper: DiGraph<usize, ()>,
    rank_count: usize,
}

impl Layering {
    /// Builds the layering from ranks and an acyclic graph where every edge
    /// points to a strictly higher rank.
    pub(super) fn new(ranks: &[usize], graph: &RankGraph) -> Self {
        let mut proper = graph.map(|node, _| ranks[node.index()], |_, _| ());
        proper.clear_edges();

        for edge in graph.edge_references() {
            let (source, target) = (edge.source(), edge.target());
            let mut previous = source;
            for rank in ranks[source.index()] + 1..ranks[target.index()] {
                let virtual_node = proper.add_node(rank);
                proper.add_edge(previous, virtual_node, ());
                previous = virtual_node;
            }
            proper.add_edge(previous, target, ());
        }

        Self {
            real_count: ranks.len(),
            proper,
            rank_count: ranks.iter().max().map_or(0, |&max| max + 1),
        }
    }

    fn rank_of(&self, vertex: usize) -> usize {
        self.proper[NodeIndex::new(vertex)]
    }

    fn neighbours(&self, vertex: usize, direction: Direction) -> impl Iterator<Item = usize> + '_ {
        self.proper
            .neighbors_directed(NodeIndex::new(vertex), direction)
            .map(NodeIndex::index)
    }

    pub(super) fn rank_count(&self) -> usize {
        self.rank_count
    }

    pub(super) fn virtual_count(&self) -> usize {
        self.proper.node_count() - self.real_count
    }

    /// Returns the ordered ranks with the fewest crossings found, with virtual
    /// nodes removed, and that crossing count.
    ///
    /// Runs at most `passes` sweeps, alternating downward and upward, and
    /// stops early once an ordering without crossings is found.
    pub(super) fn minimize_crossings(&self, passes: usize) -> (Vec<Vec<usize>>, usize) {
        let mut layers = self.initial_order();
        let mut best = layers.clone();
        let mut best_crossings = self.count_crossings(&layers);

        for pass in 0..passes {
            if best_crossings == 0 {
                break;
            }
            self.sweep(&mut layers, pass % 2 == 0);
            let crossings = self.count_crossings(&layers);
            trace!(pass, crossings; "Ordering sweep");
            if crossings < best_crossings {
                best_crossings = crossings;
                best.clone_from(&layers);
            }
        }

        let real_layers = best
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .filter(|&vertex| vertex < self.real_count)
                    .collect()
            })
            .collect();
        (real_layers, best_crossings)
    }

    /// Depth-first order along downward segments, started from the real
    /// nodes by rank and then node order, so that children land next to
    /// their parents.
    fn initial_order(&self) -> Vec<Vec<usize>> {
        let mut layers = vec![Vec::new(); self.rank_count];
        let mut visited = vec![false; self.proper.node_count()];

        let mut roots: Vec<usize> = (0..self.real_count).collect();
        roots.sort_by_key(|&vertex| self.rank_of(vertex));

        for root in roots {
            let mut stack = vec![root];
            while let Some(vertex) = stack.pop() {
                if visited[vertex] {
                    continue;
                }
                visited[vertex] = true;
                layers[self.rank_of(vertex)].push(vertex);
                // Neighbours come newest edge first, so the oldest is popped first.
                stack.extend(
                    self.neighbours(vertex, Outgoing)
                        .filter(|&next| !visited[next]),
                );
            }
        }

        layers
    }

    /// Reorders every rank by the barycenter of its neighbours in the rank
    /// swept from. Vertices without such neighbours keep their index as key.
    fn sweep(&self, layers: &mut [Vec<usize>], downward: bool) {
        let mut position = self.positions(layers);
        let rank_count = layers.len();

        if downward {
            for rank in 1..rank_count {
                self.reorder(&mut layers[rank], Incoming, &mut position);
            }
        } else {
            for rank in (0..rank_count.saturating_sub(1)).rev() {
                self.reorder(&mut layers[rank], Outgoing, &mut position);
            }
        }
    }

    fn positions(&self, layers: &[Vec<usize>]) -> Vec<usize> {
        let mut position = vec![0; self.proper.node_count()];
        for layer in layers {
            for (index, &vertex) in layer.iter().enumerate() {
                position[vertex] = index;
            }
        }
        position
    }

    /// Counts pairwise crossings of the segments between adjacent ranks.
    pub(super) fn count_crossings(&self, layers: &[Vec<usize>]) -> usize {
        let position = self.positions(layers);
        let mut crossings = 0;

        for layer in layers.iter().take(layers.len().saturating_sub(1)) {
            let segments: Vec<(usize, usize)> = layer
                .iter()
                .flat_map(|&upper| {
                    self.neighbours(upper, Outgoing)
                        .map(move |lower| (upper, lower))
                })
                .map(|(upper, lower)| (position[upper], position[lower]))
                .collect();

            for (index, &(upper_a, lower_a)) in segments.iter().enumerate() {
                for &(upper_b, lower_b) in &segments[index + 1..] {
                    if (upper_a < upper_b && lower_a > lower_b)
                        || (upper_a > upper_b && lower_a < lower_b)
                    {
                        crossings += 1;
                    }
                }
            }
        }

        crossings
    }

    /// Sorts `layer` by the mean position of each vertex's neighbours in
    /// `direction`. Vertices without such neighbours keep their index as key.
    fn reorder(&self, layer: &mut Vec<usize>, direction: Direction, position: &mut [usize]) {
        let mut keyed: Vec<(usize, f32)> = layer
            .iter()
            .enumerate()
            .map(|(index, &vertex)| {
                let (sum, count) = self
                    .neighbours(vertex, direction)
                    .fold((0usize, 0usize), |(sum, count), other| {
                        (sum + position[other], count + 1)
                    });
                let key = if count == 0 {
                    index as f32
                } else {
                    sum as f32 / count as f32
                };
                (vertex, key)
            })
            .collect();

        // Stable, so equal barycenters keep their current relative order.
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

        layer.clear();
        layer.extend(keyed.into_iter().map(|(vertex, _)| vertex));
        for (index, &vertex) in layer.iter().enumerate() {
            position[vertex] = index;
        }
    }
}
