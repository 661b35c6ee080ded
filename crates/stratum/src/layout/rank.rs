//! Cycle breaking and rank assignment.

use std::collections::HashSet;

use petgraph::{
    Direction::Incoming,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::{DfsEvent, EdgeRef, depth_first_search},
};

use crate::StratumError;

/// Acyclic view of the layout graph. Node indices match the layout graph.
pub(super) type RankGraph = DiGraph<(), ()>;

/// Returns a copy of `graph` without self-loops and with every depth-first
/// back edge reversed, which leaves an acyclic graph.
///
/// The search starts from nodes whose only incoming edges are self-loops, in
/// node order, then from any node still unvisited (nodes that only sit on
/// cycles).
pub(super) fn break_cycles<N, E>(graph: &DiGraph<N, E>) -> RankGraph {
    let roots = graph
        .node_indices()
        .filter(|&node| {
            graph
                .edges_directed(node, Incoming)
                .all(|edge| edge.source() == node)
        })
        .chain(graph.node_indices());

    let mut back_edges: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    depth_first_search(graph, roots, |event| {
        if let DfsEvent::BackEdge(source, target) = event {
            back_edges.insert((source, target));
        }
    });

    let mut acyclic = graph.map(|_, _| (), |_, _| ());
    acyclic.clear_edges();
    for edge in graph.edge_references() {
        let (source, target) = (edge.source(), edge.target());
        if source == target {
            continue;
        }
        if back_edges.contains(&(source, target)) {
            acyclic.add_edge(target, source, ());
        } else {
            acyclic.add_edge(source, target, ());
        }
    }
    acyclic
}

/// Longest-path ranking over an acyclic graph.
///
/// Nodes without incoming edges get rank 0; every other node sits one rank
/// below its deepest predecessor, so each edge points to a strictly higher
/// rank.
///
/// # Errors
///
/// Returns [`StratumError::Layout`] if `graph` still has a cycle.
pub(super) fn assign_ranks(graph: &RankGraph) -> Result<Vec<usize>, StratumError> {
    let order = toposort(graph, None).map_err(|cycle| {
        StratumError::Layout(format!(
            "Cycle through node {} left after cycle breaking",
            cycle.node_id().index()
        ))
    })?;

    let mut ranks = vec![0usize; graph.node_count()];
    for node in order {
        let rank = graph
            .neighbors_directed(node, Incoming)
            .map(|predecessor| ranks[predecessor.index()] + 1)
            .max()
            .unwrap_or(0);
        ranks[node.index()] = rank;
    }

    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::arc_graph;

    fn arcs(graph: &RankGraph) -> Vec<(usize, usize)> {
        graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index()))
            .collect()
    }

    #[test]
    fn test_chain_ranks() {
        let graph = arc_graph(3, &[(0, 1), (1, 2)]);
        assert_eq!(assign_ranks(&graph).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_longest_path_wins() {
        // 0 -> 1 -> 2 -> 3 and a shortcut 0 -> 3
        let graph = arc_graph(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert_eq!(assign_ranks(&graph).unwrap(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_isolated_nodes_rank_zero() {
        assert_eq!(assign_ranks(&arc_graph(3, &[])).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_cyclic_graph_is_rejected_by_ranking() {
        let err = assign_ranks(&arc_graph(2, &[(0, 1), (1, 0)])).unwrap_err();
        assert!(matches!(err, StratumError::Layout(_)));
    }

    #[test]
    fn test_acyclic_arcs_are_untouched() {
        let graph = arc_graph(3, &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(arcs(&break_cycles(&graph)), [(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_two_cycle_is_broken() {
        let acyclic = break_cycles(&arc_graph(2, &[(0, 1), (1, 0)]));

        assert_eq!(arcs(&acyclic), [(0, 1), (0, 1)]);
        assert_eq!(assign_ranks(&acyclic).unwrap(), [0, 1]);
    }

    #[test]
    fn test_cycle_behind_source_keeps_source_first() {
        // 3 -> 0 -> 1 -> 2 -> 0
        let acyclic = break_cycles(&arc_graph(4, &[(0, 1), (1, 2), (2, 0), (3, 0)]));

        assert_eq!(arcs(&acyclic), [(0, 1), (1, 2), (0, 2), (3, 0)]);
        assert_eq!(assign_ranks(&acyclic).unwrap(), [1, 2, 3, 0]);
    }

    #[test]
    fn test_self_loops_are_dropped() {
        // 0 only has a self-loop as incoming edge, so it still starts the search.
        let acyclic = break_cycles(&arc_graph(2, &[(0, 0), (0, 1), (1, 1)]));

        assert_eq!(arcs(&acyclic), [(0, 1)]);
        assert_eq!(assign_ranks(&acyclic).unwrap(), [0, 1]);
    }
}
