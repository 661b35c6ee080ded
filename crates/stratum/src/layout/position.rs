//! Coordinate assignment for ordered ranks.
//!
//! Works in a rank-aligned frame: the cross axis runs along a rank and the
//! rank axis runs from the first rank to the last. The caller maps the frame
//! onto x and y for the requested direction.

use petgraph::{
    Direction::{self, Incoming, Outgoing},
    graph::NodeIndex,
};

use stratum_core::geometry::{Point, Size};

use super::rank::RankGraph;

/// Movement below this is treated as converged.
const SETTLE_THRESHOLD: f32 = 0.1;

/// Spacing and effort settings for coordinate assignment.
#[derive(Debug, Clone, Copy)]
pub(super) struct Spacing {
    pub node_sep: f32,
    pub rank_sep: f32,
    pub cross_margin: f32,
    pub rank_margin: f32,
    pub alignment_passes: usize,
}

/// Node centers in the rank-aligned frame.
#[derive(Debug)]
pub(super) struct FramePositions {
    /// `x` is the cross-axis center, `y` the rank-axis center.
    pub centers: Vec<Point>,

    /// Distance from the start of the first rank to the end of the last one.
    pub rank_span: f32,
}

/// Places every node of `layers`.
///
/// `extents` holds, per node, the cross-axis extent as width and the
/// rank-axis extent as height. Edges of `graph` point from lower to higher
/// ranks.
pub(super) fn assign_coordinates(
    layers: &[Vec<usize>],
    extents: &[Size],
    graph: &RankGraph,
    spacing: Spacing,
) -> FramePositions {
    let mut cross = pack_layers(layers, extents, spacing.node_sep);

    for _ in 0..spacing.alignment_passes {
        let mut moved = false;
        for layer in layers.iter().skip(1) {
            moved |= align_layer(layer, graph, Incoming, extents, spacing.node_sep, &mut cross);
        }
        for layer in layers.iter().rev().skip(1) {
            moved |= align_layer(layer, graph, Outgoing, extents, spacing.node_sep, &mut cross);
        }
        if !moved {
            break;
        }
    }

    // Shift so the leftmost box edge sits on the margin.
    let min_edge = layers
        .iter()
        .flatten()
        .map(|&node| cross[node] - extents[node].width() / 2.0)
        .fold(f32::INFINITY, f32::min);
    let shift = if min_edge.is_finite() {
        spacing.cross_margin - min_edge
    } else {
        0.0
    };

    let mut centers = vec![Point::default(); extents.len()];
    let mut cursor = spacing.rank_margin;
    for (rank, layer) in layers.iter().enumerate() {
        let thickness = layer
            .iter()
            .map(|&node| extents[node].height())
            .fold(0.0, f32::max);
        if rank > 0 {
            cursor += spacing.rank_sep;
        }
        let rank_center = cursor + thickness / 2.0;
        for &node in layer {
            centers[node] = Point::new(cross[node] + shift, rank_center);
        }
        cursor += thickness;
    }

    FramePositions {
        centers,
        rank_span: cursor - spacing.rank_margin,
    }
}

/// Packs each rank left to right with `node_sep` gaps and centers every
/// rank against the widest one.
fn pack_layers(layers: &[Vec<usize>], extents: &[Size], node_sep: f32) -> Vec<f32> {
    let widths: Vec<f32> = layers
        .iter()
        .map(|layer| {
            let boxes: f32 = layer.iter().map(|&node| extents[node].width()).sum();
            boxes + node_sep * layer.len().saturating_sub(1) as f32
        })
        .collect();
    let widest = widths.iter().copied().fold(0.0, f32::max);

    let mut cross = vec![0.0; extents.len()];
    for (layer, width) in layers.iter().zip(widths) {
        let mut cursor = (widest - width) / 2.0;
        for &node in layer {
            let extent = extents[node].width();
            cross[node] = cursor + extent / 2.0;
            cursor += extent + node_sep;
        }
    }
    cross
}

/// Moves the nodes of one rank toward the mean position of their neighbours
/// in `direction` while keeping rank order and the `node_sep` gap.
///
/// Two feasible placements are computed, one resolving conflicts by pushing
/// right and one by pushing left, and their average is used. Returns true if
/// any node moved noticeably.
fn align_layer(
    layer: &[usize],
    graph: &RankGraph,
    direction: Direction,
    extents: &[Size],
    node_sep: f32,
    cross: &mut [f32],
) -> bool {
    if layer.is_empty() {
        return false;
    }

    let desired: Vec<f32> = layer
        .iter()
        .map(|&node| {
            let (sum, count) = graph
                .neighbors_directed(NodeIndex::new(node), direction)
                .fold((0.0, 0usize), |(sum, count), other| {
                    (sum + cross[other.index()], count + 1)
                });
            if count == 0 {
                cross[node]
            } else {
                sum / count as f32
            }
        })
        .collect();
    let gaps: Vec<f32> = layer
        .windows(2)
        .map(|pair| (extents[pair[0]].width() + extents[pair[1]].width()) / 2.0 + node_sep)
        .collect();

    let mut pushed_right = desired.clone();
    for index in 1..layer.len() {
        pushed_right[index] = pushed_right[index].max(pushed_right[index - 1] + gaps[index - 1]);
    }
    let mut pushed_left = desired;
    for index in (0..layer.len() - 1).rev() {
        pushed_left[index] = pushed_left[index].min(pushed_left[index + 1] - gaps[index]);
    }

    let mut moved = false;
    for (index, &node) in layer.iter().enumerate() {
        let target = (pushed_right[index] + pushed_left[index]) / 2.0;
        if (target - cross[node]).abs() > SETTLE_THRESHOLD {
            moved = true;
        }
        cross[node] = target;
    }
    moved
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::arc_graph;

    const SPACING: Spacing = Spacing {
        node_sep: 40.0,
        rank_sep: 80.0,
        cross_margin: 40.0,
        rank_margin: 40.0,
        alignment_passes: 8,
    };

    #[test]
    fn test_chain_is_stacked_on_one_line() {
        let layers = vec![vec![0], vec![1], vec![2]];
        let extents = vec![Size::new(280.0, 56.0); 3];
        let graph = arc_graph(3, &[(0, 1), (1, 2)]);

        let frame = assign_coordinates(&layers, &extents, &graph, SPACING);

        for center in &frame.centers {
            assert_approx_eq!(f32, center.x(), 180.0);
        }
        assert_approx_eq!(f32, frame.centers[0].y(), 68.0);
        assert_approx_eq!(f32, frame.centers[1].y(), 204.0);
        assert_approx_eq!(f32, frame.centers[2].y(), 340.0);
        assert_approx_eq!(f32, frame.rank_span, 3.0 * 56.0 + 2.0 * 80.0);
    }

    #[test]
    fn test_children_are_centered_under_parent() {
        let layers = vec![vec![0], vec![1, 2]];
        let extents = vec![Size::new(100.0, 40.0); 3];
        let graph = arc_graph(3, &[(0, 1), (0, 2)]);

        let frame = assign_coordinates(&layers, &extents, &graph, SPACING);
        let parent = frame.centers[0].x();
        let left = frame.centers[1].x();
        let right = frame.centers[2].x();

        assert_approx_eq!(f32, right - left, 140.0);
        assert_approx_eq!(f32, (left + right) / 2.0, parent, epsilon = 0.01);
        assert_approx_eq!(f32, left - 50.0, 40.0, epsilon = 0.01);
    }

    #[test]
    fn test_rank_thickness_uses_tallest_node() {
        let layers = vec![vec![0, 1], vec![2]];
        let extents = vec![
            Size::new(100.0, 20.0),
            Size::new(100.0, 60.0),
            Size::new(100.0, 40.0),
        ];
        let graph = arc_graph(3, &[]);

        let frame = assign_coordinates(&layers, &extents, &graph, SPACING);

        assert_approx_eq!(f32, frame.centers[0].y(), 70.0);
        assert_approx_eq!(f32, frame.centers[1].y(), 70.0);
        assert_approx_eq!(f32, frame.centers[2].y(), 40.0 + 60.0 + 80.0 + 20.0);
    }

    #[test]
    fn test_no_overlap_within_rank() {
        let layers = vec![vec![0], vec![1, 2, 3, 4]];
        let extents = vec![
            Size::new(50.0, 10.0),
            Size::new(300.0, 10.0),
            Size::new(20.0, 10.0),
            Size::new(120.0, 10.0),
            Size::new(70.0, 10.0),
        ];
        let graph = arc_graph(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);

        let frame = assign_coordinates(&layers, &extents, &graph, SPACING);

        for pair in layers[1].windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let gap = (frame.centers[b].x() - extents[b].width() / 2.0)
                - (frame.centers[a].x() + extents[a].width() / 2.0);
            assert!(gap >= 40.0 - 0.01, "gap between {a} and {b} is {gap}");
        }
    }
}
