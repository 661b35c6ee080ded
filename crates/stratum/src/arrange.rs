//! Coordinate post-processing and manual arrangement.
//!
//! [`place_nodes`] turns a [`LayoutSolution`] into editor nodes by moving
//! each box so that it is centered on its computed point. [`align_nodes`]
//! and [`distribute_nodes`] work directly on node positions and never go
//! through the solver.
//!
//! All functions return new node lists. Alignment and distribution take the
//! *first* node of the list (after sorting, for distribution) as anchor, so
//! callers choose the anchor through list order.

use log::debug;

use stratum_core::{
    geometry::Point,
    graph::Node,
    orientation::Axis,
};

use crate::{StratumError, layout::LayoutSolution};

/// Copies `nodes` with each position replaced by the top-left corner of its
/// placement.
///
/// # Errors
///
/// Returns [`StratumError::Layout`] if a node has no placement in `solution`.
pub fn place_nodes<T: Clone>(
    nodes: &[Node<T>],
    solution: &LayoutSolution,
) -> Result<Vec<Node<T>>, StratumError> {
    nodes
        .iter()
        .map(|node| {
            let placement = solution.get(node.id()).ok_or_else(|| {
                StratumError::Layout(format!("Placement not found for node `{}`", node.id()))
            })?;
            Ok(node.moved_to(placement.top_left()))
        })
        .collect()
}

/// Aligns nodes on the first node of the list.
///
/// [`Axis::Horizontal`] gives every node the first node's y; [`Axis::Vertical`]
/// gives every node the first node's x. The other coordinate is unchanged and
/// an empty list is returned as is.
///
/// # Examples
///
/// ```
/// # use stratum::align_nodes;
/// # use stratum_core::{geometry::Point, graph::Node, orientation::Axis};
/// let nodes = vec![
///     Node::new("a", ()).with_position(Point::new(0.0, 10.0)),
///     Node::new("b", ()).with_position(Point::new(200.0, 95.0)),
/// ];
///
/// let aligned = align_nodes(&nodes, Axis::Horizontal);
/// assert_eq!(aligned[1].position(), Point::new(200.0, 10.0));
/// ```
pub fn align_nodes<T: Clone>(nodes: &[Node<T>], axis: Axis) -> Vec<Node<T>> {
    let Some(anchor) = nodes.first().map(Node::position) else {
        return Vec::new();
    };
    debug!(nodes_count = nodes.len(), axis = axis.as_str(); "Aligning nodes");

    nodes
        .iter()
        .map(|node| {
            let position = match axis {
                Axis::Horizontal => node.position().with_y(anchor.y()),
                Axis::Vertical => node.position().with_x(anchor.x()),
            };
            node.moved_to(position)
        })
        .collect()
}

/// Spreads nodes evenly along `axis`.
///
/// The nodes are sorted by their coordinate on `axis` (ties keep input
/// order, nodes with a NaN coordinate go last) and the `i`-th sorted node is
/// moved to `start + i * spacing`, where `start` is the smallest coordinate. The other coordinate is
/// unchanged. The returned list is in sorted order, which can differ from
/// the input order.
///
/// # Examples
///
/// ```
/// # use stratum::distribute_nodes;
/// # use stratum_core::{geometry::Point, graph::Node, orientation::Axis};
/// let nodes = vec![
///     Node::new("far", ()).with_position(Point::new(900.0, 5.0)),
///     Node::new("near", ()).with_position(Point::new(100.0, 7.0)),
/// ];
///
/// let spread = distribute_nodes(&nodes, Axis::Horizontal, 150.0);
/// assert_eq!(spread[0].id(), "near");
/// assert_eq!(spread[1].position(), Point::new(250.0, 5.0));
/// ```
pub fn distribute_nodes<T: Clone>(nodes: &[Node<T>], axis: Axis, spacing: f32) -> Vec<Node<T>> {
    let coordinate = |point: Point| match axis {
        Axis::Horizontal => point.x(),
        Axis::Vertical => point.y(),
    };

    let mut sorted: Vec<&Node<T>> = nodes.iter().collect();
    // NaN sorts after every number; -0.0 and 0.0 stay tied.
    sorted.sort_by(|a, b| {
        let (a, b) = (coordinate(a.position()), coordinate(b.position()));
        a.partial_cmp(&b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
    });

    let Some(start) = sorted.first().map(|node| coordinate(node.position())) else {
        return Vec::new();
    };
    debug!(nodes_count = nodes.len(), axis = axis.as_str(), spacing; "Distributing nodes");

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let value = start + index as f32 * spacing;
            let position = match axis {
                Axis::Horizontal => node.position().with_x(value),
                Axis::Vertical => node.position().with_y(value),
            };
            node.moved_to(position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{config::LayoutOptions, graph::LayoutGraph, layout::LayeredLayout};

    fn at(id: &str, x: f32, y: f32) -> Node<String> {
        Node::new(id, format!("payload-{id}")).with_position(Point::new(x, y))
    }

    fn ids<T>(nodes: &[Node<T>]) -> Vec<&str> {
        nodes.iter().map(Node::id).collect()
    }

    #[test]
    fn test_place_nodes_converts_center_to_corner() {
        let nodes = vec![at("a", -1.0, -1.0)];
        let graph = LayoutGraph::build(&nodes, &[], None, LayoutOptions::default().default_size())
            .unwrap();
        let solution = LayeredLayout::default().compute(&graph).unwrap();

        let placed = place_nodes(&nodes, &solution).unwrap();

        assert_eq!(placed[0].position(), Point::new(40.0, 40.0));
        assert_eq!(placed[0].data(), "payload-a");
        assert_eq!(nodes[0].position(), Point::new(-1.0, -1.0));
    }

    #[test]
    fn test_place_nodes_reports_missing_placement() {
        let nodes = vec![at("a", 0.0, 0.0)];
        let err = place_nodes(&nodes, &LayoutSolution::default()).unwrap_err();

        assert!(matches!(err, StratumError::Layout(_)));
    }

    #[test]
    fn test_align_empty_is_noop() {
        assert!(align_nodes::<()>(&[], Axis::Horizontal).is_empty());
        assert!(align_nodes::<()>(&[], Axis::Vertical).is_empty());
    }

    #[test]
    fn test_align_horizontal_uses_first_y() {
        let nodes = vec![at("a", 10.0, 5.0), at("b", 300.0, 90.0), at("c", -20.0, 40.0)];
        let aligned = align_nodes(&nodes, Axis::Horizontal);

        assert_eq!(ids(&aligned), ["a", "b", "c"]);
        for (before, after) in nodes.iter().zip(&aligned) {
            assert_eq!(after.position().y(), 5.0);
            assert_eq!(after.position().x(), before.position().x());
            assert_eq!(after.data(), before.data());
        }
    }

    #[test]
    fn test_align_vertical_uses_first_x() {
        let nodes = vec![at("b", 300.0, 90.0), at("a", 10.0, 5.0)];
        let aligned = align_nodes(&nodes, Axis::Vertical);

        assert_eq!(aligned[0].position(), Point::new(300.0, 90.0));
        assert_eq!(aligned[1].position(), Point::new(300.0, 5.0));
    }

    #[test]
    fn test_distribute_empty_is_noop() {
        assert!(distribute_nodes::<()>(&[], Axis::Horizontal, 150.0).is_empty());
    }

    #[test]
    fn test_distribute_sorts_and_spaces() {
        let nodes = vec![at("c", 500.0, 1.0), at("a", 20.0, 2.0), at("b", 60.0, 3.0)];
        let spread = distribute_nodes(&nodes, Axis::Horizontal, 150.0);

        assert_eq!(ids(&spread), ["a", "b", "c"]);
        assert_approx_eq!(f32, spread[0].position().x(), 20.0);
        assert_approx_eq!(f32, spread[1].position().x(), 170.0);
        assert_approx_eq!(f32, spread[2].position().x(), 320.0);
        assert_eq!(spread[0].position().y(), 2.0);
        assert_eq!(spread[1].position().y(), 3.0);
        assert_eq!(spread[2].position().y(), 1.0);
        assert_eq!(ids(&nodes), ["c", "a", "b"]);
    }

    #[test]
    fn test_distribute_puts_nan_coordinates_last() {
        let nodes: Vec<Node<String>> = (0..64)
            .map(|index| {
                let x = if index % 7 == 0 { f32::NAN } else { 1000.0 - index as f32 };
                at(&format!("n{index}"), x, 0.0)
            })
            .collect();

        let spread = distribute_nodes(&nodes, Axis::Horizontal, 150.0);

        assert_eq!(spread.len(), 64);
        let nan_ids: Vec<String> = (0..64).step_by(7).map(|index| format!("n{index}")).collect();
        let tail: Vec<&str> = spread[64 - nan_ids.len()..].iter().map(Node::id).collect();
        assert_eq!(tail, nan_ids);
        assert_eq!(spread[0].id(), "n62");
        assert_approx_eq!(f32, spread[0].position().x(), 938.0);
        for pair in spread.windows(2) {
            assert_approx_eq!(f32, pair[1].position().x() - pair[0].position().x(), 150.0);
        }
    }

    #[test]
    fn test_distribute_keeps_signed_zeros_in_input_order() {
        let nodes = vec![at("positive", 0.0, 1.0), at("negative", -0.0, 2.0)];
        let spread = distribute_nodes(&nodes, Axis::Horizontal, 10.0);

        assert_eq!(ids(&spread), ["positive", "negative"]);
    }

    #[test]
    fn test_distribute_vertical_keeps_ties_in_input_order() {
        let nodes = vec![at("first", 0.0, 10.0), at("second", 50.0, 10.0), at("top", 9.0, -5.0)];
        let spread = distribute_nodes(&nodes, Axis::Vertical, 100.0);

        assert_eq!(ids(&spread), ["top", "first", "second"]);
        assert_eq!(spread[0].position(), Point::new(9.0, -5.0));
        assert_eq!(spread[1].position(), Point::new(0.0, 95.0));
        assert_eq!(spread[2].position(), Point::new(50.0, 195.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn nodes_strategy() -> impl Strategy<Value = Vec<Node<usize>>> {
        prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 0..24).prop_map(|points| {
            points
                .into_iter()
                .enumerate()
                .map(|(index, (x, y))| {
                    Node::new(format!("n{index}"), index).with_position(Point::new(x, y))
                })
                .collect()
        })
    }

    fn axis_strategy() -> impl Strategy<Value = Axis> {
        prop_oneof![Just(Axis::Horizontal), Just(Axis::Vertical)]
    }

    /// Adjacent distributed nodes are exactly `spacing` apart and the other
    /// coordinate of every node is preserved.
    fn check_distribution_spacing(
        nodes: Vec<Node<usize>>,
        axis: Axis,
    ) -> Result<(), TestCaseError> {
        let spread = distribute_nodes(&nodes, axis, 150.0);
        prop_assert_eq!(spread.len(), nodes.len());

        for pair in spread.windows(2) {
            let (a, b) = (pair[0].position(), pair[1].position());
            let delta = match axis {
                Axis::Horizontal => b.x() - a.x(),
                Axis::Vertical => b.y() - a.y(),
            };
            prop_assert!(approx_eq!(f32, delta, 150.0, epsilon = 0.01));
        }

        for node in &spread {
            let original = &nodes[*node.data()];
            match axis {
                Axis::Horizontal => prop_assert_eq!(node.position().y(), original.position().y()),
                Axis::Vertical => prop_assert_eq!(node.position().x(), original.position().x()),
            }
        }
        Ok(())
    }

    /// Alignment preserves order and the free coordinate, and fixes the other
    /// one to the first node's value.
    fn check_alignment(nodes: Vec<Node<usize>>, axis: Axis) -> Result<(), TestCaseError> {
        let aligned = align_nodes(&nodes, axis);
        prop_assert_eq!(aligned.len(), nodes.len());

        for (before, after) in nodes.iter().zip(&aligned) {
            prop_assert_eq!(before.id(), after.id());
            let anchor = nodes[0].position();
            match axis {
                Axis::Horizontal => {
                    prop_assert_eq!(after.position().y(), anchor.y());
                    prop_assert_eq!(after.position().x(), before.position().x());
                }
                Axis::Vertical => {
                    prop_assert_eq!(after.position().x(), anchor.x());
                    prop_assert_eq!(after.position().y(), before.position().y());
                }
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn distribution_spacing(nodes in nodes_strategy(), axis in axis_strategy()) {
            check_distribution_spacing(nodes, axis)?;
        }

        #[test]
        fn alignment(nodes in nodes_strategy(), axis in axis_strategy()) {
            check_alignment(nodes, axis)?;
        }
    }
}
