//! Caller-owned graph model.
//!
//! A [`Node`] carries an arbitrary payload the layout engine never looks at,
//! a top-left position, and optionally the size the rendering layer measured
//! for it. An [`Edge`] references its endpoints by node id only.
//!
//! Both types are plain values: layout and arrangement operations borrow
//! them and return new collections.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// A graph node as seen by the editor.
///
/// # Examples
///
/// ```
/// # use stratum_core::{geometry::{Point, Size}, graph::Node};
/// let node = Node::new("start", "Start")
///     .with_position(Point::new(10.0, 20.0))
///     .with_measured(Size::new(200.0, 48.0));
///
/// assert_eq!(node.id(), "start");
/// assert_eq!(*node.data(), "Start");
/// assert_eq!(node.position().x(), 10.0);
/// assert_eq!(node.measured(), Some(Size::new(200.0, 48.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<T> {
    id: String,

    data: T,

    /// Top-left corner of the node box.
    #[serde(default)]
    position: Point,

    /// Size reported by the rendering layer, if it has measured the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measured: Option<Size>,
}

impl<T> Node<T> {
    /// Creates a node at the origin without a measured size.
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
            position: Point::default(),
            measured: None,
        }
    }

    /// Returns the node with its position replaced.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Returns the node with a measured size attached.
    pub fn with_measured(mut self, size: Size) -> Self {
        self.measured = Some(size);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the top-left corner of the node.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn measured(&self) -> Option<Size> {
        self.measured
    }
}

impl<T: Clone> Node<T> {
    /// Returns a copy of the node placed at `position`, every other field unchanged.
    pub fn moved_to(&self, position: Point) -> Self {
        self.clone().with_position(position)
    }
}

/// A directed edge between two nodes, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    id: String,
    source: String,
    target: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the node this edge starts from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the id of the node this edge points to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns true if the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
