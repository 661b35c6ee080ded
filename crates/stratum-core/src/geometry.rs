//! Geometric primitives for diagram layout and positioning.
//!
//! This module provides fundamental geometric types used throughout Stratum
//! for calculating positions, sizes, and bounding boxes of graph nodes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Stratum uses the coordinate system of editor canvases:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Node positions in the public model are top-left corners. The layout solver
//! works on box centers; [`Bounds::new_from_center`] converts between the two.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// Points use `f32` coordinates. The coordinate system has origin at top-left
/// with Y increasing downward (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use stratum_core::geometry::Point;
/// let p = Point::new(10.0, 20.0).with_y(25.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.transpose(), Point::new(25.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Swaps the x and y coordinates.
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Swaps width and height.
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Returns true if both dimensions are finite and strictly positive.
    ///
    /// Editors report a zero size for nodes that have not been rendered yet,
    /// so such sizes are not usable for layout.
    ///
    /// ```
    /// # use stratum_core::geometry::Size;
    /// assert!(Size::new(120.0, 40.0).is_measurable());
    /// assert!(!Size::new(0.0, 40.0).is_measurable());
    /// assert!(!Size::new(f32::NAN, 40.0).is_measurable());
    /// ```
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratum_core::geometry::{Bounds, Point, Size};
    /// let first = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let second = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = first.merge(&second);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true when the two bounds share interior area.
    ///
    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_with_coordinates() {
        let point = Point::new(3.0, 4.0).with_x(10.0);
        assert_eq!(point, Point::new(10.0, 4.0));

        let point = point.with_y(-2.0);
        assert_eq!(point, Point::new(10.0, -2.0));
    }

    #[test]
    fn test_point_transpose() {
        assert_eq!(Point::new(1.0, 2.0).transpose(), Point::new(2.0, 1.0));
        assert_eq!(Size::new(280.0, 56.0).transpose(), Size::new(56.0, 280.0));
    }

    #[test]
    fn test_bounds_from_center_round_trips_to_top_left() {
        let size = Size::new(280.0, 56.0);
        let bounds = Bounds::new_from_center(Point::new(180.0, 68.0), size);

        assert_approx_eq!(f32, bounds.min_x(), 40.0);
        assert_approx_eq!(f32, bounds.min_y(), 40.0);
        assert_approx_eq!(f32, bounds.width(), 280.0);
        assert_approx_eq!(f32, bounds.height(), 56.0);
        assert_eq!(
            Bounds::new_from_top_left(bounds.min_point(), size),
            bounds
        );
    }

    #[test]
    fn test_bounds_intersects_ignores_touching_edges() {
        let left = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
        let overlapping = Bounds::new_from_top_left(Point::new(9.0, 9.0), Size::new(10.0, 10.0));

        assert!(!left.intersects(&touching));
        assert!(left.intersects(&overlapping));
        assert!(overlapping.intersects(&left));
    }

    #[test]
    fn test_size_is_measurable() {
        assert!(Size::new(1.0, 1.0).is_measurable());
        assert!(!Size::default().is_measurable());
        assert!(!Size::new(-5.0, 10.0).is_measurable());
        assert!(!Size::new(10.0, f32::INFINITY).is_measurable());
    }
}
