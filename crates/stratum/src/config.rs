//! Configuration types for Stratum layouts.
//!
//! This module provides configuration structures that control how graphs
//! are laid out and arranged. All types implement [`serde::Deserialize`] for
//! loading from external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and arrangement settings.
//! - [`LayoutOptions`] - Direction, spacing, margins and solver effort for automatic layout.
//! - [`ArrangeConfig`] - Defaults for the manual arrangement operations.
//!
//! # Example
//!
//! ```
//! # use stratum::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_sep(), 40.0);
//! assert_eq!(config.arrange().spacing(), 150.0);
//! ```

use serde::{Deserialize, Serialize};

use stratum_core::{geometry::Size, orientation::Direction};

use crate::StratumError;

/// Default gap between neighbouring nodes of one rank.
pub const DEFAULT_NODE_SEP: f32 = 40.0;
/// Default gap between consecutive ranks.
pub const DEFAULT_RANK_SEP: f32 = 80.0;
/// Default outer margin on both axes.
pub const DEFAULT_MARGIN: f32 = 40.0;
/// Width used for nodes without any known size.
pub const DEFAULT_NODE_WIDTH: f32 = 280.0;
/// Height used for nodes without any known size.
pub const DEFAULT_NODE_HEIGHT: f32 = 56.0;
/// Default step between distributed nodes.
pub const DEFAULT_DISTRIBUTE_SPACING: f32 = 150.0;

const DEFAULT_ORDERING_PASSES: usize = 24;
const DEFAULT_ALIGNMENT_PASSES: usize = 8;

/// Top-level configuration combining layout and arrangement settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Automatic layout section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Manual arrangement section.
    #[serde(default)]
    arrange: ArrangeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutOptions, arrange: ArrangeConfig) -> Self {
        Self { layout, arrange }
    }

    /// Returns the layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns a mutable reference to the layout options.
    pub fn layout_mut(&mut self) -> &mut LayoutOptions {
        &mut self.layout
    }

    /// Returns the arrangement configuration.
    pub fn arrange(&self) -> &ArrangeConfig {
        &self.arrange
    }

    /// Returns a mutable reference to the arrangement configuration.
    pub fn arrange_mut(&mut self) -> &mut ArrangeConfig {
        &mut self.arrange
    }
}

/// Options for the automatic layered layout.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// configuration file only has to name what it changes.
///
/// # Examples
///
/// ```
/// # use stratum::config::LayoutOptions;
/// # use stratum_core::orientation::Direction;
/// let options = LayoutOptions::default()
///     .with_direction(Direction::LeftToRight)
///     .with_rank_sep(120.0);
///
/// assert_eq!(options.direction(), Direction::LeftToRight);
/// assert_eq!(options.rank_sep(), 120.0);
/// assert_eq!(options.node_sep(), 40.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    direction: Direction,
    node_sep: f32,
    rank_sep: f32,
    margin_x: f32,
    margin_y: f32,
    default_width: f32,
    default_height: f32,

    /// Upper bound on barycenter sweeps during crossing minimization.
    ordering_passes: usize,

    /// Upper bound on neighbour alignment rounds during coordinate assignment.
    alignment_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            node_sep: DEFAULT_NODE_SEP,
            rank_sep: DEFAULT_RANK_SEP,
            margin_x: DEFAULT_MARGIN,
            margin_y: DEFAULT_MARGIN,
            default_width: DEFAULT_NODE_WIDTH,
            default_height: DEFAULT_NODE_HEIGHT,
            ordering_passes: DEFAULT_ORDERING_PASSES,
            alignment_passes: DEFAULT_ALIGNMENT_PASSES,
        }
    }
}

impl LayoutOptions {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_node_sep(mut self, node_sep: f32) -> Self {
        self.node_sep = node_sep;
        self
    }

    pub fn with_rank_sep(mut self, rank_sep: f32) -> Self {
        self.rank_sep = rank_sep;
        self
    }

    /// Sets the outer margins on the x and y axes.
    pub fn with_margins(mut self, margin_x: f32, margin_y: f32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }

    /// Sets the size used for nodes with no measured or mapped size.
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_width = size.width();
        self.default_height = size.height();
        self
    }

    pub fn with_ordering_passes(mut self, passes: usize) -> Self {
        self.ordering_passes = passes;
        self
    }

    pub fn with_alignment_passes(mut self, passes: usize) -> Self {
        self.alignment_passes = passes;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node_sep(&self) -> f32 {
        self.node_sep
    }

    pub fn rank_sep(&self) -> f32 {
        self.rank_sep
    }

    pub fn margin_x(&self) -> f32 {
        self.margin_x
    }

    pub fn margin_y(&self) -> f32 {
        self.margin_y
    }

    /// Returns the fallback node size.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    pub fn ordering_passes(&self) -> usize {
        self.ordering_passes
    }

    pub fn alignment_passes(&self) -> usize {
        self.alignment_passes
    }

    /// Checks that spacings and margins are finite and non-negative and that
    /// the default node size is usable.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::InvalidOptions`] naming the first offending field.
    pub fn validate(&self) -> Result<(), StratumError> {
        let distances = [
            ("node_sep", self.node_sep),
            ("rank_sep", self.rank_sep),
            ("margin_x", self.margin_x),
            ("margin_y", self.margin_y),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(StratumError::InvalidOptions(format!(
                    "`{name}` must be a finite, non-negative number, got {value}"
                )));
            }
        }

        if !self.default_size().is_measurable() {
            return Err(StratumError::InvalidOptions(format!(
                "default node size must be positive, got {}x{}",
                self.default_width, self.default_height
            )));
        }

        Ok(())
    }
}

/// Defaults for manual arrangement operations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    /// Step between consecutive nodes when distributing.
    spacing: f32,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_DISTRIBUTE_SPACING,
        }
    }
}

impl ArrangeConfig {
    pub fn new(spacing: f32) -> Self {
        Self { spacing }
    }

    /// Returns the distribution step.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_defaults() {
        let options = LayoutOptions::default();

        assert_eq!(options.direction(), Direction::TopToBottom);
        assert_eq!(options.node_sep(), 40.0);
        assert_eq!(options.rank_sep(), 80.0);
        assert_eq!(options.margin_x(), 40.0);
        assert_eq!(options.margin_y(), 40.0);
        assert_eq!(options.default_size(), Size::new(280.0, 56.0));
    }

    #[test]
    fn test_validate_rejects_negative_spacing() {
        let err = LayoutOptions::default()
            .with_node_sep(-1.0)
            .validate()
            .unwrap_err();

        assert!(matches!(err, StratumError::InvalidOptions(msg) if msg.contains("node_sep")));
    }

    #[test]
    fn test_validate_rejects_non_finite_margin() {
        let options = LayoutOptions::default().with_margins(f32::NAN, 0.0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_default_size() {
        let options = LayoutOptions::default().with_default_size(Size::new(0.0, 56.0));
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_zero_spacing_is_valid() {
        let options = LayoutOptions::default()
            .with_node_sep(0.0)
            .with_rank_sep(0.0)
            .with_margins(0.0, 0.0);
        assert!(options.validate().is_ok());
    }
}
