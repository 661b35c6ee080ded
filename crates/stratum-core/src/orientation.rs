//! Layering directions and arrangement axes.
//!
//! [`Direction`] controls which way ranks flow in an automatic layout, and
//! [`Axis`] selects the coordinate manual arrangement operations work on.
//! Both use the short string forms editors exchange (`"TB"`, `"LR"`,
//! `"horizontal"`, ...) for parsing, printing and serde.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a [`Direction`] or [`Axis`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOrientationError {
    #[error("unknown layout direction `{0}`, expected one of TB, BT, LR, RL")]
    Direction(String),

    #[error("unknown axis `{0}`, expected `horizontal` or `vertical`")]
    Axis(String),
}

/// Direction in which ranks of a layered layout are stacked.
///
/// # Examples
///
/// ```
/// # use stratum_core::orientation::Direction;
/// let direction: Direction = "LR".parse().unwrap();
/// assert_eq!(direction, Direction::LeftToRight);
/// assert!(!direction.is_vertical());
/// assert_eq!(direction.to_string(), "LR");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks grow downward.
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,

    /// Ranks grow upward.
    #[serde(rename = "BT")]
    BottomToTop,

    /// Ranks grow rightward.
    #[serde(rename = "LR")]
    LeftToRight,

    /// Ranks grow leftward.
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Returns true when ranks are stacked along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    /// Returns true when rank order runs against the axis (bottom-up or right-to-left).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }

    /// Returns the short form of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(ParseOrientationError::Direction(s.to_string())),
        }
    }
}

/// Axis used by manual arrangement operations.
///
/// `Horizontal` arranges nodes into a row (alignment shares a y coordinate,
/// distribution spreads x). `Vertical` arranges nodes into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Returns the lowercase name of the axis.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ParseOrientationError::Axis(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_accepts_any_case() {
        assert_eq!("tb".parse::<Direction>(), Ok(Direction::TopToBottom));
        assert_eq!(" BT ".parse::<Direction>(), Ok(Direction::BottomToTop));
        assert_eq!("Rl".parse::<Direction>(), Ok(Direction::RightToLeft));
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(ParseOrientationError::Direction("diagonal".to_string()))
        );
    }

    #[test]
    fn test_direction_properties() {
        assert!(Direction::TopToBottom.is_vertical());
        assert!(Direction::BottomToTop.is_vertical());
        assert!(!Direction::LeftToRight.is_vertical());
        assert!(Direction::RightToLeft.is_reversed());
        assert!(!Direction::LeftToRight.is_reversed());
        assert_eq!(Direction::default(), Direction::TopToBottom);
    }

    #[test]
    fn test_direction_serde_uses_short_form() {
        let json = serde_json::to_string(&Direction::RightToLeft).unwrap();
        assert_eq!(json, "\"RL\"");

        let parsed: Direction = serde_json::from_str("\"LR\"").unwrap();
        assert_eq!(parsed, Direction::LeftToRight);
    }

    #[test]
    fn test_axis_round_trip() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            assert_eq!(axis.to_string().parse::<Axis>(), Ok(axis));
        }
        assert!("depth".parse::<Axis>().is_err());

        let parsed: Axis = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(parsed, Axis::Vertical);
    }
}
