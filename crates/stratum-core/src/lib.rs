//! Stratum Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stratum layout
//! engine and its callers. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Graph model**: Caller-owned nodes and edges ([`graph`] module)
//! - **Orientation**: Layering directions and arrangement axes ([`orientation`] module)

pub mod geometry;
pub mod graph;
pub mod orientation;
