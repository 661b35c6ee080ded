//! Command-line argument definitions for the Stratum CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each [`Command`] reads a diagram JSON document and writes
//! the rearranged document back out.

use clap::{Parser, Subcommand};

use stratum_core::orientation::{Axis, Direction};

/// Command-line arguments for the Stratum layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Operation to run on the input diagram.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a layered layout for every node
    Layout {
        /// Path to the input diagram (JSON)
        input: String,

        /// Path to the output diagram (JSON)
        #[arg(short, long, default_value = "out.json")]
        output: String,

        /// Rank direction (TB, BT, LR, RL)
        #[arg(short, long)]
        direction: Option<Direction>,

        /// Gap between nodes of the same rank
        #[arg(long)]
        node_sep: Option<f32>,

        /// Gap between consecutive ranks
        #[arg(long)]
        rank_sep: Option<f32>,

        /// JSON object mapping node ids to `{"width": .., "height": ..}`
        #[arg(long)]
        sizes: Option<String>,
    },

    /// Align every node on the first node of the list
    Align {
        /// Path to the input diagram (JSON)
        input: String,

        /// Path to the output diagram (JSON)
        #[arg(short, long, default_value = "out.json")]
        output: String,

        /// `horizontal` shares the first node's y, `vertical` its x
        #[arg(short, long)]
        axis: Axis,
    },

    /// Spread nodes evenly along an axis
    Distribute {
        /// Path to the input diagram (JSON)
        input: String,

        /// Path to the output diagram (JSON)
        #[arg(short, long, default_value = "out.json")]
        output: String,

        /// `horizontal` spreads x, `vertical` spreads y
        #[arg(short, long)]
        axis: Axis,

        /// Step between consecutive nodes [default: `arrange.spacing` from
        /// the configuration, or 150]
        #[arg(short, long)]
        spacing: Option<f32>,
    },
}

impl Command {
    /// Returns the input path of the command.
    pub fn input(&self) -> &str {
        match self {
            Self::Layout { input, .. }
            | Self::Align { input, .. }
            | Self::Distribute { input, .. } => input,
        }
    }

    /// Returns the output path of the command.
    pub fn output(&self) -> &str {
        match self {
            Self::Layout { output, .. }
            | Self::Align { output, .. }
            | Self::Distribute { output, .. } => output,
        }
    }
}
