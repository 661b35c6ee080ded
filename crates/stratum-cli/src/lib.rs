//! CLI logic for the Stratum layout tool.
//!
//! Reads a diagram document from JSON, runs one of the layout operations on
//! it and writes the updated document back out.

pub mod error_adapter;

mod args;
mod config;
mod document;
mod error;

pub use args::{Args, Command};
pub use config::ConfigError;
pub use document::{Document, EditorEdge, EditorNode};
pub use error::CliError;

use std::fs;

use log::info;
use serde::Serialize;

use stratum::{LayoutBuilder, SizeMap, align_nodes, distribute_nodes};

/// Run the Stratum CLI application
///
/// Loads the configuration, reads the input document, applies the selected
/// [`Command`] and writes the resulting document to the output path.
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - File I/O errors
/// - Malformed JSON input
/// - Configuration loading errors
/// - Layout errors such as edges referencing unknown nodes
pub fn run(args: &Args) -> Result<(), CliError> {
    let command = &args.command;
    info!(
        input_path = command.input(),
        output_path = command.output();
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let document = read_json::<Document>(command.input())?;
    let nodes = document.layout_nodes();

    let updated = match command {
        Command::Layout {
            direction,
            node_sep,
            rank_sep,
            sizes,
            ..
        } => {
            let mut options = app_config.layout().clone();
            if let Some(direction) = direction {
                options = options.with_direction(*direction);
            }
            if let Some(node_sep) = node_sep {
                options = options.with_node_sep(*node_sep);
            }
            if let Some(rank_sep) = rank_sep {
                options = options.with_rank_sep(*rank_sep);
            }
            let sizes = sizes
                .as_deref()
                .map(read_json::<SizeMap>)
                .transpose()?;

            let result = LayoutBuilder::new(options).compute(
                &nodes,
                &document.layout_edges(),
                sizes.as_ref(),
            )?;
            info!(
                ranks = result.solution().rank_count(),
                crossings = result.solution().crossings();
                "Layout computed"
            );

            document.with_nodes(result.nodes())
        }
        Command::Align { axis, .. } => document.with_nodes(&align_nodes(&nodes, *axis)),
        Command::Distribute { axis, spacing, .. } => {
            let spacing = spacing.unwrap_or_else(|| app_config.arrange().spacing());
            document.with_nodes(&distribute_nodes(&nodes, *axis, spacing))
        }
    };

    write_json(command.output(), &updated)?;
    info!(output_file = command.output(); "Diagram written successfully");

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, CliError> {
    let content = fs::read_to_string(path).map_err(CliError::io(path))?;
    serde_json::from_str(&content).map_err(CliError::json(path))
}

fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    let mut content = serde_json::to_string_pretty(value).map_err(CliError::json(path))?;
    content.push('\n');
    fs::write(path, content).map_err(CliError::io(path))
}
