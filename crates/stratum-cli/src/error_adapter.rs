//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's standard error types
//! and miette's rich diagnostic formatting.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use stratum::StratumError;

use crate::{CliError, config::ConfigError};

/// Adapter exposing a [`CliError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io { .. } => "stratum::io",
            CliError::Json { .. } => "stratum::json",
            CliError::Config(_) => "stratum::config",
            CliError::Layout(err) if err.is_graph_error() => "stratum::graph",
            CliError::Layout(_) => "stratum::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Json { .. } => {
                "nodes need an `id`; edges need an `id`, a `source` and a `target`"
            }
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the path passed to --config"
            }
            CliError::Config(ConfigError::Parse(_) | ConfigError::Validation(_)) => {
                "see the [layout] and [arrange] tables of the configuration"
            }
            CliError::Layout(StratumError::UnknownNode { .. }) => {
                "every edge source and target must be the id of a node in the diagram"
            }
            CliError::Layout(StratumError::DuplicateNode(_)) => "node ids must be unique",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: &CliError) -> String {
        ErrorAdapter(err).code().map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_codes_follow_error_kind() {
        let unknown = CliError::Layout(StratumError::UnknownNode {
            edge: "e1".to_string(),
            node: "x".to_string(),
        });
        let layout = CliError::Layout(StratumError::Layout("boom".to_string()));
        let config = CliError::Config(ConfigError::Validation("bad".to_string()));

        assert_eq!(code(&unknown), "stratum::graph");
        assert_eq!(code(&layout), "stratum::layout");
        assert_eq!(code(&config), "stratum::config");
        assert!(ErrorAdapter(&unknown).help().is_some());
        assert!(ErrorAdapter(&layout).help().is_none());
    }

    #[test]
    fn test_display_matches_wrapped_error() {
        let err = CliError::Layout(StratumError::DuplicateNode("a".to_string()));
        assert_eq!(ErrorAdapter(&err).to_string(), err.to_string());
    }
}
