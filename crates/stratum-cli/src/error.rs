use std::io;

use thiserror::Error;

use stratum::StratumError;

use crate::config::ConfigError;

/// Errors reported by the `stratum` command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid diagram JSON in `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] StratumError),
}

impl CliError {
    pub(crate) fn io(path: &str) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn json(path: &str) -> impl FnOnce(serde_json::Error) -> Self + '_ {
        move |source| Self::Json {
            path: path.to_string(),
            source,
        }
    }
}
