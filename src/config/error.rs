//! Binding and config-source errors

use std::path::PathBuf;
use thiserror::Error;

/// Error returned when a binding cannot be registered or resolved.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A single binding failed; `name` identifies the offending binding.
    #[error("failed to bind flag {name}: {cause}")]
    Flag {
        name: String,
        #[source]
        cause: FlagError,
    },

    /// The command line itself was rejected while parsing.
    #[error(transparent)]
    Args(#[from] clap::Error),
}

impl BindingError {
    pub fn flag(name: impl Into<String>, cause: FlagError) -> Self {
        BindingError::Flag { name: name.into(), cause }
    }

    /// Name of the offending binding, when the error is tied to one.
    pub fn binding_name(&self) -> Option<&str> {
        match self {
            BindingError::Flag { name, .. } => Some(name),
            BindingError::Args(_) => None,
        }
    }
}

/// Root cause of a [`BindingError::Flag`].
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("flag name must not be empty")]
    EmptyName,

    #[error("flag --{0} is already registered")]
    DuplicateName(String),

    #[error("shorthand -{0} is already registered")]
    DuplicateShorthand(char),

    #[error("flag value is not readable from the parsed command: {0}")]
    Matches(#[from] clap::parser::MatchesError),

    #[error("{0}")]
    Resolver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error raised while loading a structured config source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed reading config source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading config stream: {0}")]
    Stream(#[source] std::io::Error),

    #[error("unsupported config extension '.{ext}' for file {}", .path.display())]
    UnsupportedExtension { ext: String, path: PathBuf },

    #[error("invalid {format} config: {source}")]
    Invalid {
        format: &'static str,
        #[source]
        source: Box<figment::Error>,
    },
}
