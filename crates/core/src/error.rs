// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating resolver configuration.
///
/// Resolution itself is total and has no error type; only the configuration
/// surface can fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config extension (expected .json or .toml): {path}")]
    UnsupportedExtension { path: PathBuf },

    #[error("Malformed JSON config: {0}")]
    MalformedJson(String),

    #[error("Malformed TOML config: {0}")]
    MalformedToml(String),

    #[error("Default document name is empty")]
    EmptyDefaultDocument,

    #[error("Document suffix is empty")]
    EmptySuffix,

    #[error("Phrase entry {index} has an empty phrase")]
    EmptyPhrase { index: usize },

    #[error("Phrase entry {index} ({phrase:?}) maps to page 0; pages are 1-based")]
    ZeroPhrasePage { index: usize, phrase: String },

    #[error("Topic rule {label:?} has no clauses")]
    EmptyRule { label: String },

    #[error("Topic rule {label:?} contains an empty term group")]
    EmptyTermGroup { label: String },

    #[error("Topic rule {label:?} maps to page 0; pages are 1-based")]
    ZeroRulePage { label: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
