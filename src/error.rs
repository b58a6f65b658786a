//! Error types for the content pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while splitting or validating a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("unterminated front-matter block, missing closing ---")]
    Unterminated,

    #[error("invalid YAML in front-matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("missing required front-matter field `{0}`")]
    MissingField(&'static str),

    #[error("unrecognised date `{0}`")]
    InvalidDate(String),
}

/// Errors raised by the content store, index builder and renderer
#[derive(Debug, Error)]
pub enum ContentError {
    /// The posts directory is missing or cannot be listed
    #[error("content store unavailable at {path:?}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("no post with identifier `{0}`")]
    NotFound(String),

    #[error("identifier `{id}` is used by both {first:?} and {second:?}")]
    DuplicateIdentifier {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
