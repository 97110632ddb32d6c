//! Crate-wide error type.

use thiserror::Error;

use crate::ontology::{IriError, StoreError};

#[derive(Debug, Error)]
pub enum Error {
    /// No line of the document starts with a bracketed absolute IRI.
    #[error("could not detect the ontology root IRI")]
    RootIriMissing,

    #[error(transparent)]
    Parse(#[from] StoreError),

    #[error(transparent)]
    InvalidIri(#[from] IriError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
