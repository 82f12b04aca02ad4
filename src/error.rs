// src/error.rs
use std::io;

use thiserror::Error;

/// Crate-wide error type.
///
/// Catalog problems (`DuplicateField`, `UnknownFactField`, `UnknownDerivedInput`,
/// `Pattern`) only ever surface while building the registry and parser set at
/// startup. Everything else is per-run or per-record.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate field definition '{0}'")]
    DuplicateField(String),

    #[error("fact parser '{0}' names a field missing from the registry")]
    UnknownFactField(String),

    #[error("derived field '{field}' reads unknown input '{input}'")]
    UnknownDerivedInput { field: String, input: String },

    #[error("invalid pattern for fact parser '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("attribute '{0}' is not populated")]
    MissingAttribute(String),

    #[error("listing {id}: HTTP status {status}")]
    HttpStatus { id: String, status: u16 },

    #[error("listing {0}: fetch produced no result")]
    NoResult(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
