//! Error types for mspresslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a manuscript
#[derive(Error, Debug)]
pub enum MspressError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Master document does not exist
    #[error("master document not found: {0}")]
    MasterNotFound(PathBuf),

    /// Fragment directives left unmatched after substitution
    #[error("unresolved directives: {}", .0.join(", "))]
    UnresolvedDirectives(Vec<String>),

    /// An external tool could not be run or exited with an error
    #[error("failed to run '{tool}': {message}")]
    ToolInvocation { tool: String, message: String },

    /// A row of the counting tool's table did not parse
    #[error("malformed count row: '{0}'")]
    MalformedRow(String),

    /// Citation metadata could not be parsed
    #[error("failed to parse citation file '{path}': {message}")]
    CitationParse { path: PathBuf, message: String },

    /// A dataset file could not be downloaded
    #[error("failed to download '{url}': {message}")]
    Download { url: String, message: String },

    /// Dataset name not present in the registry
    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Chart rendering failed
    #[error("failed to render chart: {0}")]
    Chart(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
