//! Error types for resource operations.
//!
//! Reading something that simply is not there is usually *not* an error in this
//! crate: lookups return `Option`s or empty collections. The variants below cover
//! the structural failures that callers must be told about.

use crate::id::ResourceId;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with resources and their blocks.
#[derive(Error, Debug)]
pub enum Error {
    /// A block was requested outside of `[0, block_count)`.
    #[error("block index wrong: {index}/{count}")]
    BlockIndexOutOfRange { index: usize, count: usize },

    /// No layer provides the requested resource.
    #[error("resource {0} not found")]
    ResourceNotFound(ResourceId),

    /// A patch was created or applied against data of the wrong size.
    #[error("patch length mismatch: expected {expected} bytes, found {actual}")]
    PatchLengthMismatch { expected: usize, actual: usize },

    /// The patch stream is truncated or writes past the end of its target.
    #[error("malformed patch: {0}")]
    MalformedPatch(String),

    /// Text could not be parsed as a resource identifier.
    #[error("invalid resource id: {0}")]
    InvalidResourceId(String),

    /// Text could not be parsed as a language.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// The resource info configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Filesystem I/O failed (reading configuration files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
