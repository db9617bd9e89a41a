//! Error types for world and mod operations.
//!
//! All fallible functions in this crate return [`Result<T>`], which uses [`Error`]
//! as the error type. Resource level errors, I/O and MessagePack failures are
//! converted via `From` impls.

use resmod_resource::ResourceId;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with the world manifest and mods.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the resource layer (block access, patches, configuration).
    #[error(transparent)]
    Resource(#[from] resmod_resource::Error),

    /// A manifest entry position outside of the valid range.
    #[error("invalid entry position {position}, manifest has {count} entries")]
    InvalidEntryPosition { position: usize, count: usize },

    /// A texture index outside of the configured property table.
    #[error("texture index {index} out of range, table has {count} entries")]
    TextureIndexOutOfRange { index: usize, count: usize },

    /// An action of a transaction could not be applied.
    ///
    /// Actions before `index` have been applied, the failing one and all after it
    /// have not.
    #[error("transaction action {index} failed: {source}")]
    TransactionFailed {
        index: usize,
        id: Option<ResourceId>,
        #[source]
        source: Box<Error>,
    },

    /// The file is not a mod snapshot.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The snapshot was written by an unknown format version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedSnapshotVersion(u32),

    /// Failed to serialize a snapshot.
    #[error("encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to deserialize a snapshot.
    #[error("decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Filesystem I/O failed (reading or writing snapshots and configuration).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
