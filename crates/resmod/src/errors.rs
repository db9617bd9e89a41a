use camino::Utf8PathBuf;
use miette::Diagnostic;
use resmod_resource::{Language, ResourceId};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Snapshot not found: {path}")]
    #[diagnostic(
        code(snapshot::not_found),
        help("World snapshots must exist; create one with `resmod import` first")
    )]
    SnapshotNotFound { path: Utf8PathBuf },

    #[error("File not found: {path}")]
    #[diagnostic(
        code(file::not_found),
        help("Make sure the file exists and the path is correct")
    )]
    FileNotFound { path: Utf8PathBuf },

    #[error("Resource {id} not found for language {lang}")]
    #[diagnostic(
        code(resource::not_found),
        help("Neither the mod nor any world snapshot provides this resource. Check the id and the --lang option")
    )]
    ResourceNotFound { id: ResourceId, lang: Language },

    #[error("Resource {id} has no override for language {lang}")]
    #[diagnostic(
        code(resource::not_overridden),
        help("Only overridden resources can be removed. Use `resmod info` to list them")
    )]
    ResourceNotOverridden { id: ResourceId, lang: Language },

    #[error("Block {index} of {id} holds {expected} bytes, the input has {actual}")]
    #[diagnostic(
        code(resource::patch_length),
        help("Patching keeps the block length. Import without --patch to replace the block")
    )]
    PatchLengthMismatch {
        id: ResourceId,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Mod configuration error")]
    #[diagnostic(
        code(config::mod_config),
        help("Check the resource info TOML file for syntax errors")
    )]
    ModConfig {
        path: Utf8PathBuf,
        #[source]
        source: resmod_world::Error,
    },

    #[error("Failed to save config: {0}")]
    #[diagnostic(code(config::save_failed))]
    ConfigSaveFailed(String),

    #[error(transparent)]
    #[diagnostic(code("mod::world"))]
    World(#[from] resmod_world::Error),

    #[error(transparent)]
    #[diagnostic(code("mod::edit"))]
    Edit(#[from] resmod_undo::Error),

    #[error("IO operation failed")]
    #[diagnostic(code(io::operation_failed))]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn snapshot_not_found(path: Utf8PathBuf) -> Self {
        Self::SnapshotNotFound { path }
    }

    pub fn file_not_found(path: Utf8PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn resource_not_found(id: ResourceId, lang: Language) -> Self {
        Self::ResourceNotFound { id, lang }
    }

    pub fn resource_not_overridden(id: ResourceId, lang: Language) -> Self {
        Self::ResourceNotOverridden { id, lang }
    }

    pub fn patch_length_mismatch(
        id: ResourceId,
        index: usize,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::PatchLengthMismatch {
            id,
            index,
            expected,
            actual,
        }
    }

    pub fn mod_config(path: Utf8PathBuf, source: resmod_world::Error) -> Self {
        Self::ModConfig { path, source }
    }
}
