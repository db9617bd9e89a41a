//! Construction-time configuration of a mod.
//!
//! ```toml
//! texture_count = 273
//!
//! [[resource]]
//! start = 0x0867
//! title = "Trap messages"
//! list = true
//! compound = true
//! ```

use crate::error::Result;
use camino::Utf8Path;
use resmod_resource::ResourceInfoTable;
use serde::{Deserialize, Serialize};

/// Default size of the texture property table.
pub const DEFAULT_TEXTURE_COUNT: usize = 273;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModConfig {
    /// Number of entries in the texture property table.
    #[serde(default = "default_texture_count")]
    pub texture_count: usize,

    /// Known resources; decides which resources are merged as compound lists.
    #[serde(flatten)]
    pub resource_info: ResourceInfoTable,
}

fn default_texture_count() -> usize {
    DEFAULT_TEXTURE_COUNT
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            texture_count: DEFAULT_TEXTURE_COUNT,
            resource_info: ResourceInfoTable::default(),
        }
    }
}

impl ModConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(resmod_resource::Error::from)
            .map_err(Into::into)
    }

    /// Load the configuration from a TOML file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_std_path())?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(
            "Loaded mod config from {} ({} textures, {} resource infos)",
            path,
            config.texture_count,
            config.resource_info.len()
        );
        Ok(config)
    }
}
