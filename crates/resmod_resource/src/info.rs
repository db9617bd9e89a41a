//! Configuration describing the known resource identifiers.
//!
//! Which identifiers exist, what they are called and whether their blocks form
//! a list (each block an independent item, e.g. one text line per block) is
//! game knowledge. It is handed to the components that need it as a
//! [`ResourceInfoTable`], typically loaded from a TOML file:
//!
//! ```toml
//! [[resource]]
//! start = 0x0867
//! count = 1
//! title = "Trap messages"
//! list = true
//! compound = true
//! content_type = "text"
//!
//! [[resource]]
//! start = 0x0FA0
//! count = 16
//! title = "Level archive"
//! content_type = "archive"
//! compressed = true
//! ```

use crate::error::Result;
use crate::id::ResourceId;
use crate::resource::{ContentType, ResourceMeta};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Describes a range of `count` identifiers starting at `start`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    pub start: ResourceId,
    #[serde(default = "default_count")]
    pub count: u16,
    #[serde(default)]
    pub title: String,
    /// Blocks are independent list items; empty blocks let lower layers show through.
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub compound: bool,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub compressed: bool,
}

fn default_count() -> u16 {
    1
}

impl ResourceInfo {
    pub fn contains(&self, id: ResourceId) -> bool {
        let start = self.start.value() as u32;
        let id = id.value() as u32;
        id >= start && id < start + self.count as u32
    }

    pub fn meta(&self) -> ResourceMeta {
        ResourceMeta {
            compound: self.compound,
            content_type: self.content_type,
            compressed: self.compressed,
        }
    }
}

/// Lookup table of [`ResourceInfo`] entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceInfoTable {
    #[serde(default, rename = "resource")]
    entries: Vec<ResourceInfo>,
}

impl ResourceInfoTable {
    pub fn new(entries: Vec<ResourceInfo>) -> Self {
        Self { entries }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the table from a TOML file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_std_path())?;
        let table = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded {} resource info entries from {}", table.len(), path);
        Ok(table)
    }

    /// Returns the first entry whose range contains `id`.
    pub fn info(&self, id: ResourceId) -> Option<&ResourceInfo> {
        self.entries.iter().find(|info| info.contains(id))
    }

    pub fn entries(&self) -> &[ResourceInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    const TABLE: &str = r#"
        [[resource]]
        start = 0x0867
        title = "Trap messages"
        list = true
        compound = true

        [[resource]]
        start = 0x0FA0
        count = 16
        title = "Level archive"
        content_type = "archive"
        compressed = true
    "#;

    #[test]
    fn test_parse_table() {
        let table = ResourceInfoTable::from_toml_str(TABLE).unwrap();
        assert_eq!(table.len(), 2);

        let trap = table.info(ResourceId::new(0x0867)).unwrap();
        assert!(trap.list);
        assert_eq!(trap.count, 1);
        assert_eq!(trap.content_type, ContentType::Text);

        let level = table.info(ResourceId::new(0x0FAF)).unwrap();
        assert_eq!(level.title, "Level archive");
        assert_eq!(level.meta().content_type, ContentType::Archive);
        assert!(level.meta().compressed);
    }

    #[test]
    fn test_range_bounds() {
        let table = ResourceInfoTable::from_toml_str(TABLE).unwrap();
        assert!(table.info(ResourceId::new(0x0F9F)).is_none());
        assert!(table.info(ResourceId::new(0x0FB0)).is_none());
        assert!(table.info(ResourceId::new(0x0868)).is_none());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ResourceInfoTable::from_toml_str("[[resource]]\nstart = \"x\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("ids.toml")).unwrap();
        std::fs::write(path.as_std_path(), TABLE).unwrap();

        let table = ResourceInfoTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
    }
}
