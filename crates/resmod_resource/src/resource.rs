use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the data of a resource is to be interpreted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Palette,
    #[default]
    Text,
    Bitmap,
    Font,
    Animation,
    Sound,
    Geometry,
    Movie,
    Archive,
    Unknown(u8),
}

impl ContentType {
    /// The type code as stored in the archive directory.
    pub fn code(self) -> u8 {
        match self {
            ContentType::Palette => 0x00,
            ContentType::Text => 0x01,
            ContentType::Bitmap => 0x02,
            ContentType::Font => 0x03,
            ContentType::Animation => 0x04,
            ContentType::Sound => 0x07,
            ContentType::Geometry => 0x0F,
            ContentType::Movie => 0x11,
            ContentType::Archive => 0x30,
            ContentType::Unknown(code) => code,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => ContentType::Palette,
            0x01 => ContentType::Text,
            0x02 => ContentType::Bitmap,
            0x03 => ContentType::Font,
            0x04 => ContentType::Animation,
            0x07 => ContentType::Sound,
            0x0F => ContentType::Geometry,
            0x11 => ContentType::Movie,
            0x30 => ContentType::Archive,
            other => ContentType::Unknown(other),
        }
    }
}

/// Upper bound of the block count of one resource.
pub const MAX_BLOCK_COUNT: usize = 0x1_0000;

/// Meta information of a resource, independent of its block data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceMeta {
    /// True if the resource holds zero, one, or more blocks.
    pub compound: bool,
    pub content_type: ContentType,
    /// True if the resource shall be serialized in compressed form.
    pub compressed: bool,
}

/// A resource with its block data held in memory.
///
/// Block indices are dense: setting a block past the current end extends the
/// resource, and any skipped block is empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    pub compound: bool,
    pub content_type: ContentType,
    pub compressed: bool,
    blocks: Vec<Vec<u8>>,
}

impl Resource {
    /// Creates a resource without any blocks.
    pub fn new(meta: ResourceMeta) -> Self {
        Self::with_blocks(meta, Vec::new())
    }

    pub fn with_blocks(meta: ResourceMeta, blocks: Vec<Vec<u8>>) -> Self {
        Self {
            compound: meta.compound,
            content_type: meta.content_type,
            compressed: meta.compressed,
            blocks,
        }
    }

    /// Creates a resource with default meta information holding the given blocks.
    pub fn from_blocks(blocks: Vec<Vec<u8>>) -> Self {
        Self::with_blocks(ResourceMeta::default(), blocks)
    }

    pub fn meta(&self) -> ResourceMeta {
        ResourceMeta {
            compound: self.compound,
            content_type: self.content_type,
            compressed: self.compressed,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, index: usize) -> Result<&[u8]> {
        self.blocks
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::BlockIndexOutOfRange {
                index,
                count: self.blocks.len(),
            })
    }

    pub fn blocks(&self) -> &[Vec<u8>] {
        &self.blocks
    }

    /// Fails if `index` can never address a block.
    pub fn check_block_index(index: usize) -> Result<()> {
        if index >= MAX_BLOCK_COUNT {
            return Err(Error::BlockIndexOutOfRange {
                index,
                count: MAX_BLOCK_COUNT,
            });
        }
        Ok(())
    }

    /// Sets the data of the identified block, extending the resource if needed.
    pub fn set_block(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        Self::check_block_index(index)?;
        if index >= self.blocks.len() {
            self.blocks.resize_with(index + 1, Vec::new);
        }
        self.blocks[index] = data;
        Ok(())
    }

    /// Replaces all blocks, essentially resetting the resource.
    pub fn set_blocks(&mut self, blocks: Vec<Vec<u8>>) {
        self.blocks = blocks;
    }

    /// Total size of all blocks in bytes.
    pub fn data_size(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }
}
