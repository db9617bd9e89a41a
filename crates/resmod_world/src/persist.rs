//! Mod snapshot persistence.
//!
//! A [`ModSnapshot`] is the serializable image of a mod's overrides and property
//! tables. On disk it is stored as:
//!
//! | bytes | content |
//! |---|---|
//! | 4 | magic `RSMD` |
//! | 4 | format version, `u32` little endian (current: `1`) |
//! | rest | zstd compressed MessagePack of the snapshot (named fields) |
//!
//! Snapshots are either loaded back into a mod with
//! [`Mod::reset`](crate::Mod::reset) or turned into a read-only world entry with
//! [`ModSnapshot::into_manifest_entry`].

use crate::error::{Error, Result};
use crate::manifest::ManifestEntry;
use crate::properties::{ObjectProperties, ObjectTriple, TextureProperties};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use camino::Utf8Path;
use resmod_resource::{LocalizedResources, ResourceId};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

const MAGIC: [u8; 4] = *b"RSMD";

/// Serializable image of a mod.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ModSnapshot {
    /// One store per language that holds overrides.
    pub overrides: Vec<LocalizedResources>,
    pub texture_properties: Vec<TextureProperties>,
    pub object_properties: Vec<(ObjectTriple, ObjectProperties)>,
}

impl ModSnapshot {
    /// All overridden resource IDs, ascending and deduplicated.
    pub fn ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self
            .overrides
            .iter()
            .flat_map(|res| res.store.ids())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Turn the overrides into a world entry, e.g. to layer another mod on top.
    ///
    /// Property tables are not part of the world and are dropped.
    pub fn into_manifest_entry(self, id: impl Into<String>) -> ManifestEntry {
        ManifestEntry::new(id, self.overrides)
    }

    /// Read a snapshot from a reader.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|_| {
            Error::InvalidSnapshot("file too short for snapshot header".to_string())
        })?;
        if magic != MAGIC {
            return Err(Error::InvalidSnapshot(format!(
                "bad magic {:02X?}",
                magic
            )));
        }

        let version = reader.read_u32::<LE>()?;
        if version != SNAPSHOT_VERSION {
            return Err(Error::UnsupportedSnapshotVersion(version));
        }

        let decoder = zstd::Decoder::new(reader)?;
        Ok(rmp_serde::from_read(decoder)?)
    }

    /// Write the snapshot to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_u32::<LE>(SNAPSHOT_VERSION)?;

        let encoded = rmp_serde::to_vec_named(self)?;
        let mut encoder = zstd::Encoder::new(writer, 3)?;
        encoder.write_all(&encoded)?;
        encoder.finish()?;
        Ok(())
    }

    /// Load a snapshot from a file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(path: &Utf8Path) -> Result<Option<Self>> {
        if !path.as_std_path().exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(path.as_std_path())?;
        let snapshot = Self::read(&mut BufReader::new(file))?;
        tracing::info!(
            "Loaded snapshot {} with {} overridden resources",
            path,
            snapshot.ids().len()
        );
        Ok(Some(snapshot))
    }

    /// Save the snapshot to a file, creating parent directories if needed.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent.as_std_path())?;
            }
        }

        let file = std::fs::File::create(path.as_std_path())?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush()?;
        tracing::info!("Saved snapshot {}", path);
        Ok(())
    }
}
