//! World manifest and mod overlay for resmod.
//!
//! This crate provides the editable layer on top of the immutable game data:
//!
//! - **World manifest**: ordered entries of language-tagged stores, later entries win
//! - **Mod overlay**: sparse per-language overrides shadowing the world
//! - **Transactions**: ordered batches of mutations with a single change notification
//! - **Snapshots**: persistence of a mod's overrides to a compact file
//!
//! # Example
//!
//! ```
//! use resmod_resource::{Language, LocalizedResources, Resource, ResourceId, ResourceKey, Store};
//! use resmod_world::{ManifestEntry, Mod};
//!
//! # fn main() -> resmod_world::Result<()> {
//! let mut store = Store::new();
//! store.put(ResourceId::new(0x0800), Resource::from_blocks(vec![vec![0xAA]]));
//!
//! let mut game_mod = Mod::default().with_callback(|modified: &[ResourceId], _failed: &[ResourceId]| {
//!     println!("modified: {:?}", modified);
//! });
//! game_mod.world_mut().insert_entry(
//!     0,
//!     ManifestEntry::new("base", vec![LocalizedResources::new("base", Language::Any, store)]),
//! )?;
//!
//! game_mod.modify(|trans| {
//!     trans.set_resource_block(Language::Any, ResourceId::new(0x0800), 0, vec![0xBB]);
//! })?;
//!
//! let key = ResourceKey::new(Language::Any, ResourceId::new(0x0800), 0);
//! assert_eq!(game_mod.modified_block(key), vec![0xBB]);
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod config;
pub mod error;
pub mod game_mod;
pub mod manifest;
pub mod modder;
pub mod persist;
pub mod properties;
pub mod transaction;


pub use callback::{ModificationCallback, ResetCallback, SharedCallback};
pub use config::ModConfig;
pub use error::{Error, Result};
pub use game_mod::{BlockPatch, Mod};
pub use manifest::{Manifest, ManifestEntry};
pub use modder::Modder;
pub use persist::ModSnapshot;
pub use properties::{
    ObjectProperties, ObjectPropertiesTable, ObjectTriple, TextureProperties,
    TexturePropertiesTable,
};
pub use transaction::{ModAction, ModTransaction};
