//! Resource model for resmod.
//!
//! This crate holds the building blocks shared by the world manifest and the mod
//! overlay: identifiers, languages, resources with their blocks, per-language
//! stores, merged read-only views, the injected resource-info configuration and
//! the block patch codec.

pub mod error;
pub mod id;
pub mod info;
pub mod key;
pub mod language;
pub mod patch;
pub mod resource;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use id::ResourceId;
pub use info::{ResourceInfo, ResourceInfoTable};
pub use key::ResourceKey;
pub use language::Language;
pub use patch::{apply_patch, create_patch};
pub use resource::{ContentType, Resource, ResourceMeta, MAX_BLOCK_COUNT};
pub use store::{LocalizedResources, LocalizedStores, Store};
pub use view::{ResourceFilter, ResourceView, Selector, TopLayerStrategy, ViewStrategy};
