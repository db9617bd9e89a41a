//! Resource stores and their per-language partitioning.
//!
//! A [`Store`] maps identifiers to resources. [`LocalizedStores`] keeps one store
//! for every language (including [`Language::Any`]) and is what a mod uses for
//! its overrides. [`LocalizedResources`] is a single language-tagged store, as
//! contributed by one archive file to a world manifest entry.
//!
//! There is no cross-language fallback at this layer; resolving a request
//! against several languages is the job of the manifest and the mod.

use crate::id::ResourceId;
use crate::language::Language;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping of resource identifiers to resources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Store {
    resources: BTreeMap<ResourceId, Resource>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the resource under given identifier, returning any previous one.
    pub fn put(&mut self, id: ResourceId, resource: Resource) -> Option<Resource> {
        self.resources.insert(id, resource)
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.get_mut(&id)
    }

    /// Returns the identified resource, storing the one created by `create` if missing.
    pub fn get_or_insert_with<F>(&mut self, id: ResourceId, create: F) -> &mut Resource
    where
        F: FnOnce() -> Resource,
    {
        self.resources.entry(id).or_insert_with(create)
    }

    pub fn remove(&mut self, id: ResourceId) -> Option<Resource> {
        self.resources.remove(&id)
    }

    /// All identifiers in ascending order.
    pub fn ids(&self) -> Vec<ResourceId> {
        self.resources.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources.iter().map(|(id, res)| (*id, res))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<(ResourceId, Resource)> for Store {
    fn from_iter<T: IntoIterator<Item = (ResourceId, Resource)>>(iter: T) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

/// One store per language, pre-populated for every specific language and `Any`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedStores {
    stores: BTreeMap<Language, Store>,
}

impl Default for LocalizedStores {
    fn default() -> Self {
        Self {
            stores: Language::with_any().map(|lang| (lang, Store::new())).collect(),
        }
    }
}

impl LocalizedStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, lang: Language) -> &Store {
        // Every language is inserted on construction and never removed.
        &self.stores[&lang]
    }

    pub fn store_mut(&mut self, lang: Language) -> &mut Store {
        self.stores.entry(lang).or_default()
    }

    /// Iterates the stores, `Any` first.
    pub fn iter(&self) -> impl Iterator<Item = (Language, &Store)> {
        self.stores.iter().map(|(lang, store)| (*lang, store))
    }

    /// Identifiers present in any of the stores, ascending and deduplicated.
    pub fn all_ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.stores.values().flat_map(Store::ids).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.stores.values().all(Store::is_empty)
    }
}

/// A language-tagged store, typically the content of one archive file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocalizedResources {
    /// Identifies the origin, e.g. the archive filename.
    pub id: String,
    pub language: Language,
    pub store: Store,
}

impl LocalizedResources {
    pub fn new(id: impl Into<String>, language: Language, store: Store) -> Self {
        Self {
            id: id.into(),
            language,
            store,
        }
    }
}
