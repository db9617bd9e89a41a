//! The world manifest: ordered, read-mostly base data.
//!
//! A [`Manifest`] is a sequence of [`ManifestEntry`] values, each contributing
//! language-tagged stores (typically one per archive file). When several entries
//! provide the same resource, later entries take priority over earlier ones:
//! [`Manifest::filter`] returns matches in entry order and merged views take the
//! last match.
//!
//! Every mutating operation reports all resource IDs of the touched entries to the
//! registered [`ModificationCallback`](crate::ModificationCallback).

use crate::callback::{notify, SharedCallback};
use crate::error::{Error, Result};
use resmod_resource::{
    Language, LocalizedResources, Resource, ResourceFilter, ResourceId, Selector, ViewStrategy,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One contribution to the world, e.g. the content of one game directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestEntry {
    pub id: String,
    pub resources: Vec<LocalizedResources>,
}

impl ManifestEntry {
    pub fn new(id: impl Into<String>, resources: Vec<LocalizedResources>) -> Self {
        Self {
            id: id.into(),
            resources,
        }
    }

    /// All resource IDs of the entry, ascending and deduplicated.
    pub fn ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self
            .resources
            .iter()
            .flat_map(|res| res.store.ids())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Ordered list of manifest entries.
#[derive(Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    callback: Option<SharedCallback>,
}

impl fmt::Debug for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manifest")
            .field("entries", &self.entries)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback receiving change notifications, replacing any previous one.
    pub fn set_callback(&mut self, callback: Option<SharedCallback>) {
        self.callback = callback;
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, at: usize) -> Option<&ManifestEntry> {
        self.entries.get(at)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Insert an entry at given position, `0..=entry_count()`.
    pub fn insert_entry(&mut self, at: usize, entry: ManifestEntry) -> Result<()> {
        if at > self.entries.len() {
            return Err(self.invalid_position(at));
        }
        tracing::info!("Manifest: inserting entry '{}' at {}", entry.id, at);
        let ids = entry.ids();
        self.entries.insert(at, entry);
        notify(&self.callback, &ids, &[]);
        Ok(())
    }

    /// Remove the entry at given position and return it.
    pub fn remove_entry(&mut self, at: usize) -> Result<ManifestEntry> {
        if at >= self.entries.len() {
            return Err(self.invalid_position(at));
        }
        let entry = self.entries.remove(at);
        tracing::info!("Manifest: removed entry '{}' from {}", entry.id, at);
        notify(&self.callback, &entry.ids(), &[]);
        Ok(entry)
    }

    /// Replace the entry at given position.
    pub fn replace_entry(&mut self, at: usize, entry: ManifestEntry) -> Result<()> {
        if at >= self.entries.len() {
            return Err(self.invalid_position(at));
        }
        tracing::info!("Manifest: replacing entry at {} with '{}'", at, entry.id);
        let previous = std::mem::replace(&mut self.entries[at], entry);
        let ids = merged_ids(&previous, &self.entries[at]);
        notify(&self.callback, &ids, &[]);
        Ok(())
    }

    /// Move the entry at `from` so that it ends up at position `to`.
    pub fn move_entry(&mut self, to: usize, from: usize) -> Result<()> {
        let count = self.entries.len();
        if from >= count {
            return Err(self.invalid_position(from));
        }
        if to >= count {
            return Err(self.invalid_position(to));
        }
        if to == from {
            return Ok(());
        }
        let entry = self.entries.remove(from);
        tracing::info!("Manifest: moving entry '{}' from {} to {}", entry.id, from, to);
        let ids = entry.ids();
        self.entries.insert(to, entry);
        notify(&self.callback, &ids, &[]);
        Ok(())
    }

    /// Remove all entries.
    pub fn reset(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        let mut ids: Vec<ResourceId> = entries.iter().flat_map(ManifestEntry::ids).collect();
        ids.sort_unstable();
        ids.dedup();
        tracing::info!("Manifest: reset, dropped {} entries", entries.len());
        notify(&self.callback, &ids, &[]);
    }

    /// Merged read-only views for given language.
    pub fn localized_resources<'a>(
        &'a self,
        lang: Language,
        strategy: &'a dyn ViewStrategy,
    ) -> Selector<'a> {
        Selector::new(lang, self, strategy)
    }

    fn invalid_position(&self, position: usize) -> Error {
        Error::InvalidEntryPosition {
            position,
            count: self.entries.len(),
        }
    }
}

impl ResourceFilter for Manifest {
    /// Matches of all entries in entry order, lowest priority first.
    fn filter(&self, lang: Language, id: ResourceId) -> Vec<&Resource> {
        self.entries
            .iter()
            .flat_map(|entry| entry.resources.iter())
            .filter(|res| res.language.includes(lang))
            .filter_map(|res| res.store.get(id))
            .collect()
    }
}

fn merged_ids(a: &ManifestEntry, b: &ManifestEntry) -> Vec<ResourceId> {
    let mut ids = a.ids();
    ids.extend(b.ids());
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmod_resource::{Store, TopLayerStrategy};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entry(name: &str, lang: Language, id: u16, data: u8) -> ManifestEntry {
        let mut store = Store::new();
        store.put(ResourceId::new(id), Resource::from_blocks(vec![vec![data]]));
        ManifestEntry::new(name, vec![LocalizedResources::new(name, lang, store)])
    }

    fn recording_manifest() -> (Manifest, Rc<RefCell<Vec<Vec<ResourceId>>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorder = calls.clone();
        let mut manifest = Manifest::new();
        manifest.set_callback(Some(Rc::new(
            move |modified: &[ResourceId], _failed: &[ResourceId]| {
                recorder.borrow_mut().push(modified.to_vec());
            },
        )));
        (manifest, calls)
    }

    #[test]
    fn test_insert_invalid_position() {
        let mut manifest = Manifest::new();
        let err = manifest
            .insert_entry(1, entry("a", Language::Any, 1, 0xAA))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEntryPosition {
                position: 1,
                count: 0
            }
        ));
        assert_eq!(manifest.entry_count(), 0);
    }

    #[test]
    fn test_insert_notifies_entry_ids() {
        let (mut manifest, calls) = recording_manifest();
        manifest
            .insert_entry(0, entry("a", Language::Any, 0x0800, 0xAA))
            .unwrap();

        assert_eq!(manifest.entry_count(), 1);
        assert_eq!(*calls.borrow(), vec![vec![ResourceId::new(0x0800)]]);
    }

    #[test]
    fn test_later_entries_win() {
        let mut manifest = Manifest::new();
        manifest
            .insert_entry(0, entry("base", Language::Any, 1, 0xAA))
            .unwrap();
        manifest
            .insert_entry(1, entry("patch", Language::Any, 1, 0xBB))
            .unwrap();

        let view = manifest
            .localized_resources(Language::Default, &TopLayerStrategy)
            .select(ResourceId::new(1))
            .unwrap();
        assert_eq!(view.block(0).unwrap(), &[0xBB]);

        manifest.move_entry(1, 0).unwrap();
        assert_eq!(manifest.entry(1).unwrap().id, "base");
        let view = manifest
            .localized_resources(Language::Default, &TopLayerStrategy)
            .select(ResourceId::new(1))
            .unwrap();
        assert_eq!(view.block(0).unwrap(), &[0xAA]);
    }

    #[test]
    fn test_filter_respects_language() {
        let mut manifest = Manifest::new();
        manifest
            .insert_entry(0, entry("any", Language::Any, 1, 0xAA))
            .unwrap();
        manifest
            .insert_entry(1, entry("ger", Language::German, 1, 0xBB))
            .unwrap();

        assert_eq!(manifest.filter(Language::German, ResourceId::new(1)).len(), 2);
        assert_eq!(manifest.filter(Language::French, ResourceId::new(1)).len(), 1);
        assert_eq!(manifest.filter(Language::Any, ResourceId::new(1)).len(), 1);
        assert!(manifest.filter(Language::Any, ResourceId::new(2)).is_empty());
    }

    #[test]
    fn test_remove_replace_reset() {
        let (mut manifest, calls) = recording_manifest();
        manifest
            .insert_entry(0, entry("a", Language::Any, 1, 0xAA))
            .unwrap();
        manifest
            .insert_entry(1, entry("b", Language::Any, 2, 0xBB))
            .unwrap();

        manifest
            .replace_entry(0, entry("c", Language::Any, 3, 0xCC))
            .unwrap();
        let removed = manifest.remove_entry(1).unwrap();
        assert_eq!(removed.id, "b");
        assert!(manifest.remove_entry(1).is_err());
        assert!(manifest.move_entry(0, 3).is_err());

        manifest.reset();
        assert_eq!(manifest.entry_count(), 0);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[2], vec![ResourceId::new(1), ResourceId::new(3)]);
        assert_eq!(calls[3], vec![ResourceId::new(2)]);
        assert_eq!(calls[4], vec![ResourceId::new(3)]);
    }
}
