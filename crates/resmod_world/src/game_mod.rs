//! The mod overlay.
//!
//! A [`Mod`] layers sparse, per-language overrides on top of a world
//! [`Manifest`]. Reads resolve through the world first and the overrides last, so
//! an override shadows the world data of the same resource. All writes go through
//! [`Mod::modify`]: the caller fills a [`ModTransaction`], the mod applies its
//! actions in order and then reports the resources whose effective content
//! changed with a single notification.
//!
//! # Change forwarding
//!
//! The mod registers its callback with the world as well and forwards world
//! changes verbatim. It does not check whether an override hides the changed
//! world data, so listeners may be told about resources that look unchanged
//! through the mod.

use crate::callback::{notify, ModificationCallback, ResetCallback, SharedCallback};
use crate::config::ModConfig;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::modder::Modder;
use crate::persist::ModSnapshot;
use crate::properties::{
    ObjectProperties, ObjectPropertiesTable, ObjectTriple, TextureProperties,
    TexturePropertiesTable,
};
use crate::transaction::ModTransaction;
use resmod_resource::{
    create_patch, Language, LocalizedResources, LocalizedStores, Resource, ResourceFilter,
    ResourceId, ResourceInfoTable, ResourceKey, ResourceMeta, Selector,
};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A pair of patches that turn a block into its new content and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPatch {
    pub id: ResourceId,
    pub index: usize,
    /// Length of the block, identical before and after.
    pub length: usize,
    pub forward: Vec<u8>,
    pub reverse: Vec<u8>,
}

/// Fingerprints of resolved resources per language; `None` when not resolvable.
type Fingerprints = BTreeMap<(ResourceId, Language), Option<u64>>;

/// Editable overlay on top of a world manifest.
pub struct Mod {
    world: Manifest,
    config: ModConfig,
    overrides: LocalizedStores,
    texture_properties: TexturePropertiesTable,
    object_properties: ObjectPropertiesTable,
    callback: Option<SharedCallback>,
    reset_callback: Option<ResetCallback>,
}

impl fmt::Debug for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mod")
            .field("world", &self.world)
            .field("config", &self.config)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl Default for Mod {
    fn default() -> Self {
        Self::new(Manifest::new(), ModConfig::default())
    }
}

impl Mod {
    /// Create a pristine mod on top of given world.
    pub fn new(world: Manifest, config: ModConfig) -> Self {
        let texture_properties = TexturePropertiesTable::new(config.texture_count);
        Self {
            world,
            config,
            overrides: LocalizedStores::new(),
            texture_properties,
            object_properties: ObjectPropertiesTable::new(),
            callback: None,
            reset_callback: None,
        }
    }

    /// Register the callback receiving change notifications of the mod and its world.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: ModificationCallback + 'static,
    {
        self.set_callback(Some(Rc::new(callback)));
        self
    }

    /// Register a callback invoked after [`reset`](Self::reset).
    pub fn with_reset_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.reset_callback = Some(Rc::new(callback));
        self
    }

    pub fn set_callback(&mut self, callback: Option<SharedCallback>) {
        self.world.set_callback(callback.clone());
        self.callback = callback;
    }

    pub fn world(&self) -> &Manifest {
        &self.world
    }

    /// Mutable access to the world; its changes are forwarded to the mod's callback.
    pub fn world_mut(&mut self) -> &mut Manifest {
        &mut self.world
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    pub fn resource_info(&self) -> &ResourceInfoTable {
        &self.config.resource_info
    }

    /// The override stored for exactly this language, without any fallback.
    pub fn modified_resource(&self, lang: Language, id: ResourceId) -> Option<&Resource> {
        self.overrides.store(lang).get(id)
    }

    /// Data of an override block; empty if there is no such block.
    pub fn modified_block(&self, key: ResourceKey) -> Vec<u8> {
        self.modified_resource(key.lang, key.id)
            .and_then(|res| res.block(key.index).ok())
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }

    /// All blocks of an override; empty if there is no override.
    pub fn modified_blocks(&self, lang: Language, id: ResourceId) -> Vec<Vec<u8>> {
        self.modified_resource(lang, id)
            .map(|res| res.blocks().to_vec())
            .unwrap_or_default()
    }

    /// IDs of all overrides stored for exactly this language, ascending.
    pub fn modified_ids(&self, lang: Language) -> Vec<ResourceId> {
        self.overrides.store(lang).ids()
    }

    /// True if the mod holds no overrides.
    pub fn is_pristine(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Merged views of the world with the overrides for given language.
    pub fn localized_resources(&self, lang: Language) -> Selector<'_> {
        Selector::new(lang, self, &self.config.resource_info)
    }

    pub fn texture_properties(&self, index: usize) -> Option<&TextureProperties> {
        self.texture_properties.get(index)
    }

    pub fn texture_count(&self) -> usize {
        self.texture_properties.len()
    }

    pub fn object_properties(&self, triple: ObjectTriple) -> Option<&ObjectProperties> {
        self.object_properties.get(triple)
    }

    /// Modify the mod with the actions queued by `modifier`.
    ///
    /// Sends exactly one notification, listing the marked resources whose
    /// resolved content changed in any language.
    pub fn modify<F>(&mut self, modifier: F) -> Result<()>
    where
        F: FnOnce(&mut ModTransaction),
    {
        let mut trans = ModTransaction::new();
        modifier(&mut trans);
        self.commit(trans)
    }

    /// Like [`modify`](Self::modify), for modifiers that can fail.
    ///
    /// If the modifier fails, nothing is applied or notified and its error is
    /// returned.
    pub fn try_modify<F, E>(&mut self, modifier: F) -> std::result::Result<(), E>
    where
        F: FnOnce(&mut ModTransaction) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let mut trans = ModTransaction::new();
        modifier(&mut trans)?;
        self.commit(trans)?;
        Ok(())
    }

    /// Apply a prepared transaction.
    ///
    /// Application stops at the first failing action. Actions before it stay
    /// applied, the notification reports the failing resource as failed and
    /// [`Error::TransactionFailed`] is returned.
    pub fn commit(&mut self, trans: ModTransaction) -> Result<()> {
        let marked = trans.modified_ids();
        tracing::debug!(
            "Applying transaction with {} actions on {} resources",
            trans.actions().len(),
            marked.len()
        );

        let before = self.fingerprints(&marked);
        let mut failure = None;
        {
            let mut applier = Applier {
                world: &self.world,
                resource_info: &self.config.resource_info,
                overrides: &mut self.overrides,
                texture_properties: &mut self.texture_properties,
                object_properties: &mut self.object_properties,
            };
            for (index, action) in trans.actions().iter().enumerate() {
                if let Err(err) = action.apply(&mut applier) {
                    tracing::warn!("Transaction action {} failed: {}", index, err);
                    failure = Some(Error::TransactionFailed {
                        index,
                        id: action.resource_id(),
                        source: Box::new(err),
                    });
                    break;
                }
            }
        }
        let after = self.fingerprints(&marked);

        let mut modified_ids: Vec<ResourceId> = before
            .iter()
            .filter(|(key, fingerprint)| after.get(key) != Some(fingerprint))
            .map(|((id, _), _)| *id)
            .collect();
        modified_ids.dedup();

        let failed_ids: Vec<ResourceId> = match &failure {
            Some(Error::TransactionFailed { id: Some(id), .. }) => vec![*id],
            _ => Vec::new(),
        };

        notify(&self.callback, &modified_ids, &failed_ids);
        failure.map_or(Ok(()), Err)
    }

    /// Create forward and reverse patches between the currently resolved block and `new_data`.
    ///
    /// Returns `None` if the block already holds `new_data`. The block must be
    /// resolvable and `new_data` must have its length.
    pub fn create_block_patch(
        &self,
        lang: Language,
        id: ResourceId,
        index: usize,
        new_data: &[u8],
    ) -> Result<Option<BlockPatch>> {
        let view = self.localized_resources(lang).select(id)?;
        let current = view.block(index)?;
        if current == new_data {
            return Ok(None);
        }

        let forward = create_patch(new_data, current)?;
        let reverse = create_patch(current, new_data)?;
        Ok(Some(BlockPatch {
            id,
            index,
            length: current.len(),
            forward,
            reverse,
        }))
    }

    /// Image of the current overrides and property tables.
    pub fn snapshot(&self) -> ModSnapshot {
        ModSnapshot {
            overrides: self
                .overrides
                .iter()
                .filter(|(_, store)| !store.is_empty())
                .map(|(lang, store)| LocalizedResources::new(lang.as_str(), lang, store.clone()))
                .collect(),
            texture_properties: self.texture_properties.entries().to_vec(),
            object_properties: self
                .object_properties
                .iter()
                .map(|(triple, props)| (triple, props.clone()))
                .collect(),
        }
    }

    /// Replace all overrides and property tables with the content of a snapshot.
    ///
    /// Notifies every resource that was overridden before or after and then
    /// invokes the reset callback. Texture properties beyond the configured table
    /// size are dropped.
    pub fn reset(&mut self, snapshot: ModSnapshot) {
        let mut ids = self.overrides.all_ids();
        ids.extend(snapshot.ids());
        ids.sort_unstable();
        ids.dedup();

        if snapshot.texture_properties.len() > self.config.texture_count {
            tracing::warn!(
                "Snapshot holds {} texture properties, keeping {}",
                snapshot.texture_properties.len(),
                self.config.texture_count
            );
        }

        let mut overrides = LocalizedStores::new();
        for res in snapshot.overrides {
            let store = overrides.store_mut(res.language);
            for (id, resource) in res.store.iter() {
                store.put(id, resource.clone());
            }
        }
        self.overrides = overrides;
        self.texture_properties = TexturePropertiesTable::with_entries(
            self.config.texture_count,
            &snapshot.texture_properties,
        );
        self.object_properties = snapshot.object_properties.into_iter().collect();
        tracing::info!("Mod reset with {} overridden resources", self.overrides.all_ids().len());

        notify(&self.callback, &ids, &[]);
        if let Some(reset_callback) = &self.reset_callback {
            reset_callback();
        }
    }

    /// Remove all overrides and reset the property tables.
    pub fn clear(&mut self) {
        self.reset(ModSnapshot::default());
    }

    fn fingerprints(&self, ids: &[ResourceId]) -> Fingerprints {
        let mut fingerprints = Fingerprints::new();
        for lang in Language::with_any() {
            let selector = self.localized_resources(lang);
            for &id in ids {
                let fingerprint = selector.select(id).ok().map(|view| view.fingerprint());
                fingerprints.insert((id, lang), fingerprint);
            }
        }
        fingerprints
    }
}

impl ResourceFilter for Mod {
    /// World matches first, then the `Any` override, then the override of `lang`.
    fn filter(&self, lang: Language, id: ResourceId) -> Vec<&Resource> {
        filter_layers(&self.world, &self.overrides, lang, id)
    }
}

fn filter_layers<'a>(
    world: &'a Manifest,
    overrides: &'a LocalizedStores,
    lang: Language,
    id: ResourceId,
) -> Vec<&'a Resource> {
    let mut list = world.filter(lang, id);
    list.extend(overrides.store(Language::Any).get(id));
    if lang != Language::Any {
        list.extend(overrides.store(lang).get(id));
    }
    list
}

/// Applies actions onto the overrides of a mod.
struct Applier<'a> {
    world: &'a Manifest,
    resource_info: &'a ResourceInfoTable,
    overrides: &'a mut LocalizedStores,
    texture_properties: &'a mut TexturePropertiesTable,
    object_properties: &'a mut ObjectPropertiesTable,
}

struct AppliedLayers<'a, 'b>(&'b Applier<'a>);

impl ResourceFilter for AppliedLayers<'_, '_> {
    fn filter(&self, lang: Language, id: ResourceId) -> Vec<&Resource> {
        filter_layers(self.0.world, &*self.0.overrides, lang, id)
    }
}

impl Applier<'_> {
    fn ensure_resource(&mut self, lang: Language, id: ResourceId) -> &mut Resource {
        let world = self.world;
        let resource_info = self.resource_info;
        self.overrides
            .store_mut(lang)
            .get_or_insert_with(id, || {
                Resource::new(initial_meta(world, resource_info, lang, id))
            })
    }

    fn resolved_block(&self, lang: Language, id: ResourceId, index: usize) -> Result<Vec<u8>> {
        let layers = AppliedLayers(self);
        let view = Selector::new(lang, &layers, self.resource_info).select(id)?;
        Ok(view.block(index)?.to_vec())
    }
}

/// Meta information for a new override: first world match, then configuration.
fn initial_meta(
    world: &Manifest,
    resource_info: &ResourceInfoTable,
    lang: Language,
    id: ResourceId,
) -> ResourceMeta {
    world
        .filter(lang, id)
        .first()
        .map(|res| res.meta())
        .or_else(|| resource_info.info(id).map(|info| info.meta()))
        .unwrap_or_default()
}

impl Modder for Applier<'_> {
    fn set_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        data: Vec<u8>,
    ) -> Result<()> {
        if data.is_empty() {
            if let Some(res) = self.overrides.store_mut(lang).get_mut(id) {
                if index < res.block_count() {
                    res.set_block(index, data)?;
                }
            }
            return Ok(());
        }
        Resource::check_block_index(index)?;
        self.ensure_resource(lang, id).set_block(index, data)?;
        Ok(())
    }

    fn patch_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        expected_length: usize,
        patch: Vec<u8>,
    ) -> Result<()> {
        let mut data = self.resolved_block(lang, id, index)?;
        if data.len() != expected_length {
            return Err(resmod_resource::Error::PatchLengthMismatch {
                expected: expected_length,
                actual: data.len(),
            }
            .into());
        }
        resmod_resource::apply_patch(&patch, &mut data)?;
        self.ensure_resource(lang, id).set_block(index, data)?;
        Ok(())
    }

    fn set_resource_blocks(
        &mut self,
        lang: Language,
        id: ResourceId,
        data: Vec<Vec<u8>>,
    ) -> Result<()> {
        self.ensure_resource(lang, id).set_blocks(data);
        Ok(())
    }

    fn del_resource(&mut self, lang: Language, id: ResourceId) -> Result<()> {
        for other in Language::with_any() {
            if lang.includes(other) {
                self.overrides.store_mut(other).remove(id);
            }
        }
        Ok(())
    }

    fn set_texture_properties(
        &mut self,
        index: usize,
        properties: TextureProperties,
    ) -> Result<()> {
        self.texture_properties.set(index, properties)
    }

    fn set_object_properties(
        &mut self,
        triple: ObjectTriple,
        properties: ObjectProperties,
    ) -> Result<()> {
        self.object_properties.set(triple, properties);
        Ok(())
    }
}
