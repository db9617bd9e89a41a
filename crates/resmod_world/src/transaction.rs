//! Transactions: ordered batches of mod mutations.
//!
//! A [`ModTransaction`] queues [`ModAction`] values together with the set of
//! resource IDs they touch. The mod applies the actions strictly in the order
//! they were added and then sends a single change notification for the whole
//! batch.

use crate::error::Result;
use crate::modder::Modder;
use crate::properties::{ObjectProperties, ObjectTriple, TextureProperties};
use resmod_resource::{Language, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One queued mutation request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ModAction {
    SetBlock {
        lang: Language,
        id: ResourceId,
        index: usize,
        data: Vec<u8>,
    },
    PatchBlock {
        lang: Language,
        id: ResourceId,
        index: usize,
        expected_length: usize,
        patch: Vec<u8>,
    },
    SetBlocks {
        lang: Language,
        id: ResourceId,
        data: Vec<Vec<u8>>,
    },
    DeleteResource {
        lang: Language,
        id: ResourceId,
    },
    SetTextureProperties {
        index: usize,
        properties: TextureProperties,
    },
    SetObjectProperties {
        triple: ObjectTriple,
        properties: ObjectProperties,
    },
}

impl ModAction {
    /// The resource the action modifies, if it targets the block store.
    pub fn resource_id(&self) -> Option<ResourceId> {
        match self {
            ModAction::SetBlock { id, .. }
            | ModAction::PatchBlock { id, .. }
            | ModAction::SetBlocks { id, .. }
            | ModAction::DeleteResource { id, .. } => Some(*id),
            ModAction::SetTextureProperties { .. } | ModAction::SetObjectProperties { .. } => None,
        }
    }

    /// Perform the action on given modder.
    pub fn apply(&self, modder: &mut dyn Modder) -> Result<()> {
        match self {
            ModAction::SetBlock {
                lang,
                id,
                index,
                data,
            } => modder.set_resource_block(*lang, *id, *index, data.clone()),
            ModAction::PatchBlock {
                lang,
                id,
                index,
                expected_length,
                patch,
            } => modder.patch_resource_block(*lang, *id, *index, *expected_length, patch.clone()),
            ModAction::SetBlocks { lang, id, data } => {
                modder.set_resource_blocks(*lang, *id, data.clone())
            }
            ModAction::DeleteResource { lang, id } => modder.del_resource(*lang, *id),
            ModAction::SetTextureProperties { index, properties } => {
                modder.set_texture_properties(*index, *properties)
            }
            ModAction::SetObjectProperties { triple, properties } => {
                modder.set_object_properties(*triple, properties.clone())
            }
        }
    }
}

/// Queue of modifications to be applied as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModTransaction {
    actions: Vec<ModAction>,
    modified_ids: BTreeSet<ResourceId>,
}

impl ModTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the data of one block.
    ///
    /// Non-empty data creates the resource (meta information taken from the world)
    /// and extends it as needed. Empty data clears the block of an existing
    /// override, letting the world show through for compound lists.
    pub fn set_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        data: Vec<u8>,
    ) {
        self.push(ModAction::SetBlock {
            lang,
            id,
            index,
            data,
        });
    }

    /// Modify an existing block by a patch created with
    /// [`create_patch`](resmod_resource::create_patch).
    ///
    /// The currently resolved block must have `expected_length` bytes.
    pub fn patch_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        expected_length: usize,
        patch: Vec<u8>,
    ) {
        self.push(ModAction::PatchBlock {
            lang,
            id,
            index,
            expected_length,
            patch,
        });
    }

    /// Set the entire block list of a resource, e.g. the pages of a text.
    pub fn set_resource_blocks(&mut self, lang: Language, id: ResourceId, data: Vec<Vec<u8>>) {
        self.push(ModAction::SetBlocks { lang, id, data });
    }

    /// Remove a resource from the mod, exposing the world data again.
    pub fn del_resource(&mut self, lang: Language, id: ResourceId) {
        self.push(ModAction::DeleteResource { lang, id });
    }

    pub fn set_texture_properties(&mut self, index: usize, properties: TextureProperties) {
        self.push(ModAction::SetTextureProperties { index, properties });
    }

    pub fn set_object_properties(&mut self, triple: ObjectTriple, properties: ObjectProperties) {
        self.push(ModAction::SetObjectProperties { triple, properties });
    }

    /// Queued actions in order.
    pub fn actions(&self) -> &[ModAction] {
        &self.actions
    }

    /// IDs marked by the queued actions, ascending.
    pub fn modified_ids(&self) -> Vec<ResourceId> {
        self.modified_ids.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn push(&mut self, action: ModAction) {
        if let Some(id) = action.resource_id() {
            self.modified_ids.insert(id);
        }
        self.actions.push(action);
    }
}

impl Modder for ModTransaction {
    fn set_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        data: Vec<u8>,
    ) -> Result<()> {
        ModTransaction::set_resource_block(self, lang, id, index, data);
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
        ModTransaction::patch_resource_block(self, lang, id, index, expected_length, patch);
        Ok(())
    }

    fn set_resource_blocks(
        &mut self,
        lang: Language,
        id: ResourceId,
        data: Vec<Vec<u8>>,
    ) -> Result<()> {
        ModTransaction::set_resource_blocks(self, lang, id, data);
        Ok(())
    }

    fn del_resource(&mut self, lang: Language, id: ResourceId) -> Result<()> {
        ModTransaction::del_resource(self, lang, id);
        Ok(())
    }

    fn set_texture_properties(
        &mut self,
        index: usize,
        properties: TextureProperties,
    ) -> Result<()> {
        ModTransaction::set_texture_properties(self, index, properties);
        Ok(())
    }

    fn set_object_properties(
        &mut self,
        triple: ObjectTriple,
        properties: ObjectProperties,
    ) -> Result<()> {
        ModTransaction::set_object_properties(self, triple, properties);
        Ok(())
    }
}
