use crate::error::Result;
use crate::properties::{ObjectProperties, ObjectTriple, TextureProperties};
use resmod_resource::{Language, ResourceId};

/// Target of mod mutations.
///
/// Implemented by [`ModTransaction`](crate::ModTransaction), which queues the
/// requests, and by the mod itself while a transaction is applied. Test doubles
/// implement it to record what a command would do.
pub trait Modder {
    /// Set the data of one block.
    ///
    /// Non-empty data creates the resource and extends its block list as needed.
    /// Empty data clears the block of an existing override; for compound lists the
    /// underlying world block becomes visible again.
    fn set_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        data: Vec<u8>,
    ) -> Result<()>;

    /// Apply a patch to the currently resolved block, which must have `expected_length` bytes.
    fn patch_resource_block(
        &mut self,
        lang: Language,
        id: ResourceId,
        index: usize,
        expected_length: usize,
        patch: Vec<u8>,
    ) -> Result<()>;

    /// Replace the whole block list of a resource.
    fn set_resource_blocks(&mut self, lang: Language, id: ResourceId, data: Vec<Vec<u8>>)
        -> Result<()>;

    /// Remove the resource in every language that `lang` includes.
    fn del_resource(&mut self, lang: Language, id: ResourceId) -> Result<()>;

    fn set_texture_properties(&mut self, index: usize, properties: TextureProperties)
        -> Result<()>;

    fn set_object_properties(
        &mut self,
        triple: ObjectTriple,
        properties: ObjectProperties,
    ) -> Result<()>;
}
