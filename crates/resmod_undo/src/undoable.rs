//! Undoable block edits.
//!
//! Each command captures the override state it is about to change when it is
//! created, so that reverting restores exactly what the mod held before:
//! including whether an override existed at all.

use crate::command::Command;
use crate::error::Result;
use resmod_resource::{Language, ResourceId};
use resmod_world::{BlockPatch, Mod, Modder};

/// Overrides of one resource in every language a target language includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideState {
    lang: Language,
    id: ResourceId,
    entries: Vec<(Language, Option<Vec<Vec<u8>>>)>,
}

impl OverrideState {
    /// Capture the current overrides of `id` for `lang` and all languages it includes.
    pub fn capture(game_mod: &Mod, lang: Language, id: ResourceId) -> Self {
        let entries = Language::with_any()
            .filter(|other| lang.includes(*other))
            .map(|other| {
                let blocks = game_mod
                    .modified_resource(other, id)
                    .map(|res| res.blocks().to_vec());
                (other, blocks)
            })
            .collect();
        Self { lang, id, entries }
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The captured blocks of given language; `None` if there was no override.
    pub fn blocks(&self, lang: Language) -> Option<&[Vec<u8>]> {
        self.entries
            .iter()
            .find(|(other, _)| *other == lang)
            .and_then(|(_, blocks)| blocks.as_deref())
    }

    /// Queue the mutations that bring the overrides back to the captured state.
    pub fn write(&self, modder: &mut dyn Modder) -> Result<()> {
        for (lang, blocks) in &self.entries {
            if blocks.is_none() {
                modder.del_resource(*lang, self.id)?;
            }
        }
        for (lang, blocks) in &self.entries {
            if let Some(blocks) = blocks {
                modder.set_resource_blocks(*lang, self.id, blocks.clone())?;
            }
        }
        Ok(())
    }
}

/// Sets one block.
pub struct SetBlockCommand {
    description: String,
    index: usize,
    data: Vec<u8>,
    before: OverrideState,
}

impl SetBlockCommand {
    pub fn new(game_mod: &Mod, lang: Language, id: ResourceId, index: usize, data: Vec<u8>) -> Self {
        Self {
            description: format!("Set block {index} of {id}"),
            index,
            data,
            before: OverrideState::capture(game_mod, lang, id),
        }
    }
}

impl Command for SetBlockCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        modder.set_resource_block(self.before.lang, self.before.id, self.index, self.data.clone())?;
        Ok(())
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        self.before.write(modder)
    }
}

/// Replaces all blocks of a resource.
pub struct SetBlocksCommand {
    description: String,
    data: Vec<Vec<u8>>,
    before: OverrideState,
}

impl SetBlocksCommand {
    pub fn new(game_mod: &Mod, lang: Language, id: ResourceId, data: Vec<Vec<u8>>) -> Self {
        Self {
            description: format!("Set {} blocks of {id}", data.len()),
            data,
            before: OverrideState::capture(game_mod, lang, id),
        }
    }
}

impl Command for SetBlocksCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        modder.set_resource_blocks(self.before.lang, self.before.id, self.data.clone())?;
        Ok(())
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        self.before.write(modder)
    }
}

/// Removes the overrides of a resource.
pub struct DelResourceCommand {
    description: String,
    before: OverrideState,
}

impl DelResourceCommand {
    pub fn new(game_mod: &Mod, lang: Language, id: ResourceId) -> Self {
        Self {
            description: format!("Remove {id}"),
            before: OverrideState::capture(game_mod, lang, id),
        }
    }
}

impl Command for DelResourceCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        modder.del_resource(self.before.lang, self.before.id)?;
        Ok(())
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        self.before.write(modder)
    }
}

/// Changes blocks of equal length by patches, e.g. level maps.
///
/// Reverting applies the reverse patches. Where a patched block was not yet
/// held by an override of the target language, the prior override state is
/// written back instead, so that no override equal to the world remains.
pub struct PatchBlocksCommand {
    description: String,
    lang: Language,
    patches: Vec<BlockPatch>,
    before: Option<OverrideState>,
}

impl PatchBlocksCommand {
    /// Create patches from the currently resolved blocks to the new data.
    ///
    /// Returns `None` if no block changes.
    pub fn new(
        game_mod: &Mod,
        lang: Language,
        id: ResourceId,
        blocks: Vec<(usize, Vec<u8>)>,
    ) -> Result<Option<Self>> {
        let mut patches = Vec::new();
        for (index, data) in blocks {
            if let Some(patch) = game_mod.create_block_patch(lang, id, index, &data)? {
                patches.push(patch);
            }
        }
        if patches.is_empty() {
            return Ok(None);
        }

        let creates_blocks = match game_mod.modified_resource(lang, id) {
            Some(res) => patches
                .iter()
                .any(|patch| res.block(patch.index).map_or(true, <[u8]>::is_empty)),
            None => true,
        };
        let before = creates_blocks.then(|| OverrideState::capture(game_mod, lang, id));

        Ok(Some(Self {
            description: format!("Patch {} blocks of {id}", patches.len()),
            lang,
            patches,
            before,
        }))
    }

    pub fn patches(&self) -> &[BlockPatch] {
        &self.patches
    }
}

impl Command for PatchBlocksCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        for patch in &self.patches {
            modder.patch_resource_block(
                self.lang,
                patch.id,
                patch.index,
                patch.length,
                patch.forward.clone(),
            )?;
        }
        Ok(())
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        if let Some(before) = &self.before {
            return before.write(modder);
        }
        for patch in self.patches.iter().rev() {
            modder.patch_resource_block(
                self.lang,
                patch.id,
                patch.index,
                patch.length,
                patch.reverse.clone(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmod_resource::{LocalizedResources, Resource, Store};
    use resmod_world::{Manifest, ManifestEntry, ModAction, ModConfig, ModTransaction};

    fn mod_with_overrides() -> Mod {
        let mut game_mod = Mod::default();
        game_mod
            .modify(|trans| {
                trans.set_resource_block(Language::Any, ResourceId::new(0x0800), 0, vec![1]);
                trans.set_resource_block(Language::German, ResourceId::new(0x0800), 0, vec![2]);
            })
            .unwrap();
        game_mod
    }

    #[test]
    fn test_capture_covers_included_languages() {
        let game_mod = mod_with_overrides();

        let any = OverrideState::capture(&game_mod, Language::Any, ResourceId::new(0x0800));
        assert_eq!(any.blocks(Language::Any), Some(&[vec![1u8]][..]));
        assert_eq!(any.blocks(Language::German), Some(&[vec![2u8]][..]));
        assert_eq!(any.blocks(Language::French), None);

        let french = OverrideState::capture(&game_mod, Language::French, ResourceId::new(0x0800));
        assert_eq!(french.blocks(Language::Any), None);
        assert_eq!(french.blocks(Language::French), None);
    }

    #[test]
    fn test_write_deletes_missing_then_sets_present() {
        let game_mod = mod_with_overrides();
        let state = OverrideState::capture(&game_mod, Language::Any, ResourceId::new(0x0800));

        let mut trans = ModTransaction::new();
        state.write(&mut trans).unwrap();

        let id = ResourceId::new(0x0800);
        assert_eq!(
            trans.actions(),
            &[
                ModAction::DeleteResource {
                    lang: Language::Default,
                    id
                },
                ModAction::DeleteResource {
                    lang: Language::French,
                    id
                },
                ModAction::SetBlocks {
                    lang: Language::Any,
                    id,
                    data: vec![vec![1]]
                },
                ModAction::SetBlocks {
                    lang: Language::German,
                    id,
                    data: vec![vec![2]]
                },
            ]
        );
    }

    #[test]
    fn test_del_resource_command_restores_every_language() {
        let mut game_mod = mod_with_overrides();
        let id = ResourceId::new(0x0800);
        let command = DelResourceCommand::new(&game_mod, Language::Any, id);

        game_mod.try_modify(|trans| command.forward(trans)).unwrap();
        assert!(game_mod.is_pristine());

        game_mod.try_modify(|trans| command.reverse(trans)).unwrap();
        assert_eq!(game_mod.modified_blocks(Language::Any, id), vec![vec![1]]);
        assert_eq!(game_mod.modified_blocks(Language::German, id), vec![vec![2]]);
    }

    #[test]
    fn test_set_block_command_reverse_removes_new_override() {
        let mut game_mod = Mod::default();
        let id = ResourceId::new(0x0100);
        let command = SetBlockCommand::new(&game_mod, Language::French, id, 1, vec![7]);

        game_mod.try_modify(|trans| command.forward(trans)).unwrap();
        assert_eq!(game_mod.modified_blocks(Language::French, id), vec![vec![], vec![7]]);

        game_mod.try_modify(|trans| command.reverse(trans)).unwrap();
        assert!(game_mod.modified_resource(Language::French, id).is_none());
    }

    #[test]
    fn test_patch_blocks_command() {
        let mut game_mod = Mod::default();
        let id = ResourceId::new(0x0A00);
        game_mod
            .modify(|trans| trans.set_resource_blocks(Language::Any, id, vec![vec![0; 16], vec![5; 4]]))
            .unwrap();

        let unchanged =
            PatchBlocksCommand::new(&game_mod, Language::Any, id, vec![(1, vec![5; 4])]).unwrap();
        assert!(unchanged.is_none());

        let mut level = vec![0; 16];
        level[3] = 9;
        let command = PatchBlocksCommand::new(
            &game_mod,
            Language::Any,
            id,
            vec![(0, level.clone()), (1, vec![5; 4])],
        )
        .unwrap()
        .unwrap();
        assert_eq!(command.patches().len(), 1);

        game_mod.try_modify(|trans| command.forward(trans)).unwrap();
        assert_eq!(game_mod.modified_blocks(Language::Any, id)[0], level);

        game_mod.try_modify(|trans| command.reverse(trans)).unwrap();
        assert_eq!(game_mod.modified_blocks(Language::Any, id)[0], vec![0; 16]);
    }

    #[test]
    fn test_patch_over_world_reverts_to_pristine() {
        let id = ResourceId::new(0x0A00);
        let mut store = Store::new();
        store.put(id, Resource::from_blocks(vec![vec![0; 8]]));
        let mut world = Manifest::new();
        world
            .insert_entry(
                0,
                ManifestEntry::new("base", vec![LocalizedResources::new("base", Language::Any, store)]),
            )
            .unwrap();
        let mut game_mod = Mod::new(world, ModConfig::default());

        let mut level = vec![0; 8];
        level[2] = 3;
        let command = PatchBlocksCommand::new(&game_mod, Language::Any, id, vec![(0, level.clone())])
            .unwrap()
            .unwrap();

        game_mod.try_modify(|trans| command.forward(trans)).unwrap();
        assert_eq!(game_mod.modified_blocks(Language::Any, id), vec![level]);

        game_mod.try_modify(|trans| command.reverse(trans)).unwrap();
        assert!(game_mod.is_pristine());
    }
}
