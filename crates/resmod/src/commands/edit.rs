use crate::errors::CliError;
use crate::utils::{load_mod, ModSource};
use camino::Utf8PathBuf;
use colored::Colorize;
use resmod_resource::{Language, ResourceId};
use resmod_undo::{
    Command, Commander, DelResourceCommand, ModEditor, PatchBlocksCommand, SetBlockCommand,
};

pub struct ImportBlockArgs {
    pub source: ModSource,
    pub id: ResourceId,
    pub lang: Language,
    pub index: usize,
    pub input: Utf8PathBuf,
    /// Record the change as a patch against the resolved block.
    pub patch: bool,
}

pub struct RemoveResourceArgs {
    pub source: ModSource,
    pub id: ResourceId,
    pub lang: Language,
}

/// Replaces one block of a resource with the content of a file and saves the mod.
pub fn import_block(args: ImportBlockArgs) -> miette::Result<()> {
    if !args.input.exists() {
        return Err(CliError::file_not_found(args.input.clone()).into());
    }
    let data = std::fs::read(&args.input).map_err(CliError::from)?;
    let game_mod = load_mod(&args.source)?;

    let command: Option<Box<dyn Command>> = if args.patch {
        let current = game_mod
            .localized_resources(args.lang)
            .select(args.id)
            .map_err(|_| CliError::resource_not_found(args.id, args.lang))?
            .block(args.index)
            .map_err(|err| CliError::from(resmod_world::Error::from(err)))?
            .len();
        if current != data.len() {
            return Err(
                CliError::patch_length_mismatch(args.id, args.index, current, data.len()).into(),
            );
        }
        PatchBlocksCommand::new(&game_mod, args.lang, args.id, vec![(args.index, data)])
            .map_err(CliError::from)?
            .map(|command| Box::new(command) as Box<dyn Command>)
    } else {
        Some(Box::new(SetBlockCommand::new(
            &game_mod,
            args.lang,
            args.id,
            args.index,
            data,
        )))
    };

    let Some(command) = command else {
        println!(
            "{}",
            "Block already holds this data, nothing to do".bright_yellow()
        );
        return Ok(());
    };

    let description = command.description().to_string();
    let editor = run_command(game_mod, command)?;
    save(&editor, &args.source)?;
    println!(
        "{} {}",
        "✓".bright_green().bold(),
        description.bright_white().bold()
    );
    Ok(())
}

/// Removes the overrides of a resource and saves the mod.
pub fn remove_resource(args: RemoveResourceArgs) -> miette::Result<()> {
    let game_mod = load_mod(&args.source)?;
    let overridden = Language::with_any()
        .filter(|other| args.lang.includes(*other))
        .any(|other| game_mod.modified_resource(other, args.id).is_some());
    if !overridden {
        return Err(CliError::resource_not_overridden(args.id, args.lang).into());
    }

    let command = DelResourceCommand::new(&game_mod, args.lang, args.id);
    let editor = run_command(game_mod, Box::new(command))?;
    save(&editor, &args.source)?;
    println!(
        "{} {}",
        "✓ Removed".bright_green().bold(),
        format!("{} ({})", args.id, args.lang).bright_white().bold()
    );
    Ok(())
}

fn run_command(
    game_mod: resmod_world::Mod,
    command: Box<dyn Command>,
) -> Result<ModEditor, CliError> {
    let mut editor = ModEditor::new(game_mod.with_callback(
        |modified: &[ResourceId], failed: &[ResourceId]| {
            for id in modified {
                tracing::debug!("Resource {} modified", id);
            }
            for id in failed {
                tracing::warn!("Resource {} failed to update", id);
            }
        },
    ));
    editor.queue(command)?;
    Ok(editor)
}

fn save(editor: &ModEditor, source: &ModSource) -> Result<(), CliError> {
    editor.game_mod().snapshot().save(&source.file_path)?;
    tracing::info!("Saved snapshot {}", source.file_path);
    Ok(())
}
