use crate::errors::CliError;
use crate::println_pad;
use crate::utils::{load_mod, ModSource};
use colored::Colorize;
use resmod_resource::Language;
use resmod_world::TextureProperties;

pub struct InfoSnapshotArgs {
    pub source: ModSource,
}

pub fn info_snapshot(args: InfoSnapshotArgs) -> miette::Result<()> {
    if !args.source.file_path.exists() {
        return Err(CliError::snapshot_not_found(args.source.file_path.clone()).into());
    }
    let game_mod = load_mod(&args.source)?;

    println_pad!(
        "{} {}",
        "📦 Snapshot:".bright_blue().bold(),
        args.source.file_path.as_str().bright_cyan().bold()
    );

    if game_mod.world().entry_count() > 0 {
        println_pad!("\n{}", "🌍 World:".bright_magenta().bold());
        for entry in game_mod.world().entries() {
            println_pad!(
                "   {} {} {}",
                "•".bright_cyan(),
                entry.id.bright_cyan().bold(),
                format!("({} resources)", entry.ids().len()).dimmed()
            );
        }
    }

    println_pad!("\n{}", "🧩 Overrides:".bright_magenta().bold());
    let mut any_override = false;
    for lang in Language::with_any() {
        let ids = game_mod.modified_ids(lang);
        if ids.is_empty() {
            continue;
        }
        any_override = true;

        println_pad!("   {}", lang.as_str().bright_green().bold());
        for id in ids {
            let Some(res) = game_mod.modified_resource(lang, id) else {
                continue;
            };
            let title = game_mod
                .resource_info()
                .info(id)
                .map(|info| info.title.as_str())
                .filter(|title| !title.is_empty())
                .unwrap_or("unknown");
            println_pad!(
                "     {} {} {} {}",
                "•".bright_cyan(),
                id.to_string().bright_white().bold(),
                title.bright_white(),
                format!(
                    "({} blocks, {} bytes, {:?})",
                    res.block_count(),
                    res.data_size(),
                    res.content_type
                )
                .dimmed()
            );
        }
    }
    if !any_override {
        println_pad!("   {}", "(none)".bright_yellow());
    }

    let snapshot = game_mod.snapshot();
    let textures = snapshot
        .texture_properties
        .iter()
        .filter(|props| **props != TextureProperties::default())
        .count();
    println_pad!("\n{}", "🏷️ Properties:".bright_magenta().bold());
    println_pad!(
        "   {} {}",
        "Textures:".bright_green(),
        format!("{} of {} set", textures, game_mod.texture_count()).bright_white()
    );
    println_pad!(
        "   {} {}",
        "Objects:".bright_green(),
        snapshot.object_properties.len().to_string().bright_white()
    );

    Ok(())
}
