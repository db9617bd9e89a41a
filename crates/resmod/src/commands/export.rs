use crate::errors::CliError;
use crate::utils::{load_mod, ModSource};
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::IntoDiagnostic;
use resmod_resource::{Language, ResourceId};

pub struct ExportBlockArgs {
    pub source: ModSource,
    pub id: ResourceId,
    pub lang: Language,
    pub index: usize,
    pub output: Utf8PathBuf,
}

/// Writes the resolved block, as seen through mod and world, to a file.
pub fn export_block(args: ExportBlockArgs) -> miette::Result<()> {
    let game_mod = load_mod(&args.source)?;
    let view = game_mod
        .localized_resources(args.lang)
        .select(args.id)
        .map_err(|_| CliError::resource_not_found(args.id, args.lang))?;
    let data = view
        .block(args.index)
        .map_err(|err| CliError::from(resmod_world::Error::from(err)))?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    std::fs::write(&args.output, data).into_diagnostic()?;
    tracing::info!(
        "Exported block {} of {} ({}) to {}",
        args.index,
        args.id,
        args.lang,
        args.output
    );

    println!(
        "{} {} {}",
        "✓ Exported".bright_green().bold(),
        format!("{} bytes", data.len()).bright_white(),
        format!("to {}", args.output).dimmed()
    );
    Ok(())
}
