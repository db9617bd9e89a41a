use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use camino::Utf8PathBuf;
use commands::{
    clear_mod_config, export_block, import_block, info_snapshot, remove_resource, set_mod_config,
    show_config, ExportBlockArgs, ImportBlockArgs, InfoSnapshotArgs, RemoveResourceArgs,
};
use miette::Result;
use resmod_resource::{Language, ResourceId};
use utils::ModSource;

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the overrides and properties of a mod snapshot
    Info {
        #[command(flatten)]
        source: ModSource,
    },
    /// Write a resolved block to a file
    Export {
        #[command(flatten)]
        source: ModSource,

        /// The resource id, decimal or hexadecimal (0x0800)
        #[arg(short, long)]
        id: ResourceId,

        /// The language to resolve the block for
        #[arg(short, long, default_value = "any")]
        lang: Language,

        /// The block index
        #[arg(short = 'n', long, default_value_t = 0)]
        index: usize,

        /// The file to write the block to
        #[arg(short, long)]
        output: Utf8PathBuf,
    },
    /// Replace a block with the content of a file
    Import {
        #[command(flatten)]
        source: ModSource,

        /// The resource id, decimal or hexadecimal (0x0800)
        #[arg(short, long)]
        id: ResourceId,

        /// The language of the override
        #[arg(short, long, default_value = "any")]
        lang: Language,

        /// The block index
        #[arg(short = 'n', long, default_value_t = 0)]
        index: usize,

        /// The file holding the new block data
        #[arg(long)]
        input: Utf8PathBuf,

        /// Store the change as a patch of the current block; lengths must match
        #[arg(long, default_value_t = false)]
        patch: bool,
    },
    /// Remove the overrides of a resource
    Remove {
        #[command(flatten)]
        source: ModSource,

        /// The resource id, decimal or hexadecimal (0x0800)
        #[arg(short, long)]
        id: ResourceId,

        /// The language whose overrides are removed; "any" removes all
        #[arg(short, long, default_value = "any")]
        lang: Language,
    },
    /// Show or change the application configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Use a resource info TOML file by default
    SetModConfig {
        /// The path to the resource info TOML file
        path: Utf8PathBuf,
    },
    /// Go back to the built-in defaults
    ClearModConfig,
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "resmod=info,resmod_world=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args();

    match args.command {
        Commands::Info { source } => info_snapshot(InfoSnapshotArgs { source }),
        Commands::Export {
            source,
            id,
            lang,
            index,
            output,
        } => export_block(ExportBlockArgs {
            source,
            id,
            lang,
            index,
            output,
        }),
        Commands::Import {
            source,
            id,
            lang,
            index,
            input,
            patch,
        } => import_block(ImportBlockArgs {
            source,
            id,
            lang,
            index,
            input,
            patch,
        }),
        Commands::Remove { source, id, lang } => {
            remove_resource(RemoveResourceArgs { source, id, lang })
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => show_config(),
            ConfigAction::SetModConfig { path } => set_mod_config(path),
            ConfigAction::ClearModConfig => clear_mod_config(),
        },
    }
}
