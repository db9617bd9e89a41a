use crate::errors::CliError;
use camino::Utf8PathBuf;
use resmod_world::{Manifest, Mod, ModSnapshot};

pub mod config;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Where a mod is loaded from.
#[derive(clap::Args, Debug, Clone)]
pub struct ModSource {
    /// The path to the mod snapshot file
    #[arg(short, long)]
    pub file_path: Utf8PathBuf,

    /// World snapshot the mod is layered on; repeat for more, later ones win
    #[arg(short, long = "world")]
    pub world: Vec<Utf8PathBuf>,

    /// The path to the resource info TOML file (defaults to the one in config.toml)
    #[arg(short, long)]
    pub config_path: Option<Utf8PathBuf>,
}

/// Loads the world snapshots into a manifest, in the given order.
pub fn load_world(paths: &[Utf8PathBuf]) -> Result<Manifest, CliError> {
    let mut world = Manifest::new();
    for path in paths {
        let snapshot =
            ModSnapshot::load(path)?.ok_or_else(|| CliError::snapshot_not_found(path.clone()))?;
        world.insert_entry(world.entry_count(), snapshot.into_manifest_entry(path.as_str()))?;
    }
    Ok(world)
}

/// Builds the mod described by `source`.
///
/// A missing mod snapshot yields a pristine mod, so that editing commands can
/// create new snapshots.
pub fn load_mod(source: &ModSource) -> Result<Mod, CliError> {
    let config = config::load_mod_config(source.config_path.as_deref())?;
    let world = load_world(&source.world)?;
    let mut game_mod = Mod::new(world, config);

    match ModSnapshot::load(&source.file_path)? {
        Some(snapshot) => game_mod.reset(snapshot),
        None => tracing::debug!("No snapshot at {}, starting pristine", source.file_path),
    }
    Ok(game_mod)
}
