//! Application configuration management utilities.

use crate::errors::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use resmod_world::ModConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;

/// Application-wide configuration stored in config.toml.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// TOML file with the resource info table and texture count.
    pub mod_config: Option<Utf8PathBuf>,
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (config.toml).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join("config.toml"))
}

/// Loads the application configuration from given path.
/// Returns default configuration if file doesn't exist or cannot be parsed.
pub fn load_config_from(path: &Utf8Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config {}: {}", path, err);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Loads the application configuration from config.toml.
pub fn load_config() -> AppConfig {
    default_config_path()
        .map(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Saves the application configuration to given path.
pub fn save_config_to(path: &Utf8Path, cfg: &AppConfig) -> io::Result<()> {
    let content = toml::to_string_pretty(cfg).map_err(io::Error::other)?;
    fs::write(path, content)
}

/// Saves the application configuration to config.toml.
pub fn save_config(cfg: &AppConfig) -> io::Result<()> {
    match default_config_path() {
        Some(path) => save_config_to(&path, cfg),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config path",
        )),
    }
}

/// Resolves the mod configuration: an explicit path wins over config.toml,
/// without either the built-in defaults apply.
pub fn load_mod_config(explicit: Option<&Utf8Path>) -> Result<ModConfig, CliError> {
    let app_config = load_config();
    let path = explicit
        .map(Utf8Path::to_path_buf)
        .or(app_config.mod_config);

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::file_not_found(path));
            }
            ModConfig::load(&path).map_err(|err| CliError::mod_config(path, err))
        }
        None => Ok(ModConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("config.toml")).unwrap();

        let cfg = AppConfig {
            mod_config: Some(Utf8PathBuf::from("game/resources.toml")),
        };
        save_config_to(&path, &cfg).unwrap();
        assert_eq!(load_config_from(&path), cfg);
    }

    #[test]
    fn test_missing_or_broken_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("config.toml")).unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());

        fs::write(&path, "mod_config = [").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
    }

    #[test]
    fn test_explicit_mod_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("resources.toml")).unwrap();
        fs::write(&path, "texture_count = 12\n").unwrap();

        let config = load_mod_config(Some(&path)).unwrap();
        assert_eq!(config.texture_count, 12);

        let missing = path.with_file_name("missing.toml");
        assert!(matches!(
            load_mod_config(Some(&missing)),
            Err(CliError::FileNotFound { .. })
        ));
    }
}
