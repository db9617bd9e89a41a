use crate::errors::CliError;
use crate::utils::config;
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::Result;
use resmod_world::ModConfig;

fn print_path_config(name: &str, path: Option<&Utf8PathBuf>) {
    match path {
        Some(p) => {
            let status = if p.exists() {
                "✓".bright_green()
            } else {
                "✗".bright_red()
            };
            println!("  {} {} {}", format!("{}:", name).bright_white(), p, status);
        }
        None => {
            println!(
                "  {} {}",
                format!("{}:", name).bright_white(),
                "(not set, using defaults)".bright_yellow()
            );
        }
    }
}

pub fn show_config() -> Result<()> {
    let cfg = config::load_config();
    let config_path = config::default_config_path()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    println!();
    println!("  {} {}", "config_file:".bright_white(), config_path);
    print_path_config("mod_config", cfg.mod_config.as_ref());

    let mod_config = config::load_mod_config(None)?;
    println!(
        "  {} {}",
        "texture_count:".bright_white(),
        mod_config.texture_count
    );
    println!(
        "  {} {}",
        "resource_infos:".bright_white(),
        mod_config.resource_info.len()
    );
    println!();
    Ok(())
}

pub fn set_mod_config(path: Utf8PathBuf) -> Result<()> {
    if !path.exists() {
        return Err(CliError::file_not_found(path).into());
    }
    let mod_config = ModConfig::load(&path).map_err(|err| CliError::mod_config(path.clone(), err))?;

    let mut cfg = config::load_config();
    cfg.mod_config = Some(path.clone());
    config::save_config(&cfg).map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;

    println!(
        "{}",
        "✓ Mod config set successfully!".bright_green().bold()
    );
    println!();
    println!(
        "  {} {}",
        "Path:".bright_white().bold(),
        path.as_str().bright_green()
    );
    println!(
        "  {} {}",
        "Resource infos:".bright_white().bold(),
        mod_config.resource_info.len()
    );
    Ok(())
}

pub fn clear_mod_config() -> Result<()> {
    let mut cfg = config::load_config();
    cfg.mod_config = None;
    config::save_config(&cfg).map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;
    println!("{}", "✓ Mod config cleared".bright_green().bold());
    Ok(())
}
