/// Configuration management command handlers
use anyhow::{Context, Result};
use clap::Subcommand;

use weekly_core::{config_path, Config};

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the current configuration (tokens masked)
    Show,
    /// Write a starter config file
    Init,
    /// Print the config file location
    Path,
}

pub fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => handle_show(),
        ConfigAction::Init => handle_init(),
        ConfigAction::Path => {
            println!("{}", config_path()?.display());
            Ok(())
        }
    }
}

fn handle_show() -> Result<()> {
    let config = Config::load()?;

    println!("[asana]");
    println!("  access_token = {}", mask(&config.asana.access_token));
    println!("  project_ids = {:?}", config.asana.project_ids);
    if let Some(url) = &config.asana.base_url {
        println!("  base_url = {url}");
    }

    println!("\n[quip]");
    println!("  access_token = {}", mask(&config.quip.access_token));
    if let Some(url) = &config.quip.base_url {
        println!("  base_url = {url}");
    }

    Ok(())
}

fn handle_init() -> Result<()> {
    let path = config_path()?;
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }
    std::fs::write(&path, Config::template())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Wrote {}", path.display());
    println!("Fill in the access tokens and project ids before running.");
    Ok(())
}

fn mask(token: &str) -> String {
    if token.is_empty() {
        "(not set)".to_string()
    } else {
        format!("{}***", token.chars().take(8).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_a_short_prefix() {
        assert_eq!(mask("0123456789abcdef"), "01234567***");
        assert_eq!(mask(""), "(not set)");
    }
}
