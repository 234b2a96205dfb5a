use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Invocation-wide configuration, loaded once at startup and immutable
/// for the rest of the run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub asana: AsanaConfig,
    pub quip: QuipConfig,
}

/// Task source credentials and project selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AsanaConfig {
    pub access_token: String,
    /// Project GIDs to include in the digest, in report order.
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Document sink credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuipConfig {
    pub access_token: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Default config file location: `<config dir>/weekly/config.toml`.
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be determined.
pub fn config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Failed to get config dir"))?;
    path.push("weekly");
    path.push("config.toml");
    Ok(path)
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.asana.project_ids.is_empty() {
            anyhow::bail!("Config has no asana.project_ids; nothing to report on");
        }

        log::debug!(
            "Loaded config from {} ({} projects)",
            path.display(),
            config.asana.project_ids.len()
        );
        Ok(config)
    }

    /// Starter file contents written by `weekly config init`.
    #[must_use]
    pub fn template() -> &'static str {
        "\
[asana]
access_token = \"\"
project_ids = []
# base_url = \"https://app.asana.com\"

[quip]
access_token = \"\"
# base_url = \"https://platform.quip.com\"
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[asana]
access_token = "asana-token"
project_ids = ["120000001", "120000002"]

[quip]
access_token = "quip-token"
base_url = "https://quip.example.com"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.asana.project_ids.len(), 2);
        assert_eq!(config.asana.base_url, None);
        assert_eq!(
            config.quip.base_url.as_deref(),
            Some("https://quip.example.com")
        );
    }

    #[test]
    fn rejects_empty_project_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[asana]
access_token = "asana-token"
project_ids = []

[quip]
access_token = "quip-token"
"#
        )
        .unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("project_ids"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load_from(Path::new("/nonexistent/weekly.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn template_parses() {
        let config: Result<Config, _> = toml::from_str(Config::template());
        assert!(config.is_ok());
    }
}
