/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sunohub.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default = "default_app")]
    pub app: AppSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    /// Signed-in user's access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Signed-in user's id, needed for publishing, reviews and "mine"
    #[serde(default)]
    pub user_id: Option<String>,

    /// Shown next to the user's reviews
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    /// Public site URL used in share links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Persisted player state (queue, shuffle, repeat)
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` defaults to `sunohub.toml` and may be absent. Environment
    /// variables override the file, e.g. `SUNOHUB_BACKEND__ANON_KEY`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(CliError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        // Override with environment variables (prefixed with SUNOHUB_)
        settings = settings.add_source(
            config::Environment::with_prefix("SUNOHUB")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            return Err(CliError::Config(
                "backend URL is required (set backend.url or SUNOHUB_BACKEND__URL)".to_string(),
            ));
        }

        if self.backend.anon_key.trim().is_empty() {
            return Err(CliError::Config(
                "backend anon key is required (set backend.anon_key or SUNOHUB_BACKEND__ANON_KEY)"
                    .to_string(),
            ));
        }

        if self.app.base_url.trim().is_empty() {
            return Err(CliError::Config("app.base_url cannot be empty".to_string()));
        }

        Ok(())
    }
}

// Default values
fn default_app() -> AppSettings {
    AppSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    "https://sunohub.app".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        state_path: default_state_path(),
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./data/player_state.json")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            app: default_app(),
            storage: default_storage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.app.base_url, "https://sunohub.app");
        assert_eq!(
            config.storage.state_path,
            PathBuf::from("./data/player_state.json")
        );
        assert!(config.backend.access_token.is_none());
    }

    #[test]
    fn test_validate_requires_backend() {
        let mut config = CliConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backend URL"));

        config.backend.url = "https://project.supabase.co".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("anon key"));

        config.backend.anon_key = "anon".to_string();
        assert!(config.validate().is_ok());
    }
}
