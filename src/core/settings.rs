use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub facebook: FacebookSettings,
    pub instagram: InstagramSettings,
    pub tumblr: TumblrSettings,
    pub twitter: TwitterSettings,
    pub github: GithubSettings,
    pub stream: StreamSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookSettings {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub api_version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramSettings {
    pub client_id: Option<String>,
    pub access_token: Option<String>,
    pub api_version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TumblrSettings {
    pub consumer_key: Option<String>,
    pub api_version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterSettings {
    pub bearer_token: Option<String>,
    pub api_version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    pub access_token: Option<String>,
    pub public: bool,
    pub user_agent: Option<String>,
    pub base_url: Option<String>,
}

/// Per-provider poll interval overrides, in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    pub interval_ms: Option<u64>,
    pub facebook_interval_ms: Option<u64>,
    pub instagram_interval_ms: Option<u64>,
    pub tumblr_interval_ms: Option<u64>,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("social-api").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("Could not determine config directory")?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(?path, "Loaded config");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let intervals = [
            ("stream.interval_ms", self.stream.interval_ms),
            ("stream.facebook_interval_ms", self.stream.facebook_interval_ms),
            ("stream.instagram_interval_ms", self.stream.instagram_interval_ms),
            ("stream.tumblr_interval_ms", self.stream.tumblr_interval_ms),
        ];
        for (key, value) in intervals {
            if value == Some(0) {
                anyhow::bail!("{key} must be greater than 0");
            }
        }
        Ok(())
    }
}
