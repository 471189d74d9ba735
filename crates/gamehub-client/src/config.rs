use std::path::Path;

use serde::Deserialize;

use gamehub_core::query::GameQuery;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "gamehub.toml";

/// Top-level client configuration, loaded from `gamehub.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    /// Filters the grid starts with.
    pub query: GameQuery,
}

/// Catalog API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as the `key` query parameter when set.
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.rawg.io/api".to_string(),
            api_key: None,
            request_timeout_secs: 10,
            user_agent: concat!("gamehub/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Check the config, logging warnings for non-fatal issues.
    pub fn validate(&self) -> Result<(), String> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| format!("api.base_url {:?} is not a valid URL: {e}", self.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "api.base_url must use http or https, got {:?}",
                url.scheme()
            ));
        }
        if self.api.request_timeout_secs == 0 {
            return Err("api.request_timeout_secs must be > 0".to_string());
        }

        if self.api.api_key.is_none() {
            tracing::warn!("No api.api_key configured, the catalog may reject requests");
        } else {
            tracing::debug!("api_key is set, prefer GAMEHUB_API_KEY over the config file");
        }
        Ok(())
    }

    /// Load `gamehub.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(Path::new(CONFIG_FILE));
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ClientConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {e}, using defaults");
                    ClientConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                ClientConfig::default()
            },
        }
    }

    /// Apply `GAMEHUB_*` overrides from `lookup`. Empty or unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("GAMEHUB_API_BASE_URL")
            && !url.is_empty()
        {
            self.api.base_url = url;
        }
        if let Some(key) = lookup("GAMEHUB_API_KEY")
            && !key.is_empty()
        {
            self.api.api_key = Some(key);
        }
        if let Some(val) = lookup("GAMEHUB_REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            self.api.request_timeout_secs = secs;
        }
    }
}
