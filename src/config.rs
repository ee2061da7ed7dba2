use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::locale::Locale;

pub const DEFAULT_BACKEND_URL: &str = "https://your-gym-spotter.convex.cloud";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    /// Query function returning every gym record.
    pub gyms_query: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            gyms_query: "gyms:getAll".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    pub locale: Locale,
    pub multisport_only: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let backend_url =
            std::env::var("CONVEX_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gym-spotter");

        let builder = Config::builder()
            // 1. Defaults
            .set_default("backend.url", backend_url)?
            .set_default("backend.gyms_query", "gyms:getAll")?
            .set_default("network.request_timeout_secs", 30)?
            .set_default("network.connect_timeout_secs", 10)?
            .set_default("display.locale", "cs")?
            .set_default("display.multisport_only", false)?
            // 2. Local config file
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 3. User config directory (overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))
            // 4. Environment (GYM_SPOTTER__DISPLAY__LOCALE=en)
            .add_source(
                Environment::with_prefix("GYM_SPOTTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}
