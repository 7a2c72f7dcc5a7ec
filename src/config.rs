use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_timeout_secs(),
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("taskdeck")
            .join("config.json")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load the config, falling back to defaults for a missing or broken file.
pub fn load_config(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

pub fn save_config(path: &Path, config: &AppConfig) {
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::error!("Failed to create config directory: {}", e);
            return;
        }
    }
    match serde_json::to_string_pretty(config) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to save config: {}", e);
            }
        }
        Err(e) => log::error!("Failed to serialize config: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.debug_logging);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{"backend_url": "https://tasks.example.net"}"#).unwrap();
        assert_eq!(config.backend_url, "https://tasks.example.net");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn roundtrips_through_json() {
        let config = AppConfig {
            backend_url: "http://10.0.0.5:8000".to_string(),
            request_timeout_secs: 5,
            debug_logging: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<AppConfig>(&json).unwrap(), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = Path::new("/nonexistent/taskdeck/config.json");
        assert_eq!(load_config(path), AppConfig::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("taskdeck-config-{}.json", std::process::id()));
        let config = AppConfig {
            backend_url: "https://tasks.example.net".to_string(),
            request_timeout_secs: 10,
            debug_logging: false,
        };
        save_config(&path, &config);
        assert_eq!(load_config(&path), config);
        let _ = std::fs::remove_file(&path);
    }
}
