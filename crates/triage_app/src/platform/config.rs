use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use triage_engine::ServiceSettings;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "triage.ron";
/// Overrides `api_base` from the config file when set and non-empty.
pub const API_BASE_ENV: &str = "TRIAGE_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: ServiceSettings::default().api_base,
            request_timeout_secs: None,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
}

impl AppConfig {
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            api_base: self.api_base.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ServiceSettings::default()
        }
    }

    pub fn with_api_base_override(mut self, value: Option<String>) -> Self {
        if let Some(base) = value.filter(|base| !base.trim().is_empty()) {
            self.api_base = base;
        }
        self
    }
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.service_settings().request_timeout, None);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(api_base: "http://mail-ai.internal:9000/api", request_timeout_secs: Some(20))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api_base, "http://mail-ai.internal:9000/api");
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(
            config.service_settings().request_timeout,
            Some(Duration::from_secs(20))
        );
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_base: 42").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_override_replaces_base_unless_blank() {
        let config = AppConfig::default().with_api_base_override(Some("http://x:1".to_string()));
        assert_eq!(config.api_base, "http://x:1");

        let config = AppConfig::default().with_api_base_override(Some("  ".to_string()));
        assert_eq!(config.api_base, AppConfig::default().api_base);

        let config = AppConfig::default().with_api_base_override(None);
        assert_eq!(config.api_base, AppConfig::default().api_base);
    }
}
