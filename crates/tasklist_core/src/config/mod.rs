use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKLIST_CONFIG_PATH";

/// User configuration. Everything is optional; an absent file is a
/// perfectly valid configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_dir: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Result of a tolerant config load: defaults plus the error that made
/// them necessary, if any. Callers decide whether to surface it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<StoreError>,
}

pub fn config_path() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| StoreError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("tasklist")
            .join(CONFIG_FILE_NAME))
    } else {
        let home =
            std::env::var("HOME").map_err(|_| StoreError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("tasklist")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| StoreError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        StoreError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, load_config_from_path, load_config_with_fallback_from_path};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
    }

    #[test]
    fn missing_config_falls_back_to_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn invalid_config_falls_back_to_defaults_with_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_some());
    }

    #[test]
    fn valid_config_reads_all_fields() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "store_dir": "/tmp/tasklist-demo",
            "log_level": "debug"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.store_dir.as_deref(), Some("/tmp/tasklist-demo"));
        assert_eq!(loaded.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn partial_config_leaves_missing_fields_unset() {
        let path = temp_path("partial-config.json");
        fs::write(&path, "{\"log_level\": \"warn\"}").unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.store_dir, None);
        assert_eq!(loaded.log_level.as_deref(), Some("warn"));
    }
}
