use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default hosted backend; override via config when self-hosting.
const DEFAULT_BASE_URL: &str = "https://fakejobdetector-qz8s.onrender.com";

/// Root configuration structure, deserialized from `.jobscan/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Classification service settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Local evaluation history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the classification service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryConfig {
    /// How many recent evaluations to keep.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
    /// Override for the history file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_history_limit() -> usize {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            limit: default_history_limit(),
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.jobscan/config.toml`
/// 3. `~/.config/jobscan/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()));
    }

    let local_config = Path::new(".jobscan").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("jobscan").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.history.limit, 5);
        assert!(cfg.history.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000"
            timeout_secs = 5

            [history]
            limit = 10
            path = "/tmp/jobscan-history.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:5000");
        assert_eq!(cfg.api.timeout_secs, 5);
        assert_eq!(cfg.history.limit, 10);
        assert_eq!(
            cfg.history.path,
            Some(PathBuf::from("/tmp/jobscan-history.json"))
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:5000"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:5000");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.history.limit, 5);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.history.limit, 5);
    }

    #[test]
    fn test_override_path_missing_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_override_path_loaded() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[history]\nlimit = 3").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.history.limit, 3);
    }
}
