use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{DEFAULT_SEED, PAGE_SIZE, TOTAL_PAGES};
use crate::feed::{FeedSettings, VisibilityGate};
use crate::source::{DEFAULT_BASE_URL, RandomUserConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub source: SourceConfig,
    pub feed: FeedConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub page_size: u32,
    pub seed: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PAGE_SIZE,
            seed: DEFAULT_SEED.to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub max_pages: u32,
    /// Drop visibility signals while a fetch is in flight
    pub guard_in_flight: bool,
    /// Artificial latency for the offline source, so the loading row is visible
    pub offline_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_pages: TOTAL_PAGES,
            guard_in_flight: false,
            offline_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            source: SourceConfig::default(),
            feed: FeedConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed.max_pages == 0 {
            eyre::bail!("feed.max_pages must be at least 1");
        }
        if self.source.page_size == 0 {
            eyre::bail!("source.page_size must be at least 1");
        }
        Ok(())
    }

    /// Loader settings derived from the `source` and `feed` sections
    pub fn feed_settings(&self) -> FeedSettings {
        let gate = if self.feed.guard_in_flight {
            VisibilityGate::InFlight
        } else {
            VisibilityGate::Unguarded
        };

        FeedSettings {
            page_size: self.source.page_size,
            max_pages: self.feed.max_pages,
            seed: self.source.seed.clone(),
            gate,
        }
    }

    /// HTTP client settings derived from the `source` section
    pub fn client_config(&self) -> RandomUserConfig {
        RandomUserConfig {
            base_url: self.source.base_url.clone(),
            timeout: Duration::from_millis(self.source.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.source.page_size, 25);
        assert_eq!(config.feed.max_pages, 10);
        assert_eq!(config.source.seed, "test");
        assert_eq!(config.source.base_url, "https://randomuser.me/api/");
        assert!(!config.feed.guard_in_flight);
    }

    #[test]
    fn test_load_explicit_file_with_partial_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "feed:\n  max_pages: 3\n  guard_in_flight: true\nsource:\n  seed: demo").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.feed.max_pages, 3);
        assert!(config.feed.guard_in_flight);
        assert_eq!(config.source.seed, "demo");
        assert_eq!(config.source.page_size, 25);
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/scrollfeed.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "feed:\n  max_pages: 0").unwrap();
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_feed_settings_gate() {
        let mut config = Config::default();
        assert_eq!(config.feed_settings().gate, VisibilityGate::Unguarded);
        config.feed.guard_in_flight = true;
        assert_eq!(config.feed_settings().gate, VisibilityGate::InFlight);
    }

    #[test]
    fn test_client_config() {
        let mut config = Config::default();
        config.source.timeout_ms = 1500;
        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_millis(1500));
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }
}
