use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{ChallengeError, ChallengeResult};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Theme key, see [`crate::themes::ThemeVariant::config_key`]
    pub theme: String,
    /// Event loop tick in milliseconds
    pub tick_rate_ms: u64,
    /// Default lifetime of a toast
    pub toast_duration_ms: u64,
    /// Initial page size of the employee list
    pub records_per_page: usize,
    /// Employee JSON to load instead of the bundled dataset
    pub employees_path: Option<PathBuf>,
    pub infinite_scroll: InfiniteScrollConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InfiniteScrollConfig {
    pub batch_size: usize,
    pub page_ceiling: u32,
    pub fetch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "ember".to_string(),
            tick_rate_ms: 100,
            toast_duration_ms: 3000,
            records_per_page: 10,
            employees_path: None,
            infinite_scroll: InfiniteScrollConfig::default(),
        }
    }
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            batch_size: 6,
            page_ceiling: 5,
            fetch_delay_ms: 1000,
        }
    }
}

impl InfiniteScrollConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

impl Config {
    /// Load from the default location, falling back to defaults on any failure.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Load from `path`. A missing or unreadable file yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> ChallengeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ChallengeError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ChallengeError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config.sanitized())
    }

    pub fn config_path() -> PathBuf {
        if let Some(config_dir) = directories::ProjectDirs::from("com", "ckt", "ui-challenges") {
            config_dir.config_dir().join("config.toml")
        } else {
            PathBuf::from("ui_challenges_config.toml")
        }
    }

    /// Default log location, next to the cache rather than the config
    pub fn default_log_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "ckt", "ui-challenges") {
            dirs.cache_dir().join("challenges.log")
        } else {
            PathBuf::from("challenges.log")
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Clamp values that would stall the loop or break pagination
    fn sanitized(mut self) -> Self {
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = Config::default().tick_rate_ms;
        }
        if self.toast_duration_ms == 0 {
            self.toast_duration_ms = Config::default().toast_duration_ms;
        }
        if self.records_per_page == 0 {
            self.records_per_page = Config::default().records_per_page;
        }
        if self.infinite_scroll.batch_size == 0 {
            self.infinite_scroll.batch_size = InfiniteScrollConfig::default().batch_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ui-challenges-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_match_demo_constants() {
        let config = Config::default();
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
        assert_eq!(config.records_per_page, 10);
        assert_eq!(config.infinite_scroll.batch_size, 6);
        assert_eq!(config.infinite_scroll.page_ceiling, 5);
        assert_eq!(config.infinite_scroll.fetch_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.toml");
        fs::write(&path, "theme = \"dracula\"\n[infinite_scroll]\npage_ceiling = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, "dracula");
        assert_eq!(config.infinite_scroll.page_ceiling, 3);
        assert_eq!(config.infinite_scroll.batch_size, 6);
        assert_eq!(config.tick_rate_ms, 100);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = temp_path("broken.toml");
        fs::write(&path, "tick_rate_ms = \"fast\"").unwrap();

        assert!(Config::load_from(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = temp_path("does-not-exist.toml");
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_zero_values_are_sanitized() {
        let path = temp_path("zeros.toml");
        fs::write(&path, "tick_rate_ms = 0\nrecords_per_page = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.records_per_page, 10);

        fs::remove_file(&path).ok();
    }
}
