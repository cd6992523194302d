use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::quiz::DEFAULT_OPTIONS_COUNT;

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_url: Option<String>,
    #[serde(default = "default_mastery_path")]
    pub mastery_path: String,
    #[serde(default)]
    pub default_level: u32,
    #[serde(default = "default_options_count")]
    pub options_count: usize,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_corpus_path() -> String {
    "word.csv".to_string()
}
fn default_mastery_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tango")
        .join("mastered.json")
        .to_string_lossy()
        .to_string()
}
fn default_options_count() -> usize {
    DEFAULT_OPTIONS_COUNT
}
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            corpus_url: None,
            mastery_path: default_mastery_path(),
            default_level: 0,
            options_count: default_options_count(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tango")
            .join("config.toml")
    }

    /// Read the corpus from `path`. Clears any configured URL, which would
    /// otherwise take precedence.
    pub fn use_corpus_file(&mut self, path: impl Into<String>) {
        self.corpus_path = path.into();
        self.corpus_url = None;
    }

    pub fn use_corpus_url(&mut self, url: impl Into<String>) {
        self.corpus_url = Some(url.into());
    }

    /// Clamp values a hand-edited file may have put out of range.
    pub fn validate(&mut self) {
        self.options_count = self.options_count.clamp(MIN_OPTIONS, MAX_OPTIONS);
        if self.log_filter.trim().is_empty() {
            self.log_filter = default_log_filter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.corpus_path, "word.csv");
        assert_eq!(config.corpus_url, None);
        assert_eq!(config.default_level, 0);
        assert_eq!(config.options_count, 4);
        assert_eq!(config.log_filter, "warn");
        assert!(config.mastery_path.ends_with("mastered.json"));
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
corpus_url = "https://example.com/word.csv"
default_level = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus_url.as_deref(), Some("https://example.com/word.csv"));
        assert_eq!(config.default_level, 2);
        assert_eq!(config.options_count, 4);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.corpus_path, deserialized.corpus_path);
        assert_eq!(config.mastery_path, deserialized.mastery_path);
        assert_eq!(config.options_count, deserialized.options_count);
    }

    #[test]
    fn test_validate_clamps_options() {
        let mut config = Config::default();
        config.options_count = 0;
        config.validate();
        assert_eq!(config.options_count, 2);
        config.options_count = 99;
        config.validate();
        assert_eq!(config.options_count, 10);
    }

    #[test]
    fn test_validate_restores_empty_log_filter() {
        let mut config = Config::default();
        config.log_filter = "  ".to_string();
        config.validate();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_corpus_file_override_clears_url() {
        let mut config: Config = toml::from_str(r#"corpus_url = "http://127.0.0.1:9/word.csv""#).unwrap();
        config.use_corpus_file("/tmp/word.csv");
        assert_eq!(config.corpus_path, "/tmp/word.csv");
        assert_eq!(config.corpus_url, None);

        config.use_corpus_url("https://example.com/word.csv");
        assert_eq!(config.corpus_url.as_deref(), Some("https://example.com/word.csv"));
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config.options_count, 4);
    }
}
