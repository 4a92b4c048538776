use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Records per page when neither config nor flags say otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(25) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            data: DataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ViewConfig {
    /// The configured page size; zero (invalid) falls back to the default.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/customers.json")
}

/// Load `clientele.toml` from `root`, or defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = root.join("clientele.toml");
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_PAGE_SIZE, ViewConfig, load_config};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn defaults_without_a_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(dir.path()).expect("load");
        assert_eq!(config.view.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.data.path, PathBuf::from("data/customers.json"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("clientele.toml"), "[view]\npage_size = 10\n")
            .expect("write config");
        let config = load_config(dir.path()).expect("load");
        assert_eq!(config.view.page_size().get(), 10);
        assert_eq!(config.data.path, PathBuf::from("data/customers.json"));
    }

    #[test]
    fn data_path_is_configurable() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("clientele.toml"),
            "[data]\npath = \"exports/clients.json\"\n",
        )
        .expect("write config");
        let config = load_config(dir.path()).expect("load");
        assert_eq!(config.data.path, PathBuf::from("exports/clients.json"));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let config = ViewConfig { page_size: 0 };
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("clientele.toml"), "view = nonsense").expect("write config");
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.view.page_size(), config.view.page_size());
    }
}
