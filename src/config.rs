use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::Source;

/// File written by the scraper, looked up relative to the working directory.
pub const DEFAULT_SOURCE: &str = "scraped_summary.csv";

/// Viewer settings, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// CSV file to show.
    pub source: PathBuf,

    /// Load `source` as soon as the window opens.
    pub auto_load: bool,

    /// Clear the search box whenever a new dataset arrives.
    pub reset_query_on_reload: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            auto_load: true,
            reset_query_on_reload: false,
        }
    }
}

impl ViewerConfig {
    /// Read a config file; missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("opening config file {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("in {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing viewer config")
    }

    /// Defaults, then the config file (if any), then an explicit source.
    pub fn resolve(config_path: Option<&Path>, source: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(source) = source {
            config.source = source;
        }
        Ok(config)
    }

    pub fn source(&self) -> Source {
        Source::Path(self.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_scraper_output() {
        let config = ViewerConfig::default();
        assert_eq!(config.source, PathBuf::from("scraped_summary.csv"));
        assert!(config.auto_load);
        assert!(!config.reset_query_on_reload);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "reset_query_on_reload": true }"#).unwrap();
        assert!(config.reset_query_on_reload);
        assert!(config.auto_load);
        assert_eq!(config.source, PathBuf::from(DEFAULT_SOURCE));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ source: }").is_err());
    }

    #[test]
    fn explicit_source_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "source": "from_file.csv", "auto_load": false }}"#).unwrap();

        let config = ViewerConfig::resolve(Some(file.path()), None).unwrap();
        assert_eq!(config.source, PathBuf::from("from_file.csv"));
        assert!(!config.auto_load);

        let config = ViewerConfig::resolve(Some(file.path()), Some("cli.csv".into())).unwrap();
        assert_eq!(config.source(), Source::path("cli.csv"));
        assert!(!config.auto_load);
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let err = ViewerConfig::resolve(Some(Path::new("/no/such/viewer.json")), None).unwrap_err();
        assert!(format!("{err:#}").contains("viewer.json"));
    }
}
