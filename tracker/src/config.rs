use crate::source::TleSource;
use crate::time_series::{
    SeriesConfig, SeriesConfigError, DEFAULT_INTERVAL_SECONDS, DEFAULT_STEP_COUNT,
};
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Series(#[from] SeriesConfigError),
    #[error("Source entry {index} ('{name}') must have exactly one of 'path' or 'text'")]
    SourceKind { index: usize, name: String },
    #[error("Source entry {index} has an empty name")]
    MissingName { index: usize },
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub name: Option<String>,
    pub interval_seconds: Option<u64>,
    pub step_count: Option<usize>,
    #[serde(alias = "source")]
    pub sources: Vec<Source>,
    /// Relative source paths resolve against this, the config file's directory
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Source {
    pub name: String,
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let mut cfg = Self::from_str_checked(&content)?;
        cfg.base_dir = path.parent().map(Path::to_path_buf);
        Ok(cfg)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        cfg.series_config()?;

        let mut seen = HashSet::new();
        for (index, src) in cfg.sources.iter().enumerate() {
            if src.name.trim().is_empty() {
                return Err(ConfigError::MissingName { index });
            }
            if src.path.is_some() == src.text.is_some() {
                return Err(ConfigError::SourceKind {
                    index,
                    name: src.name.clone(),
                });
            }
            if !seen.insert((&src.name, &src.path, &src.text)) {
                info!(source = %src.name, "Source is listed more than once");
            }
        }

        Ok(cfg)
    }

    pub fn series_config(&self) -> Result<SeriesConfig, SeriesConfigError> {
        SeriesConfig::new(
            self.interval_seconds.unwrap_or(DEFAULT_INTERVAL_SECONDS),
            self.step_count.unwrap_or(DEFAULT_STEP_COUNT),
        )
    }

    pub fn sources(&self) -> Vec<TleSource> {
        self.sources
            .iter()
            .map(|src| match (&src.path, &src.text) {
                (Some(path), _) => {
                    let path = match &self.base_dir {
                        Some(dir) if path.is_relative() => dir.join(path),
                        _ => path.clone(),
                    };
                    TleSource::named_file(&src.name, path)
                }
                (None, text) => TleSource::inline(&src.name, text.clone().unwrap_or_default()),
            })
            .collect()
    }
}
