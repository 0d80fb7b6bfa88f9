//! Locating and parsing config documents

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};

use crate::models::{ConfigSource, FolioConfig};

/// Path to a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";
/// Inline JSON config.
pub const CONFIG_JSON_ENV: &str = "FOLIO_CONFIG_JSON";
/// Looked up in the working directory, in order, when neither variable is set.
pub const DEFAULT_FILES: [&str; 2] = ["folio.toml", "folio.json"];

/// Syntax of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml` files and anything not opening with `{`
    Toml,
    /// `.json` files and `$FOLIO_CONFIG_JSON`
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension, if it names one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Config documents are tables, so a JSON one has to open with `{`.
    pub fn sniff(contents: &str) -> Self {
        if contents.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Toml
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl FolioConfig {
    /// Resolve, read and validate the configuration.
    ///
    /// Sources in priority order: `$FOLIO_CONFIG_PATH`, `$FOLIO_CONFIG_JSON`,
    /// the first of [`DEFAULT_FILES`] present in the working directory, then
    /// built-in defaults. Only the winning source is read.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        let source = Self::locate();
        let config = Self::read_source(&source)?;
        config
            .validate()
            .with_context(|| format!("folio config from {source:?} rejected"))?;
        tracing::debug!(?source, "folio configuration ready");
        Ok((config, source))
    }

    fn locate() -> ConfigSource {
        if let Some(path) = env_value(CONFIG_PATH_ENV) {
            ConfigSource::EnvPath(PathBuf::from(path))
        } else if env_value(CONFIG_JSON_ENV).is_some() {
            ConfigSource::EnvInline
        } else if let Some(path) = DEFAULT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
        {
            ConfigSource::File(path)
        } else {
            ConfigSource::Default
        }
    }

    fn read_source(source: &ConfigSource) -> anyhow::Result<Self> {
        match source {
            ConfigSource::EnvPath(path) | ConfigSource::File(path) => {
                Self::load_from_file(path)
            }
            ConfigSource::EnvInline => {
                let raw = env_value(CONFIG_JSON_ENV).unwrap_or_default();
                Self::parse(&raw, ConfigFormat::Json, CONFIG_JSON_ENV)
            }
            ConfigSource::Default => Ok(Self::default()),
        }
    }

    /// Read one config file. The extension picks the format; anything else
    /// is sniffed from the contents.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let format = ConfigFormat::from_extension(path)
            .unwrap_or_else(|| ConfigFormat::sniff(&contents));
        Self::parse(&contents, format, &path.display().to_string())
    }

    /// Parse a config document whose format is not known up front.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        Self::parse(contents, ConfigFormat::sniff(contents), origin)
    }

    /// Parse `contents` as `format`. `origin` names the source in errors.
    pub fn parse(
        contents: &str,
        format: ConfigFormat,
        origin: &str,
    ) -> anyhow::Result<Self> {
        match format {
            ConfigFormat::Toml => match toml::from_str(contents) {
                Ok(config) => Ok(config),
                Err(err) => bail!("{origin} is not a valid folio TOML config: {err}"),
            },
            ConfigFormat::Json => serde_json::from_str(contents).with_context(
                || format!("{origin} is not a valid folio JSON config"),
            ),
        }
    }
}
