//! Settings for the `dirlist` binary.
//!
//! Values come from three layers, highest priority first: command-line flags
//! (which clap also fills from environment variables), an optional YAML config
//! file, and built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::datetime::DEFAULT_TIME_FORMAT;
use crate::i18n::{available_languages, load_translation, Translations};
use crate::listing::ListingOptions;

/// Errors that can occur while reading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown language {lang:?} (available: {})", .available.join(", "))]
    UnknownLanguage { lang: String, available: Vec<String> },
}

/// Contents of `config.yml`. Every key is optional.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub root: Option<String>,
    pub lang: Option<String>,
    pub languages_dir: Option<String>,
    #[serde(alias = "ignore")]
    pub ignore_files: Option<Vec<String>>,
    pub time_format: Option<String>,
    pub log_file: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Default location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg_config).join("dirlist").join("config.yml"))
    } else if let Ok(home) = std::env::var("HOME") {
        Some(PathBuf::from(home).join(".config").join("dirlist").join("config.yml"))
    } else {
        None
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub lang: Option<String>,
    pub languages_dir: Option<PathBuf>,
    pub ignore_files: Vec<String>,
    pub time_format: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub lang: String,
    pub languages_dir: Option<PathBuf>,
    pub ignore_files: Vec<String>,
    pub time_format: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, file: ConfigFile) -> Self {
        let ignore_files = if cli.ignore_files.is_empty() {
            file.ignore_files.unwrap_or_default()
        } else {
            cli.ignore_files
        };

        Self {
            root: cli
                .root
                .or_else(|| file.root.as_deref().map(expand_tilde))
                .unwrap_or_else(|| PathBuf::from(".")),
            dir: cli.dir.unwrap_or_default(),
            lang: cli.lang.or(file.lang).unwrap_or_else(|| "en".to_string()),
            languages_dir: cli
                .languages_dir
                .or_else(|| file.languages_dir.as_deref().map(expand_tilde)),
            ignore_files: ignore_files
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            time_format: cli
                .time_format
                .or(file.time_format)
                .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
            log_file: cli
                .log_file
                .or_else(|| file.log_file.as_deref().map(expand_tilde)),
        }
    }

    /// Make sure `lang` names a translation before it ends up in links.
    ///
    /// Built-in English is always available. Other languages need a
    /// `<lang>.yml` in the languages directory.
    pub fn check_language(&self) -> Result<(), ConfigError> {
        let mut available = match &self.languages_dir {
            Some(dir) => available_languages(dir).unwrap_or_else(|e| {
                warn!(dir = %dir.display(), error = %e, "cannot list languages");
                Vec::new()
            }),
            None => Vec::new(),
        };
        if !available.iter().any(|l| l == "en") {
            available.insert(0, "en".to_string());
        }

        if available.contains(&self.lang) {
            Ok(())
        } else {
            Err(ConfigError::UnknownLanguage {
                lang: self.lang.clone(),
                available,
            })
        }
    }

    /// Labels for the configured language, English when none can be loaded.
    pub fn translations(&self) -> Translations {
        let Some(dir) = &self.languages_dir else {
            return Translations::english();
        };
        match load_translation(dir, &self.lang) {
            Ok(translations) => translations,
            Err(e) => {
                warn!(lang = %self.lang, error = %e, "falling back to English labels");
                Translations::english()
            }
        }
    }

    pub fn listing_options(&self, translations: &Translations) -> ListingOptions {
        ListingOptions::new(self.root.clone())
            .with_dir(self.dir.clone())
            .with_lang(self.lang.clone())
            .with_ignore_files(self.ignore_files.iter().cloned())
            .with_parent_label(translations.parent_directory.clone())
    }
}
