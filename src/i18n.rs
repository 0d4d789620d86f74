//! Listing labels and their translations.
//!
//! Translations live in `<languages-dir>/<lang>.yml`, one flat map per
//! language. Keys that a file leaves out keep their English text.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::table::{MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};

/// Errors that can occur while loading a translation file.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The language code would resolve outside the languages directory
    #[error("invalid language code: {lang:?}")]
    InvalidLanguage { lang: String },

    /// No translation file exists for the language
    #[error("translation file not found: {path}")]
    NotFound { path: PathBuf },

    /// The translation file or directory could not be read
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The translation file is not valid YAML
    #[error("invalid translation file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Labels shown around a listing table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Translations {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Parent_Directory")]
    pub parent_directory: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Last_Modified")]
    pub last_modified: String,
    #[serde(rename = "Search")]
    pub search: String,
}

impl Translations {
    /// Built-in English labels.
    pub fn english() -> Self {
        Self {
            title: "Index of".to_string(),
            parent_directory: "Parent Directory".to_string(),
            name: "Name".to_string(),
            size: "Size".to_string(),
            last_modified: "Last Modified".to_string(),
            search: "Search...".to_string(),
        }
    }

    /// Header label for a table column; the icon column has none.
    pub fn column_label(&self, column: usize) -> &str {
        match column {
            NAME_COLUMN => &self.name,
            SIZE_COLUMN => &self.size,
            MODIFIED_COLUMN => &self.last_modified,
            _ => "",
        }
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

fn is_valid_language(lang: &str) -> bool {
    !lang.is_empty()
        && lang
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Language codes with a translation file: two ASCII letters plus `.yml`.
pub fn available_languages(dir: &Path) -> Result<Vec<String>, TranslationError> {
    let read_dir = fs::read_dir(dir).map_err(|e| TranslationError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut languages: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter_map(|name| {
            let stem = name.strip_suffix(".yml")?;
            (stem.len() == 2 && stem.chars().all(|c| c.is_ascii_alphabetic()))
                .then(|| stem.to_string())
        })
        .collect();
    languages.sort();
    Ok(languages)
}

/// Load `<dir>/<lang>.yml`.
pub fn load_translation(dir: &Path, lang: &str) -> Result<Translations, TranslationError> {
    if !is_valid_language(lang) {
        return Err(TranslationError::InvalidLanguage {
            lang: lang.to_string(),
        });
    }

    let path = dir.join(format!("{}.yml", lang));
    if !path.is_file() {
        return Err(TranslationError::NotFound { path });
    }

    let content = fs::read_to_string(&path).map_err(|e| TranslationError::Io {
        path: path.clone(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| TranslationError::Parse { path, source: e })
}
