use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::datetime::{format_iso_utc, render_local_time};
use crate::table::{Cell, Row};

use super::icons::{FOLDER_ICON, PARENT_ICON};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// What a listing entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    ParentDirectory,
    Directory,
    File,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    /// Font Awesome class list, e.g. `fas fa-file-pdf`
    pub icon: String,
    pub name: String,
    pub link: String,
    /// Formatted size, files only
    pub size: Option<String>,
    /// Modification time as `YYYY-MM-DDTHH:MM:SS+00:00`, files only
    pub date: Option<String>,
    pub kind: EntryKind,
}

impl ListingEntry {
    pub fn parent(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            icon: PARENT_ICON.to_string(),
            name: name.into(),
            link: link.into(),
            size: None,
            date: None,
            kind: EntryKind::ParentDirectory,
        }
    }

    pub fn directory(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            icon: FOLDER_ICON.to_string(),
            name: name.into(),
            link: link.into(),
            size: None,
            date: None,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>, link: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            name: name.into(),
            link: link.into(),
            size: None,
            date: None,
            kind: EntryKind::File,
        }
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.size = Some(format_size(bytes));
        self
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.date = Some(format_iso_utc(modified));
        self
    }

    /// Table row for this entry: icon, name, size, last-modified.
    ///
    /// The last-modified cell shows the date rendered in local time and keeps
    /// the ISO string as its sortable timestamp.
    pub fn to_row(&self, time_format: &str) -> Row {
        let modified = match &self.date {
            Some(date) => {
                Cell::new(render_local_time(Some(date), time_format)).with_timestamp(date.clone())
            }
            None => Cell::default(),
        };

        Row::new(vec![
            Cell::new(self.icon.clone()),
            Cell::new(self.name.clone()),
            Cell::new(self.size.clone().unwrap_or_default()),
            modified,
        ])
    }
}

/// A directory listing ready for display.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Directory shown, relative to the listing root (empty for the root)
    pub dir: PathBuf,
    pub lang: String,
    pub entries: Vec<ListingEntry>,
}

impl Listing {
    pub fn is_root(&self) -> bool {
        self.dir.as_os_str().is_empty()
    }

    pub fn to_rows(&self, time_format: &str) -> Vec<Row> {
        self.entries.iter().map(|e| e.to_row(time_format)).collect()
    }
}

/// Format a byte count with two decimals and a binary unit, e.g. `1.50KB`.
pub fn format_size(bytes: u64) -> String {
    let bits = u64::BITS - bytes.leading_zeros();
    let idx = if bits == 0 { 0 } else { ((bits - 1) / 10).min(4) as usize };
    let scaled = bytes as f64 / 1024f64.powi(idx as i32);
    format!("{:.2}{}", scaled, SIZE_UNITS[idx])
}
