use serde::{Deserialize, Serialize};
use std::io::Write;

use super::ListingView;
use crate::listing::EntryKind;
use crate::table::MODIFIED_COLUMN;

/// Represents one visible row in the exported listing
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ExportEntry {
    pub name: String,
    pub link: String,
    pub icon: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<String>,
    /// Last-modified time as displayed (local time)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date: Option<String>,
    /// Last-modified time as stored (ISO 8601, UTC)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

/// Export the visible rows of a view, in display order, as a JSON array
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(std::io::Error)` on write failure
pub fn export_json(view: &ListingView, writer: &mut impl Write) -> Result<(), std::io::Error> {
    let entries: Vec<ExportEntry> = view
        .shown()
        .map(|(entry, row)| {
            let rendered = row
                .cell(MODIFIED_COLUMN)
                .map(|c| c.text.clone())
                .filter(|t| !t.is_empty());
            ExportEntry {
                name: entry.name.clone(),
                link: entry.link.clone(),
                icon: entry.icon.clone(),
                kind: entry.kind,
                size: entry.size.clone(),
                date: rendered,
                timestamp: entry.date.clone(),
            }
        })
        .collect();

    serde_json::to_writer_pretty(writer, &entries)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}
