//! Table model for directory listings.
//!
//! A listing table has four columns: an icon column, the entry name, the
//! formatted size and the last-modified time. The sorter and the filter in
//! this module only ever look at the display text of a single column, plus the
//! optional machine-readable timestamp carried by last-modified cells.

mod filter;
mod sort;

pub use filter::{filter_rows, matches_filter, FILTER_COLUMN};
pub use sort::{sort_table, SortOrder, SortOutcome, SortState, PARENT_DIRECTORY_LABEL};

/// Column holding the entry icon.
pub const ICON_COLUMN: usize = 0;
/// Column holding the entry name.
pub const NAME_COLUMN: usize = 1;
/// Column holding the formatted size (e.g. `10.00KB`).
pub const SIZE_COLUMN: usize = 2;
/// Column holding the last-modified time.
pub const MODIFIED_COLUMN: usize = 3;

/// A single rendered value in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Text as displayed to the user.
    pub text: String,
    /// Machine-readable datetime, used in preference to `text` when ordering
    /// by last-modified.
    pub timestamp: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// One listing entry as an ordered set of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a row from plain display strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::new).collect(),
        }
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Display text of a column, or `""` when the row has no such cell.
    pub fn text(&self, column: usize) -> &str {
        self.cell(column).map(|c| c.text.as_str()).unwrap_or("")
    }
}
