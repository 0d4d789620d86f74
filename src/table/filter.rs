//! Substring filtering of listing rows.

use tracing::debug;

use super::{Row, NAME_COLUMN};

/// Column the filter matches against.
pub const FILTER_COLUMN: usize = NAME_COLUMN;

/// Case-insensitive substring match of `query` against the row's name.
///
/// A row without a name cell only matches the empty query.
pub fn matches_filter(row: &Row, query: &str) -> bool {
    row.text(FILTER_COLUMN)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Visibility of each row for `query`, indexed like `rows`.
///
/// Visibility is keyed by row identity, not display position, so it stays
/// valid when the rows are re-sorted afterwards.
pub fn filter_rows(rows: &[Row], query: &str) -> Vec<bool> {
    let needle = query.to_lowercase();
    let visible: Vec<bool> = rows
        .iter()
        .map(|row| row.text(FILTER_COLUMN).to_lowercase().contains(&needle))
        .collect();

    debug!(
        query,
        shown = visible.iter().filter(|v| **v).count(),
        total = rows.len(),
        "filtered table"
    );
    visible
}
