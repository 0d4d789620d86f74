//! Plain text rendering of a listing view.

use std::io::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::ListingView;
use crate::i18n::Translations;
use crate::table::{SortOrder, MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};

const COLUMNS: [usize; 3] = [NAME_COLUMN, SIZE_COLUMN, MODIFIED_COLUMN];
const GAP: &str = "  ";

/// Options for the text table
#[derive(Debug, Clone)]
pub struct TextOptions {
    pub labels: Translations,
    /// Names wider than this are cut and end in `...`
    pub max_name_width: usize,
    /// Use `^`/`v` instead of arrows for the sort marker
    pub ascii: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            labels: Translations::english(),
            max_name_width: 48,
            ascii: false,
        }
    }
}

/// Cut `s` to at most `max_width` terminal columns.
pub(crate) fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn header_label(view: &ListingView, options: &TextOptions, column: usize) -> String {
    let label = options.labels.column_label(column);
    if view.sort_state.last_column != Some(column) {
        return label.to_string();
    }
    let marker = match (view.sort_state.last_order, options.ascii) {
        (Some(SortOrder::Asc), false) => " ▲",
        (Some(SortOrder::Desc), false) => " ▼",
        (Some(SortOrder::Asc), true) => " ^",
        (Some(SortOrder::Desc), true) => " v",
        (None, _) => "",
    };
    format!("{}{}", label, marker)
}

/// Write the visible rows of `view` as an aligned text table.
pub fn export_text(
    view: &ListingView,
    options: &TextOptions,
    writer: &mut impl Write,
) -> Result<(), std::io::Error> {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|&c| header_label(view, options, c))
        .collect();

    let body: Vec<Vec<String>> = view
        .shown()
        .map(|(_, row)| {
            COLUMNS
                .iter()
                .map(|&c| {
                    let text = row.text(c);
                    if c == NAME_COLUMN {
                        truncate_width(text, options.max_name_width)
                    } else {
                        text.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.width());
        }
    }

    let dir = view.listing.dir.to_string_lossy().replace('\\', "/");
    writeln!(writer, "{} /{}", options.labels.title, dir)?;
    writeln!(writer)?;

    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect();
        writeln!(writer, "{}", line.join(GAP).trim_end())?;
    }

    Ok(())
}
