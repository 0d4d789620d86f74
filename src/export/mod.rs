//! Non-interactive renderings of a listing.
//!
//! A [`ListingView`] replays a sequence of header clicks through the sorter and
//! applies the row filter, giving the rows a browser would show after the same
//! interactions. The JSON and text exporters render that view.

mod json;
mod text;

pub use json::{export_json, ExportEntry};
pub use text::{export_text, TextOptions};
pub(crate) use text::truncate_width;

use tracing::debug;

use crate::datetime::DEFAULT_TIME_FORMAT;
use crate::listing::{Listing, ListingEntry};
use crate::table::{filter_rows, sort_table, Row, SortState};

/// Interactions to replay before rendering
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Column indices, one per header click, in click order
    pub sort_clicks: Vec<usize>,
    /// Name filter; `None` shows every row
    pub filter: Option<String>,
    /// strftime format for the last-modified column
    pub time_format: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort_clicks: Vec::new(),
            filter: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// A listing with its table rows, display order and visibility.
#[derive(Debug, Clone)]
pub struct ListingView<'a> {
    pub listing: &'a Listing,
    pub rows: Vec<Row>,
    /// Row indices in display order
    pub order: Vec<usize>,
    /// Visibility per row index
    pub visible: Vec<bool>,
    pub sort_state: SortState,
}

impl<'a> ListingView<'a> {
    pub fn new(listing: &'a Listing, options: &ViewOptions) -> Self {
        let rows = listing.to_rows(&options.time_format);
        let mut order: Vec<usize> = (0..rows.len()).collect();
        let mut sort_state = SortState::default();

        for &column in &options.sort_clicks {
            let outcome = sort_table(&rows, column, &sort_state);
            order = outcome.order;
            sort_state = outcome.state;
        }

        let visible = match &options.filter {
            Some(query) => filter_rows(&rows, query),
            None => vec![true; rows.len()],
        };

        debug!(
            clicks = options.sort_clicks.len(),
            filtered = options.filter.is_some(),
            "prepared listing view"
        );

        Self {
            listing,
            rows,
            order,
            visible,
            sort_state,
        }
    }

    /// Visible entries and their rows, in display order.
    pub fn shown(&self) -> impl Iterator<Item = (&ListingEntry, &Row)> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|&i| self.visible[i])
            .map(|i| (&self.listing.entries[i], &self.rows[i]))
    }
}
