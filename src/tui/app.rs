use std::path::PathBuf;

use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::i18n::Translations;
use crate::listing::{build_listing, EntryKind, Listing, ListingEntry};
use crate::table::{filter_rows, sort_table, Row, SortState};

use super::colors::ColorScheme;
use super::input::{Command, InputMode};

/// Application state
pub struct App {
    pub settings: Settings,
    pub labels: Translations,
    pub color_scheme: ColorScheme,

    // Core data
    pub listing: Option<Listing>,
    pub rows: Vec<Row>,
    /// Row indices in display order
    pub order: Vec<usize>,
    /// Visibility per row index
    pub visible: Vec<bool>,
    pub sort_state: SortState,

    // View state
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Table rows that fit on screen, updated on every render
    pub viewport_height: usize,
    /// Header cell areas and their columns from the last render
    pub header_hits: Vec<(Rect, usize)>,

    // UI state
    pub filter_query: String,
    pub input_mode: InputMode,
    pub status_message: Option<String>,

    // Flags
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, labels: Translations, color_scheme: ColorScheme) -> Self {
        Self {
            settings,
            labels,
            color_scheme,
            listing: None,
            rows: Vec::new(),
            order: Vec::new(),
            visible: Vec::new(),
            sort_state: SortState::default(),
            selected_index: 0,
            scroll_offset: 0,
            viewport_height: 20,
            header_hits: Vec::new(),
            filter_query: String::new(),
            input_mode: InputMode::Normal,
            status_message: None,
            should_quit: false,
        }
    }

    /// Load the listing for `dir`, resetting sort state like a page load.
    ///
    /// On failure the current listing stays on screen and the error is shown
    /// in the status bar.
    pub fn load(&mut self, dir: PathBuf) {
        let options = self.settings.listing_options(&self.labels).with_dir(dir);
        match build_listing(&options) {
            Ok(listing) => {
                self.rows = listing.to_rows(&self.settings.time_format);
                self.order = (0..self.rows.len()).collect();
                self.sort_state = SortState::default();
                self.listing = Some(listing);
                self.selected_index = 0;
                self.scroll_offset = 0;
                self.status_message = None;
                self.refresh_visibility();
            }
            Err(e) => {
                warn!(error = %e, "cannot open directory");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Row indices that are shown, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&i| self.visible.get(i).copied().unwrap_or(false))
            .collect()
    }

    fn selected_row(&self) -> Option<usize> {
        self.visible_rows().get(self.selected_index).copied()
    }

    pub fn selected_entry(&self) -> Option<&ListingEntry> {
        let row = self.selected_row()?;
        self.listing.as_ref()?.entries.get(row)
    }

    /// Put the selection back on `row` after the display order changed.
    fn reselect(&mut self, row: Option<usize>) {
        let visible = self.visible_rows();
        self.selected_index = row
            .and_then(|r| visible.iter().position(|&i| i == r))
            .unwrap_or(0)
            .min(visible.len().saturating_sub(1));
        self.ensure_visible();
    }

    fn refresh_visibility(&mut self) {
        let selected = self.selected_row();
        self.visible = filter_rows(&self.rows, &self.filter_query);
        self.reselect(selected);
    }

    fn sort_by(&mut self, column: usize) {
        // Nothing to sort before a listing has loaded.
        if self.listing.is_none() {
            return;
        }
        let selected = self.selected_row();
        let outcome = sort_table(&self.rows, column, &self.sort_state);
        self.order = outcome.order;
        self.sort_state = outcome.state;
        self.reselect(selected);
    }

    fn open_selected(&mut self) {
        let Some(listing) = &self.listing else {
            return;
        };
        let Some(entry) = self.selected_entry() else {
            return;
        };

        let target = match entry.kind {
            EntryKind::Directory => listing.dir.join(&entry.name),
            EntryKind::ParentDirectory => listing.dir.parent().map(PathBuf::from).unwrap_or_default(),
            EntryKind::File => return,
        };
        debug!(dir = %target.display(), "navigating");
        self.load(target);
    }

    fn go_up(&mut self) {
        let Some(listing) = &self.listing else {
            return;
        };
        if let Some(parent) = listing.dir.parent() {
            let parent = parent.to_path_buf();
            self.load(parent);
        }
    }

    /// Ensure the selected item is visible in the viewport
    fn ensure_visible(&mut self) {
        let height = self.viewport_height.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + height {
            self.scroll_offset = self.selected_index + 1 - height;
        }
    }

    /// Sort by the header cell under `(x, y)`, if any.
    pub fn click_header(&mut self, x: u16, y: u16) -> bool {
        let hit = self
            .header_hits
            .iter()
            .find(|(area, _)| {
                x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
            })
            .map(|&(_, column)| column);
        match hit {
            Some(column) => {
                self.sort_by(column);
                true
            }
            None => false,
        }
    }

    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => {
                if self.input_mode == InputMode::Normal {
                    self.should_quit = true;
                }
            }
            Command::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.ensure_visible();
                }
            }
            Command::MoveDown => {
                if self.selected_index < self.visible_rows().len().saturating_sub(1) {
                    self.selected_index += 1;
                    self.ensure_visible();
                }
            }
            Command::PageUp => {
                self.selected_index = self.selected_index.saturating_sub(self.viewport_height);
                self.ensure_visible();
            }
            Command::PageDown => {
                self.selected_index = (self.selected_index + self.viewport_height)
                    .min(self.visible_rows().len().saturating_sub(1));
                self.ensure_visible();
            }
            Command::GotoTop => {
                self.selected_index = 0;
                self.scroll_offset = 0;
            }
            Command::GotoBottom => {
                self.selected_index = self.visible_rows().len().saturating_sub(1);
                self.ensure_visible();
            }
            Command::Enter => self.open_selected(),
            Command::Back => self.go_up(),
            Command::Sort(column) => self.sort_by(column),
            Command::StartFilter => {
                self.input_mode = InputMode::Filter;
            }
            Command::FilterInput(c) => {
                self.filter_query.push(c);
                self.refresh_visibility();
            }
            Command::FilterBackspace => {
                self.filter_query.pop();
                self.refresh_visibility();
            }
            Command::ConfirmFilter => {
                self.input_mode = InputMode::Normal;
            }
            Command::ExitFilter => {
                self.input_mode = InputMode::Normal;
                if !self.filter_query.is_empty() {
                    self.filter_query.clear();
                    self.refresh_visibility();
                }
            }
            Command::ShowHelp => {
                self.input_mode = InputMode::Help;
            }
            Command::HideHelp => {
                self.input_mode = InputMode::Normal;
            }
            Command::Noop => {}
        }
    }
}
