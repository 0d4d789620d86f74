//! Layout and rendering for the listing table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Clear, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};

use crate::export::truncate_width;
use crate::listing::EntryKind;
use crate::table::{SortOrder, ICON_COLUMN, MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};

use super::app::App;
use super::colors::ColorScheme;
use super::input::InputMode;

/// Application version string.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
const APP_NAME: &str = "dirlist";

/// Columns shown, in screen order. The icon column is drawn as a glyph.
const SHOWN_COLUMNS: [usize; 3] = [NAME_COLUMN, SIZE_COLUMN, MODIFIED_COLUMN];

/// Main render function that draws the entire UI.
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filter bar
            Constraint::Min(1),    // Table
            Constraint::Length(1), // Status line
        ])
        .split(size);

    render_header(frame, main_layout[0], app);
    render_filter_bar(frame, main_layout[1], app);
    render_table(frame, main_layout[2], app);
    render_status_bar(frame, main_layout[3], app);

    if app.input_mode == InputMode::Help {
        render_help_overlay(frame, size, &app.color_scheme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(app.color_scheme.header)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default()
        .fg(app.color_scheme.text_dim)
        .add_modifier(Modifier::DIM);

    let dir = app
        .listing
        .as_ref()
        .map(|l| l.dir.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();
    let max_path_width = area.width.saturating_sub(40) as usize;
    let display_path = truncate_width(&format!("{} /{}", app.labels.title, dir), max_path_width);

    let header_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{} v{}", APP_NAME, VERSION), title_style),
        Span::raw(" "),
        Span::styled("\u{2502}", Style::default().fg(app.color_scheme.border)),
        Span::raw(" "),
        Span::styled(display_path, Style::default().fg(app.color_scheme.text)),
        Span::raw(" "),
        Span::styled("\u{2502}", Style::default().fg(app.color_scheme.border)),
        Span::raw(" "),
        Span::styled("Press ? for help", hint_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.color_scheme.border));

    frame.render_widget(Paragraph::new(header_line).block(block), area);
}

fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;
    let editing = app.input_mode == InputMode::Filter;

    let line = if app.filter_query.is_empty() && !editing {
        Line::from(Span::styled(
            format!(" {}  (press / to filter)", app.labels.search),
            Style::default().fg(color_scheme.text_dim),
        ))
    } else {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(app.filter_query.clone(), Style::default().fg(color_scheme.text)),
        ];
        if editing {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().fg(color_scheme.header),
            ));
        }
        Line::from(spans)
    };

    let border = if editing { color_scheme.header } else { color_scheme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Filter ")
        .title_style(Style::default().fg(color_scheme.text_dim));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn header_label(app: &App, column: usize) -> String {
    let label = app.labels.column_label(column);
    if app.sort_state.last_column != Some(column) {
        return label.to_string();
    }
    let marker = match app.sort_state.last_order {
        Some(SortOrder::Asc) => "\u{25b2}",
        Some(SortOrder::Desc) => "\u{25bc}",
        None => return label.to_string(),
    };
    // The icon column has no label, only room for the marker.
    if label.is_empty() {
        marker.to_string()
    } else {
        format!("{} {}", label, marker)
    }
}

fn kind_glyph(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::ParentDirectory => "\u{2191}",
        EntryKind::Directory => "\u{25b8}",
        EntryKind::File => " ",
    }
}

fn kind_color(kind: EntryKind, color_scheme: &ColorScheme) -> Color {
    match kind {
        EntryKind::ParentDirectory => color_scheme.parent,
        EntryKind::Directory => color_scheme.dirs,
        EntryKind::File => color_scheme.files,
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    // Borders plus the header row.
    app.viewport_height = area.height.saturating_sub(3).max(1) as usize;

    let color_scheme = app.color_scheme.clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.border));

    let Some(listing) = app.listing.as_ref() else {
        app.header_hits.clear();
        let message = app
            .status_message
            .clone()
            .unwrap_or_else(|| "No listing loaded".to_string());
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color_scheme.text_dim)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut header_cells = vec![TableCell::from(header_label(app, ICON_COLUMN))];
    header_cells.extend(SHOWN_COLUMNS.iter().map(|&c| TableCell::from(header_label(app, c))));
    let header = TableRow::new(header_cells).style(
        Style::default()
            .fg(color_scheme.header)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<TableRow> = app
        .visible_rows()
        .into_iter()
        .map(|i| {
            let entry = &listing.entries[i];
            let row = &app.rows[i];
            let style = Style::default().fg(kind_color(entry.kind, &color_scheme));
            let mut cells = vec![TableCell::from(kind_glyph(entry.kind))];
            cells.extend(SHOWN_COLUMNS.iter().map(|&c| TableCell::from(row.text(c).to_string())));
            TableRow::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(24),
    ];

    // Header cells sit on the first line inside the border.
    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        1.min(area.height.saturating_sub(2)),
    );
    let cells = Layout::horizontal(widths).spacing(1).split(inner);
    let header_hits: Vec<(Rect, usize)> = cells
        .iter()
        .skip(1)
        .copied()
        .zip(SHOWN_COLUMNS)
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(color_scheme.selected)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default()
        .with_offset(app.scroll_offset)
        .with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
    app.header_hits = header_hits;
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let color_scheme = &app.color_scheme;

    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(color_scheme.error),
        ))
    } else {
        let shown = app.visible_rows().len();
        let total = app.rows.len();
        let mut spans = vec![Span::styled(
            format!(" {} of {} entries", shown, total),
            Style::default().fg(color_scheme.text),
        )];
        if let (Some(column), Some(order)) = (app.sort_state.last_column, app.sort_state.last_order) {
            let label = app.labels.column_label(column);
            let label = if label.is_empty() {
                format!("column {}", column)
            } else {
                label.to_string()
            };
            spans.push(Span::styled(
                format!("  \u{2502}  sorted by {} ({})", label, order),
                Style::default().fg(color_scheme.text_dim),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn help_line(key: &str, text: &str, color_scheme: &ColorScheme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::default().fg(color_scheme.header)),
        Span::styled(text.to_string(), Style::default().fg(color_scheme.text)),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect, color_scheme: &ColorScheme) {
    let overlay_width = 52.min(area.width.saturating_sub(4));
    let overlay_height = 18.min(area.height.saturating_sub(2));
    let overlay_x = (area.width.saturating_sub(overlay_width)) / 2;
    let overlay_y = (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(overlay_x, overlay_y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let section = Style::default()
        .fg(color_scheme.header)
        .add_modifier(Modifier::BOLD);

    let help_text = vec![
        Line::from(Span::styled("Navigation", section)),
        help_line("j/↓ k/↑", "Move down / up", color_scheme),
        help_line("g G", "First / last entry", color_scheme),
        help_line("l/Enter", "Open directory", color_scheme),
        help_line("h/Bksp", "Parent directory", color_scheme),
        Line::from(""),
        Line::from(Span::styled("Table", section)),
        help_line("1 n", "Sort by name", color_scheme),
        help_line("2 s", "Sort by size", color_scheme),
        help_line("3 m", "Sort by last modified", color_scheme),
        help_line("", "Press again to reverse", color_scheme),
        help_line("/", "Filter by name (Esc clears)", color_scheme),
        Line::from(""),
        help_line("q", "Quit", color_scheme),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(color_scheme.text_dim),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .title_style(section)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color_scheme.header));

    frame.render_widget(Paragraph::new(help_text).block(block), overlay_area);
}
