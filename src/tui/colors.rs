//! Color schemes for the listing table.

use ratatui::style::Color;

/// Color scheme for the terminal UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// Color for the parent-directory row
    pub parent: Color,
    /// Color for directories
    pub dirs: Color,
    /// Color for files
    pub files: Color,
    /// Background of the selected row
    pub selected: Color,
    /// Table header and the sorted-column marker
    pub header: Color,
    /// Borders and secondary text
    pub border: Color,
    pub text: Color,
    pub text_dim: Color,
    /// Status bar error messages
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            parent: Color::Rgb(255, 200, 87),
            dirs: Color::Rgb(97, 175, 239),
            files: Color::Rgb(220, 223, 228),
            selected: Color::Rgb(62, 68, 81),
            header: Color::Rgb(198, 120, 221),
            border: Color::Rgb(92, 99, 112),
            text: Color::Rgb(220, 223, 228),
            text_dim: Color::Rgb(127, 132, 142),
            error: Color::Rgb(224, 108, 117),
        }
    }
}

impl ColorScheme {
    /// Palette for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            parent: Color::Rgb(152, 104, 1),
            dirs: Color::Rgb(64, 120, 242),
            files: Color::Rgb(56, 58, 66),
            selected: Color::Rgb(229, 229, 230),
            header: Color::Rgb(166, 38, 164),
            border: Color::Rgb(160, 161, 167),
            text: Color::Rgb(56, 58, 66),
            text_dim: Color::Rgb(105, 108, 119),
            error: Color::Rgb(228, 86, 73),
        }
    }

    /// Terminal default colors only.
    pub fn monochrome() -> Self {
        Self {
            parent: Color::Reset,
            dirs: Color::Reset,
            files: Color::Reset,
            selected: Color::DarkGray,
            header: Color::Reset,
            border: Color::Reset,
            text: Color::Reset,
            text_dim: Color::Reset,
            error: Color::Reset,
        }
    }

    /// Pick a scheme by name; unknown names get the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "mono" | "none" => Self::monochrome(),
            _ => Self::default(),
        }
    }
}
