pub mod detail_panel;
pub mod roster_list;
pub mod search_bar;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use roster_list::{RosterList, RosterListProps};
pub use search_bar::{SearchBar, SearchBarProps};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(120, 138, 150);
pub const ACCENT_RED: Color = Color::Rgb(220, 10, 45);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

/// `#RRGGBB` to a terminal color; malformed input falls back to gray.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::Gray;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_table_entries() {
        assert_eq!(hex_color("#F08030"), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(hex_color("#A8A8A8"), Color::Rgb(0xA8, 0xA8, 0xA8));
        assert_eq!(hex_color("nope"), Color::Gray);
        assert_eq!(hex_color("#GG0000"), Color::Gray);
    }
}
