use ratatui::style::{Color, Style};

// Centralized colors. Window types and the menu bar pull their styles from
// here so a palette change happens in one place.

pub const DESKTOP_RGB: (u8, u8, u8) = (80, 80, 80);

/// Map an RGB triple to a color the current terminal can show. Truecolor
/// terminals (`COLORTERM` mentions `truecolor` or `24bit`) get the exact
/// value, everything else the nearest entry of the xterm gray ramp.
pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    if let Ok(var) = std::env::var("COLORTERM") {
        let lv = var.to_lowercase();
        if lv.contains("truecolor") || lv.contains("24bit") {
            return Color::Rgb(rgb.0, rgb.1, rgb.2);
        }
    }
    let luma = (rgb.0 as u16 + rgb.1 as u16 + rgb.2 as u16) / 3;
    // gray ramp 232..=255 covers 8..=238 in steps of 10
    let step = luma.saturating_sub(8).div_ceil(10).min(23) as u8;
    Color::Indexed(232 + step)
}

pub fn desktop() -> Style {
    Style::default().bg(rgb_to_color(DESKTOP_RGB))
}

// Menu bar
pub fn menu() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}
pub fn menu_accent() -> Style {
    menu().fg(Color::Red)
}
pub fn menu_highlight_bg() -> Color {
    Color::LightGreen
}

// Window chrome
pub fn decoration_fg() -> Color {
    Color::Yellow
}
pub fn shadow_bg() -> Color {
    Color::Black
}

pub fn text_window() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

pub fn listing() -> Style {
    Style::default().bg(Color::Blue).fg(Color::Yellow)
}
pub fn listing_header_hover() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Blue)
}

pub fn game() -> Style {
    Style::default().bg(Color::Black).fg(Color::Yellow)
}
pub fn game_frame() -> Style {
    Style::default().bg(Color::Black).fg(Color::Blue)
}

/// Block colors indexed by stone number; 0 is the empty cell.
pub const BLOCK_COLORS: [Color; 9] = [
    Color::Black,
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Indexed(1),
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
    Color::Yellow,
];
