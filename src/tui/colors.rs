//! Palette shared by every view.

use ratatui::style::Color;

/// Discard accents (left swipe).
pub const ACCENT_PRIMARY: Color = Color::Rgb(235, 111, 146);
/// Keep accents (right swipe).
pub const ACCENT_SECONDARY: Color = Color::Rgb(163, 190, 140);
/// Titles, gauges, highlights.
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(136, 192, 208);

pub const BG_DARK: Color = Color::Rgb(30, 30, 46);
pub const TEXT_PRIMARY: Color = Color::Rgb(216, 222, 233);
pub const TEXT_SECONDARY: Color = Color::Rgb(120, 124, 153);
