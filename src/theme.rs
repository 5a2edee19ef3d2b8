use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(18, 16, 14);
pub const BG_BAR: Color = Color::Rgb(26, 23, 20);
pub const BG_SURFACE: Color = Color::Rgb(34, 30, 26);
pub const BG_HIGHLIGHT: Color = Color::Rgb(58, 48, 36);

// Primary accent (parchment amber)
pub const AMBER: Color = Color::Rgb(230, 170, 80);

// Text
pub const TEXT: Color = Color::Rgb(228, 222, 210);
pub const TEXT_DIM: Color = Color::Rgb(150, 140, 125);
pub const TEXT_MUTED: Color = Color::Rgb(95, 88, 78);

// Semantic
pub const GREEN: Color = Color::Rgb(134, 197, 134);
pub const RED: Color = Color::Rgb(230, 110, 100);
pub const YELLOW: Color = Color::Rgb(240, 200, 90);
pub const CYAN: Color = Color::Rgb(120, 200, 210);
