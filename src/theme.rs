use raylib::prelude::*;

pub const BACKGROUND: Color = Color::new(11, 15, 25, 255);
pub const CARD: Color = Color::new(24, 30, 45, 255);
pub const SECONDARY: Color = Color::new(15, 23, 42, 255);
pub const PRIMARY: Color = Color::new(59, 130, 246, 255);
pub const ACCENT: Color = Color::new(168, 85, 247, 255);
pub const FOREGROUND: Color = Color::new(241, 245, 249, 255);
pub const MUTED: Color = Color::new(100, 116, 139, 255);

pub const PLACEHOLDER_PALETTE: [Color; 5] = [
    Color::new(30, 64, 175, 255),
    Color::new(109, 40, 217, 255),
    Color::new(15, 118, 110, 255),
    Color::new(180, 83, 9, 255),
    Color::new(190, 18, 60, 255),
];

pub fn with_opacity(color: Color, opacity: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * opacity.clamp(0.0, 1.0)) as u8)
}

pub fn text_width(text: &str, font_size: i32) -> i32 {
    raylib::core::text::measure_text(text, font_size)
}
