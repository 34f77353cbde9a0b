use crate::domain::ThemeName;
use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color, Modifier, Style};

/// Parse `#rrggbb` (case-insensitive) into RGB components
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Stored colors come from disk, so anything unparsable renders as the terminal default
pub fn hex_color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

/// Colored swatch for plain terminal output
pub fn swatch(hex: &str, text: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format!(
            "{}",
            text.with(CrosstermColor::Black)
                .on(CrosstermColor::Rgb { r, g, b })
        ),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub theme: ThemeName,
    // Widget chrome
    pub background: Color,
    pub border: Color,
    pub title: Color,
    // Text
    pub text: Color,
    pub dimmed: Color,
    pub placeholder: Color,
    // State
    pub focused: Color,
    pub highlight: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        let background = hex_color(theme.accent());
        let border = match theme {
            ThemeName::Pink => Color::Rgb(214, 112, 150),
            ThemeName::Green => Color::Rgb(82, 160, 112),
            ThemeName::Lavender => Color::Rgb(150, 110, 210),
            ThemeName::Blue => Color::Rgb(80, 130, 200),
        };

        Self {
            theme,
            background,
            border,
            title: border,
            text: Color::Rgb(40, 40, 40),
            dimmed: Color::Rgb(120, 120, 120),
            placeholder: Color::Rgb(160, 160, 160),
            focused: border,
            highlight: Color::Rgb(255, 255, 255),
            warning: Color::Rgb(190, 40, 40),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border).bg(self.background)
    }

    pub fn title_style(&self) -> Style {
        self.border_style().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Style for a mood-colored grid cell or menu swatch
    pub fn mood_style(&self, color: &str) -> Style {
        Style::default().fg(self.text).bg(hex_color(color))
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default().fg(self.placeholder).bg(self.background)
    }

    pub fn selected_option_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .bg(self.focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn help_style(&self) -> Style {
        Style::default().fg(self.dimmed).bg(self.background)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#FFA5C5"), Some((255, 165, 197)));
        assert_eq!(parse_hex("#e0f0ff"), Some((224, 240, 255)));
        assert_eq!(parse_hex("FFA5C5"), None);
        assert_eq!(parse_hex("#FFA5C"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn bad_stored_color_falls_back_to_reset() {
        assert_eq!(hex_color("pink"), Color::Reset);
        assert_eq!(hex_color("#000000"), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn palette_background_is_theme_accent() {
        let palette = Palette::for_theme(ThemeName::Lavender);
        assert_eq!(palette.background, Color::Rgb(0xf3, 0xe8, 0xff));
        assert_eq!(Palette::default().theme, ThemeName::Pink);
    }

    #[test]
    fn swatch_leaves_unparsable_text_plain() {
        assert_eq!(swatch("nope", "calm"), "calm");
        assert!(swatch("#E6E6FA", "calm").contains("calm"));
    }
}
