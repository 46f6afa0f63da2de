//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Background Colors
    pub bg_dark: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
}

/// Available theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Sakura,
    KanagawaWave,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Sakura => "sakura",
            ThemeName::KanagawaWave => "kanagawa-wave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Sakura => "Sakura",
            ThemeName::KanagawaWave => "Kanagawa Wave",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "kanagawa-wave" | "kanagawa_wave" | "kanagawa" => ThemeName::KanagawaWave,
            _ => ThemeName::Sakura,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Sakura => ThemeName::KanagawaWave,
            ThemeName::KanagawaWave => ThemeName::Sakura,
        }
    }
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        let colors = match name {
            ThemeName::Sakura => Self::sakura_colors(),
            ThemeName::KanagawaWave => Self::kanagawa_wave_colors(),
        };
        Self { name, colors }
    }

    pub fn from_name(name: &str) -> Self {
        Self::new(ThemeName::from_str(name))
    }

    /// Sakura theme - soft pink and royal purple.
    fn sakura_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(0xE7, 0x54, 0x80),   // Sakura pink
            secondary: Color::Rgb(0x6A, 0x5A, 0xCD), // Royal purple
            accent: Color::Rgb(0xF4, 0xA7, 0xB9),    // Light pink

            // Semantic Colors
            success: Color::Rgb(0x4C, 0xAF, 0x50),   // Soft green
            warning: Color::Rgb(0xFA, 0xCC, 0x15),   // Yellow
            error: Color::Rgb(0xF4, 0x43, 0x36),     // Soft red
            info: Color::Rgb(0x3B, 0x82, 0xF6),      // Blue

            // Background Colors
            bg_dark: Color::Rgb(0x1C, 0x14, 0x18),   // Near-black plum
            bg_card: Color::Rgb(0x2A, 0x1F, 0x26),   // Dark plum
            bg_highlight: Color::Rgb(0x47, 0x35, 0x41),

            // Text Colors
            text: Color::Rgb(0xFF, 0xF5, 0xF5),      // Pinkish white
            text_muted: Color::Rgb(0xB8, 0xA4, 0xAC),
            text_dim: Color::Rgb(0x75, 0x64, 0x6C),
        }
    }

    /// Kanagawa Wave theme - inspired by the famous painting and kanagawa.nvim
    fn kanagawa_wave_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors - using Kanagawa palette
            primary: Color::Rgb(0x7E, 0x9C, 0xD8),   // crystalBlue - Functions/Titles
            secondary: Color::Rgb(0x95, 0x7F, 0xB8), // oniViolet - Keywords
            accent: Color::Rgb(0xD2, 0x7E, 0x99),    // sakuraPink - Numbers

            // Semantic Colors
            success: Color::Rgb(0x98, 0xBB, 0x6C),   // springGreen - Strings
            warning: Color::Rgb(0xFF, 0x9E, 0x3B),   // roninYellow - Warning
            error: Color::Rgb(0xE8, 0x24, 0x24),     // samuraiRed - Error
            info: Color::Rgb(0x7F, 0xB4, 0xCA),      // springBlue - Specials

            // Background Colors
            bg_dark: Color::Rgb(0x16, 0x16, 0x1D),   // sumiInk0 - Dark bg
            bg_card: Color::Rgb(0x1F, 0x1F, 0x28),   // sumiInk1 - Default bg
            bg_highlight: Color::Rgb(0x36, 0x36, 0x46), // sumiInk3 - Cursorline

            // Text Colors
            text: Color::Rgb(0xDC, 0xD7, 0xBA),      // fujiWhite - Default fg
            text_muted: Color::Rgb(0xC8, 0xC0, 0x93), // oldWhite - Dark fg
            text_dim: Color::Rgb(0x54, 0x54, 0x6D),  // sumiInk4 - Darker fg
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default()
            .fg(self.colors.secondary)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.colors.bg_highlight)
            .fg(self.colors.text)
    }

    /// The large prompt glyph on a practice card.
    pub fn prompt(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn correct(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn incorrect(&self) -> Style {
        Style::default()
            .fg(self.colors.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn streak(&self) -> Style {
        Style::default()
            .fg(self.colors.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Sakura)
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Icons
// ══════════════════════════════════════════════════════════════════════════

pub mod icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const TARGET: &str = "🎯";
    pub const FIRE: &str = "🔥";
    pub const SPARKLE: &str = "✨";
    pub const BOOK: &str = "📖";
}
