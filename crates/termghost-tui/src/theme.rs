//! Color palettes.
//!
//! Translucent colors (borders, glow) are pre-blended onto the theme
//! background, since terminals have no alpha channel.

use ratatui::style::{Color, Modifier, Style};
use termghost_core::engine::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub background: Color,
    pub background_secondary: Color,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub accent_secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub border: Color,
    pub glow: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// `hex` at `alpha`/255 opacity over `under`.
const fn blend(hex: u32, alpha: u32, under: u32) -> Color {
    const fn channel(fg: u32, bg: u32, alpha: u32, shift: u32) -> u8 {
        let fg = (fg >> shift) & 0xff;
        let bg = (bg >> shift) & 0xff;
        ((fg * alpha + bg * (255 - alpha)) / 255) as u8
    }
    Color::Rgb(
        channel(hex, under, alpha, 16),
        channel(hex, under, alpha, 8),
        channel(hex, under, alpha, 0),
    )
}

pub const THEMES: [Theme; 8] = [
    Theme {
        id: "matrix",
        name: "Matrix",
        background: rgb(0x0a0a0a),
        background_secondary: rgb(0x111111),
        text: rgb(0x00ff41),
        text_dim: rgb(0x00aa2a),
        accent: rgb(0x00ff41),
        accent_secondary: rgb(0x39ff14),
        success: rgb(0x00ff41),
        warning: rgb(0xc4ff00),
        error: rgb(0xff3131),
        info: rgb(0x00ffaa),
        border: blend(0x00ff41, 0x33, 0x0a0a0a),
        glow: blend(0x00ff41, 0x66, 0x0a0a0a),
    },
    Theme {
        id: "cyberpunk",
        name: "Cyberpunk",
        background: rgb(0x0d0221),
        background_secondary: rgb(0x1a0533),
        text: rgb(0xff00ff),
        text_dim: rgb(0xaa00aa),
        accent: rgb(0x00ffff),
        accent_secondary: rgb(0xff00ff),
        success: rgb(0x00ff9f),
        warning: rgb(0xffff00),
        error: rgb(0xff3366),
        info: rgb(0x00ffff),
        border: blend(0xff00ff, 0x33, 0x0d0221),
        glow: blend(0xff00ff, 0x55, 0x0d0221),
    },
    Theme {
        id: "dracula",
        name: "Dracula",
        background: rgb(0x282a36),
        background_secondary: rgb(0x1e1f29),
        text: rgb(0xf8f8f2),
        text_dim: rgb(0x6272a4),
        accent: rgb(0xff79c6),
        accent_secondary: rgb(0xbd93f9),
        success: rgb(0x50fa7b),
        warning: rgb(0xf1fa8c),
        error: rgb(0xff5555),
        info: rgb(0x8be9fd),
        border: rgb(0x44475a),
        glow: blend(0xbd93f9, 0x55, 0x282a36),
    },
    Theme {
        id: "nord",
        name: "Nord",
        background: rgb(0x2e3440),
        background_secondary: rgb(0x3b4252),
        text: rgb(0xeceff4),
        text_dim: rgb(0xd8dee9),
        accent: rgb(0x88c0d0),
        accent_secondary: rgb(0x81a1c1),
        success: rgb(0xa3be8c),
        warning: rgb(0xebcb8b),
        error: rgb(0xbf616a),
        info: rgb(0x5e81ac),
        border: rgb(0x4c566a),
        glow: blend(0x88c0d0, 0x44, 0x2e3440),
    },
    Theme {
        id: "solarized-light",
        name: "Solarized Light",
        background: rgb(0xfdf6e3),
        background_secondary: rgb(0xeee8d5),
        text: rgb(0x657b83),
        text_dim: rgb(0x93a1a1),
        accent: rgb(0x268bd2),
        accent_secondary: rgb(0x2aa198),
        success: rgb(0x859900),
        warning: rgb(0xb58900),
        error: rgb(0xdc322f),
        info: rgb(0x268bd2),
        border: rgb(0x93a1a1),
        glow: blend(0x268bd2, 0x44, 0xfdf6e3),
    },
    Theme {
        id: "retro-amber",
        name: "Retro Amber",
        background: rgb(0x0c0c0c),
        background_secondary: rgb(0x1a1400),
        text: rgb(0xffb000),
        text_dim: rgb(0xcc8800),
        accent: rgb(0xffd700),
        accent_secondary: rgb(0xffb000),
        success: rgb(0xffcc00),
        warning: rgb(0xff9500),
        error: rgb(0xff4500),
        info: rgb(0xffd700),
        border: blend(0xffb000, 0x33, 0x0c0c0c),
        glow: blend(0xffb000, 0x55, 0x0c0c0c),
    },
    Theme {
        id: "midnight",
        name: "Midnight Blue",
        background: rgb(0x0a1628),
        background_secondary: rgb(0x132238),
        text: rgb(0xe0e7ff),
        text_dim: rgb(0x94a3b8),
        accent: rgb(0x3b82f6),
        accent_secondary: rgb(0x60a5fa),
        success: rgb(0x22c55e),
        warning: rgb(0xeab308),
        error: rgb(0xef4444),
        info: rgb(0x0ea5e9),
        border: rgb(0x334155),
        glow: blend(0x3b82f6, 0x44, 0x0a1628),
    },
    Theme {
        id: "forest",
        name: "Forest",
        background: rgb(0x0f1a0f),
        background_secondary: rgb(0x1a2f1a),
        text: rgb(0xa8e6cf),
        text_dim: rgb(0x6b9e7a),
        accent: rgb(0x56ab2f),
        accent_secondary: rgb(0xa8e063),
        success: rgb(0x4ade80),
        warning: rgb(0xfbbf24),
        error: rgb(0xf87171),
        info: rgb(0x38bdf8),
        border: rgb(0x2d4a2d),
        glow: blend(0x56ab2f, 0x44, 0x0f1a0f),
    },
];

/// Looks up a theme by id, falling back to the first (matrix).
pub fn by_id(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

pub fn is_known(id: &str) -> bool {
    THEMES.iter().any(|t| t.id == id)
}

/// Id of the theme after `id`, wrapping around.
pub fn next_id(id: &str) -> &'static str {
    step_id(id, 1)
}

/// Id of the theme before `id`, wrapping around.
pub fn prev_id(id: &str) -> &'static str {
    step_id(id, THEMES.len() - 1)
}

fn step_id(id: &str, step: usize) -> &'static str {
    let idx = THEMES.iter().position(|t| t.id == id).unwrap_or(0);
    THEMES[(idx + step) % THEMES.len()].id
}

impl Theme {
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Default => self.text,
            Category::Success => self.success,
            Category::Warning => self.warning,
            Category::Error => self.error,
            Category::Info => self.info,
            Category::Dim => self.text_dim,
            Category::Accent => self.accent,
            Category::AccentSecondary => self.accent_secondary,
        }
    }

    /// Style for line content. Glowing lines are bold.
    pub fn line_style(&self, category: Category, glow: bool) -> Style {
        let style = Style::default().fg(self.category_color(category));
        if glow {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_secondary)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in THEMES.iter().enumerate() {
            for b in &THEMES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_matrix() {
        assert_eq!(by_id("vaporwave").id, "matrix");
        assert_eq!(by_id("nord").name, "Nord");
        assert!(!is_known("vaporwave"));
        assert!(is_known("retro-amber"));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        assert_eq!(next_id("matrix"), "cyberpunk");
        assert_eq!(next_id("forest"), "matrix");
        assert_eq!(prev_id("matrix"), "forest");
        assert_eq!(prev_id("cyberpunk"), "matrix");
        assert_eq!(next_id("unknown"), "cyberpunk");
    }

    #[test]
    fn test_blend_over_background() {
        assert_eq!(blend(0xffffff, 0xff, 0x000000), Color::Rgb(255, 255, 255));
        assert_eq!(blend(0xffffff, 0, 0x102030), Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(THEMES[0].border, Color::Rgb(8, 59, 21));
    }

    #[test]
    fn test_category_colors() {
        let theme = by_id("dracula");
        assert_eq!(theme.category_color(Category::Error), rgb(0xff5555));
        assert_eq!(theme.category_color(Category::Dim), theme.text_dim);
        assert!(
            theme
                .line_style(Category::Success, true)
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }
}
