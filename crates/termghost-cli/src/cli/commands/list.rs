//! `themes` and `types` listings.

use termghost_core::scenarios::LogType;
use termghost_tui::theme::THEMES;

pub fn themes() {
    for theme in &THEMES {
        println!("{:<16} {}", theme.id, theme.name);
    }
}

pub fn types() {
    for kind in LogType::ALL {
        println!("{:<10} {}", kind.key(), kind.label());
    }
}
