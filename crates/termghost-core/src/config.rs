//! User settings.
//!
//! Loads settings from ${TERMGHOST_HOME}/config.toml with defaults for
//! anything missing. Only preferences are stored here; running state such as
//! the countdown or the download flag lives with its owner.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::PlaybackSettings;
use crate::scenarios::LogType;

pub const SCROLL_SPEED_RANGE: (u8, u8) = (1, 10);
pub const PRINT_SPEED_RANGE: (u16, u16) = (50, 200);
pub const TEXT_SIZE_RANGE: (u8, u8) = (12, 24);
pub const TIMER_MINUTES_RANGE: (u32, u32) = (1, 120);

/// Side panel widgets that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    ProgressRing,
    CpuGraph,
    MemoryBar,
    NetworkActivity,
    Clock,
    Stats,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::ProgressRing,
        Widget::CpuGraph,
        Widget::MemoryBar,
        Widget::NetworkActivity,
        Widget::Clock,
        Widget::Stats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Widget::ProgressRing => "Progress ring",
            Widget::CpuGraph => "CPU graph",
            Widget::MemoryBar => "Memory bar",
            Widget::NetworkActivity => "Network activity",
            Widget::Clock => "Clock",
            Widget::Stats => "Stats",
        }
    }
}

/// Widget visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub progress_ring: bool,
    pub cpu_graph: bool,
    pub memory_bar: bool,
    pub network_activity: bool,
    pub clock: bool,
    pub stats: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            progress_ring: true,
            cpu_graph: true,
            memory_bar: true,
            network_activity: true,
            clock: true,
            stats: true,
        }
    }
}

impl WidgetSettings {
    pub fn is_visible(&self, widget: Widget) -> bool {
        match widget {
            Widget::ProgressRing => self.progress_ring,
            Widget::CpuGraph => self.cpu_graph,
            Widget::MemoryBar => self.memory_bar,
            Widget::NetworkActivity => self.network_activity,
            Widget::Clock => self.clock,
            Widget::Stats => self.stats,
        }
    }

    pub fn toggle(&mut self, widget: Widget) {
        let flag = match widget {
            Widget::ProgressRing => &mut self.progress_ring,
            Widget::CpuGraph => &mut self.cpu_graph,
            Widget::MemoryBar => &mut self.memory_bar,
            Widget::NetworkActivity => &mut self.network_activity,
            Widget::Clock => &mut self.clock,
            Widget::Stats => &mut self.stats,
        };
        *flag = !*flag;
    }

    pub fn any_visible(&self) -> bool {
        Widget::ALL.into_iter().any(|w| self.is_visible(w))
    }
}

/// Persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme id, see the TUI theme table.
    pub theme: String,
    /// Session length in minutes.
    pub timer_minutes: u32,
    pub enabled_log_types: Vec<LogType>,
    /// 1-10, 5 is normal.
    pub scroll_speed: u8,
    /// Percent of normal pace.
    pub print_speed: u16,
    /// Stored for graphical front ends; terminals use the emulator font.
    pub text_size: u8,
    pub widgets: WidgetSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Self::DEFAULT_THEME.to_string(),
            timer_minutes: Self::DEFAULT_TIMER_MINUTES,
            enabled_log_types: LogType::ALL.to_vec(),
            scroll_speed: Self::DEFAULT_SCROLL_SPEED,
            print_speed: Self::DEFAULT_PRINT_SPEED,
            text_size: Self::DEFAULT_TEXT_SIZE,
            widgets: WidgetSettings::default(),
        }
    }
}

impl Settings {
    pub const DEFAULT_THEME: &str = "matrix";
    pub const DEFAULT_TIMER_MINUTES: u32 = 10;
    pub const DEFAULT_SCROLL_SPEED: u8 = 5;
    pub const DEFAULT_PRINT_SPEED: u16 = 100;
    pub const DEFAULT_TEXT_SIZE: u8 = 14;

    /// Loads settings from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads settings from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(settings.normalized())
    }

    /// Clamps every dial into range and drops duplicate log types.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.set_scroll_speed(self.scroll_speed);
        self.set_print_speed(self.print_speed);
        self.set_text_size(self.text_size);
        self.set_timer_minutes(self.timer_minutes);
        let mut seen = Vec::with_capacity(self.enabled_log_types.len());
        self.enabled_log_types.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        if self.theme.trim().is_empty() {
            self.theme = Self::DEFAULT_THEME.to_string();
        }
        self
    }

    pub fn set_scroll_speed(&mut self, speed: u8) {
        self.scroll_speed = speed.clamp(SCROLL_SPEED_RANGE.0, SCROLL_SPEED_RANGE.1);
    }

    pub fn set_print_speed(&mut self, speed: u16) {
        self.print_speed = speed.clamp(PRINT_SPEED_RANGE.0, PRINT_SPEED_RANGE.1);
    }

    pub fn set_text_size(&mut self, size: u8) {
        self.text_size = size.clamp(TEXT_SIZE_RANGE.0, TEXT_SIZE_RANGE.1);
    }

    pub fn set_timer_minutes(&mut self, minutes: u32) {
        self.timer_minutes = minutes.clamp(TIMER_MINUTES_RANGE.0, TIMER_MINUTES_RANGE.1);
    }

    /// Enables `kind` if disabled, disables it otherwise.
    pub fn toggle_log_type(&mut self, kind: LogType) {
        if let Some(idx) = self.enabled_log_types.iter().position(|t| *t == kind) {
            self.enabled_log_types.remove(idx);
        } else {
            self.enabled_log_types.push(kind);
        }
    }

    pub fn is_log_type_enabled(&self, kind: LogType) -> bool {
        self.enabled_log_types.contains(&kind)
    }

    /// The dials the playback loop reads.
    pub fn playback(&self) -> PlaybackSettings {
        PlaybackSettings {
            enabled_types: self.enabled_log_types.clone(),
            scroll_speed: self.scroll_speed,
            print_speed: self.print_speed,
        }
    }

    /// Saves to the default config path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::config_path())
    }

    /// Writes every field to `path`.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// If it exists, unknown keys the user added are kept and the template's
    /// comments are restored.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let base = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let contents = overlay_settings(&base, self)?;
        write_config(path, &contents)?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_config(path, default_config_template())
    }

    /// Renders the template with the values of `Settings::default()`.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with the Rust defaults.
    pub fn generate() -> Result<String> {
        overlay_settings(default_config_template(), &Settings::default())
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Overwrites the values in `base` with the serialized `settings`.
fn overlay_settings(base: &str, settings: &Settings) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = base.parse().context("Failed to parse config document")?;
    let generated = toml::to_string(settings).context("Failed to serialize settings to TOML")?;
    let generated_doc: DocumentMut = generated
        .parse()
        .context("Failed to parse generated config")?;

    merge_items(doc.as_table_mut(), generated_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(_) => {
                target[key] = value.clone();
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

/// Writes config content to a file, creating parent directories as needed.
/// Uses atomic write (temp file + rename).
fn write_config(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

pub mod paths {
    //! Path resolution for termghost configuration and logs.
    //!
    //! TERMGHOST_HOME resolution order:
    //! 1. TERMGHOST_HOME environment variable (if set)
    //! 2. ~/.config/termghost (default)

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "TERMGHOST_HOME";

    /// Returns the termghost home directory.
    pub fn termghost_home() -> PathBuf {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_default()
            .join(".config")
            .join("termghost")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        termghost_home().join("config.toml")
    }

    /// Returns the directory for rolling log files.
    pub fn logs_dir() -> PathBuf {
        termghost_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "matrix");
        assert_eq!(settings.timer_minutes, 10);
        assert_eq!(settings.enabled_log_types, LogType::ALL.to_vec());
        assert_eq!(settings.scroll_speed, 5);
        assert_eq!(settings.print_speed, 100);
        assert_eq!(settings.text_size, 14);
        assert!(Widget::ALL.iter().all(|w| settings.widgets.is_visible(*w)));
    }

    /// The embedded template parses to exactly the Rust defaults.
    #[test]
    fn test_template_matches_defaults() {
        let parsed: Settings = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Settings::default());

        let generated: Settings = toml::from_str(&Settings::generate().unwrap()).unwrap();
        assert_eq!(generated, Settings::default());
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = Settings::default();
        settings.set_scroll_speed(0);
        assert_eq!(settings.scroll_speed, 1);
        settings.set_scroll_speed(42);
        assert_eq!(settings.scroll_speed, 10);
        settings.set_print_speed(10);
        assert_eq!(settings.print_speed, 50);
        settings.set_print_speed(500);
        assert_eq!(settings.print_speed, 200);
        settings.set_text_size(8);
        assert_eq!(settings.text_size, 12);
        settings.set_timer_minutes(0);
        assert_eq!(settings.timer_minutes, 1);
    }

    #[test]
    fn test_toggle_log_type() {
        let mut settings = Settings::default();
        settings.toggle_log_type(LogType::Git);
        assert!(!settings.is_log_type_enabled(LogType::Git));
        assert_eq!(settings.enabled_log_types.len(), 7);

        settings.toggle_log_type(LogType::Git);
        assert!(settings.is_log_type_enabled(LogType::Git));
        assert_eq!(settings.enabled_log_types.last(), Some(&LogType::Git));
    }

    #[test]
    fn test_widget_toggle() {
        let mut widgets = WidgetSettings::default();
        for widget in Widget::ALL {
            widgets.toggle(widget);
        }
        assert!(!widgets.any_visible());
        widgets.toggle(Widget::Clock);
        assert!(widgets.clock);
        assert!(widgets.any_visible());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"scroll_speed = 99
enabled_log_types = ["git", "ai", "git"]

[widgets]
clock = false
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.scroll_speed, 10);
        assert_eq!(settings.enabled_log_types, vec![LogType::Git, LogType::Ai]);
        assert!(!settings.widgets.clock);
        assert!(settings.widgets.stats);
        assert_eq!(settings.print_speed, 100);
    }

    #[test]
    fn test_load_rejects_unknown_log_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "enabled_log_types = [\"cobol\"]\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_save_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut settings = Settings::default();
        settings.theme = "nord".to_string();
        settings.set_print_speed(150);

        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# termghost configuration"));
        assert!(contents.contains("# Output rate"));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"dracula\"\nfavorite_color = \"teal\"\n").unwrap();

        let mut settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.theme, "dracula");
        settings.toggle_log_type(LogType::Npm);
        settings.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("favorite_color = \"teal\""));
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "dracula");
        assert!(!loaded.is_log_type_enabled(LogType::Npm));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Settings::init(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        let err = Settings::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_playback_settings_follow_dials() {
        let mut settings = Settings::default();
        settings.set_scroll_speed(8);
        settings.set_print_speed(60);
        settings.enabled_log_types = vec![LogType::Docker];

        let playback = settings.playback();
        assert_eq!(playback.scroll_speed, 8);
        assert_eq!(playback.print_speed, 60);
        assert_eq!(playback.enabled_types, vec![LogType::Docker]);
    }
}
