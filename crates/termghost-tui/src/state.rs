//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── settings: Settings        (persisted preferences)
//! │   ├── playback: Playback        (log engine)
//! │   ├── countdown: Countdown      (session timer)
//! │   └── widgets: WidgetsState     (sidebar models)
//! └── overlay: Option<Overlay>      (settings panel)
//! ```
//!
//! The overlay lives beside `TuiState` so its key handler can borrow both.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use termghost_core::config::Settings;
use termghost_core::engine::{Countdown, Playback, PlaybackEvent};
use tracing::info;

use crate::features::widgets::WidgetsState;
use crate::overlays::Overlay;
use crate::theme::{self, Theme};

/// Startup knobs that are not preferences.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Start playback immediately.
    pub autostart: bool,
    /// Seed for every random source, for reproducible runs.
    pub seed: Option<u64>,
    /// Persist settings panel changes.
    pub persist: bool,
}

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(settings: Settings, options: &SessionOptions) -> Self {
        Self {
            tui: TuiState::new(settings, options),
            overlay: None,
        }
    }
}

pub struct TuiState {
    pub should_quit: bool,
    pub settings: Settings,
    pub playback: Playback,
    pub countdown: Countdown,
    pub widgets: WidgetsState,
    widget_rng: StdRng,
    /// Mirrors the engine's download flag, updated from its events.
    pub downloading: bool,
    /// Whether setting changes emit persist effects.
    pub persist: bool,
    /// Terminal size from the latest frame.
    pub viewport: (u16, u16),
    /// Advances on every tick; drives the cursor blink.
    pub frame: u64,
}

impl TuiState {
    pub fn new(settings: Settings, options: &SessionOptions) -> Self {
        let playback = Playback::seeded(settings.playback(), options.seed);
        let widget_rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let mut tui = Self {
            should_quit: false,
            countdown: Countdown::new(settings.timer_minutes),
            settings,
            playback,
            widgets: WidgetsState::new(),
            widget_rng,
            downloading: false,
            persist: options.persist,
            viewport: (0, 0),
            frame: 0,
        };
        if options.autostart {
            tui.start_session();
        }
        tui
    }

    /// The session runs while the countdown does.
    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn theme(&self) -> &'static Theme {
        theme::by_id(&self.settings.theme)
    }

    pub fn start_session(&mut self) {
        self.countdown.start();
        self.playback.start();
        info!(minutes = self.settings.timer_minutes, "session started");
    }

    pub fn stop_session(&mut self) {
        self.countdown.stop();
        self.playback.stop();
        info!(
            remaining = self.countdown.remaining_secs(),
            "session stopped"
        );
    }

    pub fn toggle_session(&mut self) {
        if self.is_running() {
            self.stop_session();
        } else {
            self.start_session();
        }
    }

    /// Stops, restores the full duration and clears the log.
    pub fn reset_session(&mut self) {
        self.countdown.reset();
        self.playback.stop();
        self.playback.clear();
    }

    pub fn clear_log(&mut self) {
        self.playback.clear();
    }

    /// Pushes settings into the parts that read them.
    ///
    /// A changed duration restarts the countdown from its new total.
    pub fn apply_settings(&mut self) {
        if self.countdown.total_secs() != self.settings.timer_minutes.saturating_mul(60) {
            self.countdown.set_minutes(self.settings.timer_minutes);
        }
        self.playback.set_settings(self.settings.playback());
    }

    /// Advances the countdown, the log engine and the widgets.
    pub fn advance(&mut self, elapsed: Duration) {
        self.frame = self.frame.wrapping_add(1);

        if self.countdown.advance(elapsed) {
            info!("session time is up");
            self.playback.stop();
        }
        self.playback.advance(elapsed);
        for event in self.playback.drain_events() {
            if let PlaybackEvent::DownloadActive(active) = event {
                self.downloading = active;
            }
        }

        let running = self.is_running();
        self.widgets
            .advance(elapsed, running, self.downloading, &mut self.widget_rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;
    use termghost_core::engine::{Category, PlaybackSettings};
    use termghost_core::scenarios::{LineDraft, LogType, ScenarioRegistry};

    use super::*;

    fn fetch_batch(_: &mut dyn RngCore) -> Vec<LineDraft> {
        vec![
            LineDraft::command("$ fetch"),
            LineDraft::progress("Downloading a...", Category::Info, 10.0),
        ]
    }

    fn downloading_tui() -> TuiState {
        let mut tui = TuiState::new(
            Settings::default(),
            &SessionOptions {
                autostart: false,
                seed: Some(3),
                persist: false,
            },
        );
        let settings = PlaybackSettings {
            enabled_types: vec![LogType::Npm],
            ..PlaybackSettings::default()
        };
        tui.playback = Playback::seeded(settings, Some(3))
            .with_registry(ScenarioRegistry::new().with(LogType::Npm, fetch_batch));
        tui
    }

    #[test]
    fn test_download_flag_follows_engine_events() {
        let mut tui = downloading_tui();
        tui.start_session();
        assert!(!tui.downloading);

        tui.advance(Duration::from_millis(150));
        assert!(tui.playback.is_downloading());
        assert!(tui.downloading);

        tui.stop_session();
        tui.advance(Duration::from_millis(16));
        assert!(!tui.downloading);
    }

    #[test]
    fn test_download_flag_drives_network_widget() {
        let mut tui = downloading_tui();
        tui.start_session();
        tui.advance(Duration::from_millis(150));
        assert!(tui.downloading);

        tui.advance(Duration::from_millis(300));
        assert!(tui.widgets.network.download() >= 40.0);
    }
}
