//! TUI reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::controls::{self, ControlAction};
use crate::overlays::{Overlay, OverlayTransition, SettingsPanelState};
use crate::state::{AppState, TuiState};
use crate::theme;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { elapsed } => {
            app.tui.advance(elapsed);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = (width, height);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::SettingsSaved { result } => {
            match result {
                Ok(()) => debug!("settings persisted"),
                Err(err) => warn!(error = %err, "failed to save settings"),
            }
            vec![]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl_c =
        key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c {
        return vec![UiEffect::Quit];
    }

    if let Some(Overlay::Settings(panel)) = &mut app.overlay {
        let update = panel.handle_key(&mut app.tui.settings, key);
        return match update.transition {
            OverlayTransition::Stay => vec![],
            OverlayTransition::Close => {
                app.overlay = None;
                vec![]
            }
            OverlayTransition::Changed => settings_changed(&mut app.tui),
        };
    }

    let Some(action) = controls::action_for(key) else {
        return vec![];
    };
    match action {
        ControlAction::ToggleRunning => {
            app.tui.toggle_session();
            vec![]
        }
        ControlAction::Reset => {
            app.tui.reset_session();
            vec![]
        }
        ControlAction::ClearLog => {
            app.tui.clear_log();
            vec![]
        }
        ControlAction::OpenSettings => {
            app.overlay = Some(Overlay::Settings(SettingsPanelState::new()));
            vec![]
        }
        ControlAction::NextTheme => {
            app.tui.settings.theme = theme::next_id(&app.tui.settings.theme).to_string();
            settings_changed(&mut app.tui)
        }
        ControlAction::Quit => vec![UiEffect::Quit],
    }
}

/// Applies edited settings and asks for a save unless persistence is off.
fn settings_changed(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.apply_settings();
    if tui.persist {
        vec![UiEffect::PersistSettings {
            settings: tui.settings.clone(),
        }]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use termghost_core::config::Settings;
    use termghost_core::engine::PlaybackState;
    use termghost_core::scenarios::LogType;

    use super::*;
    use crate::overlays::Row;
    use crate::state::SessionOptions;

    fn app() -> AppState {
        AppState::new(
            Settings::default(),
            &SessionOptions {
                autostart: false,
                seed: Some(7),
                persist: true,
            },
        )
    }

    fn key(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn tick(app: &mut AppState, ms: u64) {
        update(
            app,
            UiEvent::Tick {
                elapsed: Duration::from_millis(ms),
            },
        );
    }

    #[test]
    fn test_space_starts_and_stops_session() {
        let mut app = app();
        assert!(!app.tui.is_running());

        key(&mut app, KeyCode::Char(' '));
        assert!(app.tui.is_running());
        assert!(app.tui.playback.is_enabled());
        assert_eq!(app.tui.playback.state(), PlaybackState::Typing);

        key(&mut app, KeyCode::Char(' '));
        assert!(!app.tui.is_running());
        assert_eq!(app.tui.playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_autostart_runs_immediately() {
        let app = AppState::new(
            Settings::default(),
            &SessionOptions {
                autostart: true,
                seed: Some(1),
                persist: false,
            },
        );
        assert!(app.tui.is_running());
        assert!(app.tui.playback.is_enabled());
    }

    #[test]
    fn test_ticks_produce_lines_and_count_down() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        for _ in 0..200 {
            tick(&mut app, 16);
        }
        assert!(!app.tui.playback.buffer().is_empty());
        assert_eq!(app.tui.countdown.remaining_secs(), 600 - 3);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        tick(&mut app, 5_000);
        key(&mut app, KeyCode::Char('c'));
        assert!(app.tui.playback.buffer().is_empty());
        assert!(app.tui.is_running());
    }

    #[test]
    fn test_reset_stops_and_restores_duration() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        tick(&mut app, 5_000);

        key(&mut app, KeyCode::Char('r'));
        assert!(!app.tui.is_running());
        assert_eq!(app.tui.countdown.remaining_secs(), 600);
        assert!(app.tui.playback.buffer().is_empty());
        assert_eq!(app.tui.playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_expiry_stops_playback() {
        let mut app = app();
        app.tui.settings.set_timer_minutes(1);
        app.tui.apply_settings();
        key(&mut app, KeyCode::Char(' '));

        tick(&mut app, 61_000);
        assert!(!app.tui.is_running());
        assert!(!app.tui.playback.is_enabled());
        assert_eq!(app.tui.countdown.display(), "00:00");
    }

    #[test]
    fn test_next_theme_persists() {
        let mut app = app();
        let effects = key(&mut app, KeyCode::Char('t'));
        assert_eq!(app.tui.settings.theme, "cyberpunk");
        assert_eq!(app.tui.theme().name, "Cyberpunk");
        assert_eq!(
            effects,
            vec![UiEffect::PersistSettings {
                settings: app.tui.settings.clone()
            }]
        );
    }

    #[test]
    fn test_no_save_suppresses_persist() {
        let mut app = app();
        app.tui.persist = false;
        assert!(key(&mut app, KeyCode::Char('t')).is_empty());
    }

    #[test]
    fn test_settings_panel_edits_playback() {
        let mut app = app();
        key(&mut app, KeyCode::Char('s'));
        assert!(app.overlay.is_some());

        let Some(Overlay::Settings(panel)) = &mut app.overlay else {
            panic!("settings panel should be open");
        };
        panel.selected = Row::all()
            .iter()
            .position(|r| *r == Row::LogType(LogType::Git))
            .unwrap();

        let effects = key(&mut app, KeyCode::Char(' '));
        assert_eq!(effects.len(), 1);
        assert!(!app.tui.settings.is_log_type_enabled(LogType::Git));
        assert!(
            !app
                .tui
                .playback
                .settings()
                .enabled_types
                .contains(&LogType::Git)
        );

        key(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
        assert!(!app.tui.should_quit);
    }

    #[test]
    fn test_changing_timer_updates_countdown() {
        let mut app = app();
        key(&mut app, KeyCode::Char('s'));
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Right);
        assert_eq!(app.tui.settings.timer_minutes, 11);
        assert_eq!(app.tui.countdown.display(), "11:00");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(key(&mut app, KeyCode::Char('q')), vec![UiEffect::Quit]);
        assert_eq!(key(&mut app, KeyCode::Esc), vec![UiEffect::Quit]);

        key(&mut app, KeyCode::Char('s'));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            update(&mut app, UiEvent::Terminal(Event::Key(ctrl_c))),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_frame_records_viewport() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Frame {
                width: 120,
                height: 40,
            },
        );
        assert_eq!(app.tui.viewport, (120, 40));
    }
}
