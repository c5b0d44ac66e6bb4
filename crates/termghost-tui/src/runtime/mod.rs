//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the boundary where side effects happen. The reducer stays pure
//! and returns effects; this module carries them out.
//!
//! Background work reports back through the inbox (`inbox.rs`), which the
//! loop drains every frame. Settings saves run on the blocking pool
//! (`persist.rs`).

mod inbox;
mod persist;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use persist::Persister;
use tokio::runtime::Handle;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::{render, update};

/// Tick cadence while the session runs or a panel is open (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence while idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Tui,
    pub state: AppState,
    persister: Persister,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal. Must be called inside a tokio runtime.
    pub fn new(state: AppState, config_path: PathBuf) -> Result<Self> {
        let handle = Handle::try_current().context("The TUI needs a tokio runtime")?;

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = inbox::channel();

        Ok(Self {
            terminal,
            state,
            persister: Persister::new(config_path, handle),
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the reducer asks to quit.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                let marks_dirty =
                    matches!(event, UiEvent::Tick { .. } | UiEvent::Terminal(_));
                let effects = update::update(&mut self.state, event);
                dirty |= marks_dirty;
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.is_running() || self.state.overlay.is_some() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick is due unless there is already work.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        let elapsed = self.last_tick.elapsed();
        if elapsed >= tick_interval {
            events.push(UiEvent::Tick { elapsed });
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Quit => {
                    self.state.tui.should_quit = true;
                }
                UiEffect::PersistSettings { settings } => {
                    self.persister.save(settings, self.inbox_tx.clone());
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
