//! Playback loop: the state machine that fetches, appends and paces batches.
//!
//! All waiting happens on the internal [`TimerQueue`]; the owner drives time
//! forward with [`Playback::advance`]. Nothing here blocks or spawns.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use super::buffer::LogBuffer;
use super::cohort::ProgressCohort;
use super::line::{LineFactory, LogRecord, wall_clock_stamp};
use super::pacing;
use super::timers::TimerQueue;
use crate::scenarios::{LineDraft, LogType, ScenarioRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Cursor shown, waiting for the reveal delay.
    Typing,
    /// Batch being appended.
    Emitting,
    /// Progress cohort in flight.
    Animating,
    /// Waiting for the inter-batch delay.
    Scheduled,
}

/// Read-only dials the loop consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub enabled_types: Vec<LogType>,
    /// 1-10, 5 is normal.
    pub scroll_speed: u8,
    /// 50-200, percent of normal pace.
    pub print_speed: u16,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            enabled_types: LogType::ALL.to_vec(),
            scroll_speed: 5,
            print_speed: 100,
        }
    }
}

/// Notifications for the owner, drained with [`Playback::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The download-active flag changed.
    DownloadActive(bool),
    /// A cycle settled and the next one is scheduled.
    CycleFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Reveal,
    CohortTick,
    Settle,
    NextCycle,
}

pub struct Playback<R: RngCore = StdRng> {
    enabled: bool,
    state: PlaybackState,
    typing: bool,
    downloading: bool,
    settings: PlaybackSettings,
    registry: ScenarioRegistry,
    buffer: LogBuffer,
    factory: LineFactory,
    cohort: Option<ProgressCohort>,
    timers: TimerQueue<Timer>,
    rng: R,
    clock: fn() -> String,
    events: Vec<PlaybackEvent>,
    cycles: u64,
}

impl Playback<StdRng> {
    /// Loop seeded from `seed`, or from OS entropy when `None`.
    pub fn seeded(settings: PlaybackSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(settings, rng)
    }
}

impl<R: RngCore> Playback<R> {
    pub fn new(settings: PlaybackSettings, rng: R) -> Self {
        Self {
            enabled: false,
            state: PlaybackState::Idle,
            typing: false,
            downloading: false,
            settings,
            registry: ScenarioRegistry::new(),
            buffer: LogBuffer::new(),
            factory: LineFactory::new(),
            cohort: None,
            timers: TimerQueue::new(),
            rng,
            clock: wall_clock_stamp,
            events: Vec::new(),
            cycles: 0,
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: ScenarioRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Overrides the source of first-line timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &LogRecord> + ExactSizeIterator {
        self.buffer.iter()
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn active_cohort(&self) -> Option<&ProgressCohort> {
        self.cohort.as_ref()
    }

    /// Number of cycles that reached `Scheduled` since construction.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Logical time elapsed since construction.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Time until the next pending timer, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.timers.next_due_in()
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// New dials apply from the next delay drawn.
    pub fn set_settings(&mut self, settings: PlaybackSettings) {
        self.settings = settings;
    }

    /// Enables the loop. No-op while already enabled.
    pub fn start(&mut self) {
        if self.enabled {
            return;
        }
        info!("playback started");
        self.enabled = true;
        self.begin_typing();
    }

    /// Disables the loop and cancels everything in flight.
    pub fn stop(&mut self) {
        if self.enabled {
            info!("playback stopped");
        }
        self.enabled = false;
        self.timers.cancel_all();
        self.cohort = None;
        self.set_downloading(false);
        self.typing = false;
        self.enter(PlaybackState::Idle);
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Empties the log and restarts id numbering.
    ///
    /// An in-flight cohort loses its members, so its next tick completes and
    /// the cycle continues normally.
    pub fn clear(&mut self) {
        info!(lines = self.buffer.len(), "log cleared");
        self.buffer.clear();
        self.factory.reset();
        if let Some(cohort) = self.cohort.as_mut() {
            cohort.clear();
        }
    }

    /// Moves logical time forward, firing every timer that falls due in order.
    /// Timers scheduled by a handler fire too if they land inside the window.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.pop_due(until) {
            self.fire(timer);
        }
    }

    fn fire(&mut self, timer: Timer) {
        if !self.enabled {
            self.enter(PlaybackState::Idle);
            return;
        }
        match timer {
            Timer::Reveal => self.emit_batch(),
            Timer::CohortTick => self.tick_cohort(),
            Timer::Settle => self.schedule_next_cycle(),
            Timer::NextCycle => self.begin_typing(),
        }
    }

    fn enter(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "playback state");
            self.state = next;
        }
    }

    fn set_downloading(&mut self, active: bool) {
        if self.downloading != active {
            self.downloading = active;
            self.events.push(PlaybackEvent::DownloadActive(active));
        }
    }

    fn begin_typing(&mut self) {
        self.typing = true;
        self.enter(PlaybackState::Typing);
        let delay = pacing::reveal_delay(&mut self.rng);
        self.timers.schedule(delay, Timer::Reveal);
    }

    fn fetch_batch(&mut self) -> Vec<LineDraft> {
        let Some(kind) = self.settings.enabled_types.choose(&mut self.rng).copied() else {
            return Vec::new();
        };
        self.registry.generate(kind, &mut self.rng)
    }

    fn stamp_batch(&mut self, drafts: Vec<LineDraft>) -> Vec<LogRecord> {
        let clock = self.clock;
        drafts
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| {
                let mut options = draft.options;
                if idx == 0 && options.timestamp.is_none() {
                    options.timestamp = Some(clock());
                }
                self.factory.create_with(draft.content, draft.category, options)
            })
            .collect()
    }

    fn emit_batch(&mut self) {
        self.enter(PlaybackState::Emitting);
        let drafts = self.fetch_batch();
        let mut records = self.stamp_batch(drafts);

        // Generator progress values are discarded; bars always animate from 0.
        let mut pending = Vec::new();
        for record in &mut records {
            if record.needs_progress() {
                record.progress = Some(0);
                pending.push(record.id);
            }
        }

        self.buffer.append(records);
        self.typing = false;

        if pending.is_empty() {
            self.schedule_next_cycle();
        } else {
            debug!(bars = pending.len(), "progress cohort started");
            self.cohort = Some(ProgressCohort::new(pending));
            self.set_downloading(true);
            self.enter(PlaybackState::Animating);
            self.tick_cohort();
        }
    }

    fn tick_cohort(&mut self) {
        let Some(cohort) = self.cohort.as_mut() else {
            return;
        };
        let step = cohort.step(&mut self.rng);
        self.buffer.patch_many(&step.updates);

        let print_speed = self.settings.print_speed;
        if step.complete {
            self.cohort = None;
            self.set_downloading(false);
            self.timers
                .schedule(pacing::settle_delay(print_speed), Timer::Settle);
        } else {
            let delay = pacing::tick_delay(&mut self.rng, print_speed);
            self.timers.schedule(delay, Timer::CohortTick);
        }
    }

    fn schedule_next_cycle(&mut self) {
        self.cycles += 1;
        self.enter(PlaybackState::Scheduled);
        self.events.push(PlaybackEvent::CycleFinished);
        let delay = pacing::next_delay(
            &mut self.rng,
            self.settings.scroll_speed,
            self.settings.print_speed,
        );
        self.timers.schedule(delay, Timer::NextCycle);
    }
}
