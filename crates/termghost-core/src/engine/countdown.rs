//! Session countdown shown next to the log.

use std::time::Duration;

/// Whole-second countdown from a configured number of minutes.
///
/// Sub-second remainders of `advance` are carried so that frequent small
/// steps add up to exact seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
    carry: Duration,
}

impl Countdown {
    pub fn new(minutes: u32) -> Self {
        let total_secs = minutes.saturating_mul(60);
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
            carry: Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs - self.remaining_secs
    }

    /// Restarts from the full duration and runs.
    pub fn start(&mut self) {
        self.remaining_secs = self.total_secs;
        self.carry = Duration::ZERO;
        self.running = self.total_secs > 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restores the full duration without running.
    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.carry = Duration::ZERO;
        self.running = false;
    }

    /// Changes the duration. The remaining time follows.
    pub fn set_minutes(&mut self, minutes: u32) {
        self.total_secs = minutes.saturating_mul(60);
        self.remaining_secs = self.total_secs;
        self.carry = Duration::ZERO;
    }

    /// Counts down by the whole seconds in `elapsed`. Returns true exactly
    /// once, on the step that reaches zero, after which the countdown stops.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.carry += elapsed;
        let whole = self.carry.as_secs();
        self.carry -= Duration::from_secs(whole);
        let step = u32::try_from(whole).unwrap_or(u32::MAX);
        self.remaining_secs = self.remaining_secs.saturating_sub(step);
        if self.remaining_secs == 0 {
            self.running = false;
            self.carry = Duration::ZERO;
            return true;
        }
        false
    }

    /// `MM:SS` of the remaining time.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }
}

pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
