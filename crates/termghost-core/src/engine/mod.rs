//! Log playback engine.
//!
//! Leaf-first: [`line`] stamps records, [`buffer`] keeps the visible window,
//! [`pacing`] draws delays, [`cohort`] animates progress bars, [`timers`] is
//! the logical clock and [`playback`] ties them into the state machine.

pub mod buffer;
pub mod cohort;
pub mod countdown;
pub mod line;
pub mod pacing;
pub mod playback;
pub mod timers;

pub use buffer::{LogBuffer, MAX_LINES};
pub use cohort::{CohortStep, ProgressCohort};
pub use countdown::Countdown;
pub use line::{Category, LineFactory, LineId, LineOptions, LogRecord};
pub use playback::{Playback, PlaybackEvent, PlaybackSettings, PlaybackState};
pub use timers::TimerQueue;
