//! Core termghost library (playback engine, log scenarios, settings).

pub mod config;
pub mod engine;
pub mod logging;
pub mod scenarios;

pub use config::Settings;
pub use engine::{Playback, PlaybackEvent, PlaybackSettings, PlaybackState};
pub use scenarios::{LogType, ScenarioRegistry};
