//! Inputs to the reducer.

use std::time::Duration;

use crossterm::event::Event;

#[derive(Debug)]
pub enum UiEvent {
    /// Time moved forward by `elapsed` since the previous tick.
    Tick { elapsed: Duration },
    /// Emitted before every batch of events with the terminal size.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// A settings save finished off the UI thread.
    SettingsSaved { result: Result<(), String> },
}
