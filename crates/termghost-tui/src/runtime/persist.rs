//! Settings saves off the UI thread.
//!
//! Saves are coalesced: each request replaces the pending snapshot, and a
//! writer always takes the newest one under the write lock, so the file
//! never ends up older than the last request.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use termghost_core::config::Settings;
use tokio::runtime::Handle;

use super::inbox::UiEventSender;
use crate::events::UiEvent;

#[derive(Default)]
struct Slots {
    latest: Mutex<Option<Settings>>,
    write: Mutex<()>,
}

pub struct Persister {
    path: PathBuf,
    handle: Handle,
    slots: Arc<Slots>,
}

impl Persister {
    pub fn new(path: PathBuf, handle: Handle) -> Self {
        Self {
            path,
            handle,
            slots: Arc::new(Slots::default()),
        }
    }

    /// Queues `settings` for writing; the result is sent to `tx`.
    pub fn save(&self, settings: Settings, tx: UiEventSender) {
        *self
            .slots
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(settings);

        let slots = Arc::clone(&self.slots);
        let path = self.path.clone();
        self.handle.spawn_blocking(move || {
            let _write = slots.write.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(settings) = slots
                .latest
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
            else {
                return;
            };
            let result = settings.save_to(&path).map_err(|e| format!("{e:#}"));
            let _ = tx.send(UiEvent::SettingsSaved { result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::*;
    use crate::runtime::inbox;

    #[test]
    fn test_last_request_wins() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let persister = Persister::new(path.clone(), rt.handle().clone());
        let (tx, mut rx) = inbox::channel();

        for minutes in 1..=5 {
            let mut settings = Settings::default();
            settings.set_timer_minutes(minutes);
            persister.save(settings, tx.clone());
        }
        drop(tx);

        let mut saved = 0;
        while let Some(event) = rx.blocking_recv() {
            if let UiEvent::SettingsSaved { result } = event {
                assert!(result.is_ok());
                saved += 1;
            }
        }
        assert!(saved >= 1);
        assert_eq!(Settings::load_from(&path).unwrap().timer_minutes, 5);
        rt.shutdown_timeout(Duration::from_secs(1));
    }
}
