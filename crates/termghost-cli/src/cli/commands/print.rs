//! Headless playback.
//!
//! Drives the engine on its logical clock, so output comes as fast as it can
//! be generated. A batch is printed once its cycle settles, which means
//! progress lines show their final value.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termghost_core::config::Settings;
use termghost_core::engine::{LineId, LogRecord, Playback, PlaybackEvent};

const BAR_CELLS: usize = 20;

pub fn run(settings: &Settings, cycles: u32, seed: Option<u64>, json: bool) -> Result<()> {
    if settings.enabled_log_types.is_empty() {
        anyhow::bail!("No log types enabled (see `termghost types`)");
    }

    let mut playback = Playback::seeded(settings.playback(), seed);
    playback.start();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut printed: Option<LineId> = None;
    let mut done = 0;

    while done < cycles {
        let Some(wait) = playback.next_due_in() else {
            break;
        };
        playback.advance(wait);

        for event in playback.drain_events() {
            if event != PlaybackEvent::CycleFinished || done >= cycles {
                continue;
            }
            for record in playback.buffer().since(printed) {
                write_record(&mut out, record, json)?;
                printed = Some(record.id);
            }
            done += 1;
        }
    }

    out.flush().context("flush stdout")?;
    tracing::info!(cycles = done, "print finished");
    Ok(())
}

fn write_record(out: &mut impl Write, record: &LogRecord, json: bool) -> Result<()> {
    let line = if json {
        serde_json::to_string(record).context("serialize record")?
    } else {
        plain(record)
    };
    writeln!(out, "{line}").context("write to stdout")
}

/// `[ts] prefix [#####.....]  50% content`, omitting absent parts.
pub fn plain(record: &LogRecord) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(ts) = &record.timestamp {
        parts.push(format!("[{ts}]"));
    }
    if let Some(prefix) = &record.prefix {
        parts.push(prefix.clone());
    }
    if record.is_progress {
        let value = record.progress.unwrap_or(0).min(100);
        let filled = usize::from(value) * BAR_CELLS / 100;
        parts.push(format!(
            "[{}{}] {value:>3}%",
            "#".repeat(filled),
            ".".repeat(BAR_CELLS - filled)
        ));
    }
    parts.push(record.content.clone());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use termghost_core::engine::Category;

    use super::*;

    fn record() -> LogRecord {
        LogRecord {
            id: LineId(3),
            timestamp: None,
            prefix: None,
            content: "Downloading numpy".to_string(),
            category: Category::Info,
            is_progress: false,
            progress: None,
            glow: false,
        }
    }

    #[test]
    fn test_plain_formats_parts_in_order() {
        let mut rec = record();
        rec.timestamp = Some("10:00:00".to_string());
        rec.prefix = Some(">".to_string());
        assert_eq!(plain(&rec), "[10:00:00] > Downloading numpy");
    }

    #[test]
    fn test_plain_progress_bar() {
        let mut rec = record();
        rec.is_progress = true;
        rec.progress = Some(100);
        assert_eq!(
            plain(&rec),
            format!("[{}] 100% Downloading numpy", "#".repeat(BAR_CELLS))
        );

        rec.progress = Some(50);
        assert!(plain(&rec).starts_with("[##########..........]  50%"));
    }
}
