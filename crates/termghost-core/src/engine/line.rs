//! Log line records and the factory that stamps them.

use serde::{Deserialize, Serialize};

/// Visual treatment of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Default,
    Success,
    Warning,
    Error,
    Info,
    Dim,
    Accent,
    AccentSecondary,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Default => "default",
            Category::Success => "success",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Info => "info",
            Category::Dim => "dim",
            Category::Accent => "accent",
            Category::AccentSecondary => "accent-secondary",
        }
    }
}

/// Stable identifier of a record within one clear-to-clear window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "log-{}", self.0)
    }
}

/// One visible terminal entry.
///
/// Everything except `progress` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: LineId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub content: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub glow: bool,
}

impl LogRecord {
    /// True for progress lines that still need animating.
    pub fn needs_progress(&self) -> bool {
        self.is_progress && self.progress.unwrap_or(0) < 100
    }
}

/// Optional overrides applied on top of the factory defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOptions {
    pub timestamp: Option<String>,
    pub prefix: Option<String>,
    pub progress: Option<f64>,
    pub glow: bool,
}

impl LineOptions {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Marks the line as a progress bar starting at `value` percent.
    pub fn progress(mut self, value: f64) -> Self {
        self.progress = Some(value);
        self
    }

    pub fn glow(mut self) -> Self {
        self.glow = true;
        self
    }
}

/// Allocates ids and builds records.
#[derive(Debug, Default)]
pub struct LineFactory {
    next: u64,
}

impl LineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> LineId {
        self.next = self.next.wrapping_add(1);
        LineId(self.next)
    }

    /// Restarts id numbering. Only called when the log is cleared.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    pub fn create_with(
        &mut self,
        content: impl Into<String>,
        category: Category,
        options: LineOptions,
    ) -> LogRecord {
        let LineOptions {
            timestamp,
            prefix,
            progress,
            glow,
        } = options;
        LogRecord {
            id: self.next_id(),
            timestamp,
            prefix,
            content: content.into(),
            category,
            is_progress: progress.is_some(),
            progress: progress.map(proposed_percent),
            glow,
        }
    }
}

/// Rounds a percentage into `0..=100`.
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Truncates a generator's starting percentage into `0..=100`.
///
/// Truncation keeps anything short of 100 below 100, so it still animates.
fn proposed_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, 100.0) as u8
}

/// Local wall-clock time as `HH:MM:SS`.
pub fn wall_clock_stamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn plain(factory: &mut LineFactory, content: &str) -> LogRecord {
        factory.create_with(content, Category::Default, LineOptions::default())
    }

    #[test]
    fn test_create_applies_defaults() {
        let mut factory = LineFactory::new();
        let line = plain(&mut factory, "hello");

        assert_eq!(line.content, "hello");
        assert_eq!(line.category, Category::Default);
        assert!(line.timestamp.is_none());
        assert!(line.prefix.is_none());
        assert!(!line.is_progress);
        assert!(line.progress.is_none());
        assert!(!line.glow);
    }

    #[test]
    fn test_create_with_merges_options() {
        let mut factory = LineFactory::new();
        let line = factory.create_with(
            "Downloading react...",
            Category::Info,
            LineOptions::default().prefix(">").progress(63.4).glow(),
        );

        assert_eq!(line.prefix.as_deref(), Some(">"));
        assert!(line.is_progress);
        assert_eq!(line.progress, Some(63));
        assert!(line.glow);
        assert!(line.needs_progress());
    }

    #[test]
    fn test_ids_are_distinct_until_reset() {
        let mut factory = LineFactory::new();
        let ids: HashSet<LineId> = (0..1000)
            .map(|i| plain(&mut factory, &format!("line {i}")).id)
            .collect();
        assert_eq!(ids.len(), 1000);

        factory.reset();
        let mut fresh = LineFactory::new();
        assert_eq!(plain(&mut factory, "a").id, plain(&mut fresh, "a").id);
    }

    #[test]
    fn test_near_complete_proposal_still_needs_progress() {
        let mut factory = LineFactory::new();
        let line = factory.create_with(
            "Loading weights...",
            Category::Dim,
            LineOptions::default().progress(99.7),
        );
        assert_eq!(line.progress, Some(99));
        assert!(line.needs_progress());

        let done = factory.create_with(
            "Loaded",
            Category::Dim,
            LineOptions::default().progress(100.0),
        );
        assert!(!done.needs_progress());
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-4.0), 0);
        assert_eq!(clamp_percent(99.6), 100);
        assert_eq!(clamp_percent(250.0), 100);
        assert_eq!(clamp_percent(f64::NAN), 0);
    }

    #[test]
    fn test_category_keys_are_kebab_case() {
        assert_eq!(Category::AccentSecondary.as_str(), "accent-secondary");
    }
}
