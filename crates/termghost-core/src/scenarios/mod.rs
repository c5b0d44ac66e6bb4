//! Scenario registry and the built-in log generators.
//!
//! A scenario turns a random source into one batch of line drafts. Drafts
//! carry no id; the playback loop stamps them through the line factory.

mod ai;
mod compile;
mod database;
mod docker;
mod git;
mod npm;
mod pip;
mod server;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::engine::line::{Category, LineOptions};

/// Simulated tool a batch is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Npm,
    Pip,
    Docker,
    Git,
    Compile,
    Server,
    Database,
    Ai,
}

impl LogType {
    pub const ALL: [LogType; 8] = [
        LogType::Npm,
        LogType::Pip,
        LogType::Docker,
        LogType::Git,
        LogType::Compile,
        LogType::Server,
        LogType::Database,
        LogType::Ai,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LogType::Npm => "npm",
            LogType::Pip => "pip",
            LogType::Docker => "docker",
            LogType::Git => "git",
            LogType::Compile => "compile",
            LogType::Server => "server",
            LogType::Database => "database",
            LogType::Ai => "ai",
        }
    }

    /// Human label shown in the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            LogType::Npm => "NPM",
            LogType::Pip => "Pip",
            LogType::Docker => "Docker",
            LogType::Git => "Git",
            LogType::Compile => "Compile",
            LogType::Server => "Server",
            LogType::Database => "Database",
            LogType::Ai => "AI / ML",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log type `{0}` (expected one of: npm, pip, docker, git, compile, server, database, ai)")]
pub struct ParseLogTypeError(pub String);

impl FromStr for LogType {
    type Err = ParseLogTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        LogType::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| ParseLogTypeError(s.to_string()))
    }
}

/// A line as proposed by a scenario, before it gets an id.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDraft {
    pub content: String,
    pub category: Category,
    pub options: LineOptions,
}

impl LineDraft {
    pub fn new(content: impl Into<String>, category: Category) -> Self {
        Self {
            content: content.into(),
            category,
            options: LineOptions::default(),
        }
    }

    /// Shell command echo: `> $ cmd` in the accent color.
    pub fn command(content: impl Into<String>) -> Self {
        let mut draft = Self::new(content, Category::Accent);
        draft.options = draft.options.prefix(">");
        draft
    }

    pub fn progress(content: impl Into<String>, category: Category, value: f64) -> Self {
        let mut draft = Self::new(content, category);
        draft.options = draft.options.progress(value);
        draft
    }

    pub fn glow(mut self) -> Self {
        self.options = self.options.glow();
        self
    }

    pub fn is_progress(&self) -> bool {
        self.options.progress.is_some()
    }
}

/// A generator of batches for one simulated tool.
pub trait Scenario: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<LineDraft>;
}

/// One sub-scenario of a built-in generator.
type Variant = fn(&mut dyn RngCore) -> Vec<LineDraft>;

/// Built-in generator: picks one of its variants uniformly.
struct Variants(&'static [Variant]);

impl Scenario for Variants {
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<LineDraft> {
        match self.0.choose(rng) {
            Some(variant) => variant(rng),
            None => Vec::new(),
        }
    }
}

/// Maps each log type to its generator.
pub struct ScenarioRegistry {
    scenarios: BTreeMap<LogType, Box<dyn Scenario>>,
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScenarioRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioRegistry")
            .field("types", &self.scenarios.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ScenarioRegistry {
    /// Registry with every built-in generator.
    pub fn new() -> Self {
        let builtins: [(LogType, &'static [Variant]); 8] = [
            (LogType::Npm, npm::VARIANTS),
            (LogType::Pip, pip::VARIANTS),
            (LogType::Docker, docker::VARIANTS),
            (LogType::Git, git::VARIANTS),
            (LogType::Compile, compile::VARIANTS),
            (LogType::Server, server::VARIANTS),
            (LogType::Database, database::VARIANTS),
            (LogType::Ai, ai::VARIANTS),
        ];
        let scenarios = builtins
            .into_iter()
            .map(|(kind, variants)| (kind, Box::new(Variants(variants)) as Box<dyn Scenario>))
            .collect();
        Self { scenarios }
    }

    /// Replaces the generator for `kind`.
    pub fn register(&mut self, kind: LogType, scenario: Box<dyn Scenario>) {
        self.scenarios.insert(kind, scenario);
    }

    #[must_use]
    pub fn with(mut self, kind: LogType, scenario: impl Scenario + 'static) -> Self {
        self.register(kind, Box::new(scenario));
        self
    }

    /// One batch for `kind`. Unregistered types yield an empty batch.
    pub fn generate(&self, kind: LogType, rng: &mut dyn RngCore) -> Vec<LineDraft> {
        self.scenarios
            .get(&kind)
            .map(|s| s.generate(rng))
            .unwrap_or_default()
    }
}

impl<F> Scenario for F
where
    F: Fn(&mut dyn RngCore) -> Vec<LineDraft> + Send + Sync,
{
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<LineDraft> {
        self(rng)
    }
}

// Shared flavor helpers for the generators.

fn pick(rng: &mut dyn RngCore, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Short lowercase base-36 id, like a git abbrev hash or a chunk hash.
fn short_id(rng: &mut dyn RngCore, len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

fn hex_id(rng: &mut dyn RngCore, len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdef";
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// `a.bc`-style float in `[min, max)` with `decimals` digits.
fn decimal(rng: &mut dyn RngCore, min: f64, max: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, rng.gen_range(min..max))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn test_log_type_parse_and_display() {
        for kind in LogType::ALL {
            assert_eq!(kind.to_string().parse::<LogType>(), Ok(kind));
        }
        assert_eq!(" Docker ".parse::<LogType>(), Ok(LogType::Docker));

        let err = "cobol".parse::<LogType>().unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_every_builtin_produces_lines() {
        let registry = ScenarioRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);
        for kind in LogType::ALL {
            for _ in 0..200 {
                let batch = registry.generate(kind, &mut rng);
                assert!(!batch.is_empty(), "{kind} produced an empty batch");
            }
        }
    }

    #[test]
    fn test_tool_scenarios_echo_the_command_first() {
        let registry = ScenarioRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);
        let tools = [
            LogType::Npm,
            LogType::Pip,
            LogType::Docker,
            LogType::Git,
            LogType::Compile,
        ];
        for kind in tools {
            for _ in 0..200 {
                let batch = registry.generate(kind, &mut rng);
                let first = &batch[0];
                assert!(first.content.starts_with("$ "), "{kind}: {}", first.content);
                assert_eq!(first.category, Category::Accent);
                assert_eq!(first.options.prefix.as_deref(), Some(">"));
            }
        }
    }

    #[test]
    fn test_progress_drafts_are_in_range() {
        let registry = ScenarioRegistry::new();
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen_progress = false;
        for kind in LogType::ALL {
            for _ in 0..300 {
                for draft in registry.generate(kind, &mut rng) {
                    if let Some(p) = draft.options.progress {
                        seen_progress = true;
                        assert!((0.0..=100.0).contains(&p), "{kind}: {p}");
                    }
                }
            }
        }
        assert!(seen_progress);
    }

    #[test]
    fn test_git_status_with_low_rng_is_clean() {
        let registry = ScenarioRegistry::new();
        let mut rng = StepRng::new(0, 0);

        let batch = registry.generate(LogType::Git, &mut rng);

        assert_eq!(batch[0].content, "$ git status");
        let last = batch.last().unwrap();
        assert_eq!(last.content, "nothing to commit, working tree clean");
        assert_eq!(last.category, Category::Success);
        assert!(batch.iter().all(|d| !d.is_progress()));
    }

    #[test]
    fn test_registered_scenario_overrides_builtin() {
        let registry = ScenarioRegistry::new().with(LogType::Npm, |_: &mut dyn RngCore| {
            vec![LineDraft::new("custom", Category::Info)]
        });
        let mut rng = StdRng::seed_from_u64(1);

        let batch = registry.generate(LogType::Npm, &mut rng);
        assert_eq!(batch, vec![LineDraft::new("custom", Category::Info)]);
    }

    #[test]
    fn test_helpers() {
        let mut rng = StdRng::seed_from_u64(3);
        let id = short_id(&mut rng, 7);
        assert_eq!(id.len(), 7);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(3, "file"), "3 files");
        assert_eq!(hex_id(&mut rng, 12).len(), 12);
    }
}
