//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use termghost_core::config::{self, Settings};
use termghost_core::logging;
use termghost_core::scenarios::LogType;

mod commands;

#[derive(Parser)]
#[command(name = "termghost")]
#[command(version)]
#[command(about = "Hacker terminal screensaver: endless fake build, deploy and training logs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: SettingsArgs,

    /// Start playback immediately
    #[arg(long)]
    autostart: bool,

    /// Seed the random sources for a reproducible session
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Do not save changes made in the settings panel
    #[arg(long = "no-save")]
    no_save: bool,
}

/// One-run overrides of the saved settings.
#[derive(clap::Args, Debug, Clone, Default)]
struct SettingsArgs {
    /// Theme id (see `termghost themes`)
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Session length in minutes (1-120)
    #[arg(long, value_name = "MIN")]
    minutes: Option<u32>,

    /// Output rate, 1 (slow) to 10 (fast)
    #[arg(long, value_name = "1-10")]
    scroll_speed: Option<u8>,

    /// Pace in percent of normal (50-200)
    #[arg(long, value_name = "PERCENT")]
    print_speed: Option<u16>,

    /// Comma-separated log types (see `termghost types`)
    #[arg(long, value_name = "TYPES", value_delimiter = ',')]
    types: Option<Vec<LogType>>,
}

impl SettingsArgs {
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(theme) = &self.theme {
            if !termghost_tui::theme::is_known(theme) {
                anyhow::bail!("unknown theme `{theme}` (run `termghost themes` to list them)");
            }
            settings.theme.clone_from(theme);
        }
        if let Some(minutes) = self.minutes {
            settings.set_timer_minutes(minutes);
        }
        if let Some(speed) = self.scroll_speed {
            settings.set_scroll_speed(speed);
        }
        if let Some(speed) = self.print_speed {
            settings.set_print_speed(speed);
        }
        if let Some(types) = &self.types {
            settings.enabled_log_types.clone_from(types);
            *settings = std::mem::take(settings).normalized();
        }
        Ok(())
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Play logs headlessly to stdout
    Print {
        /// Number of playback cycles to print
        #[arg(long, default_value_t = 5)]
        cycles: u32,

        /// Seed for reproducible output
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: SettingsArgs,
    },
    /// List available themes
    Themes,
    /// List available log types
    Types,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _log_guard = init_logging();
        let mut settings = Settings::load().context("load config")?;
        cli.overrides.apply(&mut settings)?;

        // one tokio runtime for background saves
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        let _enter = rt.enter();
        return commands::run::run(
            settings,
            &termghost_tui::SessionOptions {
                autostart: cli.autostart,
                seed: cli.seed,
                persist: !cli.no_save,
            },
        );
    };

    match command {
        Commands::Print {
            cycles,
            seed,
            json,
            overrides,
        } => {
            let _log_guard = init_logging();
            let mut settings = Settings::load().context("load config")?;
            overrides.apply(&mut settings)?;
            commands::print::run(&settings, cycles, seed, json)
        }
        Commands::Themes => {
            commands::list::themes();
            Ok(())
        }
        Commands::Types => {
            commands::list::types();
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}

/// Starts file logging for the life of the returned guard.
///
/// Failure only costs the log file, so it is reported and the command
/// carries on.
fn init_logging() -> Option<logging::WorkerGuard> {
    match logging::init_file_logging(&config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    }
}
