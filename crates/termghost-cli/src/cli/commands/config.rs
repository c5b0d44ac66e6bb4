//! Config command handlers.

use anyhow::{Context, Result};
use termghost_core::config::{self, Settings};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Settings::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    let toml = Settings::generate()?;
    print!("{toml}");
    Ok(())
}
