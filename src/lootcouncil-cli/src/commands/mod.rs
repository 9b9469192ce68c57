//! Command handlers for lootcouncil CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod resolve;
pub mod run;

use anyhow::{Context, Result};
use lootcouncil::ContentConfig;
use std::path::Path;

/// Content tables from a file, or the built-in ones
pub fn load_content(path: Option<&Path>) -> Result<ContentConfig> {
    match path {
        Some(path) => ContentConfig::load(path)
            .with_context(|| format!("Failed to load content tables from {}", path.display())),
        None => ContentConfig::builtin().context("Built-in content tables are invalid"),
    }
}
