//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up lootcouncil CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `content` - Content tables file to use by default
/// * `output_dir` - Directory the sheets are written to by default
/// * `sheet_url` - Spreadsheet CSV export scanned when no sim list is found
/// * `show` - If true, show current configuration
pub fn handle(
    content: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    sheet_url: Option<String>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, content, output_dir, sheet_url) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Merge the given settings into the config. Returns false if nothing was given.
fn apply(
    config: &mut Config,
    content: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    sheet_url: Option<String>,
) -> bool {
    let changed = content.is_some() || output_dir.is_some() || sheet_url.is_some();
    if content.is_some() {
        config.content = content;
    }
    if output_dir.is_some() {
        config.output_dir = output_dir;
    }
    if sheet_url.is_some() {
        config.sheet_url = sheet_url;
    }
    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.content {
        Some(path) => println!("Content tables: {}", path.display()),
        None => println!("Content tables: built-in"),
    }
    match &config.output_dir {
        Some(path) => println!("Output directory: {}", path.display()),
        None => println!("Output directory: current directory"),
    }
    match &config.sheet_url {
        Some(url) => println!("Spreadsheet: {}", url),
        None => println!("No spreadsheet configured"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: lootcouncil configure --content FILE --output-dir DIR --sheet-url URL");
    println!("   or: lootcouncil configure --show");
    println!();
    println!("Note: the spreadsheet URL should be a CSV export link");
    println!("      (.../export?format=csv); it is only used when the sim list can't be read.");
}
