//! Resolve command handler
//!
//! Prints the canonical name an item display name collapses to, for checking
//! new tier names against the content tables.

use crate::commands::load_content;
use crate::config::Config;
use anyhow::Result;
use lootcouncil::resolver::slot_from_key;
use lootcouncil::{NameResolver, Slot};
use std::path::PathBuf;

/// Handle the resolve command
pub fn handle(name: &str, key: Option<&str>, content: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let content = load_content(content.or(config.content).as_deref())?;
    let resolver = NameResolver::new(&content);

    let (canonical, slot, tier) = describe(&resolver, name, key);
    println!("Name: {}", canonical);
    println!("Slot: {}", slot);
    println!("Tier: {}", if tier { "yes" } else { "no" });
    Ok(())
}

/// Canonical name, best-known slot and tier flag
fn describe(resolver: &NameResolver, name: &str, key: Option<&str>) -> (String, Slot, bool) {
    let resolved = resolver.resolve(name, key);
    let slot = resolved
        .slot
        .or_else(|| key.map(slot_from_key))
        .unwrap_or(Slot::Unknown);
    (resolved.name, slot, resolved.tier)
}
