//! Item taxonomy: slot, drop source and boss per canonical item name
//!
//! Every table is first-writer-wins. An item seen first with thin context
//! keeps that classification for the rest of the run.

use crate::content::{ContentConfig, SourcePattern};
use crate::types::{DropSource, Slot};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Boss sentinel for items with no known encounter
pub const UNKNOWN_BOSS: &str = "Unknown";

static ITEM_LEVEL_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d{3,}$").unwrap());

/// Full classification of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: String,
    pub slot: Slot,
    pub source: DropSource,
    pub boss: String,
}

/// Canonical item name without its item level ("Ring of Power 441" -> "Ring of Power")
pub fn base_name(name: &str) -> &str {
    match ITEM_LEVEL_SUFFIX.find(name) {
        Some(m) => name[..m.start()].trim_end(),
        None => name.trim_end(),
    }
}

/// Slot, source and boss tables for every item seen this run
#[derive(Debug, Clone)]
pub struct Taxonomy {
    source_patterns: Vec<SourcePattern>,
    known_bosses: Vec<String>,
    slots: BTreeMap<String, Slot>,
    sources: BTreeMap<String, DropSource>,
    bosses: BTreeMap<String, String>,
}

impl Taxonomy {
    pub fn new(content: &ContentConfig) -> Self {
        Self {
            source_patterns: content.sources.clone(),
            known_bosses: content.bosses.clone(),
            slots: BTreeMap::new(),
            sources: BTreeMap::new(),
            bosses: BTreeMap::new(),
        }
    }

    /// Add an item with its slot. No-op if the item is already known.
    pub fn record_item(&mut self, name: &str, slot: Slot) -> bool {
        if self.slots.contains_key(name) {
            return false;
        }
        if !slot.is_known() {
            warn!("No slot known for '{}'", name);
        }
        self.slots.insert(name.to_string(), slot);
        true
    }

    /// Set an item's source. No-op if a source is already recorded.
    pub fn record_source(&mut self, name: &str, source: DropSource) -> bool {
        if self.sources.contains_key(name) {
            return false;
        }
        self.sources.insert(name.to_string(), source);
        true
    }

    /// Set an item's boss. No-op if a boss is already recorded.
    pub fn record_boss(&mut self, name: &str, boss: &str) -> bool {
        if self.bosses.contains_key(name) {
            return false;
        }
        self.bosses.insert(name.to_string(), boss.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn has_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn has_boss(&self, name: &str) -> bool {
        self.bosses.contains_key(name)
    }

    pub fn lookup_slot(&self, name: &str) -> Slot {
        self.slots.get(name).copied().unwrap_or(Slot::Unknown)
    }

    pub fn lookup_source(&self, name: &str) -> DropSource {
        self.sources.get(name).copied().unwrap_or(DropSource::Unknown)
    }

    pub fn lookup_boss(&self, name: &str) -> &str {
        self.bosses.get(name).map(String::as_str).unwrap_or(UNKNOWN_BOSS)
    }

    pub fn item(&self, name: &str) -> Option<ItemInfo> {
        let slot = *self.slots.get(name)?;
        Some(ItemInfo {
            name: name.to_string(),
            slot,
            source: self.lookup_source(name),
            boss: self.lookup_boss(name).to_string(),
        })
    }

    /// All items, sorted by name
    pub fn items(&self) -> impl Iterator<Item = ItemInfo> + '_ {
        self.slots.iter().map(|(name, slot)| ItemInfo {
            name: name.clone(),
            slot: *slot,
            source: self.lookup_source(name),
            boss: self.lookup_boss(name).to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Classify a provider location/difficulty string against the source table
    pub fn classify_source(&self, hint: &str) -> DropSource {
        match self
            .source_patterns
            .iter()
            .find(|p| hint.contains(p.pattern.as_str()))
        {
            Some(p) => p.source,
            None => {
                warn!("Unrecognised item source '{}'", hint);
                DropSource::Unknown
            }
        }
    }

    /// Find the first known boss named in a report's context line
    pub fn classify_boss(&self, hint: &str) -> Option<&str> {
        let found = self
            .known_bosses
            .iter()
            .find(|boss| hint.contains(boss.as_str()))
            .map(String::as_str);
        if found.is_none() {
            warn!("Boss drop for item not found in '{}'", hint);
        }
        found
    }

    /// Slot of an already-known item that differs only by item level
    pub fn slot_by_base_name(&self, name: &str) -> Option<Slot> {
        let wanted = base_name(name);
        self.slots
            .iter()
            .find(|(known, slot)| slot.is_known() && base_name(known) == wanted)
            .map(|(_, slot)| *slot)
    }

    /// Boss of an already-known item that differs only by item level
    pub fn boss_by_base_name(&self, name: &str) -> Option<&str> {
        let wanted = base_name(name);
        let found = self
            .bosses
            .iter()
            .find(|(known, boss)| boss.as_str() != UNKNOWN_BOSS && base_name(known) == wanted)
            .map(|(_, boss)| boss.as_str());
        debug!("Base-name boss lookup for '{}': {:?}", name, found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(&ContentConfig::builtin().unwrap())
    }

    #[test]
    fn test_first_writer_wins() {
        let mut tax = taxonomy();
        assert!(tax.record_item("Ring of Power 441", Slot::Finger));
        assert!(!tax.record_item("Ring of Power 441", Slot::Neck));
        assert!(tax.record_source("Ring of Power 441", DropSource::HeroicRaid));
        assert!(!tax.record_source("Ring of Power 441", DropSource::MythicRaid));
        assert!(tax.record_boss("Ring of Power 441", "Queen Ansurek"));
        assert!(!tax.record_boss("Ring of Power 441", "Rasha'nan"));

        assert_eq!(tax.lookup_slot("Ring of Power 441"), Slot::Finger);
        assert_eq!(tax.lookup_source("Ring of Power 441"), DropSource::HeroicRaid);
        assert_eq!(tax.lookup_boss("Ring of Power 441"), "Queen Ansurek");
    }

    #[test]
    fn test_record_twice_same_state() {
        let mut once = taxonomy();
        once.record_item("Loom 639", Slot::Back);
        once.record_source("Loom 639", DropSource::Crafted);

        let mut twice = once.clone();
        twice.record_item("Loom 639", Slot::Back);
        twice.record_source("Loom 639", DropSource::Crafted);

        assert_eq!(once.items().collect::<Vec<_>>(), twice.items().collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_sentinels() {
        let tax = taxonomy();
        assert_eq!(tax.lookup_slot("Nope"), Slot::Unknown);
        assert_eq!(tax.lookup_source("Nope"), DropSource::Unknown);
        assert_eq!(tax.lookup_boss("Nope"), UNKNOWN_BOSS);
        assert!(tax.item("Nope").is_none());
    }

    #[test]
    fn test_classify_source() {
        let tax = taxonomy();
        assert_eq!(
            tax.classify_source("-1/1001/raid-heroic/229245/0/legs/"),
            DropSource::HeroicRaid
        );
        assert_eq!(
            tax.classify_source("-1/1001/dungeon-mythic-weekly10/155881/0/trinket1/"),
            DropSource::DungeonVault
        );
        assert_eq!(tax.classify_source("Dungeon 6"), DropSource::DungeonDrop);
        assert_eq!(tax.classify_source("Crafted 636"), DropSource::Crafted);
        assert_eq!(tax.classify_source("world-boss"), DropSource::Unknown);
    }

    #[test]
    fn test_classify_boss() {
        let tax = taxonomy();
        assert_eq!(
            tax.classify_boss("# Ring of Power 441 - Chrome King Gallywix"),
            Some("Chrome King Gallywix")
        );
        assert_eq!(tax.classify_boss("# Ring of Power 441 - Onyxia"), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Ring of Power 441"), "Ring of Power");
        assert_eq!(base_name("Ring of Power"), "Ring of Power");
        assert_eq!(base_name("Tier Gloves 441"), "Tier Gloves");
    }

    #[test]
    fn test_boss_by_base_name() {
        let mut tax = taxonomy();
        tax.record_item("Ring of Power 441", Slot::Finger);
        tax.record_boss("Ring of Power 441", "Queen Ansurek");

        assert_eq!(tax.boss_by_base_name("Ring of Power 447"), Some("Queen Ansurek"));
        assert_eq!(tax.boss_by_base_name("Ring of Powerful 447"), None);
    }

    #[test]
    fn test_slot_by_base_name() {
        let mut tax = taxonomy();
        tax.record_item("Ring of Power 441", Slot::Finger);
        tax.record_item("Mystery Cloak 441", Slot::Unknown);

        assert_eq!(tax.slot_by_base_name("Ring of Power 447"), Some(Slot::Finger));
        assert_eq!(tax.slot_by_base_name("Mystery Cloak 447"), None);
    }
}
