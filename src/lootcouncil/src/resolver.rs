//! Canonical item names
//!
//! Tier-set pieces have a different display name for every class, but they
//! are the same loot decision, so they are collapsed to a slot-generic name
//! such as "Tier Gloves 441". Everything else keeps its display name.

use crate::content::{ContentConfig, SlotKeywords};
use crate::types::Slot;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Result of resolving a raw item name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Canonical item name
    pub name: String,
    /// Slot learned while resolving (tier pieces only)
    pub slot: Option<Slot>,
    /// The raw name carried a tier affix
    pub tier: bool,
}

impl ResolvedName {
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slot: None,
            tier: false,
        }
    }
}

/// Maps raw display names and profile keys onto canonical item names
#[derive(Debug, Clone)]
pub struct NameResolver {
    tier_affixes: Vec<String>,
    slot_pieces: BTreeMap<String, String>,
    slot_keywords: Vec<SlotKeywords>,
}

impl NameResolver {
    pub fn new(content: &ContentConfig) -> Self {
        Self {
            tier_affixes: content.tier_affixes.clone(),
            slot_pieces: content.slot_pieces.clone(),
            slot_keywords: content.slot_keywords.clone(),
        }
    }

    /// Does this display name belong to a tier set?
    pub fn is_tier(&self, raw: &str) -> bool {
        self.tier_affixes.iter().any(|affix| raw.contains(affix.as_str()))
    }

    /// Piece name used in collapsed tier names ("Helmet", "Pants", ...)
    pub fn piece_for(&self, slot: Slot) -> Option<&str> {
        self.slot_pieces.get(slot.name()).map(String::as_str)
    }

    /// Resolve a raw display name. The slot comes from the profile key when
    /// the key names one, otherwise from the keyword heuristic.
    ///
    /// A tier piece whose slot can't be determined is returned unchanged with a
    /// warning; the batch carries on.
    pub fn resolve(&self, raw: &str, context_key: Option<&str>) -> ResolvedName {
        let raw = raw.trim();
        if !self.is_tier(raw) {
            return ResolvedName::plain(raw);
        }

        let slot = context_key
            .map(slot_from_key)
            .filter(Slot::is_known)
            .unwrap_or_else(|| self.guess_slot(raw));

        let Some(piece) = self.piece_for(slot) else {
            warn!(
                "Could not resolve tier piece '{}' (key {:?}); left as-is",
                raw, context_key
            );
            return ResolvedName {
                name: raw.to_string(),
                slot: None,
                tier: true,
            };
        };

        let name = match item_level(raw) {
            Some(ilvl) => format!("Tier {piece} {ilvl}"),
            None => format!("Tier {piece}"),
        };
        debug!("Collapsed tier piece '{}' to '{}'", raw, name);

        ResolvedName {
            name,
            slot: Some(slot),
            tier: true,
        }
    }

    /// Keyword heuristic over the display name. Heuristic by nature: novel
    /// names come back as `Slot::Unknown`.
    pub fn guess_slot(&self, raw: &str) -> Slot {
        let lower = raw.to_lowercase();
        self.slot_keywords
            .iter()
            .find(|group| group.include.iter().any(|k| k.matches(&lower)))
            .map(|group| group.slot)
            .unwrap_or(Slot::Unknown)
    }
}

/// Slot named by the last segment of a profile key.
///
/// `-1/1001/dungeon-mythic-weekly16/155881/0/trinket1/` -> trinket
pub fn slot_from_key(key: &str) -> Slot {
    let segment = key
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| c.is_ascii_digit());
    segment.parse().unwrap_or(Slot::Unknown)
}

/// Trailing item level token of a display name ("Harlan's Loaded Dice 441" -> "441")
pub fn item_level(raw: &str) -> Option<&str> {
    raw.split_whitespace()
        .last()
        .filter(|tok| !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        NameResolver::new(&ContentConfig::builtin().unwrap())
    }

    #[test]
    fn test_tier_piece_from_key() {
        let resolved = resolver().resolve(
            "Cauldron Champion's Legplates 441",
            Some("-1/1001/raid-heroic/229245/0/legs/"),
        );
        assert_eq!(resolved.name, "Tier Pants 441");
        assert_eq!(resolved.slot, Some(Slot::Legs));
        assert!(resolved.tier);
    }

    #[test]
    fn test_key_slot_wins_over_name() {
        // The name reads like a helm, the key says hands.
        let resolved = resolver().resolve(
            "Fel-Dealer's Visor 441",
            Some("-1/1001/raid-heroic/229316/0/hands/"),
        );
        assert_eq!(resolved.name, "Tier Gloves 441");
    }

    #[test]
    fn test_key_without_slot_falls_back_to_name() {
        let resolved = resolver().resolve(
            "Gale Sovereign's Charged Hood 639",
            Some("-1/1001/raid-heroic/229245/0/"),
        );
        assert_eq!(resolved.name, "Tier Helmet 639");
        assert_eq!(resolved.slot, Some(Slot::Head));
    }

    #[test]
    fn test_piece_for() {
        let r = resolver();
        assert_eq!(r.piece_for(Slot::Legs), Some("Pants"));
        assert_eq!(r.piece_for(Slot::Trinket), None);
    }

    #[test]
    fn test_tier_piece_from_prose() {
        let r = resolver();
        assert_eq!(r.resolve("Gale Sovereign's Charged Hood 639", None).name, "Tier Helmet 639");
        assert_eq!(r.resolve("Aureate Sentry's Pauldrons 639", None).name, "Tier Pauldrons 639");
        assert_eq!(r.resolve("Spectral Gambler's Vest 639", None).name, "Tier Chest 639");
        assert_eq!(r.resolve("Tireless Collector's Gauntlets 639", None).name, "Tier Gloves 639");
        assert_eq!(r.resolve("Ageless Serpent's Leggings 639", None).name, "Tier Pants 639");
    }

    #[test]
    fn test_coattails_are_pants() {
        let resolved = resolver().resolve("Midnight Herald's Coattails 639", None);
        assert_eq!(resolved.name, "Tier Pants 639");
        assert_eq!(resolved.slot, Some(Slot::Legs));
    }

    #[test]
    fn test_unresolvable_tier_left_as_is() {
        let resolved = resolver().resolve("Dying Star's Mysterious Thing 639", None);
        assert_eq!(resolved.name, "Dying Star's Mysterious Thing 639");
        assert_eq!(resolved.slot, None);
        assert!(resolved.tier);
    }

    #[test]
    fn test_non_tier_untouched() {
        let resolved = resolver().resolve(
            "Harlan's Loaded Dice 441",
            Some("-1/1001/dungeon-mythic-weekly16/155881/0/trinket1/"),
        );
        assert_eq!(resolved, ResolvedName::plain("Harlan's Loaded Dice 441"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let r = resolver();
        let key = Some("-1/1001/raid-mythic/1/0/head/");
        assert_eq!(
            r.resolve("Hollow Sentinel's Crown 447", key),
            r.resolve("Hollow Sentinel's Crown 447", key)
        );
    }

    #[test]
    fn test_slot_from_key() {
        assert_eq!(slot_from_key("-1/1001/dungeon-mythic-weekly16/155881/0/trinket1/"), Slot::Trinket);
        assert_eq!(slot_from_key("x/finger2"), Slot::Finger);
        assert_eq!(slot_from_key("x/main_hand/"), Slot::MainHand);
        assert_eq!(slot_from_key("garbage"), Slot::Unknown);
    }

    #[test]
    fn test_item_level() {
        assert_eq!(item_level("Ring of Power 441"), Some("441"));
        assert_eq!(item_level("Ring of Power"), None);
    }
}
