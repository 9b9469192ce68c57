//! Candidate ranking for raid drops
//!
//! Players for whom the item would be their best-in-slot come first, ordered
//! by how far it beats their next option. If fewer than five of those exist,
//! the list is topped up with everyone else who gains from the item, ordered
//! by raw upgrade and then by margin over their next option.

use crate::bis::next_best;
use crate::registry::{round_value, PlayerId, PlayerRegistry};
use crate::taxonomy::Taxonomy;
use crate::types::{Difficulty, SelectionReason};

/// Length of every candidate list
pub const MAX_CANDIDATES: usize = 5;

/// One suggested recipient for an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCandidate {
    /// `None` for padding entries
    pub player: Option<PlayerId>,
    /// Player's sim for the item
    pub value: f64,
    /// value - alternative
    pub delta: f64,
    /// Item's delta against the player's own best-in-slot at this difficulty
    pub bis_delta: f64,
    /// Best value among the player's other eligible items for the slot
    pub alternative: f64,
    pub reason: SelectionReason,
}

impl ItemCandidate {
    /// "No choice / No candidate" padding entry
    pub fn no_candidate() -> Self {
        Self {
            player: None,
            value: 0.0,
            delta: 0.0,
            bis_delta: 0.0,
            alternative: 0.0,
            reason: SelectionReason::NoCandidate,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.player.is_none()
    }
}

fn candidate(
    id: PlayerId,
    registry: &PlayerRegistry,
    item: &str,
    difficulty: Difficulty,
    taxonomy: &Taxonomy,
    reason: SelectionReason,
) -> Option<ItemCandidate> {
    let player = registry.get(id);
    let value = player.sim(item)?;
    let alternative = next_best(player, item, difficulty, taxonomy);
    Some(ItemCandidate {
        player: Some(id),
        value,
        delta: round_value(value - alternative),
        bis_delta: player.deltas(difficulty).get(item).unwrap_or(0.0),
        alternative,
        reason,
    })
}

/// Players whose best-in-slot this item is, and who actually gain over their next option
fn best_in_slot_candidates(
    item: &str,
    difficulty: Difficulty,
    registry: &PlayerRegistry,
    taxonomy: &Taxonomy,
) -> Vec<ItemCandidate> {
    let mut list: Vec<ItemCandidate> = registry
        .iter()
        .filter(|(_, p)| p.deltas(difficulty).get(item) == Some(0.0))
        .filter_map(|(id, _)| {
            candidate(id, registry, item, difficulty, taxonomy, SelectionReason::BestInSlot)
        })
        .filter(|c| c.value > c.alternative)
        .collect();
    list.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    list
}

/// Everyone with a positive sim for the item
fn upgrade_candidates(
    item: &str,
    difficulty: Difficulty,
    registry: &PlayerRegistry,
    taxonomy: &Taxonomy,
) -> Vec<ItemCandidate> {
    let mut list: Vec<ItemCandidate> = registry
        .iter()
        .filter_map(|(id, _)| {
            candidate(id, registry, item, difficulty, taxonomy, SelectionReason::UpgradePercent)
        })
        .filter(|c| c.value > 0.0)
        .collect();
    list.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| b.delta.total_cmp(&a.delta))
    });
    list
}

/// Ranked recipients for a raid item, padded to `MAX_CANDIDATES`.
///
/// Returns `None` for items that aren't raid drops (vault, crafted, delve,
/// unknown) since those never go to loot council.
pub fn rank_item(
    item: &str,
    registry: &PlayerRegistry,
    taxonomy: &Taxonomy,
) -> Option<[ItemCandidate; MAX_CANDIDATES]> {
    let difficulty = taxonomy.lookup_source(item).difficulty()?;

    let mut ranked = best_in_slot_candidates(item, difficulty, registry, taxonomy);
    if ranked.len() < MAX_CANDIDATES {
        for c in upgrade_candidates(item, difficulty, registry, taxonomy) {
            if !ranked.iter().any(|r| r.player == c.player) {
                ranked.push(c);
            }
        }
    }
    ranked.truncate(MAX_CANDIDATES);

    Some(std::array::from_fn(|i| {
        ranked.get(i).cloned().unwrap_or_else(ItemCandidate::no_candidate)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bis::refresh;
    use crate::content::ContentConfig;
    use crate::types::{DropSource, Slot};

    fn taxonomy(items: &[(&str, Slot, DropSource)]) -> Taxonomy {
        let mut tax = Taxonomy::new(&ContentConfig::builtin().unwrap());
        for (name, slot, source) in items {
            tax.record_item(name, *slot);
            tax.record_source(name, *source);
        }
        tax
    }

    #[test]
    fn test_ring_of_power_scenario() {
        let tax = taxonomy(&[
            ("Ring of Power 441", Slot::Finger, DropSource::HeroicRaid),
            ("Old Band 441", Slot::Finger, DropSource::HeroicRaid),
            ("Better Band 441", Slot::Finger, DropSource::DungeonVault),
        ]);
        let mut reg = PlayerRegistry::new();
        let a = reg.add_player("Alpha", "Fire");
        reg.get_mut(a).record_sim("Ring of Power 441", 12.3);
        reg.get_mut(a).record_sim("Old Band 441", 5.0);
        let b = reg.add_player("Bravo", "Frost");
        reg.get_mut(b).record_sim("Ring of Power 441", 8.0);
        reg.get_mut(b).record_sim("Better Band 441", 9.0);
        refresh(&mut reg, &tax);

        let ranked = rank_item("Ring of Power 441", &reg, &tax).unwrap();

        assert_eq!(ranked[0].player, Some(a));
        assert_eq!(ranked[0].value, 12.3);
        assert_eq!(ranked[0].alternative, 5.0);
        assert_eq!(ranked[0].delta, 7.3);
        assert_eq!(ranked[0].reason, SelectionReason::BestInSlot);

        assert_eq!(ranked[1].player, Some(b));
        assert_eq!(ranked[1].value, 8.0);
        assert_eq!(ranked[1].reason, SelectionReason::UpgradePercent);

        for pad in &ranked[2..] {
            assert_eq!(pad, &ItemCandidate::no_candidate());
        }
    }

    #[test]
    fn test_bis_player_beats_higher_non_bis_player() {
        let tax = taxonomy(&[
            ("Blade 441", Slot::MainHand, DropSource::HeroicRaid),
            ("Crafted Blade 441", Slot::MainHand, DropSource::Crafted),
        ]);
        let mut reg = PlayerRegistry::new();
        let b = reg.add_player("Bravo", "Arms");
        reg.get_mut(b).record_sim("Blade 441", 9.0);
        reg.get_mut(b).record_sim("Crafted Blade 441", 11.0);
        let a = reg.add_player("Alpha", "Fury");
        reg.get_mut(a).record_sim("Blade 441", 10.0);
        reg.get_mut(a).record_sim("Crafted Blade 441", 4.0);
        refresh(&mut reg, &tax);

        let ranked = rank_item("Blade 441", &reg, &tax).unwrap();
        assert_eq!(ranked[0].player, Some(a));
        assert_eq!(ranked[1].player, Some(b));
    }

    #[test]
    fn test_phase_one_player_listed_once() {
        let tax = taxonomy(&[("Cloak 441", Slot::Back, DropSource::HeroicRaid)]);
        let mut reg = PlayerRegistry::new();
        let a = reg.add_player("Alpha", "Fire");
        reg.get_mut(a).record_sim("Cloak 441", 3.0);
        let b = reg.add_player("Bravo", "Frost");
        reg.get_mut(b).record_sim("Cloak 441", 6.0);
        refresh(&mut reg, &tax);

        let ranked = rank_item("Cloak 441", &reg, &tax).unwrap();
        // Both qualify for phase 1 (no alternative) and phase 2.
        let named: Vec<_> = ranked.iter().filter_map(|c| c.player).collect();
        assert_eq!(named, vec![b, a]);
        assert!(ranked[..2].iter().all(|c| c.reason == SelectionReason::BestInSlot));
    }

    #[test]
    fn test_bis_not_beating_alternative_is_excluded_from_phase_one() {
        let tax = taxonomy(&[
            ("Helm A 441", Slot::Head, DropSource::HeroicRaid),
            ("Helm B 441", Slot::Head, DropSource::HeroicRaid),
        ]);
        let mut reg = PlayerRegistry::new();
        let a = reg.add_player("Alpha", "Fire");
        // Tie: Helm A holds the slot, but it isn't better than Helm B.
        reg.get_mut(a).record_sim("Helm A 441", 2.0);
        reg.get_mut(a).record_sim("Helm B 441", 2.0);
        refresh(&mut reg, &tax);

        let ranked = rank_item("Helm A 441", &reg, &tax).unwrap();
        assert_eq!(ranked[0].player, Some(a));
        assert_eq!(ranked[0].reason, SelectionReason::UpgradePercent);
    }

    #[test]
    fn test_five_bis_players_skip_phase_two() {
        let tax = taxonomy(&[("Trinket 441", Slot::Trinket, DropSource::MythicRaid)]);
        let mut reg = PlayerRegistry::new();
        let mut ids = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
            let id = reg.add_player(name, "Fire");
            reg.get_mut(id).record_sim("Trinket 441", 1.0 + i as f64);
            ids.push(id);
        }
        refresh(&mut reg, &tax);

        let ranked = rank_item("Trinket 441", &reg, &tax).unwrap();
        let named: Vec<_> = ranked.iter().filter_map(|c| c.player).collect();
        assert_eq!(named, vec![ids[5], ids[4], ids[3], ids[2], ids[1]]);
        assert!(ranked.iter().all(|c| c.reason == SelectionReason::BestInSlot));
    }

    #[test]
    fn test_phase_two_orders_by_value_then_margin() {
        let tax = taxonomy(&[
            ("Boots 441", Slot::Feet, DropSource::NormalRaid),
            ("Vault Boots 441", Slot::Feet, DropSource::DungeonVault),
        ]);
        let mut reg = PlayerRegistry::new();
        let a = reg.add_player("Alpha", "Fire");
        reg.get_mut(a).record_sim("Boots 441", 4.0);
        reg.get_mut(a).record_sim("Vault Boots 441", 6.0);
        let b = reg.add_player("Bravo", "Fire");
        reg.get_mut(b).record_sim("Boots 441", 4.0);
        reg.get_mut(b).record_sim("Vault Boots 441", 5.0);
        let c = reg.add_player("Charlie", "Fire");
        reg.get_mut(c).record_sim("Boots 441", 5.0);
        reg.get_mut(c).record_sim("Vault Boots 441", 9.0);
        let d = reg.add_player("Delta", "Fire");
        reg.get_mut(d).record_sim("Boots 441", -1.0);
        refresh(&mut reg, &tax);

        let ranked = rank_item("Boots 441", &reg, &tax).unwrap();
        let named: Vec<_> = ranked.iter().filter_map(|c| c.player).collect();
        assert_eq!(named, vec![c, b, a]);
        assert_eq!(ranked[1].delta, -1.0);
        assert!(ranked[3].is_padding());
    }

    #[test]
    fn test_non_raid_items_not_ranked() {
        let tax = taxonomy(&[
            ("Vault Ring 441", Slot::Finger, DropSource::DungeonVault),
            ("Crafted Ring 441", Slot::Finger, DropSource::Crafted),
        ]);
        let reg = PlayerRegistry::new();
        assert!(rank_item("Vault Ring 441", &reg, &tax).is_none());
        assert!(rank_item("Crafted Ring 441", &reg, &tax).is_none());
        assert!(rank_item("Never Seen 441", &reg, &tax).is_none());
    }
}
