//! Best-in-slot baselines and per-item deltas
//!
//! For each player and raid difficulty, the best item per slot is the highest
//! sim among items whose source is eligible at that difficulty. Each eligible
//! item's delta is its value minus the value of its slot's best item, so the
//! best item itself sits at exactly zero.

use crate::registry::{round_value, Player, PlayerRegistry};
use crate::taxonomy::Taxonomy;
use crate::types::{Difficulty, Slot};
use std::collections::BTreeMap;

/// Best item per slot at one difficulty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestInSlot {
    slots: BTreeMap<Slot, String>,
}

impl BestInSlot {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn set(&mut self, slot: Slot, item: &str) {
        self.slots.insert(slot, item.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.slots.iter().map(|(slot, item)| (*slot, item.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Display for BestInSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for slot in Slot::ALL {
            writeln!(f, "{}: {}", slot, self.get(slot).unwrap_or("Not Set"))?;
        }
        Ok(())
    }
}

/// item -> (item value - slot's best value) at one difficulty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaMatrix {
    deltas: BTreeMap<String, f64>,
}

impl DeltaMatrix {
    pub fn get(&self, item: &str) -> Option<f64> {
        self.deltas.get(item).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.deltas.iter().map(|(item, delta)| (item.as_str(), *delta))
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// The player's sims that count at `difficulty`, with their slots
fn eligible_sims<'a>(
    player: &'a Player,
    difficulty: Difficulty,
    taxonomy: &'a Taxonomy,
) -> impl Iterator<Item = (&'a str, Slot, f64)> + 'a {
    player.sims().iter().filter_map(move |(item, value)| {
        let slot = taxonomy.lookup_slot(item);
        let eligible = slot.is_known() && taxonomy.lookup_source(item).is_eligible_for(difficulty);
        eligible.then_some((item.as_str(), slot, *value))
    })
}

/// Running maximum per slot. The first eligible item installs itself; later
/// items replace it only when strictly better.
pub fn best_in_slot(player: &Player, difficulty: Difficulty, taxonomy: &Taxonomy) -> BestInSlot {
    let mut best: BTreeMap<Slot, (&str, f64)> = BTreeMap::new();
    for (item, slot, value) in eligible_sims(player, difficulty, taxonomy) {
        match best.get(&slot) {
            Some((_, current)) if value <= *current => {}
            _ => {
                best.insert(slot, (item, value));
            }
        }
    }

    let mut bis = BestInSlot::default();
    for (slot, (item, _)) in best {
        bis.set(slot, item);
    }
    bis
}

/// Delta of every eligible item against its slot's best item
pub fn deltas(
    player: &Player,
    bis: &BestInSlot,
    difficulty: Difficulty,
    taxonomy: &Taxonomy,
) -> DeltaMatrix {
    let mut matrix = DeltaMatrix::default();
    for (item, slot, value) in eligible_sims(player, difficulty, taxonomy) {
        let Some(baseline) = bis.get(slot).and_then(|best| player.sim(best)) else {
            continue;
        };
        matrix
            .deltas
            .insert(item.to_string(), round_value(value - baseline));
    }
    matrix
}

/// Best value among the player's other eligible items for the same slot, or
/// zero when there is none.
pub fn next_best(
    player: &Player,
    item: &str,
    difficulty: Difficulty,
    taxonomy: &Taxonomy,
) -> f64 {
    let slot = taxonomy.lookup_slot(item);
    eligible_sims(player, difficulty, taxonomy)
        .filter(|(other, other_slot, _)| *other != item && *other_slot == slot)
        .map(|(_, _, value)| value)
        .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
        .unwrap_or(0.0)
}

/// Recompute every player's best-in-slot tables and delta matrices
pub fn refresh(registry: &mut PlayerRegistry, taxonomy: &Taxonomy) {
    for player in registry.players_mut() {
        for difficulty in Difficulty::ALL {
            let bis = best_in_slot(player, difficulty, taxonomy);
            let matrix = deltas(player, &bis, difficulty, taxonomy);
            player.bis[difficulty.index()] = bis;
            player.deltas[difficulty.index()] = matrix;
        }
    }
}
