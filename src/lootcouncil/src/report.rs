//! Expected-value matrix: mean upgrade per (source, boss, player)
//!
//! A player's cell averages their sims for the boss's items. Items they never
//! simmed don't count; items simmed at zero or below count in the denominator
//! only.

use crate::registry::{PlayerId, PlayerRegistry};
use crate::taxonomy::Taxonomy;
use crate::types::DropSource;
use std::collections::BTreeMap;

/// Row key in the matrix. `Average` is reserved and never collides with a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvRow {
    Player(PlayerId),
    Average,
}

type BossCells = BTreeMap<EvRow, f64>;

/// source -> boss -> row -> mean upgrade
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedValueMatrix {
    cells: BTreeMap<DropSource, BTreeMap<String, BossCells>>,
}

impl ExpectedValueMatrix {
    pub fn compute(registry: &PlayerRegistry, taxonomy: &Taxonomy) -> Self {
        let mut groups: BTreeMap<(DropSource, String), Vec<String>> = BTreeMap::new();
        for item in taxonomy.items() {
            groups
                .entry((item.source, item.boss))
                .or_default()
                .push(item.name);
        }

        let mut matrix = Self::default();
        for ((source, boss), items) in groups {
            let mut cells = BossCells::new();
            for (id, player) in registry.iter() {
                let values: Vec<f64> = items.iter().filter_map(|i| player.sim(i)).collect();
                if values.is_empty() {
                    continue;
                }
                let gains: f64 = values.iter().filter(|v| **v > 0.0).sum();
                cells.insert(EvRow::Player(id), gains / values.len() as f64);
            }

            if !cells.is_empty() {
                let average = cells.values().sum::<f64>() / cells.len() as f64;
                cells.insert(EvRow::Average, average);
            }

            matrix
                .cells
                .entry(source)
                .or_default()
                .insert(boss, cells);
        }
        matrix
    }

    pub fn get(&self, source: DropSource, boss: &str, row: EvRow) -> Option<f64> {
        self.cells.get(&source)?.get(boss)?.get(&row).copied()
    }

    /// Rows for one (source, boss) pair
    pub fn cells(&self, source: DropSource, boss: &str) -> Option<&BTreeMap<EvRow, f64>> {
        self.cells.get(&source)?.get(boss)
    }

    /// Every (source, boss) pair with at least one observed item
    pub fn pairs(&self) -> impl Iterator<Item = (DropSource, &str)> {
        self.cells
            .iter()
            .flat_map(|(source, bosses)| bosses.keys().map(move |b| (*source, b.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
