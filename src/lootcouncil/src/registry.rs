//! Player registry
//!
//! Players are keyed by name + spec. A character that submits sims for two
//! specs becomes two independent players sharing a display name, both flagged
//! `multispec`.

use crate::bis::{BestInSlot, DeltaMatrix};
use crate::types::Difficulty;
use std::collections::BTreeMap;
use tracing::debug;

/// Index of a player in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub(crate) usize);

impl PlayerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Round an upgrade value to the 3-decimal representation all comparisons use
pub fn round_value(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// One (character, spec) and everything simmed for it
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub spec: String,
    pub multispec: bool,
    sims: BTreeMap<String, f64>,
    pub(crate) bis: [BestInSlot; 3],
    pub(crate) deltas: [DeltaMatrix; 3],
}

impl Player {
    fn new(name: &str, spec: &str, multispec: bool) -> Self {
        Self {
            name: name.to_string(),
            spec: spec.to_string(),
            multispec,
            sims: BTreeMap::new(),
            bis: Default::default(),
            deltas: Default::default(),
        }
    }

    /// Column label: just the name, unless the name is shared by several specs
    pub fn display_name(&self) -> String {
        if self.multispec {
            format!("{} ({})", self.name, self.spec)
        } else {
            self.name.clone()
        }
    }

    /// Store an upgrade value, keeping the best when the item was simmed more than once
    /// (rings and trinkets are simmed once per slot).
    pub fn record_sim(&mut self, item: &str, value: f64) {
        let value = round_value(value);
        match self.sims.get_mut(item) {
            Some(existing) if value > *existing => *existing = value,
            Some(_) => {}
            None => {
                self.sims.insert(item.to_string(), value);
            }
        }
    }

    pub fn sim(&self, item: &str) -> Option<f64> {
        self.sims.get(item).copied()
    }

    /// All sims, sorted by item name
    pub fn sims(&self) -> &BTreeMap<String, f64> {
        &self.sims
    }

    pub fn best_in_slot(&self, difficulty: Difficulty) -> &BestInSlot {
        &self.bis[difficulty.index()]
    }

    pub fn deltas(&self, difficulty: Difficulty) -> &DeltaMatrix {
        &self.deltas[difficulty.index()]
    }
}

/// All players seen in the batch, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the player for this name + spec
    pub fn add_player(&mut self, name: &str, spec: &str) -> PlayerId {
        let mut multispec = false;
        for (i, player) in self.players.iter_mut().enumerate() {
            if player.name != name {
                continue;
            }
            if player.spec == spec {
                return PlayerId(i);
            }
            player.multispec = true;
            multispec = true;
        }

        debug!("New player {} ({}), multispec={}", name, spec, multispec);
        self.players.push(Player::new(name, spec, multispec));
        PlayerId(self.players.len() - 1)
    }

    pub fn find(&self, name: &str, spec: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.name == name && p.spec == spec)
            .map(PlayerId)
    }

    pub fn get(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn get_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().enumerate().map(|(i, p)| (PlayerId(i), p))
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
