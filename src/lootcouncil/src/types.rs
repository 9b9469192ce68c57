//! Shared enums for the item taxonomy.
//!
//! Slots, drop sources and raid difficulties are closed sets; everything that
//! can't be classified lands on an explicit `Unknown` variant instead of an
//! error.

use serde::{Deserialize, Serialize};

/// Equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Shoulder,
    Chest,
    Waist,
    Wrist,
    Hands,
    Legs,
    Feet,
    Back,
    Neck,
    Finger,
    Trinket,
    MainHand,
    OffHand,
    Ranged,
    Unknown,
}

impl Slot {
    /// Every real slot, in paper-doll order
    pub const ALL: [Slot; 15] = [
        Slot::Head,
        Slot::Shoulder,
        Slot::Chest,
        Slot::Waist,
        Slot::Wrist,
        Slot::Hands,
        Slot::Legs,
        Slot::Feet,
        Slot::Back,
        Slot::Neck,
        Slot::Finger,
        Slot::Trinket,
        Slot::MainHand,
        Slot::OffHand,
        Slot::Ranged,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Shoulder => "shoulder",
            Slot::Chest => "chest",
            Slot::Waist => "waist",
            Slot::Wrist => "wrist",
            Slot::Hands => "hands",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Back => "back",
            Slot::Neck => "neck",
            Slot::Finger => "finger",
            Slot::Trinket => "trinket",
            Slot::MainHand => "main_hand",
            Slot::OffHand => "off_hand",
            Slot::Ranged => "ranged",
            Slot::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Slot::Unknown
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Slot {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.name() == lower)
            .ok_or_else(|| ParseError::InvalidSlot(s.to_string()))
    }
}

/// Raid difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Normal,
    Heroic,
    Mythic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Heroic, Difficulty::Mythic];

    /// The raid source that drops gear at this difficulty
    pub fn raid_source(&self) -> DropSource {
        match self {
            Difficulty::Normal => DropSource::NormalRaid,
            Difficulty::Heroic => DropSource::HeroicRaid,
            Difficulty::Mythic => DropSource::MythicRaid,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Heroic => write!(f, "Heroic"),
            Difficulty::Mythic => write!(f, "Mythic"),
        }
    }
}

/// Where an item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSource {
    NormalRaid,
    HeroicRaid,
    MythicRaid,
    /// Great Vault reward for +10 keys
    DungeonVault,
    DungeonDrop,
    Delve,
    Crafted,
    Unknown,
}

impl DropSource {
    /// Raid tier this source belongs to, if it is a raid source
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            DropSource::NormalRaid => Some(Difficulty::Normal),
            DropSource::HeroicRaid => Some(Difficulty::Heroic),
            DropSource::MythicRaid => Some(Difficulty::Mythic),
            _ => None,
        }
    }

    /// Sources that compete with raid loot at every difficulty
    pub fn is_cross_difficulty(&self) -> bool {
        matches!(
            self,
            DropSource::DungeonVault
                | DropSource::DungeonDrop
                | DropSource::Crafted
                | DropSource::Delve
        )
    }

    /// Whether an item from this source counts towards a player's gear at `difficulty`
    pub fn is_eligible_for(&self, difficulty: Difficulty) -> bool {
        self.is_cross_difficulty() || self.difficulty() == Some(difficulty)
    }

    fn key(&self) -> &'static str {
        match self {
            DropSource::NormalRaid => "normal_raid",
            DropSource::HeroicRaid => "heroic_raid",
            DropSource::MythicRaid => "mythic_raid",
            DropSource::DungeonVault => "dungeon_vault",
            DropSource::DungeonDrop => "dungeon_drop",
            DropSource::Delve => "delve",
            DropSource::Crafted => "crafted",
            DropSource::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DropSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropSource::NormalRaid => write!(f, "Normal Raid"),
            DropSource::HeroicRaid => write!(f, "Heroic Raid"),
            DropSource::MythicRaid => write!(f, "Mythic Raid"),
            DropSource::DungeonVault => write!(f, "Mythic +10 Vault"),
            DropSource::DungeonDrop => write!(f, "Mythic+ Dungeon Drop"),
            DropSource::Delve => write!(f, "Delves"),
            DropSource::Crafted => write!(f, "Crafted Item"),
            DropSource::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for DropSource {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [DropSource; 8] = [
            DropSource::NormalRaid,
            DropSource::HeroicRaid,
            DropSource::MythicRaid,
            DropSource::DungeonVault,
            DropSource::DungeonDrop,
            DropSource::Delve,
            DropSource::Crafted,
            DropSource::Unknown,
        ];
        ALL.iter()
            .copied()
            .find(|source| source.key() == s || source.to_string() == s)
            .ok_or_else(|| ParseError::InvalidSource(s.to_string()))
    }
}

/// Why a player was put forward for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    BestInSlot,
    UpgradePercent,
    /// Padding entry when fewer than five players qualify
    NoCandidate,
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionReason::BestInSlot => write!(f, "Best in slot"),
            SelectionReason::UpgradePercent => write!(f, "Upgrade percent"),
            SelectionReason::NoCandidate => write!(f, "No candidate"),
        }
    }
}

/// Parse errors for string conversions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid gear slot: {0}")]
    InvalidSlot(String),
    #[error("Invalid drop source: {0}")]
    InvalidSource(String),
}
