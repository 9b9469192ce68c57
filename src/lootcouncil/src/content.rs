//! Game content tables
//!
//! Tier affixes, slot vocabularies, source patterns, the boss list and spec
//! roles. These change every patch, so they are data rather than code: a
//! default document is compiled in and any other TOML file with the same shape
//! can replace it.

use crate::types::{DropSource, Slot};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Content tables for the current expansion
const DEFAULT_CONTENT: &str = include_str!("../data/content.toml");

/// One entry in the ordered source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePattern {
    /// Substring looked for in the provider's location/difficulty string
    pub pattern: String,
    pub source: DropSource,
}

/// A slot-indicative word, optionally vetoed by longer words containing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keyword {
    Plain(String),
    Guarded { word: String, unless: Vec<String> },
}

impl Keyword {
    /// Match against an already-lowercased name
    pub fn matches(&self, lower_name: &str) -> bool {
        match self {
            Keyword::Plain(word) => lower_name.contains(word.as_str()),
            Keyword::Guarded { word, unless } => {
                lower_name.contains(word.as_str())
                    && !unless.iter().any(|u| lower_name.contains(u.as_str()))
            }
        }
    }
}

/// Vocabulary for one slot in the prose slot heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotKeywords {
    pub slot: Slot,
    pub include: Vec<Keyword>,
}

/// Spec names per role; everything else is damage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(default)]
    pub tank: Vec<String>,
    #[serde(default)]
    pub healer: Vec<String>,
}

/// Raid role, used to order players in output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Tank,
    Damage,
    Healer,
}

/// All patch-specific classification tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    pub tier_affixes: Vec<String>,
    pub bosses: Vec<String>,
    pub sources: Vec<SourcePattern>,
    #[serde(default)]
    pub roles: Roles,
    /// slot name -> piece name used in collapsed tier names
    pub slot_pieces: BTreeMap<String, String>,
    /// provider slot name (lowercase) -> slot
    #[serde(default)]
    pub slot_aliases: BTreeMap<String, Slot>,
    #[serde(default)]
    pub slot_keywords: Vec<SlotKeywords>,
}

impl ContentConfig {
    /// The compiled-in tables for the current expansion
    pub fn builtin() -> Result<Self> {
        Self::from_toml(DEFAULT_CONTENT)
    }

    /// Parse and validate a content document
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ContentConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a content document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<()> {
        for slot in self.slot_pieces.keys() {
            slot.parse::<Slot>()
                .map_err(|e| Error::InvalidContent(e.to_string()))?;
        }
        if self.tier_affixes.iter().any(|a| a.trim().is_empty()) {
            return Err(Error::InvalidContent("empty tier affix".into()));
        }
        if self.sources.iter().any(|s| s.pattern.is_empty()) {
            return Err(Error::InvalidContent("empty source pattern".into()));
        }
        // A boss contained in a later boss would shadow it under first-match-wins.
        for (i, boss) in self.bosses.iter().enumerate() {
            if let Some(later) = self.bosses[i + 1..].iter().find(|b| b.contains(boss.as_str())) {
                return Err(Error::InvalidContent(format!(
                    "boss '{boss}' shadows '{later}'"
                )));
            }
        }
        Ok(())
    }

    /// Map a provider's slot wording onto a slot
    pub fn standardize_slot(&self, raw: &str) -> Slot {
        let lower = raw.trim().to_lowercase();
        if let Some(slot) = self.slot_aliases.get(&lower) {
            return *slot;
        }
        lower.parse().unwrap_or(Slot::Unknown)
    }

    pub fn role_of(&self, spec: &str) -> Role {
        if self.roles.tank.iter().any(|s| s == spec) {
            Role::Tank
        } else if self.roles.healer.iter().any(|s| s == spec) {
            Role::Healer
        } else {
            Role::Damage
        }
    }
}
