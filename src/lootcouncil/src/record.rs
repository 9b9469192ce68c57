//! Records handed to the core by the ingestion layer

use serde::{Deserialize, Serialize};

/// One (player, item) observation extracted from a provider report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub player_name: String,
    pub spec: String,
    /// Display name as the provider printed it, item level included
    pub item_raw_name: String,
    /// Provider profile key; its last segment names the slot
    #[serde(default)]
    pub item_context_key: Option<String>,
    /// Provider slot wording ("Two-Hand", "Trinket", ...)
    #[serde(default)]
    pub slot_hint: Option<String>,
    /// Upgrade as a fraction of baseline throughput
    pub upgrade_value: f64,
    /// Location/difficulty string; empty when the provider gives none
    #[serde(default)]
    pub source_hint: String,
    /// Context line naming the encounter
    #[serde(default)]
    pub boss_hint: Option<String>,
}

impl ReportRecord {
    /// Minimal record; optional context is filled in with the `with_*` builders
    pub fn new(player_name: &str, spec: &str, item_raw_name: &str, upgrade_value: f64) -> Self {
        Self {
            player_name: player_name.to_string(),
            spec: spec.to_string(),
            item_raw_name: item_raw_name.to_string(),
            item_context_key: None,
            slot_hint: None,
            upgrade_value,
            source_hint: String::new(),
            boss_hint: None,
        }
    }

    pub fn with_context_key(mut self, key: &str) -> Self {
        self.item_context_key = Some(key.to_string());
        self
    }

    pub fn with_slot_hint(mut self, slot: &str) -> Self {
        self.slot_hint = Some(slot.to_string());
        self
    }

    pub fn with_source_hint(mut self, hint: &str) -> Self {
        self.source_hint = hint.to_string();
        self
    }

    pub fn with_boss_hint(mut self, hint: &str) -> Self {
        self.boss_hint = Some(hint.to_string());
        self
    }

    /// Reason this record can't be ingested, if any
    pub fn problem(&self) -> Option<&'static str> {
        if self.player_name.trim().is_empty() {
            Some("missing player name")
        } else if self.spec.trim().is_empty() {
            Some("missing spec")
        } else if self.item_raw_name.trim().is_empty() {
            Some("missing item name")
        } else if !self.upgrade_value.is_finite() {
            Some("upgrade value is not a number")
        } else {
            None
        }
    }
}

/// All records from one provider report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// URL or sim-list line the report came from
    pub id: String,
    pub records: Vec<ReportRecord>,
}

impl Report {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Vec::new(),
        }
    }
}

/// A report that was skipped, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFailure {
    pub report: String,
    pub reason: String,
}

impl std::fmt::Display for ReportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.report, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem() {
        assert_eq!(ReportRecord::new("A", "Fire", "Ring 441", 0.01).problem(), None);
        assert_eq!(
            ReportRecord::new("", "Fire", "Ring 441", 0.01).problem(),
            Some("missing player name")
        );
        assert_eq!(
            ReportRecord::new("A", " ", "Ring 441", 0.01).problem(),
            Some("missing spec")
        );
        assert_eq!(
            ReportRecord::new("A", "Fire", "Ring 441", f64::NAN).problem(),
            Some("upgrade value is not a number")
        );
    }
}
