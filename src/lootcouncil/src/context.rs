//! Run context
//!
//! Owns every table for one batch. Reports are ingested one at a time, then
//! `analyse` computes best-in-slot tables, candidate lists and the
//! expected-value matrix; after that the context is only read.

use crate::bis;
use crate::content::ContentConfig;
use crate::ranking::{rank_item, ItemCandidate, MAX_CANDIDATES};
use crate::record::{Report, ReportFailure, ReportRecord};
use crate::registry::{Player, PlayerId, PlayerRegistry};
use crate::report::ExpectedValueMatrix;
use crate::resolver::{slot_from_key, NameResolver};
use crate::taxonomy::{ItemInfo, Taxonomy, UNKNOWN_BOSS};
use crate::types::Slot;
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

/// All state for one batch of reports
#[derive(Debug, Clone)]
pub struct RunContext {
    content: ContentConfig,
    resolver: NameResolver,
    taxonomy: Taxonomy,
    registry: PlayerRegistry,
    failures: Vec<ReportFailure>,
    candidates: BTreeMap<String, [ItemCandidate; MAX_CANDIDATES]>,
    expected_value: ExpectedValueMatrix,
    analysed: bool,
}

impl RunContext {
    pub fn new(content: ContentConfig) -> Self {
        Self {
            resolver: NameResolver::new(&content),
            taxonomy: Taxonomy::new(&content),
            registry: PlayerRegistry::new(),
            failures: Vec::new(),
            candidates: BTreeMap::new(),
            expected_value: ExpectedValueMatrix::default(),
            analysed: false,
            content,
        }
    }

    pub fn content(&self) -> &ContentConfig {
        &self.content
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Ingest one report. Every record is checked before anything is
    /// recorded, so a rejected report leaves no trace besides its failure entry.
    pub fn ingest(&mut self, report: &Report) -> std::result::Result<usize, ReportFailure> {
        if let Err(e) = check_records(&report.records) {
            let failure = ReportFailure {
                report: report.id.clone(),
                reason: e.to_string(),
            };
            error!("Skipping report {}: {}", failure.report, failure.reason);
            self.failures.push(failure.clone());
            return Err(failure);
        }

        for record in &report.records {
            self.apply(record);
        }
        self.invalidate();
        info!(
            "Ingested {} records from {}",
            report.records.len(),
            report.id
        );
        Ok(report.records.len())
    }

    /// Ingest a batch, carrying on past rejected reports
    pub fn ingest_all<'a, I>(&mut self, reports: I) -> usize
    where
        I: IntoIterator<Item = &'a Report>,
    {
        reports
            .into_iter()
            .filter(|report| self.ingest(report).is_ok())
            .count()
    }

    /// Attribute a failure that happened before the report reached the core
    /// (fetch or parse errors in the ingestion layer).
    pub fn record_failure(&mut self, report: &str, reason: impl std::fmt::Display) {
        let failure = ReportFailure {
            report: report.to_string(),
            reason: reason.to_string(),
        };
        error!("Skipping report {}: {}", failure.report, failure.reason);
        self.failures.push(failure);
    }

    fn apply(&mut self, record: &ReportRecord) {
        let player = self
            .registry
            .add_player(record.player_name.trim(), record.spec.trim());
        let resolved = self
            .resolver
            .resolve(&record.item_raw_name, record.item_context_key.as_deref());
        let name = resolved.name;

        if !self.taxonomy.contains(&name) {
            let slot = resolved
                .slot
                .or_else(|| {
                    record
                        .slot_hint
                        .as_deref()
                        .map(|hint| self.content.standardize_slot(hint))
                        .filter(Slot::is_known)
                })
                .or_else(|| {
                    record
                        .item_context_key
                        .as_deref()
                        .map(slot_from_key)
                        .filter(Slot::is_known)
                })
                .or_else(|| self.taxonomy.slot_by_base_name(&name))
                .unwrap_or(Slot::Unknown);
            self.taxonomy.record_item(&name, slot);
        }

        if !record.source_hint.trim().is_empty() && !self.taxonomy.has_source(&name) {
            let source = self.taxonomy.classify_source(&record.source_hint);
            self.taxonomy.record_source(&name, source);
        }

        if !self.taxonomy.has_boss(&name) {
            let boss = match record.boss_hint.as_deref() {
                Some(hint) => Some(
                    self.taxonomy
                        .classify_boss(hint)
                        .unwrap_or(UNKNOWN_BOSS)
                        .to_string(),
                ),
                None => self.taxonomy.boss_by_base_name(&name).map(str::to_string),
            };
            match boss {
                Some(boss) => {
                    self.taxonomy.record_boss(&name, &boss);
                }
                None => warn!("No boss context for '{}'", name),
            }
        }

        debug!(
            "{} ({}): {} = {}",
            record.player_name, record.spec, name, record.upgrade_value
        );
        self.registry
            .get_mut(player)
            .record_sim(&name, record.upgrade_value);
    }

    /// Drop derived tables; they no longer match the ingested sims
    fn invalidate(&mut self) {
        self.candidates.clear();
        self.expected_value = ExpectedValueMatrix::default();
        self.analysed = false;
    }

    /// Compute best-in-slot tables, deltas, candidate lists and the
    /// expected-value matrix from everything ingested so far.
    pub fn analyse(&mut self) {
        bis::refresh(&mut self.registry, &self.taxonomy);

        self.candidates = self
            .taxonomy
            .items()
            .filter_map(|item| {
                let ranked = rank_item(&item.name, &self.registry, &self.taxonomy)?;
                Some((item.name, ranked))
            })
            .collect();
        self.expected_value = ExpectedValueMatrix::compute(&self.registry, &self.taxonomy);
        self.analysed = true;

        info!(
            "Analysed {} items for {} players ({} rankable)",
            self.taxonomy.len(),
            self.registry.len(),
            self.candidates.len()
        );
    }

    pub fn is_analysed(&self) -> bool {
        self.analysed
    }

    /// Every known item with its classification, sorted by name
    pub fn list_items(&self) -> Vec<ItemInfo> {
        self.taxonomy.items().collect()
    }

    /// Every player in order of first appearance
    pub fn list_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.registry.iter()
    }

    pub fn get_sim(&self, player: PlayerId, item: &str) -> Option<f64> {
        self.registry.get(player).sim(item)
    }

    /// Candidate list for a raid item. `None` for non-raid items, and until
    /// `analyse` has run since the last ingest.
    pub fn get_candidates(&self, item: &str) -> Option<&[ItemCandidate; MAX_CANDIDATES]> {
        self.candidates.get(item)
    }

    /// All candidate lists, by item name. Empty until `analyse` has run.
    pub fn candidates(&self) -> impl Iterator<Item = (&str, &[ItemCandidate; MAX_CANDIDATES])> {
        self.candidates.iter().map(|(item, list)| (item.as_str(), list))
    }

    pub fn get_expected_value_matrix(&self) -> &ExpectedValueMatrix {
        &self.expected_value
    }

    /// Reports skipped so far, in the order they failed
    pub fn failures(&self) -> &[ReportFailure] {
        &self.failures
    }
}

fn check_records(records: &[ReportRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if let Some(reason) = record.problem() {
            return Err(Error::MalformedRecord { index, reason });
        }
    }
    Ok(())
}
