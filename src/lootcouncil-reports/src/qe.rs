//! QE Live upgrade-finder exports pasted to pastebin
//!
//! The paste is plain text: character name, spec line, a blank, then item
//! names each followed by item level / upgrade lines, with some page chrome
//! mixed in. Item lines may end in a `[Raid 5]`-style source tag.

use crate::{ReportError, Result};
use lootcouncil::taxonomy::base_name;
use lootcouncil::{Report, ReportRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// Page chrome that survives a copy/paste of the upgrade finder
const JUNK_CONTAINS: &[&str] = &["Upgrades", "Find your next upgrade!"];
const JUNK_EXACT: &[&str] = &["Standard Edition", "img", "QE Live"];

/// `pastebin.com/<id>` -> `https://pastebin.com/raw/<id>`; raw URLs pass through
pub fn raw_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("/raw/") {
        return url.to_string();
    }
    let id = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    format!("https://pastebin.com/raw/{id}")
}

fn is_junk(line: &str) -> bool {
    JUNK_EXACT.iter().any(|j| *j == line) || JUNK_CONTAINS.iter().any(|j| line.contains(j))
}

/// `+12.3%` -> 0.123, `-0.4%` -> -0.004
fn parse_percent(line: &str) -> Option<f64> {
    line.trim_end_matches('%').trim().parse::<f64>().ok().map(|v| v / 100.0)
}

/// Split `Item Name [Raid 5]` into the name and its source tag
fn split_source_tag(line: &str) -> (&str, Option<&str>) {
    if let Some(open) = line.rfind('[') {
        if line.ends_with(']') {
            let tag = line[open + 1..line.len() - 1].trim();
            return (line[..open].trim_end(), (!tag.is_empty()).then_some(tag));
        }
    }
    (line, None)
}

pub fn parse(id: &str, text: &str) -> Result<Report> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let name = lines.first().copied().unwrap_or_default();
    if name.is_empty() {
        return Err(ReportError::MissingHeader(1));
    }
    let spec = lines
        .get(1)
        .and_then(|l| l.split_whitespace().next())
        .ok_or(ReportError::MissingHeader(2))?;

    let mut report = Report::new(id);
    let mut item: Option<(&str, Option<&str>)> = None;
    let mut ilvl = "";

    for (i, line) in lines.iter().copied().enumerate().skip(3) {
        if line.is_empty() || is_junk(line) {
            continue;
        }

        let value = if line.contains('%') {
            Some(parse_percent(line).ok_or_else(|| ReportError::InvalidNumber {
                line: i + 1,
                value: line.to_string(),
            })?)
        } else if line == "+0" {
            Some(0.0)
        } else {
            None
        };

        match value {
            Some(value) => {
                let (item_name, source) = item.ok_or(ReportError::OrphanValue(i + 1))?;
                let raw_name = if ilvl.is_empty() {
                    item_name.to_string()
                } else {
                    format!("{item_name} {ilvl}")
                };
                let mut record = ReportRecord::new(name, spec, &raw_name, value);
                if let Some(source) = source {
                    record = record.with_source_hint(source);
                }
                report.records.push(record);
            }
            None if line.chars().count() == 3 => ilvl = line,
            None => item = Some(split_source_tag(line)),
        }
    }

    info!(
        "QE Live report {}: {} ({}), {} sims",
        id,
        name,
        spec,
        report.records.len()
    );
    Ok(report)
}

/// Fill in slot hints the paste doesn't carry.
///
/// `lookup` gets each distinct item name (item level stripped) once and
/// returns the provider's slot wording, or `None` if it has no answer.
/// Records that already have a slot hint are left alone.
pub fn fill_slots<F>(report: &mut Report, mut lookup: F) -> usize
where
    F: FnMut(&str) -> Option<String>,
{
    let mut seen: HashMap<String, Option<String>> = HashMap::new();
    let mut filled = 0;
    for record in report.records.iter_mut().filter(|r| r.slot_hint.is_none()) {
        let name = base_name(&record.item_raw_name).to_string();
        let slot = seen.entry(name).or_insert_with_key(|name| lookup(name));
        if let Some(slot) = slot {
            debug!("Slot for '{}': {}", record.item_raw_name, slot);
            record.slot_hint = Some(slot.clone());
            filled += 1;
        }
    }
    filled
}
