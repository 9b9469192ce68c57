//! Raidbots droptimizer reports
//!
//! A report lives at `https://www.raidbots.com/simbot/report/<id>/` and is
//! read from three files under it:
//!
//! - `input.txt`: the SimC input. Line 2 names the character. Between the
//!   `# Actors` and `# Simulation Options` lines, each item gets a comment
//!   line (`# Harlan's Loaded Dice 441 - ...`) followed by the profileset
//!   lines that sim it.
//! - `data.csv`: baseline throughput on line 2, then one `<key>,<dps>` row
//!   per profileset.
//! - `data.json`: only needed for armory imports, where `input.txt` doesn't
//!   carry the spec.

use crate::{ReportError, Result};
use lootcouncil::{Report, ReportRecord};
use std::collections::BTreeMap;
use tracing::{debug, info};

const ACTORS: &str = "# Actors";
const SIMULATION_OPTIONS: &str = "# Simulation Options";

/// Report URL with the trailing slash the file URLs hang off
pub fn report_base(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

pub fn input_url(url: &str) -> String {
    format!("{}input.txt", report_base(url))
}

pub fn data_csv_url(url: &str) -> String {
    format!("{}data.csv", report_base(url))
}

pub fn data_json_url(url: &str) -> String {
    format!("{}data.json", report_base(url))
}

/// Character line of `input.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// `# Foxfrost - Enhancement - 2023-05-23 19:18 - US/Thrall`
    Addon { name: String, spec: String },
    /// `armory=us,thrall,Foxfrost`
    Armory { name: String },
}

pub fn parse_header(input: &str) -> Result<Header> {
    let line = input.lines().nth(1).map(str::trim).unwrap_or_default();

    if let Some(rest) = line.strip_prefix('#') {
        let mut parts = rest.split(" - ");
        let name = parts.next().unwrap_or_default().trim();
        let spec = parts
            .next()
            .and_then(|s| s.split_whitespace().next())
            .unwrap_or_default();
        if name.is_empty() || spec.is_empty() {
            return Err(ReportError::MissingHeader(2));
        }
        return Ok(Header::Addon {
            name: name.to_string(),
            spec: spec.to_string(),
        });
    }

    if let Some(rest) = line.strip_prefix("armory=") {
        let name = rest.rsplit(',').next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(ReportError::MissingHeader(2));
        }
        return Ok(Header::Armory {
            name: name.to_string(),
        });
    }

    Err(ReportError::MissingHeader(2))
}

/// Whether `data.json` has to be fetched to learn the spec
pub fn needs_data_json(input: &str) -> bool {
    matches!(parse_header(input), Ok(Header::Armory { .. }))
}

/// First word of `sim.players[0].specialization` ("Enhancement Shaman" -> "Enhancement")
pub fn spec_from_json(json: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    value
        .pointer("/sim/players/0/specialization")
        .and_then(|v| v.as_str())
        .and_then(|s| s.split_whitespace().next())
        .map(str::to_string)
        .ok_or(ReportError::MissingField("sim.players[0].specialization"))
}

/// Item declared for a profileset key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Raw item name from the comment line
    pub item: String,
    /// The whole comment line, used as boss context
    pub comment: String,
}

/// profileset key -> declaring item, from the `# Actors` section
pub fn parse_declarations(input: &str) -> Result<BTreeMap<String, Declaration>> {
    let mut lines = input.lines().map(str::trim);
    if !lines.any(|l| l == ACTORS) {
        return Err(ReportError::MissingSection(ACTORS));
    }

    let mut declared = BTreeMap::new();
    let mut current: Option<Declaration> = None;
    for line in lines {
        if line == SIMULATION_OPTIONS {
            return Ok(declared);
        }
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let item = comment.split(" - ").next().unwrap_or_default().trim();
            current = Some(Declaration {
                item: item.to_string(),
                comment: line.to_string(),
            });
            continue;
        }
        let Some(key) = profileset_key(line) else {
            debug!("Ignoring actor line '{}'", line);
            continue;
        };
        let Some(decl) = &current else {
            return Err(ReportError::UndeclaredKey(key.to_string()));
        };
        declared.insert(key.to_string(), decl.clone());
    }

    Err(ReportError::MissingSection(SIMULATION_OPTIONS))
}

/// `profileset."-1/1001/raid-heroic/.../legs/"+=legs=,id=...` -> the quoted key
fn profileset_key(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("profileset.\"")?;
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// `(key, dps)` rows of `data.csv`, with the baseline from line 2
pub fn parse_results(data_csv: &str) -> Result<(f64, Vec<(String, f64)>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data_csv.as_bytes());

    let mut baseline = None;
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;
        let key = record.get(0).unwrap_or_default().trim();
        let raw = record.get(1).unwrap_or_default().trim();
        let dps: f64 = raw.parse().map_err(|_| ReportError::InvalidNumber {
            line,
            value: raw.to_string(),
        })?;
        if baseline.is_none() {
            baseline = Some(dps);
        } else {
            rows.push((key.to_string(), dps));
        }
    }

    let baseline = baseline.ok_or(ReportError::MissingSection("baseline"))?;
    if baseline == 0.0 {
        return Err(ReportError::ZeroBaseline);
    }
    Ok((baseline, rows))
}

/// Build a report from the fetched payloads.
///
/// `data_json` is only consulted for armory imports; pass `None` otherwise.
pub fn parse(id: &str, input: &str, data_csv: &str, data_json: Option<&str>) -> Result<Report> {
    let (name, spec) = match parse_header(input)? {
        Header::Addon { name, spec } => (name, spec),
        Header::Armory { name } => {
            let json = data_json.ok_or(ReportError::MissingField("data.json"))?;
            (name, spec_from_json(json)?)
        }
    };

    let declared = parse_declarations(input)?;
    let (baseline, rows) = parse_results(data_csv)?;

    let mut report = Report::new(id);
    for (key, dps) in rows {
        let decl = declared
            .get(&key)
            .ok_or_else(|| ReportError::UndeclaredKey(key.clone()))?;
        let upgrade = (dps - baseline) / baseline;
        report.records.push(
            ReportRecord::new(&name, &spec, &decl.item, upgrade)
                .with_context_key(&key)
                .with_source_hint(&key)
                .with_boss_hint(&decl.comment),
        );
    }

    info!(
        "Raidbots report {}: {} ({}), {} sims",
        id,
        name,
        spec,
        report.records.len()
    );
    Ok(report)
}
