//! Report retrieval over HTTP

use anyhow::{bail, Context, Result};
use lootcouncil::Report;
use lootcouncil_reports::{qe, raidbots, tooltip, Provider, SimLink};
use std::collections::HashMap;
use tracing::{debug, warn};

/// GET a URL as text
pub fn get_text(url: &str) -> Result<String> {
    debug!("GET {}", url);
    match ureq::get(url).call() {
        Ok(resp) => resp
            .into_string()
            .with_context(|| format!("Failed to read response from {}", url)),
        Err(ureq::Error::Status(code, _)) => {
            bail!("{} returned {} (expired or private report?)", url, code)
        }
        Err(e) => bail!("Request to {} failed: {}", url, e),
    }
}

/// Item slots looked up so far, shared by every report in a run
#[derive(Debug, Default)]
pub struct SlotCache {
    slots: HashMap<String, Option<String>>,
}

impl SlotCache {
    /// Slot wording for an item name. A failed lookup is logged and cached as
    /// unknown; it never fails the report.
    pub fn lookup<F>(&mut self, name: &str, get: &mut F) -> Option<String>
    where
        F: FnMut(&str) -> Result<String>,
    {
        if let Some(slot) = self.slots.get(name) {
            return slot.clone();
        }
        let slot = match get(&tooltip::lookup_url(name)) {
            Ok(xml) => {
                let slot = tooltip::parse_inventory_slot(&xml);
                if slot.is_none() {
                    warn!("No slot in tooltip for '{}'", name);
                }
                slot
            }
            Err(e) => {
                warn!("Slot lookup for '{}' failed: {:#}", name, e);
                None
            }
        };
        self.slots.insert(name.to_string(), slot.clone());
        slot
    }
}

/// Fetch and parse one report. `get` does the actual retrieval.
pub fn fetch_report<F>(link: &SimLink, slots: &mut SlotCache, mut get: F) -> Result<Report>
where
    F: FnMut(&str) -> Result<String>,
{
    match link.provider {
        Provider::Raidbots => {
            let input = get(&raidbots::input_url(&link.url))?;
            let data = get(&raidbots::data_csv_url(&link.url))?;
            let json = if raidbots::needs_data_json(&input) {
                Some(get(&raidbots::data_json_url(&link.url))?)
            } else {
                None
            };
            Ok(raidbots::parse(&link.url, &input, &data, json.as_deref())?)
        }
        Provider::Pastebin => {
            let text = get(&qe::raw_url(&link.url))?;
            let mut report = qe::parse(&link.url, &text)?;
            qe::fill_slots(&mut report, |name| slots.lookup(name, &mut get));
            Ok(report)
        }
    }
}
