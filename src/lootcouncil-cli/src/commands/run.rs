//! Run command handler
//!
//! Fetches every report, feeds them to one run context and writes the sheets.
//! A report that can't be fetched or parsed is listed at the end; the run
//! still succeeds.

use crate::commands::load_content;
use crate::config::Config;
use crate::{fetch, output};
use anyhow::{bail, Context, Result};
use lootcouncil::RunContext;
use lootcouncil_reports::{parse_sim_list, scan_spreadsheet, SimLink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Handle the run command
pub fn handle(
    sim_list: &Path,
    content: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    sheet_url: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let content = load_content(content.or(config.content).as_deref())?;
    let sheet_url = sheet_url.or(config.sheet_url);
    let output_dir = output_dir
        .or(config.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let links = discover(sim_list, sheet_url.as_deref(), fetch::get_text)?;
    let mut ctx = RunContext::new(content);
    ingest_links(&mut ctx, &links, fetch::get_text);
    ctx.analyse();

    let date = chrono::Local::now().format("%d-%m-%Y").to_string();
    for path in output::write_all(&ctx, &output_dir, &date)? {
        println!("Wrote {}", path.display());
    }

    report_failures(&ctx);
    Ok(())
}

/// Report links from the sim list, or from the spreadsheet when the list can't be read
pub fn discover<F>(sim_list: &Path, sheet_url: Option<&str>, mut get: F) -> Result<Vec<SimLink>>
where
    F: FnMut(&str) -> Result<String>,
{
    match fs::read_to_string(sim_list) {
        Ok(text) => {
            let links = parse_sim_list(&text);
            info!("{} reports listed in {}", links.len(), sim_list.display());
            Ok(links)
        }
        Err(e) => {
            warn!("{} could not be read: {}", sim_list.display(), e);
            let Some(url) = sheet_url else {
                bail!(
                    "Could not read {} and no spreadsheet is configured (lootcouncil configure --sheet-url)",
                    sim_list.display()
                );
            };
            info!("Using spreadsheet {}", url);
            let csv = get(url).context("Failed to fetch spreadsheet")?;
            scan_spreadsheet(&csv).context("Failed to read spreadsheet export")
        }
    }
}

/// Fetch, parse and ingest each link. Failures are recorded on the context.
pub fn ingest_links<F>(ctx: &mut RunContext, links: &[SimLink], mut get: F)
where
    F: FnMut(&str) -> Result<String>,
{
    let mut slots = fetch::SlotCache::default();
    for (i, link) in links.iter().enumerate() {
        info!("Checking {} ({}/{})", link.url, i + 1, links.len());
        match fetch::fetch_report(link, &mut slots, &mut get) {
            Ok(report) => {
                // A rejected report is already on ctx.failures()
                let _ = ctx.ingest(&report);
            }
            Err(e) => ctx.record_failure(&link.url, format!("{e:#}")),
        }
    }
}

fn report_failures(ctx: &RunContext) {
    let failures = ctx.failures();
    if failures.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("{} report(s) skipped:", failures.len());
    for failure in failures {
        eprintln!("  {}", failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootcouncil::{ContentConfig, SelectionReason, Slot};

    fn pages(url: &str) -> Result<String> {
        match url {
            "https://pastebin.com/raw/good" => {
                Ok("Casty\nFrost Mage\n\nRing of Power [Raid 5]\n441\n+1.5%\n".into())
            }
            "https://pastebin.com/raw/bad" => Ok("Casty\nFrost Mage\n\nRing\n441\nlots%\n".into()),
            "https://pastebin.com/raw/rings" => Ok(
                "Casty\nFrost Mage\n\nRing of Power [Raid 5]\n441\n+3.0%\nVault Band [Dungeon 10]\n441\n+1.5%\n"
                    .into(),
            ),
            "https://www.wowhead.com/item=Ring%20of%20Power&xml"
            | "https://www.wowhead.com/item=Vault%20Band&xml" => {
                Ok(r#"<item><inventorySlot id="11">Finger</inventorySlot></item>"#.into())
            }
            "https://sheet.example/export" => Ok(
                "\"Name\",\"Link\"\n\"Casty\",\"https://pastebin.com/good\"\n".into(),
            ),
            _ => bail!("{} returned 404", url),
        }
    }

    #[test]
    fn test_discover_from_sim_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simlist.txt");
        fs::write(&path, "Casty: https://pastebin.com/good\nnotes\n").unwrap();

        let links = discover(&path, None, pages).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label.as_deref(), Some("Casty"));
    }

    #[test]
    fn test_discover_falls_back_to_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("simlist.txt");

        let links = discover(&missing, Some("https://sheet.example/export"), pages).unwrap();
        assert_eq!(links[0].url, "https://pastebin.com/good");

        assert!(discover(&missing, None, pages).is_err());
    }

    #[test]
    fn test_bad_reports_do_not_stop_the_batch() {
        let mut ctx = RunContext::new(ContentConfig::builtin().unwrap());
        let links = parse_sim_list(
            "a: https://pastebin.com/bad\nb: https://pastebin.com/missing\nc: https://pastebin.com/good\n",
        );
        ingest_links(&mut ctx, &links, pages);

        let failed: Vec<_> = ctx.failures().iter().map(|f| f.report.as_str()).collect();
        assert_eq!(
            failed,
            vec!["https://pastebin.com/bad", "https://pastebin.com/missing"]
        );
        assert_eq!(ctx.list_items().len(), 1);
        assert_eq!(ctx.list_items()[0].name, "Ring of Power 441");
    }

    #[test]
    fn test_pasted_ring_can_be_best_in_slot() {
        let mut ctx = RunContext::new(ContentConfig::builtin().unwrap());
        let links = parse_sim_list("Casty: https://pastebin.com/rings\n");
        ingest_links(&mut ctx, &links, pages);
        ctx.analyse();

        let ring = ctx.taxonomy().item("Ring of Power 441").unwrap();
        assert_eq!(ring.slot, Slot::Finger);
        assert_eq!(ctx.taxonomy().lookup_slot("Vault Band 441"), Slot::Finger);

        let ranked = ctx.get_candidates("Ring of Power 441").unwrap();
        assert_eq!(ranked[0].player, ctx.registry().find("Casty", "Frost"));
        assert_eq!(ranked[0].reason, SelectionReason::BestInSlot);
        assert_eq!(ranked[0].alternative, 0.015);
        assert_eq!(ranked[0].delta, 0.015);
    }
}
