//! Finding report links in a sim list or a shared spreadsheet export

use crate::Result;
use tracing::debug;

/// Which provider a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Raidbots,
    Pastebin,
}

impl Provider {
    pub fn of(url: &str) -> Option<Self> {
        if url.contains("raidbots.com") {
            Some(Provider::Raidbots)
        } else if url.contains("pastebin.com") {
            Some(Provider::Pastebin)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Raidbots => write!(f, "Raidbots"),
            Provider::Pastebin => write!(f, "QE Live"),
        }
    }
}

/// One report to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimLink {
    pub url: String,
    pub provider: Provider,
    /// Text before the URL ("Zogg Prot:"), informational only
    pub label: Option<String>,
}

fn link_from(text: &str) -> Option<SimLink> {
    let text = text.trim().trim_matches('"');
    let url = text.split_whitespace().last()?;
    let provider = Provider::of(url)?;
    let label = text[..text.len() - url.len()].trim().trim_end_matches(':').trim();
    Some(SimLink {
        url: url.to_string(),
        provider,
        label: (!label.is_empty()).then(|| label.to_string()),
    })
}

/// Links in a sim-list file, one `Label: <url>` per line. Other lines are ignored.
pub fn parse_sim_list(text: &str) -> Vec<SimLink> {
    text.lines()
        .filter_map(|line| {
            let link = link_from(line);
            if link.is_none() && !line.trim().is_empty() {
                debug!("No report link in '{}'", line.trim());
            }
            link
        })
        .collect()
}

/// Links in any cell of a spreadsheet CSV export
pub fn scan_spreadsheet(csv_text: &str) -> Result<Vec<SimLink>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut links = Vec::new();
    for record in reader.records() {
        let record = record?;
        links.extend(record.iter().filter_map(link_from));
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sim_list() {
        let text = "\
Zogg Prot: https://www.raidbots.com/simbot/report/abc123
# comment line

Casty: https://pastebin.com/AbC123
https://example.com/not-a-report
";
        let links = parse_sim_list(text);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].provider, Provider::Raidbots);
        assert_eq!(links[0].label.as_deref(), Some("Zogg Prot"));
        assert_eq!(links[0].url, "https://www.raidbots.com/simbot/report/abc123");
        assert_eq!(links[1].provider, Provider::Pastebin);
        assert_eq!(links[1].label.as_deref(), Some("Casty"));
    }

    #[test]
    fn test_bare_url() {
        let links = parse_sim_list("https://www.raidbots.com/simbot/report/abc123\n");
        assert_eq!(links[0].label, None);
    }

    #[test]
    fn test_scan_spreadsheet() {
        let csv = "\
\"Name\",\"Raidbots\",\"QE\"
\"Zogg\",\"https://www.raidbots.com/simbot/report/abc123\",\"\"
\"Casty\",\"\",\"https://pastebin.com/AbC123\"
";
        let links = scan_spreadsheet(csv).unwrap();
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.raidbots.com/simbot/report/abc123",
                "https://pastebin.com/AbC123",
            ]
        );
    }
}
