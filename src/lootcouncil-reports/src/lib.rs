//! Provider report parsing
//!
//! Turns the text payloads of Raidbots droptimizer reports and QE Live
//! pastebin exports into [`lootcouncil::Report`]s, and reads item slots out
//! of Wowhead tooltips. Fetching is left to the caller; everything here
//! works on strings.

pub mod qe;
pub mod raidbots;
pub mod simlist;
pub mod tooltip;

#[doc(inline)]
pub use simlist::{parse_sim_list, scan_spreadsheet, Provider, SimLink};

/// Errors from report parsing. Any of these rejects the whole report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Missing character header on line {0}")]
    MissingHeader(usize),

    #[error("Missing '{0}' line")]
    MissingSection(&'static str),

    #[error("Line {line}: cannot parse '{value}' as a number")]
    InvalidNumber { line: usize, value: String },

    #[error("Baseline throughput is zero")]
    ZeroBaseline,

    #[error("Profile key '{0}' has no item declared for it")]
    UndeclaredKey(String),

    #[error("Line {0}: upgrade value with no item before it")]
    OrphanValue(usize),

    #[error("Missing '{0}' in data.json")]
    MissingField(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
