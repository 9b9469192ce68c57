//! # lootcouncil
//!
//! Normalisation and loot-council recommendation engine for raid gear sims.
//!
//! This library provides functionality to:
//! - Collapse class-specific tier-set names into slot-generic names
//! - Classify items by slot, drop source and boss (first writer wins)
//! - Track players per (name, spec) and keep their best sim per item
//! - Compute best-in-slot tables and deltas per raid difficulty
//! - Rank up to five candidates for every raid drop
//! - Build the expected-value matrix per (source, boss, player)
//!
//! ## Example
//!
//! ```no_run
//! use lootcouncil::{ContentConfig, Report, ReportRecord, RunContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ctx = RunContext::new(ContentConfig::builtin()?);
//!
//! let mut report = Report::new("https://www.raidbots.com/simbot/report/abc");
//! report.records.push(
//!     ReportRecord::new("Zogg", "Arms", "Cauldron Champion's Legplates 441", 0.031)
//!         .with_context_key("-1/1001/raid-heroic/229245/0/legs/")
//!         .with_source_hint("-1/1001/raid-heroic/229245/0/legs/"),
//! );
//!
//! // A rejected report is kept in ctx.failures() and the batch carries on
//! let _ = ctx.ingest(&report);
//! ctx.analyse();
//!
//! for item in ctx.list_items() {
//!     println!("{} [{}] {} / {}", item.name, item.slot, item.source, item.boss);
//! }
//! if let Some(candidates) = ctx.get_candidates("Tier Pants 441") {
//!     println!("{:?}", candidates[0]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bis;
pub mod content;
pub mod context;
pub mod ranking;
pub mod record;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod taxonomy;
pub mod types;

#[doc(inline)]
pub use bis::{BestInSlot, DeltaMatrix};
#[doc(inline)]
pub use content::{ContentConfig, Role};
#[doc(inline)]
pub use context::RunContext;
#[doc(inline)]
pub use ranking::{rank_item, ItemCandidate, MAX_CANDIDATES};
#[doc(inline)]
pub use record::{Report, ReportFailure, ReportRecord};
#[doc(inline)]
pub use registry::{round_value, Player, PlayerId, PlayerRegistry};
#[doc(inline)]
pub use report::{EvRow, ExpectedValueMatrix};
#[doc(inline)]
pub use resolver::{NameResolver, ResolvedName};
#[doc(inline)]
pub use taxonomy::{base_name, ItemInfo, Taxonomy, UNKNOWN_BOSS};
#[doc(inline)]
pub use types::{Difficulty, DropSource, ParseError, SelectionReason, Slot};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Content parse error: {0}")]
    ContentParse(#[from] toml::de::Error),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Malformed record {index}: {reason}")]
    MalformedRecord { index: usize, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
