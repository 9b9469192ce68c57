//! CSV sheets for the loot council

use anyhow::{Context, Result};
use lootcouncil::{EvRow, PlayerId, RunContext, MAX_CANDIDATES};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Players ordered for columns: tanks, damage, healers, then by name
pub fn player_order(ctx: &RunContext) -> Vec<PlayerId> {
    let mut players: Vec<_> = ctx
        .list_players()
        .map(|(id, p)| (ctx.content().role_of(&p.spec), p.display_name(), id))
        .collect();
    players.sort();
    players.into_iter().map(|(_, _, id)| id).collect()
}

fn format_value(value: f64) -> String {
    format!("{value:.3}")
}

fn player_name(ctx: &RunContext, id: PlayerId) -> String {
    ctx.registry().get(id).display_name()
}

/// Every item with its classification and each player's sim
pub fn write_droptimizers<W: Write>(ctx: &RunContext, out: W) -> Result<()> {
    let order = player_order(ctx);
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Item".to_string(), "Slot".into(), "Source".into(), "Boss".into()];
    header.extend(order.iter().map(|id| player_name(ctx, *id)));
    writer.write_record(&header)?;

    for item in ctx.list_items() {
        let mut row = vec![
            item.name.clone(),
            item.slot.to_string(),
            item.source.to_string(),
            item.boss.clone(),
        ];
        row.extend(
            order
                .iter()
                .map(|id| ctx.get_sim(*id, &item.name).map(format_value).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Ranked candidates for every raid item
pub fn write_candidates<W: Write>(ctx: &RunContext, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Item".to_string(), "Source".into(), "Boss".into()];
    for n in 1..=MAX_CANDIDATES {
        for column in ["Player", "Value", "Delta", "Alternative", "Reason"] {
            header.push(format!("{column} {n}"));
        }
    }
    writer.write_record(&header)?;

    for (item, candidates) in ctx.candidates() {
        let taxonomy = ctx.taxonomy();
        let mut row = vec![
            item.to_string(),
            taxonomy.lookup_source(item).to_string(),
            taxonomy.lookup_boss(item).to_string(),
        ];
        for c in candidates {
            let name = match c.player {
                Some(id) => player_name(ctx, id),
                None => "No choice".to_string(),
            };
            row.extend([
                name,
                format_value(c.value),
                format_value(c.delta),
                format_value(c.alternative),
                c.reason.to_string(),
            ]);
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Mean upgrade per (source, boss) for each player, plus the team average
pub fn write_expected_value<W: Write>(ctx: &RunContext, out: W) -> Result<()> {
    let order = player_order(ctx);
    let matrix = ctx.get_expected_value_matrix();
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Source".to_string(), "Boss".into()];
    header.extend(order.iter().map(|id| player_name(ctx, *id)));
    header.push("Average".into());
    writer.write_record(&header)?;

    for (source, boss) in matrix.pairs() {
        let mut row = vec![source.to_string(), boss.to_string()];
        let rows = order
            .iter()
            .map(|id| EvRow::Player(*id))
            .chain(std::iter::once(EvRow::Average));
        row.extend(rows.map(|r| {
            matrix
                .get(source, boss, r)
                .map(format_value)
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write all three sheets into `dir`, suffixed with `date` (DD-MM-YYYY)
pub fn write_all(ctx: &RunContext, dir: &Path, date: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let sheets: [(&str, fn(&RunContext, File) -> Result<()>); 3] = [
        ("droptimizers", write_droptimizers),
        ("candidates", write_candidates),
        ("expected-value", write_expected_value),
    ];

    let mut written = Vec::new();
    for (prefix, write) in sheets {
        let path = dir.join(format!("{prefix}-{date}.csv"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write(ctx, file).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
