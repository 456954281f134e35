//! `ciqgen cells` - list the selectable cells of a relation workbook

use anyhow::{Context, Result};
use ciqgen_core::bundle::group_by_key;
use ciqgen_core::scripts::g2l::relation_entries;
use ciqgen_core::workbook::Workbook;

use crate::cli::CellsArgs;
use crate::output::OutputWriter;
use crate::output_types::CellRow;

pub fn execute(args: CellsArgs, writer: &OutputWriter) -> Result<()> {
    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open workbook {}", args.workbook.display()))?;
    let sheet = workbook.relation_sheet()?;
    let entries = relation_entries(&sheet);

    // One listing row per distinct cell, keeping its BSC.
    let groups = group_by_key(entries, |e| e.cell.clone());
    let mut rows: Vec<CellRow> = groups
        .into_iter()
        .filter_map(|(cell, members)| {
            let bsc = members.first()?.bsc.clone();
            Some(CellRow {
                index: 0,
                cell,
                bsc,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.cell.cmp(&b.cell));
    for (i, row) in rows.iter_mut().enumerate() {
        row.index = i + 1;
    }

    if !writer.is_json() {
        writer.info(format!("{} selectable cell(s)", rows.len()));
    }
    writer.table(rows);
    Ok(())
}
