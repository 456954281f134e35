//! GSM to LTE (G2L) radio-link parameter script generator
//!
//! Reads the GSM-LTE-Relation sheet (BSC, CELL_GSM, EARFCN) and emits one
//! RATPRIO/FDDARFCN command script per BSC. Each cell contributes a fixed
//! command block with its EARFCN list; each BSC group ends with a single
//! closing block listing every cell of the group.

use crate::bundle::{group_by_key, Artifact};
use crate::error::{CiqgenError, Result};
use crate::ratprio::{get_ratprio, RATPRIO_DEFAULT};
use crate::workbook::Sheet;

/// One relation row: a GSM cell under a BSC, tied to an LTE carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRelation {
    pub bsc: String,
    pub cell: String,
    /// EARFCN as it reads in the sheet. Kept as text for joining; parsed
    /// on demand for the priority lookup.
    pub earfcn: String,
}

impl CellRelation {
    fn ratprio(&self) -> u8 {
        // Non-numeric EARFCN falls back to the default priority rather
        // than dropping the row; the carrier still has to appear in the
        // RLEFC list.
        self.earfcn.parse().map(get_ratprio).unwrap_or(RATPRIO_DEFAULT)
    }
}

/// Project the normalized relation sheet into relation rows.
pub fn relation_entries(sheet: &Sheet) -> Vec<CellRelation> {
    sheet
        .rows()
        .filter_map(|row| {
            Some(CellRelation {
                bsc: row.text("BSC")?,
                cell: row.text("CELL_GSM")?,
                earfcn: row.text("EARFCN")?,
            })
        })
        .collect()
}

/// Distinct cell names, sorted, for selection listings.
pub fn selectable_cells(entries: &[CellRelation]) -> Vec<String> {
    let mut cells: Vec<String> = Vec::new();
    for entry in entries {
        if !cells.contains(&entry.cell) {
            cells.push(entry.cell.clone());
        }
    }
    cells.sort();
    cells
}

/// One BSC-grouped script per group, named `{BSC}_G2L_{stamp}.txt`.
///
/// `selected` narrows the relation rows to the chosen cells; an empty
/// intersection is an error rather than an empty bundle.
pub fn generate_grouped(
    entries: &[CellRelation],
    selected: &[String],
    stamp: &str,
) -> Result<Vec<Artifact>> {
    let chosen = filter_selected(entries, selected)?;
    let groups = group_by_key(chosen, |e| e.bsc.clone());

    let artifacts = groups
        .into_iter()
        .map(|(bsc, members)| {
            let script = group_script(&members);
            Artifact::new(format!("{}_G2L_{}.txt", bsc, stamp), script)
        })
        .collect();
    Ok(artifacts)
}

/// Single-file variant: the concatenated per-cell sections for the selected
/// cells, no grouping and no closing block.
pub fn generate_single(entries: &[CellRelation], selected: &[String]) -> Result<String> {
    let chosen = filter_selected(entries, selected)?;
    let sections: Vec<String> = cells_in_order(&chosen)
        .into_iter()
        .map(|cell| cell_section(&cell, &chosen))
        .collect();
    Ok(sections.join("\n\n"))
}

fn filter_selected(entries: &[CellRelation], selected: &[String]) -> Result<Vec<CellRelation>> {
    let chosen: Vec<CellRelation> = entries
        .iter()
        .filter(|e| selected.contains(&e.cell))
        .cloned()
        .collect();
    if chosen.is_empty() {
        return Err(CiqgenError::EmptySelection);
    }
    Ok(chosen)
}

/// Distinct cells in first-seen row order.
fn cells_in_order(entries: &[CellRelation]) -> Vec<String> {
    let mut cells: Vec<String> = Vec::new();
    for entry in entries {
        if !cells.contains(&entry.cell) {
            cells.push(entry.cell.clone());
        }
    }
    cells
}

fn group_script(members: &[CellRelation]) -> String {
    let cells = cells_in_order(members);
    let sections: Vec<String> = cells
        .iter()
        .map(|cell| cell_section(cell, members))
        .collect();

    let joined_cells = cells.join("&");
    let mut script = sections.join("\n\n");
    script.push_str(&format!(
        "\nIOEXP;\nRLEFP:CELL={0};\nRLSRP:CELL={0};\nCACLP;",
        joined_cells
    ));
    script
}

fn cell_section(cell: &str, members: &[CellRelation]) -> String {
    let rows: Vec<&CellRelation> = members.iter().filter(|e| e.cell == cell).collect();
    let earfcn_combined = rows
        .iter()
        .map(|e| e.earfcn.as_str())
        .collect::<Vec<_>>()
        .join("&");

    let mut section = format!(
        "RLUMP:CELL={cell};\n\
         \n\
         RLSRP:CELL={cell};\n\
         RLSRC:CELL={cell},FDDARFCN=1037,RATPRIO=3,HPRIOTHR=4;\n\
         RLSRP:CELL={cell};\n\
         \n\
         RLEFP:CELL={cell};\n\
         RLEFC:CELL={cell},ADD,EARFCN={earfcn_combined},LISTTYPE=IDLE;"
    );

    for row in &rows {
        section.push_str(&format!(
            "\nRLSRC:CELL={},EARFCN={},RATPRIO={},HPRIOTHR=7;",
            cell,
            row.earfcn,
            row.ratprio()
        ));
    }

    section.push_str(&format!(
        "\nRLSRP:CELL={cell};\n\
         \n\
         RLSRC:CELL={cell},RATPRIO=1;\n\
         RLSRI:CELL={cell};\n\
         RLSRP:CELL={cell};"
    ));

    section
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(bsc: &str, cell: &str, earfcn: &str) -> CellRelation {
        CellRelation {
            bsc: bsc.to_string(),
            cell: cell.to_string(),
            earfcn: earfcn.to_string(),
        }
    }

    #[test]
    fn test_cell_section_joins_earfcns_and_assigns_priorities() {
        let members = vec![entry("B1", "CELL1", "5060"), entry("B1", "CELL1", "2050")];
        let section = cell_section("CELL1", &members);

        assert!(section.contains("RLEFC:CELL=CELL1,ADD,EARFCN=5060&2050,LISTTYPE=IDLE;"));
        assert!(section.contains("RLSRC:CELL=CELL1,EARFCN=5060,RATPRIO=6,HPRIOTHR=7;"));
        assert!(section.contains("RLSRC:CELL=CELL1,EARFCN=2050,RATPRIO=5,HPRIOTHR=7;"));
        // Fixed opening and closing lines.
        assert!(section.starts_with("RLUMP:CELL=CELL1;"));
        assert!(section.ends_with("RLSRI:CELL=CELL1;\nRLSRP:CELL=CELL1;"));
    }

    #[test]
    fn test_unknown_earfcn_gets_default_priority() {
        let members = vec![entry("B1", "CELL1", "123")];
        let section = cell_section("CELL1", &members);
        assert!(section.contains("RLSRC:CELL=CELL1,EARFCN=123,RATPRIO=4,HPRIOTHR=7;"));
    }

    #[test]
    fn test_non_numeric_earfcn_uses_table_default() {
        assert_eq!(entry("B1", "CELL1", "n/a").ratprio(), RATPRIO_DEFAULT);
    }

    #[test]
    fn test_two_bsc_groups_yield_two_artifacts_with_own_closing_blocks() {
        let entries = vec![
            entry("BSC_A", "CELL1", "5060"),
            entry("BSC_B", "CELL2", "2050"),
            entry("BSC_A", "CELL3", "3050"),
        ];
        let selected: Vec<String> = vec!["CELL1".into(), "CELL2".into(), "CELL3".into()];
        let artifacts = generate_grouped(&entries, &selected, "20250101_000000").unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "BSC_A_G2L_20250101_000000.txt");
        assert_eq!(artifacts[1].name, "BSC_B_G2L_20250101_000000.txt");

        // Each closing block lists only its own group's cells.
        assert!(artifacts[0].contents.contains("RLEFP:CELL=CELL1&CELL3;"));
        assert!(!artifacts[0].contents.contains("CELL2"));
        assert!(artifacts[1].contents.contains("RLEFP:CELL=CELL2;"));
        assert!(!artifacts[1].contents.contains("CELL1"));
        // Exactly one closing block per artifact.
        assert_eq!(artifacts[0].contents.matches("IOEXP;").count(), 1);
        assert!(artifacts[0].contents.ends_with("CACLP;"));
    }

    #[test]
    fn test_selection_outside_sheet_is_an_error() {
        let entries = vec![entry("B1", "CELL1", "5060")];
        let err = generate_grouped(&entries, &["CELL9".to_string()], "x").unwrap_err();
        assert!(matches!(err, CiqgenError::EmptySelection));
    }

    #[test]
    fn test_single_variant_has_no_closing_block() {
        let entries = vec![entry("B1", "CELL1", "5060"), entry("B2", "CELL2", "2050")];
        let selected: Vec<String> = vec!["CELL1".into(), "CELL2".into()];
        let script = generate_single(&entries, &selected).unwrap();
        assert!(!script.contains("IOEXP;"));
        assert!(script.contains("RLUMP:CELL=CELL1;"));
        assert!(script.contains("RLUMP:CELL=CELL2;"));
    }

    #[test]
    fn test_selectable_cells_sorted_unique() {
        let entries = vec![
            entry("B1", "CELL2", "1"),
            entry("B1", "CELL1", "2"),
            entry("B1", "CELL2", "3"),
        ];
        assert_eq!(selectable_cells(&entries), vec!["CELL1", "CELL2"]);
    }
}
