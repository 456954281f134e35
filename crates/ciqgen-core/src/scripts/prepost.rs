//! Pre/post migration health-check script generator
//!
//! Builds WinFiol batch scripts from the `target_cells` migration template.
//! The scripts are positional: a counter variable `{N}` walks the rows (or
//! RSITE groups), `@IF {N} = i THEN @SET ...` conditionals bind the log
//! name, BSC, trunk group, and cell id for each index, and a loop-back line
//! referencing the total count re-enters at `@LABEL PRINT` until every index
//! has been probed. The `{...}` tokens in the emitted text are WinFiol
//! variables, not placeholders of ours.

use crate::bundle::group_by_key;
use crate::error::{CiqgenError, Result};
use crate::workbook::Sheet;

/// Which side of the migration the health check runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCheckPhase {
    /// Post-check on the new BSC, one script index per cell.
    PostNew,
    /// Pre-check on the new BSC, one script index per cell.
    PreNew,
    /// Pre-check on the legacy BSC, one script index per RSITE group.
    PreLegacy,
}

impl HealthCheckPhase {
    pub fn label(&self) -> &'static str {
        match self {
            HealthCheckPhase::PostNew => "POSTHC_NEWBSC",
            HealthCheckPhase::PreNew => "PREHC_NEWBSC",
            HealthCheckPhase::PreLegacy => "PREHC_LEGACYBSC",
        }
    }
}

/// One row of the migration template, reduced to the fields the scripts use.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationRow {
    pub cell: String,
    pub bsc_legacy: String,
    pub bsc_new: String,
    pub rsite: String,
    pub rxotg_legacy: String,
    pub rxstg_new: String,
}

/// Project the normalized `target_cells` sheet. Rows with a blank CELL are
/// skipped silently.
pub fn migration_rows(sheet: &Sheet) -> Vec<MigrationRow> {
    sheet
        .rows()
        .filter_map(|row| {
            Some(MigrationRow {
                cell: row.text("CELL")?,
                bsc_legacy: row.text("BSC_LEGACY").unwrap_or_default(),
                bsc_new: row.text("BSC_NEW").unwrap_or_default(),
                rsite: row.text("RSITE").unwrap_or_default(),
                rxotg_legacy: row.text("RXOTG_LEGACY").unwrap_or_default(),
                rxstg_new: row.text("RXSTG_NEW").unwrap_or_default(),
            })
        })
        .collect()
}

/// Generate the health-check script for a phase. `log_prefix` is the value
/// of the WinFiol `{D}` variable, i.e. where the element manager drops the
/// captured logs.
pub fn generate_health_check(
    rows: &[MigrationRow],
    phase: HealthCheckPhase,
    log_prefix: &str,
) -> Result<String> {
    if rows.is_empty() {
        return Err(CiqgenError::EmptySelection);
    }
    Ok(match phase {
        HealthCheckPhase::PostNew | HealthCheckPhase::PreNew => per_cell_script(rows, log_prefix),
        HealthCheckPhase::PreLegacy => per_site_script(rows, log_prefix),
    })
}

/// Probe command sequence run per cell. The repeats mirror the agreed
/// check list; order matters for log diffing between pre and post runs.
const CELL_PROBES: &[&str] = &[
    "RLDEP", "RLCCP", "RLCPP", "RLBCP", "RLSLP", "RLIHP", "RLLCP", "RLIMP", "RLHPP", "RLPCP",
    "RLAPP", "RLSSP", "RLLOP", "RLCXP", "RLLDP", "RLLPP", "RLSBP", "RLSUP", "RLLHP", "RLACP",
    "RLGSP", "RLDHP", "RLDUP", "RLDGP", "RLCHP", "RLCFP", "RLBDP", "RLDTP", "RLUMP", "RLMFP",
    "RLLFP", "RLPDP", "RLGAP", "RLLUP", "RLDMP", "RLSRP", "RLCDP", "RLSMP", "RLCLP", "RLCSP",
    "RLPBP", "RLDEP", "RLCFP", "RLBDP", "RLCRP", "RLGSP", "RLGRP", "RLLOP", "RLCPP", "RLSLP",
    "RLCHP", "RLCCP", "RLSTP", "RLSBP",
];

fn header(lines: &mut Vec<String>, log_prefix: &str) {
    lines.push("@SET {N}=1".to_string());
    lines.push("@LABEL PRINT".to_string());
    lines.push("@GETDATE {DATE} -DDMMYY-".to_string());
    lines.push("@GETTIME {TIME} -HHMM".to_string());
    lines.push("@GETDAY {DAY} SUN MON TUE WED THU FRI SAT".to_string());
    lines.push(format!("@SET {{D}}=\"{}\"", log_prefix));
    lines.push("@@LOG FILE NAME".to_string());
}

fn cell_probe_lines(lines: &mut Vec<String>) {
    lines.push("@LABEL RLDEP".to_string());
    for probe in CELL_PROBES {
        lines.push(format!("{}:CELL={{CELL}};", probe));
    }
}

fn rx_tail(lines: &mut Vec<String>) {
    lines.push("@LABEL RXMFP".to_string());
    lines.push("RXMOP:MO={TG},SUBORD;".to_string());
    lines.push("RXMFP:MO={TG},SUBORD;".to_string());
    lines.push("RXMFP:MO={TG},SUBORD,FAULTY;".to_string());
    lines.push("RXMSP:MO={TG},SUBORD;".to_string());
    lines.push("RXASP:MO={TG};".to_string());
    lines.push("RXAPP:MO={TG};".to_string());
    lines.push("RXTCP:MO={TG};".to_string());
    lines.push("RXCDP:MO={TG};".to_string());
    lines.push("CACLP;".to_string());
}

fn footer(lines: &mut Vec<String>, loop_bound: usize) {
    lines.push("@LOG OFF".to_string());
    lines.push("@T 1".to_string());
    lines.push("@INC {N} 1".to_string());
    lines.push(format!("@IF {{N}} <= {} THEN GOTO PRINT", loop_bound));
    lines.push("@LABEL STOP".to_string());
}

/// One script index per row; BSC and trunk group come from the new side.
fn per_cell_script(rows: &[MigrationRow], log_prefix: &str) -> String {
    let mut lines = Vec::new();
    header(&mut lines, log_prefix);

    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{S}} =\"{}\"+{{DATE}}+{{DAY}}+{{TIME}}+\".log\"",
            i + 1,
            row.cell
        ));
    }

    lines.push("@@BSC".to_string());
    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{BSC}} =\"{}\"",
            i + 1,
            row.bsc_new
        ));
    }

    lines.push("@@ TG".to_string());
    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{TG}} =RXSTG-{}",
            i + 1,
            row.rxstg_new
        ));
    }

    lines.push("@@ CELL ID".to_string());
    for (i, row) in rows.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}  THEN @SET {{CELL}} = {}",
            i + 1,
            row.cell
        ));
    }

    lines.push(String::new());
    lines.push("@T 1".to_string());
    lines.push("@LOG ON {D}{S}".to_string());
    lines.push("RXMOP:MO={TG};".to_string());
    lines.push("@RITEM {TRM} {_LINE8} \" \" 0".to_string());
    lines.push("RXCDP:MO={TG};".to_string());
    lines.push("RXTCP:MO={TG};".to_string());
    cell_probe_lines(&mut lines);
    lines.push("RLNRP:CELL={CELL},CELLR=ALL,NODATA;".to_string());
    lines.push("RLNRP:CELL={CELL},CELLR=ALL,UTRAN;".to_string());
    rx_tail(&mut lines);
    footer(&mut lines, rows.len());

    lines.join("\n")
}

/// One script index per RSITE group; BSC and trunk group come from the
/// legacy side, and the `{CELL}` variable carries the whole group.
fn per_site_script(rows: &[MigrationRow], log_prefix: &str) -> String {
    let groups = group_by_key(rows.to_vec(), |r| r.rsite.clone());

    let mut lines = Vec::new();
    header(&mut lines, log_prefix);

    for (i, (rsite, _)) in groups.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{S}} =\"{}\"+{{DATE}}+{{DAY}}+{{TIME}}+\".log\"",
            i + 1,
            rsite
        ));
    }

    lines.push("@@BSC".to_string());
    for (i, (_, members)) in groups.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{BSC}} =\"{}\"",
            i + 1,
            members[0].bsc_legacy
        ));
    }

    lines.push("@@ TG".to_string());
    for (i, (_, members)) in groups.iter().enumerate() {
        lines.push(format!(
            "@IF {{N}} = {}   THEN @SET {{TG}} ={}",
            i + 1,
            members[0].rxotg_legacy
        ));
    }

    lines.push("@@ CELL ALL".to_string());
    for (i, (_, members)) in groups.iter().enumerate() {
        let joined = members
            .iter()
            .map(|r| r.cell.as_str())
            .collect::<Vec<_>>()
            .join("& ");
        lines.push(format!("@IF {{N}} = {}   THEN @SET {{CELL}} ={}", i + 1, joined));
    }

    let max_cells = groups.iter().map(|(_, m)| m.len()).max().unwrap_or(0);
    for n in 0..max_cells {
        lines.push(format!("@@ CELL ID {:02}", n + 1));
        for (i, (_, members)) in groups.iter().enumerate() {
            if let Some(row) = members.get(n) {
                lines.push(format!(
                    "@IF {{N}} = {}   THEN @SET {{CELL{}}} = {}",
                    i + 1,
                    n + 1,
                    row.cell
                ));
            }
        }
    }

    lines.push("@T 2".to_string());
    lines.push("exit;".to_string());
    lines.push("@T 2".to_string());
    lines.push("eaw {BSC}".to_string());
    lines.push("@T 1".to_string());
    lines.push("@LOG ON {D}{S}".to_string());
    lines.push("RXMOP:MO={TG};".to_string());
    lines.push("@RITEM {TRM} {_LINE8} \" \" 0".to_string());
    lines.push("RXCDP:MO={TG};".to_string());
    lines.push("RXTCP:MO={TG};".to_string());
    cell_probe_lines(&mut lines);
    for n in 1..=3 {
        lines.push(format!("RLNRP:cell={{CELL{}}},cellr=all;", n));
        lines.push(format!("RLNRP:CELL={{CELL{}}},CELLR=ALL,NODATA;", n));
        lines.push(format!("RLNRP:CELL={{CELL{}}},CELLR=ALL,UTRAN;", n));
    }
    rx_tail(&mut lines);
    lines.push(String::new());
    footer(&mut lines, groups.len());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cell: &str, rsite: &str) -> MigrationRow {
        MigrationRow {
            cell: cell.to_string(),
            bsc_legacy: "BSCOLD1".to_string(),
            bsc_new: "BSCNEW1".to_string(),
            rsite: rsite.to_string(),
            rxotg_legacy: "RXOTG-44".to_string(),
            rxstg_new: "101".to_string(),
        }
    }

    #[test]
    fn test_per_cell_sections_and_loop_bound() {
        let rows = vec![row("CELL1", "S1"), row("CELL2", "S1"), row("CELL3", "S2")];
        let script =
            generate_health_check(&rows, HealthCheckPhase::PostNew, r"S:\HC\").unwrap();

        // One conditional per row in each section, 1-based.
        assert!(script.contains("@IF {N} = 1   THEN @SET {S} =\"CELL1\"+{DATE}+{DAY}+{TIME}+\".log\""));
        assert!(script.contains("@IF {N} = 3   THEN @SET {S} =\"CELL3\""));
        assert!(script.contains("@IF {N} = 2   THEN @SET {BSC} =\"BSCNEW1\""));
        assert!(script.contains("@IF {N} = 1   THEN @SET {TG} =RXSTG-101"));
        assert!(script.contains("@IF {N} = 2  THEN @SET {CELL} = CELL2"));
        // Loop bound equals the row count.
        assert!(script.contains("@IF {N} <= 3 THEN GOTO PRINT"));
        assert!(script.ends_with("@LABEL STOP"));
    }

    #[test]
    fn test_per_cell_probe_body_addresses_winfiol_variables() {
        let rows = vec![row("CELL1", "S1")];
        let script =
            generate_health_check(&rows, HealthCheckPhase::PreNew, r"S:\HC\").unwrap();
        assert!(script.contains("@SET {D}=\"S:\\HC\\\""));
        assert!(script.contains("RLDEP:CELL={CELL};"));
        assert!(script.contains("RLNRP:CELL={CELL},CELLR=ALL,UTRAN;"));
        assert!(script.contains("RXMFP:MO={TG},SUBORD,FAULTY;"));
        // Cell names never leak into the probe body; only the sections bind them.
        assert!(!script.contains("RLDEP:CELL=CELL1;"));
    }

    #[test]
    fn test_per_site_groups_by_rsite_preserving_order() {
        let rows = vec![
            row("CELL1", "S2"),
            row("CELL2", "S1"),
            row("CELL3", "S2"),
        ];
        let script =
            generate_health_check(&rows, HealthCheckPhase::PreLegacy, r"S:\HC\").unwrap();

        // S2 was seen first, so it is index 1.
        assert!(script.contains("@IF {N} = 1   THEN @SET {S} =\"S2\""));
        assert!(script.contains("@IF {N} = 2   THEN @SET {S} =\"S1\""));
        // Grouped cell line joins the site's cells.
        assert!(script.contains("@IF {N} = 1   THEN @SET {CELL} =CELL1& CELL3"));
        assert!(script.contains("@IF {N} = 2   THEN @SET {CELL} =CELL2"));
        // Legacy-side identifiers.
        assert!(script.contains("@SET {BSC} =\"BSCOLD1\""));
        assert!(script.contains("@SET {TG} =RXOTG-44"));
        assert!(script.contains("eaw {BSC}"));
        // Loop bound is the group count, not the row count.
        assert!(script.contains("@IF {N} <= 2 THEN GOTO PRINT"));
    }

    #[test]
    fn test_per_site_numbered_cell_sections_skip_short_groups() {
        let rows = vec![
            row("CELL1", "S1"),
            row("CELL2", "S1"),
            row("CELL3", "S2"),
        ];
        let script =
            generate_health_check(&rows, HealthCheckPhase::PreLegacy, r"S:\HC\").unwrap();

        assert!(script.contains("@@ CELL ID 01"));
        assert!(script.contains("@@ CELL ID 02"));
        assert!(!script.contains("@@ CELL ID 03"));
        // S2 has one cell, so it contributes no {CELL2} binding.
        assert!(script.contains("@IF {N} = 1   THEN @SET {CELL2} = CELL2"));
        assert!(!script.contains("@IF {N} = 2   THEN @SET {CELL2}"));
    }

    #[test]
    fn test_empty_rows_is_an_error() {
        let err = generate_health_check(&[], HealthCheckPhase::PostNew, "p").unwrap_err();
        assert!(matches!(err, CiqgenError::EmptySelection));
    }
}
