//! Polygon and coverage MO `set` command generators
//!
//! The `eUtranCellPolygon` sheet carries up to 15 corner pairs per cell
//! (latitude in a `Corner N` column, longitude in the unnamed column right
//! after it). Corners are converted to the 8-digit fixed-point form and
//! joined into one `set ... eutranCellPolygon ...` statement per cell. The
//! `eUtranCellCoverage` sheet maps one row to one
//! `set ... eutranCellCoverage ...` statement with defaulted parameters.

use crate::coord::{convert_degree_to_decimal, format_coordinate_for_polygon};
use crate::error::Result;
use crate::mapping::detect_corner_columns;
use crate::workbook::{Row, Sheet};

/// Sheet names in the CIQ LTE workbook.
pub const POLYGON_SHEET: &str = "eUtranCellPolygon";
pub const COVERAGE_SHEET: &str = "eUtranCellCoverage";

/// Cell-id column shared by both sheets.
pub const CELL_ID_COLUMN: &str = "EutranCellFDDId";

const DEFAULT_BEARING: i64 = 0;
const DEFAULT_OPENING_ANGLE: i64 = 1200;
const DEFAULT_RADIUS: i64 = 15_000;

/// One `set` command per polygon row with a non-blank cell id. A sheet
/// without the cell-id column is an error, not an empty listing.
pub fn generate_polygon_commands(sheet: &Sheet) -> Result<Vec<String>> {
    sheet.require_column(CELL_ID_COLUMN)?;
    let mappings = detect_corner_columns(sheet.headers());

    Ok(sheet
        .rows()
        .filter_map(|row| {
            let cell_id = row.text(CELL_ID_COLUMN)?;
            Some(polygon_command(&cell_id, row, &mappings))
        })
        .collect())
}

fn polygon_command(cell_id: &str, row: Row<'_>, mappings: &[(String, String)]) -> String {
    let mut corners = Vec::new();

    for (lat_col, lon_col) in mappings {
        let Some(lat_text) = row.text(lat_col) else {
            continue;
        };
        let Some(lon_text) = row.text(lon_col) else {
            continue;
        };

        let lat = convert_degree_to_decimal(&lat_text);
        let mut lon = convert_degree_to_decimal(&lon_text);

        // Some North American exports drop the W hemisphere letter; a
        // positive longitude in [60, 180] on this sheet is really west.
        if let Some(value) = lon {
            if (60.0..=180.0).contains(&value) {
                lon = Some(-value);
            }
        }

        if let (Some(lat), Some(lon)) = (
            format_coordinate_for_polygon(lat),
            format_coordinate_for_polygon(lon),
        ) {
            corners.push(format!("cornerLatitude={},cornerLongitude={}", lat, lon));
        }
    }

    if corners.is_empty() {
        format!("# No valid corners found for {}", cell_id)
    } else {
        format!(
            "set EUtranCellFDD={} eutranCellPolygon {};",
            cell_id,
            corners.join(";")
        )
    }
}

/// One `set` command per coverage row with a non-blank cell id. Missing
/// bearing/opening-angle/radius default to 0 / 1200 / 15000.
pub fn generate_coverage_commands(sheet: &Sheet) -> Result<Vec<String>> {
    sheet.require_column(CELL_ID_COLUMN)?;
    Ok(sheet
        .rows()
        .filter_map(|row| {
            let cell_id = row.text(CELL_ID_COLUMN)?;
            let bearing = row.i64("posCellBearing").unwrap_or(DEFAULT_BEARING);
            let angle = row.i64("posCellOpeningAngle").unwrap_or(DEFAULT_OPENING_ANGLE);
            let radius = row.i64("posCellRadius").unwrap_or(DEFAULT_RADIUS);

            Some(format!(
                "set EutranCellFDD={} eutranCellCoverage posCellBearing={},posCellOpeningAngle={},posCellRadius={}",
                cell_id, bearing, angle, radius
            ))
        })
        .collect())
}

/// Polygon commands first, then a blank line, then coverage commands.
/// Either list may be empty; a missing sheet contributes nothing.
pub fn combine_commands(polygon: &[String], coverage: &[String]) -> String {
    let mut all: Vec<&str> = polygon.iter().map(String::as_str).collect();
    if !polygon.is_empty() && !coverage.is_empty() {
        all.push("");
    }
    all.extend(coverage.iter().map(String::as_str));
    all.join("\n")
}
