//! Workbook loading and the sheet/row model
//!
//! Thin projection over calamine: each sheet becomes ordered headers plus
//! rows of [`CellValue`], addressable by header name. Planning workbooks
//! come from several export pipelines, so two normalization modes exist
//! besides plain header-row sheets: the headerless three-column
//! GSM-LTE-Relation sheet and the `target_cells` migration template with its
//! fixed thirteen-column layout.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::{CiqgenError, Result};

/// Sheet name of the GSM to LTE relation table.
pub const RELATION_SHEET: &str = "GSM-LTE-Relation";
/// Fixed column names assigned to the headerless relation sheet.
pub const RELATION_COLUMNS: [&str; 3] = ["BSC", "CELL_GSM", "EARFCN"];

/// Sheet name of the BSC migration template.
pub const MIGRATION_SHEET: &str = "target_cells";
/// Fixed column names of the migration template, in sheet order.
pub const MIGRATION_COLUMNS: [&str; 13] = [
    "NODENAME",
    "SITENAME",
    "CELL",
    "CELL_DUMMY",
    "BSC_LEGACY",
    "BSC_NEW",
    "RSITE",
    "LOC_CODE",
    "CGI",
    "BSIC",
    "BCCHNO",
    "RXOTG_LEGACY",
    "RXSTG_NEW",
];

/// A single spreadsheet cell, reduced to what the generators need.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(trimmed.to_string())
                }
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Render the cell the way it reads in the sheet. Integral numbers drop
    /// the fractional part so an EARFCN stored as 2425.0 prints as `2425`.
    pub fn display(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            CellValue::Empty => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        let n = self.as_f64()?;
        if n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX) {
            Some(n.round() as u32)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        let n = self.as_f64()?;
        if n.is_finite() {
            Some(n.round() as i64)
        } else {
            None
        }
    }
}

/// One sheet: ordered headers and data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet from already-parsed parts. Generators are tested
    /// against sheets built this way instead of fixture workbooks.
    pub fn from_parts(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        Self::new(name.into(), headers, rows)
    }

    fn new(name: String, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            name,
            headers,
            index,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Headers in sheet order, unnamed columns included.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Column lookup that fails fast with the sheet and column names.
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| CiqgenError::ColumnNotFound {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { sheet: self, cells })
    }

    /// Drop rows that have a blank in any of the given columns.
    pub fn drop_blank(&mut self, columns: &[&str]) -> Result<()> {
        let indices: Vec<usize> = columns
            .iter()
            .map(|c| self.require_column(c))
            .collect::<Result<_>>()?;
        self.rows.retain(|cells| {
            indices
                .iter()
                .all(|&i| cells.get(i).is_some_and(|c| !c.is_empty()))
        });
        Ok(())
    }

    /// Drop rows whose value in `column` equals the column name itself
    /// (case-insensitive). Some exports embed the header as a data row.
    pub fn drop_header_echo(&mut self, column: &str) -> Result<()> {
        let idx = self.require_column(column)?;
        self.rows.retain(|cells| {
            !cells
                .get(idx)
                .and_then(|c| c.display())
                .is_some_and(|v| v.eq_ignore_ascii_case(column))
        });
        Ok(())
    }
}

/// Borrowed view of one data row, addressable by header name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let idx = self.sheet.column_index(column)?;
        self.cells.get(idx)
    }

    /// Displayed value of a column; `None` for missing columns and blanks.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(|c| c.display())
    }

    pub fn f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(|c| c.as_f64())
    }

    pub fn u32(&self, column: &str) -> Option<u32> {
        self.get(column).and_then(|c| c.as_u32())
    }

    pub fn i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(|c| c.as_i64())
    }
}

/// An opened `.xlsx` planning workbook.
pub struct Workbook {
    inner: Xlsx<BufReader<std::fs::File>>,
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CiqgenError::WorkbookNotFound {
                path: path.to_path_buf(),
            });
        }
        let inner: Xlsx<_> = open_workbook(path)?;
        debug!(path = %path.display(), "opened workbook");
        Ok(Self { inner })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.inner.sheet_names().iter().any(|s| s == name)
    }

    fn range(&mut self, name: &str) -> Result<calamine::Range<Data>> {
        if !self.has_sheet(name) {
            return Err(CiqgenError::SheetNotFound {
                sheet: name.to_string(),
            });
        }
        Ok(self.inner.worksheet_range(name)?)
    }

    /// Load a sheet whose first row is the header row. Blank header cells
    /// get the reader's `Unnamed: <idx>` marker so adjacent-column pairing
    /// can still address them.
    pub fn sheet(&mut self, name: &str) -> Result<Sheet> {
        let range = self.range(name)?;
        let mut iter = range.rows();

        let headers: Vec<String> = match iter.next() {
            Some(row) => row
                .iter()
                .enumerate()
                .map(|(i, cell)| match CellValue::from_data(cell) {
                    CellValue::Text(s) => s,
                    _ => format!("Unnamed: {}", i),
                })
                .collect(),
            None => Vec::new(),
        };

        let rows = iter
            .map(|row| Self::pad_row(row, headers.len()))
            .collect();

        Ok(Sheet::new(name.to_string(), headers, rows))
    }

    /// Load a sheet with no header row, assigning fixed column names to the
    /// leading columns and discarding any beyond them. `skip_rows` data rows
    /// at the top are dropped first.
    pub fn sheet_with_columns(
        &mut self,
        name: &str,
        columns: &[&str],
        skip_rows: usize,
    ) -> Result<Sheet> {
        let range = self.range(name)?;
        let headers: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

        let rows = range
            .rows()
            .skip(skip_rows)
            .map(|row| Self::pad_row(row, columns.len()))
            .collect();

        Ok(Sheet::new(name.to_string(), headers, rows))
    }

    /// The normalized GSM-LTE-Relation sheet: fixed three-column names,
    /// rows with any blank dropped, embedded header echoes removed.
    pub fn relation_sheet(&mut self) -> Result<Sheet> {
        let mut sheet = self.sheet_with_columns(RELATION_SHEET, &RELATION_COLUMNS, 0)?;
        sheet.drop_blank(&RELATION_COLUMNS)?;
        sheet.drop_header_echo("CELL_GSM")?;
        debug!(rows = sheet.len(), "normalized relation sheet");
        Ok(sheet)
    }

    /// The normalized `target_cells` migration template: first row skipped,
    /// fixed thirteen-column names.
    pub fn migration_sheet(&mut self) -> Result<Sheet> {
        self.sheet_with_columns(MIGRATION_SHEET, &MIGRATION_COLUMNS, 1)
    }

    fn pad_row(row: &[Data], width: usize) -> Vec<CellValue> {
        let mut cells: Vec<CellValue> = row.iter().map(CellValue::from_data).collect();
        cells.truncate(width);
        cells.resize(width, CellValue::Empty);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(headers: &[&str], rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet::new(
            "test".to_string(),
            headers.iter().map(|s| s.to_string()).collect(),
            rows,
        )
    }

    #[test]
    fn test_display_renders_integral_numbers_without_fraction() {
        assert_eq!(CellValue::Number(2425.0).display(), Some("2425".to_string()));
        assert_eq!(CellValue::Number(45.25).display(), Some("45.25".to_string()));
        assert_eq!(CellValue::Empty.display(), None);
    }

    #[test]
    fn test_require_column_names_sheet_and_column() {
        let s = sheet(&["BSC"], vec![]);
        let err = s.require_column("CELL_GSM").unwrap_err();
        assert!(err.to_string().contains("CELL_GSM"));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_drop_blank_removes_partial_rows() {
        let mut s = sheet(
            &["BSC", "CELL_GSM"],
            vec![
                vec![CellValue::Text("B1".into()), CellValue::Text("C1".into())],
                vec![CellValue::Text("B2".into()), CellValue::Empty],
            ],
        );
        s.drop_blank(&["BSC", "CELL_GSM"]).unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_drop_header_echo_is_case_insensitive() {
        let mut s = sheet(
            &["CELL_GSM"],
            vec![
                vec![CellValue::Text("cell_gsm".into())],
                vec![CellValue::Text("C1".into())],
            ],
        );
        s.drop_header_echo("CELL_GSM").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.rows().next().unwrap().text("CELL_GSM").as_deref(), Some("C1"));
    }
}
