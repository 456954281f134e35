//! Error types for ciqgen

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiqgenError {
    // Workbook errors
    #[error("Workbook not found at {path}")]
    WorkbookNotFound { path: PathBuf },

    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(#[from] calamine::XlsxError),

    #[error("Sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },

    // Selection errors
    #[error("None of the selected cells appear in the sheet")]
    EmptySelection,

    // Template errors
    #[error("Template '{name}' not found in {dir}")]
    TemplateNotFound { name: String, dir: PathBuf },

    // Filesystem errors
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Refusing file name with path separators: {name}")]
    UnsafeFileName { name: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // Archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CiqgenError>;
