//! `ciqgen files` - browse and clean the generated-script folder

use anyhow::{Context, Result};
use ciqgen_core::config::LayeredConfig;
use ciqgen_core::listing::{delete_file, list_files};
use dialoguer::Confirm;
use std::path::PathBuf;

use crate::cli::{FilesArgs, FilesCommand};
use crate::output::OutputWriter;
use crate::output_types::FileRow;

pub fn execute(args: FilesArgs, config: LayeredConfig, writer: &OutputWriter) -> Result<()> {
    match args.command {
        FilesCommand::List { dir } => {
            let dir = dir.unwrap_or_else(|| config.log_dir.value.clone());
            list(&dir, writer)
        }
        FilesCommand::Delete { name, dir, yes } => {
            let dir = dir.unwrap_or_else(|| config.log_dir.value.clone());
            delete(&dir, &name, yes, writer)
        }
    }
}

fn list(dir: &std::path::Path, writer: &OutputWriter) -> Result<()> {
    let files = list_files(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let rows: Vec<FileRow> = files
        .into_iter()
        .map(|f| FileRow {
            name: f.name,
            size: f.size,
            modified: f.modified,
        })
        .collect();

    if !writer.is_json() {
        writer.info(format!("{} file(s) in {}", rows.len(), dir.display()));
    }
    writer.table(rows);
    Ok(())
}

fn delete(dir: &std::path::Path, name: &str, yes: bool, writer: &OutputWriter) -> Result<()> {
    if !yes && !writer.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", dir.join(name).display()))
            .default(false)
            .interact()?;
        if !confirmed {
            writer.info("Aborted");
            return Ok(());
        }
    }

    let path: PathBuf = delete_file(dir, name)
        .with_context(|| format!("Failed to delete {}", name))?;
    writer.success(format!("Deleted {}", path.display()));
    Ok(())
}
