//! Output-directory listing and guarded deletion
//!
//! Backs the `files` subcommands: the generated-script folders are browsed
//! and cleaned from the CLI instead of over a shell on the host.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CiqgenError, Result};

/// One file entry: name, human-readable size, modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size: String,
    pub modified: String,
}

/// Render a byte count as bytes/KB/MB/GB with two decimals above bytes.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{} bytes", bytes)
    } else if b < MB {
        format!("{:.2} KB", b / KB)
    } else if b < GB {
        format!("{:.2} MB", b / MB)
    } else {
        format!("{:.2} GB", b / GB)
    }
}

/// List regular files in `dir` sorted by name. Subdirectories are skipped.
pub fn list_files(dir: &Path) -> Result<Vec<FileInfo>> {
    if !dir.is_dir() {
        return Err(CiqgenError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let modified: DateTime<Local> = metadata.modified()?.into();
        files.push(FileInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: human_size(metadata.len()),
            modified: modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Delete `name` inside `dir`. The name must be a bare file name; anything
/// with path components is refused so callers cannot reach outside the
/// managed folder.
pub fn delete_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let is_bare = Path::new(name)
        .components()
        .try_fold(0usize, |n, c| match c {
            std::path::Component::Normal(_) => Some(n + 1),
            _ => None,
        })
        == Some(1);
    if !is_bare {
        return Err(CiqgenError::UnsafeFileName {
            name: name.to_string(),
        });
    }

    let path = dir.join(name);
    if !path.is_file() {
        return Err(CiqgenError::FileNotFound { path });
    }
    fs::remove_file(&path)?;
    Ok(path)
}
