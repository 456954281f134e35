//! Grouping, artifact naming, and ZIP packaging

use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// One named output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Timestamp embedded in artifact names, taken once per generation call so
/// every file of one run carries the same stamp.
pub fn generation_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Bucket items by key, preserving first-seen group order and in-group item
/// order.
pub fn group_by_key<T, F>(items: Vec<T>, key_of: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> String,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    for item in items {
        let key = key_of(&item);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups
}

/// Write the artifacts into one ZIP archive at `path`.
pub fn write_zip(artifacts: &[Artifact], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for artifact in artifacts {
        writer.start_file(&artifact.name, options)?;
        writer.write_all(artifact.contents.as_bytes())?;
    }
    writer.finish()?;
    debug!(files = artifacts.len(), path = %path.display(), "wrote archive");
    Ok(())
}

/// Write a single artifact as a plain file under `dir`.
pub fn write_text(artifact: &Artifact, dir: &Path) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.name);
    std::fs::write(&path, &artifact.contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_group_by_key_preserves_first_seen_order() {
        let items = vec![("B2", 1), ("B1", 2), ("B2", 3), ("B1", 4)];
        let groups = group_by_key(items, |(k, _)| k.to_string());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B2");
        assert_eq!(groups[0].1, vec![("B2", 1), ("B2", 3)]);
        assert_eq!(groups[1].0, "B1");
        assert_eq!(groups[1].1, vec![("B1", 2), ("B1", 4)]);
    }

    #[test]
    fn test_generation_stamp_shape() {
        let stamp = generation_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
    }

    #[test]
    fn test_write_zip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.zip");
        let artifacts = vec![
            Artifact::new("a.txt", "alpha"),
            Artifact::new("b.txt", "beta"),
        ];
        write_zip(&artifacts, &path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut contents = String::new();
        archive
            .by_name("a.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "alpha");
    }
}
