//! Upload directory ingestion

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use tweetrag_core::{parse_records, Record};

/// Copy a records file into the upload directory, creating it if needed.
pub fn save_upload(upload_dir: &Path, source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .with_context(|| format!("{} is not a file", source.display()))?;

    fs::create_dir_all(upload_dir)
        .with_context(|| format!("failed to create upload directory {}", upload_dir.display()))?;

    let target = upload_dir.join(file_name);
    info!("Saving file {} to {}", source.display(), target.display());
    fs::copy(source, &target)
        .with_context(|| format!("failed to copy {} into {}", source.display(), upload_dir.display()))?;

    Ok(target)
}

/// Decode every file in the upload directory, in file-name order.
///
/// A missing directory yields no records. Each file must hold a JSON array of records.
pub fn load_upload_dir(upload_dir: &Path) -> Result<Vec<Record>> {
    if !upload_dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(upload_dir)
        .with_context(|| format!("failed to read upload directory {}", upload_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in paths {
        info!("Reading file: {}", path.display());
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = parse_records(&raw).with_context(|| format!("in {}", path.display()))?;
        records.extend(parsed);
    }

    Ok(records)
}
