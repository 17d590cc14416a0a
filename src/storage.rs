use std::path::Path;

use anyhow::{Context, Result};

use crate::config::StorageConfig;

/// Create both storage roots. Failure here is fatal for the caller.
pub fn ensure_directories(config: &StorageConfig) -> Result<()> {
    for dir in [&config.transcripts_dir, &config.completions_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    tracing::debug!(
        "Directories ensured: {}, {}",
        config.transcripts_dir.display(),
        config.completions_dir.display()
    );
    Ok(())
}

/// Returns (file_count, total_bytes) for files in `dir` with the given extension.
pub fn get_storage_stats(dir: &Path, extension: &str) -> Result<(usize, u64)> {
    let mut count = 0;
    let mut bytes = 0;

    if !dir.exists() {
        return Ok((0, 0));
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        if path.extension().map(|e| e == extension).unwrap_or(false) {
            count += 1;
            bytes += entry.metadata()?.len();
        }
    }
    Ok((count, bytes))
}
