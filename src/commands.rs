use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{Config, StorageConfig};

/// Show what is stored in the transcript cache and the completion directory.
pub fn show_status(storage: &StorageConfig) -> Result<()> {
    let (transcripts, transcript_bytes) =
        crate::storage::get_storage_stats(&storage.transcripts_dir, "txt")?;
    let (completions, completion_bytes) =
        crate::storage::get_storage_stats(&storage.completions_dir, "json")?;

    println!("ytchapters status:");
    println!("  Transcripts dir:   {}", storage.transcripts_dir.display());
    println!("  Cached transcripts: {} ({:.1} KB)", transcripts, transcript_bytes as f64 / 1024.0);
    println!("  Completions dir:   {}", storage.completions_dir.display());
    println!("  Completion records: {} ({:.1} KB)", completions, completion_bytes as f64 / 1024.0);

    Ok(())
}

/// Write the commented default config to `path`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, Config::generate_default_commented())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
