use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Transcript text cached on disk as `<root>/<video id>.txt`.
#[derive(Debug, Clone)]
pub struct TranscriptCache {
    root: PathBuf,
}

impl TranscriptCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}.txt", video_id))
    }

    /// Cached text for the video, or `None` on a miss.
    ///
    /// Any existing file is a hit; bytes that are not UTF-8 are decoded lossily.
    /// Files that cannot be read at all count as misses.
    pub fn get(&self, video_id: &str) -> Option<String> {
        let path = self.path_for(video_id);
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!("Transcript cache hit: {}", path.display());
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    "Failed to read cached transcript {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Write the transcript to the cache. An entry that already exists is kept as is.
    pub fn put(&self, video_id: &str, text: &str) -> Result<PathBuf> {
        let path = self.path_for(video_id);
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("Transcript already cached at {}", path.display());
                return Ok(path);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        };
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Cached transcript at {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_miss_on_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path());
        assert!(cache.get("abc").is_none());
    }

    #[test]
    fn test_put_then_get() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path());
        let path = cache.put("abc", "00:00:01\nhello\n").unwrap();
        assert_eq!(path, tmp.path().join("abc.txt"));
        assert_eq!(cache.get("abc").as_deref(), Some("00:00:01\nhello\n"));
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn test_put_into_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path().join("does-not-exist"));
        let err = cache.put("abc", "text").unwrap_err();
        assert!(format!("{:#}", err).contains("abc.txt"));
    }

    #[test]
    fn test_put_keeps_existing_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path());
        cache.put("abc", "00:00:00\nfirst\n").unwrap();
        let path = cache.put("abc", "00:00:00\nsecond\n").unwrap();
        assert_eq!(path, tmp.path().join("abc.txt"));
        assert_eq!(cache.get("abc").as_deref(), Some("00:00:00\nfirst\n"));
    }

    #[test]
    fn test_non_utf8_entry_is_hit() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path());
        std::fs::write(tmp.path().join("abc.txt"), b"00:00:00\ncaf\xe9 cached\n").unwrap();
        assert_eq!(
            cache.get("abc").as_deref(),
            Some("00:00:00\ncaf\u{FFFD} cached\n")
        );
    }

    #[test]
    fn test_unreadable_entry_is_miss() {
        let tmp = TempDir::new().unwrap();
        let cache = TranscriptCache::new(tmp.path());
        // A directory where the file should be cannot be read as text.
        std::fs::create_dir(tmp.path().join("abc.txt")).unwrap();
        assert!(cache.get("abc").is_none());
    }
}
