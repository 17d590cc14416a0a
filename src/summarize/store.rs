use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::summarize::llm::CompletionRecord;

/// Append-only directory of completion records, one JSON file per attempt.
#[derive(Debug, Clone)]
pub struct CompletionStore {
    root: PathBuf,
}

impl CompletionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist the record as `<epoch millis>-<video id>.json`.
    pub fn save(&self, video_id: &str, record: &CompletionRecord) -> Result<PathBuf> {
        self.save_at(video_id, record, chrono::Utc::now().timestamp_millis())
    }

    pub fn save_at(
        &self,
        video_id: &str,
        record: &CompletionRecord,
        epoch_millis: i64,
    ) -> Result<PathBuf> {
        let path = self.root.join(format!("{}-{}.json", epoch_millis, video_id));
        let content = serde_json::to_string_pretty(record)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn record(content: &str) -> CompletionRecord {
        let mut headers = BTreeMap::new();
        headers.insert("x-request-id".to_string(), vec!["req_1".to_string()]);
        CompletionRecord {
            data: serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }),
            headers,
        }
    }

    #[test]
    fn test_save_names_file_by_time_and_id() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path());
        let path = store.save_at("abc", &record("x"), 1_700_000_000_000).unwrap();
        assert_eq!(path, tmp.path().join("1700000000000-abc.json"));
    }

    #[test]
    fn test_repeated_attempts_produce_distinct_readable_files() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path());
        let first_record = record("00:00:00 Intro");
        let second_record = record("00:00:00 Welcome");

        let first = store.save_at("abc", &first_record, 1000).unwrap();
        let second = store.save_at("abc", &second_record, 2000).unwrap();
        assert_ne!(first, second);

        let read_first: CompletionRecord =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        let read_second: CompletionRecord =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(read_first, first_record);
        assert_eq!(read_second, second_record);
    }

    #[test]
    fn test_saved_json_is_pretty_printed() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path());
        let path = store.save_at("abc", &record("x"), 1).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("{\n  \"data\""));
        assert!(content.contains("\"headers\""));
    }

    #[test]
    fn test_existing_record_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path());
        let path = store.save_at("abc", &record("first"), 42).unwrap();
        assert!(store.save_at("abc", &record("second"), 42).is_err());
        let kept: CompletionRecord =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(kept.chapters_text(), Some("first"));
    }

    #[test]
    fn test_save_uses_current_time() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path());
        let before = chrono::Utc::now().timestamp_millis();
        let path = store.save("abc", &record("x")).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let millis: i64 = name.trim_end_matches("-abc.json").parse().unwrap();
        assert!(millis >= before);
    }

    #[test]
    fn test_save_into_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let store = CompletionStore::new(tmp.path().join("gone"));
        assert!(store.save_at("abc", &record("x"), 1).is_err());
    }
}
