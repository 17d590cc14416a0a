use std::path::PathBuf;

use crate::summarize::llm::{ChatCompletion, CompletionRecord, LlmError};
use crate::summarize::prompt;
use crate::summarize::store::CompletionStore;
use crate::transcript::Transcript;

/// Asks the model for chapters and stores whatever comes back.
pub struct ChapterSummarizer<'a, C: ?Sized> {
    llm: &'a C,
    model: String,
    store: CompletionStore,
}

/// Outcome of one summarization attempt.
#[derive(Debug)]
pub struct Summary {
    pub record: CompletionRecord,
    pub path: PathBuf,
}

impl<'a, C: ChatCompletion + ?Sized> ChapterSummarizer<'a, C> {
    pub fn new(llm: &'a C, model: &str, store: CompletionStore) -> Self {
        Self {
            llm,
            model: model.to_string(),
            store,
        }
    }

    /// Request chapters for the transcript. Returns `None` for an empty transcript
    /// or when the request or the write fails; failures are logged, never raised.
    pub fn summarize(&self, transcript: &Transcript) -> Option<Summary> {
        if transcript.is_empty() {
            tracing::info!("Transcript for video {} is empty, skipping summary", transcript.id);
            return None;
        }

        let request = prompt::build_request(&self.model, &transcript.text);
        let record = match self.llm.complete(&request) {
            Ok(record) => record,
            Err(LlmError::Api { status, body }) => {
                tracing::error!(
                    "OpenAI API error for video {} (HTTP {}): {}",
                    transcript.id,
                    status,
                    body
                );
                return None;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to summarize transcript for video {}: {:#}",
                    transcript.id,
                    e
                );
                return None;
            }
        };

        match self.store.save(&transcript.id, &record) {
            Ok(path) => {
                tracing::info!("Summary written to {}", path.display());
                Some(Summary { record, path })
            }
            Err(e) => {
                tracing::error!(
                    "Failed to write completion for video {}: {:#}",
                    transcript.id,
                    e
                );
                None
            }
        }
    }
}
