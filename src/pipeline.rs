use anyhow::Result;

use crate::config::Config;
use crate::summarize::llm::ChatCompletion;
use crate::summarize::store::CompletionStore;
use crate::summarize::summarizer::{ChapterSummarizer, Summary};
use crate::transcript::cache::TranscriptCache;
use crate::transcript::downloader::TranscriptDownloader;
use crate::transcript::http::{HttpFetcher, PageFetcher};
use crate::transcript::resolver::{CaptionTrackResolver, WatchPageResolver};
use crate::transcript::service::TranscriptService;

pub type YoutubeTranscriptService = TranscriptService<WatchPageResolver<HttpFetcher>, HttpFetcher>;

/// Wire the transcript service against YouTube using the configured storage root.
pub fn build_transcript_service(config: &Config) -> Result<YoutubeTranscriptService> {
    let fetcher = HttpFetcher::from_config(&config.youtube)?;
    let resolver = WatchPageResolver::new(fetcher.clone(), &config.youtube.watch_url)?;
    let downloader = TranscriptDownloader::new(fetcher, &config.youtube.ignore_list)?;
    let cache = TranscriptCache::new(&config.storage.transcripts_dir);
    Ok(TranscriptService::new(cache, resolver, downloader))
}

pub fn build_summarizer<'a, C: ChatCompletion + ?Sized>(
    config: &Config,
    llm: &'a C,
) -> ChapterSummarizer<'a, C> {
    ChapterSummarizer::new(
        llm,
        &config.openai.model,
        CompletionStore::new(&config.storage.completions_dir),
    )
}

/// Transcript, then chapters, for one video. Each stage finishes before the next starts.
pub fn run<R, F, C>(
    transcripts: &TranscriptService<R, F>,
    summarizer: &ChapterSummarizer<'_, C>,
    video_id: &str,
) -> Option<Summary>
where
    R: CaptionTrackResolver,
    F: PageFetcher,
    C: ChatCompletion + ?Sized,
{
    let transcript = transcripts.get_transcript(video_id);
    if transcript.is_empty() {
        tracing::warn!("No transcript available for video {}", video_id);
    } else {
        tracing::info!(
            "Transcript for video {} has {} lines",
            video_id,
            transcript.text.lines().count()
        );
    }
    summarizer.summarize(&transcript)
}
