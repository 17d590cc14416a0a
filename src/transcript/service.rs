use crate::transcript::cache::TranscriptCache;
use crate::transcript::downloader::TranscriptDownloader;
use crate::transcript::http::PageFetcher;
use crate::transcript::resolver::CaptionTrackResolver;
use crate::transcript::Transcript;

/// Read-through transcript lookup: cache first, then resolve and download.
///
/// Never fails. Anything that goes wrong along the way yields an empty transcript.
pub struct TranscriptService<R, F> {
    cache: TranscriptCache,
    resolver: R,
    downloader: TranscriptDownloader<F>,
}

impl<R: CaptionTrackResolver, F: PageFetcher> TranscriptService<R, F> {
    pub fn new(cache: TranscriptCache, resolver: R, downloader: TranscriptDownloader<F>) -> Self {
        Self {
            cache,
            resolver,
            downloader,
        }
    }

    pub fn get_transcript(&self, video_id: &str) -> Transcript {
        if let Some(text) = self.cache.get(video_id) {
            return Transcript {
                id: video_id.to_string(),
                text,
            };
        }
        tracing::info!("No cached transcript found for video {}. Fetching...", video_id);

        let Some(url) = self.resolver.resolve(video_id) else {
            return Transcript::empty(video_id);
        };

        let text = self.downloader.download(&url);
        if text.is_empty() {
            tracing::warn!("Transcript for video {} is empty", video_id);
            return Transcript::empty(video_id);
        }

        if let Err(e) = self.cache.put(video_id, &text) {
            tracing::error!("Failed to cache transcript for video {}: {:#}", video_id, e);
        }

        Transcript {
            id: video_id.to_string(),
            text,
        }
    }
}
