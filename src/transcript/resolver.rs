use anyhow::{Context, Result};
use regex::Regex;

use crate::transcript::http::PageFetcher;

/// Pattern preceding the first caption track inside the watch page's embedded player data.
const CAPTION_TRACK_PATTERN: &str =
    r#"playerCaptionsTracklistRenderer":\{"captionTracks":\[\{"baseUrl":"(.*?)","#;

/// Turns a video id into a fetchable caption track URL.
pub trait CaptionTrackResolver {
    /// Returns `None` when no caption track could be found. Never fails.
    fn resolve(&self, video_id: &str) -> Option<String>;
}

/// Scrapes the public watch page for the first caption track's base URL.
pub struct WatchPageResolver<F> {
    fetcher: F,
    watch_url: String,
    pattern: Regex,
}

impl<F: PageFetcher> WatchPageResolver<F> {
    pub fn new(fetcher: F, watch_url: &str) -> Result<Self> {
        let pattern = Regex::new(CAPTION_TRACK_PATTERN).context("Invalid caption track pattern")?;
        Ok(Self {
            fetcher,
            watch_url: watch_url.to_string(),
            pattern,
        })
    }

    fn page_url(&self, video_id: &str) -> Result<String> {
        let url = url::Url::parse_with_params(&self.watch_url, &[("v", video_id)])
            .with_context(|| format!("Invalid watch URL: {}", self.watch_url))?;
        Ok(url.into())
    }

    fn fetch_caption_url(&self, video_id: &str) -> Result<Option<String>> {
        let page_url = self.page_url(video_id)?;
        let html = self.fetcher.get_text(&page_url)?;
        Ok(extract_caption_url(&self.pattern, &html))
    }
}

impl<F: PageFetcher> CaptionTrackResolver for WatchPageResolver<F> {
    fn resolve(&self, video_id: &str) -> Option<String> {
        match self.fetch_caption_url(video_id) {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::warn!("No caption track found on watch page for video {}", video_id);
                None
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch transcript URL for video {}: {:#}",
                    video_id,
                    e
                );
                None
            }
        }
    }
}

/// Pull the first caption track URL out of the page, undoing the page's `&` escaping.
fn extract_caption_url(pattern: &Regex, html: &str) -> Option<String> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace("\\u0026", "&"))
}
