use anyhow::Result;
use regex::{Captures, Regex};
use scraper::{Html, Selector};

use crate::transcript::http::PageFetcher;

/// Downloads a caption track and renders it as alternating timestamp / text lines.
pub struct TranscriptDownloader<F> {
    fetcher: F,
    ignore_list: Vec<String>,
    entity: Regex,
    entry: Selector,
}

impl<F: PageFetcher> TranscriptDownloader<F> {
    pub fn new(fetcher: F, ignore_list: &[String]) -> Result<Self> {
        let entity = Regex::new(r"&#([0-9]{1,3});")?;
        let entry = Selector::parse("transcript text")
            .map_err(|e| anyhow::anyhow!("Invalid caption selector: {:?}", e))?;
        Ok(Self {
            fetcher,
            ignore_list: ignore_list.to_vec(),
            entity,
            entry,
        })
    }

    /// Fetch and normalize the caption track. Returns an empty string on failure.
    pub fn download(&self, url: &str) -> String {
        match self.fetcher.get_text(url) {
            Ok(markup) => self.render(&markup),
            Err(e) => {
                tracing::error!("Failed to download transcript: {:#}", e);
                String::new()
            }
        }
    }

    /// Render caption markup into transcript text, dropping ignore-listed entries.
    pub fn render(&self, markup: &str) -> String {
        let document = Html::parse_document(markup);
        let mut transcript = String::new();

        for element in document.select(&self.entry) {
            let raw: String = element.text().collect();
            let text = decode_numeric_entities(&self.entity, &raw);
            if self.ignore_list.iter().any(|ignored| *ignored == text) {
                continue;
            }

            let start = match element.value().attr("start").map(str::parse::<f64>) {
                Some(Ok(start)) if start.is_finite() => start,
                other => {
                    tracing::warn!(
                        "Caption entry has unusable start {:?}, using 00:00:00",
                        other
                    );
                    0.0
                }
            };

            transcript.push_str(&format_timestamp(start));
            transcript.push('\n');
            transcript.push_str(&text);
            transcript.push('\n');
        }

        transcript
    }
}

/// Format an offset in seconds as `HH:MM:SS`, truncating fractional seconds.
pub fn format_timestamp(start: f64) -> String {
    let start = start.max(0.0);
    let seconds = (start % 60.0).floor() as u64;
    let minutes = ((start / 60.0) % 60.0).floor() as u64;
    let hours = (start / 3600.0).floor() as u64;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Replace `&#NNN;` (one to three digits) with the character it names.
fn decode_numeric_entities(entity: &Regex, text: &str) -> String {
    entity
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
