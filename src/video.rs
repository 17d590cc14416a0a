use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VideoIdError {
    #[error("video id is empty")]
    Empty,

    #[error("invalid video id {0:?}: it must not contain path separators, '..' or whitespace")]
    UnsafeCharacters(String),

    #[error("no video id found in URL {0}")]
    NoIdInUrl(String),
}

/// Opaque YouTube video identifier, also used as a cache key and filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn checked(id: &str) -> Result<Self, VideoIdError> {
        if id.is_empty() {
            return Err(VideoIdError::Empty);
        }
        if id.contains(&['/', '\\'][..]) || id.contains("..") || id.chars().any(char::is_whitespace) {
            return Err(VideoIdError::UnsafeCharacters(id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Pull the id out of a watch, short or embed URL.
    fn from_url(url: &url::Url) -> Result<Self, VideoIdError> {
        let host = url.host_str().unwrap_or_default();
        let id = if host == "youtu.be" {
            url.path_segments().and_then(|mut s| s.next()).map(str::to_string)
        } else if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            Some(v.into_owned())
        } else {
            url.path_segments().and_then(|segments| {
                let segments: Vec<&str> = segments.collect();
                match segments.as_slice() {
                    ["embed" | "shorts" | "live", id, ..] => Some(id.to_string()),
                    _ => None,
                }
            })
        };

        match id {
            Some(id) if !id.is_empty() => Self::checked(&id),
            _ => Err(VideoIdError::NoIdInUrl(url.to_string())),
        }
    }
}

impl FromStr for VideoId {
    type Err = VideoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let looks_like_url = input.starts_with("http://")
            || input.starts_with("https://")
            || input.contains("youtube.com/")
            || input.contains("youtu.be/");

        if looks_like_url {
            let with_scheme = if input.contains("://") {
                input.to_string()
            } else {
                format!("https://{}", input)
            };
            if let Ok(url) = url::Url::parse(&with_scheme) {
                return Self::from_url(&url);
            }
        }

        Self::checked(input)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
