pub mod cache;
pub mod downloader;
pub mod http;
pub mod resolver;
pub mod service;

/// A video's normalized transcript. Empty `text` means no transcript is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub id: String,
    pub text: String,
}

impl Transcript {
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
