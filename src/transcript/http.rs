use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::YoutubeConfig;

/// Fetches a URL and returns its body as text.
pub trait PageFetcher {
    fn get_text(&self, url: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn from_config(config: &YoutubeConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;
        response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn get_text(&self, url: &str) -> Result<String> {
        (**self).get_text(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, StubResponse};

    #[test]
    fn test_from_config_builds_client() {
        let config = YoutubeConfig {
            timeout_secs: 1,
            ..Default::default()
        };
        assert!(HttpFetcher::from_config(&config).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_error() {
        let config = YoutubeConfig {
            timeout_secs: 1,
            ..Default::default()
        };
        let fetcher = HttpFetcher::from_config(&config).unwrap();
        // Port 9 on loopback (discard) is not expected to serve HTTP.
        assert!(fetcher.get_text("http://127.0.0.1:9/").is_err());
    }

    #[test]
    fn test_get_text_returns_body_and_sends_user_agent() {
        let (base, requests) = serve_once(StubResponse::new("200 OK", "<html>watch</html>"));
        let config = YoutubeConfig {
            timeout_secs: 5,
            user_agent: "ytchapters-test".to_string(),
            ..Default::default()
        };
        let fetcher = HttpFetcher::from_config(&config).unwrap();

        let body = fetcher.get_text(&format!("{}/watch?v=abc", base)).unwrap();
        assert_eq!(body, "<html>watch</html>");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /watch?v=abc HTTP/1.1\r\n"));
        assert!(request.to_ascii_lowercase().contains("user-agent: ytchapters-test\r\n"));
    }

    #[test]
    fn test_error_status_is_error() {
        let (base, _requests) = serve_once(StubResponse::new("404 Not Found", "gone"));
        let config = YoutubeConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        let fetcher = HttpFetcher::from_config(&config).unwrap();

        let err = fetcher.get_text(&format!("{}/api/timedtext", base)).unwrap_err();
        assert!(format!("{:#}", err).contains("404"));
    }
}
