use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment variable holding the API organization id.
pub const ORG_ENV_VAR: &str = "OPENAI_API_ORGID";
/// Environment variable holding the API key.
pub const KEY_ENV_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub youtube: YoutubeConfig,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub transcripts_dir: PathBuf,
    pub completions_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub watch_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Caption entries whose decoded text equals one of these are dropped.
    pub ignore_list: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Organization id (or set OPENAI_API_ORGID).
    pub organization: String,
    /// API key (or set OPENAI_API_KEY).
    pub api_key: String,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("organization", &self.organization)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// The two secrets required before any summarization can happen.
#[derive(Clone)]
pub struct Credentials {
    pub organization: String,
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("organization", &self.organization)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the config file, falling back to the environment.
    pub fn resolve(config: &OpenAiConfig) -> anyhow::Result<Self> {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        config: &OpenAiConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let pick = |configured: &str, env_var: &str| -> Option<String> {
            if !configured.is_empty() {
                return Some(configured.to_string());
            }
            lookup(env_var).filter(|v| !v.trim().is_empty())
        };

        let organization = pick(&config.organization, ORG_ENV_VAR);
        let api_key = pick(&config.api_key, KEY_ENV_VAR);

        match (organization, api_key) {
            (Some(organization), Some(api_key)) => Ok(Self {
                organization,
                api_key,
            }),
            _ => anyhow::bail!(
                "Missing required credentials. Set {} and {} \
                 (or [openai] organization / api_key in the config file)",
                ORG_ENV_VAR,
                KEY_ENV_VAR
            ),
        }
    }
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            youtube: YoutubeConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

fn default_data_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytchapters")
}

impl Default for StorageConfig {
    fn default() -> Self {
        let root = default_data_root();
        Self {
            transcripts_dir: root.join("transcripts"),
            completions_dir: root.join("completions"),
        }
    }
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            ignore_list: vec!["[Music]".to_string(), "foreign".to_string()],
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4".to_string(),
            timeout_secs: 120,
            organization: String::new(),
            api_key: String::new(),
        }
    }
}

// --- Config loading ---

impl Config {
    /// Load config and return the resolved file path (if any).
    pub fn load_with_path(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        // 1. Check explicit path
        if let Some(p) = path {
            let config = Self::read_file(p)?;
            return Ok((config, Some(p.to_path_buf())));
        }

        // 2. Check beside the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(p) = exe_path.parent().map(|p| p.join("ytchapters.toml")) {
                if p.exists() {
                    let config = Self::read_file(&p)?;
                    return Ok((config, Some(p)));
                }
            }
        }

        // 3. Check platform config directory (e.g. ~/.config/ytchapters/config.toml)
        if let Some(platform_config) = Self::platform_config_path() {
            if platform_config.exists() {
                let config = Self::read_file(&platform_config)?;
                return Ok((config, Some(platform_config)));
            }
        }

        // 4. Fall back to defaults
        tracing::info!("No config file found, using defaults");
        Ok((Config::default(), None))
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_path(path).map(|(config, _)| config)
    }

    /// Where `init-config` writes and where loading looks last.
    pub fn platform_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ytchapters").join("config.toml"))
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Generate a default config file with all fields and inline documentation.
    pub fn generate_default_commented() -> String {
        let storage = StorageConfig::default();
        let escape = |p: &Path| p.to_string_lossy().replace('\\', "\\\\");

        format!(
r#"# ytchapters configuration

[storage]
# Directory holding one cached transcript per video (<video id>.txt).
# Cached transcripts are never refreshed; delete a file to force a re-fetch.
transcripts_dir = "{transcripts_dir}"
# Directory receiving one JSON completion record per summarization attempt.
completions_dir = "{completions_dir}"

[youtube]
# Watch page used to discover the caption track. The video id is appended as ?v=<id>.
watch_url = "https://www.youtube.com/watch"
# Timeout in seconds for each request to YouTube.
timeout_secs = 30
# User agent sent with YouTube requests.
user_agent = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
# Caption entries whose text is exactly one of these are left out of the transcript.
ignore_list = ["[Music]", "foreign"]

[openai]
# Chat completions endpoint.
endpoint = "https://api.openai.com/v1/chat/completions"
# Model used to propose chapters.
model = "gpt-4"
# Timeout in seconds for the chat completion request.
timeout_secs = 120
# Organization id (or set OPENAI_API_ORGID environment variable).
# organization = ""
# API key (or set OPENAI_API_KEY environment variable).
# api_key = ""
"#,
            transcripts_dir = escape(&storage.transcripts_dir),
            completions_dir = escape(&storage.completions_dir),
        )
    }
}
