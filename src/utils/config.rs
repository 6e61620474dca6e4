//! TOML-based configuration for Lumen.
//!
//! Declarative configuration for the server, the research agents, and the
//! history store via a TOML file (`lumen.toml`). Every field has a default,
//! so a missing file yields a fully usable configuration. API keys are
//! never stored in the file; each agent section names the environment
//! variable that carries its key.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{AppError, Result};

/// Root configuration structure loaded from lumen.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LumenConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Research history storage settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Per-agent settings.
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl LumenConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            AppError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from an optional path; `None` or a missing file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

// ============= Server Configuration =============

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= History Configuration =============

/// Research history storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// JSON file the history is persisted to; in-memory only when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Oldest entries are evicted beyond this count.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: default_max_entries(),
        }
    }
}

// ============= Agent Configuration =============

/// Per-agent settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Web-search/LLM-summarization agent.
    #[serde(default)]
    pub search: SearchAgentConfig,

    /// Video-platform metadata agent.
    #[serde(default)]
    pub video: VideoAgentConfig,

    /// Academic/news agent.
    #[serde(default)]
    pub scholar: ScholarAgentConfig,
}

/// Settings for the web-search agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAgentConfig {
    /// Whether the agent is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Environment variable containing the API key.
    #[serde(default = "default_search_key_env")]
    pub api_key_env: String,

    /// API base URL.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Model to request.
    #[serde(default = "default_search_model")]
    pub model: String,

    /// Completion token budget.
    #[serde(default = "default_search_max_tokens")]
    pub max_tokens: u32,

    /// Default per-request source budget.
    #[serde(default = "default_search_max_sources")]
    pub max_sources: usize,
}

fn default_true() -> bool {
    true
}

fn default_search_key_env() -> String {
    "SEARCH_API_KEY".to_string()
}

fn default_search_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_search_model() -> String {
    "sonar-pro".to_string()
}

fn default_search_max_tokens() -> u32 {
    1024
}

fn default_search_max_sources() -> usize {
    10
}

impl Default for SearchAgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: default_search_key_env(),
            base_url: default_search_base_url(),
            model: default_search_model(),
            max_tokens: default_search_max_tokens(),
            max_sources: default_search_max_sources(),
        }
    }
}

/// Settings for the video-platform agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAgentConfig {
    /// Whether the agent is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Environment variable containing the API key.
    #[serde(default = "default_video_key_env")]
    pub api_key_env: String,

    /// API base URL.
    #[serde(default = "default_video_base_url")]
    pub base_url: String,

    /// Default per-request source budget.
    #[serde(default = "default_video_max_sources")]
    pub max_sources: usize,
}

fn default_video_key_env() -> String {
    "VIDEO_API_KEY".to_string()
}

fn default_video_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_video_max_sources() -> usize {
    5
}

impl Default for VideoAgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: default_video_key_env(),
            base_url: default_video_base_url(),
            max_sources: default_video_max_sources(),
        }
    }
}

/// Settings for the academic/news agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarAgentConfig {
    /// Whether the agent is registered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// arXiv API base URL; needs no key.
    #[serde(default = "default_arxiv_base_url")]
    pub arxiv_base_url: String,

    /// News API base URL.
    #[serde(default = "default_news_base_url")]
    pub news_base_url: String,

    /// Environment variable containing the news API key.
    #[serde(default = "default_news_key_env")]
    pub news_api_key_env: String,

    /// Default per-request source budget.
    #[serde(default = "default_scholar_max_sources")]
    pub max_sources: usize,
}

fn default_arxiv_base_url() -> String {
    "http://export.arxiv.org/api".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_key_env() -> String {
    "NEWS_API_KEY".to_string()
}

fn default_scholar_max_sources() -> usize {
    10
}

impl Default for ScholarAgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            arxiv_base_url: default_arxiv_base_url(),
            news_base_url: default_news_base_url(),
            news_api_key_env: default_news_key_env(),
            max_sources: default_scholar_max_sources(),
        }
    }
}
