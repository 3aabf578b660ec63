use crate::SearchMode;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Top-level collector configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub serper: SerperConfig,
    pub groq: GroqConfig,
    pub filter: FilterConfig,
    pub collect: CollectConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Serper search API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SerperConfig {
    pub endpoint: String,
    /// Google `gl` parameter.
    pub country: String,
    /// Google `hl` parameter.
    pub language: String,
    pub per_page: usize,
    pub timeout_secs: u64,
}

/// Groq chat-completions settings used by the SEO classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    pub endpoint: String,
    pub model: String,
    pub batch_size: usize,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub enabled: bool,
}

/// Thresholds for the URL filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub max_per_domain: usize,
    pub strict: bool,
    pub brand_min_score: i32,
    pub ranked_min_score: i32,
    pub ranked_top: Option<usize>,
}

/// Defaults for a collection run; CLI flags override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    pub num_results: usize,
    pub concurrency: usize,
    pub mode: SearchMode,
}

// --- Default ---

impl Default for SerperConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev/search".to_owned(),
            country: "kr".to_owned(),
            language: "ko".to_owned(),
            per_page: 10,
            timeout_secs: 15,
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_owned(),
            model: "meta-llama/llama-4-scout-17b-16e-instruct".to_owned(),
            batch_size: 20,
            max_tokens: 300,
            timeout_secs: 30,
            enabled: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_per_domain: 50,
            strict: false,
            brand_min_score: 50,
            ranked_min_score: 0,
            ranked_top: None,
        }
    }
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self { num_results: 100, concurrency: 1, mode: SearchMode::Article }
    }
}
