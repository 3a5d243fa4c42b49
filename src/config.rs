//! Pipeline configuration.
//!
//! Every setting has a default; [`PipelineConfig::from_env`] overrides them
//! from `VERITAS_*` variables and detects which external capabilities
//! (likelihood detector, reasoning service) have credentials.

use std::env;
use std::path::PathBuf;

use crate::llm::Provider;

/// Where the knowledge base catalogs live.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeConfig {
    /// `{"trusted_sources": [...]}` document
    pub sources_path: PathBuf,
    /// `{"claim_reviews": [...]}` document
    pub claims_path: PathBuf,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            sources_path: PathBuf::from("data/trusted_sources.json"),
            claims_path: PathBuf::from("data/claim_reviews.json"),
        }
    }
}

/// Citation proximity settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityConfig {
    /// Page fetch timeout
    pub fetch_timeout_secs: u64,
    /// Chunks shorter than this (in characters) are navigation noise
    pub min_chunk_chars: usize,
    /// Context handed to the reasoning service, in characters
    pub context_budget_chars: usize,
    /// User agent sent with page fetches
    pub user_agent: String,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 5,
            min_chunk_chars: 50,
            context_budget_chars: 3000,
            user_agent: concat!("veritas-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProximityConfig {
    pub fn with_fetch_timeout(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_min_chunk_chars(mut self, chars: usize) -> Self {
        self.min_chunk_chars = chars;
        self
    }

    pub fn with_context_budget(mut self, chars: usize) -> Self {
        self.context_budget_chars = chars;
        self
    }
}

/// Credentials and limits for the optional reasoning service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningConfig {
    pub provider: Provider,
    pub api_key: String,
    /// Model override (provider default when unset)
    pub model: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Hard limit for one judgement
    pub timeout_secs: u64,
}

impl ReasoningConfig {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: None,
            base_url: None,
            timeout_secs: 15,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Top-level configuration for [`TrustPipeline`](crate::TrustPipeline).
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub knowledge: KnowledgeConfig,
    pub proximity: ProximityConfig,
    /// `None` keeps proximity scoring on the lexical heuristic
    pub reasoning: Option<ReasoningConfig>,
    /// False when the upstream likelihood detector has no credentials;
    /// every request is then scored as degraded
    pub detector_available: bool,
    /// Raise the score when a source is named but never linked
    pub penalize_unlinked_citations: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            knowledge: KnowledgeConfig::default(),
            proximity: ProximityConfig::default(),
            reasoning: None,
            detector_available: true,
            penalize_unlinked_citations: true,
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let knowledge = KnowledgeConfig {
            sources_path: env_path("VERITAS_SOURCES_PATH")
                .unwrap_or(defaults.knowledge.sources_path),
            claims_path: env_path("VERITAS_CLAIMS_PATH").unwrap_or(defaults.knowledge.claims_path),
        };

        let proximity = ProximityConfig {
            fetch_timeout_secs: env_parse("VERITAS_FETCH_TIMEOUT_SECS")
                .unwrap_or(defaults.proximity.fetch_timeout_secs),
            min_chunk_chars: env_parse("VERITAS_MIN_CHUNK_CHARS")
                .unwrap_or(defaults.proximity.min_chunk_chars),
            context_budget_chars: env_parse("VERITAS_CONTEXT_BUDGET_CHARS")
                .unwrap_or(defaults.proximity.context_budget_chars),
            user_agent: defaults.proximity.user_agent,
        };

        Self {
            knowledge,
            proximity,
            reasoning: reasoning_from_env(),
            detector_available: env_nonempty("HUGGINGFACE_API_KEY").is_some(),
            penalize_unlinked_citations: env::var("VERITAS_PENALIZE_UNLINKED_CITATIONS")
                .map(|s| parse_flag(&s))
                .unwrap_or(true),
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeConfig) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_proximity(mut self, proximity: ProximityConfig) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn with_reasoning(mut self, reasoning: ReasoningConfig) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    pub fn with_detector_available(mut self, available: bool) -> Self {
        self.detector_available = available;
        self
    }

    pub fn with_unlinked_citation_penalty(mut self, enabled: bool) -> Self {
        self.penalize_unlinked_citations = enabled;
        self
    }
}

fn reasoning_from_env() -> Option<ReasoningConfig> {
    let (provider, key) = env_nonempty("ANTHROPIC_API_KEY")
        .map(|k| (Provider::Anthropic, k))
        .or_else(|| env_nonempty("OPENAI_API_KEY").map(|k| (Provider::OpenAI, k)))?;

    let mut config = ReasoningConfig::new(provider, key);
    config.model = env_nonempty("VERITAS_REASONING_MODEL");
    config.base_url = env_nonempty("VERITAS_REASONING_BASE_URL");
    if let Some(secs) = env_parse("VERITAS_REASONING_TIMEOUT_SECS") {
        config.timeout_secs = secs;
    }
    Some(config)
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_nonempty(key).and_then(|s| s.trim().parse().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_nonempty(key).map(|raw| PathBuf::from(shellexpand::tilde(&raw).into_owned()))
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw != "0" && !raw.eq_ignore_ascii_case("false")
}
