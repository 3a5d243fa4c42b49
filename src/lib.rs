//! # veritas-core
//!
//! A content-trust pipeline: decides whether a text passage cites a trusted
//! source credibly, whether the cited page supports it, whether it
//! contradicts a catalog of known facts, and how much confidence to place in
//! the AI-likelihood verdict it arrived with.
//!
//! ## Core Components
//!
//! - **Knowledge**: trusted source and claim review catalogs
//! - **Source**: strong (URL) and weak (name only) source matching
//! - **Proximity**: fetch the cited page and score support for the passage
//! - **Claims**: topic rules for contradictions and known hallucinations
//! - **Confidence**: meta-confidence in a likelihood verdict
//! - **Orchestrator**: the [`TrustPipeline`] tying the stages together
//!
//! ## Example
//!
//! ```rust,ignore
//! use veritas_core::{LikelihoodReport, SourceType, TrustPipeline, VerificationRequest};
//!
//! let pipeline = TrustPipeline::from_env()?;
//! let request = VerificationRequest::new(
//!     "The earth is flat and not a sphere.",
//!     LikelihoodReport::new(12.0, SourceType::Text),
//! )?;
//! let response = pipeline.verify(&request).await;
//! println!("{} ({}), confidence {}", response.verdict, response.score, response.details.confidence);
//! ```

pub mod claims;
pub mod confidence;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod likelihood;
pub mod llm;
pub mod markers;
pub mod orchestrator;
pub mod proximity;
pub mod source;

// Re-exports for convenience
pub use claims::{ClaimDecision, ClaimDetector, FactVerdict, RuleRegistry, ScoreBand, TopicRule};
pub use confidence::{calculate_confidence, ConfidenceDetails, ConfidenceInput, SourceType};
pub use config::{KnowledgeConfig, PipelineConfig, ProximityConfig, ReasoningConfig};
pub use error::{Error, Result};
pub use knowledge::{ClaimReview, ClaimTopic, KnowledgeBase, TrustedSource};
pub use likelihood::{default_verdict, LikelihoodReport};
pub use llm::{AnthropicClient, ClientConfig, LLMClient, OpenAIClient, Provider};
pub use markers::extract_ai_markers;
pub use orchestrator::{
    ResponseDetails, TrustPipeline, VerificationRequest, VerificationResponse, VerificationResult,
};
pub use proximity::{
    HttpPageFetcher, LlmReasoningService, PageFetcher, ProximityOutcome, ProximityVerifier,
    ReasoningService, SupportJudgement,
};
pub use source::{match_sources, SourceMatch};
