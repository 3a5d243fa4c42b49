//! Verification orchestrator.
//!
//! Runs one passage through source matching, citation proximity, claim
//! detection, and confidence scoring, and assembles the response. Every
//! failure inside a stage is absorbed there; [`TrustPipeline::verify`] always
//! returns a complete response.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::claims::{ClaimDecision, ClaimDetector, FactVerdict, RuleRegistry};
use crate::config::PipelineConfig;
use crate::confidence::{calculate_confidence, ConfidenceDetails, ConfidenceInput};
use crate::error::{Error, Result};
use crate::knowledge::{KnowledgeBase, TrustedSource};
use crate::likelihood::LikelihoodReport;
use crate::markers::extract_ai_markers;
use crate::proximity::{
    HttpPageFetcher, LlmReasoningService, PageFetcher, ProximityVerifier, ReasoningService,
};
use crate::source::{match_sources, SourceMatch};

const NO_SOURCE_MESSAGE: &str = "No trusted source cited.";
const UNLINKED_SOURCE_MESSAGE: &str = "Source named without a link; nothing to verify.";

/// A passage plus the likelihood already computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub text: String,
    pub likelihood: LikelihoodReport,
}

impl VerificationRequest {
    /// Trim `text` and reject it if nothing is left.
    pub fn new(text: impl Into<String>, likelihood: LikelihoodReport) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::InvalidInput("text must not be empty".to_string()));
        }
        Ok(Self { text, likelihood })
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Trust signals for one passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_trusted: bool,
    pub matched_source: Option<TrustedSource>,
    pub citation_missing_warning: Option<String>,
    /// `None` until a proximity check produced a score
    pub proximity_score: Option<f64>,
    pub verification_message: String,
    pub fact_check_warning: Option<String>,
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self {
            is_trusted: false,
            matched_source: None,
            citation_missing_warning: None,
            proximity_score: None,
            verification_message: NO_SOURCE_MESSAGE.to_string(),
            fact_check_warning: None,
        }
    }
}

impl VerificationResult {
    fn from_source_match(source_match: SourceMatch) -> Self {
        let verification_message = if source_match.is_weak_only() {
            UNLINKED_SOURCE_MESSAGE
        } else {
            NO_SOURCE_MESSAGE
        };
        Self {
            is_trusted: source_match.is_trusted,
            matched_source: source_match.matched_source,
            citation_missing_warning: source_match.citation_missing_warning,
            verification_message: verification_message.to_string(),
            ..Self::default()
        }
    }

    /// Fold a claim decision into the trust signals.
    fn apply_decision(&mut self, decision: &ClaimDecision) {
        if decision.is_trusted() {
            self.is_trusted = true;
            self.citation_missing_warning = None;
            if let Some(source) = &decision.confirmed_source {
                self.matched_source = Some(source.clone());
            }
            if self.proximity_score.is_none() {
                if let Some(confirmation) = &decision.confirmation {
                    self.verification_message = confirmation.clone();
                }
            }
        } else {
            self.fact_check_warning = decision.warning.clone();
        }
    }
}

/// Fields under `details` in a [`VerificationResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDetails {
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check_warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_score: Option<f64>,
    pub verification_msg: String,
    /// 1-100
    pub confidence: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ai_markers: Vec<String>,
}

/// Final verdict record for the serving layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub score: f64,
    pub verdict: String,
    pub trusted_source_match: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_source: Option<TrustedSource>,
    pub details: ResponseDetails,
}

/// Trust signals plus the claim decision that shaped them.
struct Assessment {
    result: VerificationResult,
    decision: Option<ClaimDecision>,
}

/// The content-trust pipeline.
///
/// Holds only read-only state, so one instance can serve concurrent
/// requests.
pub struct TrustPipeline {
    kb: Arc<KnowledgeBase>,
    config: PipelineConfig,
    verifier: ProximityVerifier,
    detector: ClaimDetector,
}

impl TrustPipeline {
    /// Build a pipeline over `kb`.
    ///
    /// A reasoning service that cannot be constructed is logged and left out;
    /// proximity then uses the heuristic only.
    pub fn new(kb: impl Into<Arc<KnowledgeBase>>, config: PipelineConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpPageFetcher::new(&config.proximity)?);
        let mut verifier = ProximityVerifier::new(fetcher, config.proximity.clone());

        if let Some(reasoning) = &config.reasoning {
            match LlmReasoningService::from_config(reasoning) {
                Ok(service) => {
                    info!(provider = %reasoning.provider, "Reasoning service enabled");
                    verifier = verifier.with_reasoning(Arc::new(service));
                }
                Err(e) => warn!("Reasoning service unavailable, using heuristic: {}", e),
            }
        }

        Ok(Self {
            kb: kb.into(),
            config,
            verifier,
            detector: ClaimDetector::default(),
        })
    }

    /// Load configuration and the knowledge base from the environment.
    pub fn from_env() -> Result<Self> {
        let config = PipelineConfig::from_env();
        let kb = KnowledgeBase::load(&config.knowledge);
        if !config.detector_available {
            warn!("No likelihood detector credentials; results will be scored as degraded");
        }
        Self::new(kb, config)
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.verifier = self.verifier.with_fetcher(fetcher);
        self
    }

    pub fn with_reasoning(mut self, reasoning: Arc<dyn ReasoningService>) -> Self {
        self.verifier = self.verifier.with_reasoning(reasoning);
        self
    }

    pub fn with_rules(mut self, registry: RuleRegistry) -> Self {
        self.detector = ClaimDetector::new(registry);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Trust signals for `passage`, without likelihood or confidence.
    pub async fn assess(&self, passage: &str) -> VerificationResult {
        self.evaluate(passage).await.result
    }

    /// Full verification of one request.
    #[instrument(skip_all, fields(chars = request.text.len()))]
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationResponse {
        let passage = request.text.as_str();
        let likelihood = &request.likelihood;
        let Assessment { result, decision } = self.evaluate(passage).await;

        let mut score = likelihood.score;
        let mut verdict = likelihood.resolved_verdict();

        if self.config.penalize_unlinked_citations
            && !result.is_trusted
            && result.citation_missing_warning.is_some()
        {
            let penalty = FactVerdict::UnverifiedCitation;
            score = penalty.band().pick(passage);
            verdict = penalty.label().to_string();
        }

        if let Some(decision) = &decision {
            score = decision.score;
            verdict = decision.verdict.label().to_string();
        }

        let word_count = request.word_count();
        let degraded = likelihood.degraded || !self.config.detector_available;
        let confidence = calculate_confidence(&ConfidenceInput::new(
            score,
            likelihood.source_type,
            ConfidenceDetails {
                word_count: Some(word_count),
                signals: likelihood.signals.clone(),
                degraded,
            },
        ));

        debug!(score, confidence, degraded, %verdict, "Verification complete");

        VerificationResponse {
            score,
            verdict,
            trusted_source_match: result.is_trusted,
            matched_source: result.matched_source,
            details: ResponseDetails {
                word_count,
                citation_warning: result.citation_missing_warning,
                fact_check_warning: result.fact_check_warning,
                proximity_score: result.proximity_score,
                verification_msg: result.verification_message,
                confidence,
                ai_markers: extract_ai_markers(passage),
            },
        }
    }

    /// Verify several requests concurrently, preserving order.
    pub async fn verify_batch(&self, requests: &[VerificationRequest]) -> Vec<VerificationResponse> {
        join_all(requests.iter().map(|r| self.verify(r))).await
    }

    async fn evaluate(&self, passage: &str) -> Assessment {
        let source_match = match_sources(passage, self.kb.list_sources());
        let mut result = VerificationResult::from_source_match(source_match);

        if let Some(source) = result.matched_source.clone() {
            let outcome = self.verifier.verify(passage, &source).await;
            result.proximity_score = outcome.score;
            result.verification_message = outcome.message;
        }

        let decision = self.detector.detect(passage, &self.kb);
        if let Some(decision) = &decision {
            result.apply_decision(decision);
        }

        Assessment { result, decision }
    }
}
