//! Citation proximity verification.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::ProximityConfig;
use crate::error::Result;
use crate::knowledge::TrustedSource;

use super::extract::{build_context, chunk_document, select_target_url};
use super::fetcher::PageFetcher;
use super::reasoning::{ReasoningService, SupportJudgement};
use super::similarity::best_chunk_match;

/// How a proximity score was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityMethod {
    /// No URL, fetch failure: nothing was scored
    NotAttempted,
    /// Jaccard word-set overlap
    Heuristic,
    /// External reasoning service
    Reasoning,
}

/// Result of one proximity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityOutcome {
    /// `None` means no score was produced, not a score of zero
    pub score: Option<f64>,
    pub message: String,
    pub method: ProximityMethod,
    /// Page that was (or would have been) fetched
    pub target_url: Option<String>,
}

impl ProximityOutcome {
    fn not_attempted(message: String, target_url: Option<String>) -> Self {
        Self {
            score: None,
            message,
            method: ProximityMethod::NotAttempted,
            target_url,
        }
    }
}

/// Checks whether a strongly matched source's page supports the passage.
pub struct ProximityVerifier {
    fetcher: Arc<dyn PageFetcher>,
    reasoning: Option<Arc<dyn ReasoningService>>,
    config: ProximityConfig,
}

impl ProximityVerifier {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ProximityConfig) -> Self {
        Self {
            fetcher,
            reasoning: None,
            config,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_reasoning(mut self, reasoning: Arc<dyn ReasoningService>) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    pub fn has_reasoning(&self) -> bool {
        self.reasoning.is_some()
    }

    /// Score how well `source`'s cited page supports `passage`.
    ///
    /// Never fails: a missing URL or failed fetch leaves the score unset, and
    /// a failed reasoning call falls back to the heuristic.
    #[instrument(skip(self, passage), fields(source = %source.id))]
    pub async fn verify(&self, passage: &str, source: &TrustedSource) -> ProximityOutcome {
        let Some(target) = select_target_url(passage, source) else {
            return ProximityOutcome::not_attempted(
                format!(
                    "Matched {} but could not extract a specific URL to verify.",
                    source.name
                ),
                None,
            );
        };

        let body = match self.fetcher.fetch(&target).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %target, error = %e, "Citation fetch failed");
                return ProximityOutcome::not_attempted(
                    format!("Could not verify content at {}: {}", target, e),
                    Some(target),
                );
            }
        };

        let chunks = chunk_document(&body, self.config.min_chunk_chars);
        debug!(url = %target, chunks = chunks.len(), "Chunked cited page");

        if chunks.is_empty() {
            return ProximityOutcome {
                score: Some(0.0),
                message: format!("No substantial paragraphs found at {}.", target),
                method: ProximityMethod::Heuristic,
                target_url: Some(target),
            };
        }

        if let Some(reasoning) = &self.reasoning {
            match self.judge(reasoning.as_ref(), passage, &chunks).await {
                Ok(judgement) => {
                    return ProximityOutcome {
                        score: Some(judgement.score),
                        message: format!("AI verification: {}", judgement.reasoning),
                        method: ProximityMethod::Reasoning,
                        target_url: Some(target),
                    };
                }
                Err(e) => {
                    warn!(error = %e, "Reasoning service failed, using heuristic");
                }
            }
        }

        heuristic(passage, &chunks, target)
    }

    async fn judge(
        &self,
        reasoning: &dyn ReasoningService,
        passage: &str,
        chunks: &[String],
    ) -> Result<SupportJudgement> {
        let context = build_context(chunks, self.config.context_budget_chars);
        reasoning.judge_support(&context, passage).await
    }
}

fn heuristic(passage: &str, chunks: &[String], target: String) -> ProximityOutcome {
    let score = best_chunk_match(passage, chunks)
        .map(|(_, score)| score)
        .unwrap_or(0.0);

    ProximityOutcome {
        score: Some(score),
        message: format!(
            "Best paragraph match: {:.1}% word overlap with {}",
            score, target
        ),
        method: ProximityMethod::Heuristic,
        target_url: Some(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        body: std::result::Result<String, u16>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn ok(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn status(code: u16) -> Arc<Self> {
            Arc::new(Self {
                body: Err(code),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(code) => Err(Error::http_status(url, *code)),
            }
        }
    }

    struct StubReasoner(std::result::Result<f64, ()>);

    #[async_trait]
    impl ReasoningService for StubReasoner {
        async fn judge_support(&self, context: &str, _claim: &str) -> Result<SupportJudgement> {
            assert!(context.chars().count() <= 3000);
            match self.0 {
                Ok(score) => Ok(SupportJudgement {
                    score,
                    reasoning: "Source states it.".to_string(),
                }),
                Err(()) => Err(Error::reasoning("service unavailable")),
            }
        }
    }

    const PAGE: &str = r#"<html><body>
        <p>Menu</p>
        <p>Global temperatures are rising faster than at any point in recorded history, NASA reports.</p>
        <p>Sea ice in the Arctic has declined steadily across every decade of satellite observation.</p>
    </body></html>"#;

    const PASSAGE: &str = "Global temperatures are rising faster than at any point in recorded history, NASA reports. https://climate.nasa.gov/vital-signs";

    fn source() -> TrustedSource {
        TrustedSource::new("nasa_climate", "NASA Climate", "https://climate.nasa.gov")
    }

    #[tokio::test]
    async fn test_heuristic_scores_best_paragraph() {
        let verifier = ProximityVerifier::new(StaticFetcher::ok(PAGE), ProximityConfig::default());
        let outcome = verifier.verify(PASSAGE, &source()).await;

        assert_eq!(outcome.method, ProximityMethod::Heuristic);
        let score = outcome.score.unwrap();
        // 14 shared words out of 19 distinct
        assert!((score - 14.0 / 19.0 * 100.0).abs() < 1e-9, "score was {}", score);
        assert!(outcome.message.starts_with("Best paragraph match"));
        assert_eq!(
            outcome.target_url.as_deref(),
            Some("https://climate.nasa.gov/vital-signs")
        );
    }

    #[tokio::test]
    async fn test_no_extractable_url_skips_fetch() {
        let fetcher = StaticFetcher::ok(PAGE);
        let verifier = ProximityVerifier::new(fetcher.clone(), ProximityConfig::default());
        let outcome = verifier
            .verify("Cited https://climate.nasa.gov", &TrustedSource::new("x", "X", "https://other.org"))
            .await;

        assert_eq!(outcome.score, None);
        assert_eq!(outcome.method, ProximityMethod::NotAttempted);
        assert!(outcome.message.contains("could not extract a specific URL"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_score_unset() {
        let verifier = ProximityVerifier::new(StaticFetcher::status(503), ProximityConfig::default());
        let outcome = verifier.verify(PASSAGE, &source()).await;

        assert_eq!(outcome.score, None);
        assert!(outcome.message.contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_page_without_paragraphs_scores_zero() {
        let verifier =
            ProximityVerifier::new(StaticFetcher::ok("<p>tiny</p>"), ProximityConfig::default());
        let outcome = verifier.verify(PASSAGE, &source()).await;
        assert_eq!(outcome.score, Some(0.0));
    }

    #[tokio::test]
    async fn test_reasoning_service_used_when_configured() {
        let verifier = ProximityVerifier::new(StaticFetcher::ok(PAGE), ProximityConfig::default())
            .with_reasoning(Arc::new(StubReasoner(Ok(88.0))));
        let outcome = verifier.verify(PASSAGE, &source()).await;

        assert_eq!(outcome.score, Some(88.0));
        assert_eq!(outcome.method, ProximityMethod::Reasoning);
        assert_eq!(outcome.message, "AI verification: Source states it.");
    }

    #[tokio::test]
    async fn test_reasoning_failure_falls_back_to_heuristic() {
        let verifier = ProximityVerifier::new(StaticFetcher::ok(PAGE), ProximityConfig::default())
            .with_reasoning(Arc::new(StubReasoner(Err(()))));
        let outcome = verifier.verify(PASSAGE, &source()).await;

        assert_eq!(outcome.method, ProximityMethod::Heuristic);
        assert!(outcome.score.is_some());
    }

    #[tokio::test]
    async fn test_context_budget_applied() {
        let long_page = format!("<p>{}</p><p>{}</p>", "word ".repeat(700), "more ".repeat(700));
        let verifier =
            ProximityVerifier::new(StaticFetcher::ok(&long_page), ProximityConfig::default())
                .with_reasoning(Arc::new(StubReasoner(Ok(40.0))));
        // StubReasoner asserts the context fits the budget.
        let outcome = verifier.verify(PASSAGE, &source()).await;
        assert_eq!(outcome.score, Some(40.0));
    }
}
