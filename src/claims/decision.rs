//! Verdicts, score bands, and the decision a claim rule produces.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::knowledge::TrustedSource;

/// Inclusive integer range a forced score is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: u8,
    pub max: u8,
}

impl ScoreBand {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Deterministic score in the band for `passage`.
    ///
    /// Different passages land on different points of the band; the same
    /// passage always lands on the same one.
    pub fn pick(&self, passage: &str) -> f64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let span = u64::from(hi - lo) + 1;

        let digest = Sha256::digest(passage.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let offset = u64::from_be_bytes(prefix) % span;

        f64::from(lo) + offset as f64
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= f64::from(self.min) && score <= f64::from(self.max)
    }
}

/// Verdicts the trust pipeline can force onto a passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactVerdict {
    VerifiedByTrustedSource,
    ContradictsTrustedFacts,
    Embellishment,
    ScientificContradiction,
    LetterCountHallucination,
    UnsafeAdvice,
    FabricatedEvent,
    UnverifiedCitation,
}

impl FactVerdict {
    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VerifiedByTrustedSource => "Verified by Trusted Source",
            Self::ContradictsTrustedFacts => "Potential AI-Generated (Contradicts Trusted Facts)",
            Self::Embellishment => "Potential AI-Generated (Embellishment)",
            Self::ScientificContradiction => "Potential AI-Generated (Scientific Contradiction)",
            Self::LetterCountHallucination => "Known AI Hallucination (Letter Count)",
            Self::UnsafeAdvice => "Dangerous Hallucination (Unsafe Advice)",
            Self::FabricatedEvent => "Conspiracy Theory (Fabricated Event)",
            Self::UnverifiedCitation => "Potential AI-Generated (Unverified Citation)",
        }
    }

    /// Range the likelihood score is forced into.
    pub fn band(&self) -> ScoreBand {
        match self {
            Self::VerifiedByTrustedSource => ScoreBand::new(10, 20),
            Self::ContradictsTrustedFacts => ScoreBand::new(85, 100),
            Self::Embellishment => ScoreBand::new(75, 95),
            Self::ScientificContradiction => ScoreBand::new(90, 100),
            Self::LetterCountHallucination => ScoreBand::new(80, 95),
            Self::UnsafeAdvice => ScoreBand::new(90, 100),
            Self::FabricatedEvent => ScoreBand::new(85, 99),
            Self::UnverifiedCitation => ScoreBand::new(80, 99),
        }
    }

    /// Whether the verdict lowers suspicion rather than raising it.
    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::VerifiedByTrustedSource)
    }
}

impl std::fmt::Display for FactVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a topic rule found in a passage, before a score is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    pub verdict: FactVerdict,
    pub warning: String,
}

impl RuleHit {
    pub fn new(verdict: FactVerdict, warning: impl Into<String>) -> Self {
        Self {
            verdict,
            warning: warning.into(),
        }
    }
}

/// Immutable outcome for one claim review against one passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// Forced likelihood score
    pub score: f64,
    pub verdict: FactVerdict,
    /// Contradiction warning for the response
    pub warning: Option<String>,
    /// Source confirmed by a verbatim article citation
    pub confirmed_source: Option<TrustedSource>,
    /// Human-readable confirmation for verbatim citations
    pub confirmation: Option<String>,
}

impl ClaimDecision {
    /// Decision for a contradiction or hallucination rule hit.
    pub fn from_hit(hit: RuleHit, passage: &str) -> Self {
        Self {
            score: hit.verdict.band().pick(passage),
            verdict: hit.verdict,
            warning: Some(hit.warning),
            confirmed_source: None,
            confirmation: None,
        }
    }

    /// Decision for a passage citing a claim's source article verbatim.
    pub fn confirmed(
        passage: &str,
        source: Option<TrustedSource>,
        article_url: &str,
        source_name: &str,
    ) -> Self {
        let verdict = FactVerdict::VerifiedByTrustedSource;
        Self {
            score: verdict.band().pick(passage),
            verdict,
            warning: None,
            confirmed_source: source,
            confirmation: Some(format!(
                "Passage cites the {} article {} directly.",
                source_name, article_url
            )),
        }
    }

    /// Whether the decision marks the passage as trusted.
    pub fn is_trusted(&self) -> bool {
        self.verdict.is_confirmation()
    }
}
