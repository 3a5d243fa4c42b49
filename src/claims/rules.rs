//! Topic rules: one per claim topic, each a pure function of the passage.

use regex::Regex;
use std::sync::LazyLock;

use crate::knowledge::{ClaimReview, ClaimTopic};

use super::decision::{FactVerdict, RuleHit};

/// Everything a rule may look at for one claim review.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Passage as submitted
    pub passage: &'a str,
    /// Passage lowercased once for phrase matching
    pub lower: &'a str,
    /// Claim review whose keyword triggered
    pub claim: &'a ClaimReview,
    /// Display name of the claim's source
    pub source_name: &'a str,
}

impl RuleContext<'_> {
    fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.lower.contains(p))
    }
}

/// Rule set for one [`ClaimTopic`].
pub trait TopicRule: Send + Sync {
    /// Topic this rule handles.
    fn topic(&self) -> ClaimTopic;

    /// Inspect a passage whose keywords matched the claim.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit>;
}

const COOLING_PHRASES: &[&str] = &["cooling", "dropped", "falling", "not warming", "ice age"];

/// Temperature magnitudes above this are embellished.
const PLAUSIBLE_WARMING_DEGREES: f64 = 5.0;

static DEGREE_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([-+]?\d*\.\d+|\d+)\s*-?\s*(?:°|degrees?\b)").expect("valid degree pattern")
});

/// Warming trend: cooling claims contradict it, inflated figures embellish it.
pub struct ClimateChangeRule;

impl ClimateChangeRule {
    fn largest_degree_figure(lower: &str) -> Option<f64> {
        DEGREE_QUANTITY
            .captures_iter(lower)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

impl TopicRule for ClimateChangeRule {
    fn topic(&self) -> ClaimTopic {
        ClaimTopic::ClimateChange
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        if ctx.contains_any(COOLING_PHRASES) {
            return Some(RuleHit::new(
                FactVerdict::ContradictsTrustedFacts,
                format!(
                    "Claim contradicts trusted fact from {}: {}",
                    ctx.source_name, ctx.claim.claim_reviewed
                ),
            ));
        }

        let figure = Self::largest_degree_figure(ctx.lower)?;
        (figure > PLAUSIBLE_WARMING_DEGREES).then(|| {
            RuleHit::new(
                FactVerdict::Embellishment,
                format!(
                    "Claim embellishes magnitude ({} degrees). Trusted fact from {}: {}",
                    figure, ctx.source_name, ctx.claim.claim_reviewed
                ),
            )
        })
    }
}

/// Spherical earth.
pub struct EarthShapeRule;

impl TopicRule for EarthShapeRule {
    fn topic(&self) -> ClaimTopic {
        ClaimTopic::EarthShape
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        let lower = ctx.lower;
        let denial = lower.contains("earth is flat")
            || (lower.contains("flat") && !lower.contains("sphere") && !lower.contains("round"));

        denial.then(|| {
            RuleHit::new(
                FactVerdict::ScientificContradiction,
                format!(
                    "Claim contradicts scientific consensus from {}: {}",
                    ctx.source_name, ctx.claim.claim_reviewed
                ),
            )
        })
    }
}

const MISCOUNT_PHRASES: &[&str] = &["2 rs", "two rs", "2 r's", "two r's", "only 2 r", "only two r"];

/// The letter count of "strawberry".
pub struct StrawberrySpellingRule;

impl TopicRule for StrawberrySpellingRule {
    fn topic(&self) -> ClaimTopic {
        ClaimTopic::StrawberrySpelling
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        ctx.contains_any(MISCOUNT_PHRASES).then(|| {
            RuleHit::new(
                FactVerdict::LetterCountHallucination,
                format!(
                    "Known letter-count hallucination. Per {}: {}",
                    ctx.source_name, ctx.claim.claim_reviewed
                ),
            )
        })
    }
}

const INGESTION_PHRASES: &[&str] = &[
    "eating rocks",
    "eat rocks",
    "eat a rock",
    "rock a day",
    "one small rock",
];

/// Rocks are not food.
pub struct DietaryHealthRule;

impl TopicRule for DietaryHealthRule {
    fn topic(&self) -> ClaimTopic {
        ClaimTopic::DietaryHealth
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        let advice = ctx.contains_any(INGESTION_PHRASES)
            || (ctx.lower.contains("eat at least one") && ctx.lower.contains("rock"));

        advice.then(|| {
            RuleHit::new(
                FactVerdict::UnsafeAdvice,
                format!(
                    "Unsafe ingestion advice contradicts {}: {}",
                    ctx.source_name, ctx.claim.claim_reviewed
                ),
            )
        })
    }
}

const CONSPIRACY_PHRASES: &[&str] = &[
    "faked",
    "hoax",
    "staged",
    "kubrick",
    "never landed",
    "filmed in a studio",
];

/// The crewed moon landings happened.
pub struct MoonLandingRule;

impl TopicRule for MoonLandingRule {
    fn topic(&self) -> ClaimTopic {
        ClaimTopic::MoonLanding
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        ctx.contains_any(CONSPIRACY_PHRASES).then(|| {
            RuleHit::new(
                FactVerdict::FabricatedEvent,
                format!(
                    "Conspiracy claim contradicts the record from {}: {}",
                    ctx.source_name, ctx.claim.claim_reviewed
                ),
            )
        })
    }
}
