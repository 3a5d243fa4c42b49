//! Claim contradiction detection.
//!
//! Each [`ClaimReview`](crate::knowledge::ClaimReview) carries a topic. A
//! [`RuleRegistry`] maps topics to [`TopicRule`]s; the [`ClaimDetector`] runs
//! the rule of every claim whose keywords appear in a passage and returns the
//! first [`ClaimDecision`]. Topics without a registered rule never fire.
//!
//! A passage that cites a claim's source article verbatim is confirmed
//! instead, and that confirmation beats any contradiction.

mod decision;
mod detector;
mod registry;
mod rules;

pub use decision::{ClaimDecision, FactVerdict, RuleHit, ScoreBand};
pub use detector::ClaimDetector;
pub use registry::RuleRegistry;
pub use rules::{
    ClimateChangeRule, DietaryHealthRule, EarthShapeRule, MoonLandingRule, RuleContext,
    StrawberrySpellingRule, TopicRule,
};
