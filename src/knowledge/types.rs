//! Catalog entry types for the knowledge base.

use serde::{Deserialize, Serialize};

/// Display name used when a claim's `source_id` does not resolve.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// A recognized trustworthy publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSource {
    /// Unique identifier referenced by claim reviews
    pub id: String,
    /// Human-readable name as it would appear in prose ("BBC News")
    pub name: String,
    /// Canonical URL
    pub url: String,
}

impl TrustedSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Canonical URL in comparison form.
    pub fn canonical_url(&self) -> String {
        normalize_url(&self.url)
    }

    /// Whether the canonical URL occurs anywhere in `text`.
    pub fn url_in(&self, text: &str) -> bool {
        url_appears_in(&self.url, text)
    }

    /// Whether the source name occurs in `text`.
    ///
    /// Case-sensitive: short names ("AP") would otherwise fire inside
    /// ordinary words.
    pub fn name_in(&self, text: &str) -> bool {
        !self.name.trim().is_empty() && text.contains(self.name.trim())
    }
}

/// Normalize a URL for substring comparison: trimmed, trailing slashes
/// removed, lowercased.
pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

/// Whether `url` (normalized) occurs as a substring of `text`.
pub fn url_appears_in(url: &str, text: &str) -> bool {
    let needle = normalize_url(url);
    !needle.is_empty() && text.to_lowercase().contains(&needle)
}

/// Topic tag selecting the rule set a claim review is checked with.
///
/// Unrecognised tags deserialize to [`ClaimTopic::Unknown`], which has no
/// rule and never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimTopic {
    /// Established warming trend; catches cooling claims and inflated figures
    ClimateChange,
    /// Spherical earth; catches flat-earth assertions
    EarthShape,
    /// Letters in "strawberry"; catches the miscount
    StrawberrySpelling,
    /// Rock ingestion advice
    DietaryHealth,
    /// Apollo landings; catches the faked-landing conspiracy
    MoonLanding,
    /// Any tag without a rule
    #[serde(other)]
    Unknown,
}

impl ClaimTopic {
    /// All topics that carry a rule.
    pub const KNOWN: [ClaimTopic; 5] = [
        Self::ClimateChange,
        Self::EarthShape,
        Self::StrawberrySpelling,
        Self::DietaryHealth,
        Self::MoonLanding,
    ];
}

impl std::fmt::Display for ClaimTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClimateChange => write!(f, "climate_change"),
            Self::EarthShape => write!(f, "earth_shape"),
            Self::StrawberrySpelling => write!(f, "strawberry_spelling"),
            Self::DietaryHealth => write!(f, "dietary_health"),
            Self::MoonLanding => write!(f, "moon_landing"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A curated ground-truth statement with its trigger keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReview {
    /// Rule set used when a keyword triggers
    pub topic: ClaimTopic,
    /// Trigger strings, matched case-insensitively
    pub keywords: Vec<String>,
    /// The ground-truth statement
    pub claim_reviewed: String,
    /// Weak reference into the trusted source catalog
    pub source_id: String,
    /// Article whose verbatim citation confirms the passage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_article_url: Option<String>,
}

impl ClaimReview {
    pub fn new(
        topic: ClaimTopic,
        keywords: Vec<String>,
        claim_reviewed: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            topic,
            keywords,
            claim_reviewed: claim_reviewed.into(),
            source_id: source_id.into(),
            source_article_url: None,
        }
    }

    pub fn with_article_url(mut self, url: impl Into<String>) -> Self {
        self.source_article_url = Some(url.into());
        self
    }

    /// First keyword present in an already-lowercased passage.
    pub fn triggering_keyword(&self, lower_passage: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .find(|k| !k.is_empty() && lower_passage.contains(&k.to_lowercase()))
    }

    /// Whether the passage cites this claim's source article.
    pub fn article_cited_in(&self, passage: &str) -> bool {
        self.source_article_url
            .as_deref()
            .is_some_and(|url| url_appears_in(url, passage))
    }

    /// A claim with no usable keyword can never trigger.
    pub fn has_keywords(&self) -> bool {
        self.keywords.iter().any(|k| !k.trim().is_empty())
    }
}
