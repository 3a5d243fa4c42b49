//! Immutable knowledge base snapshot.
//!
//! Both catalogs are read once at startup. A missing or corrupt file is
//! logged and replaced by an empty catalog so the pipeline degrades to "no
//! trusted sources known" / "no claims known" instead of refusing to start.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::KnowledgeConfig;
use crate::error::{Error, Result};

use super::types::{ClaimReview, TrustedSource, UNKNOWN_SOURCE};

#[derive(Debug, Deserialize)]
struct SourcesDocument {
    #[serde(default)]
    trusted_sources: Vec<TrustedSource>,
}

#[derive(Debug, Deserialize)]
struct ClaimsDocument {
    #[serde(default)]
    claim_reviews: Vec<ClaimReview>,
}

/// Read-only catalogs of trusted sources and claim reviews.
///
/// Safe to share across concurrent requests behind an `Arc`; nothing mutates
/// it after construction.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    sources: Vec<TrustedSource>,
    claims: Vec<ClaimReview>,
    by_id: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Build a snapshot from in-memory catalogs.
    ///
    /// Claims without a usable keyword are dropped. For duplicate source ids
    /// the first entry wins lookups.
    pub fn new(sources: Vec<TrustedSource>, claims: Vec<ClaimReview>) -> Self {
        let mut by_id = HashMap::with_capacity(sources.len());
        for (idx, source) in sources.iter().enumerate() {
            by_id.entry(source.id.clone()).or_insert(idx);
        }

        let claims = claims
            .into_iter()
            .filter(|claim| {
                let usable = claim.has_keywords();
                if !usable {
                    warn!(
                        topic = %claim.topic,
                        "Dropping claim review without keywords: {}",
                        claim.claim_reviewed
                    );
                }
                usable
            })
            .collect();

        Self {
            sources,
            claims,
            by_id,
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load both catalogs, substituting an empty one for each that fails.
    pub fn load(config: &KnowledgeConfig) -> Self {
        let sources = load_sources(&config.sources_path).unwrap_or_else(|e| {
            warn!("Trusted sources unavailable, continuing with none: {}", e);
            Vec::new()
        });
        let claims = load_claims(&config.claims_path).unwrap_or_else(|e| {
            warn!("Claim reviews unavailable, continuing with none: {}", e);
            Vec::new()
        });

        info!(
            sources = sources.len(),
            claims = claims.len(),
            "Knowledge base loaded"
        );

        Self::new(sources, claims)
    }

    /// Trusted sources in catalog order.
    pub fn list_sources(&self) -> &[TrustedSource] {
        &self.sources
    }

    /// Claim reviews in catalog order.
    pub fn list_claims(&self) -> &[ClaimReview] {
        &self.claims
    }

    /// Look up a source by id.
    pub fn resolve_source(&self, id: &str) -> Option<&TrustedSource> {
        self.by_id.get(id).and_then(|&idx| self.sources.get(idx))
    }

    /// Source name for display, or "Unknown Source".
    pub fn source_name(&self, id: &str) -> &str {
        self.resolve_source(id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.claims.is_empty()
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::knowledge_base(path.display().to_string(), e.to_string()))
}

/// Parse a `{"trusted_sources": [...]}` document.
pub fn load_sources(path: &Path) -> Result<Vec<TrustedSource>> {
    let raw = read_document(path)?;
    let doc: SourcesDocument = serde_json::from_str(&raw)
        .map_err(|e| Error::knowledge_base(path.display().to_string(), e.to_string()))?;
    Ok(doc.trusted_sources)
}

/// Parse a `{"claim_reviews": [...]}` document.
pub fn load_claims(path: &Path) -> Result<Vec<ClaimReview>> {
    let raw = read_document(path)?;
    let doc: ClaimsDocument = serde_json::from_str(&raw)
        .map_err(|e| Error::knowledge_base(path.display().to_string(), e.to_string()))?;
    Ok(doc.claim_reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ClaimTopic;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_documents() {
        let sources = write_temp(
            r#"{"trusted_sources": [
                {"id": "bbc", "name": "BBC News", "url": "https://www.bbc.com/news"},
                {"id": "nasa", "name": "NASA", "url": "https://www.nasa.gov"}
            ]}"#,
        );
        let claims = write_temp(
            r#"{"claim_reviews": [
                {"topic": "earth_shape", "keywords": ["earth"], "claim_reviewed": "The Earth is an oblate spheroid.", "source_id": "nasa"},
                {"topic": "mystery", "keywords": ["x"], "claim_reviewed": "Inert.", "source_id": "nobody",
                 "source_article_url": "https://example.org/a"}
            ]}"#,
        );

        let kb = KnowledgeBase::load(&KnowledgeConfig {
            sources_path: sources.path().to_path_buf(),
            claims_path: claims.path().to_path_buf(),
        });

        assert_eq!(kb.list_sources().len(), 2);
        assert_eq!(kb.list_claims().len(), 2);
        assert_eq!(kb.list_claims()[1].topic, ClaimTopic::Unknown);
        assert_eq!(kb.resolve_source("nasa").map(|s| s.name.as_str()), Some("NASA"));
        assert_eq!(kb.source_name("nobody"), "Unknown Source");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let claims = write_temp(
            r#"{"claim_reviews": [{"topic": "earth_shape", "keywords": ["flat"], "claim_reviewed": "Round.", "source_id": "nasa"}]}"#,
        );
        let kb = KnowledgeBase::load(&KnowledgeConfig {
            sources_path: PathBuf::from("/nonexistent/trusted_sources.json"),
            claims_path: claims.path().to_path_buf(),
        });

        assert!(kb.list_sources().is_empty());
        assert_eq!(kb.list_claims().len(), 1);
        assert!(kb.resolve_source("nasa").is_none());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let sources = write_temp("{ not json");
        let claims = write_temp(r#"{"claim_reviews": "oops"}"#);
        let kb = KnowledgeBase::load(&KnowledgeConfig {
            sources_path: sources.path().to_path_buf(),
            claims_path: claims.path().to_path_buf(),
        });
        assert!(kb.is_empty());
    }

    #[test]
    fn test_load_errors_are_reported() {
        let err = load_sources(Path::new("/nonexistent/x.json")).unwrap_err();
        assert!(matches!(err, Error::KnowledgeBase { .. }));
    }

    #[test]
    fn test_missing_top_level_key_is_empty_catalog() {
        let sources = write_temp("{}");
        assert!(load_sources(sources.path()).unwrap().is_empty());
    }

    #[test]
    fn test_claims_without_keywords_are_dropped() {
        let kb = KnowledgeBase::new(
            vec![],
            vec![
                ClaimReview::new(ClaimTopic::EarthShape, vec![], "Round.", "nasa"),
                ClaimReview::new(ClaimTopic::EarthShape, vec!["flat".into()], "Round.", "nasa"),
            ],
        );
        assert_eq!(kb.list_claims().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let kb = KnowledgeBase::new(
            vec![
                TrustedSource::new("dup", "First", "https://first.example"),
                TrustedSource::new("dup", "Second", "https://second.example"),
            ],
            vec![],
        );
        assert_eq!(kb.source_name("dup"), "First");
    }

    #[test]
    fn test_bundled_catalogs_parse() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let sources = load_sources(&root.join("trusted_sources.json")).unwrap();
        let claims = load_claims(&root.join("claim_reviews.json")).unwrap();
        assert!(!sources.is_empty());
        for topic in ClaimTopic::KNOWN {
            assert!(
                claims.iter().any(|c| c.topic == topic),
                "bundled catalog lacks a {} claim",
                topic
            );
        }
    }
}
