//! Source matching: does a passage cite a trusted source credibly?
//!
//! A passage containing a source's canonical URL is a strong match. A passage
//! that only names a source is a weak match: anyone can write "according to
//! Reuters" without ever having read Reuters, so it earns a warning instead
//! of trust.

use serde::{Deserialize, Serialize};

use crate::knowledge::TrustedSource;

/// Outcome of scanning a passage against the trusted source catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMatch {
    /// A canonical URL was found
    pub is_trusted: bool,
    /// The strongly matched source
    pub matched_source: Option<TrustedSource>,
    /// Set when a source was named but never linked
    pub citation_missing_warning: Option<String>,
}

impl SourceMatch {
    /// Only a name-without-URL mention was found.
    pub fn is_weak_only(&self) -> bool {
        !self.is_trusted && self.citation_missing_warning.is_some()
    }
}

/// Scan `passage` against `sources` in catalog order.
///
/// The first URL hit wins and ends the scan. Name-only hits record a warning
/// (the last one in catalog order) but scanning continues, so a later URL hit
/// for any source still clears it.
pub fn match_sources(passage: &str, sources: &[TrustedSource]) -> SourceMatch {
    let mut weak_warning: Option<String> = None;

    for source in sources {
        if source.url_in(passage) {
            return SourceMatch {
                is_trusted: true,
                matched_source: Some(source.clone()),
                citation_missing_warning: None,
            };
        }

        if source.name_in(passage) {
            weak_warning = Some(citation_missing_message(source));
        }
    }

    SourceMatch {
        is_trusted: false,
        matched_source: None,
        citation_missing_warning: weak_warning,
    }
}

fn citation_missing_message(source: &TrustedSource) -> String {
    format!(
        "Source '{}' mentioned but no valid citation found.",
        source.name.trim()
    )
}
