//! Citation proximity: does the cited page actually say what the passage says?
//!
//! When a passage links a trusted source, the linked page is fetched, split
//! into paragraph chunks, and compared with the passage. Comparison is a
//! lexical heuristic by default; an optional [`ReasoningService`] can judge
//! support instead, and any failure from it falls back to the heuristic.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use veritas_core::config::ProximityConfig;
//! use veritas_core::proximity::{HttpPageFetcher, ProximityVerifier};
//!
//! let config = ProximityConfig::default();
//! let verifier = ProximityVerifier::new(Arc::new(HttpPageFetcher::new(&config)?), config);
//! let outcome = verifier.verify(passage, &source).await;
//! println!("{:?}: {}", outcome.score, outcome.message);
//! ```

mod extract;
mod fetcher;
mod reasoning;
mod similarity;
mod verifier;

pub use extract::{build_context, chunk_document, extract_urls, select_target_url};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use reasoning::{parse_judgement, LlmReasoningService, ReasoningService, SupportJudgement};
pub use similarity::{best_chunk_match, jaccard, jaccard_similarity, tokenize};
pub use verifier::{ProximityMethod, ProximityOutcome, ProximityVerifier};
