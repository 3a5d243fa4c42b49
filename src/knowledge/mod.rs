//! Trusted source and claim review catalogs.
//!
//! The knowledge base is loaded once into a [`KnowledgeBase`] snapshot and
//! shared read-only by every request.
//!
//! ## Example
//!
//! ```rust,ignore
//! use veritas_core::config::KnowledgeConfig;
//! use veritas_core::knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::load(&KnowledgeConfig::default());
//! if let Some(nasa) = kb.resolve_source("nasa") {
//!     println!("{} -> {}", nasa.name, nasa.url);
//! }
//! ```

mod store;
mod types;

pub use store::{load_claims, load_sources, KnowledgeBase};
pub use types::{
    normalize_url, url_appears_in, ClaimReview, ClaimTopic, TrustedSource, UNKNOWN_SOURCE,
};
