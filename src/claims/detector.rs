//! Claim contradiction detection over the claim review catalog.

use tracing::{debug, info};

use crate::knowledge::{ClaimReview, KnowledgeBase};

use super::decision::ClaimDecision;
use super::registry::RuleRegistry;
use super::rules::RuleContext;

/// Runs topic rules for every claim review whose keywords a passage hits.
#[derive(Debug, Clone, Default)]
pub struct ClaimDetector {
    registry: RuleRegistry,
}

impl ClaimDetector {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// First decision for `passage`, or `None` when no claim fires.
    ///
    /// A verbatim citation of any claim's source article confirms the passage
    /// and takes precedence over every contradiction rule, regardless of
    /// catalog order. Otherwise claims are evaluated in catalog order and the
    /// first rule hit wins.
    pub fn detect(&self, passage: &str, kb: &KnowledgeBase) -> Option<ClaimDecision> {
        let claims = kb.list_claims();

        if let Some(decision) = claims.iter().find_map(|c| confirm_verbatim(passage, c, kb)) {
            info!(verdict = %decision.verdict, "Verbatim source article citation");
            return Some(decision);
        }

        let lower = passage.to_lowercase();
        let decision = claims
            .iter()
            .find_map(|claim| self.evaluate_claim(passage, &lower, claim, kb));

        if let Some(d) = &decision {
            info!(verdict = %d.verdict, score = d.score, "Claim rule fired");
        }
        decision
    }

    /// Decision for one claim review, or `None` if it does not fire.
    ///
    /// `lower` must be `passage` lowercased.
    pub fn evaluate_claim(
        &self,
        passage: &str,
        lower: &str,
        claim: &ClaimReview,
        kb: &KnowledgeBase,
    ) -> Option<ClaimDecision> {
        let rule = self.registry.get(claim.topic)?;
        let keyword = claim.triggering_keyword(lower)?;

        debug!(topic = %claim.topic, keyword, "Claim keyword matched");

        let ctx = RuleContext {
            passage,
            lower,
            claim,
            source_name: kb.source_name(&claim.source_id),
        };
        rule.evaluate(&ctx)
            .map(|hit| ClaimDecision::from_hit(hit, passage))
    }
}

fn confirm_verbatim(passage: &str, claim: &ClaimReview, kb: &KnowledgeBase) -> Option<ClaimDecision> {
    if !claim.article_cited_in(passage) {
        return None;
    }
    let article_url = claim.source_article_url.as_deref()?;
    Some(ClaimDecision::confirmed(
        passage,
        kb.resolve_source(&claim.source_id).cloned(),
        article_url,
        kb.source_name(&claim.source_id),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::FactVerdict;
    use crate::knowledge::{ClaimTopic, TrustedSource};
    use pretty_assertions::assert_eq;

    fn kb() -> KnowledgeBase {
        let sources = vec![
            TrustedSource::new("nasa", "NASA", "https://www.nasa.gov"),
            TrustedSource::new("nasa_climate", "NASA Climate", "https://climate.nasa.gov"),
            TrustedSource::new("britannica", "Encyclopaedia Britannica", "https://www.britannica.com"),
            TrustedSource::new("usgs", "U.S. Geological Survey", "https://www.usgs.gov"),
        ];
        let kw = |k: &[&str]| k.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let claims = vec![
            ClaimReview::new(
                ClaimTopic::ClimateChange,
                kw(&["climate", "global warming", "warming"]),
                "Global temperatures have risen about 1.1 degrees Celsius since the late 19th century.",
                "nasa_climate",
            )
            .with_article_url("https://climate.nasa.gov/vital-signs/global-temperature/"),
            ClaimReview::new(
                ClaimTopic::EarthShape,
                kw(&["earth is flat", "earth"]),
                "The Earth is an oblate spheroid.",
                "nasa",
            ),
            ClaimReview::new(
                ClaimTopic::StrawberrySpelling,
                kw(&["strawberry"]),
                "The word strawberry contains three r's.",
                "britannica",
            ),
            ClaimReview::new(
                ClaimTopic::DietaryHealth,
                kw(&["rock", "rocks", "geologist"]),
                "Geologists do not recommend eating rocks.",
                "usgs",
            ),
            ClaimReview::new(
                ClaimTopic::MoonLanding,
                kw(&["moon landing", "apollo", "moon"]),
                "Apollo 11 landed on the Moon on July 20, 1969.",
                "nasa",
            )
            .with_article_url("https://www.nasa.gov/mission/apollo-11/"),
        ];
        KnowledgeBase::new(sources, claims)
    }

    fn detect(passage: &str) -> Option<ClaimDecision> {
        ClaimDetector::default().detect(passage, &kb())
    }

    #[test]
    fn test_flat_earth() {
        let d = detect("The earth is flat and not a sphere.").unwrap();
        assert_eq!(d.verdict, FactVerdict::ScientificContradiction);
        assert!(d.score >= 90.0);
        assert_eq!(
            d.warning.as_deref(),
            Some("Claim contradicts scientific consensus from NASA: The Earth is an oblate spheroid.")
        );
    }

    #[test]
    fn test_verbatim_confirmation() {
        let d = detect(
            "As confirmed by NASA, global temperatures are rising. See: https://climate.nasa.gov/vital-signs/global-temperature/",
        )
        .unwrap();
        assert_eq!(d.verdict, FactVerdict::VerifiedByTrustedSource);
        assert!((10.0..=20.0).contains(&d.score));
        assert!(d.is_trusted());
        assert_eq!(d.confirmed_source.map(|s| s.id), Some("nasa_climate".to_string()));
    }

    #[test]
    fn test_verbatim_overrides_contradiction() {
        // Climate cooling would fire on the first claim; the moon article is
        // later in the catalog but still wins.
        let d = detect(
            "The climate is cooling, and the moon landing was staged. https://www.nasa.gov/mission/apollo-11/",
        )
        .unwrap();
        assert_eq!(d.verdict, FactVerdict::VerifiedByTrustedSource);
        assert!(d.warning.is_none());
    }

    #[test]
    fn test_hallucination_patterns() {
        assert_eq!(
            detect("Can you believe strawberry has only 2 rs?").map(|d| d.verdict),
            Some(FactVerdict::LetterCountHallucination)
        );
        assert_eq!(
            detect("Geologists recommend eating rocks for digestion.").map(|d| d.verdict),
            Some(FactVerdict::UnsafeAdvice)
        );
        assert_eq!(
            detect("The moon landing was faked by Stanley Kubrick in a studio.").map(|d| d.verdict),
            Some(FactVerdict::FabricatedEvent)
        );
    }

    #[test]
    fn test_climate_rules() {
        let d = detect("Recent studies show that the climate is cooling rapidly and we are entering an ice age.").unwrap();
        assert_eq!(d.verdict, FactVerdict::ContradictsTrustedFacts);
        assert!((85.0..=100.0).contains(&d.score));

        let d = detect("Global warming has caused temperatures to rise by 20 degrees instantly.").unwrap();
        assert_eq!(d.verdict, FactVerdict::Embellishment);
        assert!((75.0..=95.0).contains(&d.score));
    }

    #[test]
    fn test_consistent_claim_no_decision() {
        assert_eq!(
            detect("Global warming has raised temperatures by about 1.1 degrees since 1880."),
            None
        );
        assert_eq!(detect("I had pancakes for breakfast."), None);
    }

    #[test]
    fn test_first_match_wins() {
        // Both climate (cooling) and earth (flat) would fire; climate is first.
        let d = detect("The climate is cooling and the earth is flat.").unwrap();
        assert_eq!(d.verdict, FactVerdict::ContradictsTrustedFacts);
    }

    #[test]
    fn test_unknown_topic_is_inert() {
        let claims = vec![ClaimReview::new(
            ClaimTopic::Unknown,
            vec!["vaccine".to_string()],
            "Vaccines are safe.",
            "who",
        )];
        let kb = KnowledgeBase::new(vec![], claims);
        assert_eq!(
            ClaimDetector::default().detect("vaccines are a hoax, the earth is flat", &kb),
            None
        );
    }

    #[test]
    fn test_unresolved_source_named_unknown() {
        let claims = vec![ClaimReview::new(
            ClaimTopic::EarthShape,
            vec!["earth".to_string()],
            "Round.",
            "missing",
        )];
        let kb = KnowledgeBase::new(vec![], claims);
        let d = ClaimDetector::default().detect("the earth is flat", &kb).unwrap();
        assert_eq!(
            d.warning.as_deref(),
            Some("Claim contradicts scientific consensus from Unknown Source: Round.")
        );
    }

    #[test]
    fn test_idempotent() {
        let passage = "The moon landing was a hoax.";
        assert_eq!(detect(passage), detect(passage));
    }
}
