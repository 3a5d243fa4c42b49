//! Dispatch table from claim topic to rule.

use std::collections::HashMap;
use std::sync::Arc;

use crate::knowledge::ClaimTopic;

use super::rules::{
    ClimateChangeRule, DietaryHealthRule, EarthShapeRule, MoonLandingRule, StrawberrySpellingRule,
    TopicRule,
};

/// Rules keyed by the topic they handle.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<ClaimTopic, Arc<dyn TopicRule>>,
}

impl RuleRegistry {
    /// A registry with no rules; every claim is inert.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// A registry with a rule for every known topic.
    pub fn with_builtin_rules() -> Self {
        Self::empty()
            .with_rule(Arc::new(ClimateChangeRule))
            .with_rule(Arc::new(EarthShapeRule))
            .with_rule(Arc::new(StrawberrySpellingRule))
            .with_rule(Arc::new(DietaryHealthRule))
            .with_rule(Arc::new(MoonLandingRule))
    }

    /// Register `rule`, replacing any rule already bound to its topic.
    pub fn with_rule(mut self, rule: Arc<dyn TopicRule>) -> Self {
        self.register(rule);
        self
    }

    pub fn register(&mut self, rule: Arc<dyn TopicRule>) {
        self.rules.insert(rule.topic(), rule);
    }

    pub fn get(&self, topic: ClaimTopic) -> Option<&dyn TopicRule> {
        self.rules.get(&topic).map(|r| r.as_ref())
    }

    pub fn topics(&self) -> impl Iterator<Item = ClaimTopic> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtin_rules()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut topics: Vec<String> = self.topics().map(|t| t.to_string()).collect();
        topics.sort();
        f.debug_struct("RuleRegistry").field("topics", &topics).finish()
    }
}
