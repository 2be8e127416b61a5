//! Schema rules
//!
//! Every check the scorer runs is a [`Rule`]. The set is closed: the
//! [`RuleKind`] registry lists each variant, and [`default_rules`] /
//! [`build_rules`] return them in the fixed registration order used for
//! scoring and reporting:
//!
//! | # | Rule | Weight |
//! |---|------|--------|
//! | 1 | PII | 10 |
//! | 2 | Composite Keys | 5 |
//! | 3 | Cycle Counter | 15 |
//! | 4 | Null Blast Radius | 20 |
//! | 5 | Deprecation | 5 |
//! | 6 | Problem Union | 10 |
//! | 7 | Nullable External | 15 |
//! | 8 | Plural Collections | 5 |
//! | 9 | Boolean Prefix | 5 |
//!
//! # Example
//!
//! ```ignore
//! use schema_scorer::rules::{default_rules, Rule};
//!
//! let document = schema_scorer::parsers::parse_schema(sdl)?;
//! for rule in default_rules() {
//!     let result = rule.validate(&document)?;
//!     println!("{}: {}", rule.name(), result.message);
//! }
//! ```

mod base;
mod boolean_prefix;
mod composite_keys;
mod cycle_counter;
mod deprecation;
mod null_blast;
mod nullable_external;
mod pii;
mod plural_collections;
mod problem_union;

pub use base::Rule;
pub use boolean_prefix::BooleanPrefixRule;
pub use composite_keys::CompositeKeysRule;
pub use cycle_counter::CycleCounterRule;
pub use deprecation::{is_valid_reason, DeprecationRule};
pub use null_blast::NullBlastRadiusRule;
pub use nullable_external::NullableExternalRule;
pub use pii::{is_potential_pii, PiiRule};
pub use plural_collections::{is_plural, PluralCollectionsRule};
pub use problem_union::ProblemUnionRule;

use crate::config::ScorerConfig;
use crate::models::ValidationResult;
use crate::parsers::SchemaDocument;
use anyhow::Result;
use tracing::debug;

/// Closed registry of every rule the scorer knows
pub enum RuleKind {
    Pii(PiiRule),
    CompositeKeys(CompositeKeysRule),
    CycleCounter(CycleCounterRule),
    NullBlastRadius(NullBlastRadiusRule),
    Deprecation(DeprecationRule),
    ProblemUnion(ProblemUnionRule),
    NullableExternal(NullableExternalRule),
    PluralCollections(PluralCollectionsRule),
    BooleanPrefix(BooleanPrefixRule),
}

impl RuleKind {
    fn as_rule(&self) -> &dyn Rule {
        match self {
            RuleKind::Pii(rule) => rule,
            RuleKind::CompositeKeys(rule) => rule,
            RuleKind::CycleCounter(rule) => rule,
            RuleKind::NullBlastRadius(rule) => rule,
            RuleKind::Deprecation(rule) => rule,
            RuleKind::ProblemUnion(rule) => rule,
            RuleKind::NullableExternal(rule) => rule,
            RuleKind::PluralCollections(rule) => rule,
            RuleKind::BooleanPrefix(rule) => rule,
        }
    }
}

impl Rule for RuleKind {
    fn name(&self) -> &'static str {
        self.as_rule().name()
    }

    fn description(&self) -> &'static str {
        self.as_rule().description()
    }

    fn weight(&self) -> f64 {
        self.as_rule().weight()
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        self.as_rule().validate(document)
    }
}

/// All rules with configuration applied, in registration order
fn registry(config: &ScorerConfig) -> Vec<RuleKind> {
    vec![
        RuleKind::Pii(PiiRule),
        RuleKind::CompositeKeys(CompositeKeysRule::new(
            config.composite_keys.max_composite_keys,
        )),
        RuleKind::CycleCounter(CycleCounterRule),
        RuleKind::NullBlastRadius(NullBlastRadiusRule::new(config.blast_radius.clone())),
        RuleKind::Deprecation(DeprecationRule),
        RuleKind::ProblemUnion(ProblemUnionRule),
        RuleKind::NullableExternal(NullableExternalRule),
        RuleKind::PluralCollections(PluralCollectionsRule),
        RuleKind::BooleanPrefix(BooleanPrefixRule),
    ]
}

/// Every rule with default settings
pub fn default_rules() -> Vec<RuleKind> {
    registry(&ScorerConfig::default())
}

/// Rules enabled by `config`, configured by it, in registration order
pub fn build_rules(config: &ScorerConfig) -> Vec<RuleKind> {
    registry(config)
        .into_iter()
        .filter(|rule| {
            let enabled = config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Rule [{}] disabled by config", rule.name());
            }
            enabled
        })
        .collect()
}

/// Display names of all rules in registration order
pub fn rule_names() -> Vec<&'static str> {
    default_rules().iter().map(|rule| rule.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_and_weights() {
        let rules = default_rules();
        let listed: Vec<(&str, f64)> = rules.iter().map(|r| (r.name(), r.weight())).collect();
        assert_eq!(
            listed,
            vec![
                ("PII", 10.0),
                ("Composite Keys", 5.0),
                ("Cycle Counter", 15.0),
                ("Null Blast Radius", 20.0),
                ("Deprecation", 5.0),
                ("Problem Union", 10.0),
                ("Nullable External", 15.0),
                ("Plural Collections", 5.0),
                ("Boolean Prefix", 5.0),
            ]
        );
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let mut config = ScorerConfig::default();
        config.disable_rule("cycle-counter");
        config.disable_rule("PII");

        let names: Vec<&str> = build_rules(&config).iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "Composite Keys");
        assert!(!names.contains(&"Cycle Counter"));
    }

    #[test]
    fn test_config_reaches_rules() {
        let mut config = ScorerConfig::default();
        config.composite_keys.max_composite_keys = 0;
        let document = crate::parsers::parse_schema("type Product @key(fields: \"id\") { id: ID! }")
            .expect("parse schema");

        let composite = build_rules(&config)
            .into_iter()
            .find(|r| r.name() == "Composite Keys")
            .expect("composite keys rule");
        let result = composite.validate(&document).expect("rule runs");
        assert_eq!(result.violation_count(), 1);
    }

    #[test]
    fn test_every_rule_has_description() {
        for rule in default_rules() {
            assert!(!rule.description().is_empty(), "{}", rule.name());
        }
    }
}
