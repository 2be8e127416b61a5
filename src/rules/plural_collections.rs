//! Plural collection naming checker
//!
//! A field returning a (nullable) list should have a plural name:
//! `users: [User]`, not `user: [User]`.
//!
//! Plurality uses English inflection rules: a word is plural when
//! pluralizing it again leaves it unchanged. Later rules in the table take
//! precedence over earlier ones.
//!
//! The tables carry every suffix rule of the common English inflection set
//! but only a subset of its uncountable words and irregular pairs, picked for
//! words that show up in schema field names. Rare words outside those lists
//! fall through to the suffix rules and may be judged differently.

use super::base::{field_location, summary_message, Rule};
use crate::models::{ValidationResult, Violation};
use crate::parsers::{SchemaDocument, TypeRef};
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

const UNCOUNTABLE: &[&str] = &[
    "advice", "aircraft", "analytics", "athletics", "audio", "cash", "chassis", "clothing", "commerce",
    "corps", "data", "debris", "equipment", "feedback", "firmware", "hardware", "headquarters",
    "health", "homework", "information", "inventory", "jeans", "knowledge", "luggage", "mail",
    "media", "metadata", "money", "moose", "music", "news", "personnel", "police", "research",
    "rice", "salmon", "scissors", "series", "sheep", "software", "sms", "species", "staff", "traffic",
    "weather", "wildlife",
];

/// (singular, plural) pairs the suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("ox", "oxen"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("die", "dice"),
    ("axe", "axes"),
    ("quiz", "quizzes"),
    ("echo", "echoes"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("schema", "schemata"),
    ("genus", "genera"),
    ("thief", "thieves"),
    ("proof", "proofs"),
    ("canvas", "canvases"),
    ("passerby", "passersby"),
    ("pickaxe", "pickaxes"),
    ("stigma", "stigmata"),
    ("dogma", "dogmata"),
    ("valve", "valves"),
    ("groove", "grooves"),
    ("human", "humans"),
    ("this", "these"),
    ("that", "those"),
];

static PLURAL_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn plural_rules() -> &'static [(Regex, &'static str)] {
    PLURAL_RULES.get_or_init(|| {
        [
            (r"s?$", "s"),
            (r"[^\x00-\x7F]$", "${0}"),
            (r"([^aeiou]ese)$", "${1}"),
            (r"(ax|test)is$", "${1}es"),
            (r"(alias|[^aou]us|t[lm]as|gas|ris)$", "${1}es"),
            (r"(e[mn]u)s?$", "${1}s"),
            (r"([^l]ias|[aeiou]las|[ejzr]as|[iu]am)$", "${1}"),
            (
                r"(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
                "${1}i",
            ),
            (r"(alumn|alg|vertebr)(?:a|ae)$", "${1}ae"),
            (r"(seraph|cherub)(?:im)?$", "${1}im"),
            (r"(her|at|gr)o$", "${1}oes"),
            (
                r"(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|quor)(?:a|um)$",
                "${1}a",
            ),
            (
                r"(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)(?:a|on)$",
                "${1}a",
            ),
            (r"sis$", "ses"),
            (r"(?:(kni|wi|li)fe|(ar|l|ea|eo|oa|hoo)f)$", "${1}${2}ves"),
            (r"([^aeiouy]|qu)y$", "${1}ies"),
            (r"([^ch][ieo][ln])ey$", "${1}ies"),
            (r"(x|ch|ss|sh|zz)$", "${1}es"),
            (r"(matr|cod|mur|sil|vert|ind|append)(?:ix|ex)$", "${1}ices"),
            (r"\b((?:tit)?m|l)(?:ice|ouse)$", "${1}ice"),
            (r"(pe)(?:rson|ople)$", "${1}ople"),
            (r"(child)(?:ren)?$", "${1}ren"),
            (r"eaux$", "${0}"),
            (r"m[ae]n$", "men"),
            (r"^thou$", "you"),
            // Uncountable endings
            (r"[^aeiou]ese$", "${0}"),
            (r"deer$", "${0}"),
            (r"fish$", "${0}"),
            (r"measles$", "${0}"),
            (r"o[iu]s$", "${0}"),
            (r"pox$", "${0}"),
            (r"sheep$", "${0}"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
        .collect()
    })
}

/// Pluralize a lowercase word with the suffix rules only
fn apply_plural_rules(word: &str) -> String {
    plural_rules()
        .iter()
        .rev()
        .find(|(rule, _)| rule.is_match(word))
        .map(|(rule, replacement)| rule.replace(word, *replacement).into_owned())
        .unwrap_or_else(|| word.to_string())
}

/// Whether `word` already reads as plural (case-insensitive)
pub fn is_plural(word: &str) -> bool {
    let token = word.to_lowercase();
    if token.is_empty() || UNCOUNTABLE.contains(&token.as_str()) {
        return true;
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == token) {
        return true;
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == token) {
        return false;
    }
    apply_plural_rules(&token) == token
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PluralCollectionsRule;

impl Rule for PluralCollectionsRule {
    fn name(&self) -> &'static str {
        "Plural Collections"
    }

    fn description(&self) -> &'static str {
        "Detects list fields with singular names"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn validate(&self, document: &SchemaDocument) -> Result<ValidationResult> {
        let violations: Vec<Violation> = document
            .field_definitions()
            .filter(|(_, field)| matches!(field.ty, TypeRef::List(_)) && !is_plural(&field.name))
            .map(|(owner, field)| {
                Violation::new(
                    format!("Field \"{}\" returns a list but is not plural", field.name),
                    field_location(owner, field),
                )
            })
            .collect();

        let message = summary_message(
            violations.len(),
            "collection fields that are not plural",
            "All collection fields are plural.",
        );
        Ok(ValidationResult::new(self.name(), violations, message))
    }
}
