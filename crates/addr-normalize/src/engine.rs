//! Whole-word, case-insensitive abbreviation engine.

use std::borrow::Cow;

use addr_model::RuleSet;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::{NormalizeError, Result};

/// A rule compiled into its word-boundary matcher.
#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: Regex,
    abbreviation: String,
}

/// Applies an ordered rule set to address text.
///
/// Built once from a [`RuleSet`] and immutable afterwards; it holds no mutable
/// state, so a single engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    /// Compiles one matcher per rule, preserving rule order.
    ///
    /// Terms are matched literally: regex metacharacters in a term carry no
    /// special meaning.
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let compiled = rules
            .iter()
            .map(|rule| {
                let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&rule.term)))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| NormalizeError::InvalidPattern {
                        term: rule.term.clone(),
                        source,
                    })?;
                Ok(CompiledRule {
                    pattern,
                    abbreviation: rule.abbreviation.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(rule_count = compiled.len(), "compiled abbreviation rules");
        Ok(Self { rules: compiled })
    }

    /// Number of rules in the engine.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Normalizes a possibly-missing value.
    ///
    /// Missing values are passed through unchanged.
    pub fn normalize(&self, value: Option<&str>) -> Option<String> {
        value.map(|text| self.normalize_text(text))
    }

    /// Applies every rule, in order, to the full text.
    ///
    /// Each rule runs over the output of the previous rule, so an abbreviation
    /// that equals a later rule's term is rewritten again.
    pub fn normalize_text(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            let replaced = match rule
                .pattern
                .replace_all(&current, NoExpand(&rule.abbreviation))
            {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            current = replaced;
        }
        current
    }
}
