//! Abbreviation rules and ordered rule sets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleSetError};

/// A single term → abbreviation substitution.
///
/// The term is matched as a whole word, case-insensitively. The abbreviation
/// is inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationRule {
    /// Word (or phrase) to replace, e.g. `Carrera` or `Zona franca`.
    pub term: String,
    /// Official abbreviation, e.g. `CR`.
    pub abbreviation: String,
}

impl AbbreviationRule {
    pub fn new(term: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

/// Ordered sequence of abbreviation rules.
///
/// Rules are applied in declaration order and each one sees the output of the
/// previous one, so overlapping terms compose. Terms are expected to be
/// unique; [`RuleSet::validate`] checks this but construction does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(rename = "rule", default)]
    rules: Vec<AbbreviationRule>,
}

impl RuleSet {
    /// Builds a rule set from `(term, abbreviation)` pairs, keeping their order.
    pub fn from_pairs<T, A>(pairs: impl IntoIterator<Item = (T, A)>) -> Self
    where
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(term, abbreviation)| AbbreviationRule::new(term, abbreviation))
                .collect(),
        }
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[AbbreviationRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AbbreviationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks the rule set for configuration errors.
    ///
    /// Rejects an empty set, blank terms or abbreviations, and terms that
    /// appear more than once (compared case-insensitively, since matching is).
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(self.rules.len());
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.term.trim().is_empty() {
                return Err(RuleSetError::EmptyTerm { index });
            }
            if rule.abbreviation.trim().is_empty() {
                return Err(RuleSetError::EmptyAbbreviation {
                    index,
                    term: rule.term.clone(),
                });
            }
            if let Some(&first) = seen.get(&rule.term.to_lowercase()) {
                return Err(RuleSetError::DuplicateTerm {
                    term: rule.term.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(rule.term.to_lowercase(), index);
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a AbbreviationRule;
    type IntoIter = std::slice::Iter<'a, AbbreviationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
