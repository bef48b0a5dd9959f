//! TOML rule files.
//!
//! ```toml
//! [[rule]]
//! term = "Carrera"
//! abbreviation = "CR"
//!
//! [[rule]]
//! term = "Calle"
//! abbreviation = "CL"
//! ```

use std::fs;
use std::path::Path;

use crate::error::{Result, RuleSetError};
use crate::rule::RuleSet;

/// Loads and validates a rule set from a TOML file.
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let content = fs::read_to_string(path).map_err(|e| RuleSetError::io(path, e))?;
    let rules: RuleSet = toml::from_str(&content).map_err(|source| RuleSetError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    rules.validate()?;
    Ok(rules)
}

/// Parses and validates a rule set from TOML text.
///
/// Parse errors are reported against a placeholder path of `<inline>`.
pub fn parse_rule_set(content: &str) -> Result<RuleSet> {
    let rules: RuleSet = toml::from_str(content).map_err(|source| RuleSetError::Toml {
        path: "<inline>".into(),
        source,
    })?;
    rules.validate()?;
    Ok(rules)
}
