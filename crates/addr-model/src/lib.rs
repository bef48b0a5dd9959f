//! Rule model for address standardization.
//!
//! An [`AbbreviationRule`] maps a place-designator word ("Carrera", "Edificio")
//! to its official abbreviation. A [`RuleSet`] is an ordered list of rules;
//! order matters because each rule is applied to the output of the previous
//! one.
//!
//! Rule sets come from the built-in catalog ([`default_rule_set`]) or from a
//! TOML file ([`load_rule_set`]).

mod catalog;
mod config;
mod error;
mod rule;

pub use catalog::{DEFAULT_RULES, default_rule_set};
pub use config::{load_rule_set, parse_rule_set};
pub use error::{Result, RuleSetError};
pub use rule::{AbbreviationRule, RuleSet};
