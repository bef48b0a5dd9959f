//! Address normalization.
//!
//! Rewrites place-designator words in free-text addresses to their official
//! abbreviations using an ordered [`RuleSet`](addr_model::RuleSet).
//!
//! # Example
//!
//! ```
//! use addr_model::RuleSet;
//! use addr_normalize::RuleEngine;
//!
//! let rules = RuleSet::from_pairs([("Carrera", "CR"), ("Edificio", "ED"), ("Piso", "P")]);
//! let engine = RuleEngine::new(&rules).unwrap();
//!
//! assert_eq!(
//!     engine.normalize_text("Carrera 10 # 20-30, Edificio Central, Piso 3"),
//!     "CR 10 # 20-30, ED Central, P 3"
//! );
//! assert_eq!(engine.normalize(None), None);
//! ```
//!
//! # Matching
//!
//! - **Whole words only**: `Calle` matches in `Calle 5` but not in `Calleja 5`
//! - **Case-insensitive**: `CARRERA`, `carrera` and `Carrera` all match
//! - **Sequential**: each rule is applied to the output of the previous one
//! - **Verbatim replacement**: the abbreviation is inserted exactly as configured

mod column;
mod engine;
mod error;

pub use column::{
    ColumnOptions, ColumnReport, ColumnTarget, DEFAULT_OUTPUT_COLUMN, normalize_column,
};
pub use engine::RuleEngine;
pub use error::{NormalizeError, Result};
