//! Built-in abbreviation catalog for Colombian street addresses.

use crate::rule::RuleSet;

/// Default place-designator abbreviations, in application order.
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    ("Edificio", "ED"),
    ("Piso", "P"),
    ("Calle", "CL"),
    ("Carrera", "CR"),
    ("Diagonal", "DG"),
    ("Avenida", "AV"),
    ("Bloque", "BL"),
    ("Conjunto", "CON"),
    ("Apartamento", "AP"),
    ("Departamento", "DPTO"),
    ("Zona franca", "ZF"),
];

/// Returns a fresh copy of the built-in rule set.
pub fn default_rule_set() -> RuleSet {
    RuleSet::from_pairs(DEFAULT_RULES.iter().copied())
}
