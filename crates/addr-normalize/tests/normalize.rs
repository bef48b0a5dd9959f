//! Behavioral tests for the abbreviation engine.

use addr_model::{RuleSet, default_rule_set};
use addr_normalize::RuleEngine;
use proptest::prelude::*;

fn colombian_engine() -> RuleEngine {
    RuleEngine::new(&RuleSet::from_pairs([
        ("Carrera", "CR"),
        ("Edificio", "ED"),
        ("Piso", "P"),
    ]))
    .unwrap()
}

#[test]
fn full_address_is_abbreviated() {
    let engine = colombian_engine();

    insta::assert_snapshot!(
        engine.normalize_text("Carrera 10 # 20-30, Edificio Central, Piso 3"),
        @"CR 10 # 20-30, ED Central, P 3"
    );
}

#[test]
fn default_rules_cover_common_designators() {
    let engine = RuleEngine::new(&default_rule_set()).unwrap();

    insta::assert_snapshot!(
        engine.normalize_text("Avenida Boyacá, Conjunto Los Pinos, Bloque 2 Apartamento 301"),
        @"AV Boyacá, CON Los Pinos, BL 2 AP 301"
    );
    insta::assert_snapshot!(
        engine.normalize_text("Diagonal 45 sur, Zona Franca Bogotá"),
        @"DG 45 sur, ZF Bogotá"
    );
}

#[test]
fn longer_words_are_untouched() {
    let engine = RuleEngine::new(&RuleSet::from_pairs([("Calle", "CL")])).unwrap();

    assert_eq!(engine.normalize_text("Calle 5"), "CL 5");
    assert_eq!(engine.normalize_text("Calleja 5"), "Calleja 5");
}

#[test]
fn rules_apply_sequentially() {
    let engine = RuleEngine::new(&RuleSet::from_pairs([("A", "B"), ("B", "C")])).unwrap();

    assert_eq!(engine.normalize_text("A"), "C");
}

#[test]
fn near_miss_stems_are_untouched() {
    let engine = RuleEngine::new(&default_rule_set()).unwrap();
    let text = "Calleja 5, Carreras del Sur, Pisos Altos, Zona industrial";

    assert_eq!(engine.normalize_text(text), text);
}

#[test]
fn missing_value_is_returned_unchanged() {
    assert_eq!(colombian_engine().normalize(None), None);
}

fn flip_case(word: &str, upper: &[bool]) -> String {
    word.chars()
        .zip(upper.iter().copied().chain(std::iter::repeat(false)))
        .map(|(c, up)| {
            if up {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Address-like text: near-miss stems of configured terms, other words and
/// house numbers joined by the usual separators.
fn address_text() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        prop::sample::select(vec![
            "Calleja", "Carreras", "Pisos", "Edificios", "Avenidas", "Bloques", "Diagonales",
            "Conjuntos", "Apartamentos", "Zona", "franca", "Cra", "Bogotá", "Central", "norte",
            "sur", "Los", "Pinos", "Torre",
        ])
        .prop_map(str::to_string),
        "[A-Za-záéíóúñ]{1,9}",
        "[0-9]{1,4}",
    ];
    let separator = prop::sample::select(vec![" ", ", ", " # ", "-", " "]);
    prop::collection::vec((word, separator), 0..10).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, separator)| format!("{word}{separator}"))
            .collect()
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `term` occurs in `text` bounded by non-word characters.
fn contains_whole_word(text: &str, term: &str) -> bool {
    let text = text.to_lowercase();
    let term = term.to_lowercase();
    text.match_indices(&term).any(|(start, found)| {
        let before = text[..start].chars().next_back();
        let after = text[start + found.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

proptest! {
    #[test]
    fn text_without_terms_is_unchanged(text in address_text()) {
        let rules = default_rule_set();
        prop_assume!(!rules.iter().any(|rule| contains_whole_word(&text, &rule.term)));
        let engine = RuleEngine::new(&rules).unwrap();
        prop_assert_eq!(engine.normalize_text(&text), text);
    }

    #[test]
    fn term_in_any_case_is_replaced(
        upper in proptest::collection::vec(any::<bool>(), 7),
        number in 0u32..10_000,
    ) {
        let engine = colombian_engine();
        let input = format!("{} {number}", flip_case("Carrera", &upper));
        prop_assert_eq!(engine.normalize_text(&input), format!("CR {number}"));
    }

    #[test]
    fn term_with_suffix_is_not_replaced(suffix in "[a-z]{1,5}") {
        let engine = colombian_engine();
        let input = format!("Carrera{suffix} 10");
        prop_assert_eq!(engine.normalize_text(&input), input.clone());
    }
}
