//! Fail-open behavior of the column rewrite.

use std::cell::Cell;

use addr_rewrite::{
    AddressRewriter, GenerateRequest, OllamaClient, RewriteConfig, RewriteError, TextGenerator,
    rewrite_column,
};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

/// Uppercases prompts, but fails on every call listed in `fail_on`.
struct FlakyGenerator {
    calls: Cell<usize>,
    fail_on: Vec<usize>,
}

impl FlakyGenerator {
    fn failing_on(fail_on: Vec<usize>) -> Self {
        Self {
            calls: Cell::new(0),
            fail_on,
        }
    }
}

impl TextGenerator for FlakyGenerator {
    fn generate(&self, request: &GenerateRequest) -> addr_rewrite::Result<String> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if self.fail_on.contains(&call) {
            return Err(RewriteError::Unavailable("connection refused".to_string()));
        }
        Ok(format!(" {} \n", request.prompt.to_uppercase()))
    }
}

fn plain_config() -> RewriteConfig {
    RewriteConfig {
        prompt_template: "{address}".to_string(),
        ..RewriteConfig::default()
    }
}

fn address_df(values: Vec<Option<&str>>) -> DataFrame {
    let cols: Vec<Column> = vec![Series::new("address".into(), values).into_column()];
    DataFrame::new(cols).unwrap()
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(String::from))
        .collect()
}

#[test]
fn failed_row_keeps_input_and_run_continues() {
    let generator = FlakyGenerator::failing_on(vec![1]);
    let rewriter = AddressRewriter::new(&generator, &plain_config()).unwrap();
    let df = address_df(vec![Some("cr 10"), Some("cl 5"), Some("av 68")]);

    let (out, report) = rewrite_column(&df, &rewriter, "address", "rewritten", |_| {}).unwrap();

    assert_eq!(
        strings(&out, "rewritten"),
        vec![
            Some("CR 10".to_string()),
            Some("cl 5".to_string()),
            Some("AV 68".to_string())
        ]
    );
    assert_eq!(report.rewritten, 2);
    assert_eq!(report.fallbacks, 1);
    assert_eq!(generator.calls.get(), 3);
}

#[test]
fn missing_cells_are_not_sent() {
    let generator = FlakyGenerator::failing_on(vec![]);
    let rewriter = AddressRewriter::new(&generator, &plain_config()).unwrap();
    let df = address_df(vec![None, Some("cr 10")]);

    let (out, report) = rewrite_column(&df, &rewriter, "address", "address", |_| {}).unwrap();

    assert_eq!(strings(&out, "address"), vec![None, Some("CR 10".to_string())]);
    assert_eq!(report.skipped, 1);
    assert_eq!(generator.calls.get(), 1);
    assert_eq!(out.width(), 1);
}

#[test]
fn unreachable_service_keeps_every_row() {
    let config = RewriteConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..RewriteConfig::default()
    };
    let client = OllamaClient::new(&config.endpoint, config.timeout()).unwrap();
    let rewriter = AddressRewriter::new(client, &config).unwrap();
    let df = address_df(vec![Some("CR 10 # 20-30"), Some("CL 5")]);

    let (out, report) = rewrite_column(&df, &rewriter, "address", "rewritten", |_| {}).unwrap();

    assert_eq!(strings(&out, "rewritten"), strings(&df, "address"));
    assert_eq!(report.fallbacks, 2);
}

#[test]
fn unknown_column_is_an_error() {
    let generator = FlakyGenerator::failing_on(vec![]);
    let rewriter = AddressRewriter::new(&generator, &plain_config()).unwrap();
    let df = address_df(vec![Some("cr 10")]);

    let result = rewrite_column(&df, &rewriter, "street", "rewritten", |_| {});

    assert!(matches!(result, Err(RewriteError::ColumnNotFound(_))));
}
