use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{debug, info_span};

use addr_cli::pipeline::{DynRewriter, Job, RunSummary, run_job};
use addr_model::{RuleSet, default_rule_set, load_rule_set};
use addr_normalize::RuleEngine;
use addr_rewrite::{
    AddressRewriter, DEFAULT_PROMPT_TEMPLATE, OllamaClient, RewriteConfig, TextGenerator,
};

use crate::cli::{
    PreprocessArgs, RewriteArgs, RulesArgs, ServiceArgs, StandardizeArgs, TableArgs,
};
use crate::summary::{apply_table_style, header_cell};

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = load_rules(args.rules.rules.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Term"),
        header_cell("Abbreviation"),
    ]);
    apply_table_style(&mut table);
    for (index, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            rule.term.clone(),
            rule.abbreviation.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_standardize(args: &StandardizeArgs) -> Result<RunSummary> {
    let span = info_span!("standardize", rewrite = args.rewrite);
    let _guard = span.enter();
    let engine = build_engine(args.rules.rules.as_deref())?;
    let rewriter = if args.rewrite {
        Some(build_rewriter(&args.service)?)
    } else {
        None
    };
    let job = build_job(&args.table, Some(args.output_column.clone()))?;
    run_job(&job, Some(&engine), rewriter.as_ref())
}

pub fn run_rewrite(args: &RewriteArgs) -> Result<RunSummary> {
    let span = info_span!("rewrite_only");
    let _guard = span.enter();
    let rewriter = build_rewriter(&args.service)?;
    let job = build_job(&args.table, Some(args.output_column.clone()))?;
    run_job(&job, None, Some(&rewriter))
}

pub fn run_preprocess(args: &PreprocessArgs) -> Result<RunSummary> {
    let span = info_span!("preprocess");
    let _guard = span.enter();
    let engine = build_engine(args.rules.rules.as_deref())?;
    let job = build_job(&args.table, None)?;
    run_job(&job, Some(&engine), None)
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => {
            let rules = load_rule_set(path).context("load rule file")?;
            debug!(path = %path.display(), rules = rules.len(), "rule file loaded");
            Ok(rules)
        }
        None => Ok(default_rule_set()),
    }
}

fn build_engine(path: Option<&Path>) -> Result<RuleEngine> {
    let rules = load_rules(path)?;
    RuleEngine::new(&rules).context("compile rules")
}

fn build_rewriter(args: &ServiceArgs) -> Result<DynRewriter> {
    let config = RewriteConfig {
        endpoint: args.endpoint.clone(),
        model: args.model.clone(),
        prompt_template: args
            .prompt_template
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string()),
        timeout_secs: args.timeout_secs,
    };
    let client = OllamaClient::new(&config.endpoint, config.timeout())
        .context("create generative service client")?;
    let generator: Box<dyn TextGenerator> = Box::new(client);
    AddressRewriter::new(generator, &config).context("configure rewrite")
}

fn build_job(table: &TableArgs, output_column: Option<String>) -> Result<Job> {
    Ok(Job {
        input: table.input.clone(),
        output: table.output.clone(),
        delimiter: delimiter_byte(table.delimiter)?,
        column: table.column.clone(),
        output_column,
        show_progress: !table.no_progress,
    })
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        bail!("unsupported delimiter {delimiter:?}");
    }
    Ok(delimiter as u8)
}
