//! Generative-model rewrite of address strings.
//!
//! Each address is sent to a text-generation service with a prompt template,
//! and the trimmed response becomes the new value. The step is fail-open: when
//! a call fails the original address is kept and processing continues.
//!
//! # Overview
//!
//! - [`TextGenerator`] is the service boundary: (model, prompt) in, text out
//! - [`OllamaClient`] implements it against an Ollama `/api/generate` endpoint
//! - [`AddressRewriter`] renders prompts and applies the fallback policy
//! - [`rewrite_column`] runs the rewriter over a DataFrame column
//!
//! # Example
//!
//! ```no_run
//! use addr_rewrite::{AddressRewriter, OllamaClient, RewriteConfig};
//!
//! let config = RewriteConfig::default();
//! let client = OllamaClient::new(&config.endpoint, config.timeout())?;
//! let rewriter = AddressRewriter::new(client, &config)?;
//!
//! // Never fails: a service error yields the input unchanged.
//! let value = rewriter.rewrite_or_original("CR 10 # 20-30").into_value();
//! # Ok::<(), addr_rewrite::RewriteError>(())
//! ```

#![warn(missing_docs)]

mod column;
mod config;
mod error;
mod generator;
mod ollama;
mod rewriter;

pub use column::{RewriteReport, rewrite_column};
pub use config::{
    ADDRESS_PLACEHOLDER, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_PROMPT_TEMPLATE,
    DEFAULT_TIMEOUT_SECS, RewriteConfig,
};
pub use error::{Result, RewriteError};
pub use generator::{GenerateRequest, TextGenerator};
pub use ollama::OllamaClient;
pub use rewriter::{AddressRewriter, RewriteOutcome};
