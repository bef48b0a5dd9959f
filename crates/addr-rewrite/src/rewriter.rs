//! Prompt rendering and the fail-open rewrite policy.

use tracing::warn;

use crate::config::{ADDRESS_PLACEHOLDER, RewriteConfig};
use crate::error::{Result, RewriteError};
use crate::generator::{GenerateRequest, TextGenerator};

/// Result of rewriting one address with the fallback policy applied.
#[derive(Debug)]
pub enum RewriteOutcome {
    /// The service answered; holds the trimmed response.
    Rewritten(String),
    /// The call failed; holds the input unchanged and the reason.
    Fallback {
        /// The address as it was passed in.
        original: String,
        /// Why the service call failed.
        reason: RewriteError,
    },
}

impl RewriteOutcome {
    /// The value to store: the rewrite, or the original on failure.
    #[must_use]
    pub fn into_value(self) -> String {
        match self {
            Self::Rewritten(value) => value,
            Self::Fallback { original, .. } => original,
        }
    }

    /// Whether the original was kept because the call failed.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Rewrites addresses through a [`TextGenerator`].
pub struct AddressRewriter<G> {
    generator: G,
    model: String,
    prompt_template: String,
}

impl<G: TextGenerator> AddressRewriter<G> {
    /// Creates a rewriter after checking the prompt template.
    pub fn new(generator: G, config: &RewriteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator,
            model: config.model.clone(),
            prompt_template: config.prompt_template.clone(),
        })
    }

    /// Model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Renders the prompt for one address.
    pub fn prompt_for(&self, address: &str) -> String {
        self.prompt_template.replace(ADDRESS_PLACEHOLDER, address)
    }

    /// Sends one request and returns the trimmed response.
    ///
    /// Errors are returned as-is; use [`Self::rewrite_or_original`] for the
    /// fail-open behavior.
    pub fn rewrite(&self, address: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: self.prompt_for(address),
        };
        let response = self.generator.generate(&request)?;
        Ok(response.trim().to_string())
    }

    /// Rewrites `address`, keeping it unchanged if the call fails.
    ///
    /// No retry is attempted. Failures are logged at warn level without the
    /// address itself.
    pub fn rewrite_or_original(&self, address: &str) -> RewriteOutcome {
        match self.rewrite(address) {
            Ok(value) => RewriteOutcome::Rewritten(value),
            Err(reason) => {
                if reason.is_unavailable() {
                    warn!(model = %self.model, error = %reason, "generative service unavailable, keeping original address");
                } else {
                    warn!(model = %self.model, error = %reason, "rewrite failed, keeping original address");
                }
                RewriteOutcome::Fallback {
                    original: address.to_string(),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records prompts and answers from a fixed script.
    struct ScriptedGenerator {
        prompts: RefCell<Vec<String>>,
        answer: fn(&str) -> Result<String>,
    }

    impl ScriptedGenerator {
        fn new(answer: fn(&str) -> Result<String>) -> Self {
            Self {
                prompts: RefCell::new(Vec::new()),
                answer,
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn generate(&self, request: &GenerateRequest) -> Result<String> {
            self.prompts.borrow_mut().push(request.prompt.clone());
            (self.answer)(&request.prompt)
        }
    }

    fn config(template: &str) -> RewriteConfig {
        RewriteConfig {
            prompt_template: template.to_string(),
            ..RewriteConfig::default()
        }
    }

    #[test]
    fn test_prompt_embeds_address() {
        let rewriter =
            AddressRewriter::new(ScriptedGenerator::new(|_| Ok(String::new())), &config("std: {address}"))
                .unwrap();
        assert_eq!(rewriter.prompt_for("CR 10"), "std: CR 10");
    }

    #[test]
    fn test_response_is_trimmed() {
        let rewriter = AddressRewriter::new(
            ScriptedGenerator::new(|_| Ok("  CR 10 # 20-30 \n".to_string())),
            &config("{address}"),
        )
        .unwrap();
        assert_eq!(rewriter.rewrite("Carrera 10").unwrap(), "CR 10 # 20-30");
    }

    #[test]
    fn test_failure_falls_back_to_original() {
        let rewriter = AddressRewriter::new(
            ScriptedGenerator::new(|_| Err(RewriteError::Unavailable("refused".to_string()))),
            &config("{address}"),
        )
        .unwrap();

        let outcome = rewriter.rewrite_or_original("CR 10");

        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_value(), "CR 10");
    }

    #[test]
    fn test_model_is_sent_with_request() {
        let rewriter = AddressRewriter::new(
            ScriptedGenerator::new(|_| Ok("x".to_string())),
            &RewriteConfig {
                model: "llama3".to_string(),
                ..RewriteConfig::default()
            },
        )
        .unwrap();
        assert_eq!(rewriter.model(), "llama3");
        rewriter.rewrite("CR 10").unwrap();
        assert_eq!(rewriter.generator.prompts.borrow().len(), 1);
    }

    #[test]
    fn test_invalid_template_rejected() {
        let result = AddressRewriter::new(
            ScriptedGenerator::new(|_| Ok(String::new())),
            &config("no placeholder"),
        );
        assert!(matches!(result, Err(RewriteError::InvalidTemplate { .. })));
    }
}
