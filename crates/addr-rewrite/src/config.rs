//! Configuration for the rewrite step.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewriteError};

/// Default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "deepseek-r1:7b";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Placeholder replaced by the address in the prompt template.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

/// Default prompt template.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Estandariza la siguiente dirección colombiana usando \
     las abreviaturas oficiales (CL, CR, AV, DG, ED, P, AP, BL). Responde únicamente con la \
     dirección estandarizada, sin explicaciones.\n\nDirección: {address}";

/// Settings for the generative rewrite step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Base URL of the Ollama server.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Prompt with an `{address}` placeholder.
    pub prompt_template: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RewriteConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that the prompt template embeds the address.
    pub fn validate(&self) -> Result<()> {
        if !self.prompt_template.contains(ADDRESS_PLACEHOLDER) {
            return Err(RewriteError::InvalidTemplate {
                placeholder: ADDRESS_PLACEHOLDER,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RewriteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.model, "deepseek-r1:7b");
    }

    #[test]
    fn test_template_without_placeholder() {
        let config = RewriteConfig {
            prompt_template: "Standardize this".to_string(),
            ..RewriteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RewriteError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RewriteConfig = serde_json::from_str(r#"{"model": "llama3"}"#).unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
