//! Ollama HTTP client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RewriteError};
use crate::generator::{GenerateRequest, TextGenerator};

/// Path of the non-streaming generation API.
const GENERATE_PATH: &str = "/api/generate";

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking client for an Ollama server.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
}

impl OllamaClient {
    /// Creates a client for `endpoint` (e.g. `http://localhost:11434`).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the generation API.
    fn generate_url(&self) -> String {
        format!("{}{GENERATE_PATH}", self.endpoint)
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        debug!(model = %request.model, "sending generation request");

        let response = self
            .client
            .post(self.generate_url())
            .header(
                USER_AGENT,
                format!("addr-rewrite/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&GenerateBody {
                model: &request.model,
                prompt: &request.prompt,
                stream: false,
            })
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RewriteError::Status { status, message });
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| RewriteError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_trims_slash() {
        let client = OllamaClient::new("http://localhost:11434/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_body_serializes_without_streaming() {
        let body = GenerateBody {
            model: "deepseek-r1:7b",
            prompt: "CR 10",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "deepseek-r1:7b", "prompt": "CR 10", "stream": false})
        );
    }

    #[test]
    fn test_unreachable_server_is_unavailable() {
        // Nothing listens on the discard port.
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let request = GenerateRequest {
            model: "deepseek-r1:7b".to_string(),
            prompt: "CR 10".to_string(),
        };

        let err = client.generate(&request).unwrap_err();

        assert!(err.is_unavailable(), "unexpected error: {err}");
    }
}
