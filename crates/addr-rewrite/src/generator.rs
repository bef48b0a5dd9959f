//! Text generation service boundary.

use crate::error::Result;

/// One generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Model identifier.
    pub model: String,
    /// Fully rendered prompt.
    pub prompt: String,
}

/// A blocking text-generation service.
///
/// The response is free text; no structure is assumed or validated.
pub trait TextGenerator {
    /// Sends one request and returns the generated text.
    fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        (**self).generate(request)
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        (**self).generate(request)
    }
}
