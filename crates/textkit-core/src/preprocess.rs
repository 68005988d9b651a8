use std::fmt;
use std::sync::Arc;

use crate::error::ModelUnavailableError;
use crate::language::{LanguageModel, Token};
use crate::provider::ModelProvider;

/// Normalizes raw text for downstream use with a loaded language model.
///
/// Both processing methods are pure functions of the model handle and the
/// input; the handle is never mutated, so a preprocessor can be cloned and
/// shared across threads freely.
#[derive(Clone)]
pub struct TextPreprocessor {
    model: Arc<dyn LanguageModel>,
}

impl TextPreprocessor {
    pub const DEFAULT_MODEL: &'static str = "en_core_web_sm";

    /// Wrap an already loaded model
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask `provider` for `name`, installing it first if the provider does so
    pub async fn from_provider(
        provider: &dyn ModelProvider,
        name: &str,
    ) -> Result<Self, ModelUnavailableError> {
        tracing::debug!("Requesting model {name}");
        let model = provider.provide(name).await?;
        tracing::info!(
            "Loaded model {} v{} ({})",
            model.name(),
            model.version(),
            model.language_code()
        );
        Ok(Self::new(model))
    }

    pub async fn with_default_model(
        provider: &dyn ModelProvider,
    ) -> Result<Self, ModelUnavailableError> {
        Self::from_provider(provider, Self::DEFAULT_MODEL).await
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the model over `text`
    pub fn analyze(&self, text: &str) -> Vec<Token> {
        self.model.analyze(text)
    }

    /// Lowercased tokens without whitespace tokens, joined by single spaces
    pub fn preprocess_text(&self, text: &str) -> String {
        self.analyze(text)
            .iter()
            .filter(|token| !token.is_space)
            .map(|token| token.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercased lemmas of content tokens only: punctuation, whitespace and
    /// stop words are dropped
    pub fn deep_preprocess_text(&self, text: &str) -> String {
        self.analyze(text)
            .iter()
            .filter(|token| !(token.is_punct || token.is_space || token.is_stop))
            .map(|token| token.lemma.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for TextPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextPreprocessor")
            .field("model", &self.model.name())
            .finish()
    }
}
