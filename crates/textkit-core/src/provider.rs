use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ModelUnavailableError;
use crate::language::LanguageModel;
use crate::package::ModelPackage;

/// Somewhere model packages can be fetched from (bundled data, HTTP, ...)
#[async_trait::async_trait]
pub trait PackageSource: Send + Sync {
    /// Fetch the raw package bytes for `name`.
    ///
    /// Returns `ModelUnavailableError::NotFound` when this source does not
    /// carry the model at all.
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ModelUnavailableError>;

    /// Short human-readable description, used in logs
    fn describe(&self) -> String;
}

/// Turns a package into a ready model handle for one language
pub trait ModelLoader: Send + Sync {
    /// Language this loader builds models for
    fn language(&self) -> &str;

    fn load(&self, package: ModelPackage) -> Result<Arc<dyn LanguageModel>, ModelUnavailableError>;
}

/// Ensures a named model is present and hands out a loaded handle
#[async_trait::async_trait]
pub trait ModelProvider: Send + Sync {
    async fn provide(&self, name: &str) -> Result<Arc<dyn LanguageModel>, ModelUnavailableError>;
}

/// Provider over handles that are already loaded. Never touches disk or network.
#[derive(Default, Clone)]
pub struct StaticProvider {
    models: HashMap<String, Arc<dyn LanguageModel>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its own name
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.insert(model);
        self
    }

    pub fn insert(&mut self, model: Arc<dyn LanguageModel>) {
        self.models.insert(model.name().to_string(), model);
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl ModelProvider for StaticProvider {
    async fn provide(&self, name: &str) -> Result<Arc<dyn LanguageModel>, ModelUnavailableError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ModelUnavailableError::NotFound(name.to_string()))
    }
}
