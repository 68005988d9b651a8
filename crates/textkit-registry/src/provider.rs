use std::sync::Arc;

use textkit_core::{LanguageModel, ModelLoader, ModelProvider, ModelUnavailableError};

use crate::registry::ModelRegistry;

/// Installs missing models into a registry and loads them by language
pub struct RegistryProvider {
    registry: ModelRegistry,
    loaders: Vec<Box<dyn ModelLoader>>,
}

impl RegistryProvider {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry,
            loaders: Vec::new(),
        }
    }

    pub fn with_loader(mut self, loader: impl ModelLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}

#[async_trait::async_trait]
impl ModelProvider for RegistryProvider {
    async fn provide(&self, name: &str) -> Result<Arc<dyn LanguageModel>, ModelUnavailableError> {
        ModelRegistry::validate_name(name)?;

        if !self.registry.is_installed(name).await? {
            tracing::info!("Model {name} is not installed");
            self.registry.install(name).await?;
        }

        let package = self.registry.read_package(name).await?;
        let loader = self
            .loaders
            .iter()
            .find(|l| l.language() == package.lang)
            .ok_or_else(|| ModelUnavailableError::UnsupportedLanguage {
                name: name.to_string(),
                lang: package.lang.clone(),
            })?;

        tracing::debug!("Building {name} with the {:?} loader", loader.language());
        loader.load(package)
    }
}
