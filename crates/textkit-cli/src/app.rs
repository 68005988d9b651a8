use std::path::PathBuf;

use textkit_config::Config;
use textkit_core::{PackageSource, TextPreprocessor};
use textkit_lang_english::{BundledSource, EnglishLoader};
use textkit_registry::{HttpSource, ModelRegistry, RegistryProvider, SourceChain};

/// Config plus the provider built from it
pub struct App {
    config: Config,
    provider: RegistryProvider,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut sources = SourceChain::new().with_source(BundledSource);
        if !config.registry.offline {
            sources = sources.with_source(HttpSource::new(
                config.registry.url.clone(),
                config.download_timeout(),
            )?);
        }
        tracing::debug!("Package sources: {}", sources.describe());

        let registry = ModelRegistry::new(config.models_dir(), sources);
        let provider = RegistryProvider::new(registry).with_loader(EnglishLoader);

        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn preprocessor(&self) -> anyhow::Result<TextPreprocessor> {
        let pre = TextPreprocessor::from_provider(&self.provider, &self.config.model.name).await?;
        Ok(pre)
    }

    pub async fn preprocess(&self, text: &str) -> anyhow::Result<String> {
        Ok(self.preprocessor().await?.preprocess_text(text))
    }

    pub async fn deep_preprocess(&self, text: &str) -> anyhow::Result<String> {
        Ok(self.preprocessor().await?.deep_preprocess_text(text))
    }

    /// Tokens as JSON lines
    pub async fn tokens_jsonl(&self, text: &str) -> anyhow::Result<String> {
        let pre = self.preprocessor().await?;
        let lines = pre
            .analyze(text)
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    pub async fn download(&self, name: &str, force: bool) -> anyhow::Result<PathBuf> {
        let registry = self.provider.registry();
        if !force && registry.is_installed(name).await? {
            tracing::info!("{name} is already installed");
            return Ok(registry.package_path(name));
        }
        Ok(registry.install(name).await?)
    }

    pub async fn installed_models(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.provider.registry().installed_models().await?)
    }

    pub async fn remove(&self, name: &str) -> anyhow::Result<()> {
        Ok(self.provider.registry().uninstall(name).await?)
    }
}
