use std::sync::Arc;

use textkit_core::{
    LanguageModel, ModelLoader, ModelPackage, ModelUnavailableError, PackageSource,
};

use crate::model::EnglishModel;

pub const BUNDLED_MODEL: &str = "en_core_web_sm";

const BUNDLED_PACKAGE: &str = include_str!("../data/en_core_web_sm.json");

pub struct EnglishLoader;

impl EnglishLoader {
    /// Load the package compiled into the crate
    pub fn load_bundled() -> Result<EnglishModel, ModelUnavailableError> {
        tracing::info!("Loading bundled English model {BUNDLED_MODEL}...");
        let package = ModelPackage::parse(BUNDLED_MODEL, BUNDLED_PACKAGE.as_bytes())?;
        let model = EnglishModel::from_package(package)?;
        tracing::info!("Loaded {} stop words", model.stop_word_count());
        Ok(model)
    }
}

impl ModelLoader for EnglishLoader {
    fn language(&self) -> &str {
        "en"
    }

    fn load(&self, package: ModelPackage) -> Result<Arc<dyn LanguageModel>, ModelUnavailableError> {
        tracing::debug!("Building English model {} v{}", package.name, package.version);
        Ok(Arc::new(EnglishModel::from_package(package)?))
    }
}

/// Serves the packages compiled into this crate, no network needed
pub struct BundledSource;

#[async_trait::async_trait]
impl PackageSource for BundledSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ModelUnavailableError> {
        if name == BUNDLED_MODEL {
            Ok(BUNDLED_PACKAGE.as_bytes().to_vec())
        } else {
            Err(ModelUnavailableError::NotFound(name.to_string()))
        }
    }

    fn describe(&self) -> String {
        format!("bundled ({BUNDLED_MODEL})")
    }
}

#[cfg(test)]
mod tests {
    use textkit_core::TextPreprocessor;

    use super::*;

    fn preprocessor() -> TextPreprocessor {
        TextPreprocessor::new(Arc::new(EnglishLoader::load_bundled().unwrap()))
    }

    #[test]
    fn test_bundled_package_is_valid() {
        let model = EnglishLoader::load_bundled().unwrap();
        assert_eq!(model.name(), BUNDLED_MODEL);
        assert!(model.is_stop_word("the"));
        assert!(model.is_stop_word("The"));
        assert!(model.is_stop_word("n’t"));
        assert!(!model.is_stop_word("fox"));
    }

    #[test]
    fn test_preprocess_text() {
        let pre = preprocessor();
        assert_eq!(pre.preprocess_text(""), "");
        assert_eq!(pre.preprocess_text("Hello   World"), "hello world");
        assert_eq!(pre.preprocess_text("Hello, World!\n"), "hello , world !");
        assert_eq!(pre.preprocess_text("I can't go"), "i ca n't go");
    }

    #[test]
    fn test_deep_preprocess_text() {
        let pre = preprocessor();
        assert_eq!(pre.deep_preprocess_text(""), "");
        assert_eq!(pre.deep_preprocess_text("!!! ... ,,,"), "");
        assert_eq!(pre.deep_preprocess_text("the a an"), "");
        assert_eq!(pre.deep_preprocess_text("   \n\t "), "");
        assert_eq!(
            pre.deep_preprocess_text("The children went running to the parks!"),
            "child go run park"
        );
        assert_eq!(pre.deep_preprocess_text("She studies Cats, DOGS and mice."), "study cat dog mouse");
    }

    #[test]
    fn test_deep_is_subset_of_shallow() {
        let pre = preprocessor();
        let text = "quick brown fox jump over lazy dog";
        let shallow: Vec<String> = pre.preprocess_text(text).split(' ').map(String::from).collect();
        let deep = pre.deep_preprocess_text(text);

        // "over" is a stop word; everything else survives in order
        assert_eq!(deep, "quick brown fox jump lazy dog");
        let mut rest = shallow.iter();
        for word in deep.split(' ') {
            assert!(rest.any(|w| w == word), "{word:?} missing or out of order in {shallow:?}");
        }

        let plain = "quick brown fox";
        assert_eq!(pre.deep_preprocess_text(plain), pre.preprocess_text(plain));
    }

    #[test]
    fn test_idempotent_calls() {
        let pre = preprocessor();
        let text = "Running  faster than   ever, she was making progress.";
        assert_eq!(pre.preprocess_text(text), pre.preprocess_text(text));
        assert_eq!(pre.deep_preprocess_text(text), pre.deep_preprocess_text(text));
    }

    #[tokio::test]
    async fn test_bundled_source() {
        let bytes = BundledSource.fetch(BUNDLED_MODEL).await.unwrap();
        let package = ModelPackage::parse(BUNDLED_MODEL, &bytes).unwrap();
        let model = EnglishLoader.load(package).unwrap();
        assert_eq!(model.language_code(), "en");

        let err = BundledSource.fetch("xx_unknown").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
