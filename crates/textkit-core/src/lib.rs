pub mod error;
pub mod language;
pub mod package;
pub mod preprocess;
pub mod provider;

pub use error::ModelUnavailableError;
pub use language::{LanguageModel, Token};
pub use package::{LemmaRule, ModelPackage};
pub use preprocess::TextPreprocessor;
pub use provider::{ModelLoader, ModelProvider, PackageSource, StaticProvider};
