pub mod lemmatizer;
pub mod loader;
pub mod model;
pub mod tokenizer;

pub use lemmatizer::EnglishLemmatizer;
pub use loader::{BUNDLED_MODEL, BundledSource, EnglishLoader};
pub use model::EnglishModel;
pub use tokenizer::EnglishTokenizer;
