use serde::Serialize;

/// A loaded language model: segments text and annotates every token
pub trait LanguageModel: Send + Sync {
    /// Model identifier, e.g. "en_core_web_sm"
    fn name(&self) -> &str;

    /// Language identifier (ISO 639-1 code: "en", "de", etc.)
    fn language_code(&self) -> &str;

    /// Package version the model was loaded from
    fn version(&self) -> &str {
        "0.0.0"
    }

    /// Break text into annotated tokens, in order
    fn analyze(&self, text: &str) -> Vec<Token>;
}

/// A single segment of analyzed text.
///
/// Concatenating `text` and `whitespace` of every token yields the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    /// Trailing whitespace consumed together with the token ("" or " ")
    pub whitespace: String,
    /// Byte offset of `text` in the analyzed input
    pub offset: usize,
    pub lower: String,
    /// Lowercased dictionary form
    pub lemma: String,
    pub is_space: bool,
    pub is_punct: bool,
    pub is_stop: bool,
    pub is_alpha: bool,
    pub like_num: bool,
}

impl Token {
    pub fn text_with_ws(&self) -> String {
        format!("{}{}", self.text, self.whitespace)
    }
}
