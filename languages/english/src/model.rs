use std::collections::HashSet;

use textkit_core::{LanguageModel, ModelPackage, ModelUnavailableError, Token};

use crate::lemmatizer::{self, EnglishLemmatizer};
use crate::tokenizer::EnglishTokenizer;

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion",
];

/// Punctuation in the Unicode sense; currency and math symbols are not
pub fn is_punct_char(c: char) -> bool {
    match c {
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => false,
        c if c.is_ascii_punctuation() => true,
        '“' | '”' | '‘' | '’' | '«' | '»' | '‹' | '›' | '„' | '–' | '—' | '…' | '¿' | '¡' | '·'
        | '§' | '¶' => true,
        _ => false,
    }
}

pub fn like_num(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let digits: String = unsigned.chars().filter(|c| !matches!(c, ',' | '.')).collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if let Some((num, den)) = unsigned.split_once('/') {
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if all_digits(num) && all_digits(den) {
            return true;
        }
    }

    NUMBER_WORDS.contains(&text.to_lowercase().as_str())
}

/// Rule-based English pipeline built from a model package
pub struct EnglishModel {
    name: String,
    version: String,
    tokenizer: EnglishTokenizer,
    lemmatizer: EnglishLemmatizer,
    stop_words: HashSet<String>,
}

impl EnglishModel {
    pub fn from_package(package: ModelPackage) -> Result<Self, ModelUnavailableError> {
        // Special-case pieces index into the input, so they must rebuild their key
        package.validate(&package.name)?;

        if package.lang != "en" {
            return Err(ModelUnavailableError::UnsupportedLanguage {
                name: package.name,
                lang: package.lang,
            });
        }

        let stop_words = package
            .stop_words
            .iter()
            .map(|w| lemmatizer::normalize(w))
            .collect();

        Ok(Self {
            tokenizer: EnglishTokenizer::new(package.special_cases),
            lemmatizer: EnglishLemmatizer::new(package.lemma_exceptions, package.lemma_rules),
            stop_words,
            name: package.name,
            version: package.version,
        })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&lemmatizer::normalize(word))
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

impl LanguageModel for EnglishModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn language_code(&self) -> &str {
        "en"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn analyze(&self, text: &str) -> Vec<Token> {
        self.tokenizer
            .tokenize(text)
            .into_iter()
            .map(|piece| {
                let is_space = piece.text.chars().all(char::is_whitespace);
                let (lemma, is_stop) = if is_space {
                    (piece.text.to_string(), false)
                } else {
                    (self.lemmatizer.lemmatize(piece.text), self.is_stop_word(piece.text))
                };

                Token {
                    text: piece.text.to_string(),
                    whitespace: piece.whitespace.to_string(),
                    offset: piece.offset,
                    lower: piece.text.to_lowercase(),
                    lemma,
                    is_space,
                    is_punct: !is_space && piece.text.chars().all(is_punct_char),
                    is_stop,
                    is_alpha: piece.text.chars().all(char::is_alphabetic),
                    like_num: like_num(piece.text),
                }
            })
            .collect()
    }
}
