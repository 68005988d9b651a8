use std::collections::HashMap;

use textkit_core::LemmaRule;
use unicode_normalization::UnicodeNormalization;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Lookup key for a surface form: NFKC, lowercase, curly apostrophes folded
pub fn normalize(word: &str) -> String {
    word.nfkc()
        .collect::<String>()
        .to_lowercase()
        .replace(['’', '‘'], "'")
}

pub struct EnglishLemmatizer {
    exceptions: HashMap<String, String>,
    rules: Vec<LemmaRule>,
}

impl EnglishLemmatizer {
    pub fn new(
        exceptions: impl IntoIterator<Item = (String, String)>,
        rules: Vec<LemmaRule>,
    ) -> Self {
        Self {
            exceptions: exceptions
                .into_iter()
                .map(|(form, lemma)| (normalize(&form), lemma.to_lowercase()))
                .collect(),
            rules,
        }
    }

    /// Reduce a word to its dictionary form
    pub fn lemmatize(&self, word: &str) -> String {
        let key = normalize(word);

        // Irregular forms first (went → go)
        if let Some(lemma) = self.exceptions.get(&key) {
            return lemma.clone();
        }

        if !key.chars().all(char::is_alphabetic) {
            return key;
        }

        self.rules
            .iter()
            .find_map(|rule| self.apply(rule, &key))
            .unwrap_or(key)
    }

    fn apply(&self, rule: &LemmaRule, word: &str) -> Option<String> {
        let stem = word.strip_suffix(rule.suffix.as_str())?;

        if rule.keep_endings.iter().any(|e| word.ends_with(e.as_str())) {
            return None;
        }
        if stem.chars().count() < rule.min_stem || !stem.chars().any(|c| is_vowel(c) || c == 'y') {
            return None;
        }

        let stem = if rule.restore_e && rule.replacement.is_empty() {
            restore_stem(stem)
        } else {
            stem.to_string()
        };

        Some(format!("{}{}", stem, rule.replacement))
    }
}

/// Undo spelling changes made when a verbal suffix was attached:
/// running → run, making → make, relating → relate
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    if n >= 2 {
        let (a, b) = (chars[n - 2], chars[n - 1]);
        if a == b && !is_vowel(b) && !matches!(b, 'l' | 's' | 'z') {
            return chars[..n - 1].iter().collect();
        }
    }

    if n >= 4 && !is_vowel(chars[n - 3]) && (stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz")) {
        return format!("{stem}e");
    }

    if is_short_cvc(&chars) {
        return format!("{stem}e");
    }

    stem.to_string()
}

/// Consonant-vowel-consonant ending with a single vowel group in the stem
fn is_short_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 3 {
        return false;
    }

    let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
    if is_vowel(c1) || !is_vowel(v) || is_vowel(c2) || matches!(c2, 'w' | 'x' | 'y') {
        return false;
    }

    let mut groups = 0;
    let mut in_vowel = false;
    for &c in chars {
        let vowel = is_vowel(c);
        if vowel && !in_vowel {
            groups += 1;
        }
        in_vowel = vowel;
    }
    groups == 1
}
