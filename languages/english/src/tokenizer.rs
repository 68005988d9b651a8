use std::collections::HashMap;

/// A raw slice of the input before annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    pub text: &'a str,
    pub offset: usize,
    /// Trailing whitespace consumed with the piece ("" or " ")
    pub whitespace: &'a str,
}

const CLITICS: &[&str] = &[
    "n't", "'s", "'m", "'d", "'ll", "'re", "'ve", "n’t", "’s", "’m", "’d", "’ll", "’re", "’ve",
];

fn is_prefix_char(c: char) -> bool {
    matches!(
        c,
        '(' | '[' | '{' | '"' | '\'' | '`' | '“' | '‘' | '«' | '¿' | '¡' | '$' | '£' | '€' | '¥'
            | '#' | '*' | '&' | '<' | '~' | '§'
    )
}

fn is_suffix_char(c: char) -> bool {
    matches!(
        c,
        ')' | ']' | '}' | '"' | '\'' | '”' | '’' | '»' | ',' | '.' | ';' | ':' | '!' | '?' | '%'
            | '°' | '*' | '>'
    )
}

fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '–' | '—')
}

/// "U.S.", "J." and similar keep their final period
fn is_acronym(chunk: &str) -> bool {
    let Some(body) = chunk.strip_suffix('.') else {
        return false;
    };
    let segments: Vec<&str> = body.split('.').collect();
    let single_letters = segments
        .iter()
        .all(|s| s.chars().count() == 1 && s.chars().all(char::is_alphabetic));
    single_letters
        && (segments.len() >= 2 || body.chars().all(char::is_uppercase))
}

/// Rule-based English tokenizer: whitespace split, then special cases,
/// prefixes, suffixes and infixes on every chunk
pub struct EnglishTokenizer {
    special_cases: HashMap<String, Vec<String>>,
}

impl EnglishTokenizer {
    pub fn new(special_cases: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            special_cases: special_cases.into_iter().collect(),
        }
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Piece<'a>> {
        let mut pieces = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];

            if rest.starts_with(char::is_whitespace) {
                let run_len = rest
                    .find(|c: char| !c.is_whitespace())
                    .unwrap_or(rest.len());
                pieces.push(Piece {
                    text: &rest[..run_len],
                    offset: pos,
                    whitespace: "",
                });
                pos += run_len;
                continue;
            }

            let chunk_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            self.split_chunk(&rest[..chunk_len], pos, &mut pieces);
            pos += chunk_len;

            // One plain space belongs to the preceding token
            if text[pos..].starts_with(' ') {
                if let Some(last) = pieces.last_mut() {
                    last.whitespace = &text[pos..pos + 1];
                }
                pos += 1;
            }
        }

        pieces
    }

    fn split_chunk<'a>(&self, chunk: &'a str, base: usize, out: &mut Vec<Piece<'a>>) {
        let mut suffixes: Vec<Piece<'a>> = Vec::new();
        let mut start = 0;
        let mut end = chunk.len();

        while start < end {
            let current = &chunk[start..end];

            if let Some(parts) = self.special_cases.get(current) {
                let mut at = start;
                for part in parts {
                    out.push(piece(chunk, at, at + part.len(), base));
                    at += part.len();
                }
                start = end;
                break;
            }

            if CLITICS.iter().any(|c| current.eq_ignore_ascii_case(c)) {
                break;
            }

            if let Some(len) = prefix_len(current) {
                out.push(piece(chunk, start, start + len, base));
                start += len;
                continue;
            }

            if let Some(len) = suffix_len(current) {
                suffixes.push(piece(chunk, end - len, end, base));
                end -= len;
                continue;
            }

            break;
        }

        if start < end {
            split_infixes(chunk, start, end, base, out);
        }

        out.extend(suffixes.into_iter().rev());
    }
}

fn piece(chunk: &str, start: usize, end: usize, base: usize) -> Piece<'_> {
    Piece {
        text: &chunk[start..end],
        offset: base + start,
        whitespace: "",
    }
}

fn prefix_len(s: &str) -> Option<usize> {
    if s.starts_with("...") {
        return Some(3);
    }
    let c = s.chars().next()?;
    (c == '…' || is_prefix_char(c)).then(|| c.len_utf8())
}

fn suffix_len(s: &str) -> Option<usize> {
    if s.ends_with("...") {
        return Some(3);
    }

    for clitic in CLITICS {
        if s.len() > clitic.len() && s.is_char_boundary(s.len() - clitic.len()) {
            let (head, tail) = s.split_at(s.len() - clitic.len());
            if tail.eq_ignore_ascii_case(clitic) && head.chars().last().is_some_and(char::is_alphabetic) {
                return Some(clitic.len());
            }
        }
    }

    let c = s.chars().last()?;
    if c == '.' && is_acronym(s) {
        return None;
    }
    (c == '…' || is_suffix_char(c)).then(|| c.len_utf8())
}

/// Split `chunk[start..end]` on hyphens between alphanumerics and inner ellipses
fn split_infixes<'a>(chunk: &'a str, start: usize, end: usize, base: usize, out: &mut Vec<Piece<'a>>) {
    let current = &chunk[start..end];
    let chars: Vec<(usize, char)> = current.char_indices().collect();
    let mut seg = 0;
    let mut i = 0;

    while i < chars.len() {
        let (at, c) = chars[i];
        let infix_len = if at > 0 && current[at..].starts_with("...") && at + 3 < current.len() {
            3
        } else if at > 0 && c == '…' && at + c.len_utf8() < current.len() {
            c.len_utf8()
        } else if is_hyphen(c)
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1].1.is_alphanumeric()
            && chars[i + 1].1.is_alphanumeric()
        {
            c.len_utf8()
        } else {
            0
        };

        if infix_len == 0 {
            i += 1;
            continue;
        }

        if at > seg {
            out.push(piece(chunk, start + seg, start + at, base));
        }
        out.push(piece(chunk, start + at, start + at + infix_len, base));
        seg = at + infix_len;
        while i < chars.len() && chars[i].0 < seg {
            i += 1;
        }
    }

    if seg < current.len() {
        out.push(piece(chunk, start + seg, end, base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> EnglishTokenizer {
        EnglishTokenizer::new([
            ("e.g.".to_string(), vec!["e.g.".to_string()]),
            ("cannot".to_string(), vec!["can".to_string(), "not".to_string()]),
        ])
    }

    fn texts(text: &str) -> Vec<&str> {
        tokenizer().tokenize(text).into_iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(texts("Hello   World"), vec!["Hello", "  ", "World"]);
        assert_eq!(texts("  lead"), vec!["  ", "lead"]);
        assert_eq!(texts("a\nb"), vec!["a", "\n", "b"]);
        assert!(texts("").is_empty());
    }

    #[test]
    fn test_reconstructs_input() {
        let t = tokenizer();
        let text = "  Don't stop-believing...  (e.g. U.S. costs $5.50!)\n\tend ";
        let rebuilt: String = t
            .tokenize(text)
            .iter()
            .map(|p| format!("{}{}", p.text, p.whitespace))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_offsets() {
        let t = tokenizer();
        let text = "Hi, (you)";
        for p in t.tokenize(text) {
            assert_eq!(&text[p.offset..p.offset + p.text.len()], p.text);
        }
    }

    #[test]
    fn test_punctuation_split() {
        assert_eq!(texts("Hello, world!"), vec!["Hello", ",", "world", "!"]);
        assert_eq!(texts("(quoted)"), vec!["(", "quoted", ")"]);
        assert_eq!(texts("!!!"), vec!["!", "!", "!"]);
        assert_eq!(texts("wait..."), vec!["wait", "..."]);
        assert_eq!(texts("$5"), vec!["$", "5"]);
        assert_eq!(texts("50%"), vec!["50", "%"]);
    }

    #[test]
    fn test_clitics() {
        assert_eq!(texts("don't"), vec!["do", "n't"]);
        assert_eq!(texts("She's"), vec!["She", "'s"]);
        assert_eq!(texts("we’ll"), vec!["we", "’ll"]);
        assert_eq!(texts("can't."), vec!["ca", "n't", "."]);
    }

    #[test]
    fn test_special_cases_and_acronyms() {
        assert_eq!(texts("e.g."), vec!["e.g."]);
        assert_eq!(texts("(e.g."), vec!["(", "e.g."]);
        assert_eq!(texts("cannot"), vec!["can", "not"]);
        assert_eq!(texts("U.S."), vec!["U.S."]);
        assert_eq!(texts("end."), vec!["end", "."]);
    }

    #[test]
    fn test_infixes() {
        assert_eq!(texts("well-known"), vec!["well", "-", "known"]);
        assert_eq!(texts("wait...what"), vec!["wait", "...", "what"]);
        assert_eq!(texts("-5"), vec!["-5"]);
    }
}
