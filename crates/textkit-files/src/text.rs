use std::path::Path;

use crate::files::Files;

pub struct TextFormatting;

impl TextFormatting {
    /// CRLF and lone CR become LF
    pub fn normalize_newlines(text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }

    /// Every whitespace run becomes one space; ends are trimmed
    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn strip_blank_lines(text: &str) -> String {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
        let text = Self::normalize_newlines(&Files::read_to_string(path)?);
        Ok(text.lines().map(str::to_string).collect())
    }

    /// One line per item, newline-terminated
    pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> anyhow::Result<()> {
        let mut out = String::new();
        for line in lines {
            out.push_str(line.as_ref());
            out.push('\n');
        }
        Files::write_string(path, &out)?;
        tracing::debug!("Wrote {} lines to {}", lines.len(), path.display());
        Ok(())
    }
}
