use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::files::Files;

pub struct JsonFormatting;

impl JsonFormatting {
    pub fn read<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
        let data = Files::read_to_string(path)?;
        serde_json::from_str(&data).with_context(|| format!("Invalid JSON in {}", path.display()))
    }

    /// Pretty-printed, with a trailing newline
    pub fn write<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
        let mut data = Self::to_pretty_string(value)?;
        data.push('\n');
        Files::write_string(path, &data)?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    pub fn to_pretty_string<T: Serialize>(value: &T) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Re-serialize a JSON document without insignificant whitespace
    pub fn minify(json: &str) -> anyhow::Result<String> {
        let value: serde_json::Value = serde_json::from_str(json).context("Invalid JSON")?;
        Ok(serde_json::to_string(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        word: String,
        count: u32,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/entry.json");
        let entry = Entry {
            word: "cat".into(),
            count: 2,
        };

        JsonFormatting::write(&path, &entry).unwrap();
        let raw = Files::read_to_string(&path).unwrap();
        assert!(raw.ends_with("}\n"));
        assert!(raw.contains("\n  \"word\": \"cat\""));

        let back: Entry = JsonFormatting::read(&path).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_minify() {
        let minified = JsonFormatting::minify("{\n  \"a\": [1, 2],\n  \"b\": null\n}").unwrap();
        assert_eq!(minified, r#"{"a":[1,2],"b":null}"#);
        assert!(JsonFormatting::minify("{oops").is_err());
    }

    #[test]
    fn test_read_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        Files::write_string(&path, "not json").unwrap();

        let err = JsonFormatting::read::<Entry>(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
