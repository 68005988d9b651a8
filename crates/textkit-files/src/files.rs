use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Plain filesystem helpers with path-aware errors
pub struct Files;

impl Files {
    pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
    }

    /// Files directly under `dir` with the given extension, sorted by path
    pub fn list_files(dir: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
        let extension = extension.trim_start_matches('.');
        let entries = fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }

        files.sort();
        tracing::debug!("Found {} .{extension} files in {}", files.len(), dir.display());
        Ok(files)
    }

    pub fn read_to_string(path: &Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Write `contents`, creating parent directories as needed
    pub fn write_string(path: &Path, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir(parent)?;
        }
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    /// Returns whether a file was actually removed
    pub fn remove_if_exists(path: &Path) -> anyhow::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.txt");

        Files::write_string(&path, "hello").unwrap();
        assert_eq!(Files::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "c.txt"] {
            Files::write_string(&dir.path().join(name), "{}").unwrap();
        }
        Files::ensure_dir(&dir.path().join("nested.json")).unwrap();

        let found = Files::list_files(dir.path(), ".json").unwrap();
        let names: Vec<_> = found.iter().filter_map(|p| p.file_name()?.to_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.txt");
        Files::write_string(&path, "x").unwrap();

        assert!(Files::remove_if_exists(&path).unwrap());
        assert!(!Files::remove_if_exists(&path).unwrap());
    }

    #[test]
    fn test_read_missing_has_path_in_error() {
        let err = Files::read_to_string(Path::new("/no/such/file.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }
}
