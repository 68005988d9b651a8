use std::path::{Path, PathBuf};

use textkit_core::{ModelPackage, ModelUnavailableError, PackageSource};
use tokio::fs;

const PACKAGE_EXT: &str = "json";

/// Directory of installed model packages, filled from a `PackageSource`
pub struct ModelRegistry {
    root: PathBuf,
    source: Box<dyn PackageSource>,
}

impl ModelRegistry {
    pub fn new(root: impl Into<PathBuf>, source: impl PackageSource + 'static) -> Self {
        Self {
            root: root.into(),
            source: Box::new(source),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names become file names, so keep them to a safe alphabet
    pub fn validate_name(name: &str) -> Result<(), ModelUnavailableError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if valid {
            Ok(())
        } else {
            Err(ModelUnavailableError::InvalidName(name.to_string()))
        }
    }

    pub fn package_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{PACKAGE_EXT}"))
    }

    pub async fn installed_models(&self) -> Result<Vec<String>, ModelUnavailableError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(PACKAGE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if Self::validate_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Whether `<name>.json` exists as a regular file.
    ///
    /// Anything else sitting at that path is reported as `Corrupt` rather
    /// than treated as installed.
    pub async fn is_installed(&self, name: &str) -> Result<bool, ModelUnavailableError> {
        Self::validate_name(name)?;
        let path = self.package_path(name);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(ModelUnavailableError::corrupt(
                name,
                format!("{} is not a regular file", path.display()),
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch, validate and store a package.
    ///
    /// The bytes go to a hidden `.part` file first and are renamed into place,
    /// so an interrupted or failed install never looks installed.
    pub async fn install(&self, name: &str) -> Result<PathBuf, ModelUnavailableError> {
        Self::validate_name(name)?;
        tracing::info!("Installing model {name} via {}", self.source.describe());

        let bytes = self.source.fetch(name).await?;
        let package = ModelPackage::parse(name, &bytes)?;

        fs::create_dir_all(&self.root).await?;
        let part = self.root.join(format!(".{name}.{}.part", uuid::Uuid::new_v4()));
        let target = self.package_path(name);

        let written = async {
            fs::write(&part, &bytes).await?;
            fs::rename(&part, &target).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&part).await {
                tracing::warn!("Could not remove {}: {cleanup}", part.display());
            }
            return Err(e.into());
        }

        tracing::info!(
            "Installed {name} v{} ({} stop words) to {}",
            package.version,
            package.stop_words.len(),
            target.display()
        );
        Ok(target)
    }

    pub async fn read_package(&self, name: &str) -> Result<ModelPackage, ModelUnavailableError> {
        Self::validate_name(name)?;
        let bytes = match fs::read(self.package_path(name)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModelUnavailableError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        ModelPackage::parse(name, &bytes)
    }

    pub async fn uninstall(&self, name: &str) -> Result<(), ModelUnavailableError> {
        Self::validate_name(name)?;
        match fs::remove_file(self.package_path(name)).await {
            Ok(()) => {
                tracing::info!("Removed model {name}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ModelUnavailableError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
