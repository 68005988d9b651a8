/// Raised when a language model cannot be found, installed or loaded
#[derive(Debug, thiserror::Error)]
pub enum ModelUnavailableError {
    #[error("Invalid model name: {0:?}")]
    InvalidName(String),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Failed to download model {name}: {reason}")]
    DownloadFailed { name: String, reason: String },

    #[error("Corrupt model package {name}: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("No loader for language {lang:?} (model {name})")]
    UnsupportedLanguage { name: String, lang: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelUnavailableError {
    pub fn corrupt(name: &str, reason: impl ToString) -> Self {
        Self::Corrupt {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn download_failed(name: &str, reason: impl ToString) -> Self {
        Self::DownloadFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True when the model simply does not exist at the queried location
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
