use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "en_core_web_sm".to_string()
}

fn default_models_dir() -> String {
    "models".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Model loaded when none is given explicitly
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory installed packages live in
    #[serde(default = "default_models_dir")]
    pub models_dir: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            models_dir: default_models_dir(),
        }
    }
}
