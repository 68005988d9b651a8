use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "https://models.textkit.dev/packages".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_offline() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL packages are downloaded from (`{url}/{name}.json`)
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Only install bundled packages, never hit the network
    #[serde(default = "default_offline")]
    pub offline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            offline: default_offline(),
        }
    }
}
