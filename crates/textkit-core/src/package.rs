use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelUnavailableError;

fn default_version() -> String {
    "0.0.0".to_string()
}

/// Serialized model data, as stored in the registry and served by sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPackage {
    pub name: String,
    pub lang: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// Irregular form -> lemma
    #[serde(default)]
    pub lemma_exceptions: BTreeMap<String, String>,
    /// Tried in order, first match wins
    #[serde(default)]
    pub lemma_rules: Vec<LemmaRule>,
    /// Whole chunk -> pieces it is split into
    #[serde(default)]
    pub special_cases: BTreeMap<String, Vec<String>>,
}

/// Suffix rewrite used when a word has no exception entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRule {
    pub suffix: String,
    #[serde(default)]
    pub replacement: String,
    /// Minimum stem length in chars after the suffix is removed
    #[serde(default = "default_min_stem")]
    pub min_stem: usize,
    /// Undouble a final consonant or restore a final "e" on the stem
    #[serde(default)]
    pub restore_e: bool,
    /// Words with one of these endings are left alone
    #[serde(default)]
    pub keep_endings: Vec<String>,
}

fn default_min_stem() -> usize {
    2
}

impl ModelPackage {
    /// Parse a package from raw bytes without checking its contents
    pub fn from_slice(name: &str, bytes: &[u8]) -> Result<Self, ModelUnavailableError> {
        serde_json::from_slice(bytes).map_err(|e| ModelUnavailableError::corrupt(name, e))
    }

    /// Check the package is the one requested and internally consistent
    pub fn validate(&self, expected_name: &str) -> Result<(), ModelUnavailableError> {
        if self.name != expected_name {
            return Err(ModelUnavailableError::corrupt(
                expected_name,
                format!("package is named {:?}", self.name),
            ));
        }

        if self.lang.trim().is_empty() {
            return Err(ModelUnavailableError::corrupt(expected_name, "missing language"));
        }

        for (chunk, pieces) in &self.special_cases {
            if pieces.is_empty() || pieces.concat() != *chunk {
                return Err(ModelUnavailableError::corrupt(
                    expected_name,
                    format!("special case {chunk:?} does not match its pieces"),
                ));
            }
        }

        if let Some(rule) = self.lemma_rules.iter().find(|r| r.suffix.is_empty()) {
            return Err(ModelUnavailableError::corrupt(
                expected_name,
                format!("lemma rule with empty suffix (replacement {:?})", rule.replacement),
            ));
        }

        Ok(())
    }

    /// Parse and validate in one step
    pub fn parse(expected_name: &str, bytes: &[u8]) -> Result<Self, ModelUnavailableError> {
        let package = Self::from_slice(expected_name, bytes)?;
        package.validate(expected_name)?;
        Ok(package)
    }
}
