pub mod provider;
pub mod registry;
pub mod source;

pub use provider::RegistryProvider;
pub use registry::ModelRegistry;
pub use source::{HttpSource, SourceChain};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use textkit_core::{ModelUnavailableError, PackageSource};

    /// In-memory source that counts fetches
    #[derive(Default)]
    pub(crate) struct MemorySource {
        pub packages: HashMap<String, Vec<u8>>,
        pub fetches: AtomicUsize,
    }

    impl MemorySource {
        pub fn with(mut self, name: &str, body: &str) -> Self {
            self.packages.insert(name.to_string(), body.as_bytes().to_vec());
            self
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl PackageSource for MemorySource {
        async fn fetch(&self, name: &str) -> Result<Vec<u8>, ModelUnavailableError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.packages
                .get(name)
                .cloned()
                .ok_or_else(|| ModelUnavailableError::NotFound(name.to_string()))
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    pub(crate) fn package_json(name: &str, lang: &str) -> String {
        format!(
            r#"{{"name": "{name}", "lang": "{lang}", "version": "1.0.0", "stop_words": ["the"]}}"#
        )
    }
}
