use std::time::Duration;

use reqwest::{Client, StatusCode};
use textkit_core::{ModelUnavailableError, PackageSource};

/// Fetches `{base_url}/{name}.json` over HTTP
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ModelUnavailableError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelUnavailableError::download_failed(&base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base_url, name)
    }
}

#[async_trait::async_trait]
impl PackageSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ModelUnavailableError> {
        let url = self.package_url(name);
        tracing::info!("Downloading {name} from {url}...");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModelUnavailableError::download_failed(name, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ModelUnavailableError::NotFound(name.to_string())),
            status if !status.is_success() => {
                return Err(ModelUnavailableError::download_failed(
                    name,
                    format!("{url} returned {status}"),
                ));
            }
            _ => {}
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModelUnavailableError::download_failed(name, e))?;

        tracing::debug!("Downloaded {} bytes for {name}", bytes.len());
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        format!("http ({})", self.base_url)
    }
}

/// Tries each source in order; only `NotFound` moves on to the next one
pub struct SourceChain {
    sources: Vec<Box<dyn PackageSource>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl PackageSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PackageSource for SourceChain {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ModelUnavailableError> {
        for source in &self.sources {
            match source.fetch(name).await {
                Err(e) if e.is_not_found() => {
                    tracing::debug!("{name} not in {}", source.describe());
                }
                other => return other,
            }
        }
        Err(ModelUnavailableError::NotFound(name.to_string()))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        parts.join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::testing::MemorySource;

    /// Answers a single request with the given status line and body
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_http_source_ok() {
        let url = serve_once("200 OK", r#"{"name":"m","lang":"en"}"#).await;
        let source = HttpSource::new(url, Duration::from_secs(5)).unwrap();
        let bytes = source.fetch("m").await.unwrap();
        assert_eq!(bytes, br#"{"name":"m","lang":"en"}"#);
    }

    #[tokio::test]
    async fn test_http_source_not_found() {
        let url = serve_once("404 Not Found", "").await;
        let source = HttpSource::new(url, Duration::from_secs(5)).unwrap();
        let err = source.fetch("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_http_source_server_error() {
        let url = serve_once("500 Internal Server Error", "boom").await;
        let source = HttpSource::new(url, Duration::from_secs(5)).unwrap();
        let err = source.fetch("m").await.unwrap_err();
        assert!(matches!(err, ModelUnavailableError::DownloadFailed { .. }));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = source.fetch("m").await.unwrap_err();
        assert!(matches!(err, ModelUnavailableError::DownloadFailed { .. }));
    }

    #[test]
    fn test_package_url() {
        let source = HttpSource::new("https://example.com/pkgs/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.package_url("en_core_web_sm"), "https://example.com/pkgs/en_core_web_sm.json");
    }

    #[tokio::test]
    async fn test_chain_falls_through_not_found() {
        let chain = SourceChain::new()
            .with_source(MemorySource::default().with("a", "first"))
            .with_source(MemorySource::default().with("a", "second").with("b", "second"));

        assert_eq!(chain.fetch("a").await.unwrap(), b"first");
        assert_eq!(chain.fetch("b").await.unwrap(), b"second");
        assert!(chain.fetch("c").await.unwrap_err().is_not_found());
        assert_eq!(chain.describe(), "memory -> memory");
    }

    #[tokio::test]
    async fn test_chain_stops_on_other_errors() {
        let url = serve_once("503 Service Unavailable", "").await;
        let chain = SourceChain::new()
            .with_source(HttpSource::new(url, Duration::from_secs(5)).unwrap())
            .with_source(MemorySource::default().with("a", "fallback"));

        let err = chain.fetch("a").await.unwrap_err();
        assert!(matches!(err, ModelUnavailableError::DownloadFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_chain() {
        let chain = SourceChain::default();
        assert!(chain.is_empty());
        assert!(chain.fetch("a").await.unwrap_err().is_not_found());
    }
}
