//! HTTP transport for section pages.

use crate::scrapers::{PageFetcher, ScrapeError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound on connect + send + body download.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

/// `cnn_headlines/<version>`
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let t0 = Instant::now();
        let transport = |source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("cnn_headlines/"));
    }

    #[test]
    fn test_client_builds() {
        let config = FetchConfig {
            timeout: Duration::from_millis(250),
            user_agent: "test-agent".to_string(),
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(&FetchConfig {
            timeout: Duration::from_secs(2),
            user_agent: default_user_agent(),
        })
        .unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            stream
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .unwrap();
        });

        let fetcher = HttpFetcher::new(&FetchConfig {
            timeout: Duration::from_secs(2),
            user_agent: default_user_agent(),
        })
        .unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/politics"))
            .await
            .unwrap_err();
        server.join().unwrap();

        match err {
            ScrapeError::Status { status, url } => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
                assert!(url.ends_with("/politics"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_silent_server_hits_timeout() {
        // Bound but never accepted: the kernel completes the handshake and
        // the request sits unanswered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let fetcher = HttpFetcher::new(&FetchConfig {
            timeout: Duration::from_millis(300),
            user_agent: default_user_agent(),
        })
        .unwrap();

        let t0 = Instant::now();
        let err = fetcher
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        let elapsed = t0.elapsed();
        drop(listener);

        match err {
            ScrapeError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected Transport, got {other:?}"),
        }
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    }
}
