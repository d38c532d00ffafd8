//! HTTP transport seam for the resolver
//!
//! The resolver only needs two operations: fetch a listing page body and
//! probe a URL for liveness. Putting them behind a trait keeps the
//! assembler testable without a network.

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use crate::resolver::error::FetchError;

/// Trait for the HTTP operations the resolver depends on.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetches a page body with GET. Non-2xx statuses are errors here
    /// because a listing page that does not load is a total failure for
    /// the scrape strategy.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;

    /// Issues a HEAD request, following redirects, and returns the final
    /// response status. Transport problems surface as errors; any status
    /// that does arrive is a normal value.
    async fn head_status(&self, url: &str) -> Result<u16, FetchError>;
}

/// reqwest-backed fetcher with a shared connection pool and per-request
/// timeout.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("envrepo")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait::async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        let response = self.client.head(url).send().await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> ReqwestFetcher {
        ReqwestFetcher::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn get_text_returns_body_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/dl/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html></html>")
            .create_async()
            .await;

        let body = fetcher().get_text(&format!("{}/dl/", server.url())).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn get_text_returns_status_error_for_non_success() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/dl/")
            .with_status(503)
            .create_async()
            .await;

        let result = fetcher().get_text(&format!("{}/dl/", server.url())).await;

        assert!(matches!(result, Err(FetchError::Status(503))));
    }

    #[tokio::test]
    async fn head_status_returns_final_status() {
        let mut server = Server::new_async().await;
        server
            .mock("HEAD", "/artifact.zip")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("HEAD", "/missing.zip")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = fetcher();
        let base = server.url();
        assert_eq!(
            fetcher.head_status(&format!("{base}/artifact.zip")).await.unwrap(),
            200
        );
        assert_eq!(
            fetcher.head_status(&format!("{base}/missing.zip")).await.unwrap(),
            404
        );
    }

    #[tokio::test]
    async fn head_status_follows_redirects() {
        let mut server = Server::new_async().await;
        server
            .mock("HEAD", "/latest.zip")
            .with_status(302)
            .with_header("location", &format!("{}/v2/latest.zip", server.url()))
            .create_async()
            .await;
        server
            .mock("HEAD", "/v2/latest.zip")
            .with_status(200)
            .create_async()
            .await;

        let status = fetcher()
            .head_status(&format!("{}/latest.zip", server.url()))
            .await
            .unwrap();

        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn transport_failure_is_a_network_error() {
        // Nothing listens on this port; the connection is refused.
        let result = fetcher().head_status("http://127.0.0.1:1/void.zip").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
