use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use tower::buffer::Buffer;

/// Future type of the boxed inner service
pub type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, HttpError>> + Send>>;

/// Buffered service shared by all clones of an [`HttpClient`]
pub type BufferedService = Buffer<Request<Full<Bytes>>, ServiceFuture>;

/// HTTP client over a buffered tower service stack.
///
/// `HttpClient` is `Clone + Send + Sync`; clones share the connection pool
/// through the buffer channel, so no external locking is needed.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: BufferedService,
    pub(crate) max_body_size: usize,
    pub(crate) transport_security: TransportSecurity,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring the HTTP client
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a GET request builder. `url` must be absolute.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    /// Create a POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::DELETE, url)
    }

    fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.max_body_size,
            method,
            url.to_owned(),
            self.transport_security,
        )
    }
}

/// Map buffer errors to `HttpError`.
///
/// The buffer hands back the inner service error boxed; anything else means
/// the background worker is gone.
#[must_use]
pub fn map_buffer_error(err: tower::BoxError) -> HttpError {
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(err) => {
            tracing::error!(
                error = %err,
                "buffer worker closed unexpectedly; service unavailable"
            );
            HttpError::ServiceClosed
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client() -> HttpClient {
        HttpClientBuilder::new()
            .allow_insecure_http()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_http_client_get_json() {
        #[derive(serde::Deserialize)]
        struct Row {
            id: u64,
            name: String,
        }

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::GET)
                    .path("/users")
                    .header("accept", "application/json");
                then.status(200)
                    .json_body(json!([{"id": 1, "name": "Jane Doe"}]));
            })
            .await;

        let client = test_client();
        let rows: Vec<Row> = client
            .get(&server.url("/users"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_http_client_post_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::POST)
                    .path("/users")
                    .header("content-type", "application/json")
                    .json_body(json!({"id": 11}));
                then.status(201).json_body(json!({"id": 11}));
            })
            .await;

        let client = test_client();
        let resp = client
            .post(&server.url("/users"))
            .json(&json!({"id": 11}))
            .unwrap()
            .send()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.status(), http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_http_client_delete() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::DELETE).path("/users/3");
                then.status(200);
            })
            .await;

        let client = test_client();
        let resp = client
            .delete(&server.url("/users/3"))
            .send()
            .await
            .unwrap()
            .error_for_status();

        mock.assert_async().await;
        assert!(resp.is_ok());
    }

    #[tokio::test]
    async fn test_custom_user_agent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::GET)
                    .path("/ua")
                    .header("user-agent", "custom/1.0");
                then.status(200);
            })
            .await;

        let client = HttpClientBuilder::new()
            .allow_insecure_http()
            .user_agent("custom/1.0")
            .build()
            .unwrap();

        let resp = client.get(&server.url("/ua")).send().await.unwrap();
        mock.assert_async().await;
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_2xx_json_returns_http_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/missing");
                then.status(404).body("not here");
            })
            .await;

        let client = test_client();
        let result: Result<serde_json::Value, _> = client
            .get(&server.url("/missing"))
            .send()
            .await
            .unwrap()
            .json()
            .await;

        match result {
            Err(HttpError::HttpStatus {
                status,
                body_preview,
            }) => {
                assert_eq!(status, http::StatusCode::NOT_FOUND);
                assert_eq!(body_preview, "not here");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_size_limit() {
        let server = MockServer::start_async().await;
        let large_body = "x".repeat(64 * 1024);
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/large");
                then.status(200).body(&large_body);
            })
            .await;

        let client = HttpClientBuilder::new()
            .allow_insecure_http()
            .max_body_size(1024)
            .build()
            .unwrap();

        let result = client
            .get(&server.url("/large"))
            .send()
            .await
            .unwrap()
            .bytes()
            .await;
        assert!(matches!(result, Err(HttpError::BodyTooLarge { .. })));
    }
}
