#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP client for the user directory services
//!
//! A small hyper-based client with:
//! - TLS via rustls with webpki roots (HTTPS only by default)
//! - Connection pooling
//! - A per-request timeout
//! - Default `User-Agent` and `Accept` headers
//! - Response body size limits
//!
//! # Example
//!
//! ```ignore
//! use userdir_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("user-directory/0.1")
//!     .build()?;
//!
//! let users: Vec<RemoteUser> = client
//!     .get("https://jsonplaceholder.typicode.com/users")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod headers;
mod request;
mod response;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_MAX_BODY_SIZE, DEFAULT_USER_AGENT, ERROR_BODY_PREVIEW_LIMIT, HttpClientConfig,
    TransportSecurity,
};
pub use error::{HttpError, InvalidUriKind};
pub use headers::{DefaultHeadersLayer, DefaultHeadersService};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
