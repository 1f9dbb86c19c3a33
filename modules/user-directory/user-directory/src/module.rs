use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use url::Url;
use user_directory_sdk::DirectoryClient;
use userdir_http::{HttpClient, HttpError};

use crate::config::UserDirectoryConfig;
use crate::domain::ports::{ConfirmPrompt, TableView};
use crate::domain::service::DirectoryController;
use crate::infra::remote::HttpDirectoryClient;

/// Wiring failures.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("allow_insecure_http requires a debug build or the `allow-insecure-http` feature")]
    InsecureHttpUnavailable,

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] HttpError),
}

/// Composition root: config in, ready controller out.
pub struct UserDirectoryModule {
    controller: Arc<DirectoryController>,
    base_url: Url,
}

impl UserDirectoryModule {
    /// Build the HTTP adapter from `cfg` and a controller over it.
    ///
    /// # Errors
    /// `InvalidBaseUrl` when `base_url` is not an absolute URL that can carry
    /// path segments, `InsecureHttpUnavailable` when `allow_insecure_http` is
    /// set in a build without plain-HTTP support, `Http` when the client
    /// cannot be built.
    pub fn build(
        cfg: &UserDirectoryConfig,
        view: Arc<dyn TableView>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Result<Self, ModuleError> {
        info!("Initializing user_directory module");
        debug!(
            base_url = %cfg.base_url,
            timeout_ms = cfg.request_timeout_ms,
            "Loaded user_directory config"
        );

        let base_url = parse_base_url(&cfg.base_url)?;

        let builder = HttpClient::builder()
            .timeout(cfg.request_timeout())
            .user_agent(cfg.user_agent.clone())
            .max_body_size(cfg.max_response_bytes);

        #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
        let builder = if cfg.allow_insecure_http {
            builder.allow_insecure_http()
        } else {
            builder
        };
        #[cfg(not(any(debug_assertions, feature = "allow-insecure-http")))]
        {
            if cfg.allow_insecure_http {
                return Err(ModuleError::InsecureHttpUnavailable);
            }
        }

        let http = builder.build()?;

        let client: Arc<dyn DirectoryClient> =
            Arc::new(HttpDirectoryClient::new(http, base_url.clone()));
        Ok(Self::with_client(client, base_url, view, confirm))
    }

    /// Wire a controller over an arbitrary client.
    #[must_use]
    pub fn with_client(
        client: Arc<dyn DirectoryClient>,
        base_url: Url,
        view: Arc<dyn TableView>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            controller: Arc::new(DirectoryController::new(client, view, confirm)),
            base_url,
        }
    }

    #[must_use]
    pub fn controller(&self) -> Arc<DirectoryController> {
        Arc::clone(&self.controller)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Parse and check a base URL without building a client.
///
/// # Errors
/// `InvalidBaseUrl` for unparseable or cannot-be-a-base URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, ModuleError> {
    let url = Url::parse(raw).map_err(|e| ModuleError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ModuleError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "URL cannot be a base".to_owned(),
        });
    }
    Ok(url)
}
