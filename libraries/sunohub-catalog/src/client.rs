//! Main backend client.

use crate::error::{CatalogError, Result};
use crate::types::BackendConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// PostgREST path prefix
const REST_PREFIX: &str = "/rest/v1";

/// Client for the hosted backend's REST surface.
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
///
/// # Example
///
/// ```ignore
/// use sunohub_catalog::{BackendConfig, SupabaseClient};
///
/// let client = SupabaseClient::new(BackendConfig::new("https://project.supabase.co", "anon"))?;
/// let song = client.get_song_by_id(&"row-1".into()).await?;
/// ```
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    config: Arc<RwLock<BackendConfig>>,
}

impl SupabaseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        if config.anon_key.is_empty() {
            return Err(CatalogError::InvalidInput("anon key cannot be empty".into()));
        }

        let normalized_config = BackendConfig {
            url,
            anon_key: config.anon_key,
            access_token: config.access_token,
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("SunoHub/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the backend URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client carries a user access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the user access token (e.g., after sign-in elsewhere).
    pub async fn set_access_token(&self, access_token: impl Into<String>) {
        self.config.write().await.access_token = Some(access_token.into());
        info!("Access token updated");
    }

    /// Drop the user access token and fall back to anonymous access.
    pub async fn sign_out(&self) {
        self.config.write().await.access_token = None;
        info!("Signed out");
    }

    /// Start a request against a table.
    ///
    /// Every request carries the anon key; the bearer token is the user's
    /// access token when signed in, the anon key otherwise.
    pub(crate) async fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let config = self.config.read().await;
        let url = format!("{}{}/{}", config.url, REST_PREFIX, table);
        let bearer = config
            .access_token
            .clone()
            .unwrap_or_else(|| config.anon_key.clone());
        let anon_key = config.anon_key.clone();
        drop(config);

        debug!(method = %method, url = %url, "Backend request");

        self.http
            .request(method, url)
            .header("apikey", anon_key)
            .bearer_auth(bearer)
    }

    /// Send a request and turn non-success statuses into errors.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::Unreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(CatalogError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::Backend {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Send a request and parse the JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(format!("Failed to parse {}: {}", what, e)))
    }
}
