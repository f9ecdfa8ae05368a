//! Main Kidsout client implementation.

use crate::error::{Error, Result};
use crate::params::{NewsParams, ReviewsParams, SearchSittersParams};
use crate::types::*;
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.kidsout.ru/api/v2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for constructing a [`Client`].
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent_suffix: None,
        }
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base URL is required".into()));
        }

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = build_user_agent(self.user_agent_suffix.as_deref());
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|_| Error::Config("User-Agent suffix is not a valid header value".into()))?,
        );

        if let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| Error::Config("API key is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Client {
            base_url: self.base_url,
            http_client,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Kidsout API client.
///
/// # Example
///
/// ```rust,no_run
/// use kidsout::{Client, SearchSittersParams, SitterView};
///
/// #[tokio::main]
/// async fn main() -> Result<(), kidsout::Error> {
///     let client = Client::new()?;
///
///     let response = client
///         .search_sitters(&SearchSittersParams {
///             per_page: Some(10),
///             include: vec!["avatars".into()],
///             ..Default::default()
///         })
///         .await?;
///
///     for sitter in SitterView::from_list_response(response) {
///         println!("{} {:?}", sitter.id(), sitter.avatar().map(|a| &a.attributes.url));
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings and no API key.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for sitters.
    ///
    /// Parameters are validated first; nothing is sent if they are invalid.
    pub async fn search_sitters(
        &self,
        params: &SearchSittersParams,
    ) -> Result<ListResponse<Sitter>> {
        let query = params.to_query()?;
        self.get_list("/search", &query).await
    }

    /// List available regions.
    pub async fn get_regions(&self) -> Result<ListResponse<Region>> {
        self.get_list("/regions", &[]).await
    }

    /// List available currencies.
    pub async fn get_currencies(&self) -> Result<ListResponse<Currency>> {
        self.get_list("/currencies", &[]).await
    }

    /// List available perks.
    pub async fn get_perks(&self) -> Result<ListResponse<Perk>> {
        self.get_list("/perks", &[]).await
    }

    /// List reviews.
    pub async fn get_reviews(&self, params: &ReviewsParams) -> Result<ListResponse<Review>> {
        let query = params.to_query()?;
        self.get_list("/reviews", &query).await
    }

    /// List news.
    pub async fn get_news(&self, params: &NewsParams) -> Result<ListResponse<NewsItem>> {
        let query = params.to_query()?;
        self.get_list("/news", &query).await
    }

    /// List currency exchange rates, optionally against a `base` currency.
    pub async fn get_currency_rates(
        &self,
        base: Option<&str>,
    ) -> Result<ListResponse<CurrencyRate>> {
        let query: Vec<(String, String)> = base
            .filter(|b| !b.is_empty())
            .map(|b| ("base".to_string(), b.to_string()))
            .into_iter()
            .collect();
        self.get_list("/currencies/rates", &query).await
    }

    // === Internal methods ===

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ListResponse<T>> {
        let response: ListResponse<T> = self.get(path, query).await?;

        let duplicates = response.duplicate_included();
        if !duplicates.is_empty() {
            warn!(
                path = path,
                duplicates = ?duplicates,
                "Response has duplicate (id, type) pairs in included. The first one wins."
            );
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path = path, query_pairs = query.len(), "GET");

        let mut req = self.http_client.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }

        let response = req.send().await.map_err(transport_error)?;

        let status = response.status();
        debug!(path = path, status = %status, "response");

        if !status.is_success() {
            return Err(Error::from_response(response).await);
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(Error::Json)
    }
}

/// The request timeout covers the body read too, so both map the same way.
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(e)
    }
}
