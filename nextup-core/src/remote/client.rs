//! HTTP client for the movie/show-availability catalog API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{EpisodeDto, SearchPageDto, TitleDto};
use super::retry::RetryPolicy;
use crate::config::RemoteConfig;

const API_KEY_HEADER: &str = "X-RapidAPI-Key";

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("invalid API key")]
    InvalidApiKey,

    #[error("not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,

    /// HTTP 5xx from the catalog service; transient.
    #[error("upstream error: HTTP {0}")]
    Upstream(u16),

    /// Any other non-success HTTP status; permanent.
    #[error("API error: HTTP {0}")]
    Api(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl RemoteError {
    /// Whether the retry policy should take another swing at this.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RemoteError::RateLimited | RemoteError::Upstream(_) | RemoteError::Network(_)
        )
    }
}

/// One page of catalog search results, cursor included.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub titles: Vec<TitleDto>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Seam between the sync orchestrator and the remote catalog, so tests
/// can drive the pipeline with scripted pages.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of titles for a named catalog, optionally resuming
    /// from an opaque cursor returned by the previous page.
    async fn search_page(
        &self,
        catalog: &str,
        cursor: Option<&str>,
    ) -> Result<CatalogPage, RemoteError>;

    /// Fetch full detail for a single title by its catalog id.
    async fn get_title(&self, mon_id: &str) -> Result<TitleDto, RemoteError>;

    /// Fetch the episode list of a series title.
    async fn get_episodes(&self, mon_id: &str) -> Result<Vec<EpisodeDto>, RemoteError>;
}

/// Thin wrapper over the catalog REST API. Holds no state beyond client
/// configuration; every call runs under the retry policy.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    country: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(remote: &RemoteConfig, retry: RetryPolicy) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .connect_timeout(remote.timeout)
            .timeout(remote.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: remote.base_url.trim_end_matches('/').to_string(),
            api_key: remote.api_key.clone(),
            country: remote.country.clone(),
            retry,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);
        self.retry
            .run(|| {
                debug!(%url, "catalog request");
                let request = self
                    .http
                    .get(&url)
                    .header(API_KEY_HEADER, self.api_key.as_str())
                    .query(&query);
                async move {
                    let response = request.send().await?;
                    decode(response).await
                }
            })
            .await
    }
}

/// Map the response status onto the error taxonomy, then decode the body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RemoteError::InvalidApiKey);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RemoteError::RateLimited);
    }
    if status.is_server_error() {
        return Err(RemoteError::Upstream(status.as_u16()));
    }
    if !status.is_success() {
        return Err(RemoteError::Api(status.as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| RemoteError::Parse(e.to_string()))
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn search_page(
        &self,
        catalog: &str,
        cursor: Option<&str>,
    ) -> Result<CatalogPage, RemoteError> {
        let mut query = vec![
            ("country", self.country.clone()),
            ("catalogs", catalog.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let page: SearchPageDto = self.get_json("shows/search/filters", query).await?;
        Ok(CatalogPage {
            titles: page.shows,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        })
    }

    async fn get_title(&self, mon_id: &str) -> Result<TitleDto, RemoteError> {
        let query = vec![("country", self.country.clone())];
        self.get_json(&format!("shows/{mon_id}"), query).await
    }

    async fn get_episodes(&self, mon_id: &str) -> Result<Vec<EpisodeDto>, RemoteError> {
        let query = vec![("country", self.country.clone())];
        self.get_json(&format!("shows/{mon_id}/episodes"), query)
            .await
    }
}
