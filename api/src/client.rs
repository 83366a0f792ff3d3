//! Recipe server API client

use crate::{
    config::ApiConfig,
    error::ApiError,
    types::{Action, ApiIndex, Classification, RecipeSummary},
};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Client for the recipe server's self-describing API
///
/// Endpoint URLs come from the index served at the API root. The index is
/// fetched on first use and shared by all clones of the client.
#[derive(Clone)]
pub struct NormandyApi {
    client: Client,
    root: Url,
    index: Arc<OnceCell<ApiIndex>>,
}

impl NormandyApi {
    /// Create a client for the configured API root
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the API root does not parse, or
    /// [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let root = parse_url(&config.api_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            client,
            root,
            index: Arc::new(OnceCell::new()),
        })
    }

    /// Create a client from `NORMANDY_API_URL` / `NORMANDY_API_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns errors from [`ApiConfig::from_env`] and [`NormandyApi::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }

    /// The API root the index is read from
    #[must_use]
    pub const fn root(&self) -> &Url {
        &self.root
    }

    /// GET `url`, failing on any non-2xx status
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] on transport errors and
    /// [`ApiError::Status`] if the server does not answer with success.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<Response, ApiError> {
        let url = parse_url(url)?;
        self.get_url(url).await
    }

    /// GET `url` and decode the JSON body
    ///
    /// # Errors
    ///
    /// As [`NormandyApi::get`], plus [`ApiError::ResponseParseFailed`] if the
    /// body is not the expected JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let url = parse_url(url)?;
        self.get_json_url(url).await
    }

    /// Absolute URL of the named endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownEndpoint`] if the index has no such name,
    /// and any error from fetching the index.
    pub async fn api_url(&self, name: &str) -> Result<Url, ApiError> {
        let index = self.index().await?;
        let path = index
            .get(name)
            .ok_or_else(|| ApiError::UnknownEndpoint(name.to_string()))?;

        self.root.join(path).map_err(|e| ApiError::InvalidUrl {
            url: path.clone(),
            reason: e.to_string(),
        })
    }

    /// Recipes currently enabled for clients
    ///
    /// # Errors
    ///
    /// Returns errors from endpoint lookup, the request, or decoding.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        let mut url = self.api_url("recipe-list").await?;
        url.query_pairs_mut().append_pair("enabled", "true");

        let recipes: Vec<RecipeSummary> = self.get_json_url(url).await?;
        tracing::debug!(count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }

    /// Ask the server to classify this client
    ///
    /// # Errors
    ///
    /// Returns errors from endpoint lookup, the request, or decoding.
    #[tracing::instrument(skip(self))]
    pub async fn classify_client(&self) -> Result<Classification, ApiError> {
        let url = self.api_url("classify-client").await?;
        self.get_json_url(url).await
    }

    /// Fetch one action definition by name
    ///
    /// # Errors
    ///
    /// Returns errors from endpoint lookup, the request, or decoding.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_action(&self, name: &str) -> Result<Action, ApiError> {
        let list = self.api_url("action-list").await?;
        let url = action_url(&list, name)?;
        self.get_json_url(url).await
    }

    async fn index(&self) -> Result<&ApiIndex, ApiError> {
        self.index
            .get_or_try_init(|| async {
                let index: ApiIndex = self.get_json_url(self.root.clone()).await?;
                tracing::debug!(endpoints = index.len(), root = %self.root, "loaded API index");
                Ok::<_, ApiError>(index)
            })
            .await
    }

    async fn get_url(&self, url: Url) -> Result<Response, ApiError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.get_url(url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }
}

impl std::fmt::Debug for NormandyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormandyApi")
            .field("root", &self.root.as_str())
            .field("index_loaded", &self.index.initialized())
            .finish_non_exhaustive()
    }
}

/// `{list}{name}/`, with `name` kept as a single path segment
fn action_url(list: &Url, name: &str) -> Result<Url, ApiError> {
    let mut url = list.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl {
            url: list.to_string(),
            reason: "action-list URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .push(name)
        .push("");
    Ok(url)
}

fn parse_url(url: &str) -> Result<Url, ApiError> {
    Url::parse(url).map_err(|e| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
