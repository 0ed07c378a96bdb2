use crate::domain::model::{Book, Isbn, User};
use crate::domain::ports::{BookRegistry, UserRegistry};
use crate::utils::error::{MarketError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// JSON-over-HTTP client for a remote registry.
///
/// `GET {endpoint}/{collection}/{key}`: 200 carries the entity, 404 means it
/// does not exist. Anything else means the registry is unavailable.
#[derive(Debug, Clone)]
struct RegistryClient {
    registry: &'static str,
    collection: &'static str,
    endpoint: Url,
    client: Client,
}

impl RegistryClient {
    fn new(
        registry: &'static str,
        collection: &'static str,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| MarketError::InvalidConfigValueError {
            field: format!("registries.{}_endpoint", registry),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(MarketError::InvalidConfigValueError {
                field: format!("registries.{}_endpoint", registry),
                value: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            registry,
            collection,
            endpoint,
            client,
        })
    }

    fn unavailable(&self, message: impl Into<String>) -> MarketError {
        MarketError::RegistryUnavailable {
            registry: self.registry,
            message: message.into(),
        }
    }

    fn entity_url(&self, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        // cannot_be_a_base 已在建構時排除
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(self.collection).push(key);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let url = self.entity_url(key);
        tracing::debug!("Fetching {} from {}", self.registry, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<T>()
                .await
                .map(Some)
                .map_err(|e| self.unavailable(format!("invalid response body: {}", e))),
            status => Err(self.unavailable(format!("unexpected status {}", status))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpBookRegistry {
    inner: RegistryClient,
}

impl HttpBookRegistry {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: RegistryClient::new("book", "books", endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl BookRegistry for HttpBookRegistry {
    async fn fetch(&self, isbn: Isbn) -> Result<Option<Book>> {
        self.inner.fetch(&isbn.to_string()).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpUserRegistry {
    inner: RegistryClient,
}

impl HttpUserRegistry {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: RegistryClient::new("user", "users", endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl UserRegistry for HttpUserRegistry {
    async fn fetch(&self, seller_token: &str) -> Result<Option<User>> {
        self.inner.fetch(seller_token).await
    }
}
