use crate::hub::domain::NamedView;
use crate::shared::{HubError, Result};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Page size used for every collection request
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A request for every item of a hub collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedQuery {
    pub url: String,
    /// Hub search expression (`q=`), e.g. `name:my-project`
    pub q: Option<String>,
    pub parameters: Vec<(String, String)>,
    pub page_size: usize,
}

impl PagedQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            q: None,
            parameters: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// ResourceFetcher port for reading hub resources
///
/// This port abstracts HTTP transport, authentication and paging. The core
/// only ever asks for one resource by URL or for a whole collection.
///
/// # Async Support
/// Implementations must be `Send + Sync`: one fetcher is shared by every
/// concurrent notification transformation.
///
/// # Errors
/// A missing resource must be reported as [`HubError::NotFound`] wrapped in
/// the returned `anyhow::Error`, so callers can tell it apart from transport
/// failures.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Server root that top-level collections such as `/api/projects` hang off
    fn base_url(&self) -> &str;

    /// Fetches the resource at `url`
    async fn fetch_one(&self, url: &str) -> Result<serde_json::Value>;

    /// Fetches every item of the collection described by `query`, across all pages
    async fn fetch_all(&self, query: &PagedQuery) -> Result<Vec<serde_json::Value>>;

    /// Fetches and deserializes the resource at `url`
    async fn get_item<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.fetch_one(url).await?;
        serde_json::from_value(value).with_context(|| format!("Unexpected response from {}", url))
    }

    /// Fetches and deserializes every item of a collection
    async fn get_all<T>(&self, query: &PagedQuery) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let values = self.fetch_all(query).await?;
        values
            .into_iter()
            .map(|value| {
                serde_json::from_value(value)
                    .with_context(|| format!("Unexpected item in collection {}", query.url))
            })
            .collect()
    }

    /// Finds the item whose name equals `name` exactly
    ///
    /// The hub's `q=` search is a prefix match, so the results are filtered
    /// again on this side.
    ///
    /// # Errors
    /// Returns [`HubError::NotFound`] when no item matches.
    async fn fetch_by_exact_name<T>(&self, query: &PagedQuery, name: &str) -> Result<T>
    where
        T: NamedView + DeserializeOwned + Send,
    {
        let items: Vec<T> = self.get_all(query).await?;
        items
            .into_iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| {
                HubError::NotFound {
                    resource: format!("{} '{}'", T::KIND, name),
                }
                .into()
            })
    }
}
