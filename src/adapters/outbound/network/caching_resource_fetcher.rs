use crate::ports::outbound::{PagedQuery, ResourceFetcher};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingResourceFetcher wraps a ResourceFetcher and memoizes single-resource reads.
///
/// Policy rules, component versions and project versions repeat across the
/// notifications of one batch, so each URL is requested once. Collections are
/// never cached. Only use it where resources do not change during its
/// lifetime: the scan tracker must see fresh statuses on every poll.
pub struct CachingResourceFetcher<F: ResourceFetcher> {
    inner: F,
    cache: Arc<DashMap<String, serde_json::Value>>,
}

impl<F: ResourceFetcher> CachingResourceFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<F: ResourceFetcher> ResourceFetcher for CachingResourceFetcher<F> {
    fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    async fn fetch_one(&self, url: &str) -> Result<serde_json::Value> {
        if let Some(cached) = self.cache.get(url) {
            return Ok(cached.clone());
        }

        let value = self.inner.fetch_one(url).await?;
        self.cache.insert(url.to_string(), value.clone());
        Ok(value)
    }

    async fn fetch_all(&self, query: &PagedQuery) -> Result<Vec<serde_json::Value>> {
        self.inner.fetch_all(query).await
    }
}
