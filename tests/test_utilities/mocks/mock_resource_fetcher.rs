use async_trait::async_trait;
use hub_integration::prelude::*;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://hub.test";

/// Mock ResourceFetcher backed by URL -> JSON maps
///
/// A URL registered with a sequence answers with the next value on each
/// request and keeps repeating the last one. Unknown single resources are
/// reported as not found; unknown collections are empty.
#[derive(Default, Clone)]
pub struct MockResourceFetcher {
    items: Arc<Mutex<HashMap<String, VecDeque<Value>>>>,
    collections: Arc<Mutex<HashMap<String, VecDeque<Vec<Value>>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    requests: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<PagedQuery>>>,
}

impl MockResourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, url: &str, value: Value) -> Self {
        self.with_item_sequence(url, vec![value])
    }

    pub fn with_item_sequence(self, url: &str, values: Vec<Value>) -> Self {
        self.items
            .lock()
            .unwrap()
            .insert(url.to_string(), values.into());
        self
    }

    pub fn with_collection(self, url: &str, values: Vec<Value>) -> Self {
        self.with_collection_sequence(url, vec![values])
    }

    pub fn with_collection_sequence(self, url: &str, pages: Vec<Vec<Value>>) -> Self {
        self.collections
            .lock()
            .unwrap()
            .insert(url.to_string(), pages.into());
        self
    }

    /// Requests for `url` fail with a transport error
    pub fn failing(self, url: &str) -> Self {
        self.failing.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }

    pub fn queries(&self) -> Vec<PagedQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn next<T: Clone>(sequence: &mut VecDeque<T>) -> Option<T> {
        if sequence.len() > 1 {
            sequence.pop_front()
        } else {
            sequence.front().cloned()
        }
    }
}

#[async_trait]
impl ResourceFetcher for MockResourceFetcher {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn fetch_one(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());
        if self.failing.lock().unwrap().contains(url) {
            anyhow::bail!("connection refused: {}", url);
        }
        let mut items = self.items.lock().unwrap();
        match items.get_mut(url).and_then(Self::next) {
            Some(value) => Ok(value),
            None => Err(HubError::NotFound {
                resource: url.to_string(),
            }
            .into()),
        }
    }

    async fn fetch_all(&self, query: &PagedQuery) -> Result<Vec<Value>> {
        self.requests.lock().unwrap().push(query.url.clone());
        self.queries.lock().unwrap().push(query.clone());
        if self.failing.lock().unwrap().contains(&query.url) {
            anyhow::bail!("connection refused: {}", query.url);
        }
        let mut collections = self.collections.lock().unwrap();
        Ok(collections
            .get_mut(&query.url)
            .and_then(Self::next)
            .unwrap_or_default())
    }
}
