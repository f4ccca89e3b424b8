/// Network adapters for the hub REST API
mod caching_resource_fetcher;
mod hub_rest_client;

pub use caching_resource_fetcher::CachingResourceFetcher;
pub use hub_rest_client::{build_url, HubConnection, HubRestClient, DEFAULT_REQUEST_TIMEOUT};
