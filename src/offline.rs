//! Offline asset cache: cache-first strategy for the Service Worker.
//!
//! The worker shim owns the real Cache Storage and `fetch`; this module owns
//! the decisions. The shim asks [`OfflineCache`] through the `sw_*` exports
//! in `lib.rs` (intercept, store, fallback, stale buckets) and does the async
//! I/O itself. `install`, `activate` and `handle_fetch` compose the same
//! decisions over the [`CacheStorage`] and [`Network`] seams, mirroring the
//! shim's three event handlers; the in-memory [`MemoryCacheStorage`] drives
//! them in tests.
//!
//! - **install:** open the current bucket and store the site root.
//! - **activate:** delete every bucket not named for this version. The shim
//!   then claims open pages immediately.
//! - **fetch:** only GET over http(s). Serve a cached match, else go to the
//!   network and store same-origin 200 responses. If the network fails,
//!   requests for the site root fall back to the cached root document.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::constants::CACHE_NAME;

/// Mirrors `Response.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Basic,
    Cors,
    Opaque,
    Error,
}

impl ResponseType {
    pub fn parse(s: &str) -> Self {
        match s {
            "basic" => Self::Basic,
            "cors" => Self::Cors,
            "opaque" | "opaqueredirect" => Self::Opaque,
            _ => Self::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub kind: ResponseType,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} for {url}")]
    BadStatus { url: String, status: u16 },
    #[error("Network request failed and no cached version available")]
    Unavailable,
}

/// Named buckets of request URL → response.
pub trait CacheStorage {
    fn cache_names(&self) -> Vec<String>;
    fn delete_cache(&mut self, name: &str) -> bool;
    /// Look `url` up across every bucket.
    fn match_url(&self, url: &str) -> Option<FetchResponse>;
    fn put(&mut self, cache: &str, url: &str, response: FetchResponse);
}

pub trait Network {
    fn fetch(&mut self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStorage {
    buckets: BTreeMap<String, HashMap<String, FetchResponse>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_count(&self, cache: &str) -> usize {
        self.buckets.get(cache).map_or(0, HashMap::len)
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn cache_names(&self) -> Vec<String> {
        self.buckets.keys().cloned().collect()
    }

    fn delete_cache(&mut self, name: &str) -> bool {
        self.buckets.remove(name).is_some()
    }

    fn match_url(&self, url: &str) -> Option<FetchResponse> {
        self.buckets.values().find_map(|b| b.get(url).cloned())
    }

    fn put(&mut self, cache: &str, url: &str, response: FetchResponse) {
        self.buckets
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }
}

/// What the worker should do with an intercepted fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not ours to handle; let the browser fetch normally.
    Passthrough,
    Respond(FetchResponse),
}

/// Only GET requests over http(s) are intercepted.
pub fn should_intercept(method: &str, url: &str) -> bool {
    method == "GET" && (url.starts_with("http://") || url.starts_with("https://"))
}

/// Only complete same-origin responses are stored.
pub fn is_cacheable(status: u16, kind: ResponseType) -> bool {
    status == 200 && kind == ResponseType::Basic
}

/// Split `scheme://host[:port]` from the rest of the URL.
fn split_origin(url: &str) -> Option<(&str, &str)> {
    let scheme_end = url.find("://")? + 3;
    match url[scheme_end..].find('/') {
        Some(i) => Some(url.split_at(scheme_end + i)),
        None => Some((url, "")),
    }
}

/// Cache key of the site root for the origin of `url`.
pub fn root_url(url: &str) -> Option<String> {
    let (origin, _) = split_origin(url)?;
    Some(format!("{origin}/"))
}

/// True when `url` targets the site root, with or without a query string.
pub fn is_root_request(url: &str) -> bool {
    let Some((_, rest)) = split_origin(url) else {
        return false;
    };
    let path = rest.split(['?', '#']).next().unwrap_or("");
    path.is_empty() || path == "/"
}

/// Bucket names that activation should delete.
pub fn stale_caches(names: &[String], current: &str) -> Vec<String> {
    names.iter().filter(|n| *n != current).cloned().collect()
}

/// The cache-first strategy for one app version.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    name: String,
}

impl Default for OfflineCache {
    fn default() -> Self {
        Self::new(CACHE_NAME)
    }
}

impl OfflineCache {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intercepts(&self, request: &FetchRequest) -> bool {
        should_intercept(&request.method, &request.url)
    }

    pub fn should_store(&self, response: &FetchResponse) -> bool {
        is_cacheable(response.status, response.kind)
    }

    /// Cache key to answer with when the network fails for `url`.
    pub fn offline_fallback(&self, url: &str) -> Option<String> {
        if is_root_request(url) {
            root_url(url)
        } else {
            None
        }
    }

    /// Buckets from other versions, in the order given.
    pub fn stale_caches(&self, names: &[String]) -> Vec<String> {
        stale_caches(names, &self.name)
    }

    /// Pre-populate the bucket with the root document of `origin`.
    pub fn install(
        &self,
        origin: &str,
        storage: &mut impl CacheStorage,
        network: &mut impl Network,
    ) -> Result<(), FetchError> {
        let url = format!("{}/", origin.trim_end_matches('/'));
        let response = network.fetch(&FetchRequest::get(url.clone()))?;
        if !(200..300).contains(&response.status) {
            return Err(FetchError::BadStatus {
                url,
                status: response.status,
            });
        }
        storage.put(&self.name, &url, response);
        log::info!("installed cache {}", self.name);
        Ok(())
    }

    /// Drop every bucket from older versions. Returns the deleted names.
    pub fn activate(&self, storage: &mut impl CacheStorage) -> Vec<String> {
        let stale = self.stale_caches(&storage.cache_names());
        for name in &stale {
            log::info!("deleting old cache {name}");
            storage.delete_cache(name);
        }
        stale
    }

    pub fn handle_fetch(
        &self,
        request: &FetchRequest,
        storage: &mut impl CacheStorage,
        network: &mut impl Network,
    ) -> Result<FetchOutcome, FetchError> {
        if !self.intercepts(request) {
            return Ok(FetchOutcome::Passthrough);
        }

        if let Some(cached) = storage.match_url(&request.url) {
            return Ok(FetchOutcome::Respond(cached));
        }

        match network.fetch(request) {
            Ok(response) => {
                if self.should_store(&response) {
                    storage.put(&self.name, &request.url, response.clone());
                }
                Ok(FetchOutcome::Respond(response))
            }
            Err(e) => {
                log::debug!("fetch failed for {}: {e}", request.url);
                self.offline_fallback(&request.url)
                    .and_then(|root| storage.match_url(&root))
                    .map(FetchOutcome::Respond)
                    .ok_or(FetchError::Unavailable)
            }
        }
    }
}
