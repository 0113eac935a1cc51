//! API Handlers
//!
//! HTTP request handlers for each admin endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, InvalidateResponse, KeysResponse, PrefixQuery,
    SetRequest, SetResponse, StatsResponse,
};
use crate::tools::invalidate_prefix;

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<TtlCache<Value>>,
}

impl AppState {
    pub fn new(cache: Arc<TtlCache<Value>>) -> Self {
        Self { cache }
    }

    /// Builds the cache from configuration. Must run inside a tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = TtlCache::from_config(&config.cache())?;
        Ok(Self::new(Arc::new(cache)))
    }
}

/// Handler for PUT /cache
///
/// Stores a JSON value, with an optional TTL override in milliseconds.
/// A zero `ttl_ms` is rejected, since it would store nothing.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match req.ttl() {
        Some(ttl) => state.cache.set_with_ttl(req.key.clone(), req.value, ttl),
        None => state.cache.set(req.key.clone(), req.value),
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// Absent and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining = state.cache.ttl_remaining(&key).unwrap_or_default();

    Ok(Json(GetResponse::new(key, value, ttl_remaining)))
}

/// Handler for DELETE /cache/:key
///
/// Idempotent: deleting an absent key reports `deleted: false`.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.delete(&key);
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for GET /cache
///
/// Lists keys oldest first, optionally filtered by `?prefix=`.
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Json<KeysResponse> {
    let mut keys = state.cache.keys();
    if let Some(prefix) = query.prefix.as_deref() {
        keys.retain(|key| key.starts_with(prefix));
    }
    Json(KeysResponse::new(keys))
}

/// Handler for DELETE /cache
///
/// With `?prefix=` removes matching keys; without it clears the whole cache.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> Json<InvalidateResponse> {
    let removed = match query.prefix.as_deref() {
        Some(prefix) => invalidate_prefix(&state.cache, prefix),
        None => state.cache.clear(),
    };

    Json(InvalidateResponse {
        removed,
        prefix: query.prefix,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
