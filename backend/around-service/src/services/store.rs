/// Document store contract consumed by the post service
use crate::models::Post;
use crate::services::geo_query::GeoQuery;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store configuration: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{operation} rejected with status {status}: {reason}")]
    Rejected {
        operation: &'static str,
        status: u16,
        reason: String,
    },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One search hit as delivered by the store, not yet decoded
#[derive(Debug, Clone, PartialEq)]
pub struct StoredHit {
    pub id: String,
    pub source: Option<Value>,
}

/// Search outcome. `hits` is moved into the aggregator and drained once.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    pub took_ms: u64,
    pub total_hits: u64,
    pub hits: Vec<StoredHit>,
}

/// Persistence and geo search over post documents.
///
/// Implementations are shared across all request workers for the lifetime
/// of the process.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Stores `post` under `id`. The write must be visible to any `search`
    /// issued after this call returns.
    async fn index_post(&self, id: &str, post: &Post) -> Result<(), StoreError>;

    /// Runs a geo-distance query.
    async fn search(&self, query: &GeoQuery) -> Result<SearchHits, StoreError>;

    /// Cheap reachability probe used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
