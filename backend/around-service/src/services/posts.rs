/// Post service - create and geo search
use crate::config::SearchConfig;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::services::aggregator;
use crate::services::geo_query::GeoQuery;
use crate::services::ids::IdGenerator;
use crate::services::store::PostStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Composes the identifier source, the store and the aggregator.
///
/// Holds no per-request state; one instance is shared by every worker.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    ids: Arc<dyn IdGenerator>,
    search: SearchConfig,
    store_timeout: Duration,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        ids: Arc<dyn IdGenerator>,
        search: SearchConfig,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            ids,
            search,
            store_timeout,
        }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Validates and stores a post, returning its new identifier. The post
    /// is searchable once this returns.
    pub async fn create_post(&self, post: Post) -> Result<String> {
        post.validate()?;

        let id = self.ids.next_id();
        self.with_deadline(self.store.index_post(&id, &post)).await?;

        tracing::info!(
            post_id = %id,
            user = %post.user,
            "post saved to index: {}",
            post.message
        );

        Ok(id)
    }

    /// Runs a geo query and returns matching posts in store order.
    pub async fn search_nearby(&self, query: &GeoQuery) -> Result<Vec<Post>> {
        let center = query.center();
        tracing::info!(
            lat = center.lat,
            lon = center.lon,
            range = %query.radius(),
            "searching nearby posts"
        );

        let results = self.with_deadline(self.store.search(query)).await?;

        tracing::info!(
            took_ms = results.took_ms,
            total_hits = results.total_hits,
            "query took {} milliseconds, found a total of {} posts",
            results.took_ms,
            results.total_hits
        );

        Ok(aggregator::collect_posts(results.hits))
    }

    /// Store reachability, bounded by the same deadline as request calls.
    pub async fn ping_store(&self) -> Result<()> {
        self.with_deadline(self.store.ping()).await
    }

    async fn with_deadline<F, T, E>(&self, future: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        AppError: From<E>,
    {
        match timeout(self.store_timeout, future).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Timeout(self.store_timeout)),
        }
    }
}
