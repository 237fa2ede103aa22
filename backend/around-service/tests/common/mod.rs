//! Test doubles for the post store and identifier source.

#![allow(dead_code)]

use actix_web::web;
use around_service::config::SearchConfig;
use around_service::models::Post;
use around_service::services::{
    GeoQuery, IdGenerator, InMemoryPostStore, PostService, PostStore, SearchHits, StoreError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Hands out `post-1`, `post-2`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("post-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// In-memory store that remembers every query it was asked to run
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryPostStore,
    queries: Mutex<Vec<GeoQuery>>,
}

impl RecordingStore {
    pub fn queries(&self) -> Vec<GeoQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostStore for RecordingStore {
    async fn index_post(&self, id: &str, post: &Post) -> Result<(), StoreError> {
        self.inner.index_post(id, post).await
    }

    async fn search(&self, query: &GeoQuery) -> Result<SearchHits, StoreError> {
        self.queries.lock().unwrap().push(*query);
        self.inner.search(query).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Store whose backend is down
pub struct UnreachableStore;

#[async_trait]
impl PostStore for UnreachableStore {
    async fn index_post(&self, _id: &str, _post: &Post) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn search(&self, _query: &GeoQuery) -> Result<SearchHits, StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Transport("connection refused".to_string()))
    }
}

/// Store that answers only after `delay`
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl PostStore for SlowStore {
    async fn index_post(&self, _id: &str, _post: &Post) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn search(&self, _query: &GeoQuery) -> Result<SearchHits, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(SearchHits::default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

pub fn post_service(store: Arc<dyn PostStore>) -> web::Data<PostService> {
    post_service_with_timeout(store, Duration::from_secs(2))
}

pub fn post_service_with_timeout(
    store: Arc<dyn PostStore>,
    timeout: Duration,
) -> web::Data<PostService> {
    web::Data::new(PostService::new(
        store,
        Arc::new(SequentialIds::default()),
        SearchConfig::default(),
        timeout,
    ))
}
