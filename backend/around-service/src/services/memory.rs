use crate::models::Post;
use crate::services::geo_query::GeoQuery;
use crate::services::store::{PostStore, SearchHits, StoreError, StoredHit};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

/// Process-local post store.
///
/// Follows Elasticsearch semantics closely enough to stand in for it:
/// writing an existing id replaces the document, every write is visible
/// immediately, and `geo_distance` matching is inclusive at the radius.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    documents: RwLock<Documents>,
}

/// Documents in insertion order, with an id -> slot index.
#[derive(Debug, Default)]
struct Documents {
    entries: Vec<(String, Post)>,
    slots: HashMap<String, usize>,
}

impl Documents {
    fn upsert(&mut self, id: &str, post: &Post) {
        match self.slots.get(id) {
            Some(&slot) => self.entries[slot].1 = post.clone(),
            None => {
                self.slots.insert(id.to_string(), self.entries.len());
                self.entries.push((id.to_string(), post.clone()));
            }
        }
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.entries.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn index_post(&self, id: &str, post: &Post) -> Result<(), StoreError> {
        self.documents.write().await.upsert(id, post);
        Ok(())
    }

    async fn search(&self, query: &GeoQuery) -> Result<SearchHits, StoreError> {
        let started = Instant::now();
        let documents = self.documents.read().await;

        let hits = documents
            .entries
            .iter()
            .filter(|(_, post)| query.contains(&post.location))
            .map(|(id, post)| -> Result<StoredHit, StoreError> {
                Ok(StoredHit {
                    id: id.clone(),
                    source: Some(serde_json::to_value(post)?),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(SearchHits {
            took_ms: started.elapsed().as_millis() as u64,
            total_hits: hits.len() as u64,
            hits,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
