use crate::config::StoreConfig;
use crate::models::Post;
use crate::services::geo_query::{GeoQuery, LOCATION_FIELD};
use crate::services::store::{PostStore, SearchHits, StoreError, StoredHit};
use async_trait::async_trait;
use elasticsearch::{
    http::{
        response::Response,
        transport::{BuildError, SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    Elasticsearch, IndexParts, SearchParts,
};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::Config(format!("invalid Elasticsearch URL: {}", err))
    }
}

impl From<BuildError> for StoreError {
    fn from(err: BuildError) -> Self {
        StoreError::Config(format!("failed to build transport: {}", err))
    }
}

impl From<elasticsearch::Error> for StoreError {
    fn from(err: elasticsearch::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Post store backed by a single Elasticsearch node.
///
/// The underlying transport keeps its own connection pool, so one instance
/// is built at startup and shared by every worker.
#[derive(Clone)]
pub struct ElasticsearchPostStore {
    client: Elasticsearch,
    post_index: String,
}

impl ElasticsearchPostStore {
    /// Builds the client and makes sure the post index exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let parsed = Url::parse(&config.url)?;
        let pool = SingleNodeConnectionPool::new(parsed);
        let transport = TransportBuilder::new(pool)
            .timeout(config.request_timeout())
            .build()?;
        let client = Elasticsearch::new(transport);

        let instance = Self {
            client,
            post_index: config.post_index.clone(),
        };

        instance.ensure_post_index().await?;

        Ok(instance)
    }

    pub fn post_index(&self) -> &str {
        &self.post_index
    }

    /// Index body for the post index. `location` must be a `geo_point` for
    /// `geo_distance` queries to work.
    pub fn post_index_body() -> Value {
        json!({
            "mappings": {
                "properties": {
                    LOCATION_FIELD: { "type": "geo_point" }
                }
            }
        })
    }

    async fn ensure_post_index(&self) -> Result<(), StoreError> {
        let exists_response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.post_index.as_str()]))
            .send()
            .await?;

        if exists_response.status_code().is_success() {
            tracing::info!(index = %self.post_index, "post index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.post_index))
            .body(Self::post_index_body())
            .send()
            .await?;

        ensure_success("create index", response).await?;
        tracing::info!(index = %self.post_index, "created post index with geo_point mapping");

        Ok(())
    }
}

#[async_trait]
impl PostStore for ElasticsearchPostStore {
    async fn index_post(&self, id: &str, post: &Post) -> Result<(), StoreError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.post_index, id))
            .body(post)
            .refresh(Refresh::WaitFor)
            .send()
            .await?;

        ensure_success("index post", response).await?;
        Ok(())
    }

    async fn search(&self, query: &GeoQuery) -> Result<SearchHits, StoreError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.post_index.as_str()]))
            .body(query.to_body())
            .send()
            .await?;

        let response = ensure_success("search", response).await?;
        let body: SearchResponse = response.json().await?;
        Ok(body.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let response = self.client.ping().send().await?;
        ensure_success("ping", response).await?;
        Ok(())
    }
}

async fn ensure_success(
    operation: &'static str,
    response: Response,
) -> Result<Response, StoreError> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }

    let reason = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));

    Err(StoreError::Rejected {
        operation,
        status: status.as_u16(),
        reason,
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    took: u64,
    hits: InnerHits,
}

#[derive(Debug, Deserialize)]
struct InnerHits {
    #[serde(default)]
    total: Option<TotalHits>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Object { value: u64 },
    Legacy(u64),
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

impl From<SearchResponse> for SearchHits {
    fn from(resp: SearchResponse) -> Self {
        let total_hits = match resp.hits.total {
            Some(TotalHits::Object { value }) | Some(TotalHits::Legacy(value)) => value,
            None => resp.hits.hits.len() as u64,
        };

        SearchHits {
            took_ms: resp.took,
            total_hits,
            hits: resp
                .hits
                .hits
                .into_iter()
                .map(|hit| StoredHit {
                    id: hit.id,
                    source: hit.source,
                })
                .collect(),
        }
    }
}
