/// Business logic and store access
pub mod aggregator;
pub mod elasticsearch;
pub mod geo_query;
pub mod ids;
pub mod memory;
pub mod posts;
pub mod store;

pub use self::elasticsearch::ElasticsearchPostStore;
pub use geo_query::{GeoQuery, Radius};
pub use ids::{IdGenerator, UuidGenerator};
pub use memory::InMemoryPostStore;
pub use posts::PostService;
pub use store::{PostStore, SearchHits, StoreError, StoredHit};
