/// Turns store hits into the response body of a search
use crate::models::Post;
use crate::services::store::StoredHit;

/// Drains `hits` in delivery order and decodes each source into a `Post`.
///
/// Duplicates are kept. Hits without a source, or whose source does not
/// decode as a post, are skipped and logged.
pub fn collect_posts<I>(hits: I) -> Vec<Post>
where
    I: IntoIterator<Item = StoredHit>,
{
    let hits = hits.into_iter();
    let mut posts = Vec::with_capacity(hits.size_hint().0);

    for hit in hits {
        let Some(source) = hit.source else {
            tracing::warn!(id = %hit.id, "search hit has no _source, skipping");
            continue;
        };

        match serde_json::from_value::<Post>(source) {
            Ok(post) => {
                tracing::debug!(
                    id = %hit.id,
                    user = %post.user,
                    lat = post.location.lat,
                    lon = post.location.lon,
                    "post: {}",
                    post.message
                );
                posts.push(post);
            }
            Err(err) => {
                tracing::warn!(id = %hit.id, error = %err, "search hit is not a post, skipping");
            }
        }
    }

    posts
}

/// Serializes posts as a JSON array; an empty slice yields `[]`.
pub fn to_json(posts: &[Post]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(posts)
}
