use spdlog::warn;

use crate::error::StoreError;
use crate::post::{Post, PostSummary, RouteParams};
use crate::store::PostStore;

/// The placeholder returned when a post page is requested for an id the
/// store does not hold. Byte-compatible with the original site, so a
/// rebuilt page renders exactly what the old one did.
pub fn missing_post() -> Post {
    Post {
        id: "id".to_string(),
        title: "error".to_string(),
        date: "error".to_string(),
        tags: vec!["loser".to_string()],
        content_html: Some("<p><strong>>:(</strong></p>".to_string()),
    }
}

/// Data for the index page: every post summary, newest first.
pub async fn home_page(store: &dyn PostStore) -> Result<Vec<PostSummary>, StoreError> {
    store.list_summaries().await
}

/// The `{ params: { id } }` list the static-route generator consumes.
pub async fn static_paths(store: &dyn PostStore) -> Result<Vec<RouteParams>, StoreError> {
    store.list_identifiers().await
}

/// Data for one post page. A store miss becomes the placeholder post
/// here, at the page boundary; store callers that need to tell found
/// from missing use `PostStore::fetch_by_id` directly.
pub async fn post_page(store: &dyn PostStore, id: &str) -> Result<Post, StoreError> {
    match store.fetch_by_id(id).await? {
        Some(post) => Ok(post),
        None => {
            warn!("No post found for id {}", id);
            Ok(missing_post())
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::store::{sort_identifiers, sort_summaries};

    use super::*;

    struct MemoryStore {
        posts: Vec<Post>,
    }

    #[async_trait]
    impl PostStore for MemoryStore {
        async fn list_summaries(&self) -> Result<Vec<PostSummary>, StoreError> {
            let mut summaries: Vec<PostSummary> = self.posts.iter().map(Post::summary).collect();
            sort_summaries(&mut summaries);
            Ok(summaries)
        }

        async fn list_identifiers(&self) -> Result<Vec<RouteParams>, StoreError> {
            let mut identifiers: Vec<RouteParams> = self
                .posts
                .iter()
                .map(|post| RouteParams::new(post.id.clone()))
                .collect();
            sort_identifiers(&mut identifiers);
            Ok(identifiers)
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
            Ok(self.posts.iter().find(|post| post.id == id).cloned())
        }
    }

    fn sample_store() -> MemoryStore {
        MemoryStore {
            posts: vec![Post {
                id: "first-post".to_string(),
                title: "First post".to_string(),
                date: "2022-06-01".to_string(),
                tags: vec!["intro".to_string()],
                content_html: Some("<p>hello</p>".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn test_post_page_found() {
        let store = sample_store();
        let post = post_page(&store, "first-post").await.unwrap();
        assert_eq!(post.id, "first-post");
        assert_eq!(post.content_html.unwrap(), "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_post_page_miss_yields_placeholder() {
        let store = sample_store();
        let post = post_page(&store, "nope").await.unwrap();
        assert_eq!(post.id, "id");
        assert_eq!(post.title, "error");
        assert_eq!(post.date, "error");
        assert_eq!(post.tags, vec!["loser"]);
        assert_eq!(post.content_html.unwrap(), "<p><strong>>:(</strong></p>");
    }

    #[tokio::test]
    async fn test_home_page_and_static_paths_agree() {
        let store = sample_store();
        let summaries = home_page(&store).await.unwrap();
        let paths = static_paths(&store).await.unwrap();
        assert_eq!(summaries.len(), paths.len());
        assert_eq!(summaries[0].id, paths[0].params.id);
    }
}
