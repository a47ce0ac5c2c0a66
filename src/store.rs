use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::error::StoreError;
use crate::firestore_store::FirestoreStore;
use crate::json_store::JsonStore;
use crate::markdown_store::MarkdownStore;
use crate::post::{Post, PostSummary, RouteParams};

/// The contract every post backend implements. The three backends are
/// interchangeable: pages call one of these operations and nothing else.
///
/// Ordering contract, honored by all backends:
///   - `list_summaries`: date descending, ties broken by id ascending
///   - `list_identifiers`: id ascending
///
/// Both listings always reflect the same set of posts. A lookup miss is
/// `Ok(None)`, never an error and never a placeholder post.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, StoreError>;

    async fn list_identifiers(&self) -> Result<Vec<RouteParams>, StoreError>;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Post>, StoreError>;
}

/// Newest first. Equal dates fall back to id order so the result is total.
pub fn sort_summaries(summaries: &mut [PostSummary]) {
    summaries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

pub fn sort_identifiers(identifiers: &mut [RouteParams]) {
    identifiers.sort_by(|a, b| a.params.id.cmp(&b.params.id));
}

/// Builds the backend selected in the configuration file. The store owns
/// whatever handle it needs (directory path, file path, http client);
/// there is no process-wide client.
pub fn open_store(config: &Config) -> Result<Box<dyn PostStore>, StoreError> {
    match config.store.backend {
        Backend::Markdown => Ok(Box::new(MarkdownStore::new(config.paths.posts_dir.clone()))),
        Backend::Json => Ok(Box::new(JsonStore::new(config.paths.data_file.clone()))),
        Backend::Firestore => {
            let firestore = config.firestore.as_ref().ok_or_else(|| {
                StoreError::Unavailable(
                    "backend is `firestore` but the [firestore] section is missing".to_string(),
                )
            })?;
            Ok(Box::new(FirestoreStore::new(firestore)?))
        }
    }
}
