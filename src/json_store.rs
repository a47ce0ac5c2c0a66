use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use spdlog::debug;

use crate::error::StoreError;
use crate::post::{normalize_tags, validate_record, Post, PostSummary, RawTags, RouteParams};
use crate::store::{sort_identifiers, sort_summaries, PostStore};

/// All posts live in one json file holding an array of records. The file
/// stores metadata only; there is no body to attach on fetch.
pub struct JsonStore {
    data_file: PathBuf,
}

#[derive(Deserialize)]
struct JsonRecord {
    id: Value,
    #[serde(default)]
    title: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    tags: Option<RawTags>,
}

impl JsonRecord {
    // Record ids are stored as strings or as bare numbers; either way the
    // post id is the string form.
    fn coerced_id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn into_post(self) -> Result<Post, StoreError> {
        let id = self.coerced_id();
        validate_record(&id, &self.title, &self.date)?;
        Ok(Post {
            id,
            title: self.title,
            date: self.date,
            tags: normalize_tags(self.tags),
            content_html: None,
        })
    }
}

impl JsonStore {
    pub fn new(data_file: PathBuf) -> JsonStore {
        JsonStore { data_file }
    }

    fn load_records(&self) -> Result<Vec<JsonRecord>, StoreError> {
        let raw = fs::read_to_string(&self.data_file).map_err(|e| {
            StoreError::Unavailable(format!(
                "Error opening data file {}: {}",
                self.data_file.display(),
                e
            ))
        })?;

        let records: Vec<JsonRecord> = serde_json::from_str(&raw).map_err(|e| {
            StoreError::Unavailable(format!(
                "Error parsing data file {}: {}",
                self.data_file.display(),
                e
            ))
        })?;

        debug!("Loaded {} records from {}", records.len(), self.data_file.display());
        Ok(records)
    }

    fn load_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.load_records()?
            .into_iter()
            .map(JsonRecord::into_post)
            .collect()
    }
}

#[async_trait]
impl PostStore for JsonStore {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, StoreError> {
        let mut summaries: Vec<PostSummary> =
            self.load_posts()?.iter().map(Post::summary).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn list_identifiers(&self) -> Result<Vec<RouteParams>, StoreError> {
        let mut identifiers: Vec<RouteParams> = self
            .load_posts()?
            .into_iter()
            .map(|post| RouteParams::new(post.id))
            .collect();
        sort_identifiers(&mut identifiers);
        Ok(identifiers)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        for record in self.load_records()? {
            if record.coerced_id() == id {
                return record.into_post().map(Some);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::test_data::{POSTS_JSON, POSTS_JSON_MISSING_TITLE, POSTS_JSON_SAME_DATE};

    use super::*;

    fn store_from(raw: &str) -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(raw.as_bytes()).unwrap();
        (dir, JsonStore::new(path))
    }

    #[tokio::test]
    async fn test_list_summaries_sorted() {
        let (_dir, store) = store_from(POSTS_JSON);
        let summaries = store.list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 3);
        // 2022-06-01 beats 2021-01-01; the two 2021 posts tie and fall
        // back to id order.
        assert_eq!(summaries[0].title, "Banana");
        assert_eq!(summaries[1].id, "2");
        assert_eq!(summaries[2].id, "7");
    }

    #[tokio::test]
    async fn test_equal_dates_list_apple_before_banana() {
        let (_dir, store) = store_from(POSTS_JSON_SAME_DATE);
        let titles: Vec<String> = store
            .list_summaries()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, ["Apple", "Banana"]);
    }

    #[tokio::test]
    async fn test_identifiers_are_coerced_strings() {
        let (_dir, store) = store_from(POSTS_JSON);
        let ids: Vec<String> = store
            .list_identifiers()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.params.id)
            .collect();
        assert_eq!(ids, ["2", "3", "7"]);
    }

    #[tokio::test]
    async fn test_fetch_by_numeric_id() {
        let (_dir, store) = store_from(POSTS_JSON);
        let post = store.fetch_by_id("7").await.unwrap().unwrap();
        assert_eq!(post.id, "7");
        assert_eq!(post.title, "Cherry");
        assert_eq!(post.tags, vec!["fruit", "red"]);
        // The json store holds no body.
        assert!(post.content_html.is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_id() {
        let (_dir, store) = store_from(POSTS_JSON);
        assert!(store.fetch_by_id("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_without_title_is_malformed() {
        let (_dir, store) = store_from(POSTS_JSON_MISSING_TITLE);
        let err = store.list_summaries().await.unwrap_err();
        match err {
            StoreError::Malformed { id, reason } => {
                assert_eq!(id, "5");
                assert!(reason.contains("title"));
            }
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let store = JsonStore::new(PathBuf::from("no/such/posts.json"));
        let err = store.fetch_by_id("1").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
