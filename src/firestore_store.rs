use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use spdlog::debug;

use crate::config::Firestore;
use crate::error::StoreError;
use crate::post::{normalize_tags, validate_record, Post, PostSummary, RawTags, RouteParams};
use crate::store::{sort_identifiers, sort_summaries, PostStore};

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1";
const API_KEY_ENV: &str = "FIRESTORE_APIKEY";
const DEFAULT_PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts held in a firestore `posts` collection, read over the REST API.
/// The document key is the post id and the fields arrive wrapped in
/// firestore's typed value envelopes (`stringValue`, `arrayValue`, ...).
pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let value = fields.get(key)?;
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    // Numeric ids and dates stored as integers come back as integerValue,
    // which firestore itself encodes as a string.
    if let Some(n) = value.get("integerValue").and_then(Value::as_str) {
        return Some(n.to_string());
    }
    None
}

fn tags_field(fields: &Map<String, Value>, key: &str) -> Option<RawTags> {
    let value = fields.get(key)?;
    if let Some(values) = value
        .get("arrayValue")
        .and_then(|av| av.get("values"))
        .and_then(Value::as_array)
    {
        let tags = values
            .iter()
            .filter_map(|v| v.get("stringValue").and_then(Value::as_str))
            .map(|s| s.to_string())
            .collect();
        return Some(RawTags::Many(tags));
    }
    string_field(fields, key).map(RawTags::One)
}

impl Document {
    // The document id is the last segment of its resource name,
    // `projects/{p}/databases/(default)/documents/posts/{id}`.
    fn id(&self) -> String {
        match self.name.rsplit('/').next() {
            Some(segment) => segment.to_string(),
            None => String::new(),
        }
    }

    fn into_post(self, with_content: bool) -> Result<Post, StoreError> {
        let id = self.id();
        let title = string_field(&self.fields, "title").unwrap_or_default();
        let date = string_field(&self.fields, "date").unwrap_or_default();
        validate_record(&id, &title, &date)?;

        let content_html = if with_content {
            string_field(&self.fields, "contentHtml")
        } else {
            None
        };

        Ok(Post {
            id,
            title,
            date,
            tags: normalize_tags(tags_field(&self.fields, "tags")),
            content_html,
        })
    }
}

impl FirestoreStore {
    pub fn new(config: &Firestore) -> Result<FirestoreStore, StoreError> {
        let api_key = match config.api_key.clone() {
            Some(key) => key,
            None => env::var(API_KEY_ENV).map_err(|_| {
                StoreError::Unavailable(format!(
                    "no firestore api key in configuration or {}",
                    API_KEY_ENV
                ))
            })?,
        };

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("Error creating http client: {}", e)))?;

        Ok(FirestoreStore {
            client,
            base_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                FIRESTORE_HOST, config.project_id
            ),
            api_key,
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }

    async fn list_documents(&self) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/posts", self.base_url);
        let mut documents = vec![];
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("key", self.api_key.as_str())])
                .query(&[("pageSize", self.page_size)]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::Unavailable(format!(
                    "firestore list failed with {}: {}",
                    status, body
                )));
            }

            let page: ListDocumentsResponse = response.json().await?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} documents from {}", documents.len(), url);
        Ok(documents)
    }
}

#[async_trait]
impl PostStore for FirestoreStore {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, StoreError> {
        let mut summaries = vec![];
        for document in self.list_documents().await? {
            summaries.push(document.into_post(false)?.summary());
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn list_identifiers(&self) -> Result<Vec<RouteParams>, StoreError> {
        let mut identifiers: Vec<RouteParams> = self
            .list_documents()
            .await?
            .iter()
            .map(|document| RouteParams::new(document.id()))
            .collect();
        sort_identifiers(&mut identifiers);
        Ok(identifiers)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let url = format!("{}/posts/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!(
                "firestore get failed with {}: {}",
                status, body
            )));
        }

        let document: Document = response.json().await?;
        document.into_post(true).map(Some)
    }
}
