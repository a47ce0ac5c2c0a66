use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Listing entry: everything a post index needs, never the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
}

/// A full post. `content_html` is present for stores that hold a body
/// (markdown files, firestore documents) and absent for the json store,
/// which keeps metadata only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
}

impl Post {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Identifier wrapped the way the static-route generator consumes it:
/// `{ "params": { "id": "..." } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteParams {
    pub params: IdParam,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdParam {
    pub id: String,
}

impl RouteParams {
    pub fn new(id: impl Into<String>) -> RouteParams {
        RouteParams {
            params: IdParam { id: id.into() },
        }
    }
}

/// Tags as they arrive from a backing store. Older records hold a single
/// string, newer ones a list; both shapes are accepted on the way in and
/// normalized to a list before leaving the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    One(String),
    Many(Vec<String>),
}

pub fn normalize_tags(raw: Option<RawTags>) -> Vec<String> {
    match raw {
        None => vec![],
        Some(RawTags::One(s)) => s.split_whitespace().map(|t| t.to_string()).collect(),
        Some(RawTags::Many(tags)) => tags,
    }
}

/// Load-time validation. A record that fails here is rejected before it
/// can reach a sort or a page template.
pub fn validate_record(id: &str, title: &str, date: &str) -> Result<(), StoreError> {
    let malformed = |reason: String| StoreError::Malformed {
        id: id.to_string(),
        reason,
    };

    if id.trim().is_empty() {
        return Err(malformed("empty id".to_string()));
    }
    if title.trim().is_empty() {
        return Err(malformed("missing title".to_string()));
    }
    if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
        return Err(malformed(format!(
            "date `{}` is not in YYYY-MM-DD format",
            date
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        assert_eq!(normalize_tags(None), Vec::<String>::new());
        assert_eq!(
            normalize_tags(Some(RawTags::One("rust blog".to_string()))),
            vec!["rust", "blog"]
        );
        assert_eq!(normalize_tags(Some(RawTags::One("loser".to_string()))), vec!["loser"]);
        assert_eq!(
            normalize_tags(Some(RawTags::Many(vec!["a".to_string(), "b".to_string()]))),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_validate_record() {
        assert!(validate_record("first-post", "First post", "2022-06-01").is_ok());

        let err = validate_record("first-post", "", "2022-06-01").unwrap_err();
        assert!(err.to_string().contains("missing title"));

        let err = validate_record("first-post", "First post", "June 2022").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));

        assert!(validate_record("", "First post", "2022-06-01").is_err());
    }

    #[test]
    fn test_route_params_shape() {
        let params = RouteParams::new("ssg-ssr");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"params":{"id":"ssg-ssr"}}"#);
    }

    #[test]
    fn test_summary_drops_content() {
        let post = Post {
            id: "p1".to_string(),
            title: "Post one".to_string(),
            date: "2021-01-01".to_string(),
            tags: vec!["rust".to_string()],
            content_html: Some("<p>body</p>".to_string()),
        };
        let summary = post.summary();
        assert_eq!(summary.id, "p1");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("content"));
    }
}
