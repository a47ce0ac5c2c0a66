use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use markdown::Options;
use serde::Deserialize;
use spdlog::debug;

use crate::error::StoreError;
use crate::post::{normalize_tags, validate_record, Post, PostSummary, RawTags, RouteParams};
use crate::store::{sort_identifiers, sort_summaries, PostStore};

const MARKDOWN_EXTENSION: &str = ".md";
const FENCE: &str = "---";

/// One file per post in a flat directory. The file stem is the post id,
/// a `---`-fenced yaml block at the top holds the metadata, and the rest
/// is the markdown body.
pub struct MarkdownStore {
    posts_dir: PathBuf,
}

#[derive(Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    tags: Option<RawTags>,
}

impl MarkdownStore {
    pub fn new(posts_dir: PathBuf) -> MarkdownStore {
        MarkdownStore { posts_dir }
    }

    fn retrieve_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = fs::read_dir(self.posts_dir.as_path()).map_err(|e| {
            StoreError::Unavailable(format!(
                "Error opening posts directory {}: {}",
                self.posts_dir.display(),
                e
            ))
        })?;

        let mut posts = vec![];
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(file_name) = file_name.to_str() {
                if file_name.ends_with(MARKDOWN_EXTENSION) {
                    posts.push(entry.path());
                }
            }
        }
        debug!("Found {} post files in {}", posts.len(), self.posts_dir.display());
        Ok(posts)
    }
}

fn file_stem(path: &Path) -> String {
    match path.file_stem() {
        Some(stem) => stem.to_string_lossy().to_string(),
        None => String::new(),
    }
}

fn split_frontmatter<'a>(id: &str, input: &'a str) -> Result<(&'a str, &'a str), StoreError> {
    if !input.starts_with(FENCE) {
        return Err(StoreError::Malformed {
            id: id.to_string(),
            reason: "post must begin with a `---` frontmatter fence".to_string(),
        });
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(StoreError::Malformed {
            id: id.to_string(),
            reason: "missing closing `---` frontmatter fence".to_string(),
        }),
        Some(offset) => {
            let yaml = &input[FENCE.len()..FENCE.len() + offset];
            let body = &input[FENCE.len() + offset + FENCE.len()..];
            Ok((yaml, body))
        }
    }
}

fn render_markdown(id: &str, body: &str) -> Result<String, StoreError> {
    match markdown::to_html_with_options(body, &Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(StoreError::Malformed {
            id: id.to_string(),
            reason: e.reason,
        }),
    }
}

fn parse_post(id: &str, input: &str, with_body: bool) -> Result<Post, StoreError> {
    let (yaml, body) = split_frontmatter(id, input)?;
    let matter: FrontMatter = serde_yaml::from_str(yaml).map_err(|e| StoreError::Malformed {
        id: id.to_string(),
        reason: format!("invalid frontmatter: {}", e),
    })?;
    validate_record(id, &matter.title, &matter.date)?;

    let content_html = if with_body {
        Some(render_markdown(id, body)?)
    } else {
        None
    };

    Ok(Post {
        id: id.to_string(),
        title: matter.title,
        date: matter.date,
        tags: normalize_tags(matter.tags),
        content_html,
    })
}

#[async_trait]
impl PostStore for MarkdownStore {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, StoreError> {
        let mut summaries = vec![];
        for path in self.retrieve_files()? {
            let id = file_stem(&path);
            let raw = fs::read_to_string(&path)?;
            let post = parse_post(&id, &raw, false)?;
            summaries.push(post.summary());
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    async fn list_identifiers(&self) -> Result<Vec<RouteParams>, StoreError> {
        let mut identifiers: Vec<RouteParams> = self
            .retrieve_files()?
            .iter()
            .map(|path| RouteParams::new(file_stem(path)))
            .collect();
        sort_identifiers(&mut identifiers);
        Ok(identifiers)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        // Ids come straight from request paths; anything that walks out
        // of the posts directory cannot name a post.
        if id.contains('/') || id.contains('\\') || id.contains("..") {
            return Ok(None);
        }

        let path = self.posts_dir.join(format!("{}{}", id, MARKDOWN_EXTENSION));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        parse_post(id, &raw, true).map(Some)
    }
}
