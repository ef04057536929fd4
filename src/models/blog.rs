//! Blog entry data structures.

use serde::{Deserialize, Serialize};

/// A blog entry as returned by `blogEntry.view`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub id: u64,

    #[serde(default)]
    pub original_locale: String,

    #[serde(default)]
    pub creation_time_seconds: i64,

    #[serde(default)]
    pub author_handle: String,

    #[serde(default)]
    pub title: String,

    /// Rich text body, may embed links
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub locale: String,

    #[serde(default)]
    pub modification_time_seconds: i64,

    #[serde(default)]
    pub allow_view_history: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub rating: Option<i64>,
}

/// A comment as returned by `blogEntry.comments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub creation_time_seconds: i64,

    #[serde(default)]
    pub commentator_handle: String,

    #[serde(default)]
    pub locale: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub parent_comment_id: Option<u64>,

    #[serde(default)]
    pub rating: i64,
}

/// Everything the crawler needs about one blog: the entry and its comments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogBundle {
    pub entry: BlogEntry,
    pub comments: Vec<Comment>,
}

impl BlogBundle {
    pub fn new(entry: BlogEntry, comments: Vec<Comment>) -> Self {
        Self { entry, comments }
    }

    pub fn id(&self) -> u64 {
        self.entry.id
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Last persisted state of a blog, used to decide whether to re-crawl it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogSnapshot {
    /// External blog identifier
    pub id: u64,

    pub title: String,

    /// Full body content at the time of the crawl
    pub body: String,

    pub locale: String,

    #[serde(default)]
    pub original_locale: String,

    #[serde(default)]
    pub author_handle: String,

    #[serde(default)]
    pub creation_time: i64,

    /// Staleness source of truth
    pub modification_time: i64,

    pub comment_count: usize,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub rating: Option<i64>,
}

impl From<&BlogBundle> for BlogSnapshot {
    fn from(bundle: &BlogBundle) -> Self {
        let entry = &bundle.entry;
        Self {
            id: entry.id,
            title: entry.title.clone(),
            body: entry.content.clone(),
            locale: entry.locale.clone(),
            original_locale: entry.original_locale.clone(),
            author_handle: entry.author_handle.clone(),
            creation_time: entry.creation_time_seconds,
            modification_time: entry.modification_time_seconds,
            comment_count: bundle.comment_count(),
            tags: entry.tags.clone(),
            rating: entry.rating,
        }
    }
}
