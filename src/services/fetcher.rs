//! Seams between the crawler and the remote platform.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BlogBundle, ProblemCatalogEntry};

/// Fetches a blog entry together with its comments.
#[async_trait]
pub trait BlogFetcher: Send + Sync {
    /// Any failure is reported as [`AppError::Fetch`](crate::error::AppError::Fetch).
    async fn fetch_blog(&self, id: u64) -> Result<BlogBundle>;
}

/// Fetches the full problem catalog.
#[async_trait]
pub trait ProblemSource: Send + Sync {
    /// Entries carry their solved counts.
    async fn fetch_problems(&self) -> Result<Vec<ProblemCatalogEntry>>;
}
