//! Storage abstractions for crawl state.
//!
//! Three record kinds are persisted:
//! - Blog snapshots, one per blog id, replaced wholesale on upsert
//! - Problem references, one per `(blog id, type, id, index)`, tags merged on upsert
//! - Problem catalog entries, one per `(contest id, index)`, replaced on upsert
//!
//! ## Directory Structure (local backend)
//!
//! ```text
//! storage/
//! ├── config.toml           # Analyzer configuration
//! ├── problems.json         # Problem catalog
//! ├── blogs/
//! │   └── {id}.json         # Blog snapshot
//! └── references/
//!     └── {blog_id}.json    # Problem references found in that blog
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BlogSnapshot, ProblemCatalogEntry, ProblemKey, ProblemReference, merge_tags};

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// What a reference upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the key
    Inserted,
    /// The row gained at least one tag
    Merged,
    /// The row already held every tag
    Unchanged,
}

/// Blog snapshot persistence.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when the blog has never been stored.
    async fn get_snapshot(&self, id: u64) -> Result<Option<BlogSnapshot>>;

    /// Insert or fully replace the snapshot for `snapshot.id`.
    async fn upsert_snapshot(&self, snapshot: &BlogSnapshot) -> Result<()>;

    /// Ids of every stored snapshot, ascending.
    async fn snapshot_ids(&self) -> Result<Vec<u64>>;
}

/// Problem reference persistence with monotone tag merge.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Insert the reference, or union its tags into the stored row.
    ///
    /// Atomic per key: concurrent merges on one key never lose tags.
    async fn upsert_reference(&self, reference: &ProblemReference) -> Result<UpsertOutcome>;

    /// References found in one blog, in first-recorded order.
    async fn references_for_blog(&self, blog_id: u64) -> Result<Vec<ProblemReference>>;

    /// Ids of every blog with at least one stored reference, ascending.
    async fn referenced_blog_ids(&self) -> Result<Vec<u64>>;

    /// Every blog reference to one problem, ordered by blog id.
    async fn references_to_problem(&self, key: &ProblemKey) -> Result<Vec<ProblemReference>>;
}

/// Problem catalog persistence.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert or replace the entry keyed by `(contest_id, index)`.
    async fn upsert_problem(&self, entry: &ProblemCatalogEntry) -> Result<()>;

    /// Upsert many entries. Backends may override to batch the write.
    async fn upsert_problems(&self, entries: &[ProblemCatalogEntry]) -> Result<()> {
        for entry in entries {
            self.upsert_problem(entry).await?;
        }
        Ok(())
    }

    async fn get_problem(
        &self,
        contest_id: Option<u64>,
        index: &str,
    ) -> Result<Option<ProblemCatalogEntry>>;

    async fn problem_count(&self) -> Result<usize>;
}

/// Everything the crawler and the catalog refresh persist.
pub trait Storage: SnapshotStore + ReferenceStore + CatalogStore {}

impl<T: SnapshotStore + ReferenceStore + CatalogStore> Storage for T {}

/// Merge `incoming` into the reference rows of one blog.
pub(crate) fn merge_reference(
    rows: &mut Vec<ProblemReference>,
    incoming: &ProblemReference,
) -> UpsertOutcome {
    let key = incoming.key();
    match rows.iter_mut().find(|row| row.matches(incoming.blog_id, &key)) {
        Some(row) => {
            if merge_tags(&mut row.tags, &incoming.tags) {
                UpsertOutcome::Merged
            } else {
                UpsertOutcome::Unchanged
            }
        }
        None => {
            rows.push(ProblemReference::new(
                incoming.blog_id,
                key,
                incoming.tags.clone(),
            ));
            UpsertOutcome::Inserted
        }
    }
}

/// Replace or append a catalog entry by `(contest_id, index)`.
pub(crate) fn replace_problem(entries: &mut Vec<ProblemCatalogEntry>, entry: &ProblemCatalogEntry) {
    match entries.iter_mut().find(|e| e.key() == entry.key()) {
        Some(existing) => *existing = entry.clone(),
        None => entries.push(entry.clone()),
    }
}
