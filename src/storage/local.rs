//! Local filesystem storage implementation.
//!
//! One JSON document per blog snapshot and per blog's reference list, plus a
//! single catalog document.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── problems.json         # Problem catalog
//! ├── blogs/
//! │   └── {id}.json
//! └── references/
//!     └── {blog_id}.json
//! ```
//!
//! Writes go to a uniquely named temp file that is then renamed over the
//! target. Reference and catalog updates hold a lock across their
//! read-modify-write. Locks are shared by every handle on the same root
//! within one process; separate processes on one root are not coordinated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{BlogSnapshot, ProblemCatalogEntry, ProblemKey, ProblemReference};
use crate::storage::{
    CatalogStore, ReferenceStore, SnapshotStore, UpsertOutcome, merge_reference, replace_problem,
};

const BLOGS_DIR: &str = "blogs";
const REFERENCES_DIR: &str = "references";
const CATALOG_KEY: &str = "problems.json";

/// Catalog document with a refresh timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total problem count
    pub count: usize,
    pub problems: Vec<ProblemCatalogEntry>,
}

impl CatalogData {
    pub fn new(problems: Vec<ProblemCatalogEntry>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: problems.len(),
            problems,
        }
    }
}

/// Read-modify-write locks for one storage root.
#[derive(Debug, Default)]
struct RootLocks {
    references: Mutex<()>,
    catalog: Mutex<()>,
}

static ROOT_LOCKS: LazyLock<std::sync::Mutex<HashMap<PathBuf, Arc<RootLocks>>>> =
    LazyLock::new(Default::default);

/// Locks registered for `root`, created on first use.
fn locks_for(root: &Path) -> Arc<RootLocks> {
    let key = std::fs::canonicalize(root)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf());
    let mut registry = ROOT_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
    Arc::clone(registry.entry(key).or_default())
}

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    locks: Arc<RootLocks>,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let locks = locks_for(&root_dir);
        Self { root_dir, locks }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    fn blog_key(id: u64) -> String {
        format!("{BLOGS_DIR}/{id}.json")
    }

    fn references_key(blog_id: u64) -> String {
        format!("{REFERENCES_DIR}/{blog_id}.json")
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::storage(format!("invalid storage key '{key}'")))?;
        let tmp = path.with_file_name(format!("{file_name}.{:016x}.tmp", rand::random::<u64>()));
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes)
            .await
            .map_err(|e| AppError::storage(format!("writing {key}: {e}")))
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("reading {key}: {e}"))),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes).map_err(|e| {
                AppError::storage(format!("decoding {key}: {e}"))
            })?)),
            None => Ok(None),
        }
    }

    /// Numeric stems of the `*.json` files in a directory.
    async fn list_ids(&self, dir: &str) -> Result<Vec<u64>> {
        let mut entries = match tokio::fs::read_dir(self.path(dir)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    async fn load_catalog(&self) -> Result<Vec<ProblemCatalogEntry>> {
        Ok(self
            .read_json::<CatalogData>(CATALOG_KEY)
            .await?
            .map(|data| data.problems)
            .unwrap_or_default())
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn get_snapshot(&self, id: u64) -> Result<Option<BlogSnapshot>> {
        self.read_json(&Self::blog_key(id)).await
    }

    async fn upsert_snapshot(&self, snapshot: &BlogSnapshot) -> Result<()> {
        self.write_json(&Self::blog_key(snapshot.id), snapshot).await
    }

    async fn snapshot_ids(&self) -> Result<Vec<u64>> {
        self.list_ids(BLOGS_DIR).await
    }
}

#[async_trait]
impl ReferenceStore for LocalStorage {
    async fn upsert_reference(&self, reference: &ProblemReference) -> Result<UpsertOutcome> {
        let _guard = self.locks.references.lock().await;

        let key = Self::references_key(reference.blog_id);
        let mut rows: Vec<ProblemReference> = self.read_json(&key).await?.unwrap_or_default();
        let outcome = merge_reference(&mut rows, reference);
        if outcome != UpsertOutcome::Unchanged {
            self.write_json(&key, &rows).await?;
        }
        Ok(outcome)
    }

    async fn references_for_blog(&self, blog_id: u64) -> Result<Vec<ProblemReference>> {
        Ok(self
            .read_json(&Self::references_key(blog_id))
            .await?
            .unwrap_or_default())
    }

    async fn referenced_blog_ids(&self) -> Result<Vec<u64>> {
        self.list_ids(REFERENCES_DIR).await
    }

    async fn references_to_problem(&self, key: &ProblemKey) -> Result<Vec<ProblemReference>> {
        let mut found = Vec::new();
        for blog_id in self.referenced_blog_ids().await? {
            let rows = self.references_for_blog(blog_id).await?;
            found.extend(rows.into_iter().filter(|r| r.matches(blog_id, key)));
        }
        Ok(found)
    }
}

#[async_trait]
impl CatalogStore for LocalStorage {
    async fn upsert_problem(&self, entry: &ProblemCatalogEntry) -> Result<()> {
        self.upsert_problems(std::slice::from_ref(entry)).await
    }

    async fn upsert_problems(&self, entries: &[ProblemCatalogEntry]) -> Result<()> {
        let _guard = self.locks.catalog.lock().await;

        let mut problems = self.load_catalog().await?;
        for entry in entries {
            replace_problem(&mut problems, entry);
        }

        let data = CatalogData::new(problems);
        self.write_json(CATALOG_KEY, &data).await?;
        log::info!("Catalog: {} problems written to {}", data.count, CATALOG_KEY);
        Ok(())
    }

    async fn get_problem(
        &self,
        contest_id: Option<u64>,
        index: &str,
    ) -> Result<Option<ProblemCatalogEntry>> {
        Ok(self
            .load_catalog()
            .await?
            .into_iter()
            .find(|e| e.key() == (contest_id, index)))
    }

    async fn problem_count(&self) -> Result<usize> {
        Ok(self.load_catalog().await?.len())
    }
}
