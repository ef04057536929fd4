//! In-memory storage backend.
//!
//! Nothing survives the process. Used by tests and dry runs.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::error::Result;
use crate::models::{BlogSnapshot, ProblemCatalogEntry, ProblemKey, ProblemReference};
use crate::storage::{
    CatalogStore, ReferenceStore, SnapshotStore, UpsertOutcome, merge_reference, replace_problem,
};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshots: RwLock<BTreeMap<u64, BlogSnapshot>>,
    references: Mutex<BTreeMap<u64, Vec<ProblemReference>>>,
    problems: RwLock<Vec<ProblemCatalogEntry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of reference rows across all blogs.
    pub async fn reference_count(&self) -> usize {
        self.references.lock().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStorage {
    async fn get_snapshot(&self, id: u64) -> Result<Option<BlogSnapshot>> {
        Ok(self.snapshots.read().await.get(&id).cloned())
    }

    async fn upsert_snapshot(&self, snapshot: &BlogSnapshot) -> Result<()> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    async fn snapshot_ids(&self) -> Result<Vec<u64>> {
        Ok(self.snapshots.read().await.keys().copied().collect())
    }
}

#[async_trait]
impl ReferenceStore for MemoryStorage {
    async fn upsert_reference(&self, reference: &ProblemReference) -> Result<UpsertOutcome> {
        let mut references = self.references.lock().await;
        let rows = references.entry(reference.blog_id).or_default();
        Ok(merge_reference(rows, reference))
    }

    async fn references_for_blog(&self, blog_id: u64) -> Result<Vec<ProblemReference>> {
        Ok(self
            .references
            .lock()
            .await
            .get(&blog_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn referenced_blog_ids(&self) -> Result<Vec<u64>> {
        Ok(self
            .references
            .lock()
            .await
            .iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(blog_id, _)| *blog_id)
            .collect())
    }

    async fn references_to_problem(&self, key: &ProblemKey) -> Result<Vec<ProblemReference>> {
        let references = self.references.lock().await;
        Ok(references
            .iter()
            .flat_map(|(blog_id, rows)| rows.iter().filter(move |r| r.matches(*blog_id, key)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogStore for MemoryStorage {
    async fn upsert_problem(&self, entry: &ProblemCatalogEntry) -> Result<()> {
        replace_problem(&mut *self.problems.write().await, entry);
        Ok(())
    }

    async fn upsert_problems(&self, entries: &[ProblemCatalogEntry]) -> Result<()> {
        let mut index: HashMap<(Option<u64>, String), usize> = HashMap::new();
        let mut problems = self.problems.write().await;
        for (i, existing) in problems.iter().enumerate() {
            index.insert((existing.contest_id, existing.index.clone()), i);
        }
        for entry in entries {
            let key = (entry.contest_id, entry.index.clone());
            match index.get(&key) {
                Some(&i) => problems[i] = entry.clone(),
                None => {
                    index.insert(key, problems.len());
                    problems.push(entry.clone());
                }
            }
        }
        Ok(())
    }

    async fn get_problem(
        &self,
        contest_id: Option<u64>,
        index: &str,
    ) -> Result<Option<ProblemCatalogEntry>> {
        Ok(self
            .problems
            .read()
            .await
            .iter()
            .find(|e| e.key() == (contest_id, index))
            .cloned())
    }

    async fn problem_count(&self) -> Result<usize> {
        Ok(self.problems.read().await.len())
    }
}
