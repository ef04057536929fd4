// src/pipeline/refresh.rs

//! Problem catalog refresh.

use crate::error::Result;
use crate::services::ProblemSource;
use crate::storage::CatalogStore;

/// Fetch the whole problem catalog and upsert every entry.
///
/// Returns the number of entries written.
pub async fn run_refresh(source: &dyn ProblemSource, store: &dyn CatalogStore) -> Result<usize> {
    log::info!("Updating problems from API...");

    let problems = source.fetch_problems().await?;
    store.upsert_problems(&problems).await?;

    log::info!("Stored {} problems", problems.len());
    Ok(problems.len())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::ProblemCatalogEntry;
    use crate::storage::MemoryStorage;

    struct StaticSource(Vec<ProblemCatalogEntry>);

    #[async_trait]
    impl ProblemSource for StaticSource {
        async fn fetch_problems(&self) -> Result<Vec<ProblemCatalogEntry>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ProblemSource for FailingSource {
        async fn fetch_problems(&self) -> Result<Vec<ProblemCatalogEntry>> {
            Err(AppError::Api {
                status: "FAILED".into(),
                comment: "Call limit exceeded".into(),
            })
        }
    }

    fn entry(index: &str, solved: u64) -> ProblemCatalogEntry {
        ProblemCatalogEntry {
            contest_id: Some(1923),
            problemset_name: None,
            index: index.into(),
            name: format!("Problem {index}"),
            kind: "PROGRAMMING".into(),
            points: Some(500.0),
            rating: None,
            tags: Vec::new(),
            solved_count: Some(solved),
        }
    }

    #[tokio::test]
    async fn test_refresh_upserts_all() {
        let store = MemoryStorage::new();
        store.upsert_problem(&entry("A", 1)).await.unwrap();

        let source = StaticSource(vec![entry("A", 100), entry("B", 50)]);
        let written = run_refresh(&source, &store).await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.problem_count().await.unwrap(), 2);
        let a = store.get_problem(Some(1923), "A").await.unwrap().unwrap();
        assert_eq!(a.solved_count, Some(100));
    }

    #[tokio::test]
    async fn test_refresh_failure_is_reported() {
        let store = MemoryStorage::new();
        let err = run_refresh(&FailingSource, &store).await.unwrap_err();
        assert!(err.is_fetch());
        assert_eq!(store.problem_count().await.unwrap(), 0);
    }
}
