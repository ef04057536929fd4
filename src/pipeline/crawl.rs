// src/pipeline/crawl.rs

//! Recursive blog crawl.
//!
//! Starting from a seed blog, each blog is fetched, compared against its
//! stored snapshot, re-extracted where stale, persisted, and then its linked
//! blogs are visited depth-first in discovery order. A blog is visited at
//! most once per run. Failures below the seed are logged and recorded; a
//! failure of the seed itself is returned.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{BlogBundle, BlogSnapshot, CrawlerConfig, ProblemReference};
use crate::pipeline::staleness::Staleness;
use crate::services::normalizer::normalize_match;
use crate::services::{
    BlogFetcher, NoopClassifier, TagClassifier, extract_blog_mentions, extract_problem_mentions,
};
use crate::storage::{Storage, UpsertOutcome};

/// A blog that could not be crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlFailure {
    pub blog_id: u64,
    /// Blog that linked to it, `None` for a seed
    pub parent: Option<u64>,
    pub message: String,
}

/// Summary of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Blogs fetched successfully, in visit order
    pub visited: Vec<u64>,
    /// Blogs whose body or comments were re-extracted
    pub extracted: usize,
    /// Blogs unchanged since their stored snapshot
    pub skipped_unchanged: usize,
    /// Blogs left alone because of their title
    pub skipped_filtered: usize,
    pub failed: Vec<CrawlFailure>,
    pub references_inserted: usize,
    pub references_merged: usize,
    pub references_unchanged: usize,
    /// Problem links that did not normalize
    pub malformed_matches: usize,
    /// The node bound stopped the traversal early
    pub truncated: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            visited: Vec::new(),
            extracted: 0,
            skipped_unchanged: 0,
            skipped_filtered: 0,
            failed: Vec::new(),
            references_inserted: 0,
            references_merged: 0,
            references_unchanged: 0,
            malformed_matches: 0,
            truncated: false,
            started_at: now,
            finished_at: now,
        }
    }

    fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// Reference rows created or grown during the run.
    pub fn references_written(&self) -> usize {
        self.references_inserted + self.references_merged
    }

    /// Seeds that failed (only possible through `crawl_many`).
    pub fn root_failures(&self) -> impl Iterator<Item = &CrawlFailure> {
        self.failed.iter().filter(|f| f.parent.is_none())
    }

    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.references_inserted += 1,
            UpsertOutcome::Merged => self.references_merged += 1,
            UpsertOutcome::Unchanged => self.references_unchanged += 1,
        }
    }
}

/// Per-run traversal state.
struct CrawlRun {
    visited: HashSet<u64>,
    outcome: CrawlOutcome,
}

impl CrawlRun {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
            outcome: CrawlOutcome::start(),
        }
    }
}

/// Crawls blogs and indexes the problems they mention.
pub struct BlogCrawler<'a> {
    fetcher: &'a dyn BlogFetcher,
    storage: &'a dyn Storage,
    classifier: Box<dyn TagClassifier>,
    config: CrawlerConfig,
}

impl<'a> BlogCrawler<'a> {
    /// Create a crawler with the no-op classifier and default settings.
    pub fn new(fetcher: &'a dyn BlogFetcher, storage: &'a dyn Storage) -> Self {
        Self {
            fetcher,
            storage,
            classifier: Box::new(NoopClassifier),
            config: CrawlerConfig::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn TagClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Crawl one seed blog and everything reachable from it.
    ///
    /// Fails only if the seed itself cannot be fetched or persisted.
    pub async fn crawl(&self, blog_id: u64) -> Result<CrawlOutcome> {
        let mut run = CrawlRun::new();
        self.traverse(blog_id, &mut run).await?;
        Ok(run.outcome.finish())
    }

    /// Crawl several seeds sharing one visited set.
    ///
    /// A failing seed is recorded in the outcome and the next seed is tried.
    pub async fn crawl_many(&self, blog_ids: &[u64]) -> CrawlOutcome {
        let mut run = CrawlRun::new();
        for &blog_id in blog_ids {
            if let Err(e) = self.traverse(blog_id, &mut run).await {
                log::error!("Error crawling seed blog {}: {}", blog_id, e);
                run.outcome.failed.push(CrawlFailure {
                    blog_id,
                    parent: None,
                    message: e.to_string(),
                });
            }
        }
        run.outcome.finish()
    }

    /// Depth-first traversal from `root`, children in discovery order.
    async fn traverse(&self, root: u64, run: &mut CrawlRun) -> Result<()> {
        let mut stack: Vec<(u64, Option<u64>)> = vec![(root, None)];

        while let Some((blog_id, parent)) = stack.pop() {
            if run.visited.contains(&blog_id) {
                continue;
            }
            if let Some(max) = self.config.max_blogs {
                if run.visited.len() >= max {
                    log::warn!("Reached max_blogs = {}, stopping traversal", max);
                    run.outcome.truncated = true;
                    break;
                }
            }
            run.visited.insert(blog_id);

            match self.visit(blog_id, &mut run.outcome).await {
                Ok(children) => {
                    run.outcome.visited.push(blog_id);
                    for child in children.into_iter().rev() {
                        if child != blog_id && !run.visited.contains(&child) {
                            stack.push((child, Some(blog_id)));
                        }
                    }
                }
                Err(e) => match parent {
                    None => return Err(e),
                    Some(parent) => {
                        log::warn!("Error crawling blog {} (linked from {}): {}", blog_id, parent, e);
                        run.outcome.failed.push(CrawlFailure {
                            blog_id,
                            parent: Some(parent),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(())
    }

    /// Fetch, check, extract and persist one blog.
    ///
    /// Returns the blog ids it links to, in discovery order.
    async fn visit(&self, blog_id: u64, outcome: &mut CrawlOutcome) -> Result<Vec<u64>> {
        log::info!("Crawling blog {}...", blog_id);

        let bundle = self.fetcher.fetch_blog(blog_id).await?;
        if self.config.is_filtered_title(&bundle.entry.title) {
            log::info!("Skipping blog {} because of its title", blog_id);
            outcome.skipped_filtered += 1;
            return Ok(Vec::new());
        }

        let prior = self.storage.get_snapshot(blog_id).await?;
        let staleness = Staleness::check(prior.as_ref(), &bundle);

        let mut discovered = Vec::new();
        if staleness.is_unchanged() {
            log::debug!("Blog {} unchanged since last crawl", blog_id);
            outcome.skipped_unchanged += 1;
        } else {
            outcome.extracted += 1;
            if staleness.new_content {
                discovered.extend(self.extract_body(&bundle, outcome).await?);
            }
            if staleness.new_comments {
                discovered.extend(self.extract_comments(&bundle, outcome).await?);
            }
        }

        self.storage
            .upsert_snapshot(&BlogSnapshot::from(&bundle))
            .await?;

        Ok(discovered)
    }

    async fn extract_body(&self, bundle: &BlogBundle, outcome: &mut CrawlOutcome) -> Result<Vec<u64>> {
        let body = &bundle.entry.content;
        self.extract(bundle.id(), body, body, outcome).await
    }

    async fn extract_comments(
        &self,
        bundle: &BlogBundle,
        outcome: &mut CrawlOutcome,
    ) -> Result<Vec<u64>> {
        let mut discovered = Vec::new();
        for comment in &bundle.comments {
            let context = format!(
                "{}<div class=\"comment\">{}</div>",
                bundle.entry.content, comment.text
            );
            discovered.extend(
                self.extract(bundle.id(), &comment.text, &context, outcome)
                    .await?,
            );
        }
        Ok(discovered)
    }

    /// Record every problem linked from `text` and return the linked blogs.
    ///
    /// `context` is what the classifier sees for each reference.
    async fn extract(
        &self,
        blog_id: u64,
        text: &str,
        context: &str,
        outcome: &mut CrawlOutcome,
    ) -> Result<Vec<u64>> {
        for found in extract_problem_mentions(text) {
            let key = match normalize_match(&found) {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("Skipping match in blog {}: {}", blog_id, e);
                    outcome.malformed_matches += 1;
                    continue;
                }
            };

            log::debug!("Blog {} references {}", blog_id, key);
            let tags = self.classifier.classify(context, &key);
            let reference = ProblemReference::new(blog_id, key, tags);
            let result = self.storage.upsert_reference(&reference).await?;
            outcome.record(result);
        }

        Ok(extract_blog_mentions(text))
    }
}

/// Run the crawler over the given seeds and log a summary.
///
/// With a single seed, a failure of that seed is returned as the error.
pub async fn run_crawler(crawler: &BlogCrawler<'_>, seeds: &[u64]) -> Result<CrawlOutcome> {
    let outcome = match seeds {
        [] => return Err(AppError::validation("no seed blog ids given")),
        [seed] => crawler.crawl(*seed).await?,
        _ => crawler.crawl_many(seeds).await,
    };

    log::info!(
        "Crawled {} blogs ({} extracted, {} unchanged, {} filtered, {} failed) in {}s",
        outcome.visited.len(),
        outcome.extracted,
        outcome.skipped_unchanged,
        outcome.skipped_filtered,
        outcome.failed.len(),
        (outcome.finished_at - outcome.started_at).num_seconds()
    );
    log::info!(
        "References: {} new, {} merged, {} unchanged, {} malformed links skipped",
        outcome.references_inserted,
        outcome.references_merged,
        outcome.references_unchanged,
        outcome.malformed_matches
    );
    if outcome.truncated {
        log::warn!("Traversal stopped at the max_blogs bound");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{BlogEntry, Comment, ProblemKey, ProblemType, TagRule};
    use crate::services::KeywordClassifier;
    use crate::storage::{MemoryStorage, ReferenceStore, SnapshotStore};

    /// Serves blogs from a map; unknown ids fail like a 404.
    #[derive(Default)]
    struct StubFetcher {
        blogs: Mutex<HashMap<u64, BlogBundle>>,
        calls: Mutex<Vec<u64>>,
    }

    impl StubFetcher {
        fn with(self, bundle: BlogBundle) -> Self {
            self.put(bundle);
            self
        }

        fn put(&self, bundle: BlogBundle) {
            self.blogs.lock().unwrap().insert(bundle.id(), bundle);
        }

        fn calls(&self) -> Vec<u64> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BlogFetcher for StubFetcher {
        async fn fetch_blog(&self, id: u64) -> Result<BlogBundle> {
            self.calls.lock().unwrap().push(id);
            self.blogs
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| AppError::fetch(id, "Blog entry not found"))
        }
    }

    /// Counts classification calls and tags everything with one label.
    struct CountingClassifier {
        calls: Arc<AtomicUsize>,
        tag: &'static str,
    }

    impl TagClassifier for CountingClassifier {
        fn classify(&self, _context: &str, _problem: &ProblemKey) -> Vec<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            vec![self.tag.to_string()]
        }
    }

    fn blog(id: u64, modification_time: i64, content: &str) -> BlogBundle {
        BlogBundle::new(
            BlogEntry {
                id,
                title: format!("Blog {id}"),
                content: content.to_string(),
                locale: "en".into(),
                modification_time_seconds: modification_time,
                ..BlogEntry::default()
            },
            Vec::new(),
        )
    }

    fn with_comments(mut bundle: BlogBundle, texts: &[&str]) -> BlogBundle {
        bundle.comments = texts
            .iter()
            .map(|t| Comment {
                text: t.to_string(),
                ..Comment::default()
            })
            .collect();
        bundle
    }

    fn link(id: u64) -> String {
        format!(r#"<a href="https://codeforces.com/blog/entry/{id}">blog</a>"#)
    }

    fn contest(id: u64, index: &str) -> ProblemKey {
        ProblemKey::new(ProblemType::Contest, id, index)
    }

    #[tokio::test]
    async fn test_crawl_indexes_all_three_shapes() {
        let fetcher = StubFetcher::default().with(blog(
            1,
            10,
            "codeforces.com/problemset/problem/1923/A \
             https://codeforces.com/contest/1923/problem/A \
             https://codeforces.com/gym/1923/problem/A",
        ));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        let keys: Vec<ProblemKey> = storage
            .references_for_blog(1)
            .await
            .unwrap()
            .iter()
            .map(ProblemReference::key)
            .collect();
        assert_eq!(
            keys,
            vec![
                ProblemKey::new(ProblemType::Problemset, 1923, "A"),
                contest(1923, "A"),
                ProblemKey::new(ProblemType::Gym, 1923, "A"),
            ]
        );
        assert_eq!(outcome.references_inserted, 3);
        assert_eq!(outcome.visited, vec![1]);
        assert!(storage.get_snapshot(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_crawl_twice_is_idempotent() {
        let fetcher = StubFetcher::default().with(with_comments(
            blog(1, 10, "codeforces.com/contest/1923/problem/A dp"),
            &[
                "codeforces.com/contest/1923/problem/A again",
                "codeforces.com/contest/1923/problem/B",
            ],
        ));
        let storage = MemoryStorage::new();
        let classifier = KeywordClassifier::new(vec![TagRule {
            keyword: "dp".into(),
            tag: "dp".into(),
        }]);
        let crawler = BlogCrawler::new(&fetcher, &storage).with_classifier(Box::new(classifier));

        crawler.crawl(1).await.unwrap();
        let first = storage.references_for_blog(1).await.unwrap();
        let second_outcome = crawler.crawl(1).await.unwrap();
        let second = storage.references_for_blog(1).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].tags, vec!["dp"]);
        assert_eq!(second_outcome.references_written(), 0);
    }

    #[tokio::test]
    async fn test_tags_only_grow_across_crawls() {
        let fetcher = StubFetcher::default().with(blog(1, 10, "codeforces.com/contest/1/problem/A"));
        let storage = MemoryStorage::new();
        let calls = Arc::new(AtomicUsize::new(0));

        BlogCrawler::new(&fetcher, &storage)
            .with_classifier(Box::new(CountingClassifier {
                calls: Arc::clone(&calls),
                tag: "dp",
            }))
            .crawl(1)
            .await
            .unwrap();

        // Edited post, classifier now says something else.
        fetcher.put(blog(1, 20, "codeforces.com/contest/1/problem/A"));
        let outcome = BlogCrawler::new(&fetcher, &storage)
            .with_classifier(Box::new(CountingClassifier {
                calls: Arc::clone(&calls),
                tag: "greedy",
            }))
            .crawl(1)
            .await
            .unwrap();
        assert_eq!(outcome.references_merged, 1);

        // Edited again, no tags at all.
        fetcher.put(blog(1, 30, "codeforces.com/contest/1/problem/A"));
        BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        let rows = storage.references_for_blog(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tags, vec!["dp", "greedy"]);
    }

    #[tokio::test]
    async fn test_cycle_visits_each_blog_once() {
        let fetcher = StubFetcher::default()
            .with(blog(1, 10, &link(2)))
            .with(blog(2, 10, &link(1)));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        assert_eq!(outcome.visited, vec![1, 2]);
        assert_eq!(fetcher.calls(), vec![1, 2]);
        assert_eq!(storage.snapshot_ids().await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_self_link_is_ignored() {
        let fetcher = StubFetcher::default().with(blog(1, 10, &format!("{} {}", link(1), link(1))));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        assert_eq!(outcome.visited, vec![1]);
        assert_eq!(fetcher.calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_depth_first_in_discovery_order() {
        let fetcher = StubFetcher::default()
            .with(blog(1, 10, &format!("{} {}", link(2), link(3))))
            .with(blog(2, 10, &format!("{} {}", link(4), link(3))))
            .with(blog(3, 10, &link(1)))
            .with(blog(4, 10, ""));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        assert_eq!(outcome.visited, vec![1, 2, 4, 3]);
        assert_eq!(fetcher.calls(), vec![1, 2, 4, 3]);
    }

    #[tokio::test]
    async fn test_unchanged_blog_is_not_extracted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let storage = MemoryStorage::new();
        let stored = with_comments(
            blog(1, 10, &format!("codeforces.com/contest/1/problem/A {}", link(2))),
            &["codeforces.com/gym/5/problem/B"],
        );
        storage
            .upsert_snapshot(&BlogSnapshot::from(&stored))
            .await
            .unwrap();

        let mut refreshed = stored.clone();
        refreshed.entry.title = "Renamed".into();
        let fetcher = StubFetcher::default()
            .with(refreshed)
            .with(blog(2, 10, ""));

        let outcome = BlogCrawler::new(&fetcher, &storage)
            .with_classifier(Box::new(CountingClassifier {
                calls: Arc::clone(&calls),
                tag: "x",
            }))
            .crawl(1)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(storage.reference_count().await, 0);
        assert_eq!(outcome.skipped_unchanged, 1);
        assert_eq!(outcome.extracted, 0);
        assert_eq!(fetcher.calls(), vec![1]);

        let snapshot = storage.get_snapshot(1).await.unwrap().unwrap();
        assert_eq!(snapshot.title, "Renamed");
    }

    #[tokio::test]
    async fn test_new_comments_only_extracts_comments() {
        let storage = MemoryStorage::new();
        let body = "codeforces.com/contest/1/problem/A";
        storage
            .upsert_snapshot(&BlogSnapshot::from(&blog(1, 10, body)))
            .await
            .unwrap();

        let fetcher = StubFetcher::default().with(with_comments(
            blog(1, 10, body),
            &[format!("codeforces.com/contest/2/problem/C {}", link(3)).as_str()],
        ));

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        let keys: Vec<ProblemKey> = storage
            .references_for_blog(1)
            .await
            .unwrap()
            .iter()
            .map(ProblemReference::key)
            .collect();
        assert_eq!(keys, vec![contest(2, "C")]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].blog_id, 3);
        assert_eq!(storage.get_snapshot(1).await.unwrap().unwrap().comment_count, 1);
    }

    #[tokio::test]
    async fn test_comment_classifier_sees_parent_body() {
        let fetcher = StubFetcher::default().with(with_comments(
            blog(1, 10, "<p>Today: segment tree tricks</p>"),
            &["codeforces.com/contest/7/problem/D"],
        ));
        let storage = MemoryStorage::new();
        let classifier = KeywordClassifier::new(vec![TagRule {
            keyword: "segment tree".into(),
            tag: "data structures".into(),
        }]);

        BlogCrawler::new(&fetcher, &storage)
            .with_classifier(Box::new(classifier))
            .crawl(1)
            .await
            .unwrap();

        let rows = storage.references_for_blog(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tags, vec!["data structures"]);
    }

    #[tokio::test]
    async fn test_child_failure_does_not_stop_siblings() {
        let fetcher = StubFetcher::default()
            .with(blog(
                1,
                10,
                &format!("codeforces.com/contest/9/problem/A {} {}", link(404), link(3)),
            ))
            .with(blog(3, 10, ""));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        assert_eq!(outcome.visited, vec![1, 3]);
        assert_eq!(
            outcome.failed,
            vec![CrawlFailure {
                blog_id: 404,
                parent: Some(1),
                message: "Fetch error for blog 404: Blog entry not found".into(),
            }]
        );
        assert!(storage.get_snapshot(1).await.unwrap().is_some());
        assert_eq!(storage.references_for_blog(1).await.unwrap().len(), 1);
        assert!(storage.get_snapshot(3).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_root_failure_is_returned() {
        let fetcher = StubFetcher::default();
        let storage = MemoryStorage::new();

        let err = BlogCrawler::new(&fetcher, &storage).crawl(7).await.unwrap_err();

        assert!(err.is_fetch());
        assert!(storage.snapshot_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_match_is_skipped() {
        let fetcher = StubFetcher::default().with(blog(
            1,
            10,
            "codeforces.com/contest/1923/problem/A codeforces.com/contest/problem/5/B",
        ));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        let rows = storage.references_for_blog(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key(), contest(1923, "A"));
        assert_eq!(outcome.malformed_matches, 1);
    }

    #[tokio::test]
    async fn test_filtered_title_is_left_alone() {
        let mut editorial = blog(1, 10, &format!("codeforces.com/contest/1/problem/A {}", link(2)));
        editorial.entry.title = "Codeforces Round 925 Editorial".into();
        let fetcher = StubFetcher::default().with(editorial).with(blog(2, 10, ""));
        let storage = MemoryStorage::new();

        let outcome = BlogCrawler::new(&fetcher, &storage).crawl(1).await.unwrap();

        assert_eq!(outcome.skipped_filtered, 1);
        assert!(storage.snapshot_ids().await.unwrap().is_empty());
        assert_eq!(storage.reference_count().await, 0);
        assert_eq!(fetcher.calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_max_blogs_bound() {
        let fetcher = StubFetcher::default()
            .with(blog(1, 10, &format!("{} {}", link(2), link(3))))
            .with(blog(2, 10, ""))
            .with(blog(3, 10, ""));
        let storage = MemoryStorage::new();
        let config = CrawlerConfig {
            max_blogs: Some(2),
            ..CrawlerConfig::default()
        };

        let outcome = BlogCrawler::new(&fetcher, &storage)
            .with_config(config)
            .crawl(1)
            .await
            .unwrap();

        assert_eq!(outcome.visited, vec![1, 2]);
        assert!(outcome.truncated);
    }

    #[tokio::test]
    async fn test_crawl_many_shares_visited_set() {
        let fetcher = StubFetcher::default()
            .with(blog(1, 10, &link(2)))
            .with(blog(2, 10, ""));
        let storage = MemoryStorage::new();
        let crawler = BlogCrawler::new(&fetcher, &storage);

        let outcome = crawler.crawl_many(&[1, 99, 2]).await;

        assert_eq!(outcome.visited, vec![1, 2]);
        assert_eq!(fetcher.calls(), vec![1, 2, 99]);
        let roots: Vec<u64> = outcome.root_failures().map(|f| f.blog_id).collect();
        assert_eq!(roots, vec![99]);
    }

    #[tokio::test]
    async fn test_run_crawler_requires_seed() {
        let fetcher = StubFetcher::default();
        let storage = MemoryStorage::new();
        let crawler = BlogCrawler::new(&fetcher, &storage);

        assert!(run_crawler(&crawler, &[]).await.is_err());
        assert!(run_crawler(&crawler, &[5]).await.is_err());
        let outcome = run_crawler(&crawler, &[5, 6]).await.unwrap();
        assert_eq!(outcome.root_failures().count(), 2);
    }
}
