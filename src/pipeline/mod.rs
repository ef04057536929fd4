//! Pipeline entry points for analyzer operations.
//!
//! - `run_crawler`: Crawl seed blogs and index the problems they mention
//! - `run_refresh`: Refresh the cached problem catalog

pub mod crawl;
pub mod refresh;
pub mod staleness;

pub use crawl::{BlogCrawler, CrawlFailure, CrawlOutcome, run_crawler};
pub use refresh::run_refresh;
pub use staleness::Staleness;
