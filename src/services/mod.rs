//! Service layer for the analyzer.
//!
//! This module contains the business logic for:
//! - Link extraction (`extractor`)
//! - Reference canonicalization (`normalizer`)
//! - Reference tagging (`TagClassifier`)
//! - Remote data access (`BlogFetcher`, `ProblemSource`, `CodeforcesClient`)

pub mod classifier;
mod codeforces;
pub mod extractor;
mod fetcher;
pub mod normalizer;

pub use classifier::{KeywordClassifier, NoopClassifier, TagClassifier};
pub use codeforces::CodeforcesClient;
pub use extractor::{ProblemMatch, UrlShape, extract_blog_mentions, extract_problem_mentions};
pub use fetcher::{BlogFetcher, ProblemSource};
pub use normalizer::normalize;
