// src/services/extractor.rs

//! Pattern extraction of problem and blog links from rich text.

use std::sync::LazyLock;

use regex::Regex;

/// Host prefix shared by every recognized link.
const CODEFORCES_URL: &str = r"((http|https)://)?(www.)?codeforces\.com";

static PROBLEM_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{CODEFORCES_URL}/(?:(?P<plain>[A-Za-z/]+/problem/\d+/[A-Za-z\d]+)|(?P<contest>contest/\d+/problem/[A-Za-z\d]+)|(?P<gym>gym/\d+/problem/[A-Za-z\d]+))"
    ))
    .expect("problem URL pattern is valid")
});

static BLOG_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{CODEFORCES_URL}/blog/entry/(?P<id>\d+)"))
        .expect("blog URL pattern is valid")
});

/// Which of the three problem URL shapes a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlShape {
    /// `{segments}/problem/{id}/{index}`
    Plain,
    /// `contest/{id}/problem/{index}`
    Contest,
    /// `gym/{id}/problem/{index}`
    Gym,
}

/// A problem link found in text, not yet normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMatch {
    /// Full matched text, host included
    pub url: String,
    pub shape: UrlShape,
}

/// Find every problem link in `text`, in order of appearance.
pub fn extract_problem_mentions(text: &str) -> Vec<ProblemMatch> {
    PROBLEM_URL
        .captures_iter(text)
        .filter_map(|caps| {
            let shape = if caps.name("plain").is_some() {
                UrlShape::Plain
            } else if caps.name("contest").is_some() {
                UrlShape::Contest
            } else {
                UrlShape::Gym
            };
            caps.get(0).map(|m| ProblemMatch {
                url: m.as_str().to_string(),
                shape,
            })
        })
        .collect()
}

/// Find every linked blog id in `text`, in order of appearance.
///
/// Ids that do not fit in a `u64` are skipped.
pub fn extract_blog_mentions(text: &str) -> Vec<u64> {
    BLOG_URL
        .captures_iter(text)
        .filter_map(|caps| caps.name("id")?.as_str().parse().ok())
        .collect()
}
