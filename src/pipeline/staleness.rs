//! Staleness check between the stored snapshot and a fresh fetch.
//!
//! A blog without a stored snapshot is new on both counts. Otherwise the body
//! is re-extracted when the fetched modification time is later than the
//! stored one, and comments when the fetched count is higher.

use crate::models::{BlogBundle, BlogSnapshot};

/// What changed since the last stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staleness {
    /// Body must be re-extracted
    pub new_content: bool,
    /// Comments must be re-extracted
    pub new_comments: bool,
}

impl Staleness {
    /// Compare a fetched blog against its prior snapshot.
    pub fn check(prior: Option<&BlogSnapshot>, fetched: &BlogBundle) -> Self {
        match prior {
            None => Self {
                new_content: true,
                new_comments: true,
            },
            Some(prior) => Self {
                new_content: prior.modification_time < fetched.entry.modification_time_seconds,
                new_comments: prior.comment_count < fetched.comment_count(),
            },
        }
    }

    /// Nothing to extract.
    pub fn is_unchanged(&self) -> bool {
        !self.new_content && !self.new_comments
    }
}
