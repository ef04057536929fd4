// src/services/normalizer.rs

//! Canonicalization of matched problem URLs.

use crate::error::{AppError, Result};
use crate::models::{ProblemKey, ProblemType};
use crate::services::extractor::ProblemMatch;

/// Normalize a matched problem URL into its canonical `(type, id, index)`.
///
/// Works on the last four path segments. Contest and gym URLs put the id
/// before the literal `problem`, the plain form puts it after, so the two
/// middle segments are swapped for the former before `problem` is dropped.
pub fn normalize(url: &str) -> Result<ProblemKey> {
    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 4 {
        return Err(AppError::malformed(url, "fewer than four path segments"));
    }

    let mut tail: [&str; 4] = [
        segments[segments.len() - 4],
        segments[segments.len() - 3],
        segments[segments.len() - 2],
        segments[segments.len() - 1],
    ];
    if matches!(tail[0], "contest" | "gym") {
        tail.swap(1, 2);
    }
    let [kind, _problem, id, index] = tail;

    let problem_id = id
        .parse::<u64>()
        .map_err(|e| AppError::malformed(url, format!("problem id '{id}': {e}")))?;
    if index.is_empty() {
        return Err(AppError::malformed(url, "empty problem index"));
    }

    Ok(ProblemKey::new(
        ProblemType::from_segment(kind),
        problem_id,
        index,
    ))
}

/// Normalize an extractor match.
pub fn normalize_match(found: &ProblemMatch) -> Result<ProblemKey> {
    normalize(&found.url)
}
