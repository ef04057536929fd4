//! Problem reference data structures and the tag merge rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// URL shape a problem was referenced through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    /// `.../problemset/problem/{id}/{index}` and other plain forms
    Problemset,
    /// `contest/{id}/problem/{index}`
    Contest,
    /// `gym/{id}/problem/{index}`
    Gym,
}

impl ProblemType {
    /// Classify by the leading path segment of a problem URL.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "contest" => Self::Contest,
            "gym" => Self::Gym,
            _ => Self::Problemset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problemset => "problemset",
            Self::Contest => "contest",
            Self::Gym => "gym",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "problemset" => Ok(Self::Problemset),
            "contest" => Ok(Self::Contest),
            "gym" => Ok(Self::Gym),
            other => Err(AppError::validation(format!(
                "unknown problem type '{other}' (expected problemset, contest or gym)"
            ))),
        }
    }
}

/// Canonical `(type, id, index)` triple identifying a problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemKey {
    pub problem_type: ProblemType,
    pub problem_id: u64,
    pub index: String,
}

impl ProblemKey {
    pub fn new(problem_type: ProblemType, problem_id: u64, index: impl Into<String>) -> Self {
        Self {
            problem_type,
            problem_id,
            index: index.into(),
        }
    }
}

impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.problem_type, self.problem_id, self.index)
    }
}

/// Parses the `type/id/index` form printed by `Display`.
impl FromStr for ProblemKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [problem_type, problem_id, index] = parts.as_slice() else {
            return Err(AppError::validation(format!(
                "expected TYPE/ID/INDEX, got '{s}'"
            )));
        };
        let problem_id = problem_id
            .parse::<u64>()
            .map_err(|_| AppError::validation(format!("problem id '{problem_id}' is not numeric")))?;
        if index.is_empty() {
            return Err(AppError::validation("problem index is empty"));
        }
        Ok(Self::new(problem_type.parse()?, problem_id, *index))
    }
}

/// A recorded mention of a problem inside a blog's body or comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReference {
    pub blog_id: u64,
    pub problem_type: ProblemType,
    pub problem_id: u64,
    pub index: String,
    /// First-seen order, no duplicates, never shrinks
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProblemReference {
    pub fn new(blog_id: u64, key: ProblemKey, tags: Vec<String>) -> Self {
        let mut reference = Self {
            blog_id,
            problem_type: key.problem_type,
            problem_id: key.problem_id,
            index: key.index,
            tags: Vec::with_capacity(tags.len()),
        };
        merge_tags(&mut reference.tags, &tags);
        reference
    }

    pub fn key(&self) -> ProblemKey {
        ProblemKey::new(self.problem_type, self.problem_id, self.index.clone())
    }

    /// Whether this row is stored under `(blog_id, key)`.
    pub fn matches(&self, blog_id: u64, key: &ProblemKey) -> bool {
        self.blog_id == blog_id
            && self.problem_type == key.problem_type
            && self.problem_id == key.problem_id
            && self.index == key.index
    }
}

/// Append every tag of `incoming` not already in `current`.
///
/// Returns `true` if `current` changed.
pub fn merge_tags(current: &mut Vec<String>, incoming: &[String]) -> bool {
    let before = current.len();
    for tag in incoming {
        if !current.contains(tag) {
            current.push(tag.clone());
        }
    }
    current.len() != before
}
