//! Problem catalog data structures.

use serde::{Deserialize, Serialize};

/// A problem as listed by `problemset.problems`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemCatalogEntry {
    #[serde(default)]
    pub contest_id: Option<u64>,

    #[serde(default)]
    pub problemset_name: Option<String>,

    pub index: String,

    pub name: String,

    /// `PROGRAMMING` or `QUESTION`
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub points: Option<f64>,

    #[serde(default)]
    pub rating: Option<i64>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub solved_count: Option<u64>,
}

impl ProblemCatalogEntry {
    /// Catalog key: `(contestId, index)`.
    pub fn key(&self) -> (Option<u64>, &str) {
        (self.contest_id, self.index.as_str())
    }
}

/// Per-problem statistics as listed by `problemset.problems`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatistics {
    #[serde(default)]
    pub contest_id: Option<u64>,

    pub index: String,

    #[serde(default)]
    pub solved_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "contestId": 1923,
            "index": "A",
            "name": "Moving Chips",
            "type": "PROGRAMMING",
            "rating": 800,
            "tags": ["greedy", "implementation"]
        }"#;

        let entry: ProblemCatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.key(), (Some(1923), "A"));
        assert_eq!(entry.kind, "PROGRAMMING");
        assert_eq!(entry.rating, Some(800));
        assert_eq!(entry.solved_count, None);
        assert!(entry.problemset_name.is_none());
    }
}
