// src/services/classifier.rs

//! Tag classification for problem references.

use scraper::Html;

use crate::models::{ClassifierConfig, ProblemKey, TagRule};

/// Produces labels for a problem reference from the text around it.
pub trait TagClassifier: Send + Sync {
    /// `context` is the blog body, or the body followed by the comment.
    fn classify(&self, context: &str, problem: &ProblemKey) -> Vec<String>;
}

/// Default classifier: never produces tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClassifier;

impl TagClassifier for NoopClassifier {
    fn classify(&self, _context: &str, _problem: &ProblemKey) -> Vec<String> {
        Vec::new()
    }
}

/// Tags a reference with every rule whose keyword appears in the visible text.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    rules: Vec<TagRule>,
}

impl KeywordClassifier {
    pub fn new(rules: Vec<TagRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| TagRule {
                keyword: rule.keyword.to_lowercase(),
                tag: rule.tag,
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.rules.clone())
    }

    fn visible_text(html: &str) -> String {
        Html::parse_fragment(html)
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl TagClassifier for KeywordClassifier {
    fn classify(&self, context: &str, _problem: &ProblemKey) -> Vec<String> {
        if self.rules.is_empty() {
            return Vec::new();
        }

        let text = Self::visible_text(context);
        let mut tags: Vec<String> = Vec::new();
        for rule in &self.rules {
            if text.contains(&rule.keyword) && !tags.contains(&rule.tag) {
                tags.push(rule.tag.clone());
            }
        }
        tags
    }
}

/// Pick the classifier described by the configuration.
pub fn from_config(config: &ClassifierConfig) -> Box<dyn TagClassifier> {
    if config.rules.is_empty() {
        Box::new(NoopClassifier)
    } else {
        Box::new(KeywordClassifier::from_config(config))
    }
}
