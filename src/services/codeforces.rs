// src/services/codeforces.rs

//! Codeforces API client.
//!
//! Talks to the public JSON API (`{base_url}/{method}?{params}`). Every
//! response is wrapped in a `{status, result, comment}` envelope. When an
//! API key and secret are configured, requests are signed with `apiKey`,
//! `time` and `apiSig` parameters.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha512};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    ApiConfig, BlogBundle, BlogEntry, Comment, ProblemCatalogEntry, ProblemStatistics,
};
use crate::services::fetcher::{BlogFetcher, ProblemSource};
use crate::utils::http;

/// Response envelope shared by every API method.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    result: Option<T>,
    #[serde(default)]
    comment: Option<String>,
}

/// `problemset.problems` result payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemsetResult {
    #[serde(default)]
    problems: Vec<ProblemCatalogEntry>,
    #[serde(default)]
    problem_statistics: Vec<ProblemStatistics>,
}

/// Decode an API envelope, turning a non-OK status into [`AppError::Api`].
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if envelope.status != "OK" {
        return Err(AppError::Api {
            status: envelope.status,
            comment: envelope.comment.unwrap_or_default(),
        });
    }
    envelope.result.ok_or_else(|| AppError::Api {
        status: envelope.status,
        comment: "missing result".to_string(),
    })
}

/// Compute `apiSig` for a method call.
///
/// `params` must already contain `apiKey` and `time`.
fn api_signature(method: &str, params: &[(String, String)], secret: &str, nonce: u32) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();

    let mut hasher = Sha512::new();
    hasher.update(format!("{nonce}/{method}?{}#{secret}", pairs.join("&")));
    format!("{nonce}{}", hex::encode(hasher.finalize()))
}

/// Join solved counts from the statistics list onto catalog entries.
fn attach_statistics(
    mut problems: Vec<ProblemCatalogEntry>,
    statistics: &[ProblemStatistics],
) -> Vec<ProblemCatalogEntry> {
    let solved: HashMap<(Option<u64>, &str), u64> = statistics
        .iter()
        .map(|s| ((s.contest_id, s.index.as_str()), s.solved_count))
        .collect();

    for problem in &mut problems {
        if let Some(count) = solved.get(&(problem.contest_id, problem.index.as_str())) {
            problem.solved_count = Some(*count);
        }
    }
    problems
}

/// Client for the Codeforces API.
#[derive(Debug, Clone)]
pub struct CodeforcesClient {
    client: Client,
    config: ApiConfig,
}

impl CodeforcesClient {
    /// Create a new client with the given API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            config: config.clone(),
        })
    }

    /// Build the request URL for a method, signing it if credentials exist.
    fn method_url(&self, method: &str, mut params: Vec<(String, String)>) -> Result<Url> {
        if let (Some(key), Some(secret)) = (&self.config.key, &self.config.secret) {
            params.push(("apiKey".to_string(), key.clone()));
            params.push(("time".to_string(), Utc::now().timestamp().to_string()));
            let nonce = rand::thread_rng().gen_range(100_000..1_000_000);
            let signature = api_signature(method, &params, secret, nonce);
            params.push(("apiSig".to_string(), signature));
        }

        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse_with_params(&format!("{base}/{method}"), &params)?)
    }

    /// Call an API method and decode its result.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        if self.config.request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        let url = self.method_url(method, params)?;
        log::debug!("Calling {}", method);
        let body = http::fetch_text(&self.client, url.as_str()).await?;
        decode_envelope(&body)
    }

    /// `blogEntry.view`
    pub async fn blog_entry(&self, id: u64) -> Result<BlogEntry> {
        self.call(
            "blogEntry.view",
            vec![("blogEntryId".to_string(), id.to_string())],
        )
        .await
    }

    /// `blogEntry.comments`
    pub async fn blog_comments(&self, id: u64) -> Result<Vec<Comment>> {
        self.call(
            "blogEntry.comments",
            vec![("blogEntryId".to_string(), id.to_string())],
        )
        .await
    }

    /// `problemset.problems`, solved counts attached.
    pub async fn problems(&self) -> Result<Vec<ProblemCatalogEntry>> {
        let result: ProblemsetResult = self.call("problemset.problems", Vec::new()).await?;
        Ok(attach_statistics(result.problems, &result.problem_statistics))
    }
}

#[async_trait]
impl BlogFetcher for CodeforcesClient {
    async fn fetch_blog(&self, id: u64) -> Result<BlogBundle> {
        let entry = self
            .blog_entry(id)
            .await
            .map_err(|e| AppError::fetch(id, e))?;
        let comments = self
            .blog_comments(id)
            .await
            .map_err(|e| AppError::fetch(id, e))?;
        Ok(BlogBundle::new(entry, comments))
    }
}

#[async_trait]
impl ProblemSource for CodeforcesClient {
    async fn fetch_problems(&self) -> Result<Vec<ProblemCatalogEntry>> {
        self.problems().await
    }
}
