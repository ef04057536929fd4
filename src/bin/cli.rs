//! cf-analyzer CLI
//!
//! Crawls Codeforces blogs and indexes the problems they mention.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use cf_analyzer::{
    error::{AppError, Result},
    models::{Config, ProblemKey},
    pipeline::{self, BlogCrawler},
    services::{CodeforcesClient, classifier},
    storage::{CatalogStore, LocalStorage, ReferenceStore, SnapshotStore},
};

/// cf-analyzer - Codeforces blog reference indexer
#[derive(Parser, Debug)]
#[command(
    name = "cf-analyzer",
    version,
    about = "Indexes Codeforces problems by the blogs that mention them"
)]

struct Cli {
    /// Path to storage directory containing config and crawl data
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl blogs recursively starting from the given ids
    Crawl {
        /// Seed blog ids
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Stop after visiting this many blogs
        #[arg(long)]
        max_blogs: Option<usize>,
    },

    /// Refresh the cached problem catalog
    RefreshProblems,

    /// Print stored references as JSON
    #[command(group(ArgGroup::new("target").required(true).args(["blog", "problem"])))]
    References {
        /// References found in this blog
        #[arg(long)]
        blog: Option<u64>,

        /// Blogs referencing this problem, as TYPE/ID/INDEX (e.g. contest/1923/A)
        #[arg(long)]
        problem: Option<String>,
    },

    /// Validate configuration file
    Validate,

    /// Show storage info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let mut config = Config::load_or_default(&config_path).with_env_credentials();

    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Crawl { ids, max_blogs } => {
            if max_blogs.is_some() {
                config.crawler.max_blogs = max_blogs;
            }
            config.validate()?;

            let client = CodeforcesClient::new(&config.api)?;
            let crawler = BlogCrawler::new(&client, &storage)
                .with_classifier(classifier::from_config(&config.classifier))
                .with_config(config.crawler.clone());

            let outcome = pipeline::run_crawler(&crawler, &ids).await?;
            let root_failures = outcome.root_failures().count();
            if root_failures == ids.len() {
                return Err(AppError::validation(format!(
                    "all {} seed blogs failed to crawl",
                    root_failures
                )));
            }

            log::info!("Crawl complete!");
        }

        Command::RefreshProblems => {
            config.validate()?;
            let client = CodeforcesClient::new(&config.api)?;
            pipeline::run_refresh(&client, &storage).await?;
        }

        Command::References { blog, problem } => {
            let references = match (blog, problem) {
                (Some(blog_id), _) => storage.references_for_blog(blog_id).await?,
                (None, Some(problem)) => {
                    let key: ProblemKey = problem.parse()?;
                    storage.references_to_problem(&key).await?
                }
                (None, None) => {
                    return Err(AppError::validation("either --blog or --problem is required"));
                }
            };
            println!("{}", serde_json::to_string_pretty(&references)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = Config::load_if_present(&config_path)?.with_env_credentials();
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found (using defaults)"
                }
            );

            let blogs = storage.snapshot_ids().await?;
            log::info!("Blog snapshots: {}", blogs.len());

            let mut references = 0;
            for blog_id in storage.referenced_blog_ids().await? {
                references += storage.references_for_blog(blog_id).await?.len();
            }
            log::info!("Problem references: {}", references);
            log::info!("Catalog problems: {}", storage.problem_count().await?);
        }
    }

    Ok(())
}
