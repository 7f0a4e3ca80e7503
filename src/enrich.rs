//! Coordinating module for the fetch-and-aggregate pipeline.
//!
//! Drives one sequential pass over all seed categories: one metadata lookup
//! per repository identifier, a politeness delay between consecutive lookups,
//! and per-item failure isolation. Produces exactly one [`CategoryPage`] per
//! seed category, in seed order, even when every lookup in it failed.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::catalog::{CategoryPage, RepoDetail};
use crate::github::{FetchError, RepoMetadataClient};
use crate::seed::SeedEntry;

/// Pause between consecutive lookups, to stay under the API rate limit.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub delay: Duration,
    pub cancel: CancellationToken,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        EnrichOptions {
            delay: DEFAULT_DELAY,
            cancel: CancellationToken::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("enrichment cancelled before completion")]
    Cancelled,
}

/// Outcome of one full run: the aggregate plus every skipped repository.
#[derive(Debug)]
pub struct EnrichReport {
    pub pages: Vec<CategoryPage>,
    pub skipped: Vec<SkippedRepo>,
}

/// One repository lookup that failed and was left out of its category page.
#[derive(Debug)]
pub struct SkippedRepo {
    pub slug: String,
    pub repo: String,
    pub reason: FetchError,
}

/// Tagged per-lookup outcome, kept internal until the page is finalized.
enum LookupOutcome {
    Fetched(RepoDetail),
    Failed(FetchError),
}

/// Entrypoint: enrich every seed category and return the run report.
///
/// Lookup failures never abort the run; only an external cancellation does.
/// The returned `pages` always has one entry per seed, in seed order.
pub async fn enrich(
    seeds: &[SeedEntry],
    client: &dyn RepoMetadataClient,
    options: &EnrichOptions,
) -> Result<EnrichReport, EnrichError> {
    info!(categories = seeds.len(), "Starting enrichment run");

    let mut pages = Vec::with_capacity(seeds.len());
    let mut skipped = Vec::new();
    let mut throttle = Throttle::new(options.delay);

    for seed in seeds {
        info!(
            saas_name = %seed.saas_name,
            slug = %seed.slug,
            repos = seed.repos.len(),
            "Processing category"
        );
        println!("Processing alternatives for: {}", seed.saas_name);

        let mut alternatives = Vec::new();
        for repo in &seed.repos {
            if options.cancel.is_cancelled() {
                info!(slug = %seed.slug, "Cancellation requested, aborting run");
                return Err(EnrichError::Cancelled);
            }
            throttle.wait().await;

            match lookup(client, repo).await {
                LookupOutcome::Fetched(detail) => {
                    info!(repo = %repo, stars = detail.stars, "Fetched repository");
                    println!("  + {} ({} stars)", detail.name, detail.stars);
                    alternatives.push(detail);
                }
                LookupOutcome::Failed(reason) => {
                    error!(
                        slug = %seed.slug,
                        repo = %repo,
                        error = %reason,
                        "Skipping repository"
                    );
                    skipped.push(SkippedRepo {
                        slug: seed.slug.clone(),
                        repo: repo.clone(),
                        reason,
                    });
                }
            }
        }

        pages.push(CategoryPage {
            saas_name: seed.saas_name.clone(),
            slug: seed.slug.clone(),
            alternatives,
        });
    }

    info!(
        pages = pages.len(),
        skipped = skipped.len(),
        "Enrichment run finished"
    );
    Ok(EnrichReport { pages, skipped })
}

async fn lookup(client: &dyn RepoMetadataClient, repo: &str) -> LookupOutcome {
    match client.fetch_repo(repo).await {
        Ok(record) => LookupOutcome::Fetched(RepoDetail::from_record(&record)),
        Err(e) => LookupOutcome::Failed(e),
    }
}

/// Waits `delay` before every call except the first of the run, which puts
/// the pause exactly between consecutive outbound requests.
struct Throttle {
    delay: Duration,
    first: bool,
}

impl Throttle {
    fn new(delay: Duration) -> Self {
        Throttle { delay, first: true }
    }

    async fn wait(&mut self) {
        if self.first {
            self.first = false;
            return;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
