use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

/// One product category to enrich, as declared in the seed file.
///
/// `repos` entries are "owner/name" identifiers. Their order is significant
/// and preserved all the way to the output artifact; duplicates are kept and
/// fetched independently.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub saas_name: String,
    pub slug: String,
    pub repos: Vec<String>,
}

/// Loads the JSON seed file: an ordered array of categories.
///
/// An unreadable or unparseable seed file aborts the run before any network
/// activity, so errors here carry the path for diagnosis.
pub fn load_seeds<P: AsRef<Path>>(path: P) -> Result<Vec<SeedEntry>> {
    let path_ref = path.as_ref();
    info!(seed_path = ?path_ref, "Loading seed file");

    let raw = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, seed_path = ?path_ref, "Failed to read seed file");
            return Err(anyhow::anyhow!(
                "Failed to read seed file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let seeds: Vec<SeedEntry> = match serde_json::from_str(&raw) {
        Ok(seeds) => seeds,
        Err(e) => {
            error!(error = ?e, seed_path = ?path_ref, "Failed to parse seed JSON");
            return Err(anyhow::anyhow!(
                "Failed to parse seed file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    info!(categories = seeds.len(), "Seed file loaded");
    Ok(seeds)
}
