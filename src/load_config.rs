use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::enrich::DEFAULT_DELAY;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fully merged runtime configuration: CLI paths plus env secrets.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub token: String,
    pub seed_path: PathBuf,
    pub output_path: PathBuf,
    pub api_base: String,
    pub delay: Duration,
}

/// Merges CLI-provided paths with required env vars for secrets.
///
/// A missing or empty `GITHUB_TOKEN` is fatal here, before any seed I/O or
/// network activity. `GITHUB_API_BASE` optionally overrides the endpoint
/// (GitHub Enterprise, test doubles).
pub fn load_config(seed_path: PathBuf, output_path: PathBuf) -> Result<AppConfig> {
    let token = match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.trim().is_empty() => {
            info!("GITHUB_TOKEN found in env");
            token
        }
        Ok(_) => {
            error!("GITHUB_TOKEN environment variable is set but empty");
            return Err(anyhow::anyhow!(
                "GITHUB_TOKEN environment variable is set but empty"
            ));
        }
        Err(e) => {
            error!(error = ?e, "GITHUB_TOKEN environment variable not set");
            return Err(anyhow::anyhow!(
                "GITHUB_TOKEN environment variable not set: {e}"
            ));
        }
    };

    let api_base =
        std::env::var("GITHUB_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    info!(
        seed_path = ?seed_path,
        output_path = ?output_path,
        api_base = %api_base,
        "Config loaded and merged successfully"
    );

    Ok(AppConfig {
        token,
        seed_path,
        output_path,
        api_base,
        delay: DEFAULT_DELAY,
    })
}
