use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::enrich::{enrich, EnrichOptions};
use crate::github::GitHubClient;
use crate::load_config::load_config;
use crate::output::write_catalog;
use crate::seed::load_seeds;

/// CLI for alt-catalog: enrich open-source alternative listings with GitHub metadata.
#[derive(Parser)]
#[clap(
    name = "alt-catalog",
    version,
    about = "Enrich seeded categories of open-source alternatives with GitHub repository metadata"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch metadata for every seeded repository and write the display-ready catalog
    Enrich {
        /// Path to the JSON seed file
        #[clap(long, default_value = "seed.json")]
        seed: PathBuf,
        /// Path for the enriched JSON artifact
        #[clap(long, default_value = "db.json")]
        out: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Enrich { seed, out } => {
            // Credential check comes first so a missing token never reaches
            // seed parsing or the network.
            let config = load_config(seed, out)?;
            let seeds = load_seeds(&config.seed_path)?;
            println!("Enriching {} categories...", seeds.len());

            let client = GitHubClient::new(&config.token, &config.api_base)?;
            let options = EnrichOptions {
                delay: config.delay,
                ..EnrichOptions::default()
            };
            let report = enrich(&seeds, &client, &options).await?;

            write_catalog(&config.output_path, &report.pages)?;

            for skip in &report.skipped {
                eprintln!("  [skipped] {} ({}): {}", skip.repo, skip.slug, skip.reason);
            }
            println!(
                "Done. {} categories written to {:?}, {} repositories skipped.",
                report.pages.len(),
                config.output_path,
                report.skipped.len()
            );
            Ok(())
        }
    }
}
