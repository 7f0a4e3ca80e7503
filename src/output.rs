use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::CategoryPage;

/// Writes the enriched catalog as pretty-printed JSON.
///
/// Field order in the artifact follows the struct declarations in
/// [`crate::catalog`], which is what the front-end relies on.
pub fn write_catalog<P: AsRef<Path>>(path: P, pages: &[CategoryPage]) -> Result<()> {
    let path_ref = path.as_ref();
    let body = serde_json::to_string_pretty(pages).context("Failed to serialise catalog")?;
    fs::write(path_ref, body)
        .with_context(|| format!("Failed to write catalog to {:?}", path_ref))?;

    info!(output_path = ?path_ref, pages = pages.len(), "Catalog written");
    Ok(())
}
