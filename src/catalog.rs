//! Display-ready output shapes consumed by the front-end.
//!
//! Field declaration order here is the serialized field order of the final
//! artifact, so reordering struct fields changes the output format.

use serde::Serialize;

use crate::github::RepoRecord;

/// One enriched repository entry.
#[derive(Debug, Clone, Serialize)]
pub struct RepoDetail {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub url: String,
    pub license: String,
    pub last_update: String,
}

impl RepoDetail {
    /// Project a remote record into the trimmed display shape.
    ///
    /// Absent description or license become empty strings, never nulls;
    /// `last_update` keeps only the calendar date of the push timestamp.
    pub fn from_record(record: &RepoRecord) -> Self {
        RepoDetail {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            stars: record.stargazers_count,
            url: record.html_url.clone(),
            license: record
                .license
                .as_ref()
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            last_update: calendar_date(&record.pushed_at),
        }
    }
}

/// One category's enriched page: only the successful lookups, input order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub saas_name: String,
    pub slug: String,
    pub alternatives: Vec<RepoDetail>,
}

/// First 10 characters of an ISO-8601 timestamp ("YYYY-MM-DD").
///
/// Upstream timestamps are not validated; a short or malformed value yields
/// whatever prefix exists rather than panicking.
fn calendar_date(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}
