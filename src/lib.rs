//! alt-catalog: core logic for enriching open-source alternative listings.
//!
//! The pipeline takes seed categories (each a list of "owner/name" GitHub
//! identifiers), resolves every identifier against the GitHub metadata API
//! under a politeness delay, isolates per-repository failures, and assembles
//! the successes into an ordered catalog for the front-end to consume.

pub mod catalog;
pub mod cli;
pub mod enrich;
pub mod github;
pub mod load_config;
pub mod output;
pub mod seed;
