use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use alt_catalog::enrich::{enrich, EnrichError, EnrichOptions};
use alt_catalog::github::{FetchError, License, MockRepoMetadataClient, RepoRecord};
use alt_catalog::seed::SeedEntry;

fn record(name: &str, stars: u64) -> RepoRecord {
    RepoRecord {
        name: name.to_string(),
        full_name: format!("octo/{name}"),
        description: Some(format!("{name} description")),
        stargazers_count: stars,
        html_url: format!("https://github.com/octo/{name}"),
        pushed_at: "2024-03-15T10:22:00Z".to_string(),
        license: Some(License {
            name: "MIT License".to_string(),
        }),
    }
}

fn options() -> EnrichOptions {
    EnrichOptions {
        delay: Duration::ZERO,
        cancel: CancellationToken::new(),
    }
}

fn seed(saas_name: &str, slug: &str, repos: &[&str]) -> SeedEntry {
    SeedEntry {
        saas_name: saas_name.to_string(),
        slug: slug.to_string(),
        repos: repos.iter().map(|r| r.to_string()).collect(),
    }
}

#[tokio::test]
async fn aggregate_has_one_page_per_seed_in_seed_order() {
    let seeds = vec![
        seed("Acme", "acme", &["octo/foo"]),
        seed("Globex", "globex", &["octo/bar"]),
    ];

    let mut client = MockRepoMetadataClient::new();
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/foo")
        .returning(|_| Ok(record("foo", 10)));
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/bar")
        .returning(|_| Ok(record("bar", 20)));

    let report = enrich(&seeds, &client, &options()).await.unwrap();

    assert_eq!(report.pages.len(), seeds.len());
    assert_eq!(report.pages[0].slug, "acme");
    assert_eq!(report.pages[1].slug, "globex");
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn fully_successful_category_keeps_all_repos_in_input_order() {
    let seeds = vec![seed("Acme", "acme", &["octo/a", "octo/b", "octo/c"])];

    let mut client = MockRepoMetadataClient::new();
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/a")
        .returning(|_| Ok(record("a", 1)));
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/b")
        .returning(|_| Ok(record("b", 2)));
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/c")
        .returning(|_| Ok(record("c", 3)));

    let report = enrich(&seeds, &client, &options()).await.unwrap();

    let names: Vec<&str> = report.pages[0]
        .alternatives
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn failed_lookup_is_skipped_and_run_continues() {
    // octo/foo 404s, octo/bar succeeds; the page must carry only octo/bar.
    let seeds = vec![seed("Acme", "acme", &["octo/foo", "octo/bar"])];

    let mut client = MockRepoMetadataClient::new();
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/foo")
        .returning(|_| Err(FetchError::Status(StatusCode::NOT_FOUND)));
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/bar")
        .returning(|_| Ok(record("bar", 120)));

    let report = enrich(&seeds, &client, &options()).await.unwrap();

    assert_eq!(report.pages.len(), 1);
    let page = &report.pages[0];
    assert_eq!(page.saas_name, "Acme");
    assert_eq!(page.slug, "acme");
    assert_eq!(page.alternatives.len(), 1);
    assert_eq!(page.alternatives[0].name, "bar");
    assert_eq!(page.alternatives[0].stars, 120);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].slug, "acme");
    assert_eq!(report.skipped[0].repo, "octo/foo");
    assert!(matches!(
        report.skipped[0].reason,
        FetchError::Status(status) if status.as_u16() == 404
    ));
}

#[tokio::test]
async fn all_failed_category_yields_present_page_with_empty_alternatives() {
    let seeds = vec![
        seed("Acme", "acme", &["octo/gone", "octo/also-gone"]),
        seed("Globex", "globex", &["octo/bar"]),
    ];

    let mut client = MockRepoMetadataClient::new();
    client
        .expect_fetch_repo()
        .withf(|name| name.starts_with("octo/gone") || name.starts_with("octo/also"))
        .returning(|_| Err(FetchError::Status(StatusCode::FORBIDDEN)));
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/bar")
        .returning(|_| Ok(record("bar", 5)));

    let report = enrich(&seeds, &client, &options()).await.unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[0].slug, "acme");
    assert!(report.pages[0].alternatives.is_empty());
    assert_eq!(report.pages[1].alternatives.len(), 1);
    assert_eq!(report.skipped.len(), 2);
}

#[tokio::test]
async fn duplicate_identifiers_are_fetched_independently() {
    let seeds = vec![seed("Acme", "acme", &["octo/foo", "octo/foo"])];

    let mut client = MockRepoMetadataClient::new();
    client
        .expect_fetch_repo()
        .withf(|name| name == "octo/foo")
        .times(2)
        .returning(|_| Ok(record("foo", 7)));

    let report = enrich(&seeds, &client, &options()).await.unwrap();
    assert_eq!(report.pages[0].alternatives.len(), 2);
}

#[tokio::test]
async fn cancelled_run_aborts_before_any_lookup() {
    let seeds = vec![seed("Acme", "acme", &["octo/foo"])];

    // No expectations registered: any fetch would panic the mock.
    let client = MockRepoMetadataClient::new();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let options = EnrichOptions {
        delay: Duration::ZERO,
        cancel,
    };

    let result = enrich(&seeds, &client, &options).await;
    assert!(matches!(result, Err(EnrichError::Cancelled)));
}

#[tokio::test]
async fn empty_seed_list_yields_empty_report() {
    let client = MockRepoMetadataClient::new();
    let report = enrich(&[], &client, &options()).await.unwrap();
    assert!(report.pages.is_empty());
    assert!(report.skipped.is_empty());
}
