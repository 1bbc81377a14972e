//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to stand up a mock tutorial site and run
//! both phases end-to-end against it, with artifacts going to a
//! temporary directory.

use tempfile::tempdir;
use tsumugi::batch::{batch_file_name, Batch};
use tsumugi::config::{Config, OutputConfig, PacingConfig, SiteConfig};
use tsumugi::pipeline::{run_discovery, run_extraction, CATALOG_FILE};
use tsumugi::sink::{ArtifactSink, FsSink};
use tsumugi::{Catalog, HttpFetcher, TokioPacer, TutorialRecord};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server, with pacing
/// short enough to keep the tests fast.
fn create_test_config(base_url: &str, batch_size: usize) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        pacing: PacingConfig {
            discovery_delay_ms: 1,
            extraction_delay_ms: 1,
        },
        output: OutputConfig {
            directory: "unused-by-tests".to_string(),
            batch_size,
        },
    }
}

async fn mount_listing(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("f[0]", "type:guide"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_discovery_with_pagination_and_dedup() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Pages 0 and 1 advertise a next page, page 2 does not. Guide "a"
    // is listed on two pages.
    mount_listing(
        &server,
        "0",
        r#"<html><body>
            <a href="/guide/a">Guide A</a>
            <a href="/guide/a/tutorial/teaser">Teaser</a>
            <a rel="next" href="/search?f[0]=type:guide&page=1">Next</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_listing(
        &server,
        "1",
        r#"<html><body>
            <a href="/guide/b">Guide B</a>
            <a href="/guide/a">Guide A</a>
            <ul><li class="pager__item--next"><a href="/search?f[0]=type:guide&page=2">Next</a></li></ul>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_listing(
        &server,
        "2",
        r#"<html><body><a href="/guide/c">Guide C</a></body></html>"#.to_string(),
    )
    .await;

    mount_page(
        &server,
        "/guide/a",
        r#"<html><body>
            <a href="/tutorial/shared">Shared Tutorial</a>
            <a href="/tutorial/a-only">A Only</a>
            <a href="/tutorial/a-only">A Only (repeat)</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &server,
        "/guide/b",
        r#"<html><body>
            <a href="/tutorial/shared">Shared Tutorial</a>
            <a href="/tutorial/b-only">B Only</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &server,
        "/guide/c",
        r#"<html><body>no tutorials here</body></html>"#.to_string(),
    )
    .await;

    let dir = tempdir().expect("create temp dir");
    let sink = FsSink::new(dir.path()).expect("create sink");
    let config = create_test_config(&base, 50);
    let fetcher = HttpFetcher::new("tsumugi-test/1.0").expect("build fetcher");

    let report = run_discovery(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("discovery should succeed");

    assert_eq!(report.guides, 3);
    assert_eq!(report.tutorials, 3);
    assert_eq!(report.errors, 0);

    let catalog: Catalog =
        serde_json::from_slice(&sink.read(CATALOG_FILE).expect("catalog written"))
            .expect("catalog parses");

    // Guides from all three pages, "a" deduplicated, teaser link skipped.
    let guide_urls: Vec<String> = catalog.guides.iter().map(|g| g.url.clone()).collect();
    assert_eq!(
        guide_urls,
        vec![
            format!("{base}/guide/a"),
            format!("{base}/guide/b"),
            format!("{base}/guide/c"),
        ]
    );

    // No two flat entries share a url; the shared tutorial is attributed
    // to its first-seen guide.
    let mut urls: Vec<&str> = catalog.tutorials.iter().map(|t| t.url.as_str()).collect();
    let total = urls.len();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), total);

    let shared = catalog
        .tutorials
        .iter()
        .find(|t| t.url.ends_with("/tutorial/shared"))
        .expect("shared tutorial in flat index");
    assert_eq!(shared.guide, "Guide A");

    // Guide B still lists the shared tutorial in its own list.
    let guide_b = &catalog.guides[1];
    assert!(guide_b
        .tutorials
        .iter()
        .any(|t| t.url.ends_with("/tutorial/shared")));

    // Per-guide lists carry no duplicates either.
    for guide in &catalog.guides {
        let mut seen: Vec<&str> = guide.tutorials.iter().map(|t| t.url.as_str()).collect();
        let len = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), len, "duplicate tutorial in {}", guide.url);
    }
}

#[tokio::test]
async fn test_listing_failure_terminates_pagination() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_listing(
        &server,
        "0",
        r#"<html><body>
            <a href="/guide/a">Guide A</a>
            <a rel="next" href="/search?f[0]=type:guide&page=1">Next</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    // Page 1 is not mounted: wiremock answers 404, which must stop
    // pagination and be recorded, not crash the run.
    mount_page(
        &server,
        "/guide/a",
        r#"<html><body><a href="/tutorial/t">T</a></body></html>"#.to_string(),
    )
    .await;

    let dir = tempdir().expect("create temp dir");
    let sink = FsSink::new(dir.path()).expect("create sink");
    let config = create_test_config(&base, 50);
    let fetcher = HttpFetcher::new("tsumugi-test/1.0").expect("build fetcher");

    let report = run_discovery(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("discovery should still succeed");

    assert_eq!(report.guides, 1);
    assert_eq!(report.tutorials, 1);
    assert_eq!(report.errors, 1);
}

#[tokio::test]
async fn test_full_extraction_with_one_failure() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_listing(
        &server,
        "0",
        r#"<html><body><a href="/guide/g">Guide G</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &server,
        "/guide/g",
        r#"<html><body>
            <a href="/tutorial/first">First</a>
            <a href="/tutorial/second">Second</a>
            <a href="/tutorial/third">Third</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        &server,
        "/tutorial/first",
        r#"<html><body>
            <div class="tutorial-content">
                <p>First body</p>
                <img src="/files/one.png">
                <img src="data:image/png;base64,AAAA">
            </div>
            <div data-vimeo-id="777"></div>
            <div class="field--name-field-topics"><a>Theming</a></div>
            <div class="field--name-field-drupal-version"><a>10</a></div>
        </body></html>"#
            .to_string(),
    )
    .await;
    // /tutorial/second is not mounted and answers 404.
    mount_page(
        &server,
        "/tutorial/third",
        r#"<html><body>
            <article>
                <p>Third body</p>
                <iframe src="https://player.vimeo.com/video/999"></iframe>
            </article>
        </body></html>"#
            .to_string(),
    )
    .await;

    let dir = tempdir().expect("create temp dir");
    let sink = FsSink::new(dir.path()).expect("create sink");
    let config = create_test_config(&base, 50);
    let fetcher = HttpFetcher::new("tsumugi-test/1.0").expect("build fetcher");

    run_discovery(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("discovery should succeed");

    let report = run_extraction(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("extraction should succeed");

    // 3 in, 3 out: one batch with two content records and one failure.
    assert_eq!(report.tutorials, 3);
    assert_eq!(report.failures, 1);
    assert_eq!(report.batches, 1);

    let batch: Batch =
        serde_json::from_slice(&sink.read(&batch_file_name(0)).expect("batch written"))
            .expect("batch parses");
    assert_eq!(batch.batch, 0);
    assert_eq!(batch.tutorials.len(), 3);

    match &batch.tutorials[0] {
        TutorialRecord::Content(content) => {
            assert_eq!(content.title, "First");
            assert_eq!(content.guide, "Guide G");
            assert_eq!(content.body_text, "First body");
            assert_eq!(content.images, vec![format!("{base}/files/one.png")]);
            assert_eq!(
                content.videos,
                vec!["https://player.vimeo.com/video/777".to_string()]
            );
            assert_eq!(content.topics, vec!["Theming".to_string()]);
            assert_eq!(content.versions, vec!["10".to_string()]);
        }
        TutorialRecord::Failure { .. } => panic!("first tutorial should extract"),
    }

    match &batch.tutorials[1] {
        TutorialRecord::Failure { url, title, error } => {
            assert!(url.ends_with("/tutorial/second"));
            assert_eq!(title, "Second");
            assert!(error.contains("404"));
        }
        TutorialRecord::Content(_) => panic!("second tutorial should fail"),
    }

    match &batch.tutorials[2] {
        TutorialRecord::Content(content) => {
            assert_eq!(content.body_text, "Third body");
            assert_eq!(
                content.videos,
                vec!["https://player.vimeo.com/video/999".to_string()]
            );
        }
        TutorialRecord::Failure { .. } => panic!("third tutorial should extract"),
    }
}

#[tokio::test]
async fn test_extraction_splits_batches() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_listing(
        &server,
        "0",
        r#"<html><body><a href="/guide/g">Guide G</a></body></html>"#.to_string(),
    )
    .await;

    let mut guide_body = String::from("<html><body>");
    for n in 0..5 {
        guide_body.push_str(&format!(r#"<a href="/tutorial/t{n}">Tutorial {n}</a>"#));
    }
    guide_body.push_str("</body></html>");
    mount_page(&server, "/guide/g", guide_body).await;

    for n in 0..5 {
        mount_page(
            &server,
            &format!("/tutorial/t{n}"),
            format!(r#"<html><body><article>body {n}</article></body></html>"#),
        )
        .await;
    }

    let dir = tempdir().expect("create temp dir");
    let sink = FsSink::new(dir.path()).expect("create sink");
    let config = create_test_config(&base, 2);
    let fetcher = HttpFetcher::new("tsumugi-test/1.0").expect("build fetcher");

    run_discovery(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("discovery should succeed");
    let report = run_extraction(&config, &fetcher, &TokioPacer, &sink)
        .await
        .expect("extraction should succeed");

    assert_eq!(report.tutorials, 5);
    assert_eq!(report.failures, 0);
    assert_eq!(report.batches, 3);

    let sizes: Vec<usize> = (0..3)
        .map(|sequence| {
            let batch: Batch =
                serde_json::from_slice(&sink.read(&batch_file_name(sequence)).expect("batch"))
                    .expect("batch parses");
            assert_eq!(batch.batch, sequence);
            batch.tutorials.len()
        })
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert!(sink.read(&batch_file_name(3)).is_err());
}
