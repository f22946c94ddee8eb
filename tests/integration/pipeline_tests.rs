//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to serve chapter pages and exercise the full
//! load / fetch / extract / resume / persist cycle end-to-end.

use chapter_links::config::Config;
use chapter_links::crawler::{
    harvest, AdmissionPolicy, ExtractionRule, HttpFetcher, LinkExtractor, Scheduler,
};
use chapter_links::index::LinkIndex;
use chapter_links::storage::DirectoryStore;
use chapter_links::{ChapterError, ChapterOutcome, ChapterProcessor};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chapter_page(images: &[&str]) -> String {
    let body: String = images
        .iter()
        .map(|src| format!("<img class=\"imgholder\" src=\"{}\" alt=\"page\">\n", src))
        .collect();
    format!("<html><body><div class=\"reader\">\n{}</div></body></html>", body)
}

async fn mount_page(server: &MockServer, route: &str, images: &[&str]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(chapter_page(images)))
        .mount(server)
        .await;
}

fn listing(server: &MockServer, chapters: &[u32]) -> LinkIndex {
    let content: String = chapters
        .iter()
        .map(|n| format!("# Chapter {}\n{}/chapter/{}\n", n, server.uri(), n))
        .collect();
    LinkIndex::parse(&content)
}

fn read_links(output_dir: &Path, chapter: u32) -> String {
    std::fs::read_to_string(output_dir.join(format!("chapter-{}", chapter)).join("base.txt"))
        .unwrap()
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.scheduler.max_parallel = 2;
    config.fetch.timeout_secs = 5;
    config
}

#[tokio::test]
async fn test_end_to_end_writes_links() {
    let server = MockServer::start().await;
    mount_page(&server, "/chapter/1", &["/i/1a.jpg", "/i/1b.jpg", "/i/1c.jpg"]).await;
    mount_page(&server, "/chapter/2", &[]).await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");
    let index = listing(&server, &[1, 2]);

    let report = harvest(&test_config(), &index, &output_dir, 1, 2)
        .await
        .unwrap();

    assert_eq!(report.statistics.processed, 2);
    assert_eq!(report.statistics.skipped, 0);
    assert_eq!(report.statistics.errored, 0);

    assert_eq!(read_links(&output_dir, 1), "/i/1a.jpg\n/i/1b.jpg\n/i/1c.jpg\n");
    assert_eq!(read_links(&output_dir, 2), "");
}

#[tokio::test]
async fn test_second_run_skips_complete_chapters() {
    let server = MockServer::start().await;
    mount_page(&server, "/chapter/1", &["/i/1a.jpg", "/i/1b.jpg", "/i/1c.jpg"]).await;
    mount_page(&server, "/chapter/2", &[]).await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");
    let index = listing(&server, &[1, 2]);

    harvest(&test_config(), &index, &output_dir, 1, 2)
        .await
        .unwrap();
    let second = harvest(&test_config(), &index, &output_dir, 1, 2)
        .await
        .unwrap();

    assert_eq!(second.statistics.processed, 0);
    assert_eq!(second.statistics.skipped, 2);
    assert_eq!(second.outcome(1), Some(&ChapterOutcome::Skipped(3)));
    assert_eq!(second.outcome(2), Some(&ChapterOutcome::Skipped(0)));
}

#[tokio::test]
async fn test_changed_page_is_rewritten() {
    let server = MockServer::start().await;
    mount_page(&server, "/chapter/1", &["/i/1a.jpg", "/i/1b.jpg"]).await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");
    std::fs::create_dir_all(output_dir.join("chapter-1")).unwrap();
    std::fs::write(output_dir.join("chapter-1").join("base.txt"), "/old.jpg\n").unwrap();

    let report = harvest(&test_config(), &listing(&server, &[1]), &output_dir, 1, 1)
        .await
        .unwrap();

    assert_eq!(report.outcome(1), Some(&ChapterOutcome::Processed(2)));
    assert_eq!(read_links(&output_dir, 1), "/i/1a.jpg\n/i/1b.jpg\n");
}

#[tokio::test]
async fn test_failing_chapter_does_not_affect_others() {
    let server = MockServer::start().await;
    mount_page(&server, "/chapter/1", &["/i/1a.jpg"]).await;
    Mock::given(method("GET"))
        .and(path("/chapter/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/chapter/3", &["/i/3a.jpg", "/i/3b.jpg"]).await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");

    let report = harvest(&test_config(), &listing(&server, &[1, 2, 3]), &output_dir, 1, 3)
        .await
        .unwrap();

    assert_eq!(report.statistics.processed, 2);
    assert_eq!(report.statistics.errored, 1);
    assert!(report.outcome(2).map(ChapterOutcome::is_failed).unwrap_or(false));
    assert!(!output_dir.join("chapter-2").join("base.txt").exists());
    assert_eq!(read_links(&output_dir, 3), "/i/3a.jpg\n/i/3b.jpg\n");
}

#[tokio::test]
async fn test_batched_admission_end_to_end() {
    let server = MockServer::start().await;
    for n in 1..=5u32 {
        mount_page(&server, &format!("/chapter/{}", n), &["/i/a.jpg", "/i/b.jpg"]).await;
    }

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");
    let mut config = test_config();
    config.scheduler.admission = AdmissionPolicy::Batched;

    let report = harvest(&config, &listing(&server, &[1, 2, 3, 4, 5]), &output_dir, 1, 5)
        .await
        .unwrap();

    assert_eq!(report.statistics.processed, 5);
    assert_eq!(report.outcomes.len(), 5);
    for n in 1..=5u32 {
        assert_eq!(read_links(&output_dir, n), "/i/a.jpg\n/i/b.jpg\n");
    }
}

#[tokio::test]
async fn test_range_limits_processed_chapters() {
    let server = MockServer::start().await;
    for n in [3, 5, 7, 9] {
        mount_page(&server, &format!("/chapter/{}", n), &["/i/x.jpg"]).await;
    }

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("manga");

    let report = harvest(
        &test_config(),
        &listing(&server, &[3, 5, 7, 9]),
        &output_dir,
        5,
        8,
    )
    .await
    .unwrap();

    assert_eq!(report.statistics.processed, 2);
    assert_eq!(report.not_found, vec![6, 8]);
    assert!(output_dir.join("chapter-5").is_dir());
    assert!(output_dir.join("chapter-7").is_dir());
    assert!(!output_dir.join("chapter-3").exists());
    assert!(!output_dir.join("chapter-9").exists());
}

#[tokio::test]
async fn test_reused_processor_serves_counts_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chapter/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chapter_page(&["/i/a.jpg"])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = DirectoryStore::new(dir.path().join("manga"), "base.txt");
    store.ensure_root().unwrap();

    let processor = ChapterProcessor::new(
        Arc::new(HttpFetcher::new(&test_config().fetch).unwrap()),
        LinkExtractor::new(&ExtractionRule::default()).unwrap(),
        Arc::new(store),
    );
    let scheduler = Scheduler::new(Arc::new(processor), 2);
    let index = listing(&server, &[1]);

    let first = scheduler.run(1, 1, &index).await;
    let second = scheduler.run(1, 1, &index).await;

    assert_eq!(first.statistics.processed, 1);
    assert_eq!(second.statistics.skipped, 1);
    // MockServer verifies the single expected request on drop
}

#[tokio::test]
async fn test_listing_load_and_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manga.txt");
    std::fs::write(
        &path,
        "Series notes\n# Chapter 1\nhttp://example.com/c1\n\n# Chapter 2\nhttp://example.com/c2\n",
    )
    .unwrap();

    let index = LinkIndex::load(&path).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(2), Some("http://example.com/c2"));

    let missing = LinkIndex::load(&dir.path().join("absent.txt"));
    assert!(matches!(missing, Err(ChapterError::MalformedInput { .. })));
}
