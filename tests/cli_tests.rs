use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use url::Url;

const FEED_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Feed A</title>
    <link>https://a.example.com/</link>
    <description>A</description>
    <item>
      <title>Undated story</title>
      <link>https://a.example.com/undated</link>
      <description>No date on this one</description>
    </item>
    <item>
      <title>New year story</title>
      <link>https://a.example.com/new-year</link>
      <description><![CDATA[<p>Happy <b>new</b> year</p><img src="https://cdn.example.com/ny.jpg">]]></description>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

const NOT_A_FEED: &str = "<html><body>Service unavailable</body></html>";

fn feeder_cmd() -> Command {
    let mut cmd = Command::cargo_bin("feeder").unwrap();
    cmd.env("RUST_LOG", "warn")
        .env_remove("FEEDER_SOURCES")
        .env_remove("FEEDER_SOURCES_OPML")
        .env_remove("FEEDER_PARALLEL")
        .env_remove("FEEDER_CACHE_TTL_SECS");
    cmd
}

fn file_url(path: &Path) -> String {
    Url::from_file_path(path).unwrap().to_string()
}

/// Writes feed A, broken feed B and an OPML registry pointing at both
fn write_fixtures(dir: &TempDir) -> String {
    let feed_a = dir.path().join("a.xml");
    let feed_b = dir.path().join("b.xml");
    fs::write(&feed_a, FEED_A).unwrap();
    fs::write(&feed_b, NOT_A_FEED).unwrap();

    let opml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<opml version="2.0">
  <head><title>Fixtures</title></head>
  <body>
    <outline text="A" xmlUrl="{}"/>
    <outline text="B" xmlUrl="{}"/>
  </body>
</opml>"#,
        file_url(&feed_a),
        file_url(&feed_b)
    );
    let opml_path = dir.path().join("sources.opml");
    fs::write(&opml_path, opml).unwrap();

    opml_path.to_str().unwrap().to_string()
}

#[test]
fn test_help_shows_count_flag() {
    feeder_cmd()
        .arg("news")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--source"));
}

#[test]
fn test_sources_lists_builtin_feeds() {
    feeder_cmd()
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("TechCrunch"))
        .stdout(predicate::str::contains("MIT Technology Review"))
        .stdout(predicate::str::contains("https://www.wired.com/feed/rss"));
}

#[test]
fn test_export_prints_opml() {
    feeder_cmd()
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("<opml"))
        .stdout(predicate::str::contains("Ars Technica"));
}

#[test]
fn test_count_out_of_range_rejected() {
    feeder_cmd()
        .args(["news", "--count", "3"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_source_is_error() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .args(["news", "--sources-opml", &opml, "--source", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown news source: Nope"));
}

#[test]
fn test_news_json_skips_malformed_source() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    let output = feeder_cmd()
        .args(["news", "--json", "--sources-opml", &opml, "-s", "A", "-s", "B"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let articles: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let articles = articles.as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a["source"] == "A"));
    assert_eq!(articles[0]["title"], "New year story");
    assert_eq!(articles[0]["summary"], "Happy new year");
    assert_eq!(articles[0]["image_url"], "https://cdn.example.com/ny.jpg");
    assert_eq!(articles[1]["title"], "Undated story");
    assert!(articles[1]["published"].is_null());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not properly parse feed for B"));
}

#[test]
fn test_news_text_output() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .args(["news", "--sources-opml", &opml, "-s", "A", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 5 Latest Articles"))
        .stdout(predicate::str::contains("A | Mon, 01 Jan 2024"))
        .stdout(predicate::str::contains("A | N/A"));
}

#[test]
fn test_news_all_sources_failing() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .args(["news", "--sources-opml", &opml, "-s", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not fetch any articles"));
}

#[test]
fn test_news_empty_selection() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .args(["news", "--sources-opml", &opml])
        .env("FEEDER_SOURCES", ",")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please select at least one news source"));
}

#[test]
fn test_news_default_selection_from_opml() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    // Without --source the first registry entries are used
    feeder_cmd()
        .args(["news", "--sources-opml", &opml, "--parallel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New year story"))
        .stderr(predicate::str::contains("Could not properly parse feed for B"));
}

#[test]
fn test_watch_single_iteration() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .args(["watch", "--sources-opml", &opml, "-s", "A", "--iterations", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Articles are cached for 30 minutes."))
        .stdout(predicate::str::contains("Press Enter to refresh news"))
        .stdout(predicate::str::contains("New year story"))
        .stdout(predicate::str::contains("News feed refreshed!").not());
}

#[test]
fn test_watch_enter_refreshes() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    let output = feeder_cmd()
        .args(["watch", "--sources-opml", &opml, "-s", "A", "--iterations", "2", "-i", "5"])
        .env("FEEDER_CACHE_TTL_SECS", "600")
        .write_stdin("\n")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Articles are cached for 10 minutes."));
    assert!(stdout.contains("News feed refreshed!"));
    assert_eq!(stdout.matches("Top 25 Latest Articles").count(), 2);
}

#[test]
fn test_default_log_level_reports_ingestion() {
    let dir = TempDir::new().unwrap();
    let opml = write_fixtures(&dir);

    feeder_cmd()
        .env_remove("RUST_LOG")
        .args(["news", "--sources-opml", &opml, "-s", "A"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ingestion complete"));
}
