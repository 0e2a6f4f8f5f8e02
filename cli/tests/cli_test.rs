//! End-to-end tests for the xarticle binary.

use std::path::Path;
use std::process::{Command, Output};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html><body>
  <div data-testid="twitter-article-title">Hello World</div>
  <div data-testid="User-Name"><span>Jack</span><span>@jack</span></div>
  <time datetime="2024-03-05T10:00:00.000Z">Mar 5</time>
  <div data-testid="twitterArticleRichTextView">
    <div data-contents="true">
      <div class="longform-unstyled"><span style="font-weight: bold">Bold</span> start.</div>
    </div>
  </div>
</body></html>"#;

fn xarticle(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xarticle"))
        .args(args)
        .env("XARTICLE_CONFIG", config)
        .output()
        .expect("failed to run xarticle")
}

#[test]
fn test_help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = xarticle(&["--help"], &dir.path().join("settings.json"));
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_missing_input_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = xarticle(&[], &dir.path().join("settings.json"));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: xarticle"));
}

#[test]
fn test_convert_without_images() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("article.html");
    std::fs::write(&input, ARTICLE).unwrap();
    let out = dir.path().join("out");

    let output = xarticle(
        &[
            input.to_str().unwrap(),
            out.to_str().unwrap(),
            "--image-delay-ms=-20",
        ],
        &dir.path().join("settings.json"),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Markdown written to:"));
    assert!(stdout.contains("Images downloaded: 0"));
    assert!(stdout.contains("Image delay: 0ms (+ up to 249ms jitter)"));

    let markdown = std::fs::read_to_string(out.join("article.md")).unwrap();
    assert_eq!(
        markdown,
        "# Hello World\n\n\
         - Author: Jack\n- Handle: @jack\n- Published: 2024-03-05T10:00:00.000Z\n\n\
         **Bold** start.\n"
    );
}

#[test]
fn test_convert_dated_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("article.html");
    std::fs::write(&input, ARTICLE).unwrap();
    let out = dir.path().join("out");

    let output = xarticle(
        &["convert", input.to_str().unwrap(), out.to_str().unwrap(), "--dated"],
        &dir.path().join("settings.json"),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("2024-03-05-Hello World").join("article.md").exists());
}

#[test]
fn test_structural_error_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.html");
    std::fs::write(&input, "<html><body><p>nothing</p></body></html>").unwrap();

    let output = xarticle(&[input.to_str().unwrap()], &dir.path().join("settings.json"));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not find article content"));
}

#[test]
fn test_payload_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("article.html");
    std::fs::write(&input, ARTICLE).unwrap();

    let output = xarticle(
        &["payload", input.to_str().unwrap(), "--compact"],
        &dir.path().join("settings.json"),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\"title\":\"Hello World\""));
}

#[test]
fn test_download_rejects_payload_without_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("payload.json");
    std::fs::write(&payload, r#"{"title": "x", "images": []}"#).unwrap();

    let output = xarticle(&["download", payload.to_str().unwrap()], &dir.path().join("settings.json"));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("markdown is required."));
}

#[test]
fn test_config_persists_delay() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conf").join("settings.json");

    let output = xarticle(&["config", "--image-delay-ms", "450"], &config);
    assert!(output.status.success());
    assert!(std::fs::read_to_string(&config).unwrap().contains("450"));

    let output = xarticle(&["config"], &config);
    assert!(String::from_utf8_lossy(&output.stdout).contains("450ms"));
}
