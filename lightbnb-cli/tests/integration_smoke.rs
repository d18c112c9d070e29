//! Smoke tests to verify command wiring (no database needed)

use assert_cmd::Command;
use predicates::prelude::*;

fn lightbnb() -> Command {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    // Keep local .env / config files from leaking into the run
    cmd.current_dir(std::env::temp_dir());
    cmd.env_remove("RUST_LOG");
    cmd
}

// === Help Tests ===

#[test]
fn test_search_help() {
    lightbnb()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("City name fragment"));
}

#[test]
fn test_user_get_help() {
    lightbnb()
        .args(["user", "get", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email address"));
}

#[test]
fn test_property_add_help() {
    lightbnb()
        .args(["property", "add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path to the property JSON file"));
}

// === Search Dry-Run Tests ===

#[test]
fn test_search_dry_run_no_filters() {
    lightbnb()
        .args(["search", "--dry-run", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHERE").not())
        .stdout(predicate::str::contains("HAVING").not())
        .stdout(predicate::str::contains("GROUP BY properties.id"))
        .stdout(predicate::str::contains("[5]"));
}

#[test]
fn test_search_dry_run_city_and_rating() {
    lightbnb()
        .args(["search", "--dry-run", "--city", "canc", "--min-rating", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHERE city LIKE $1"))
        .stdout(predicate::str::contains(
            "HAVING avg(property_reviews.rating) >= $2",
        ))
        .stdout(predicate::str::contains("LIMIT $3"))
        .stdout(predicate::str::contains(r#"["%canc%",4.0,10]"#));
}

#[test]
fn test_search_dry_run_ignore_case() {
    lightbnb()
        .args(["search", "--dry-run", "-i", "--city", "CANC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHERE city ILIKE $1"));
}

#[test]
fn test_search_dry_run_owner() {
    lightbnb()
        .args(["search", "--dry-run", "--owner-id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WHERE owner_id = $1"))
        .stdout(predicate::str::contains("[7,10]"));
}

#[test]
fn test_search_rejects_inverted_price_range() {
    lightbnb()
        .args([
            "search",
            "--dry-run",
            "--min-price",
            "20000",
            "--max-price",
            "100",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than maximum price"));
}

#[test]
fn test_search_rejects_zero_limit() {
    lightbnb()
        .args(["search", "--dry-run", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit"));
}

// === Config Tests ===

#[test]
fn test_config_file_sets_default_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lightbnb.toml");
    std::fs::write(&path, "[search]\ndefault_limit = 3\n").unwrap();

    lightbnb()
        .arg("--config")
        .arg(&path)
        .args(["search", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[3]"));
}

#[test]
fn test_missing_config_file_fails() {
    lightbnb()
        .args(["--config", "/nonexistent/lightbnb.toml", "search", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
