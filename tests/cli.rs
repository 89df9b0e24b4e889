//! End-to-end tests of the fintrack binary against a temporary data directory

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fintrack").unwrap();
    cmd.env("FINTRACK_DATA_DIR", dir.path())
        .env_remove("FINTRACK_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn seed_january(dir: &TempDir) {
    fintrack(dir)
        .args(["income", "add", "salary", "1000", "--date", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income #1: salary ₹1000.00 on 2024-01-05"));
    fintrack(dir)
        .args(["income", "add", "freelance", "200", "-d", "2024-01-20"])
        .assert()
        .success();
    fintrack(dir)
        .args(["expense", "add", "rent", "300", "-d", "2024-01-10", "-m", "January rent"])
        .assert()
        .success();
}

#[test]
fn init_writes_config_and_data_files() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("incomes.json").exists());
    assert!(dir.path().join("data").join("goals.json").exists());
}

#[test]
fn dashboard_for_a_month() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    fintrack(&dir)
        .args(["report", "dashboard", "--period", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard - 2024-01"))
        .stdout(predicate::str::contains("₹1200.00"))
        .stdout(predicate::str::contains("+₹900.00"))
        .stdout(predicate::str::contains("Largest: salary"))
        .stdout(predicate::str::contains("January rent"));
}

#[test]
fn list_is_filtered_by_period_and_user() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);
    fintrack(&dir)
        .args(["--user", "2", "expense", "add", "food", "40", "-d", "2024-01-12"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["expense", "list", "--period", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rent"))
        .stdout(predicate::str::contains("food").not());

    fintrack(&dir)
        .args(["expense", "list", "--period", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));

    fintrack(&dir)
        .args(["expense", "show", "1", "--user", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: 1"));
}

#[test]
fn update_and_delete_entries() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);

    fintrack(&dir)
        .args(["expense", "update", "1", "--amount", "325"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹325.00"));

    fintrack(&dir)
        .args(["income", "delete", "1", "2", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 of 3 incomes"));

    let audit = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    assert_eq!(audit.lines().count(), 6);
    assert!(audit.contains("amount: 300.0 -> 325.0"));
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["income", "add", "salary", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount 'lots'"));

    fintrack(&dir)
        .args(["income", "add", "salary", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    fintrack(&dir)
        .args(["goal", "add", "car", "1000", "--start", "2024-05-01", "--end", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    fintrack(&dir)
        .args(["report", "dashboard", "--period", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month: 13"));
}

#[test]
fn goals_report_and_purge() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["goal", "add", "car", "1200", "-s", "2024-01-01", "-e", "2024-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal #1"));
    fintrack(&dir)
        .args(["goal", "add", "holiday", "500", "-s", "2000-01-01", "-e", "2000-06-30"])
        .assert()
        .success();
    fintrack(&dir)
        .args([
            "goal",
            "add",
            "food",
            "400",
            "-t",
            "budget",
            "-s",
            "2024-03-01",
            "-e",
            "2024-03-31",
        ])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "goals", "--as-of", "2024-03-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goals - as of 2024-03-11"))
        .stdout(predicate::str::contains("car"))
        .stdout(predicate::str::contains("20 days remaining"));

    fintrack(&dir)
        .args(["goal", "purge", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete"))
        .stdout(predicate::str::contains("holiday"));

    fintrack(&dir)
        .args(["goal", "purge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    fintrack(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("holiday").not());
}

#[test]
fn compare_two_months() {
    let dir = TempDir::new().unwrap();
    seed_january(&dir);
    fintrack(&dir)
        .args(["income", "add", "salary", "1100", "-d", "2024-02-05"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["report", "compare", "2024-02", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comparison - 2024-02 vs 2024-01"))
        .stdout(predicate::str::contains("-8.3%"))
        .stdout(predicate::str::contains("-100.0%"));
}

#[test]
fn config_changes_currency() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["config", "--currency", "$", "--month-labels", "month_only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved."))
        .stdout(predicate::str::contains("Month labels:  month_only"));

    fintrack(&dir)
        .args(["income", "add", "salary", "10", "-d", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$10.00"));

    fintrack(&dir)
        .args(["config", "--month-labels", "weekly"])
        .assert()
        .failure();
}

#[test]
fn config_rejects_bad_log_level_and_recovers_from_one() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["config", "--log-level", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level 'bogus'"));

    std::fs::write(dir.path().join("config.json"), r#"{"log_level":"bogus"}"#).unwrap();

    fintrack(&dir)
        .args(["config", "--log-level", "DEBUG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Log level:     debug"));

    let config = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(config.contains(r#""log_level": "debug""#));
}

#[test]
fn oversized_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    fintrack(&dir)
        .args(["income", "add", "salary", "99999999999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount out of range"));

    fintrack(&dir)
        .args(["income", "add", "salary", "1.999", "-d", "2024-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹2.00"));
}
