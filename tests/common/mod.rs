//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a tiller command
pub fn tiller() -> Command {
    Command::new(cargo::cargo_bin!("tiller"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tiller()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

fn run_new(tmp: &TempDir, args: &[&str]) -> String {
    let output = tiller()
        .current_dir(tmp.path())
        .args(args)
        .args(["--format", "id"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create a customer and return its full ID
pub fn create_test_customer(tmp: &TempDir, name: &str, stage: &str) -> String {
    run_new(
        tmp,
        &["customer", "new", "--name", name, "--stage", stage],
    )
}

/// Create a customer with an expected annual revenue
pub fn create_test_customer_with_revenue(tmp: &TempDir, name: &str, revenue: f64) -> String {
    let revenue = revenue.to_string();
    run_new(
        tmp,
        &["customer", "new", "--name", name, "--revenue", &revenue],
    )
}

/// Create a partner and return its full ID
pub fn create_test_partner(tmp: &TempDir, name: &str, kind: &str) -> String {
    run_new(tmp, &["partner", "new", "--name", name, "--kind", kind])
}

/// Create a proposal and return its full ID
pub fn create_test_proposal(tmp: &TempDir, title: &str, amount: f64) -> String {
    let amount = amount.to_string();
    run_new(
        tmp,
        &["proposal", "new", "--title", title, "--amount", &amount],
    )
}

/// Create a task and return its full ID
pub fn create_test_task(tmp: &TempDir, title: &str, priority: &str) -> String {
    run_new(tmp, &["task", "new", "--title", title, "--priority", priority])
}

/// Create an employee and return its full ID
pub fn create_test_employee(tmp: &TempDir, name: &str, role: &str) -> String {
    run_new(tmp, &["employee", "new", "--name", name, "--role", role])
}

/// Stdout of a successful command as a string
pub fn stdout_of(tmp: &TempDir, args: &[&str]) -> String {
    let output = tiller().current_dir(tmp.path()).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// IDs printed by a `--format id` listing, in order
pub fn list_ids(tmp: &TempDir, args: &[&str]) -> Vec<String> {
    stdout_of(tmp, args)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
