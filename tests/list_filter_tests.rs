//! List pipeline behavior through the CLI: filters, search, sort, pagination

mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn test_stage_filter_narrows_results() {
    let tmp = setup_test_project();
    let lead = create_test_customer(&tmp, "Acme Corp", "lead");
    let active = create_test_customer(&tmp, "Globex", "active");
    let churned = create_test_customer(&tmp, "Initech", "churned");

    let ids = list_ids(&tmp, &["customer", "list", "--stage", "active", "--format", "id"]);
    assert_eq!(ids, vec![active.clone()]);

    // Composite filter: everything except churned
    let ids = list_ids(&tmp, &["customer", "list", "--stage", "current", "--format", "id"]);
    assert_eq!(ids, vec![lead, active]);
    assert!(!ids_contain(&ids, &churned));
}

fn ids_contain(ids: &[String], id: &str) -> bool {
    ids.iter().any(|i| i == id)
}

#[test]
fn test_search_is_case_insensitive() {
    let tmp = setup_test_project();
    create_test_customer(&tmp, "Acme Corp", "lead");
    let bobcat = create_test_customer(&tmp, "Bobcat Ltd", "lead");

    let ids = list_ids(&tmp, &["customer", "list", "--search", "bo", "--format", "id"]);
    assert_eq!(ids, vec![bobcat]);
}

#[test]
fn test_revenue_range_is_fail_open() {
    let tmp = setup_test_project();
    let small = create_test_customer_with_revenue(&tmp, "Smallco", 10_000.0);
    let big = create_test_customer_with_revenue(&tmp, "Bigco", 30_000.0);
    // No revenue recorded: an unfilterable field must not hide the record
    let unknown = create_test_customer(&tmp, "Mysteryco", "lead");

    let ids = list_ids(
        &tmp,
        &["customer", "list", "--min-revenue", "20000", "--format", "id"],
    );
    assert!(ids_contain(&ids, &big));
    assert!(ids_contain(&ids, &unknown));
    assert!(!ids_contain(&ids, &small));
}

#[test]
fn test_membership_filter_on_priority() {
    let tmp = setup_test_project();
    create_test_task(&tmp, "Tidy notes", "low");
    let call = create_test_task(&tmp, "Call Acme", "high");
    let escalate = create_test_task(&tmp, "Escalate outage", "critical");

    let ids = list_ids(
        &tmp,
        &["task", "list", "--priority", "urgent", "--format", "id"],
    );
    assert_eq!(ids, vec![call, escalate]);
}

#[test]
fn test_boolean_filter_on_partners() {
    let tmp = setup_test_project();
    let reseller = create_test_partner(&tmp, "Northwind", "reseller");
    create_test_partner(&tmp, "Contoso", "technology");

    let ids = list_ids(
        &tmp,
        &["partner", "list", "--kind", "reseller", "--format", "id"],
    );
    assert_eq!(ids, vec![reseller.clone()]);

    // All partners start active; the inactive side must be empty
    tiller()
        .current_dir(tmp.path())
        .args(["partner", "list", "--active", "inactive", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_filters_are_anded() {
    let tmp = setup_test_project();
    create_test_task(&tmp, "Call Acme", "high");
    let urgent_send = create_test_task(&tmp, "Send contract", "critical");

    let ids = list_ids(
        &tmp,
        &[
            "task", "list", "--priority", "urgent", "--search", "send", "--format", "id",
        ],
    );
    assert_eq!(ids, vec![urgent_send]);
}

#[test]
fn test_sort_by_name_and_reverse() {
    let tmp = setup_test_project();
    let zeta = create_test_customer(&tmp, "Zeta", "lead");
    let alpha = create_test_customer(&tmp, "alpha", "lead");
    let mid = create_test_customer(&tmp, "Midway", "lead");

    // Case-insensitive: "alpha" sorts before "Midway" and "Zeta"
    let ids = list_ids(&tmp, &["customer", "list", "--sort", "name", "--format", "id"]);
    assert_eq!(ids, vec![alpha.clone(), mid.clone(), zeta.clone()]);

    let ids = list_ids(
        &tmp,
        &["customer", "list", "--sort", "name", "-r", "--format", "id"],
    );
    assert_eq!(ids, vec![zeta, mid, alpha]);
}

#[test]
fn test_unsorted_list_preserves_creation_order() {
    let tmp = setup_test_project();
    let first = create_test_customer(&tmp, "Zeta", "lead");
    let second = create_test_customer(&tmp, "Alpha", "lead");

    let ids = list_ids(&tmp, &["customer", "list", "--format", "id"]);
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn test_amount_sort_is_numeric() {
    let tmp = setup_test_project();
    let nine = create_test_proposal(&tmp, "Nine", 9.0);
    let ninety = create_test_proposal(&tmp, "Ninety", 90.0);
    let ten = create_test_proposal(&tmp, "Ten", 10.0);

    // 9 < 10 < 90 (a lexicographic sort would give 10, 9, 90)
    let ids = list_ids(
        &tmp,
        &["proposal", "list", "--sort", "amount", "--format", "id"],
    );
    assert_eq!(ids, vec![nine, ten, ninety]);
}

#[test]
fn test_pagination_status_line() {
    let tmp = setup_test_project();
    for i in 0..5 {
        create_test_task(&tmp, &format!("task {}", i), "medium");
    }

    tiller()
        .current_dir(tmp.path())
        .args(["task", "list", "--page-size", "2", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page 3/3 · 5 record(s)"))
        .stdout(predicate::str::contains("task 4"));
}

#[test]
fn test_out_of_range_page_lands_on_page_one() {
    let tmp = setup_test_project();
    for i in 0..5 {
        create_test_task(&tmp, &format!("task {}", i), "medium");
    }

    tiller()
        .current_dir(tmp.path())
        .args(["task", "list", "--page-size", "2", "--page", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page 1/3 · 5 record(s)"))
        .stdout(predicate::str::contains("task 0"));
}

#[test]
fn test_columns_flag_changes_and_persists_visible_set() {
    let tmp = setup_test_project();
    create_test_customer_with_revenue(&tmp, "Acme Corp", 10_000.0);

    let out = stdout_of(&tmp, &["customer", "list", "--columns", "id,name"]);
    assert!(out.contains("Name"));
    assert!(!out.contains("Revenue"));

    // The choice is stored per view and applies to the next plain listing
    let out = stdout_of(&tmp, &["customer", "list"]);
    assert!(!out.contains("Revenue"));
    assert!(out.contains("Acme Corp"));
}

#[test]
fn test_recent_filter_keeps_fresh_records() {
    let tmp = setup_test_project();
    create_test_customer(&tmp, "Acme Corp", "lead");

    // Everything was just created, so --recent 1 keeps it all
    tiller()
        .current_dir(tmp.path())
        .args(["customer", "list", "--recent", "1", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}
