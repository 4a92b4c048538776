//! E2E tests for the `clientele` CLI.
//!
//! Each test runs the binary as a subprocess against a JSON data file in an
//! isolated temp directory and checks the JSON output contract: filtering,
//! sorting, pagination clamping, and the load-failure / no-match paths.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the clientele binary, rooted in `dir`.
fn clientele_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clientele"));
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr.
    cmd.env("CLIENTELE_LOG", "error");
    cmd
}

/// Write `records` to `customers.json` inside `dir`.
fn write_data(dir: &Path, records: &Value) {
    fs::write(
        dir.join("customers.json"),
        serde_json::to_string_pretty(records).expect("serialize data"),
    )
    .expect("write data file");
}

fn list_json(dir: &Path, extra_args: &[&str]) -> Value {
    let output = clientele_cmd(dir)
        .args(["list", "--data", "customers.json", "--json"])
        .args(extra_args)
        .output()
        .expect("list should not crash");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("list --json should produce valid JSON")
}

fn sample_records() -> Value {
    json!([
        {
            "Nombre completo": "Carlos Pérez",
            "Correo electrónico": "c@x.com",
            "Numero ": "600000001",
            "Grupo de clientes": "retail",
            "ZONA": "Sur",
            "Fecha de alta": "2021-03-10"
        },
        {
            "Nombre completo": "Ana García",
            "Correo electrónico": "ag@x.com",
            "Numero ": "600000002",
            "Grupo de clientes": "retail",
            "ZONA": "Norte",
            "Fecha de alta": "2022-05-05"
        },
        {
            "Nombre completo": "Bruno Díaz",
            "Correo electrónico": "dana@x.com",
            "Numero ": 600000003,
            "Grupo de clientes": "wholesale",
            "ZONA": " Norte ",
            "Fecha de alta": "2021-01-01"
        },
        {
            "Nombre completo": "Sin Zona",
            "Correo electrónico": "sz@x.com",
            "Fecha de alta": "not a date"
        }
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn list_json_reports_the_derived_view() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &sample_records());

    let report = list_json(dir.path(), &[]);
    assert_eq!(report["status"], "ready");
    assert_eq!(report["page"], 1);
    assert_eq!(report["total_pages"], 1);
    assert_eq!(report["total_matches"], 4);
    // Zone index: unspecified first, then collation order.
    assert_eq!(report["zones"], json!(["", "Norte", "Sur"]));

    // Sorted: unzoned record first, then Norte by date, then Sur.
    let names: Vec<&str> = report["customers"]
        .as_array()
        .expect("customers array")
        .iter()
        .map(|c| c["full_name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Sin Zona", "Bruno Díaz", "Ana García", "Carlos Pérez"]);

    // Normalization: trimmed zone, numeric phone as text, bad date as null.
    let bruno = &report["customers"][1];
    assert_eq!(bruno["zone"], "Norte");
    assert_eq!(bruno["phone"], "600000003");
    let unzoned = &report["customers"][0];
    assert_eq!(unzoned["signup_date"], Value::Null);
}

#[test]
fn list_zone_filter_is_exact() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &sample_records());

    let report = list_json(dir.path(), &["--zone", "Norte"]);
    assert_eq!(report["total_matches"], 2);
    for customer in report["customers"].as_array().expect("customers array") {
        assert_eq!(customer["zone"], "Norte");
    }
}

#[test]
fn list_search_matches_name_or_email_case_insensitively() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &sample_records());

    let report = list_json(dir.path(), &["--search", "ana"]);
    let names: Vec<&str> = report["customers"]
        .as_array()
        .expect("customers array")
        .iter()
        .map(|c| c["full_name"].as_str().expect("name"))
        .collect();
    // "Ana García" by name, "Bruno Díaz" by email (dana@x.com); Carlos excluded.
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Ana García"));
    assert!(names.contains(&"Bruno Díaz"));
}

#[test]
fn list_paginates_and_clamps_out_of_range_pages() {
    let dir = TempDir::new().expect("temp dir");
    let records: Vec<Value> = (0..60)
        .map(|i| {
            json!({
                "Nombre completo": format!("Customer {i:02}"),
                "Correo electrónico": format!("c{i}@x.com"),
                "ZONA": "Norte",
                "Fecha de alta": format!("2023-01-{:02}", (i % 28) + 1)
            })
        })
        .collect();
    write_data(dir.path(), &Value::Array(records));

    let report = list_json(dir.path(), &["--page", "2"]);
    assert_eq!(report["total_pages"], 3);
    assert_eq!(report["page"], 2);
    assert_eq!(
        report["customers"].as_array().expect("customers array").len(),
        25
    );

    // Page 5 of 3 clamps to the last page.
    let clamped = list_json(dir.path(), &["--page", "5"]);
    assert_eq!(clamped["page"], 3);
    assert_eq!(
        clamped["customers"].as_array().expect("customers array").len(),
        10
    );

    // All pages together cover every record exactly once.
    let mut seen = Vec::new();
    for page in ["1", "2", "3"] {
        let report = list_json(dir.path(), &["--page", page]);
        for customer in report["customers"].as_array().expect("customers array") {
            seen.push(customer["email"].as_str().expect("email").to_string());
        }
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 60);
}

#[test]
fn list_empty_data_is_no_matches_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &json!([]));

    let report = list_json(dir.path(), &[]);
    assert_eq!(report["status"], "no_matches");
    assert_eq!(report["total_pages"], 1);
    assert_eq!(report["zones"], json!([]));
    assert_eq!(report["customers"], json!([]));

    // The human rendering says so explicitly instead of showing a bare table.
    clientele_cmd(dir.path())
        .args(["list", "--data", "customers.json", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No customers match"));
}

#[test]
fn list_missing_file_fails_with_a_message() {
    let dir = TempDir::new().expect("temp dir");

    clientele_cmd(dir.path())
        .args(["list", "--data", "customers.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn list_rejects_non_array_data() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("customers.json"), r#"{"rows": []}"#).expect("write data");

    clientele_cmd(dir.path())
        .args(["list", "--data", "customers.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn zones_reports_distinct_zones_with_counts() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &sample_records());

    let output = clientele_cmd(dir.path())
        .args(["zones", "--data", "customers.json", "--json"])
        .output()
        .expect("zones should not crash");
    assert!(output.status.success());
    let report: Value =
        serde_json::from_slice(&output.stdout).expect("zones --json should produce valid JSON");

    assert_eq!(report["total_customers"], 4);
    let zones = report["zones"].as_array().expect("zones array");
    assert_eq!(zones.len(), 3);
    assert_eq!(zones[0]["zone"], "");
    assert_eq!(zones[0]["customers"], 1);
    assert_eq!(zones[1]["zone"], "Norte");
    assert_eq!(zones[1]["customers"], 2);
}

#[test]
fn config_file_sets_page_size_and_data_path() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path(), &sample_records());
    fs::write(
        dir.path().join("clientele.toml"),
        "[view]\npage_size = 2\n\n[data]\npath = \"customers.json\"\n",
    )
    .expect("write config");

    let output = clientele_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("list should not crash");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["page_size"], 2);
    assert_eq!(report["total_pages"], 2);
    assert_eq!(
        report["customers"].as_array().expect("customers array").len(),
        2
    );
}

#[test]
fn completions_emit_a_script() {
    let dir = TempDir::new().expect("temp dir");
    clientele_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clientele"));
}
