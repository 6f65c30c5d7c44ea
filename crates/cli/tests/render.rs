use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn seed_db(root: &Path) -> std::path::PathBuf {
    let path = root.join("beerlog.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "
        CREATE TABLE brands (
          brand_id INTEGER PRIMARY KEY AUTOINCREMENT,
          brand_name VARCHAR(255) NOT NULL,
          brand_picture BLOB,
          manufacturer_id VARCHAR(255)
        );
        CREATE TABLE stores (
          store_id INTEGER PRIMARY KEY AUTOINCREMENT,
          store_name VARCHAR(255) NOT NULL,
          store_address VARCHAR(255) NOT NULL,
          store_contact VARCHAR(255),
          lat NUMERIC(10, 8),
          lng NUMERIC(11, 8),
          brand_id VARCHAR(255)
        );
        INSERT INTO brands (brand_id, brand_name) VALUES (1, 'Ale Co'), (2, 'Lager Ltd');
        ",
    )
    .unwrap();
    let stores: [(i64, &str, Option<&str>, Option<&str>, Option<&str>); 3] = [
        (10, "Taproom", Some("35.0"), Some("139.0"), Some("1")),
        (11, "Corner Bar", Some("35.1"), Some("139.1"), None),
        (12, "Unplaced", None, Some("139.2"), Some("2")),
    ];
    for (id, name, lat, lng, brand) in stores {
        conn.execute(
            "INSERT INTO stores (store_id, store_name, store_address, lat, lng, brand_id)
             VALUES (?1, ?2, 'Shibuya, Tokyo', ?3, ?4, ?5)",
            params![id, name, lat, lng, brand],
        )
        .unwrap();
    }
    path
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let temp = tempdir().unwrap();
    let db = seed_db(temp.path());
    (temp, db)
}

#[allow(deprecated)]
fn beerlog(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("beerlog").expect("binary");
    cmd.current_dir(workdir).env_remove("BEERLOG_DB");
    cmd
}

#[test]
fn render_writes_page_and_reports_summary() {
    let (temp, db) = setup();
    let out = temp.path().join("site/map.html");

    let output = beerlog(temp.path())
        .arg("render")
        .arg("--db")
        .arg(&db)
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["markers"], 2);
    assert_eq!(report["legend"][0][0], "Ale Co");
    assert_eq!(report["legend"][0][1], "#FF6B6B");
    assert_eq!(report["legend"][1][0], "Lager Ltd");
    assert_eq!(report["excluded"][0]["store_id"], 12);
    assert_eq!(report["size"]["width"], 1000);
    assert_eq!(report["fingerprint"].as_str().unwrap().len(), 64);

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>Brands</h2>"));
    assert!(html.contains("L.markerClusterGroup()"));
}

#[test]
fn render_is_deterministic() {
    let (temp, db) = setup();

    let run = || {
        let output = beerlog(temp.path())
            .args(["render", "--fragment", "--json", "--db"])
            .arg(&db)
            .output()
            .expect("command run");
        assert!(output.status.success());
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        report["fingerprint"].as_str().unwrap().to_string()
    };

    assert_eq!(run(), run());
}

#[test]
fn fragment_goes_to_stdout_without_page_chrome() {
    let (temp, db) = setup();

    beerlog(temp.path())
        .args(["--quiet", "render", "--fragment", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div class=\"beerlog-map-root\""))
        .stdout(predicate::str::contains("<!DOCTYPE html>").not());
}

#[test]
fn config_file_overrides_map_settings() {
    let (temp, db) = setup();
    fs::write(
        temp.path().join("beerlog.toml"),
        format!(
            "[database]\npath = {:?}\n\n[map]\npalette = [\"#000000\"]\nlegend_title = \"Brands\"\n",
            db.display().to_string()
        ),
    )
    .unwrap();

    let output = beerlog(temp.path())
        .args(["render", "--fragment", "--json"])
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["legend"][0][1], "#000000");
    assert_eq!(report["legend"][1][1], "#000000");
}

#[test]
fn stores_lists_unknown_brand_sentinel() {
    let (temp, db) = setup();

    beerlog(temp.path())
        .args(["stores", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("11\tCorner Bar\tunknown\t"))
        .stdout(predicate::str::contains("12\tUnplaced\tLager Ltd\t-"));
}

#[test]
fn brands_json_lists_catalogue_order() {
    let (temp, db) = setup();

    let output = beerlog(temp.path())
        .args(["brands", "--json"])
        .env("BEERLOG_DB", &db)
        .output()
        .expect("command run");
    assert!(output.status.success());

    let brands: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = brands
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ale Co", "Lager Ltd"]);
}

#[test]
fn missing_database_fails_without_output() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("map.html");

    beerlog(temp.path())
        .args(["render", "--db", "absent.db", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load stores"));

    assert!(!out.exists());
}
