//! Runs the maintenance CLI against a throwaway database file.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDb(PathBuf);

impl TempDb {
    fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        TempDb(std::env::temp_dir().join(format!(
            "pet-shelter-cli-{}-{}-{}.db",
            tag,
            std::process::id(),
            nanos
        )))
    }

    fn url(&self) -> String {
        format!("sqlite://{}", self.0.display())
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn run(db: &TempDb, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pet-shelter"))
        .args(args)
        .env("DATABASE_URL", db.url())
        .env("RUST_LOG", "off")
        .output()
        .expect("run pet-shelter")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_insert_list_and_delete() {
    let db = TempDb::new("crud");

    let out = run(&db, &["list"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No pets yet."));

    let out = run(&db, &["insert-dummy"]);
    assert!(out.status.success());
    let printed = stdout(&out);
    let uri = printed
        .trim()
        .strip_prefix("Inserted ")
        .expect("inserted uri")
        .to_string();
    assert!(uri.starts_with("content://com.example.android.pets/pets/"));

    let out = run(&db, &["list"]);
    assert!(out.status.success());
    let rows: Vec<serde_json::Value> = stdout(&out)
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["weight"], serde_json::json!(11));

    let out = run(&db, &["delete", &uri]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), format!("Deleted {}", uri));

    // Deleting again finds nothing.
    let out = run(&db, &["delete", &uri]);
    assert!(!out.status.success());

    let out = run(&db, &["delete", "content://com.example.android.pets/pets"]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_delete_all_requires_yes() {
    let db = TempDb::new("delete-all");
    for _ in 0..2 {
        assert!(run(&db, &["insert-dummy"]).status.success());
    }

    let out = run(&db, &["delete-all"]);
    assert!(!out.status.success());

    let out = run(&db, &["delete-all", "--yes"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "Deleted 2 pet(s)");
}

#[test]
fn test_cli_usage_errors() {
    let db = TempDb::new("usage");
    assert_eq!(run(&db, &[]).status.code(), Some(2));
    assert_eq!(run(&db, &["frobnicate"]).status.code(), Some(2));
    assert_eq!(run(&db, &["delete"]).status.code(), Some(2));
}
