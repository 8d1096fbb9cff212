use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHEET: &str = "Instructor Email Addresses";

fn roster(temp: &TempDir, db_path: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("roster");
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env_remove("RUST_LOG")
        .args(["--db-path", db_path.to_str().expect("db path")]);
    cmd
}

fn run_cmd(temp: &TempDir, db_path: &Path, args: &[&str]) -> String {
    let output = roster(temp, db_path).args(args).output().expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(temp: &TempDir, db_path: &Path, args: &[&str]) -> Value {
    let output = roster(temp, db_path)
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_workbook(dir: &Path, name: &str, rows: &[Vec<&str>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET).expect("sheet name");
    for (row, cells) in rows.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .write_string(row as u32, col as u16, *value)
                .expect("write cell");
        }
    }
    workbook.save(&path).expect("save workbook");
    path
}

fn course_sheet(dir: &Path) -> PathBuf {
    write_workbook(
        dir,
        "courses.xlsx",
        &[
            vec!["Course Information"],
            vec![
                "Instructor Name",
                "Instructor Email Addresses",
                "Notes",
                "Instructor Name",
                "Instructor Email Addresses",
            ],
            vec!["J. Smith", "JSmith@USF.edu,", "", "Ada Lovelace", "ada@usf.edu"],
            vec!["Prince", "prince@usf.edu", "", "Guest Speaker", "guest@gmail.com"],
            vec!["", "", "", "nan", "nobody@usf.edu"],
        ],
    )
}

#[test]
fn cli_sync_list_show_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");
    let workbook = course_sheet(temp.path());
    let workbook = workbook.to_str().expect("workbook path");

    let first = run_cmd_json(&temp, &db_path, &["sync", "--workbook", workbook]);
    assert_eq!(first["mode"], "upsert");
    assert_eq!(first["candidates"], 3);
    assert_eq!(first["outcome"]["created"], 3);
    assert_eq!(first["extract"]["blocks"], 2);
    assert_eq!(first["extract"]["dropped_foreign_domain"], 1);
    assert_eq!(first["extract"]["dropped_placeholder"], 1);

    let second = run_cmd_json(&temp, &db_path, &["sync", "--workbook", workbook]);
    assert_eq!(second["outcome"]["created"], 0);
    assert_eq!(second["outcome"]["updated"], 0);
    assert_eq!(second["outcome"]["unchanged"], 3);

    let list = run_cmd_json(&temp, &db_path, &["list"]);
    let items = list.as_array().expect("array");
    let names: Vec<&str> = items
        .iter()
        .map(|item| item["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Ada Lovelace", "J Smith", "Prince"]);

    let detail = run_cmd_json(&temp, &db_path, &["show", "JSMITH@usf.edu"]);
    assert_eq!(detail["first_name"], "J");
    assert_eq!(detail["last_name"], "Smith");
    assert_eq!(detail["email"], "jsmith@usf.edu");

    let emails = run_cmd(&temp, &db_path, &["emails", "--q", "usf"]);
    assert_eq!(
        emails.trim(),
        "ada@usf.edu, jsmith@usf.edu, prince@usf.edu"
    );

    let status = run_cmd_json(&temp, &db_path, &["status"]);
    assert_eq!(status["instructors"], 3);
    let runs = status["runs"].as_array().expect("runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["mode"], "upsert");
}

#[test]
fn cli_dry_run_leaves_database_empty() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");
    let workbook = course_sheet(temp.path());

    let report = run_cmd_json(
        &temp,
        &db_path,
        &[
            "sync",
            "--dry-run",
            "--workbook",
            workbook.to_str().expect("workbook path"),
        ],
    );
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["candidates"], 3);

    let list = run_cmd_json(&temp, &db_path, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
    let status = run_cmd_json(&temp, &db_path, &["status"]);
    assert!(status["runs"].as_array().expect("runs").is_empty());
}

#[test]
fn cli_reload_with_backup_replaces_directory() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");
    let full = course_sheet(temp.path());
    run_cmd(
        &temp,
        &db_path,
        &["sync", "--workbook", full.to_str().expect("workbook path")],
    );

    let smaller = write_workbook(
        temp.path(),
        "smaller.xlsx",
        &[
            vec![],
            vec!["Instructor Name", "Instructor Email Addresses"],
            vec!["Grace Hopper", "grace@usf.edu"],
        ],
    );
    let backup = temp.path().join("before-reload.sqlite3");
    let report = run_cmd_json(
        &temp,
        &db_path,
        &[
            "sync",
            "--mode",
            "reload",
            "--backup",
            backup.to_str().expect("backup path"),
            "--workbook",
            smaller.to_str().expect("workbook path"),
        ],
    );
    assert_eq!(report["mode"], "reload");
    assert_eq!(report["outcome"]["created"], 1);
    assert!(backup.exists());

    let emails = run_cmd_json(&temp, &db_path, &["emails"]);
    assert_eq!(emails["emails"], "grace@usf.edu");

    let restored = run_cmd_json(&temp, &backup, &["list"]);
    assert_eq!(restored.as_array().expect("array").len(), 3);
}

#[test]
fn cli_show_missing_instructor_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");

    let output = roster(&temp, &db_path)
        .args(["show", "ghost@usf.edu"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_sync_without_workbook_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");

    let output = roster(&temp, &db_path)
        .arg("sync")
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_missing_workbook_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");
    let missing = temp.path().join("absent.xlsx");

    let output = roster(&temp, &db_path)
        .args(["sync", "--workbook", missing.to_str().expect("path")])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reads_workbook_and_domain_from_config() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("roster.sqlite3");
    write_workbook(
        temp.path(),
        "college.xlsx",
        &[
            vec![],
            vec!["Instructor Name", "Instructor Email Addresses"],
            vec!["Ada Lovelace", "ada@example.edu"],
            vec!["J. Smith", "jsmith@usf.edu"],
        ],
    );
    let config_path = temp.path().join("roster.toml");
    std::fs::write(
        &config_path,
        "domain = \"example.edu\"\n[workbook]\npath = \"college.xlsx\"\n",
    )
    .expect("write config");
    set_owner_only(&config_path);

    let report = run_cmd_json(
        &temp,
        &db_path,
        &["--config", config_path.to_str().expect("config path"), "sync"],
    );
    assert_eq!(report["candidates"], 1);
    assert_eq!(report["outcome"]["created"], 1);

    let list = run_cmd_json(&temp, &db_path, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "ada@example.edu");
}

#[cfg(unix)]
fn set_owner_only(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).expect("chmod");
}

#[cfg(not(unix))]
fn set_owner_only(_path: &Path) {}

#[test]
fn cli_help_describes_every_subcommand() {
    let output = cargo_bin_cmd!("roster")
        .arg("--help")
        .output()
        .expect("run command");
    assert!(output.status.success());
    let help = String::from_utf8(output.stdout).expect("utf8");
    assert!(help.contains("Snapshot the database with SQLite's online backup"));
    assert!(help.contains("Summarize the directory and the last sync run"));
}
