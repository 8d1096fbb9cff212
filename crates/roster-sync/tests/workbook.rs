use roster_core::domain::SyncMode;
use roster_core::extract::ExtractOptions;
use roster_core::InstructorSink;
use roster_store::{RunMeta, Store};
use roster_sync::{extract_workbook, sync_workbook, SyncError, WorkbookSource};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHEET: &str = "Instructor Email Addresses";
const NAME: &str = "Instructor Name";
const EMAIL: &str = "Instructor Email Addresses";

/// Writes `rows` (sheet row index, cells) onto the instructor sheet behind
/// an unrelated first sheet.
fn write_workbook(dir: &Path, rows: &[(u32, Vec<&str>)]) -> Result<PathBuf, XlsxError> {
    let path = dir.join("courses.xlsx");
    let mut workbook = Workbook::new();
    {
        let overview = workbook.add_worksheet();
        overview.set_name("Overview")?;
        overview.write_string(1, 0, NAME)?;
        overview.write_string(1, 1, EMAIL)?;
        overview.write_string(2, 0, "Wrong Sheet")?;
        overview.write_string(2, 1, "wrong@usf.edu")?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET)?;
        for (row, cells) in rows {
            for (col, value) in cells.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(*row, col as u16, *value)?;
                }
            }
        }
    }
    workbook.save(&path)?;
    Ok(path)
}

fn standard_rows() -> Vec<(u32, Vec<&'static str>)> {
    vec![
        (0, vec!["Spanish", "", "", "Chemistry"]),
        (1, vec![NAME, EMAIL, "", NAME, EMAIL]),
        (2, vec!["J. Smith", "JSmith@USF.edu,", "", "Maria De La Cruz", "mdc@usf.edu"]),
        (3, vec!["Prince", "prince@usf.edu", "", "Out Sider", "out@gmail.com"]),
        (5, vec!["", "", "", "J. Smith", "jsmith@usf.edu"]),
    ]
}

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

#[test]
fn extract_reads_named_sheet_blocks() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_workbook(temp.path(), &standard_rows()).expect("write workbook");

    let extraction = extract_workbook(
        &WorkbookSource::new(&path, SHEET),
        &ExtractOptions::default(),
    )
    .expect("extract");

    let emails: Vec<&str> = extraction
        .records
        .iter()
        .map(|record| record.email.as_str())
        .collect();
    assert_eq!(emails, vec!["jsmith@usf.edu", "prince@usf.edu", "mdc@usf.edu"]);
    assert_eq!(extraction.report.blocks, 2);
    assert_eq!(extraction.report.dropped_foreign_domain, 1);
    assert_eq!(extraction.report.duplicates, 1);
}

#[test]
fn header_row_keeps_position_when_first_row_is_empty() {
    let temp = TempDir::new().expect("temp dir");
    let rows = vec![
        (1, vec![NAME, EMAIL]),
        (2, vec!["Ada Lovelace", "ada@usf.edu"]),
    ];
    let path = write_workbook(temp.path(), &rows).expect("write workbook");

    let extraction = extract_workbook(
        &WorkbookSource::new(&path, SHEET),
        &ExtractOptions::default(),
    )
    .expect("extract");
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].first_name.as_deref(), Some("Ada"));
}

#[test]
fn sync_upsert_twice_changes_nothing() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_workbook(temp.path(), &standard_rows()).expect("write workbook");
    let source = WorkbookSource::new(&path, SHEET);
    let options = ExtractOptions::default();
    let store = store();

    let mut sink = store.sink(SyncMode::Upsert, RunMeta::new("courses.xlsx", 1_700_000_000));
    let first = sync_workbook(&source, &options, &mut sink).expect("first sync");
    assert!(first.applied);
    assert_eq!(first.outcome.created, 3);
    let before = store.instructors().list_all().expect("list");

    let mut sink = store.sink(SyncMode::Upsert, RunMeta::new("courses.xlsx", 1_700_000_100));
    let second = sync_workbook(&source, &options, &mut sink).expect("second sync");
    assert_eq!(second.outcome.created, 0);
    assert_eq!(second.outcome.updated, 0);
    assert_eq!(second.outcome.unchanged, 3);
    assert_eq!(store.instructors().list_all().expect("list"), before);
}

#[test]
fn sheet_without_headers_leaves_store_untouched() {
    let temp = TempDir::new().expect("temp dir");
    let rows = vec![
        (1, vec!["Name", "Email"]),
        (2, vec!["Ada Lovelace", "ada@usf.edu"]),
    ];
    let path = write_workbook(temp.path(), &rows).expect("write workbook");
    let store = store();
    store
        .sink(SyncMode::Upsert, RunMeta::new("seed", 1_700_000_000))
        .apply(&[roster_core::domain::CandidateRecord {
            first_name: None,
            last_name: "Prince".to_string(),
            email: "prince@usf.edu".to_string(),
        }])
        .expect("seed");
    let runs_before = store.sync_runs().list(10).expect("runs").len();

    let mut sink = store.sink(SyncMode::Reload, RunMeta::new("courses.xlsx", 1_700_000_100));
    let report = sync_workbook(
        &WorkbookSource::new(&path, SHEET),
        &ExtractOptions::default(),
        &mut sink,
    )
    .expect("sync");

    assert!(!report.applied);
    assert_eq!(report.candidates, 0);
    assert_eq!(store.instructors().count().expect("count"), 1);
    assert_eq!(store.sync_runs().list(10).expect("runs").len(), runs_before);
}

#[test]
fn missing_sheet_is_reported() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_workbook(temp.path(), &standard_rows()).expect("write workbook");
    let err = extract_workbook(
        &WorkbookSource::new(&path, "Faculty"),
        &ExtractOptions::default(),
    )
    .expect_err("missing sheet");
    match err {
        SyncError::MissingSheet { sheet, available } => {
            assert_eq!(sheet, "Faculty");
            assert!(available.contains("Overview"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_workbook_is_reported() {
    let temp = TempDir::new().expect("temp dir");
    let err = extract_workbook(
        &WorkbookSource::new(temp.path().join("nope.xlsx"), SHEET),
        &ExtractOptions::default(),
    )
    .expect_err("missing workbook");
    assert!(matches!(err, SyncError::MissingWorkbook(_)));
}
