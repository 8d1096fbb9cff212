use roster_store::error::StoreError;
use roster_store::repo::InstructorNew;
use roster_store::{InstructorQuery, Store};

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn add(store: &Store, first: Option<&str>, last: &str, email: &str) -> i64 {
    store
        .instructors()
        .create(InstructorNew {
            first_name: first.map(str::to_string),
            last_name: last.to_string(),
            email: email.to_string(),
        })
        .expect("create")
        .id
        .as_i64()
}

fn seed_sections(store: &Store, assignments: &[(i64, &str, i32, &str)]) {
    let conn = store.connection();
    for (index, (instructor_id, term, year, code)) in assignments.iter().enumerate() {
        let prefix = code.split(' ').next().unwrap_or_default();
        conn.execute(
            "INSERT INTO courses (code, subject_prefix) VALUES (?1, ?2);",
            rusqlite::params![code, prefix],
        )
        .expect("course");
        let course_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO sections (course_id, term, year) VALUES (?1, ?2, ?3);",
            rusqlite::params![course_id, term, year],
        )
        .expect("section");
        let section_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO instructor_assignments (instructor_id, section_id) VALUES (?1, ?2);",
            rusqlite::params![instructor_id, section_id],
        )
        .unwrap_or_else(|err| panic!("assignment {index}: {err}"));
    }
}

#[test]
fn create_normalizes_and_rejects_duplicate_email() {
    let store = store();
    add(&store, Some("  Ada "), "Lovelace", " Ada@USF.edu ");
    let ada = store
        .instructors()
        .find_by_email("ada@usf.edu")
        .expect("find")
        .expect("exists");
    assert_eq!(ada.first_name.as_deref(), Some("Ada"));
    assert_eq!(ada.email, "ada@usf.edu");

    let err = store
        .instructors()
        .create(InstructorNew {
            first_name: None,
            last_name: "Lovelace".to_string(),
            email: "ADA@usf.edu".to_string(),
        })
        .expect_err("duplicate");
    assert!(matches!(err, StoreError::DuplicateEmail(_)));
}

#[test]
fn unique_email_is_case_insensitive_in_schema() {
    let store = store();
    add(&store, None, "Prince", "prince@usf.edu");
    let inserted = store
        .instructors()
        .insert_or_ignore(&InstructorNew {
            first_name: None,
            last_name: "Other".to_string(),
            email: "PRINCE@usf.edu".to_string(),
        })
        .expect("insert");
    assert!(!inserted);

    let raw = store.connection().execute(
        "INSERT INTO instructors (last_name, email) VALUES ('X', 'Prince@USF.edu');",
        [],
    );
    assert!(raw.is_err());
}

#[test]
fn list_orders_by_display_name_then_email() {
    let store = store();
    add(&store, Some("Zed"), "Adams", "za@usf.edu");
    add(&store, None, "Prince", "prince@usf.edu");
    add(&store, Some("Ann"), "Lee", "al@usf.edu");

    let listed = store
        .instructors()
        .list(&InstructorQuery::default())
        .expect("list");
    let names: Vec<String> = listed.iter().map(|i| i.display_name()).collect();
    assert_eq!(names, vec!["Ann Lee", "Prince", "Zed Adams"]);
}

#[test]
fn list_filters_by_text() {
    let store = store();
    add(&store, Some("Ann"), "Lee", "al@usf.edu");
    add(&store, Some("Bo"), "Kim", "bkim@usf.edu");

    let query = InstructorQuery {
        text: Some("KIM".to_string()),
        ..Default::default()
    };
    let listed = store.instructors().list(&query).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "bkim@usf.edu");
}

#[test]
fn list_filters_through_section_assignments() {
    let store = store();
    let ann = add(&store, Some("Ann"), "Lee", "al@usf.edu");
    let bo = add(&store, Some("Bo"), "Kim", "bk@usf.edu");
    add(&store, Some("Cy"), "Young", "cy@usf.edu");
    seed_sections(
        &store,
        &[
            (ann, "Fall", 2025, "CHM 2045"),
            (ann, "Spring", 2026, "BSC 1010"),
            (bo, "Fall", 2025, "BSC 2093"),
        ],
    );

    let fall = InstructorQuery {
        term: Some("fall".to_string()),
        year: Some(2025),
        ..Default::default()
    };
    let emails = store.instructors().email_list(&fall).expect("emails");
    assert_eq!(emails, vec!["al@usf.edu", "bk@usf.edu"]);

    let chem_spring = InstructorQuery {
        term: Some("Spring".to_string()),
        subject: Some("CHM".to_string()),
        ..Default::default()
    };
    let listed = store.instructors().list(&chem_spring).expect("list");
    assert!(listed.is_empty());

    let bio = InstructorQuery {
        subject: Some("BSC".to_string()),
        ..Default::default()
    };
    let listed = store.instructors().list(&bio).expect("list");
    assert_eq!(listed.len(), 2);
}
