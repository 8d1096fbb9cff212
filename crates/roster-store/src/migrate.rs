use crate::error::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension, Transaction};

const DIRECTORY_SCHEMA: &str = include_str!("../migrations/001_directory.sql");

const MIGRATIONS: &[(&str, &str)] = &[
    ("001_directory.sql", DIRECTORY_SCHEMA),
    (
        "002_sync_runs.sql",
        include_str!("../migrations/002_sync_runs.sql"),
    ),
];

/// Children first so foreign keys never see a dangling parent.
const DROP_DIRECTORY: &str = "
    DROP TABLE IF EXISTS instructor_assignments;
    DROP TABLE IF EXISTS sections;
    DROP TABLE IF EXISTS courses;
    DROP TABLE IF EXISTS instructors;
";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    ensure_schema_table(&tx)?;
    let current = current_version(&tx)?;

    let supported = MIGRATIONS.len() as i64;
    if current > supported {
        return Err(StoreError::SchemaTooNew {
            found: current,
            supported,
        });
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate() {
        let version = (index + 1) as i64;
        if current >= version {
            continue;
        }
        tx.execute_batch(sql)
            .map_err(|err| StoreError::Migration {
                version,
                message: format!("{}: {}", name, err),
            })?;
        set_version(&tx, version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: Option<i64> = conn
        .query_row("SELECT version FROM roster_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.unwrap_or(0))
}

/// Drops and recreates the directory tables inside the caller's transaction.
/// `sync_runs` and the schema version are left alone.
pub(crate) fn recreate_directory(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch(DROP_DIRECTORY)?;
    tx.execute_batch(DIRECTORY_SCHEMA)?;
    Ok(())
}

fn ensure_schema_table(tx: &Transaction<'_>) -> Result<()> {
    tx.execute_batch("CREATE TABLE IF NOT EXISTS roster_schema (version INTEGER NOT NULL);")?;

    let existing: Option<i64> = tx
        .query_row("SELECT version FROM roster_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .optional()?;

    if existing.is_none() {
        tx.execute("INSERT INTO roster_schema (version) VALUES (0);", [])?;
    }

    Ok(())
}

fn current_version(tx: &Transaction<'_>) -> Result<i64> {
    let version: i64 = tx.query_row("SELECT version FROM roster_schema LIMIT 1;", [], |row| {
        row.get(0)
    })?;
    Ok(version)
}

fn set_version(tx: &Transaction<'_>, version: i64) -> Result<()> {
    let updated = tx.execute("UPDATE roster_schema SET version = ?1;", [version])?;
    if updated != 1 {
        return Err(StoreError::Migration {
            version,
            message: format!("expected single schema row, updated {}", updated),
        });
    }
    Ok(())
}
