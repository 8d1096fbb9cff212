use crate::db;
use crate::error::{Result, StoreError};
use crate::paths;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const PAGES_PER_STEP: i32 = 256;
const STEP_PAUSE: Duration = Duration::from_millis(10);

/// SQLite companion files that live next to the main database file.
const SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Copies the live database into `path` with SQLite's online backup API.
///
/// Used before a reload replaces the directory tables. Refuses to write over
/// the database itself, its sidecar files, or another link to the same inode.
pub fn backup_to(conn: &Connection, path: &Path) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    let target = absolute_target(path)?;
    if let Some(live) = live_database_file(conn)? {
        if collides_with_database(&target, &live)? {
            return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
        }
    }

    let mut snapshot = Connection::open(&target)?;
    {
        let backup = Backup::new(conn, &mut snapshot)?;
        backup.run_to_completion(PAGES_PER_STEP, STEP_PAUSE, None)?;
    }
    db::restrict_db_permissions(&target)?;
    Ok(())
}

/// Canonical form of `path`; the file itself may not exist yet.
fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(fs::canonicalize(dir)?.join(file_name))
}

fn live_database_file(conn: &Connection) -> Result<Option<PathBuf>> {
    match conn.path() {
        Some(file) if !file.is_empty() => Ok(Some(fs::canonicalize(file)?)),
        _ => Ok(None),
    }
}

fn collides_with_database(target: &Path, live: &Path) -> Result<bool> {
    if target == live {
        return Ok(true);
    }
    let is_sidecar = SIDECAR_SUFFIXES.iter().any(|suffix| {
        let mut sidecar = live.as_os_str().to_owned();
        sidecar.push(suffix);
        target == Path::new(&sidecar)
    });
    if is_sidecar {
        return Ok(true);
    }
    same_inode(target, live)
}

#[cfg(unix)]
fn same_inode(target: &Path, live: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() {
        return Ok(false);
    }
    let a = fs::metadata(target)?;
    let b = fs::metadata(live)?;
    Ok((a.dev(), a.ino()) == (b.dev(), b.ino()))
}

#[cfg(not(unix))]
fn same_inode(_target: &Path, _live: &Path) -> Result<bool> {
    Ok(false)
}
