pub mod backup;
pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod query;
pub mod repo;
pub mod sink;

use crate::error::Result;
use roster_core::domain::SyncMode;
use rusqlite::Connection;
use std::path::Path;

pub use query::InstructorQuery;
pub use sink::{DirectorySink, ReloadSink, RunMeta, UpsertSink};

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn backup_to(&self, path: &Path) -> Result<()> {
        backup::backup_to(&self.conn, path)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn instructors(&self) -> repo::InstructorsRepo<'_> {
        repo::InstructorsRepo::new(&self.conn)
    }

    pub fn sync_runs(&self) -> repo::SyncRunsRepo<'_> {
        repo::SyncRunsRepo::new(&self.conn)
    }

    pub fn sink(&self, mode: SyncMode, run: RunMeta) -> DirectorySink<'_> {
        DirectorySink::new(&self.conn, mode, run)
    }
}
