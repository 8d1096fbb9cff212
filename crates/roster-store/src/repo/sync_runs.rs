use crate::error::{Result, StoreError};
use roster_core::domain::{SyncMode, SyncOutcome, SyncRun, SyncRunId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::str::FromStr;

pub struct SyncRunsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SyncRunsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, run: &SyncRun) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sync_runs
             (id, mode, source, started_at, finished_at, created, updated, unchanged, skipped)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                run.id.to_string(),
                run.mode.as_str(),
                run.source,
                run.started_at,
                run.finished_at,
                run.outcome.created as i64,
                run.outcome.updated as i64,
                run.outcome.unchanged as i64,
                run.outcome.skipped as i64
            ],
        )?;
        Ok(())
    }

    pub fn latest(&self) -> Result<Option<SyncRun>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, mode, source, started_at, finished_at, created, updated, unchanged, skipped
                 FROM sync_runs
                 ORDER BY finished_at DESC, rowid DESC
                 LIMIT 1;",
                [],
                RawSyncRun::from_row,
            )
            .optional()?;
        row.map(RawSyncRun::into_run).transpose()
    }

    pub fn list(&self, limit: i64) -> Result<Vec<SyncRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, source, started_at, finished_at, created, updated, unchanged, skipped
             FROM sync_runs
             ORDER BY finished_at DESC, rowid DESC
             LIMIT ?1;",
        )?;
        let rows = stmt.query_map([limit], RawSyncRun::from_row)?;
        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?.into_run()?);
        }
        Ok(runs)
    }
}

struct RawSyncRun {
    id: String,
    mode: String,
    source: String,
    started_at: i64,
    finished_at: i64,
    counts: [i64; 4],
}

impl RawSyncRun {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mode: row.get(1)?,
            source: row.get(2)?,
            started_at: row.get(3)?,
            finished_at: row.get(4)?,
            counts: [row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?],
        })
    }

    fn into_run(self) -> Result<SyncRun> {
        let id = SyncRunId::from_str(&self.id).map_err(|_| StoreError::CorruptRunId(self.id.clone()))?;
        let mode = SyncMode::from_str(&self.mode)?;
        let [created, updated, unchanged, skipped] = self.counts.map(|count| count.max(0) as usize);
        Ok(SyncRun {
            id,
            mode,
            source: self.source,
            started_at: self.started_at,
            finished_at: self.finished_at,
            outcome: SyncOutcome {
                created,
                updated,
                unchanged,
                skipped,
            },
        })
    }
}
