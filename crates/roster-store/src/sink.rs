//! The two directory sinks. Each `apply` is one transaction that also
//! records the run in `sync_runs`; dropping the transaction on any error
//! rolls every write back.

use crate::error::{Result, StoreError};
use crate::migrate;
use crate::repo::{InstructorNew, InstructorsRepo, SyncRunsRepo};
use roster_core::domain::{
    fold_by_email, refine_names, CandidateRecord, SyncMode, SyncOutcome, SyncRun, SyncRunId,
};
use roster_core::InstructorSink;
use rusqlite::{Connection, Transaction};

/// Where a batch came from and when its run started.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub source: String,
    pub started_at: i64,
}

impl RunMeta {
    pub fn new(source: impl Into<String>, started_at: i64) -> Self {
        Self {
            source: source.into(),
            started_at,
        }
    }
}

/// Drops and recreates the directory, then inserts every candidate.
/// A later candidate whose email is already present is skipped.
pub struct ReloadSink<'a> {
    conn: &'a Connection,
    run: RunMeta,
    recorded: Option<SyncRun>,
}

impl<'a> ReloadSink<'a> {
    pub fn new(conn: &'a Connection, run: RunMeta) -> Self {
        Self {
            conn,
            run,
            recorded: None,
        }
    }

    pub fn recorded_run(&self) -> Option<&SyncRun> {
        self.recorded.as_ref()
    }
}

impl InstructorSink for ReloadSink<'_> {
    type Error = StoreError;

    fn mode(&self) -> SyncMode {
        SyncMode::Reload
    }

    fn apply(&mut self, records: &[CandidateRecord]) -> Result<SyncOutcome> {
        let tx = self.conn.unchecked_transaction()?;
        migrate::recreate_directory(&tx)?;

        let repo = InstructorsRepo::new(&tx);
        let mut outcome = SyncOutcome::default();
        for record in records {
            if repo.insert_or_ignore(&new_instructor(record))? {
                outcome.created += 1;
            } else {
                outcome.skipped += 1;
            }
        }

        let run = finish_run(&tx, &self.run, SyncMode::Reload, outcome)?;
        tx.commit()?;
        self.recorded = Some(run);
        Ok(outcome)
    }
}

/// Inserts unseen emails and refines names of known ones. Never deletes.
pub struct UpsertSink<'a> {
    conn: &'a Connection,
    run: RunMeta,
    recorded: Option<SyncRun>,
}

impl<'a> UpsertSink<'a> {
    pub fn new(conn: &'a Connection, run: RunMeta) -> Self {
        Self {
            conn,
            run,
            recorded: None,
        }
    }

    pub fn recorded_run(&self) -> Option<&SyncRun> {
        self.recorded.as_ref()
    }
}

impl InstructorSink for UpsertSink<'_> {
    type Error = StoreError;

    fn mode(&self) -> SyncMode {
        SyncMode::Upsert
    }

    fn apply(&mut self, records: &[CandidateRecord]) -> Result<SyncOutcome> {
        let tx = self.conn.unchecked_transaction()?;
        let repo = InstructorsRepo::new(&tx);
        let mut outcome = SyncOutcome::default();

        // One write per email per run.
        for record in fold_by_email(records) {
            match repo.find_by_email(&record.email)? {
                Some(existing) => {
                    let refinement = refine_names(&existing, &record);
                    if repo.refine(existing.id, &refinement)? {
                        outcome.updated += 1;
                    } else {
                        outcome.unchanged += 1;
                    }
                }
                None if record.last_name.is_empty() => outcome.skipped += 1,
                None => {
                    repo.create(new_instructor(&record))?;
                    outcome.created += 1;
                }
            }
        }

        let run = finish_run(&tx, &self.run, SyncMode::Upsert, outcome)?;
        tx.commit()?;
        self.recorded = Some(run);
        Ok(outcome)
    }
}

/// Either sink, picked at run time.
pub enum DirectorySink<'a> {
    Reload(ReloadSink<'a>),
    Upsert(UpsertSink<'a>),
}

impl<'a> DirectorySink<'a> {
    pub fn new(conn: &'a Connection, mode: SyncMode, run: RunMeta) -> Self {
        match mode {
            SyncMode::Reload => DirectorySink::Reload(ReloadSink::new(conn, run)),
            SyncMode::Upsert => DirectorySink::Upsert(UpsertSink::new(conn, run)),
        }
    }

    pub fn recorded_run(&self) -> Option<&SyncRun> {
        match self {
            DirectorySink::Reload(sink) => sink.recorded_run(),
            DirectorySink::Upsert(sink) => sink.recorded_run(),
        }
    }
}

impl InstructorSink for DirectorySink<'_> {
    type Error = StoreError;

    fn mode(&self) -> SyncMode {
        match self {
            DirectorySink::Reload(sink) => sink.mode(),
            DirectorySink::Upsert(sink) => sink.mode(),
        }
    }

    fn apply(&mut self, records: &[CandidateRecord]) -> Result<SyncOutcome> {
        match self {
            DirectorySink::Reload(sink) => sink.apply(records),
            DirectorySink::Upsert(sink) => sink.apply(records),
        }
    }
}

fn new_instructor(record: &CandidateRecord) -> InstructorNew {
    InstructorNew {
        first_name: record
            .first_name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        last_name: record.last_name.clone(),
        email: record.email.clone(),
    }
}

fn finish_run(
    tx: &Transaction<'_>,
    meta: &RunMeta,
    mode: SyncMode,
    outcome: SyncOutcome,
) -> Result<SyncRun> {
    let now: i64 = tx.query_row("SELECT CAST(strftime('%s','now') AS INTEGER);", [], |row| {
        row.get(0)
    })?;
    let run = SyncRun {
        id: SyncRunId::new(),
        mode,
        source: meta.source.clone(),
        started_at: meta.started_at,
        finished_at: now.max(meta.started_at),
        outcome,
    };
    SyncRunsRepo::new(tx).record(&run)?;
    Ok(run)
}
