use crate::commands::{print_json, Context, DEFAULT_RUN_HISTORY};
use crate::error::invalid_input;
use crate::util::format_timestamp;
use anyhow::{Context as _, Result};
use clap::Args;
use roster_core::domain::SyncRun;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Number of recent sync runs to show
    #[arg(long, default_value_t = DEFAULT_RUN_HISTORY)]
    pub runs: i64,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    schema_version: i64,
    instructors: i64,
    runs: Vec<SyncRun>,
}

pub fn status(ctx: &Context<'_>, args: StatusArgs) -> Result<()> {
    if args.runs < 0 {
        return Err(invalid_input("--runs cannot be negative"));
    }
    let report = StatusReport {
        schema_version: ctx.store.schema_version().with_context(|| "read schema version")?,
        instructors: ctx
            .store
            .instructors()
            .count()
            .with_context(|| "count instructors")?,
        runs: ctx
            .store
            .sync_runs()
            .list(args.runs)
            .with_context(|| "list sync runs")?,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("Schema version: {}", report.schema_version);
    println!("Instructors: {}", report.instructors);
    if report.runs.is_empty() {
        println!("No sync runs recorded.");
        return Ok(());
    }
    println!("Recent sync runs:");
    for run in &report.runs {
        println!(
            "  {}  {:<6} {}  +{} ~{} ={} skipped {}",
            format_timestamp(run.finished_at),
            run.mode,
            run.source,
            run.outcome.created,
            run.outcome.updated,
            run.outcome.unchanged,
            run.outcome.skipped
        );
    }
    Ok(())
}
