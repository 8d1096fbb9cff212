use crate::commands::backup::write_snapshot;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::now_utc;
use anyhow::{Context as _, Result};
use clap::Args;
use roster_core::domain::{SyncMode, SyncOutcome};
use roster_core::dto::SyncReportDto;
use roster_core::extract::{ExtractOptions, ExtractReport};
use roster_store::RunMeta;
use roster_sync::{extract_workbook, sync_workbook, WorkbookSource};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Workbook to read; falls back to `workbook.path` in the config file
    #[arg(long)]
    pub workbook: Option<PathBuf>,
    #[arg(long)]
    pub sheet: Option<String>,
    /// Email domain instructors must belong to
    #[arg(long)]
    pub domain: Option<String>,
    /// `upsert` merges by email, `reload` rebuilds the directory tables
    #[arg(long, default_value = "upsert")]
    pub mode: SyncMode,
    /// Extract and report without touching the database
    #[arg(long)]
    pub dry_run: bool,
    /// Snapshot the database here before writing
    #[arg(long)]
    pub backup: Option<PathBuf>,
}

pub fn sync(ctx: &Context<'_>, args: SyncArgs) -> Result<()> {
    let source = resolve_source(ctx, &args)?;
    let options = resolve_options(ctx, args.domain.as_deref())?;
    let source_label = source.path().display().to_string();

    if args.dry_run {
        let extraction = extract_workbook(&source, &options)
            .with_context(|| format!("read workbook {}", source_label))?;
        debug!(
            blocks = extraction.report.blocks,
            candidates = extraction.records.len(),
            "dry run extraction"
        );
        let report = SyncReportDto {
            mode: args.mode,
            source: source_label,
            dry_run: true,
            candidates: extraction.records.len(),
            extract: extraction.report,
            outcome: SyncOutcome::default(),
        };
        return emit(ctx, &report);
    }

    if let Some(out) = args.backup.as_deref() {
        let snapshot = write_snapshot(ctx, out)?;
        debug!(path = %snapshot.output, bytes = snapshot.size_bytes, "pre-sync backup");
    }

    let run = RunMeta::new(source_label.clone(), now_utc());
    let mut sink = ctx.store.sink(args.mode, run);
    let report = sync_workbook(&source, &options, &mut sink)
        .with_context(|| format!("sync {} from {}", args.mode, source_label))?;

    if !report.applied {
        warn!(
            sheet = %source.sheet,
            "no instructor header pair found; database left untouched"
        );
    } else if !report.outcome.changed() {
        debug!("directory already up to date");
    }
    debug!(
        created = report.outcome.created,
        updated = report.outcome.updated,
        unchanged = report.outcome.unchanged,
        skipped = report.outcome.skipped,
        "sync finished"
    );

    let dto = SyncReportDto {
        mode: args.mode,
        source: source_label,
        dry_run: false,
        candidates: report.candidates,
        extract: report.extract,
        outcome: report.outcome,
    };
    emit(ctx, &dto)
}

fn resolve_source(ctx: &Context<'_>, args: &SyncArgs) -> Result<WorkbookSource> {
    let path = args
        .workbook
        .clone()
        .or_else(|| ctx.config.workbook.path.clone())
        .ok_or_else(|| invalid_input("no workbook given; pass --workbook or set workbook.path"))?;
    let sheet = match args.sheet.as_deref().map(str::trim) {
        Some("") => return Err(invalid_input("sheet name cannot be empty")),
        Some(sheet) => sheet.to_string(),
        None => ctx.config.workbook.sheet.clone(),
    };
    Ok(WorkbookSource::new(path, sheet))
}

fn resolve_options(ctx: &Context<'_>, domain: Option<&str>) -> Result<ExtractOptions> {
    let options = ctx
        .config
        .extract_options()
        .with_context(|| "resolve extraction options")?;
    match domain {
        Some(domain) => ExtractOptions::new(options.layout, domain)
            .map_err(|err| invalid_input(err.to_string())),
        None => Ok(options),
    }
}

fn emit(ctx: &Context<'_>, report: &SyncReportDto) -> Result<()> {
    if ctx.json {
        return print_json(report);
    }

    let outcome = &report.outcome;
    if report.dry_run {
        println!(
            "Dry run ({}): {} candidate(s) from {}",
            report.mode, report.candidates, report.source
        );
    } else {
        println!(
            "Synced {} ({}): created {}, updated {}, unchanged {}, skipped {}",
            report.source,
            report.mode,
            outcome.created,
            outcome.updated,
            outcome.unchanged,
            outcome.skipped
        );
    }
    print_extract_summary(&report.extract);
    Ok(())
}

fn print_extract_summary(extract: &ExtractReport) {
    println!(
        "Blocks: {}, rows scanned: {}",
        extract.blocks, extract.rows_scanned
    );
    let dropped = extract.dropped_empty
        + extract.dropped_foreign_domain
        + extract.dropped_placeholder
        + extract.duplicates;
    if dropped > 0 {
        println!(
            "Dropped: {} empty, {} foreign domain, {} missing name, {} duplicate",
            extract.dropped_empty,
            extract.dropped_foreign_domain,
            extract.dropped_placeholder,
            extract.duplicates
        );
    }
}
