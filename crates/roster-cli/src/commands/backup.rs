use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use roster_store::error::StoreError;
use roster_store::paths;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct BackupReport {
    pub output: String,
    pub size_bytes: u64,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path()?,
    };
    let report = write_snapshot(ctx, &out)?;

    if ctx.json {
        return print_json(&report);
    }

    println!("Backup written to {}", report.output);
    Ok(())
}

/// Online snapshot of the open database, shared with `sync --backup`.
pub fn write_snapshot(ctx: &Context<'_>, out: &Path) -> Result<BackupReport> {
    if let Err(err) = ctx.store.backup_to(out) {
        if matches!(err, StoreError::InvalidBackupPath(_)) {
            return Err(err)
                .with_context(|| format!("backup path matches database: {}", out.display()));
        }
        return Err(err).with_context(|| format!("backup database to {}", out.display()));
    }

    let size_bytes = fs::metadata(out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    Ok(BackupReport {
        output: out.display().to_string(),
        size_bytes,
    })
}
