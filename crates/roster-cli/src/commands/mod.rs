use anyhow::Result;
use roster_config::AppConfig;
use roster_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod backup;
pub mod directory;
pub mod status;
pub mod sync;

pub const DEFAULT_RUN_HISTORY: i64 = 5;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
