use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use vallink_config::AppConfig;
use vallink_store::Store;

pub mod catalog;
pub mod create;
pub mod play;
pub mod proposals;

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
