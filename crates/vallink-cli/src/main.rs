mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{catalog, create, play, proposals, Context};
use crate::error::{failure_for, report_error};
use vallink_config as config;
use vallink_core::DEMO_ID;
use vallink_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "vallink", version, about = "Create and play Valentine proposal links")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a proposal from flags
    Create(create::CreateArgs),
    /// Create a proposal step by step
    Wizard,
    List,
    Show(proposals::ShowArgs),
    /// Print the shareable link for a proposal
    Link(proposals::LinkArgs),
    /// Play the reveal for a proposal id or link
    Play(play::PlayArgs),
    /// List the built-in message templates
    Templates,
    Themes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.global.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            failure_for(&err).into()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    match command {
        Command::Templates => catalog::list_templates(global.json),
        Command::Themes => catalog::list_themes(global.json),
        Command::Create(args) => with_store(&global, false, |ctx| create::create(ctx, args)),
        Command::Wizard => with_store(&global, false, create::wizard),
        Command::List => with_store(&global, false, proposals::list),
        Command::Show(args) => {
            let demo = targets_demo(&args.target);
            with_store(&global, demo, |ctx| proposals::show(ctx, args))
        }
        Command::Link(args) => {
            let demo = targets_demo(&args.target);
            with_store(&global, demo, |ctx| proposals::link(ctx, args))
        }
        Command::Play(args) => {
            let demo = targets_demo(&args.target);
            with_store(&global, demo, |ctx| play::play(ctx, args))
        }
    }
}

/// The demo proposal is never stored, so commands aimed at it leave the
/// database alone.
fn targets_demo(target: &str) -> bool {
    util::parse_target(target).is_ok_and(|id| id == DEMO_ID)
}

/// Loads configuration, opens and migrates the store, then hands both to
/// the command. An ephemeral store lives in memory and touches no files.
fn with_store<F>(global: &GlobalArgs, ephemeral: bool, command: F) -> Result<()>
where
    F: FnOnce(&Context<'_>) -> Result<()>,
{
    let app_config = config::load(global.config.clone()).with_context(|| "load config")?;
    if let Ok(source) = config::ConfigSource::locate(global.config.clone()) {
        let path = source.path();
        debug!(path = %path.display(), found = path.exists(), "config path");
    }

    let store = if ephemeral {
        debug!("using in-memory store");
        Store::open_in_memory().with_context(|| "open in-memory database")?
    } else {
        let db_path = paths::resolve_db_path(global.db_path.clone())
            .with_context(|| "resolve database path")?;
        debug!(path = %db_path.display(), "database path resolved");
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?
    };
    let store = store.with_quota(app_config.storage.quota_bytes);
    store.migrate().with_context(|| "run migrations")?;

    command(&Context {
        store: &store,
        json: global.json,
        config: &app_config,
    })
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
