mod cli;
mod config;
mod core;
mod model;
mod utils;

use anyhow::{Result, anyhow};
use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use core::RunProfile;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Check(args) => run_profile(args, RunProfile::Full),
        Commands::Health(args) => run_profile(args.run, RunProfile::HealthOnly { task: args.task }),
        Commands::Rank(args) => run_profile(args.run, RunProfile::RankingOnly { top: args.top }),
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TASKPULSE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn run_profile(args: RunArgs, profile: RunProfile) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "using config file");
    }

    let snapshot_path = match &args.snapshot {
        Some(path) => utils::fs::resolve_path(&cwd, path),
        None => cwd.join(&loaded.config.snapshot.path),
    };
    let snapshot = utils::fs::load_snapshot(&snapshot_path)?;
    let report = core::run_report(&snapshot, &loaded.config, profile)?;

    let output_json = args.json || loaded.config.general.json;
    if output_json {
        let json_report = core::report::JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}
