use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "taskpulse",
    version,
    about = "Task health and team leaderboard scoring for project-tracking snapshots"
)]
pub struct Cli {
    /// Log debug output to stderr (overridden by TASKPULSE_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Task health, project summaries and leaderboard, gated by config thresholds
    Check(RunArgs),
    /// Task health only
    Health(HealthArgs),
    /// Team leaderboard only
    Rank(RankArgs),
    /// Write a default taskpulse.toml
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Snapshot JSON file; defaults to [snapshot].path from config
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Config file; defaults to ./taskpulse.toml when present
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct HealthArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Only report this task id
    #[arg(long)]
    pub task: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Show only the first N entries (0 shows everyone)
    #[arg(long)]
    pub top: Option<usize>,
}
