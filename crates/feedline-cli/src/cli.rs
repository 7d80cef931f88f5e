use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "feedline",
    about = "Feedline: accounts, follows, posts and feeds in one process",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with limit overrides
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Walk through a follow, post, feed, unfollow scenario
    Demo(DemoArgs),
    /// Execute a JSON script of steps against a fresh instance
    Run(RunArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Seconds the clock moves between steps
    #[arg(long, default_value = "60")]
    pub step_seconds: i64,
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Use cheap password hashing parameters
    #[arg(long)]
    pub fast_hash: bool,
}

#[derive(Args)]
pub struct ConfigArgs {}
