use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use feedline_crypto::Argon2Hasher;
use feedline_sdk::{Components, Feedline, FeedlineConfig, ManualClock, SystemClock};

use crate::cli::*;
use crate::script::{demo_steps, parse_script, Outcome, Runner, Step};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Demo(args) => cmd_demo(config, args, cli.format),
        Command::Run(args) => cmd_run(config, args, cli.format),
        Command::Config(_) => cmd_config(&config),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<FeedlineConfig> {
    match &cli.config {
        Some(path) => FeedlineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(FeedlineConfig::default()),
    }
}

fn cmd_demo(config: FeedlineConfig, args: DemoArgs, format: OutputFormat) -> anyhow::Result<()> {
    let clock = Arc::new(ManualClock::starting_at_epoch_2024());
    let components = Components::in_memory(Arc::new(Argon2Hasher::lightweight()), clock.clone());
    let mut runner = Runner::new(Feedline::with_components(config, components))
        .with_ticker(clock, chrono::Duration::seconds(args.step_seconds));

    if format == OutputFormat::Text {
        println!("{} in-memory demo", "Feedline".bold());
    }
    run_steps(&mut runner, &demo_steps(), format)
}

fn cmd_run(config: FeedlineConfig, args: RunArgs, format: OutputFormat) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps = parse_script(&raw)
        .with_context(|| format!("parsing script {}", args.script.display()))?;

    let hasher = if args.fast_hash {
        Argon2Hasher::lightweight()
    } else {
        Argon2Hasher::new()
    };
    let components = Components::in_memory(Arc::new(hasher), Arc::new(SystemClock::new()));
    let mut runner = Runner::new(Feedline::with_components(config, components));

    tracing::debug!(steps = steps.len(), script = %args.script.display(), "running script");
    run_steps(&mut runner, &steps, format)
}

fn run_steps(runner: &mut Runner, steps: &[Step], format: OutputFormat) -> anyhow::Result<()> {
    let mut failures = 0usize;
    for (i, step) in steps.iter().enumerate() {
        let outcome = runner.execute(step);
        if !outcome.is_success() {
            failures += 1;
        }
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&outcome)?),
            OutputFormat::Text => print_outcome(i + 1, &outcome)?,
        }
    }
    if format == OutputFormat::Text {
        let summary = format!("{} steps, {} failed", steps.len(), failures);
        if failures == 0 {
            println!("{} {}", "✓".green().bold(), summary);
        } else {
            println!("{} {}", "!".yellow().bold(), summary);
        }
    }
    Ok(())
}

fn print_outcome(index: usize, outcome: &Outcome) -> anyhow::Result<()> {
    let status = outcome.status.to_string();
    let status = match outcome.status {
        200..=299 => status.green(),
        500..=u16::MAX => status.red(),
        _ => status.yellow(),
    };
    println!("[{}] {} {}", index, outcome.op.bold(), status);
    println!("    {}", serde_json::to_string(&outcome.body)?.dimmed());
    Ok(())
}

fn cmd_config(config: &FeedlineConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
