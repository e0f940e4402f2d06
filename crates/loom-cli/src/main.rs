use anyhow::Context;
use clap::Parser;
use loom_config::ConfigError;
use loom_core::errors::CoreError;
use loom_db::error::DatabaseError;
use loom_llm::LlmError;

mod cli;
mod commands;
mod context;
mod output;
mod pipeline;

/// Exit code for failures that carry no domain category.
const GENERIC_EXIT_CODE: i32 = 1;

/// Exit code for configuration problems.
const CONFIG_EXIT_CODE: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("loom error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = loom_config::LoomConfig::load_with_dotenv()?;
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config, flags.actor.as_deref())
        .await
        .context("failed to initialize loom application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LOOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Map the first categorized error in the chain to a process exit code.
fn exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(db) = cause.downcast_ref::<DatabaseError>() {
            return db.category().exit_code();
        }
        if let Some(llm) = cause.downcast_ref::<LlmError>() {
            return llm.category().exit_code();
        }
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return core.category().exit_code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_EXIT_CODE;
        }
    }
    GENERIC_EXIT_CODE
}
