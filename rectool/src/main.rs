use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use log::info;
use recordtree::LinePrompter;
use rectool::{action::ActionHandler, config::ToolConfig, ctx::AppContext};

/// Define submodule schemas and add records to them.
#[derive(Debug, Parser)]
#[command(name = "rectool", version, about)]
struct Cli {
    /// Action to run (`submodule` or `add`); asked interactively when omitted.
    action: Option<String>,

    /// Workspace root holding the submodule folders.
    #[arg(short = 'C', long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file (defaults to `.rectool.toml` in the workspace).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose mode (debug logging).
    #[arg(short, long)]
    verbose: bool,

    /// Print the JSON Schema of the configuration file and exit.
    #[arg(long)]
    print_config_schema: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", format!("error: {error:#}").red());
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.print_config_schema {
        println!("{}", ToolConfig::json_schema()?);
        return Ok(());
    }

    let ctx = AppContext::init(cli.workspace, cli.config)
        .context("failed to initialize rectool context")?;

    let mut handler = ActionHandler::from_context(&ctx, LinePrompter::stdio());
    let outcome = handler.run(cli.action.as_deref())?;
    info!("session finished: {outcome:?}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
