//! Client Balance Report
//!
//! Loads the client list, filters it by name, agent and balance, totals the
//! balances of the selected clients and prints a report of just the selection.

mod actions;
mod config;
mod constants;
mod export;
mod session;
mod sinks;
mod source;
mod table;

use anyhow::{Context, Result};
use balance_core::{FilterCriteria, ReportView};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};

use config::{Config, FileConfig, Overrides};
use session::{Session, split_ids};

#[derive(Parser, Debug)]
#[command(name = "balance-report")]
#[command(about = "Filter, select and print customer balances")]
struct Args {
    /// Config file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Client list URL (overrides config)
    #[arg(long, global = true)]
    source_url: Option<String>,

    /// Load clients from a local JSON file instead of the URL
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Filter: client name contains this text (case-sensitive)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Filter: agent display name (repeatable)
    #[arg(long = "agent", global = true)]
    agents: Vec<String>,

    /// Filter: balance contains this text
    #[arg(long, global = true)]
    balance: Option<String>,

    /// Select clients by id (repeatable, comma separated)
    #[arg(short, long = "select", global = true)]
    select: Vec<String>,

    /// Select every client shown by the filter
    #[arg(long, global = true)]
    select_visible: bool,

    /// Directory for printed reports (default: system temp dir)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Write the report without opening a browser
    #[arg(long, global = true)]
    no_open: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the filtered clients and the selection total (default)
    List,

    /// Show the agent directory
    Agents,

    /// Print a report of the selected clients
    Print,

    /// Export the selected clients to CSV
    Export {
        /// Output CSV path
        #[arg(default_value = constants::EXPORT_FILENAME)]
        file: PathBuf,
    },

    /// Filter, select and print from an interactive prompt
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(if args.verbose { "debug" } else { "info" })?;

    let file_config = FileConfig::load_or_default(args.config.as_deref())?;
    let config = Config::from_file(
        file_config,
        Overrides {
            source_url: args.source_url.clone(),
            input: args.input.clone(),
            output_dir: args.output_dir.clone(),
            no_open: args.no_open,
        },
    );

    let mut view = ReportView::with_criteria(criteria_from_args(&args));
    let command = args.command.unwrap_or(Command::List);

    match command {
        Command::Agents => {
            println!("{}", table::agents_table(&config.directory));
            Ok(())
        }
        Command::Interactive => {
            let input = BufReader::new(tokio::io::stdin());
            run_interactive(config, view, &args.select, args.select_visible, input).await
        }
        Command::List => {
            load_required(&mut view, &config).await?;
            apply_selection_args(&mut view, &args.select, args.select_visible);
            table::print_listing(&view, &config.currency);
            Ok(())
        }
        Command::Print => {
            load_required(&mut view, &config).await?;
            apply_selection_args(&mut view, &args.select, args.select_visible);
            println!("{}", table::selection_summary(&view, &config.currency));
            actions::print_selection(&view, &config)
        }
        Command::Export { file } => {
            load_required(&mut view, &config).await?;
            apply_selection_args(&mut view, &args.select, args.select_visible);
            println!("{}", table::selection_summary(&view, &config.currency));
            actions::export_selection(&view, &file)
        }
    }
}

/// One-shot commands cannot continue without data
async fn load_required(view: &mut ReportView, config: &Config) -> Result<()> {
    println!("Loading clients from {}...", config.source.describe());
    let count = actions::load_into(view, config)
        .await
        .context("Failed to load the client list")?;
    println!("  Loaded {} client(s)\n", count);
    Ok(())
}

/// Load once, then hand the view to the prompt. A failed load is reported
/// and left for the operator to `reload`.
async fn run_interactive<R>(
    config: Config,
    mut view: ReportView,
    select: &[String],
    select_visible: bool,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    if actions::load_or_report(&mut view, &config).await {
        apply_selection_args(&mut view, select, select_visible);
    }
    Session::new(config, view).run(input).await
}

fn criteria_from_args(args: &Args) -> FilterCriteria {
    let mut criteria = FilterCriteria::new();
    if let Some(name) = &args.name {
        criteria.name_pattern = name.clone();
    }
    criteria.agent_set = args.agents.iter().cloned().collect();
    if let Some(balance) = &args.balance {
        criteria.balance_pattern = balance.clone();
    }
    criteria
}

fn apply_selection_args(view: &mut ReportView, select: &[String], select_visible: bool) {
    let ids: Vec<String> = select.iter().flat_map(|s| split_ids(s)).collect();
    view.replace_selection(ids);
    if select_visible {
        view.select_visible();
    }
}

/// Initialize tracing subscriber for logging (stderr, so tables stay clean)
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
