use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use matchbook_core::{BankRecord, BookRecord, reconcile_with};
use matchbook_ingest::{parse_bank_csv, parse_book_csv, sample_records};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

use config::Config;
use render::{StatusFilter, render_dashboard, render_table};

#[derive(Parser, Debug)]
#[command(
    name = "matchbook",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MATCHBOOK_BUILD_SHA"), ")"),
    about = "Match a bank statement against the book/GL ledger"
)]
struct Cli {
    /// Config file (default: ~/.matchbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile a bank statement CSV against a GL extract CSV
    Run {
        /// Bank statement CSV (account_no, transaction_date, invoice_number, total_amount, ...)
        #[arg(long)]
        bank: PathBuf,

        /// Book/GL CSV (document_no, posting_date, description, amount)
        #[arg(long)]
        book: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reconcile the built-in sample statement and GL extract
    Sample {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Table filter (default from config, else all)
    #[arg(long, value_enum)]
    filter: Option<StatusFilter>,

    /// Max table rows
    #[arg(long)]
    limit: Option<usize>,

    /// Print the full result as JSON instead of the dashboard and table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run { bank, book, output } => {
            for p in [&bank, &book] {
                if !p.exists() {
                    bail!("CSV not found: {}", p.display());
                }
            }
            let cfg = config::load_config(cli.config.as_deref())?;
            let bank_records = parse_bank_csv(&bank)?;
            let book_records = parse_book_csv(&book)?;
            info!(
                bank = bank_records.len(),
                book = book_records.len(),
                "parsed {} and {}",
                bank.display(),
                book.display()
            );
            report(&cfg, &bank_records, &book_records, &output)?;
        }

        Command::Sample { output } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let (bank_records, book_records) = sample_records().context("parsing sample data")?;
            report(&cfg, &bank_records, &book_records, &output)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(
    cfg: &Config,
    bank: &[BankRecord],
    book: &[BookRecord],
    output: &OutputArgs,
) -> Result<()> {
    let rec = reconcile_with(bank, book, &cfg.matching).context("reconciling")?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    let filter = output.filter.unwrap_or(cfg.display.filter);
    let limit = output.limit.or(cfg.display.limit);

    println!("{}", render_dashboard(&rec.summary));
    println!("## Detailed Transactions ({filter:?})\n");
    print!("{}", render_table(&rec.items, filter, limit));
    Ok(())
}
