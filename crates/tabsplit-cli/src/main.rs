//! # tabsplit
//!
//! Reads a group expense document, computes every participant's balance and
//! prints who pays whom.
//!
//! ```text
//! tabsplit trip.toml
//! tabsplit trip.json --format json --rounding half-even
//! RUST_LOG=tabsplit=debug tabsplit trip.toml
//! ```

mod config;
mod logging;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tabsplit_accounting::GroupAccounting;
use tabsplit_ingress::{DocumentFormat, load_document, validate};
use tabsplit_settlement::SettlementEngine;
use tabsplit_types::{RoundingMode, constants};

use crate::config::Overrides;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Toml,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => Self::Json,
            InputFormat::Toml => Self::Toml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rounding {
    HalfUp,
    HalfEven,
}

impl From<Rounding> for RoundingMode {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::HalfUp => Self::HalfUp,
            Rounding::HalfEven => Self::HalfEven,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tabsplit", version)]
#[command(about = "Split group expenses and work out who pays whom")]
struct Cli {
    /// Expense document (`.json` or `.toml`).
    input: PathBuf,

    /// Document format; inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Engine configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Decimal places each share is rounded to.
    #[arg(long)]
    share_precision: Option<u32>,

    /// Decimal places amounts are shown with.
    #[arg(long)]
    display_precision: Option<u32>,

    /// Midpoint rounding mode.
    #[arg(long, value_enum)]
    rounding: Option<Rounding>,

    /// Abort settlement after this many payment steps.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Skip the credit/debt conservation check before settlement.
    #[arg(long)]
    no_conservation_check: bool,

    /// Exit with an error if rounding leaves any balance unsettled.
    #[arg(long)]
    strict: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,

    /// More logging (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            share_precision: self.share_precision,
            display_precision: self.display_precision,
            rounding: self.rounding.map(Into::into),
            max_settlement_steps: self.max_steps,
            skip_conservation_check: self.no_conservation_check,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        input = %cli.input.display(),
        "Starting"
    );

    let config = config::resolve(cli.config.as_deref(), &cli.overrides())?;

    let document = load_document(&cli.input, cli.input_format.map(Into::into))
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    let roster = validate(&document).context("invalid expense document")?;

    let snapshot = GroupAccounting::new(&config)
        .run(roster.people.clone(), &roster.expenses)
        .context("accounting failed")?;
    let plan = SettlementEngine::new(&config)
        .settle(&snapshot)
        .context("settlement failed")?;

    let report = Report::new(&roster, &snapshot, &plan, &config);
    match cli.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if cli.strict && !plan.is_complete() {
        bail!(
            "{} balance(s) left unsettled by rounding drift",
            plan.residuals.len()
        );
    }
    Ok(())
}
