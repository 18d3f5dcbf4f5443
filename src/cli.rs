//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report::CsvReport;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::CrossoverParams;
use crate::domain::error::MacrossError;
use crate::domain::strategy::{self, StrategyRun};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "macross", about = "Moving-average crossover backtester")]
pub struct Cli {
    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crossover backtest for one symbol
    Backtest(BacktestArgs),
    /// Check a short/long period pair without fetching data
    Validate {
        #[arg(long, allow_negative_numbers = true)]
        short: i64,
        #[arg(long, allow_negative_numbers = true)]
        long: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct BacktestArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short = 't', long)]
    pub symbol: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub short: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub long: Option<i64>,
    #[arg(long, value_enum)]
    pub source: Option<Source>,
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,
    #[arg(long, env = "ALPHAVANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Also write the timeline as CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Csv,
    AlphaVantage,
}

impl Source {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "csv" => Some(Source::Csv),
            "alpha_vantage" | "alpha-vantage" | "alphavantage" => Some(Source::AlphaVantage),
            _ => None,
        }
    }
}

/// Fully resolved inputs for one backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub symbol: String,
    pub params: CrossoverParams,
    pub source: Source,
    pub csv_dir: PathBuf,
    pub api_key: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest(args) => run_backtest(&args),
        Command::Validate { short, long } => run_validate(short, long),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, MacrossError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| MacrossError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn run_backtest(args: &BacktestArgs) -> Result<(), MacrossError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };
    let settings = resolve_settings(args, &config)?;
    info!(
        symbol = %settings.symbol,
        short = settings.params.short_period,
        long = settings.params.long_period,
        source = ?settings.source,
        "settings resolved"
    );

    let port = build_price_port(&settings)?;

    // File reports commit before stdout, so a failed rename leaves stdout untouched.
    let csv_report = settings.output.clone().map(CsvReport::new);
    let console = ConsoleReport::new();
    let mut reports: Vec<&dyn ReportPort> = Vec::new();
    if let Some(ref r) = csv_report {
        reports.push(r);
    }
    reports.push(&console);

    run_pipeline(port.as_ref(), &settings, &reports).map(|_| ())
}

fn run_validate(short: i64, long: i64) -> Result<(), MacrossError> {
    let params = CrossoverParams::validate(short, long)?;
    println!(
        "periods are valid: short {} < long {}",
        params.short_period, params.long_period
    );
    Ok(())
}

/// Command-line values win over the config file. Periods are validated here,
/// before any data source is touched.
pub fn resolve_settings(
    args: &BacktestArgs,
    config: &dyn ConfigPort,
) -> Result<RunSettings, MacrossError> {
    let symbol = args
        .symbol
        .clone()
        .or_else(|| config.get_string("strategy", "symbol"))
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing("strategy", "symbol"))?;

    let short = args
        .short
        .or_else(|| config.get_int("strategy", "short_period"))
        .ok_or_else(|| missing("strategy", "short_period"))?;
    let long = args
        .long
        .or_else(|| config.get_int("strategy", "long_period"))
        .ok_or_else(|| missing("strategy", "long_period"))?;
    let params = CrossoverParams::validate(short, long)?;

    let source = match args.source {
        Some(s) => s,
        None => match config.get_string("data", "source") {
            Some(value) => Source::parse(&value).ok_or_else(|| {
                MacrossError::InvalidConfiguration {
                    reason: format!("unknown data source {:?}", value),
                }
            })?,
            None => Source::Csv,
        },
    };

    let csv_dir = args
        .csv_dir
        .clone()
        .or_else(|| config.get_string("data", "csv_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let api_key = args
        .api_key
        .clone()
        .or_else(|| config.get_string("data", "api_key"));

    let output = args
        .output
        .clone()
        .or_else(|| config.get_string("report", "output").map(PathBuf::from));

    Ok(RunSettings {
        symbol,
        params,
        source,
        csv_dir,
        api_key,
        output,
    })
}

fn missing(section: &str, key: &str) -> MacrossError {
    MacrossError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    }
}

pub fn build_price_port(settings: &RunSettings) -> Result<Box<dyn PricePort>, MacrossError> {
    match settings.source {
        Source::Csv => Ok(Box::new(CsvPriceAdapter::new(settings.csv_dir.clone()))),
        Source::AlphaVantage => {
            let api_key = settings
                .api_key
                .clone()
                .ok_or_else(|| missing("data", "api_key"))?;

            #[cfg(feature = "alpha-vantage")]
            {
                use crate::adapters::alpha_vantage_adapter::AlphaVantageAdapter;
                Ok(Box::new(AlphaVantageAdapter::new(api_key)))
            }

            #[cfg(not(feature = "alpha-vantage"))]
            {
                let _ = api_key;
                Err(MacrossError::InvalidConfiguration {
                    reason: "alpha-vantage feature is required for this source".into(),
                })
            }
        }
    }
}

/// Fetch, evaluate, report. Every report is staged before any is committed,
/// so a failing report leaves no partial output behind.
pub fn run_pipeline(
    port: &dyn PricePort,
    settings: &RunSettings,
    reports: &[&dyn ReportPort],
) -> Result<StrategyRun, MacrossError> {
    let prices = port.fetch_closes(&settings.symbol)?;
    if prices.is_empty() {
        return Err(MacrossError::DataUnavailable {
            symbol: settings.symbol.clone(),
            reason: "price source returned no data".into(),
        });
    }
    if prices.len() < settings.params.long_period {
        warn!(
            bars = prices.len(),
            long = settings.params.long_period,
            "fewer bars than the long period; every signal will be N/A"
        );
    }

    let run = strategy::evaluate(&settings.symbol, &prices, &settings.params)?;

    for (staged, report) in reports.iter().enumerate() {
        if let Err(e) = report.stage(&run, &settings.symbol) {
            for r in &reports[..=staged] {
                r.discard();
            }
            return Err(e);
        }
    }
    for report in reports {
        report.commit()?;
    }
    Ok(run)
}
