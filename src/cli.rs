//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::env_config_adapter::LayeredConfigAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{build_scan_config, validate_scan_config};
use crate::domain::error::DipscanError;
use crate::domain::scan;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "dipscan", about = "Three-tier dip-buy scanner for daily OHLCV data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scan over a symbol's daily history and write the report
    Scan {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding <SYMBOL>.csv files (overrides [data] csv_path)
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Validate configuration and show resolved thresholds without scanning
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for a symbol's CSV history
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            data,
            symbol,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(config.as_ref())
            } else {
                run_scan_command(
                    config.as_ref(),
                    data.as_ref(),
                    symbol.as_deref(),
                    output.as_ref(),
                )
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            config,
            data,
            symbol,
        } => run_info(config.as_ref(), data.as_ref(), symbol.as_deref()),
    }
}

/// Layer environment overrides over the config file (or over an empty base
/// when no file is given, so env-only operation works).
pub fn load_config(
    path: Option<&PathBuf>,
) -> Result<LayeredConfigAdapter<FileConfigAdapter>, ExitCode> {
    let base = match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| {
                let err = DipscanError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                };
                eprintln!("error: {err}");
                ExitCode::from(&err)
            })?
        }
        None => match FileConfigAdapter::from_string("") {
            Ok(a) => a,
            Err(reason) => {
                let err = DipscanError::ConfigParse {
                    file: "<empty>".to_string(),
                    reason,
                };
                eprintln!("error: {err}");
                return Err(ExitCode::from(&err));
            }
        },
    };
    Ok(LayeredConfigAdapter::new(base))
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> String {
    symbol_override
        .map(str::to_uppercase)
        .or_else(|| config.get_string("data", "symbol").map(|s| s.to_uppercase()))
        .unwrap_or_else(|| "SPY".to_string())
}

pub fn resolve_data_dir(data_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    data_override
        .cloned()
        .or_else(|| config.get_string("data", "csv_path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn run_scan_command(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: load and validate configuration
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let scan_config = build_scan_config(&adapter);

    // Stage 2: resolve symbol and data location
    let symbol = resolve_symbol(symbol_override, &adapter);
    let data_dir = resolve_data_dir(data_override, &adapter);
    eprintln!("Scanning {} from {}", symbol, data_dir.display());

    // Stage 3: fetch bars
    let data_port = CsvAdapter::new(data_dir);
    let bars = match data_port.fetch_daily_bars(&symbol) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  {} bars loaded", bars.len());

    // Stage 4: run the evaluation
    let outcome = match scan::run_scan(&bars, &scan_config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: report to stdout and to the output file
    let report_port = TextReportAdapter::new();
    let report = report_port.render(&symbol, &outcome, &scan_config);
    println!("{report}");

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.md"));
    match report_port.write(
        &symbol,
        &outcome,
        &scan_config,
        &output.display().to_string(),
    ) {
        Ok(()) => {
            eprintln!("Report written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_dry_run(config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let scan_config = build_scan_config(&adapter);
    eprintln!("Config validated successfully");

    eprintln!("\nResolved thresholds:");
    eprintln!("  add_capital:           {}", scan_config.add_capital);
    eprintln!("  tier1_alloc:           {}", scan_config.tier1_alloc);
    eprintln!("  tier2_alloc:           {}", scan_config.tier2_alloc);
    eprintln!("  tier3_alloc:           {}", scan_config.tier3_alloc);
    eprintln!("  pullback_within_pct:   {}", scan_config.pullback_within_pct);
    eprintln!("  stabilize_days:        {}", scan_config.stabilize_days);
    eprintln!("  stabilize_range_pct:   {}", scan_config.stabilize_range_pct);
    eprintln!("  sma200_slope_lookback: {}", scan_config.sma200_slope_lookback);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(Some(config_path)) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_scan_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
    symbol_override: Option<&str>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbol = resolve_symbol(symbol_override, &adapter);
    let data_dir = resolve_data_dir(data_override, &adapter);
    let data_port = CsvAdapter::new(data_dir);

    match data_port.get_data_range(&symbol) {
        Ok(Some((min_date, max_date, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", symbol);
            ExitCode::from(5)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
