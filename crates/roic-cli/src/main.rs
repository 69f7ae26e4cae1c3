mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use roic_core::types::ApiResponse;

use commands::industry::IndustryArgs;
use commands::roic::{AllArgs, CalcArgs};
use commands::trend::TrendArgs;
use commands::validate::ValidateArgs;

/// Return-on-invested-capital analytics
#[derive(Parser)]
#[command(
    name = "roic",
    version,
    about = "ROIC analytics with decimal precision",
    long_about = "Compute Return on Invested Capital from financial statements \
                  using the basic, detailed, asset, or IFRS16-modified method, \
                  validate filing data, and run industry and multi-year trend \
                  analytics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ROIC for one statement with a single method
    Calc(CalcArgs),
    /// Compute ROIC with all four methods plus auxiliary metrics
    All(AllArgs),
    /// Validate company and statement data
    Validate(ValidateArgs),
    /// Industry universe statistics, percentile rank, sector adjustment
    Industry(IndustryArgs),
    /// Year-over-year ROIC trend analysis
    Trend(TrendArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calc(args) => commands::roic::run_calc(args),
        Commands::All(args) => commands::roic::run_all(args),
        Commands::Validate(args) => commands::validate::run_validate(args),
        Commands::Industry(args) => commands::industry::run_industry(args),
        Commands::Trend(args) => commands::trend::run_trend(args),
        Commands::Version => {
            println!("roic {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            let envelope = serde_json::to_value(ApiResponse::success(value))
                .unwrap_or_else(|e| serde_json::json!({"status": "error", "message": e.to_string()}));
            output::format_output(&cli.output, &envelope);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
