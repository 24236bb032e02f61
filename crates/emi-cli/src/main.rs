mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::EmiArgs;
use commands::schedule::ScheduleArgs;

/// Loan EMI calculator with amortization schedules
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI calculator with amortization schedules",
    long_about = "A CLI for loan EMI (Equated Monthly Installment) calculations \
                  with decimal precision. Computes the fixed monthly installment, \
                  total interest and total payment for home, personal and car \
                  loans, and unrolls the month-by-month amortization schedule \
                  grouped by year."
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
    /// Calculate the monthly installment and payment break-up
    Emi(EmiArgs),
    /// Build the amortization schedule, year-wise or month-wise
    Schedule(ScheduleArgs),
    /// List the built-in loan type presets
    Presets,
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
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Presets => commands::loan::run_presets(),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
