//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "hydro", version, about = "Hydroponics status CLI")]
pub struct Cli {
    /// Path to config TOML; built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Pump level as accepted on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PumpArg {
    Low,
    Medium,
    High,
}

impl From<PumpArg> for hydro_core::PumpMode {
    fn from(p: PumpArg) -> Self {
        match p {
            PumpArg::Low => Self::Low,
            PumpArg::Medium => Self::Medium,
            PumpArg::High => Self::High,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single reading against its ideal range
    Evaluate {
        /// Sensor id or name (ph, ec, tds, temperature, humidity, light, co2)
        #[arg(long)]
        sensor: String,
        /// Current reading
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },
    /// Plant health report for the current snapshot
    Dashboard {
        /// Readings CSV (headers: sensor,value); overrides [readings]
        #[arg(long, value_name = "FILE")]
        readings: Option<PathBuf>,
    },
    /// Water-system status from pump mode vs. max mode
    Pump {
        /// Current pump mode (overrides [pump].mode)
        #[arg(long, value_enum)]
        mode: Option<PumpArg>,
        /// Maximum pump mode (overrides [pump].max_mode)
        #[arg(long, value_enum)]
        max_mode: Option<PumpArg>,
        /// Days until the next cycle (overrides [pump].due_in_days)
        #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
        due_in_days: Option<u32>,
    },
    /// Summarize a chart series for one sensor
    Series {
        /// Sensor the series belongs to
        #[arg(long)]
        sensor: String,
        /// Series CSV (headers: label,value)
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
    /// Validate config and print the active ideal ranges
    SelfCheck,
}
