use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use eyre::WrapErr;
use hydro_core::HydroError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

mod cli;
mod error_fmt;
mod report;

use cli::{Cli, Commands, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use report::Context;

/// Console layer on stderr plus an optional JSON file layer.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// until the command finishes.
fn init_tracing(
    cli: &Cli,
    logging: &hydro_config::Logging,
) -> eyre::Result<Option<WorkerGuard>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let console: Box<dyn Layer<Registry> + Send + Sync> = if cli.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };
    let mut layers = vec![console];
    let mut file_guard = None;

    if let Some(file) = logging.file.as_deref() {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("logging.file must name a file, got {file:?}"))?;
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        let file_filter = EnvFilter::new(logging.level.as_deref().unwrap_or("info"));
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(file_guard)
}

fn load_config(cli: &Cli) -> eyre::Result<hydro_config::Config> {
    let cfg = match &cli.config {
        Some(path) => hydro_config::load_file(path)?,
        None => hydro_config::Config::default(),
    };
    cfg.validate()
        .map_err(|e| HydroError::Configuration(e.to_string()))?;
    Ok(cfg)
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(&cli)?;
    let _log_guard = init_tracing(&cli, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    let ctx = Context::new(cfg, cli.json)?;
    let out = match &cli.cmd {
        Commands::Evaluate { sensor, value } => report::run_evaluate(&ctx, sensor, *value)?,
        Commands::Dashboard { readings } => report::run_dashboard(&ctx, readings.as_deref())?,
        Commands::Pump {
            mode,
            max_mode,
            due_in_days,
        } => report::run_pump(
            &ctx,
            mode.map(Into::into),
            max_mode.map(Into::into),
            *due_in_days,
        )?,
        Commands::Series { sensor, csv } => report::run_series(&ctx, sensor, csv)?,
        Commands::SelfCheck => report::run_self_check(&ctx)?,
    };
    println!("{out}");
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error report handler: {e}");
    }
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", format_error_json(&e));
            } else {
                eprintln!("{}", humanize(&e));
            }
            ExitCode::from(u8::try_from(exit_code_for_error(&e)).unwrap_or(1))
        }
    }
}
