//! Command execution: config mapping, snapshot assembly, rendering.
//!
//! Every command returns the text to print on stdout; JSON mode returns a
//! single JSON object.

use std::fmt::Write as _;
use std::path::Path;

use eyre::WrapErr;
use hydro_config::Config;
use hydro_core::error::Result as CoreResult;
use hydro_core::health::range_text;
use hydro_core::mocks::FixedReadings;
use hydro_core::{
    DisplayContext, Evaluator, HealthReport, HydroError, IdealRange, Measurement, MeasurementKey,
    Palette, PumpMode, PumpState, SeriesPoint, SeriesSummary, Snapshot, resolve_status_with,
};
use serde_json::json;

/// Evaluated config shared by all commands.
pub struct Context {
    pub cfg: Config,
    pub evaluator: Evaluator,
    pub display: DisplayContext,
    pub json: bool,
}

impl Context {
    pub fn new(cfg: Config, json: bool) -> CoreResult<Self> {
        let evaluator = Evaluator::from_config(&cfg).wrap_err("build evaluator from config")?;
        let display = DisplayContext::from(&cfg.display);
        Ok(Self {
            cfg,
            evaluator,
            display,
            json,
        })
    }
}

fn range_json(r: &IdealRange) -> serde_json::Value {
    json!({ "sensor": r.key().as_str(), "min": r.min(), "max": r.max(), "unit": r.key().unit() })
}

pub fn run_evaluate(ctx: &Context, sensor: &str, value: f64) -> CoreResult<String> {
    let key: MeasurementKey = sensor.parse()?;
    let m = Measurement::new(key, value);
    let range = *ctx.evaluator.ranges().lookup(key)?;
    let status = ctx.evaluator.evaluate(&m)?;
    tracing::info!(
        sensor = key.as_str(),
        value,
        severity = status.severity.as_str(),
        "evaluate"
    );
    if ctx.json {
        return Ok(json!({
            "sensor": key.as_str(),
            "value": value,
            "unit": m.unit,
            "severity": status.severity.as_str(),
            "label": status.label,
            "ideal": range_json(&range),
        })
        .to_string());
    }
    Ok(format!(
        "{key} {value}: {} ({}) [ideal {}]",
        status.severity,
        status.label,
        range_text(&range)
    ))
}

/// Demo values, then `[readings]`, then the readings CSV; later sources win.
fn assemble_snapshot(ctx: &Context, readings_csv: Option<&Path>) -> CoreResult<Snapshot> {
    let mut source = FixedReadings::new();
    for (id, v) in &ctx.cfg.readings {
        source = source.with(id.parse()?, *v);
    }
    if let Some(path) = readings_csv {
        let rows = hydro_config::load_readings_csv(path)?;
        tracing::debug!(rows = rows.len(), path = %path.display(), "readings CSV loaded");
        for row in rows {
            source = source.with(row.sensor.parse()?, row.value);
        }
    }
    Snapshot::collect(&mut source, &MeasurementKey::ALL)
}

fn pump_state(ctx: &Context) -> PumpState {
    PumpState::from(&ctx.cfg.pump)
}

pub fn run_dashboard(ctx: &Context, readings_csv: Option<&Path>) -> CoreResult<String> {
    let snapshot = assemble_snapshot(ctx, readings_csv)?;
    let report = HealthReport::build(&ctx.evaluator, &ctx.cfg.plant.name, &snapshot)?;
    let pump = pump_state(ctx);
    let pump_status = resolve_status_with(pump, ctx.cfg.pump.due_in_days);
    let palette = Palette::for_context(&ctx.display);

    if ctx.json {
        let entries: Vec<_> = report
            .entries
            .iter()
            .map(|e| {
                json!({
                    "sensor": e.measurement.key.as_str(),
                    "value": e.measurement.value,
                    "unit": e.measurement.unit,
                    "severity": e.status.severity.as_str(),
                    "label": e.status.label,
                    "color": palette.severity_color(e.status.severity),
                    "ideal": range_json(&e.range),
                    "line": hydro_core::health::health_line(e),
                })
            })
            .collect();
        return Ok(json!({
            "plant": report.plant_name,
            "system": ctx.display.system,
            "health": report.overall.label(),
            "health_color": palette.severity_color(report.overall.severity()),
            "theme": { "dark_mode": ctx.display.dark_mode, "background": palette.background, "text": palette.text },
            "readings": entries,
            "recommendations": report.recommendations(),
            "pump": { "mode": pump.mode.as_str(), "max_mode": pump.max_mode.as_str(), "status": pump_status },
        })
        .to_string());
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", report.plant_name, ctx.display.system);
    let _ = writeln!(out, "Health: {}", report.overall);
    let _ = writeln!(out, "\nPlant Health Status");
    for e in &report.entries {
        let _ = writeln!(
            out,
            "  {}  {}",
            hydro_core::health::health_line(e),
            e.status.severity
        );
    }
    let _ = writeln!(out, "\nRecommendations");
    for r in report.recommendations() {
        let _ = writeln!(out, "  - {r}");
    }
    let _ = write!(
        out,
        "\nWater system: pump {} (max {}) - {}",
        pump.mode, pump.max_mode, pump_status
    );
    Ok(out)
}

pub fn run_pump(
    ctx: &Context,
    mode: Option<PumpMode>,
    max_mode: Option<PumpMode>,
    due_in_days: Option<u32>,
) -> CoreResult<String> {
    let base = pump_state(ctx);
    let state = PumpState::new(mode.unwrap_or(base.mode), max_mode.unwrap_or(base.max_mode));
    let days = due_in_days.unwrap_or(ctx.cfg.pump.due_in_days);
    let status = resolve_status_with(state, days);
    tracing::info!(mode = state.mode.as_str(), max_mode = state.max_mode.as_str(), status = %status, "pump");
    if ctx.json {
        return Ok(json!({
            "mode": state.mode.as_str(),
            "max_mode": state.max_mode.as_str(),
            "status": status,
        })
        .to_string());
    }
    Ok(status)
}

pub fn run_series(ctx: &Context, sensor: &str, csv: &Path) -> CoreResult<String> {
    let key: MeasurementKey = sensor.parse()?;
    let points: Vec<SeriesPoint> = hydro_config::load_series_csv(csv)?
        .into_iter()
        .map(|r| SeriesPoint::new(r.label, r.value))
        .collect();
    let s = SeriesSummary::compute(&ctx.evaluator, key, &points)?;
    if ctx.json {
        return Ok(json!({
            "sensor": key.as_str(),
            "points": s.points,
            "min": s.min,
            "max": s.max,
            "mean": s.mean,
            "latest": { "label": s.latest.label, "value": s.latest.value },
            "worst": s.worst.as_str(),
            "worst_at": s.worst_at,
        })
        .to_string());
    }
    Ok(format!(
        "{key} over {} points: min {} / max {} / mean {:.2}; latest {} at {}; worst {} at {}",
        s.points, s.min, s.max, s.mean, s.latest.value, s.latest.label, s.worst, s.worst_at
    ))
}

pub fn run_self_check(ctx: &Context) -> CoreResult<String> {
    let ranges = ctx.evaluator.ranges();
    for key in MeasurementKey::ALL {
        if ranges.get(key).is_none() {
            return Err(HydroError::Configuration(format!("no ideal range registered for {key}")).into());
        }
    }
    let cfg = ctx.evaluator.cfg();
    let mode = match cfg.mode {
        hydro_core::SeverityMode::Graduated => "graduated",
        hydro_core::SeverityMode::Binary => "binary",
    };
    if ctx.json {
        let table: Vec<_> = ranges.iter().map(range_json).collect();
        return Ok(json!({
            "status": "ok",
            "mode": mode,
            "warning_margin_ratio": cfg.warning_margin_ratio,
            "ranges": table,
        })
        .to_string());
    }
    let mut out = format!(
        "config ok (mode {mode}, warning margin {})",
        cfg.warning_margin_ratio
    );
    for r in ranges.iter() {
        let _ = write!(out, "\n  {}: {}", r.key(), range_text(r));
    }
    Ok(out)
}
