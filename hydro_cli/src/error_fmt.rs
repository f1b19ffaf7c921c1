//! Human-readable error descriptions and structured JSON error formatting.

use hydro_core::{BuildError, HydroError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(he) = err.downcast_ref::<HydroError>() {
        return match he {
            HydroError::Configuration(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Unknown sensor name, an inverted or missing ideal range, or a bad value in the TOML.\nHow to fix: Use one of ph, ec, tds, temperature, humidity, light, co2 and keep min <= max under [ranges.*]."
            ),
            HydroError::Source(msg) => format!(
                "What happened: A reading could not be obtained ({msg}).\nLikely causes: The readings source has no value for that sensor.\nHow to fix: Add the sensor to [readings] or the readings CSV."
            ),
            HydroError::EmptySeries(key) => format!(
                "What happened: The {key} series has no points.\nLikely causes: The series CSV only contains a header.\nHow to fix: Add at least one 'label,value' row."
            ),
        };
    }

    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid evaluation settings ({msg}).\nLikely causes: Out-of-range values under [evaluation].\nHow to fix: Edit the config file, then rerun."
        );
    }

    // String-based heuristics for errors coming from config or CSV loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("csv must have headers") {
        return format!("Invalid CSV headers: {msg}");
    }

    if lower.contains("read config") || lower.contains("parse config") {
        return format!(
            "What happened: The config file could not be loaded ({msg}).\nLikely causes: Wrong --config path or invalid TOML syntax.\nHow to fix: Check the path and the TOML, then rerun."
        );
    }

    if lower.contains("must be") || lower.contains("unknown sensor") {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range or misspelled values in the TOML.\nHow to fix: Edit the config file and try again."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes for typed errors; everything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<HydroError>() {
        Some(HydroError::Configuration(_)) => 3,
        Some(HydroError::Source(_)) => 4,
        Some(HydroError::EmptySeries(_)) => 5,
        None if err.downcast_ref::<BuildError>().is_some() => 3,
        None => 1,
    }
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<HydroError>() {
        Some(HydroError::Configuration(_)) => "Configuration",
        Some(HydroError::Source(_)) => "Source",
        Some(HydroError::EmptySeries(_)) => "EmptySeries",
        None if err.downcast_ref::<BuildError>().is_some() => "Configuration",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}
