#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and CSV loaders for the hydroponics status engine.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section is optional; an empty document is a valid config.
//! - CSV loaders enforce exact headers before reading any row.
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Sensor ids accepted in `[ranges.*]`, `[readings]` and CSV files.
pub const SENSOR_IDS: [&str; 7] = ["ph", "ec", "tds", "temperature", "humidity", "light", "co2"];

/// Map a sensor name to its id in `SENSOR_IDS`.
///
/// Matching ignores ASCII case and surrounding whitespace; `temp` is accepted
/// for `temperature`. This is the only naming rule for sensors: config keys,
/// CSV rows and CLI arguments all go through it.
pub fn canonical_sensor(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("temp") {
        return Some("temperature");
    }
    SENSOR_IDS.iter().copied().find(|s| s.eq_ignore_ascii_case(name))
}

/// Returns true when `id` names a known sensor.
pub fn is_known_sensor(id: &str) -> bool {
    canonical_sensor(id).is_some()
}

/// Checks `ids` against the sensor list; two names for the same sensor are
/// rejected.
fn check_sensor_ids<'a>(
    section: &str,
    ids: impl Iterator<Item = &'a String>,
) -> eyre::Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        let Some(canon) = canonical_sensor(id) else {
            eyre::bail!("{section}.{id}: unknown sensor (expected one of {})", SENSOR_IDS.join(", "));
        };
        if !seen.insert(canon) {
            eyre::bail!("{section}.{id}: duplicate entry for sensor '{canon}'");
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeverityMode {
    /// ok / warning / critical, using `warning_margin_ratio`
    #[default]
    Graduated,
    /// ok / critical only
    Binary,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EvaluationCfg {
    pub mode: SeverityMode,
    /// Fraction of the range width tolerated outside the range before a
    /// reading is critical. Range: [0.0, 1.0].
    pub warning_margin_ratio: f64,
}

impl Default for EvaluationCfg {
    fn default() -> Self {
        Self {
            mode: SeverityMode::Graduated,
            warning_margin_ratio: 0.10,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RangeCfg {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PumpModeCfg {
    Low,
    Medium,
    High,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PumpCfg {
    pub mode: PumpModeCfg,
    pub max_mode: PumpModeCfg,
    /// Days until the next scheduled circulation cycle while below max.
    pub due_in_days: u32,
}

impl Default for PumpCfg {
    fn default() -> Self {
        Self {
            mode: PumpModeCfg::Medium,
            max_mode: PumpModeCfg::High,
            due_in_days: 2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlantCfg {
    pub name: String,
}

impl Default for PlantCfg {
    fn default() -> Self {
        Self {
            name: "Lettuce (Romaine)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayCfg {
    pub dark_mode: bool,
    /// Name of the currently selected growing system.
    pub system: String,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self {
            dark_mode: false,
            system: "Main".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub plant: PlantCfg,
    #[serde(default)]
    pub evaluation: EvaluationCfg,
    /// Per-sensor overrides of the built-in ideal ranges.
    #[serde(default)]
    pub ranges: BTreeMap<String, RangeCfg>,
    /// Optional fixed snapshot; sensors not listed fall back to demo values.
    #[serde(default)]
    pub readings: BTreeMap<String, f64>,
    #[serde(default)]
    pub pump: PumpCfg,
    #[serde(default)]
    pub display: DisplayCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. Does not validate.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Ranges
        check_sensor_ids("ranges", self.ranges.keys())?;
        for (id, r) in &self.ranges {
            if !r.min.is_finite() || !r.max.is_finite() {
                eyre::bail!("ranges.{id}: min and max must be finite");
            }
            if r.min > r.max {
                eyre::bail!("ranges.{id}: min must be <= max");
            }
        }

        // Readings
        check_sensor_ids("readings", self.readings.keys())?;
        for (id, v) in &self.readings {
            if !v.is_finite() {
                eyre::bail!("readings.{id}: value must be finite");
            }
        }

        // Evaluation
        let ratio = self.evaluation.warning_margin_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            eyre::bail!("evaluation.warning_margin_ratio must be in [0.0, 1.0]");
        }

        // Pump
        if self.pump.due_in_days == 0 {
            eyre::bail!("pump.due_in_days must be >= 1");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never, daily, hourly");
        }

        Ok(())
    }
}

/// Readings CSV schema.
///
/// Expected headers:
/// sensor,value
///
/// Example:
/// sensor,value
/// ph,6.2
/// ec,1.8
#[derive(Debug, Deserialize, Clone)]
pub struct ReadingRow {
    pub sensor: String,
    pub value: f64,
}

/// Series CSV schema (one measurement over time).
///
/// Expected headers:
/// label,value
#[derive(Debug, Deserialize, Clone)]
pub struct SeriesRow {
    pub label: String,
    pub value: f64,
}

fn read_csv_rows<T>(path: &Path, kind: &str, expected: [&str; 2]) -> eyre::Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open {kind} CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "{kind} CSV must have headers '{}', got: {}",
            expected.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<T>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    Ok(rows)
}

pub fn load_readings_csv(path: &Path) -> eyre::Result<Vec<ReadingRow>> {
    let rows: Vec<ReadingRow> = read_csv_rows(path, "readings", ["sensor", "value"])?;
    let mut seen = BTreeSet::new();
    for (idx, row) in rows.iter().enumerate() {
        let Some(canon) = canonical_sensor(&row.sensor) else {
            eyre::bail!("invalid CSV row {}: unknown sensor '{}'", idx + 2, row.sensor);
        };
        if !seen.insert(canon) {
            eyre::bail!("invalid CSV row {}: duplicate sensor '{}'", idx + 2, row.sensor);
        }
    }
    Ok(rows)
}

pub fn load_series_csv(path: &Path) -> eyre::Result<Vec<SeriesRow>> {
    read_csv_rows(path, "series", ["label", "value"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.evaluation.mode, SeverityMode::Graduated);
        assert!((cfg.evaluation.warning_margin_ratio - 0.10).abs() < 1e-12);
        assert_eq!(cfg.pump.mode, PumpModeCfg::Medium);
        assert_eq!(cfg.pump.max_mode, PumpModeCfg::High);
        assert_eq!(cfg.pump.due_in_days, 2);
        assert_eq!(cfg.plant.name, "Lettuce (Romaine)");
        assert!(cfg.ranges.is_empty());
        cfg.validate().unwrap();
    }

    #[test]
    fn integer_bounds_parse_as_floats() {
        let cfg = load_toml("[ranges.tds]\nmin = 600\nmax = 1200\n").unwrap();
        let r = cfg.ranges["tds"];
        assert_eq!(r.min, 600.0);
        assert_eq!(r.max, 1200.0);
    }

    #[test]
    fn known_sensor_is_case_insensitive() {
        assert!(is_known_sensor("pH"));
        assert!(is_known_sensor("CO2"));
        assert!(!is_known_sensor("oxygen"));
    }

    #[test]
    fn canonical_sensor_folds_case_and_alias() {
        assert_eq!(canonical_sensor(" PH "), Some("ph"));
        assert_eq!(canonical_sensor("Temp"), Some("temperature"));
        assert_eq!(canonical_sensor("temperature"), Some("temperature"));
        assert_eq!(canonical_sensor("tem"), None);
        assert!(is_known_sensor("temp"));
    }
}
