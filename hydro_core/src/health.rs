//! Plant health report: every measurement in a snapshot, evaluated and
//! rendered as dashboard lines.

use std::fmt;

use eyre::WrapErr;

use crate::error::Result;
use crate::evaluator::{Deviation, Evaluator, Severity, StatusResult};
use crate::measurement::{Measurement, MeasurementKey};
use crate::range::IdealRange;
use crate::snapshot::Snapshot;
use crate::util::group_thousands;

/// Overall plant condition, the worst severity across all readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantHealth {
    Healthy,
    NeedsAttention,
    Critical,
}

impl PlantHealth {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs attention",
            Self::Critical => "Critical",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Healthy => Severity::Ok,
            Self::NeedsAttention => Severity::Warning,
            Self::Critical => Severity::Critical,
        }
    }
}

impl From<Severity> for PlantHealth {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Ok => Self::Healthy,
            Severity::Warning => Self::NeedsAttention,
            Severity::Critical => Self::Critical,
        }
    }
}

impl fmt::Display for PlantHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthEntry {
    pub measurement: Measurement,
    pub range: IdealRange,
    pub status: StatusResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub plant_name: String,
    pub entries: Vec<HealthEntry>,
    pub overall: PlantHealth,
}

impl HealthReport {
    /// Evaluate every measurement in `snapshot`.
    ///
    /// Fails on the first measurement with no registered ideal range.
    pub fn build(evaluator: &Evaluator, plant_name: &str, snapshot: &Snapshot) -> Result<Self> {
        let mut entries = Vec::with_capacity(snapshot.len());
        let mut worst = Severity::Ok;
        for m in snapshot.iter() {
            let range = *evaluator
                .ranges()
                .lookup(m.key)
                .wrap_err_with(|| format!("health report for {plant_name}"))?;
            let status = evaluator.evaluate(m)?;
            if status.severity == Severity::Critical {
                tracing::warn!(
                    sensor = m.key.as_str(),
                    value = m.value,
                    label = status.label,
                    "reading out of range"
                );
            }
            worst = worst.max(status.severity);
            entries.push(HealthEntry {
                measurement: m.clone(),
                range,
                status,
            });
        }
        let overall = PlantHealth::from(worst);
        tracing::info!(plant = plant_name, health = overall.label(), "health report");
        Ok(Self {
            plant_name: plant_name.to_string(),
            entries,
            overall,
        })
    }

    pub fn entry(&self, key: MeasurementKey) -> Option<&HealthEntry> {
        self.entries.iter().find(|e| e.measurement.key == key)
    }

    /// Dashboard lines, one per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(health_line).collect()
    }

    /// One action per out-of-range reading, or a maintenance hint when all
    /// readings are ideal.
    pub fn recommendations(&self) -> Vec<String> {
        let actions: Vec<String> = self
            .entries
            .iter()
            .filter(|e| !e.status.is_ok())
            .map(|e| {
                let name = e.measurement.key.display_name();
                let target = range_text(&e.range);
                match e.status.deviation {
                    Deviation::Below => format!("Raise {name} into {target}"),
                    Deviation::Above => format!("Lower {name} into {target}"),
                    Deviation::Within | Deviation::Invalid => {
                        format!("Check the {name} sensor: no valid reading")
                    }
                }
            })
            .collect();
        if !actions.is_empty() {
            return actions;
        }
        match (self.entry(MeasurementKey::Ph), self.entry(MeasurementKey::Light)) {
            (Some(ph), Some(light)) => vec![format!(
                "Maintain pH between {} and ensure adequate light ({} Lux).",
                range_text(&ph.range),
                range_text(&light.range)
            )],
            _ => vec!["Maintain current conditions.".to_string()],
        }
    }
}

/// `°C` and `%` attach to the number; other units follow after a space.
fn attached_unit(key: MeasurementKey) -> bool {
    matches!(key, MeasurementKey::Temperature | MeasurementKey::Humidity)
}

fn value_text(m: &Measurement) -> String {
    if m.unit.is_empty() {
        format!("{}", m.value)
    } else if attached_unit(m.key) {
        format!("{}{}", m.value, m.unit)
    } else {
        format!("{} {}", m.value, m.unit)
    }
}

/// `5.5 - 6.5`, `18°C - 22°C`, `60,000 - 100,000`.
pub fn range_text(r: &IdealRange) -> String {
    let suffix = if attached_unit(r.key()) { r.key().unit() } else { "" };
    format!(
        "{}{suffix} - {}{suffix}",
        group_thousands(r.min()),
        group_thousands(r.max())
    )
}

/// `pH: 6.2 (Ideal: 5.5 - 6.5)`
pub fn health_line(e: &HealthEntry) -> String {
    format!(
        "{}: {} (Ideal: {})",
        e.measurement.key.display_name(),
        value_text(&e.measurement),
        range_text(&e.range)
    )
}
