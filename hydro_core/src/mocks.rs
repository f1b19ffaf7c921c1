//! Fixed readings for demos, tests and the CLI's default source.

use hydro_traits::{BoxError, ReadingSource};

use crate::measurement::{Measurement, MeasurementKey};
use crate::snapshot::Snapshot;

/// Readings shown on the dashboard when no acquisition layer is wired in.
pub const DEMO_READINGS: [(MeasurementKey, f64); 7] = [
    (MeasurementKey::Ph, 6.2),
    (MeasurementKey::Ec, 1.8),
    (MeasurementKey::Tds, 900.0),
    (MeasurementKey::Temperature, 20.0),
    (MeasurementKey::Humidity, 60.0),
    (MeasurementKey::Light, 75_000.0),
    (MeasurementKey::Co2, 450.0),
];

/// pH samples over one day, as plotted on the dashboard.
pub const DEMO_PH_SERIES: [(&str, f64); 7] = [
    ("12AM", 6.0),
    ("3AM", 6.1),
    ("6AM", 6.2),
    ("9AM", 6.3),
    ("12PM", 6.2),
    ("3PM", 6.1),
    ("6PM", 6.0),
];

pub fn demo_snapshot() -> Snapshot {
    DEMO_READINGS
        .iter()
        .map(|&(k, v)| Measurement::new(k, v))
        .collect()
}

/// A source that answers from `DEMO_READINGS`, with optional overrides.
#[derive(Debug, Clone, Default)]
pub struct FixedReadings {
    overrides: Vec<(MeasurementKey, f64)>,
}

impl FixedReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the demo value for `key`.
    pub fn with(mut self, key: MeasurementKey, value: f64) -> Self {
        self.overrides.retain(|(k, _)| *k != key);
        self.overrides.push((key, value));
        self
    }
}

impl ReadingSource for FixedReadings {
    fn read(&mut self, sensor: &str) -> Result<f64, BoxError> {
        let key: MeasurementKey = sensor.parse()?;
        let value = self
            .overrides
            .iter()
            .chain(DEMO_READINGS.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v);
        value.ok_or_else(|| format!("no demo reading for {key}").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_demo_values() {
        let mut src = FixedReadings::new().with(MeasurementKey::Ph, 5.0);
        assert_eq!(src.read("ph").unwrap(), 5.0);
        assert_eq!(src.read("co2").unwrap(), 450.0);
    }

    #[test]
    fn unknown_sensor_is_an_error() {
        let mut src = FixedReadings::new();
        assert!(src.read("nitrate").is_err());
    }
}
