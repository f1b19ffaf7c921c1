//! Sensor identities and measurement snapshots.

use std::fmt;
use std::str::FromStr;

use crate::error::HydroError;

/// The sensors a growing system reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeasurementKey {
    Ph,
    Ec,
    Tds,
    Temperature,
    Humidity,
    Light,
    Co2,
}

impl MeasurementKey {
    /// All keys in dashboard display order.
    pub const ALL: [Self; 7] = [
        Self::Ph,
        Self::Ec,
        Self::Tds,
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::Co2,
    ];

    /// Stable lowercase id used in config files and CSV.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ph => "ph",
            Self::Ec => "ec",
            Self::Tds => "tds",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Co2 => "co2",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ph => "pH",
            Self::Ec => "EC",
            Self::Tds => "TDS",
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Light => "Light",
            Self::Co2 => "CO2",
        }
    }

    /// Canonical unit; pH is dimensionless.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Ph => "",
            Self::Ec => "mS/cm",
            Self::Tds | Self::Co2 => "ppm",
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Light => "Lux",
        }
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MeasurementKey {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hydro_config::canonical_sensor(s)
            .and_then(|id| Self::ALL.into_iter().find(|k| k.as_str() == id))
            .ok_or_else(|| HydroError::Configuration(format!("unknown measurement '{s}'")))
    }
}

/// One reading in a display cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub key: MeasurementKey,
    pub value: f64,
    pub unit: &'static str,
}

impl Measurement {
    /// Build a measurement with the key's canonical unit.
    pub fn new(key: MeasurementKey, value: f64) -> Self {
        Self {
            key,
            value,
            unit: key.unit(),
        }
    }
}
