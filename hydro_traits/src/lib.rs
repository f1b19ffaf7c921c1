//! Acquisition seam between the status engine and whatever produces readings.
//!
//! The core never talks to sensors directly; it asks a `ReadingSource` for
//! one value per sensor id (`"ph"`, `"ec"`, `"tds"`, ...).

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub trait ReadingSource {
    /// Latest value for the sensor identified by `sensor`.
    fn read(&mut self, sensor: &str) -> Result<f64, BoxError>;
}

impl<T: ReadingSource + ?Sized> ReadingSource for &mut T {
    fn read(&mut self, sensor: &str) -> Result<f64, BoxError> {
        (**self).read(sensor)
    }
}

impl<T: ReadingSource + ?Sized> ReadingSource for Box<T> {
    fn read(&mut self, sensor: &str) -> Result<f64, BoxError> {
        (**self).read(sensor)
    }
}

/// Reads from a fixed list of `(sensor, value)` pairs.
///
/// Sensor ids are compared case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct TableSource {
    entries: Vec<(String, f64)>,
}

impl TableSource {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReadingSource for TableSource {
    fn read(&mut self, sensor: &str) -> Result<f64, BoxError> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(sensor))
            .map(|(_, v)| *v)
            .ok_or_else(|| format!("no reading for sensor '{sensor}'").into())
    }
}
