//! One display cycle's worth of measurements.

use eyre::WrapErr;
use hydro_traits::ReadingSource;

use crate::error::{HydroError, Result};
use crate::measurement::{Measurement, MeasurementKey};

/// Ordered measurements; at most one per key, later inserts replace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    measurements: Vec<Measurement>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `keys` from `source`, in order.
    pub fn collect<S>(source: &mut S, keys: &[MeasurementKey]) -> Result<Self>
    where
        S: ReadingSource + ?Sized,
    {
        let mut snap = Self::new();
        for &key in keys {
            let value = source
                .read(key.as_str())
                .map_err(|e| HydroError::Source(e.to_string()))
                .wrap_err_with(|| format!("read {key}"))?;
            snap.insert(Measurement::new(key, value));
        }
        tracing::debug!(count = snap.len(), "snapshot collected");
        Ok(snap)
    }

    pub fn insert(&mut self, m: Measurement) {
        if let Some(slot) = self.measurements.iter_mut().find(|x| x.key == m.key) {
            *slot = m;
        } else {
            self.measurements.push(m);
        }
    }

    pub fn get(&self, key: MeasurementKey) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

impl FromIterator<Measurement> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut snap = Self::new();
        for m in iter {
            snap.insert(m);
        }
        snap
    }
}
