//! Ideal ranges and the per-sensor reference table.

use std::collections::BTreeMap;

use crate::error::HydroError;
use crate::measurement::MeasurementKey;

/// Acceptable interval for one sensor. Invariant: `min <= max`, both finite.
///
/// Fields are private so every instance goes through `new`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealRange {
    key: MeasurementKey,
    min: f64,
    max: f64,
}

impl IdealRange {
    pub fn new(key: MeasurementKey, min: f64, max: f64) -> Result<Self, HydroError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(HydroError::Configuration(format!(
                "ideal range for {key} must have finite bounds"
            )));
        }
        if min > max {
            return Err(HydroError::Configuration(format!(
                "ideal range for {key} has min {min} > max {max}"
            )));
        }
        Ok(Self { key, min, max })
    }

    pub const fn key(&self) -> MeasurementKey {
        self.key
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Signed distance outside the range: negative below, positive above,
    /// zero inside.
    #[inline]
    pub fn excess(&self, value: f64) -> f64 {
        if value < self.min {
            value - self.min
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// Lookup table of ideal ranges keyed by sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealRanges {
    table: BTreeMap<MeasurementKey, IdealRange>,
}

impl IdealRanges {
    /// A table with no entries. Every lookup fails until ranges are inserted.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Insert or replace the range for `range.key`; returns the previous one.
    pub fn insert(&mut self, range: IdealRange) -> Option<IdealRange> {
        self.table.insert(range.key, range)
    }

    pub fn get(&self, key: MeasurementKey) -> Option<&IdealRange> {
        self.table.get(&key)
    }

    /// Like `get`, but a missing entry is a configuration error.
    pub fn lookup(&self, key: MeasurementKey) -> Result<&IdealRange, HydroError> {
        self.table.get(&key).ok_or_else(|| HydroError::no_range(key))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate in display order.
    pub fn iter(&self) -> impl Iterator<Item = &IdealRange> {
        self.table.values()
    }
}

impl Default for IdealRanges {
    /// Reference ranges for leafy greens in a recirculating system.
    fn default() -> Self {
        use MeasurementKey::*;
        let defaults = [
            (Ph, 5.5, 6.5),
            (Ec, 1.2, 2.4),
            (Tds, 600.0, 1_200.0),
            (Temperature, 18.0, 22.0),
            (Humidity, 50.0, 70.0),
            (Light, 60_000.0, 100_000.0),
            (Co2, 400.0, 600.0),
        ];
        let mut table = BTreeMap::new();
        for (key, min, max) in defaults {
            table.insert(key, IdealRange { key, min, max });
        }
        Self { table }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_sensor() {
        let ranges = IdealRanges::default();
        assert_eq!(ranges.len(), MeasurementKey::ALL.len());
        for key in MeasurementKey::ALL {
            let r = ranges.lookup(key).unwrap();
            assert!(r.min() <= r.max(), "{key}");
            assert_eq!(r.key(), key);
        }
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let err = IdealRange::new(MeasurementKey::Ph, 7.0, 6.0).unwrap_err();
        assert!(matches!(err, HydroError::Configuration(_)));
    }

    #[test]
    fn new_rejects_non_finite_bounds() {
        assert!(IdealRange::new(MeasurementKey::Ec, f64::NAN, 2.0).is_err());
        assert!(IdealRange::new(MeasurementKey::Ec, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn excess_is_signed() {
        let r = IdealRange::new(MeasurementKey::Ph, 5.5, 6.5).unwrap();
        assert!((r.excess(5.0) + 0.5).abs() < 1e-12);
        assert!((r.excess(7.0) - 0.5).abs() < 1e-12);
        assert_eq!(r.excess(6.0), 0.0);
    }

    #[test]
    fn lookup_on_empty_table_fails() {
        let err = IdealRanges::empty().lookup(MeasurementKey::Co2).unwrap_err();
        assert_eq!(
            err,
            HydroError::Configuration("no ideal range registered for CO2".into())
        );
    }

    #[test]
    fn insert_replaces_existing() {
        let mut ranges = IdealRanges::default();
        let prev = ranges.insert(IdealRange::new(MeasurementKey::Ph, 5.8, 6.2).unwrap());
        assert_eq!(prev.map(|r| r.min()), Some(5.5));
        assert_eq!(ranges.lookup(MeasurementKey::Ph).unwrap().max(), 6.2);
    }
}
