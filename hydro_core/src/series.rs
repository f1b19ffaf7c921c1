//! Summary statistics for a chart series of one measurement.
//!
//! The chart itself is drawn elsewhere; this only digests the points.

use crate::error::{HydroError, Result};
use crate::evaluator::{Evaluator, Severity};
use crate::measurement::{Measurement, MeasurementKey};

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub key: MeasurementKey,
    pub points: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub latest: SeriesPoint,
    /// Worst severity among all points.
    pub worst: Severity,
    /// Label of the first point that reached `worst`.
    pub worst_at: String,
}

impl SeriesSummary {
    pub fn compute(evaluator: &Evaluator, key: MeasurementKey, points: &[SeriesPoint]) -> Result<Self> {
        let Some(last) = points.last() else {
            return Err(HydroError::EmptySeries(key).into());
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut worst = Severity::Ok;
        let mut worst_at = points[0].label.clone();
        for p in points {
            min = min.min(p.value);
            max = max.max(p.value);
            sum += p.value;
            let status = evaluator.evaluate(&Measurement::new(key, p.value))?;
            if status.severity > worst {
                worst = status.severity;
                worst_at = p.label.clone();
            }
        }
        Ok(Self {
            key,
            points: points.len(),
            min,
            max,
            mean: sum / points.len() as f64,
            latest: last.clone(),
            worst,
            worst_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::DEMO_PH_SERIES;

    fn demo_points() -> Vec<SeriesPoint> {
        DEMO_PH_SERIES
            .iter()
            .map(|&(l, v)| SeriesPoint::new(l, v))
            .collect()
    }

    #[test]
    fn demo_ph_series_stays_ideal() {
        let s = SeriesSummary::compute(&Evaluator::default(), MeasurementKey::Ph, &demo_points())
            .unwrap();
        assert_eq!(s.points, 7);
        assert_eq!(s.min, 6.0);
        assert_eq!(s.max, 6.3);
        assert!((s.mean - 6.128_571_428_571_429).abs() < 1e-9);
        assert_eq!(s.latest.label, "6PM");
        assert_eq!(s.worst, Severity::Ok);
    }

    #[test]
    fn worst_point_is_reported() {
        let mut pts = demo_points();
        pts[3] = SeriesPoint::new("9AM", 7.5);
        let s = SeriesSummary::compute(&Evaluator::default(), MeasurementKey::Ph, &pts).unwrap();
        assert_eq!(s.worst, Severity::Critical);
        assert_eq!(s.worst_at, "9AM");
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = SeriesSummary::compute(&Evaluator::default(), MeasurementKey::Ec, &[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<HydroError>(),
            Some(&HydroError::EmptySeries(MeasurementKey::Ec))
        );
    }
}
