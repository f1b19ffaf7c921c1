//! Threshold evaluation of a measurement against its ideal range.
//!
//! A reading inside `[min, max]` is `Ok`. Outside the range, the distance
//! past the nearest bound is compared with `warning_margin_ratio * width`:
//! within that margin the reading is a `Warning`, beyond it `Critical`.
//! In `SeverityMode::Binary` every out-of-range reading is `Critical`.

use std::fmt;

use crate::error::{BuildError, HydroError};
use crate::measurement::Measurement;
use crate::range::{IdealRange, IdealRanges};

/// Coarse classification, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the range a reading falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Below,
    Within,
    Above,
    /// NaN or infinite reading.
    Invalid,
}

/// Display-ready outcome of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResult {
    pub label: &'static str,
    pub severity: Severity,
    pub deviation: Deviation,
    /// Signed distance outside the range (0.0 inside).
    pub excess: f64,
}

impl StatusResult {
    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityMode {
    #[default]
    Graduated,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationCfg {
    pub mode: SeverityMode,
    /// Fraction of range width tolerated outside the range as a warning.
    /// Range: [0.0, 1.0]. Default: 0.10.
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

impl EvaluationCfg {
    pub fn validate(&self) -> Result<(), BuildError> {
        let r = self.warning_margin_ratio;
        if !(0.0..=1.0).contains(&r) {
            return Err(BuildError::InvalidConfig(
                "warning_margin_ratio must be in [0.0, 1.0]",
            ));
        }
        Ok(())
    }
}

/// Relative slack applied to the warning margin.
const MARGIN_EPSILON: f64 = 1e-9;

/// Classify `measurement` against `range` with the default configuration.
pub fn evaluate(measurement: &Measurement, range: &IdealRange) -> Result<StatusResult, HydroError> {
    evaluate_with(measurement, range, &EvaluationCfg::default())
}

/// Classify `measurement` against `range`.
///
/// Fails with `HydroError::Configuration` when the range belongs to a
/// different sensor.
pub fn evaluate_with(
    measurement: &Measurement,
    range: &IdealRange,
    cfg: &EvaluationCfg,
) -> Result<StatusResult, HydroError> {
    if measurement.key != range.key() {
        return Err(HydroError::Configuration(format!(
            "measurement {} evaluated against ideal range for {}",
            measurement.key,
            range.key()
        )));
    }

    let value = measurement.value;
    let status = if !value.is_finite() {
        StatusResult {
            label: "No reading",
            severity: Severity::Critical,
            deviation: Deviation::Invalid,
            excess: 0.0,
        }
    } else if range.contains(value) {
        StatusResult {
            label: "Ideal",
            severity: Severity::Ok,
            deviation: Deviation::Within,
            excess: 0.0,
        }
    } else {
        let excess = range.excess(value);
        let margin = range.width() * cfg.warning_margin_ratio;
        // Bound subtraction rounds; a reading placed exactly on the margin
        // (e.g. 2.4 + 0.12) can land a few ulps past it.
        let within_margin = excess.abs() <= margin + margin * MARGIN_EPSILON;
        let below = excess < 0.0;
        let (severity, label) = match (cfg.mode, within_margin, below) {
            (SeverityMode::Graduated, true, true) => (Severity::Warning, "Slightly low"),
            (SeverityMode::Graduated, true, false) => (Severity::Warning, "Slightly high"),
            (_, _, true) => (Severity::Critical, "Too low"),
            (_, _, false) => (Severity::Critical, "Too high"),
        };
        StatusResult {
            label,
            severity,
            deviation: if below {
                Deviation::Below
            } else {
                Deviation::Above
            },
            excess,
        }
    };

    tracing::trace!(
        sensor = measurement.key.as_str(),
        value,
        min = range.min(),
        max = range.max(),
        severity = status.severity.as_str(),
        "evaluated"
    );
    Ok(status)
}

/// Range table plus evaluation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    ranges: IdealRanges,
    cfg: EvaluationCfg,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            ranges: IdealRanges::default(),
            cfg: EvaluationCfg::default(),
        }
    }
}

impl Evaluator {
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::default()
    }

    pub fn ranges(&self) -> &IdealRanges {
        &self.ranges
    }

    pub fn cfg(&self) -> &EvaluationCfg {
        &self.cfg
    }

    /// Look up the range for `measurement.key` and classify the value.
    pub fn evaluate(&self, measurement: &Measurement) -> Result<StatusResult, HydroError> {
        let range = self.ranges.lookup(measurement.key)?;
        evaluate_with(measurement, range, &self.cfg)
    }
}

/// Builder for `Evaluator`. Starts from the default range table.
#[derive(Debug, Clone, Default)]
pub struct EvaluatorBuilder {
    ranges: Option<IdealRanges>,
    cfg: EvaluationCfg,
}

impl EvaluatorBuilder {
    /// Replace the whole range table.
    pub fn with_ranges(mut self, ranges: IdealRanges) -> Self {
        self.ranges = Some(ranges);
        self
    }

    /// Override a single range on top of the current table.
    pub fn with_range(mut self, range: IdealRange) -> Self {
        self.ranges.get_or_insert_with(IdealRanges::default).insert(range);
        self
    }

    pub fn with_mode(mut self, mode: SeverityMode) -> Self {
        self.cfg.mode = mode;
        self
    }

    pub fn with_warning_margin_ratio(mut self, ratio: f64) -> Self {
        self.cfg.warning_margin_ratio = ratio;
        self
    }

    pub fn with_cfg(mut self, cfg: EvaluationCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn build(self) -> Result<Evaluator, BuildError> {
        self.cfg.validate()?;
        Ok(Evaluator {
            ranges: self.ranges.unwrap_or_default(),
            cfg: self.cfg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeasurementKey;
    use rstest::rstest;

    fn ph_range() -> IdealRange {
        IdealRange::new(MeasurementKey::Ph, 5.5, 6.5).unwrap()
    }

    #[rstest]
    #[case(6.2, Severity::Ok, "Ideal")]
    #[case(5.5, Severity::Ok, "Ideal")]
    #[case(6.5, Severity::Ok, "Ideal")]
    #[case(5.45, Severity::Warning, "Slightly low")]
    #[case(6.55, Severity::Warning, "Slightly high")]
    #[case(5.0, Severity::Critical, "Too low")]
    #[case(7.2, Severity::Critical, "Too high")]
    fn graduated_ph_table(#[case] value: f64, #[case] severity: Severity, #[case] label: &str) {
        let m = Measurement::new(MeasurementKey::Ph, value);
        let s = evaluate(&m, &ph_range()).unwrap();
        assert_eq!(s.severity, severity);
        assert_eq!(s.label, label);
    }

    #[test]
    fn binary_mode_has_no_warning_tier() {
        let cfg = EvaluationCfg {
            mode: SeverityMode::Binary,
            ..EvaluationCfg::default()
        };
        let m = Measurement::new(MeasurementKey::Ph, 6.55);
        let s = evaluate_with(&m, &ph_range(), &cfg).unwrap();
        assert_eq!(s.severity, Severity::Critical);
        assert_eq!(s.label, "Too high");
        assert_eq!(s.deviation, Deviation::Above);
    }

    #[test]
    fn margin_boundary_is_a_warning() {
        // width 100, margin 10
        let r = IdealRange::new(MeasurementKey::Humidity, 0.0, 100.0).unwrap();
        let at = evaluate(&Measurement::new(MeasurementKey::Humidity, 110.0), &r).unwrap();
        assert_eq!(at.severity, Severity::Warning);
        let past = evaluate(&Measurement::new(MeasurementKey::Humidity, 110.5), &r).unwrap();
        assert_eq!(past.severity, Severity::Critical);
    }

    #[rstest]
    #[case(MeasurementKey::Ph)]
    #[case(MeasurementKey::Ec)]
    #[case(MeasurementKey::Tds)]
    #[case(MeasurementKey::Temperature)]
    #[case(MeasurementKey::Humidity)]
    #[case(MeasurementKey::Light)]
    #[case(MeasurementKey::Co2)]
    fn exact_ten_percent_past_either_bound_is_a_warning(#[case] key: MeasurementKey) {
        let r = *IdealRanges::default().lookup(key).unwrap();
        let margin = r.width() * 0.1;
        let low = evaluate(&Measurement::new(key, r.min() - margin), &r).unwrap();
        assert_eq!(low.severity, Severity::Warning, "{key} low");
        assert_eq!(low.label, "Slightly low");
        let high = evaluate(&Measurement::new(key, r.max() + margin), &r).unwrap();
        assert_eq!(high.severity, Severity::Warning, "{key} high");
        assert_eq!(high.label, "Slightly high");
        let past = evaluate(&Measurement::new(key, r.max() + margin * 1.01), &r).unwrap();
        assert_eq!(past.severity, Severity::Critical, "{key} past");
    }

    #[test]
    fn ec_margin_is_symmetric() {
        let r = IdealRange::new(MeasurementKey::Ec, 1.2, 2.4).unwrap();
        for v in [1.08, 2.52] {
            let s = evaluate(&Measurement::new(MeasurementKey::Ec, v), &r).unwrap();
            assert_eq!(s.severity, Severity::Warning, "EC {v}");
        }
    }

    #[test]
    fn zero_width_range_has_no_warning_margin() {
        let r = IdealRange::new(MeasurementKey::Temperature, 20.0, 20.0).unwrap();
        let ok = evaluate(&Measurement::new(MeasurementKey::Temperature, 20.0), &r).unwrap();
        assert!(ok.is_ok());
        let off = evaluate(&Measurement::new(MeasurementKey::Temperature, 20.01), &r).unwrap();
        assert_eq!(off.severity, Severity::Critical);
    }

    #[test]
    fn nan_reading_is_critical() {
        let s = evaluate(&Measurement::new(MeasurementKey::Ph, f64::NAN), &ph_range()).unwrap();
        assert_eq!(s.severity, Severity::Critical);
        assert_eq!(s.deviation, Deviation::Invalid);
        assert_eq!(s.label, "No reading");
    }

    #[test]
    fn mismatched_key_is_configuration_error() {
        let m = Measurement::new(MeasurementKey::Ec, 1.8);
        let err = evaluate(&m, &ph_range()).unwrap_err();
        assert!(matches!(err, HydroError::Configuration(_)));
    }

    #[test]
    fn builder_rejects_bad_ratio() {
        let err = Evaluator::builder()
            .with_warning_margin_ratio(1.5)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidConfig("warning_margin_ratio must be in [0.0, 1.0]")
        );
        assert!(
            Evaluator::builder()
                .with_warning_margin_ratio(f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn builder_range_override_keeps_other_defaults() {
        let ev = Evaluator::builder()
            .with_range(IdealRange::new(MeasurementKey::Ph, 5.8, 6.2).unwrap())
            .build()
            .unwrap();
        assert_eq!(ev.ranges().len(), MeasurementKey::ALL.len());
        let s = ev.evaluate(&Measurement::new(MeasurementKey::Ph, 6.4)).unwrap();
        assert_eq!(s.severity, Severity::Critical);
    }

    #[test]
    fn severity_orders_best_to_worst() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }
}
