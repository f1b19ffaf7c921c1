//! `From` implementations bridging `hydro_config` types to `hydro_core` types.

use crate::display::DisplayContext;
use crate::error::Result;
use crate::evaluator::{EvaluationCfg, Evaluator, SeverityMode};
use crate::measurement::MeasurementKey;
use crate::pump::{PumpMode, PumpState};
use crate::range::IdealRange;

// ── Evaluation ───────────────────────────────────────────────────────────────

impl From<hydro_config::SeverityMode> for SeverityMode {
    fn from(m: hydro_config::SeverityMode) -> Self {
        match m {
            hydro_config::SeverityMode::Graduated => Self::Graduated,
            hydro_config::SeverityMode::Binary => Self::Binary,
        }
    }
}

impl From<&hydro_config::EvaluationCfg> for EvaluationCfg {
    fn from(c: &hydro_config::EvaluationCfg) -> Self {
        Self {
            mode: c.mode.into(),
            warning_margin_ratio: c.warning_margin_ratio,
        }
    }
}

// ── Pump ─────────────────────────────────────────────────────────────────────

impl From<hydro_config::PumpModeCfg> for PumpMode {
    fn from(m: hydro_config::PumpModeCfg) -> Self {
        match m {
            hydro_config::PumpModeCfg::Low => Self::Low,
            hydro_config::PumpModeCfg::Medium => Self::Medium,
            hydro_config::PumpModeCfg::High => Self::High,
        }
    }
}

impl From<&hydro_config::PumpCfg> for PumpState {
    fn from(c: &hydro_config::PumpCfg) -> Self {
        Self::new(c.mode.into(), c.max_mode.into())
    }
}

// ── Display ──────────────────────────────────────────────────────────────────

impl From<&hydro_config::DisplayCfg> for DisplayContext {
    fn from(c: &hydro_config::DisplayCfg) -> Self {
        Self {
            dark_mode: c.dark_mode,
            system: c.system.clone(),
        }
    }
}

// ── Evaluator ────────────────────────────────────────────────────────────────

impl Evaluator {
    /// Default range table with `[ranges.*]` overrides applied.
    pub fn from_config(cfg: &hydro_config::Config) -> Result<Self> {
        let mut builder = Self::builder().with_cfg((&cfg.evaluation).into());
        for (id, r) in &cfg.ranges {
            let key: MeasurementKey = id.parse()?;
            builder = builder.with_range(IdealRange::new(key, r.min, r.max)?);
        }
        Ok(builder.build()?)
    }
}
