#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Status engine for hydroponic growing systems (source-agnostic).
//!
//! Readings come in through `hydro_traits::ReadingSource`; everything here is
//! pure classification and formatting over the resulting snapshot.
//!
//! ## Architecture
//!
//! - **Measurements**: sensor identities, units, snapshots (`measurement`, `snapshot`)
//! - **Ideal ranges**: one table keyed by sensor (`range`)
//! - **Evaluation**: ok / warning / critical against the range (`evaluator`)
//! - **Pump**: water-system status from pump mode vs. max mode (`pump`)
//! - **Reports**: plant health lines and recommendations (`health`), chart
//!   series digests (`series`)
//! - **Display**: explicit dark-mode / selected-system context (`display`)

pub mod conversions;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod health;
pub mod measurement;
pub mod mocks;
pub mod pump;
pub mod range;
pub mod series;
pub mod snapshot;
pub mod util;

pub use display::{DisplayContext, Palette};
pub use error::{BuildError, HydroError};
pub use evaluator::{
    Deviation, EvaluationCfg, Evaluator, EvaluatorBuilder, Severity, SeverityMode, StatusResult,
    evaluate, evaluate_with,
};
pub use health::{HealthEntry, HealthReport, PlantHealth};
pub use measurement::{Measurement, MeasurementKey};
pub use pump::{PumpMode, PumpState, resolve_status, resolve_status_with};
pub use range::{IdealRange, IdealRanges};
pub use series::{SeriesPoint, SeriesSummary};
pub use snapshot::Snapshot;
