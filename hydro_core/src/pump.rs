//! Water-system status derived from the circulation pump mode.

use std::fmt;
use std::str::FromStr;

use crate::error::HydroError;

/// Discrete circulation pump operating level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PumpMode {
    Low,
    Medium,
    High,
}

impl PumpMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for PumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PumpMode {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(HydroError::Configuration(format!("unknown pump mode '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpState {
    pub mode: PumpMode,
    pub max_mode: PumpMode,
}

impl PumpState {
    pub const fn new(mode: PumpMode, max_mode: PumpMode) -> Self {
        Self { mode, max_mode }
    }

    #[inline]
    pub fn at_max(&self) -> bool {
        self.mode == self.max_mode
    }
}

/// Days until the next circulation cycle when the pump is below max.
pub const DEFAULT_DUE_IN_DAYS: u32 = 2;

pub const TRIGGERED: &str = "Triggered (Pump at Max)";

/// Status line for the water-system panel.
pub fn resolve_status(state: PumpState) -> String {
    resolve_status_with(state, DEFAULT_DUE_IN_DAYS)
}

/// Same as `resolve_status` with a configurable maintenance interval.
pub fn resolve_status_with(state: PumpState, due_in_days: u32) -> String {
    if state.at_max() {
        return TRIGGERED.to_string();
    }
    match due_in_days {
        1 => "Due in 1 day".to_string(),
        n => format!("Due in {n} days"),
    }
}
