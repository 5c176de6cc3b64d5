use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SCENARIO_SPREAD: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Optimistic,
    Baseline,
    Pessimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Optimistic,
        Scenario::Baseline,
        Scenario::Pessimistic,
    ];
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Optimistic => "optimistic",
            Self::Baseline => "baseline",
            Self::Pessimistic => "pessimistic",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Error)]
#[error("unknown scenario: {0}")]
pub struct ScenarioParseError(pub String);

impl FromStr for Scenario {
    type Err = ScenarioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" | "best" => Ok(Self::Optimistic),
            "baseline" | "expected" => Ok(Self::Baseline),
            "pessimistic" | "worst" => Ok(Self::Pessimistic),
            _ => Err(ScenarioParseError(s.to_string())),
        }
    }
}

/// Projected residual exposure under each scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExposureBand {
    pub optimistic: f64,
    pub baseline: f64,
    pub pessimistic: f64,
}

impl ExposureBand {
    /// `spread` is the fraction by which realised reduction may over- or
    /// under-shoot the plan; clamped to [0, 1].
    pub fn project(current_exposure: f64, reduction: f64, spread: f64) -> Self {
        let spread = if spread.is_finite() {
            spread.clamp(0.0, 1.0)
        } else {
            DEFAULT_SCENARIO_SPREAD
        };
        Self {
            optimistic: current_exposure - reduction * (1.0 + spread),
            baseline: current_exposure - reduction,
            pessimistic: current_exposure - reduction * (1.0 - spread),
        }
    }

    pub fn value(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Optimistic => self.optimistic,
            Scenario::Baseline => self.baseline,
            Scenario::Pessimistic => self.pessimistic,
        }
    }
}
