use serde::{Deserialize, Serialize};

pub const RISK_TOLERANCE_RANGE: (f64, f64) = (0.0, 1.0);
pub const RISK_TOLERANCE_STEP: f64 = 0.01;
pub const BUDGET_RANGE: (f64, f64) = (100_000.0, 2_000_000.0);
pub const BUDGET_STEP: f64 = 10_000.0;
pub const TARGET_SCORE_RANGE: (f64, f64) = (600.0, 950.0);
pub const TARGET_SCORE_STEP: f64 = 10.0;
pub const TIMELINE_RANGE: (u32, u32) = (30, 180);
pub const TIMELINE_STEP: u32 = 7;

/// The four slider values fed to the optimizer. `optimize` takes them as-is;
/// front-ends snap user input with [`ConstraintOverrides::clamped`] first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConstraintSet {
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: f64,
    #[serde(default = "default_budget_constraint")]
    pub budget_constraint: f64,
    #[serde(default = "default_target_score")]
    pub target_score: f64,
    #[serde(default = "default_timeline")]
    pub timeline: u32,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            risk_tolerance: default_risk_tolerance(),
            budget_constraint: default_budget_constraint(),
            target_score: default_target_score(),
            timeline: default_timeline(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConstraintOverrides {
    pub risk_tolerance: Option<f64>,
    pub budget_constraint: Option<f64>,
    pub target_score: Option<f64>,
    pub timeline: Option<u32>,
}

impl ConstraintSet {
    pub fn with_overrides(mut self, overrides: ConstraintOverrides) -> Self {
        if let Some(v) = overrides.risk_tolerance {
            self.risk_tolerance = v;
        }
        if let Some(v) = overrides.budget_constraint {
            self.budget_constraint = v;
        }
        if let Some(v) = overrides.target_score {
            self.target_score = v;
        }
        if let Some(v) = overrides.timeline {
            self.timeline = v;
        }
        self
    }

    pub fn available_hours(&self) -> f64 {
        (f64::from(self.timeline) / 7.0) * 40.0
    }

    pub fn weeks_available(&self) -> u32 {
        self.timeline.div_ceil(7)
    }

    /// Pulls each value inside its slider range without snapping to the step
    /// grid, so off-grid values such as the default timeline survive.
    pub fn within_ranges(self) -> Self {
        let defaults = Self::default();
        let bound = |v: f64, (min, max): (f64, f64), fallback: f64| {
            if v.is_finite() {
                v.clamp(min, max)
            } else {
                fallback
            }
        };
        Self {
            risk_tolerance: bound(
                self.risk_tolerance,
                RISK_TOLERANCE_RANGE,
                defaults.risk_tolerance,
            ),
            budget_constraint: bound(
                self.budget_constraint,
                BUDGET_RANGE,
                defaults.budget_constraint,
            ),
            target_score: bound(self.target_score, TARGET_SCORE_RANGE, defaults.target_score),
            timeline: self.timeline.clamp(TIMELINE_RANGE.0, TIMELINE_RANGE.1),
        }
    }
}

impl ConstraintOverrides {
    /// Snaps each supplied value onto its slider range and step grid (steps
    /// counted from the range minimum). Non-finite inputs fall back to the
    /// reset default. Absent fields stay absent.
    pub fn clamped(&self) -> Self {
        let defaults = ConstraintSet::default();
        Self {
            risk_tolerance: self.risk_tolerance.map(|v| {
                snap_f64(
                    v,
                    RISK_TOLERANCE_RANGE,
                    RISK_TOLERANCE_STEP,
                    defaults.risk_tolerance,
                )
            }),
            budget_constraint: self.budget_constraint.map(|v| {
                snap_f64(v, BUDGET_RANGE, BUDGET_STEP, defaults.budget_constraint)
            }),
            target_score: self.target_score.map(|v| {
                snap_f64(
                    v,
                    TARGET_SCORE_RANGE,
                    TARGET_SCORE_STEP,
                    defaults.target_score,
                )
            }),
            timeline: self
                .timeline
                .map(|v| snap_u32(v, TIMELINE_RANGE, TIMELINE_STEP)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.risk_tolerance.is_none()
            && self.budget_constraint.is_none()
            && self.target_score.is_none()
            && self.timeline.is_none()
    }
}

fn snap_f64(value: f64, (min, max): (f64, f64), step: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    // Keep 0.57 from drifting to 0.5700000000000001.
    let precision = (1.0 / step).max(1.0);
    let round = |v: f64| (v * precision).round() / precision;

    let clamped = value.clamp(min, max);
    let steps = ((clamped - min) / step).round();
    let snapped = round(min + steps * step);
    if snapped > max {
        round(snapped - step)
    } else {
        snapped
    }
}

fn snap_u32(value: u32, (min, max): (u32, u32), step: u32) -> u32 {
    let clamped = value.clamp(min, max);
    let offset = clamped - min;
    let steps = (offset + step / 2) / step;
    let snapped = min + steps * step;
    if snapped > max {
        snapped - step
    } else {
        snapped
    }
}

fn default_risk_tolerance() -> f64 {
    0.5
}

fn default_budget_constraint() -> f64 {
    520_000.0
}

fn default_target_score() -> f64 {
    850.0
}

fn default_timeline() -> u32 {
    90
}
