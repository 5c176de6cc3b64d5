pub mod constraints;
pub mod greedy;
pub mod scenario;
pub mod schedule;

use serde::{Deserialize, Serialize};

use crate::catalog::CandidateFix;

pub use constraints::ConstraintSet;
pub use greedy::{optimize, ranked_candidates};
pub use scenario::{ExposureBand, Scenario, ScenarioParseError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Baseline {
    pub current_score: f64,
    pub current_exposure: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            current_score: 648.0,
            current_exposure: 4_200_000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCandidate {
    pub fix: CandidateFix,
    pub sort_key: f64,
    pub hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekPlan {
    pub week: u32,
    pub fixes: Vec<CandidateFix>,
    pub cumulative_score: f64,
    pub cumulative_exposure: f64,
}

impl WeekPlan {
    pub fn cost(&self) -> f64 {
        self.fixes.iter().map(|f| f.estimated_cost).sum()
    }

    pub fn hours(&self) -> u64 {
        self.fixes.iter().map(|f| u64::from(f.hours())).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationResult {
    pub fixes: Vec<CandidateFix>,
    pub projected_score: f64,
    pub projected_exposure: f64,
    pub total_cost: f64,
    pub total_roi: f64,
    pub total_hours: u64,
    pub weekly_breakdown: Vec<WeekPlan>,
}

impl OptimizationResult {
    pub fn empty(baseline: &Baseline) -> Self {
        Self {
            fixes: Vec::new(),
            projected_score: baseline.current_score,
            projected_exposure: baseline.current_exposure,
            total_cost: 0.0,
            total_roi: 0.0,
            total_hours: 0,
            weekly_breakdown: Vec::new(),
        }
    }

    pub fn total_exposure_reduction(&self) -> f64 {
        self.fixes.iter().map(|f| f.exposure_reduction).sum()
    }

    pub fn total_point_gain(&self) -> f64 {
        self.fixes.iter().map(|f| f.point_gain).sum()
    }

    pub fn roi_summary(&self) -> RoiSummary {
        let total_exposure_reduction = self.total_exposure_reduction();
        RoiSummary {
            total_cost: self.total_cost,
            total_exposure_reduction,
            total_roi: self.total_roi,
            net_benefit: total_exposure_reduction - self.total_cost,
            score_gain: self.total_point_gain(),
        }
    }

    pub fn exposure_band(&self, baseline: &Baseline, spread: f64) -> ExposureBand {
        ExposureBand::project(
            baseline.current_exposure,
            self.total_exposure_reduction(),
            spread,
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoiSummary {
    pub total_cost: f64,
    pub total_exposure_reduction: f64,
    pub total_roi: f64,
    pub net_benefit: f64,
    pub score_gain: f64,
}
