use tracing::debug;

use crate::catalog::{CandidateFix, Difficulty};
use crate::optimizer::schedule::build_weekly_breakdown;
use crate::optimizer::{Baseline, ConstraintSet, OptimizationResult, RankedCandidate};

/// Weight applied to low-difficulty fixes when the risk tolerance is conservative.
pub const CONSERVATIVE_LOW_DIFFICULTY_WEIGHT: f64 = 1.5;

pub fn sort_key(fix: &CandidateFix, constraints: &ConstraintSet) -> f64 {
    let weight = if constraints.risk_tolerance < 0.5 && fix.difficulty == Difficulty::Low {
        CONSERVATIVE_LOW_DIFFICULTY_WEIGHT
    } else {
        1.0
    };
    fix.roi * weight
}

/// Catalog ordered by descending sort key. `sort_by` is stable, so equal keys
/// keep their catalog order.
pub fn ranked_candidates(
    catalog: &[CandidateFix],
    constraints: &ConstraintSet,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = catalog
        .iter()
        .map(|fix| RankedCandidate {
            sort_key: sort_key(fix, constraints),
            hours: fix.hours(),
            fix: fix.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.sort_key.total_cmp(&a.sort_key));
    ranked
}

pub fn optimize(
    catalog: &[CandidateFix],
    constraints: &ConstraintSet,
    baseline: &Baseline,
) -> OptimizationResult {
    let available_hours = constraints.available_hours();
    let mut remaining_budget = constraints.budget_constraint;
    let mut used_hours = 0.0_f64;
    let mut running_score = baseline.current_score;
    let mut admitted = Vec::new();

    for candidate in ranked_candidates(catalog, constraints) {
        let hours = f64::from(candidate.hours);
        let fix = candidate.fix;
        if fix.estimated_cost <= remaining_budget
            && used_hours + hours <= available_hours
            && running_score < constraints.target_score
        {
            remaining_budget -= fix.estimated_cost;
            used_hours += hours;
            running_score += fix.point_gain;
            admitted.push(fix);
        }
    }

    if admitted.is_empty() {
        debug!("no fixes admitted under current constraints");
        return OptimizationResult::empty(baseline);
    }

    let weekly_breakdown =
        build_weekly_breakdown(&admitted, constraints.weeks_available(), baseline);
    let fixes: Vec<CandidateFix> = weekly_breakdown
        .iter()
        .flat_map(|week| week.fixes.iter().cloned())
        .collect();

    let total_cost: f64 = fixes.iter().map(|f| f.estimated_cost).sum();
    let total_reduction: f64 = fixes.iter().map(|f| f.exposure_reduction).sum();
    let total_gain: f64 = fixes.iter().map(|f| f.point_gain).sum();
    let total_hours: u64 = fixes.iter().map(|f| u64::from(f.hours())).sum();
    let total_roi = if total_cost > 0.0 {
        total_reduction / total_cost
    } else {
        0.0
    };

    debug!(
        selected = fixes.len(),
        total_cost,
        total_hours,
        weeks = weekly_breakdown.len(),
        "optimized remediation plan"
    );

    OptimizationResult {
        projected_score: baseline.current_score + total_gain,
        projected_exposure: baseline.current_exposure - total_reduction,
        total_cost,
        total_roi,
        total_hours,
        weekly_breakdown,
        fixes,
    }
}
