use crate::catalog::CandidateFix;
use crate::optimizer::{Baseline, WeekPlan};

/// Splits the admitted fixes, in admission order, into at most `weeks` buckets
/// of `ceil(len / weeks)` fixes. The last bucket may be short; no empty
/// buckets are emitted. Cumulative totals run from the external baseline.
pub fn build_weekly_breakdown(
    selected: &[CandidateFix],
    weeks: u32,
    baseline: &Baseline,
) -> Vec<WeekPlan> {
    if selected.is_empty() || weeks == 0 {
        return Vec::new();
    }

    let per_week = selected.len().div_ceil(weeks as usize);
    let mut plans = Vec::new();
    let mut cursor = 0usize;
    let mut cumulative_score = baseline.current_score;
    let mut cumulative_exposure = baseline.current_exposure;

    for week in 1..=weeks {
        if cursor >= selected.len() {
            break;
        }
        let end = (cursor + per_week).min(selected.len());
        let bucket = &selected[cursor..end];
        cursor = end;

        for fix in bucket {
            cumulative_score += fix.point_gain;
            cumulative_exposure -= fix.exposure_reduction;
        }
        plans.push(WeekPlan {
            week,
            fixes: bucket.to_vec(),
            cumulative_score,
            cumulative_exposure,
        });
    }

    plans
}
