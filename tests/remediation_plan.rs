use std::collections::BTreeSet;

use metris_planner::catalog::{CandidateFix, Catalog, Difficulty};
use metris_planner::optimizer::{optimize, ranked_candidates, Baseline, ConstraintSet};
use metris_planner::simulation::{PlannerSession, SimulationMode};
use tokio_test::assert_ok;

fn example_catalog() -> Vec<CandidateFix> {
    vec![
        CandidateFix::new("A", "Publish model inventory")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("8 hours")
            .with_cost(10_000.0)
            .with_gain(45.0, 1_200_000.0)
            .with_roi(120.0),
        CandidateFix::new("B", "Bias testing")
            .with_difficulty(Difficulty::High)
            .with_time_estimate("80 hours")
            .with_cost(500_000.0)
            .with_gain(38.0, 890_000.0)
            .with_roi(89.0),
    ]
}

/// Deterministic pseudo-random catalog so the sweep below is reproducible.
fn generated_catalog(seed: u64, len: usize) -> Vec<CandidateFix> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % bound
    };
    (0..len)
        .map(|i| {
            let difficulty = Difficulty::ALL[next(3) as usize];
            let hours = match next(5) {
                0 => "no estimate".to_string(),
                _ => format!("{} hours", 4 + next(160)),
            };
            CandidateFix::new(&format!("CP-{seed}-{i}"), "generated")
                .with_difficulty(difficulty)
                .with_time_estimate(&hours)
                .with_cost((5 + next(400)) as f64 * 1_000.0)
                .with_gain((1 + next(50)) as f64, (next(1_500) * 1_000) as f64)
                .with_roi(next(150) as f64 / 2.0)
        })
        .collect()
}

fn constraint_grid() -> Vec<ConstraintSet> {
    let mut grid = Vec::new();
    for risk_tolerance in [0.0, 0.3, 0.5, 0.9] {
        for budget_constraint in [100_000.0, 520_000.0, 2_000_000.0] {
            for target_score in [600.0, 750.0, 950.0] {
                for timeline in [30, 90, 180] {
                    grid.push(ConstraintSet {
                        risk_tolerance,
                        budget_constraint,
                        target_score,
                        timeline,
                    });
                }
            }
        }
    }
    grid
}

#[test]
fn worked_example_selects_both_fixes() {
    let catalog = example_catalog();
    let constraints = ConstraintSet {
        risk_tolerance: 0.3,
        budget_constraint: 520_000.0,
        target_score: 700.0,
        timeline: 90,
    };
    let baseline = Baseline {
        current_score: 648.0,
        current_exposure: 3_000_000.0,
    };

    let ranked = ranked_candidates(&catalog, &constraints);
    assert_eq!(ranked[0].fix.checkpoint_id, "A");
    assert_eq!(ranked[0].sort_key, 180.0);
    assert_eq!(ranked[1].sort_key, 89.0);

    let result = optimize(&catalog, &constraints, &baseline);
    let ids: Vec<_> = result.fixes.iter().map(|f| f.checkpoint_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
    assert_eq!(result.projected_score, 731.0);
    assert_eq!(result.total_cost, 510_000.0);
    assert_eq!(result.projected_exposure, 3_000_000.0 - 2_090_000.0);
    assert!((result.total_roi - 2_090_000.0 / 510_000.0).abs() < 1e-12);
    assert_eq!(result.total_hours, 88);
}

#[test]
fn budget_hours_and_uniqueness_hold_across_sweep() {
    let baseline = Baseline {
        current_score: 620.0,
        current_exposure: 5_000_000.0,
    };
    for seed in 0..12 {
        let catalog = generated_catalog(seed, 25);
        for constraints in constraint_grid() {
            let result = optimize(&catalog, &constraints, &baseline);

            let cost: f64 = result.fixes.iter().map(|f| f.estimated_cost).sum();
            assert!(cost <= constraints.budget_constraint, "budget exceeded: {constraints:?}");

            let hours: u64 = result.fixes.iter().map(|f| u64::from(f.hours())).sum();
            assert_eq!(hours, result.total_hours);
            assert!(hours as f64 <= constraints.available_hours());

            let ids: BTreeSet<_> = result.fixes.iter().map(|f| &f.checkpoint_id).collect();
            assert_eq!(ids.len(), result.fixes.len());

            let scheduled: usize = result.weekly_breakdown.iter().map(|w| w.fixes.len()).sum();
            assert_eq!(scheduled, result.fixes.len());
            if let Some(last) = result.weekly_breakdown.last() {
                assert_eq!(last.cumulative_score, result.projected_score);
            }
        }
    }
}

#[test]
fn raising_target_never_shrinks_selection() {
    let baseline = Baseline {
        current_score: 600.0,
        current_exposure: 0.0,
    };
    for seed in 0..8 {
        let catalog = generated_catalog(seed, 30);
        let mut previous = 0usize;
        for target in (600..=950).step_by(10) {
            let constraints = ConstraintSet {
                risk_tolerance: 0.4,
                budget_constraint: 2_000_000.0,
                target_score: f64::from(target),
                timeline: 180,
            };
            let count = optimize(&catalog, &constraints, &baseline).fixes.len();
            assert!(count >= previous, "seed {seed} target {target}: {count} < {previous}");
            previous = count;
        }
    }
}

#[test]
fn conservative_tolerance_prefers_low_difficulty_on_equal_roi() {
    let catalog = vec![
        CandidateFix::new("HARD", "hard")
            .with_difficulty(Difficulty::High)
            .with_roi(20.0),
        CandidateFix::new("EASY", "easy")
            .with_difficulty(Difficulty::Low)
            .with_roi(20.0),
    ];
    let conservative = ConstraintSet {
        risk_tolerance: 0.2,
        ..ConstraintSet::default()
    };
    assert_eq!(
        ranked_candidates(&catalog, &conservative)[0].fix.checkpoint_id,
        "EASY"
    );

    let neutral = ConstraintSet::default();
    assert_eq!(
        ranked_candidates(&catalog, &neutral)[0].fix.checkpoint_id,
        "HARD"
    );
}

#[test]
fn recompute_is_identical() {
    let catalog = Catalog::builtin();
    for constraints in constraint_grid() {
        let first = optimize(catalog.fixes(), &constraints, &Baseline::default());
        let second = optimize(catalog.fixes(), &constraints, &Baseline::default());
        assert_eq!(first, second);
        assert_eq!(
            assert_ok!(serde_json::to_string(&first)),
            assert_ok!(serde_json::to_string(&second))
        );
    }
}

#[test]
fn zero_hour_budget_recommends_nothing() {
    let constraints = ConstraintSet {
        timeline: 0,
        ..ConstraintSet::default()
    };
    let baseline = Baseline::default();
    let result = optimize(Catalog::builtin().fixes(), &constraints, &baseline);
    assert!(result.fixes.is_empty());
    assert_eq!(result.projected_score, baseline.current_score);
    assert_eq!(result.total_cost, 0.0);
}

#[test]
fn reset_restores_default_sliders_and_current_mode() {
    let mut session = PlannerSession::new(
        Catalog::builtin(),
        Baseline::default(),
        ConstraintSet {
            risk_tolerance: 0.05,
            budget_constraint: 1_500_000.0,
            target_score: 920.0,
            timeline: 149,
        },
    );
    let result = session.result();
    session.apply(&result);
    assert_eq!(session.store().mode(), SimulationMode::Projected);

    session.reset();
    assert_eq!(
        *session.constraints(),
        ConstraintSet {
            risk_tolerance: 0.5,
            budget_constraint: 520_000.0,
            target_score: 850.0,
            timeline: 90,
        }
    );
    assert_eq!(session.store().mode(), SimulationMode::Current);
    assert!(session.store().fixes().is_empty());
}
