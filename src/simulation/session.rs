use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::optimizer::{optimize, Baseline, ConstraintSet, OptimizationResult};
use crate::simulation::{FixStatus, SimulatedFix, SimulationMode, SimulationStore};

/// Slider state plus the overlay it drives. One session per CLI run or per
/// server process.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    catalog: Catalog,
    baseline: Baseline,
    constraints: ConstraintSet,
    store: SimulationStore,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub constraints: ConstraintSet,
    pub baseline: Baseline,
    pub mode: SimulationMode,
    pub simulated_fixes: Vec<SimulatedFix>,
    pub banner: Option<String>,
    pub displayed_score: f64,
    pub displayed_exposure: f64,
}

impl PlannerSession {
    pub fn new(catalog: Catalog, baseline: Baseline, constraints: ConstraintSet) -> Self {
        Self {
            catalog,
            baseline,
            constraints,
            store: SimulationStore::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn store(&self) -> &SimulationStore {
        &self.store
    }

    pub fn set_constraints(&mut self, constraints: ConstraintSet) {
        self.constraints = constraints;
    }

    pub fn result(&self) -> OptimizationResult {
        optimize(self.catalog.fixes(), &self.constraints, &self.baseline)
    }

    /// Replaces the overlay with the given plan and switches to projected mode.
    pub fn apply(&mut self, result: &OptimizationResult) {
        let simulated: Vec<SimulatedFix> = result
            .fixes
            .iter()
            .map(|fix| SimulatedFix {
                checkpoint_id: fix.checkpoint_id.clone(),
                status: FixStatus::Pending,
                point_gain: fix.point_gain,
                exposure_reduction: fix.exposure_reduction,
            })
            .collect();

        self.store.clear_simulation();
        self.store.set_mode(SimulationMode::Projected);
        self.store.apply_simulation(&simulated);
        self.store.set_banner(Some(format!(
            "Projected scenario: {} fixes, score {:.0}",
            simulated.len(),
            result.projected_score
        )));
        info!(
            fixes = simulated.len(),
            projected_score = result.projected_score,
            "applied remediation plan to dashboard"
        );
    }

    pub fn reset(&mut self) {
        self.constraints = ConstraintSet::default();
        self.store.clear_simulation();
        self.store.set_mode(SimulationMode::Current);
        self.store.set_banner(None);
        info!("reset planner constraints and simulation");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            constraints: self.constraints,
            baseline: self.baseline,
            mode: self.store.mode(),
            simulated_fixes: self.store.fixes().to_vec(),
            banner: self.store.banner().map(str::to_string),
            displayed_score: self.store.displayed_score(&self.baseline),
            displayed_exposure: self.store.displayed_exposure(&self.baseline),
        }
    }
}
