use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::optimizer::Baseline;
use crate::simulation::{SimulatedFix, SimulationMode};

/// Dashboard overlay state. Owned by a session and mutated only through the
/// action methods below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimulationStore {
    mode: SimulationMode,
    fixes: Vec<SimulatedFix>,
    banner: Option<String>,
    applied_at: Option<DateTime<Utc>>,
}

impl SimulationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn fixes(&self) -> &[SimulatedFix] {
        &self.fixes
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        self.applied_at
    }

    /// Appends simulated fixes, skipping checkpoints already present.
    pub fn apply_simulation(&mut self, fixes: &[SimulatedFix]) {
        for fix in fixes {
            if self
                .fixes
                .iter()
                .any(|existing| existing.checkpoint_id == fix.checkpoint_id)
            {
                continue;
            }
            self.fixes.push(fix.clone());
        }
        self.applied_at = Some(Utc::now());
    }

    pub fn clear_simulation(&mut self) {
        self.fixes.clear();
        self.applied_at = None;
    }

    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.mode = mode;
    }

    pub fn set_banner(&mut self, banner: Option<String>) {
        self.banner = banner;
    }

    /// Score the dashboard should render for the active mode.
    pub fn displayed_score(&self, baseline: &Baseline) -> f64 {
        match self.mode {
            SimulationMode::Current => baseline.current_score,
            SimulationMode::Projected => {
                baseline.current_score + self.fixes.iter().map(|f| f.point_gain).sum::<f64>()
            }
        }
    }

    /// Exposure the dashboard should render for the active mode.
    pub fn displayed_exposure(&self, baseline: &Baseline) -> f64 {
        match self.mode {
            SimulationMode::Current => baseline.current_exposure,
            SimulationMode::Projected => {
                baseline.current_exposure
                    - self.fixes.iter().map(|f| f.exposure_reduction).sum::<f64>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationStore;
    use crate::optimizer::Baseline;
    use crate::simulation::{FixStatus, SimulatedFix, SimulationMode};

    fn simulated(id: &str, gain: f64) -> SimulatedFix {
        SimulatedFix {
            checkpoint_id: id.to_string(),
            status: FixStatus::Pending,
            point_gain: gain,
            exposure_reduction: gain * 1_000.0,
        }
    }

    #[test]
    fn apply_skips_checkpoints_already_simulated() {
        let mut store = SimulationStore::new();
        store.apply_simulation(&[simulated("A", 1.0), simulated("B", 2.0)]);
        store.apply_simulation(&[simulated("A", 9.0)]);
        assert_eq!(store.fixes().len(), 2);
        assert_eq!(store.fixes()[0].point_gain, 1.0);
        assert!(store.applied_at().is_some());
    }

    #[test]
    fn displayed_figures_follow_mode() {
        let baseline = Baseline {
            current_score: 600.0,
            current_exposure: 50_000.0,
        };
        let mut store = SimulationStore::new();
        store.apply_simulation(&[simulated("A", 10.0)]);
        assert_eq!(store.displayed_score(&baseline), 600.0);

        store.set_mode(SimulationMode::Projected);
        assert_eq!(store.displayed_score(&baseline), 610.0);
        assert_eq!(store.displayed_exposure(&baseline), 40_000.0);

        store.clear_simulation();
        assert_eq!(store.displayed_score(&baseline), 600.0);
        assert!(store.applied_at().is_none());
    }
}
