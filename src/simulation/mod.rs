pub mod session;
pub mod store;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use session::PlannerSession;
pub use store::SimulationStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    #[default]
    Current,
    Projected,
}

impl Display for SimulationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Projected => write!(f, "projected"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatedFix {
    pub checkpoint_id: String,
    pub status: FixStatus,
    pub point_gain: f64,
    pub exposure_reduction: f64,
}
