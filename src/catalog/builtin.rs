use once_cell::sync::Lazy;

use crate::catalog::{CandidateFix, Difficulty};

pub const BUILTIN_SOURCE: &str = "builtin:metris-demo";

pub static BUILTIN_FIXES: Lazy<Vec<CandidateFix>> = Lazy::new(|| {
    vec![
        CandidateFix::new("GOV-001", "Publish model inventory register")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("8 hours")
            .with_cost(10_000.0)
            .with_gain(45.0, 1_200_000.0)
            .with_roi(120.0),
        CandidateFix::new("SEC-014", "Rotate and vault inference API keys")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("16 hours")
            .with_cost(18_000.0)
            .with_gain(22.0, 640_000.0)
            .with_roi(35.6),
        CandidateFix::new("RISK-007", "Bias testing on credit scoring model")
            .with_difficulty(Difficulty::High)
            .with_time_estimate("80 hours")
            .with_cost(500_000.0)
            .with_gain(38.0, 890_000.0)
            .with_roi(89.0),
        CandidateFix::new("DATA-021", "Data lineage for training pipelines")
            .with_difficulty(Difficulty::Medium)
            .with_time_estimate("60 hours")
            .with_cost(95_000.0)
            .with_gain(30.0, 720_000.0)
            .with_roi(7.6),
        CandidateFix::new("TRANS-003", "Model cards for customer-facing models")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("24 hours")
            .with_cost(30_000.0)
            .with_gain(18.0, 310_000.0)
            .with_roi(10.3),
        CandidateFix::new("HUM-010", "Human review gate for automated denials")
            .with_difficulty(Difficulty::Medium)
            .with_time_estimate("40 hours")
            .with_cost(120_000.0)
            .with_gain(27.0, 980_000.0)
            .with_roi(8.2),
        CandidateFix::new("MON-005", "Drift monitoring with alert thresholds")
            .with_difficulty(Difficulty::Medium)
            .with_time_estimate("48 hours")
            .with_cost(85_000.0)
            .with_gain(24.0, 560_000.0)
            .with_roi(6.6),
        CandidateFix::new("VEND-002", "Third-party model vendor assessment")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("12 hours")
            .with_cost(15_000.0)
            .with_gain(12.0, 260_000.0)
            .with_roi(17.3),
        CandidateFix::new("PRIV-018", "PII minimisation in prompt logs")
            .with_difficulty(Difficulty::High)
            .with_time_estimate("120 hours")
            .with_cost(260_000.0)
            .with_gain(33.0, 1_050_000.0)
            .with_roi(4.0),
        CandidateFix::new("INC-004", "AI incident response runbook")
            .with_difficulty(Difficulty::Low)
            .with_time_estimate("20 hours")
            .with_cost(22_000.0)
            .with_gain(15.0, 420_000.0)
            .with_roi(19.1),
        CandidateFix::new("EXPL-011", "Explainability reports for adverse actions")
            .with_difficulty(Difficulty::High)
            .with_time_estimate("160 hours")
            .with_cost(340_000.0)
            .with_gain(36.0, 1_150_000.0)
            .with_roi(3.4),
        CandidateFix::new("ACC-009", "Role-based access to model registry")
            .with_difficulty(Difficulty::Medium)
            .with_time_estimate("about two weeks")
            .with_cost(40_000.0)
            .with_gain(14.0, 300_000.0)
            .with_roi(7.5),
    ]
});
