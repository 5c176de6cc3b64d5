use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Hours assumed for a fix whose effort string carries no leading hour count.
pub const DEFAULT_FIX_HOURS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown difficulty: {0}")]
pub struct DifficultyParseError(pub String);

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "easy" => Ok(Self::Low),
            "medium" | "moderate" => Ok(Self::Medium),
            "high" | "hard" => Ok(Self::High),
            _ => Err(DifficultyParseError(s.to_string())),
        }
    }
}

// Catalog documents spell difficulty as display labels ("Low"), so serde goes
// through FromStr/Display instead of a derived snake_case representation.
impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateFix {
    pub checkpoint_id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub time_estimate: String,
    pub estimated_cost: f64,
    pub point_gain: f64,
    pub exposure_reduction: f64,
    pub roi: f64,
}

impl CandidateFix {
    pub fn new(checkpoint_id: &str, name: &str) -> Self {
        Self {
            checkpoint_id: checkpoint_id.to_string(),
            name: name.to_string(),
            difficulty: Difficulty::Medium,
            time_estimate: format!("{DEFAULT_FIX_HOURS} hours"),
            estimated_cost: 0.0,
            point_gain: 0.0,
            exposure_reduction: 0.0,
            roi: 0.0,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_time_estimate(mut self, time_estimate: &str) -> Self {
        self.time_estimate = time_estimate.to_string();
        self
    }

    pub fn with_cost(mut self, estimated_cost: f64) -> Self {
        self.estimated_cost = estimated_cost;
        self
    }

    pub fn with_gain(mut self, point_gain: f64, exposure_reduction: f64) -> Self {
        self.point_gain = point_gain;
        self.exposure_reduction = exposure_reduction;
        self
    }

    pub fn with_roi(mut self, roi: f64) -> Self {
        self.roi = roi;
        self
    }

    pub fn hours(&self) -> u32 {
        parse_hours(&self.time_estimate)
    }
}

/// Reads the leading integer of an effort string such as `"8 hours"` or
/// `"120h"`. Anything without leading digits counts as [`DEFAULT_FIX_HOURS`];
/// counts too large for `u32` saturate so they still fail the hours limit.
pub fn parse_hours(time_estimate: &str) -> u32 {
    let digits: String = time_estimate
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return DEFAULT_FIX_HOURS;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}
