//! Data-driven difficulty tuning
//!
//! Defaults reproduce the shipped curve. A JSON document may override any
//! subset of fields; everything else keeps its default.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty curve and spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Asteroid spawn delay never drops below this (ms)
    pub asteroid_delay_floor_ms: f64,
    /// Asymptote of the decaying delay (ms)
    pub asteroid_delay_base_ms: f64,
    /// Extra delay at t=0 on top of the base (ms)
    pub asteroid_delay_range_ms: f64,
    /// Decay time constant of the extra delay (s)
    pub asteroid_delay_decay_secs: f64,
    /// Width of one difficulty stage (s)
    pub stage_secs: f64,
    /// First stage that may roll large asteroids
    pub large_asteroid_min_stage: u32,
    /// Large-asteroid probability per stage, starting at `large_asteroid_min_stage`.
    /// The last entry applies to every later stage.
    pub large_asteroid_chances: Vec<f64>,
    /// Live asteroid cap
    pub max_asteroids: usize,
    /// Power-up spawn delay range [min, max) (ms)
    pub power_up_delay_min_ms: f64,
    pub power_up_delay_max_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            asteroid_delay_floor_ms: 250.0,
            asteroid_delay_base_ms: 250.0,
            asteroid_delay_range_ms: 950.0,
            asteroid_delay_decay_secs: 120.0,
            stage_secs: 30.0,
            large_asteroid_min_stage: 3,
            large_asteroid_chances: vec![0.25, 0.40, 0.50],
            max_asteroids: 70,
            power_up_delay_min_ms: 20_000.0,
            power_up_delay_max_ms: 30_000.0,
        }
    }
}

/// Rejected tuning document
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for this schema
    Parse(serde_json::Error),
    /// A field is outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "tuning field '{}' invalid: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(self.asteroid_delay_floor_ms > 0.0) {
            return invalid("asteroid_delay_floor_ms", "must be positive");
        }
        if !(self.asteroid_delay_base_ms >= 0.0) {
            return invalid("asteroid_delay_base_ms", "must not be negative");
        }
        if !(self.asteroid_delay_range_ms >= 0.0) {
            return invalid("asteroid_delay_range_ms", "must not be negative");
        }
        if !(self.asteroid_delay_decay_secs > 0.0) {
            return invalid("asteroid_delay_decay_secs", "must be positive");
        }
        if !(self.stage_secs > 0.0) {
            return invalid("stage_secs", "must be positive");
        }
        if self.large_asteroid_chances.is_empty() {
            return invalid("large_asteroid_chances", "must not be empty");
        }
        if self
            .large_asteroid_chances
            .iter()
            .any(|p| !(0.0..=1.0).contains(p))
        {
            return invalid("large_asteroid_chances", "probabilities must be in [0, 1]");
        }
        if self.max_asteroids == 0 {
            return invalid("max_asteroids", "must be at least 1");
        }
        if !(self.power_up_delay_min_ms > 0.0 && self.power_up_delay_min_ms < self.power_up_delay_max_ms) {
            return invalid("power_up_delay_min_ms", "must be positive and below the max");
        }
        Ok(())
    }
}
