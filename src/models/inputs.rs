use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SkillLevel;

/// Rejected user input
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be between 0 and 100")]
    SliderOutOfRange { field: &'static str },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Minimize cost for a target duration
    Cost,
    /// Maximize duration for a fixed budget
    Duration,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioNeed {
    None,
    Basic,
    Advanced,
}

/// Cost and time of producing the same footage without generation tools
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TraditionalBaseline {
    pub cost_usd: f64,
    pub time_days: f64,
}

/// One recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationInputs {
    pub mode: CalculationMode,
    pub deadline_days: f64,
    /// Target minutes of video, used in cost mode
    #[serde(default)]
    pub duration_min: f64,
    /// Available budget, checked in cost mode and spent in duration mode
    pub budget_usd: f64,
    /// 0 favours cost, 100 favours quality
    pub cost_quality: f64,
    /// 0 favours cost, 100 favours throughput
    pub speed_cost: f64,
    pub audio_need: AudioNeed,
    pub expertise: SkillLevel,
    /// Present when the user wants an ROI comparison
    #[serde(default)]
    pub comparison: Option<TraditionalBaseline>,
}

impl RecommendationInputs {
    /// Checks ranges before the engine runs
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite("deadline_days", self.deadline_days)?;
        if self.deadline_days <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: "deadline_days",
            });
        }

        require_non_negative("duration_min", self.duration_min)?;
        require_non_negative("budget_usd", self.budget_usd)?;
        require_slider("cost_quality", self.cost_quality)?;
        require_slider("speed_cost", self.speed_cost)?;

        if let Some(baseline) = &self.comparison {
            require_non_negative("comparison.cost_usd", baseline.cost_usd)?;
            require_non_negative("comparison.time_days", baseline.time_days)?;
        }

        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

fn require_slider(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::SliderOutOfRange { field });
    }
    Ok(())
}
