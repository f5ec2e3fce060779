use serde::{Serialize, Serializer};
use std::fmt::Display;

pub mod catalog;
pub mod inputs;
pub mod recommendation;

pub use catalog::{
    ApiAccess, Catalog, Cost, CostUnit, Feature, GenerationOption, Plan, PlanTier, Platform,
    QuotaUnit, Reputation, Resolution, SkillLevel,
};
pub use inputs::{AudioNeed, CalculationMode, RecommendationInputs, TraditionalBaseline, ValidationError};
pub use recommendation::{BlockingReason, Recommendation, RoiSummary, Savings, ScoredPlatform};

/// An amount that may have no upper bound
///
/// Unmetered plans and catalog data gaps have no meaningful per-unit price.
/// Rather than leaking floating-point infinity through the engine, those cases
/// are carried as `Unbounded`, which orders above every finite amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Quantity {
    Finite(f64),
    Unbounded,
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Finite(0.0);

    /// Wraps a raw value, mapping infinities and NaN to `Unbounded`
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Quantity::Finite(value)
        } else {
            Quantity::Unbounded
        }
    }

    /// Returns the finite value, if any
    pub fn finite(self) -> Option<f64> {
        match self {
            Quantity::Finite(value) => Some(value),
            Quantity::Unbounded => None,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Quantity::Unbounded)
    }

    /// Returns the smaller of the two amounts
    pub fn min(self, other: Quantity) -> Quantity {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Whether this amount is strictly greater than `limit`
    pub fn exceeds(self, limit: f64) -> bool {
        match self {
            Quantity::Finite(value) => value > limit,
            Quantity::Unbounded => true,
        }
    }

    /// Applies `f` to a finite value; `Unbounded` stays unbounded
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Quantity {
        match self {
            Quantity::Finite(value) => Quantity::from_f64(f(value)),
            Quantity::Unbounded => Quantity::Unbounded,
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Finite(value) => write!(f, "{:.2}", value),
            Quantity::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Finite(value) => serializer.serialize_f64(*value),
            Quantity::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}
