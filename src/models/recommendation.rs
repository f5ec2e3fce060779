use serde::{Serialize, Serializer};
use std::fmt::Display;

use super::{ApiAccess, CalculationMode, GenerationOption, Quantity};

/// Why a triple does not fully satisfy the user's constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockingReason {
    /// Cost mode: one account cannot finish before the deadline
    AccountsNeeded { accounts: u32 },
    /// Duration mode: the achievable workload still needs extra accounts
    ChallengingDeadline { accounts: u32 },
    OverBudget { cost: Quantity, budget: f64 },
}

impl BlockingReason {
    /// Deadline pressure is tolerated on its own; more accounts can be opened
    pub fn is_deadline_pressure(&self) -> bool {
        matches!(
            self,
            BlockingReason::AccountsNeeded { .. } | BlockingReason::ChallengingDeadline { .. }
        )
    }
}

impl Display for BlockingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockingReason::AccountsNeeded { accounts } => {
                write!(f, "Needs {} parallel accounts to meet the deadline", accounts)
            }
            BlockingReason::ChallengingDeadline { accounts } => {
                write!(f, "Challenging deadline: needs {} parallel accounts", accounts)
            }
            BlockingReason::OverBudget {
                cost: Quantity::Finite(cost),
                budget,
            } => write!(f, "Over budget: ${:.2} needed, ${:.2} available", cost, budget),
            BlockingReason::OverBudget {
                cost: Quantity::Unbounded,
                budget,
            } => write!(f, "Over budget: cost is unbounded, ${:.2} available", budget),
        }
    }
}

impl Serialize for BlockingReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One scored (platform, plan, option) triple
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredPlatform {
    pub platform: String,
    pub plan: String,
    pub option: GenerationOption,
    /// Composite score, only meaningful relative to other entries
    pub score: f64,
    pub total_cost: Quantity,
    /// Machine time in days once the work is split across `accounts_needed`
    pub time_days: f64,
    pub cost_per_second: Quantity,
    pub quality_score: f64,
    pub feasible: bool,
    pub reasons: Vec<BlockingReason>,
    pub accounts_needed: u32,
    pub api_access: ApiAccess,
    pub achievable_duration_min: f64,
}

/// Signed saving relative to a traditional baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Savings {
    Percent(f64),
    /// The baseline is zero and the recommendation costs more
    UnboundedLoss,
}

impl Serialize for Savings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Savings::Percent(value) => serializer.serialize_f64(*value),
            Savings::UnboundedLoss => serializer.serialize_str("unbounded_loss"),
        }
    }
}

/// Comparison of the primary recommendation against a traditional workflow
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoiSummary {
    /// Traditional cost minus recommended cost; `None` when the recommended cost is unbounded
    pub cost_difference: Option<f64>,
    pub cost_savings: Savings,
    /// Traditional days minus recommended machine days
    pub time_difference: f64,
    pub time_savings: Savings,
}

/// Output of one engine run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub mode: CalculationMode,
    /// Feasible entries first, then by descending score
    pub ranked: Vec<ScoredPlatform>,
    pub roi: Option<RoiSummary>,
}

impl Recommendation {
    /// First feasible entry, or the best infeasible one when nothing fits
    pub fn primary(&self) -> Option<&ScoredPlatform> {
        self.ranked
            .iter()
            .find(|entry| entry.feasible)
            .or_else(|| self.ranked.first())
    }

    pub fn feasible_count(&self) -> usize {
        self.ranked.iter().filter(|entry| entry.feasible).count()
    }
}
