use thiserror::Error;

use crate::models::{
    ApiAccess, BlockingReason, CalculationMode, Catalog, GenerationOption, Plan, Platform,
    Quantity, Recommendation, RecommendationInputs, ScoredPlatform, SkillLevel, ValidationError,
};
use crate::services::quality::QualityScorer;
use crate::services::tables::ScoringTables;
use crate::services::timing::{self, TimeEstimate, WORK_HOURS_PER_DAY};
use crate::services::{ranker, roi, units};

/// Error types for the recommendation engine
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Catalog contains no platforms")]
    EmptyCatalog,
    #[error(transparent)]
    InvalidInputs(#[from] ValidationError),
}

/// Mode-specific part of a triple's evaluation
struct ModeOutcome {
    total_cost: Quantity,
    estimate: TimeEstimate,
    achievable_minutes: f64,
    reasons: Vec<BlockingReason>,
}

/// Scores and ranks every (platform, plan, option) triple of a catalog
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    tables: &'a ScoringTables,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog, tables: &'a ScoringTables) -> Self {
        Self { catalog, tables }
    }

    /// Runs a full calculation: score, rank, then compare against the
    /// traditional baseline when one is supplied in cost mode
    pub fn recommend(&self, inputs: &RecommendationInputs) -> Result<Recommendation, EngineError> {
        inputs.validate()?;

        if self.catalog.platforms.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        let ranked = ranker::rank(self.score_all(inputs));
        let mut recommendation = Recommendation {
            mode: inputs.mode,
            ranked,
            roi: None,
        };

        let summary = match (inputs.mode, &inputs.comparison, recommendation.primary()) {
            (CalculationMode::Cost, Some(baseline), Some(primary)) => {
                Some(roi::compare(baseline, primary))
            }
            _ => None,
        };
        recommendation.roi = summary;

        let primary = recommendation.primary();
        tracing::info!(
            mode = ?inputs.mode,
            scored = recommendation.ranked.len(),
            feasible = recommendation.feasible_count(),
            primary_platform = primary.map(|p| p.platform.as_str()),
            primary_option = primary.map(|p| p.option.id.as_str()),
            "Recommendation completed"
        );

        Ok(recommendation)
    }

    /// Scores every triple in catalog order, without ranking
    pub fn score_all(&self, inputs: &RecommendationInputs) -> Vec<ScoredPlatform> {
        self.catalog
            .triples()
            .map(|(platform, plan, option)| self.score_triple(platform, plan, option, inputs))
            .collect()
    }

    fn score_triple(
        &self,
        platform: &Platform,
        plan: &Plan,
        option: &GenerationOption,
        inputs: &RecommendationInputs,
    ) -> ScoredPlatform {
        let quality_score = QualityScorer::new(&self.tables.quality).score(option, plan, platform);
        let cost_per_second = units::cost_per_second(option, plan);

        let outcome = match inputs.mode {
            CalculationMode::Cost => evaluate_cost_mode(platform, plan, option, inputs),
            CalculationMode::Duration => evaluate_duration_mode(platform, plan, option, inputs),
        };

        let feasible = match outcome.reasons.as_slice() {
            [] => true,
            [only] => only.is_deadline_pressure(),
            _ => false,
        };

        let score = self.composite_score(
            platform,
            plan,
            option,
            inputs,
            &outcome,
            feasible,
            cost_per_second,
            quality_score,
        );

        tracing::debug!(
            platform = %platform.name,
            plan = %plan.name,
            option = %option.id,
            score,
            total_cost = %outcome.total_cost,
            feasible,
            "Scored option"
        );

        ScoredPlatform {
            platform: platform.name.clone(),
            plan: plan.name.clone(),
            option: option.clone(),
            score,
            total_cost: outcome.total_cost,
            time_days: outcome.estimate.actual_days,
            cost_per_second,
            quality_score,
            feasible,
            reasons: outcome.reasons,
            accounts_needed: outcome.estimate.accounts_needed,
            api_access: platform.api_access,
            achievable_duration_min: outcome.achievable_minutes,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn composite_score(
        &self,
        platform: &Platform,
        plan: &Plan,
        option: &GenerationOption,
        inputs: &RecommendationInputs,
        outcome: &ModeOutcome,
        feasible: bool,
        cost_per_second: Quantity,
        quality_score: f64,
    ) -> f64 {
        let weights = &self.tables.composite;
        let accounts = outcome.estimate.accounts_needed;

        let mut score = if feasible { weights.feasible_base } else { 0.0 };
        if feasible && accounts > 1 {
            score -= accounts as f64 * weights.account_penalty;
        }

        score += self.tables.expertise.bonus(inputs.expertise, platform.tech_level);
        score += self.tables.audio.term(inputs.audio_need, option.audio);

        let parallelism = scoring_parallelism(plan, platform, inputs.expertise);
        score += parallelism as f64 * weights.parallelism_weight * (inputs.speed_cost / 100.0);

        let quality_weight = inputs.cost_quality / 100.0;
        let cost_term = self.cost_term(cost_per_second, plan);
        let quality_term = quality_score / 10.0 * weights.blend_points;
        score += cost_term * (1.0 - quality_weight) + quality_term * quality_weight;

        if inputs.mode == CalculationMode::Duration {
            score += (outcome.achievable_minutes / weights.minutes_per_duration_point)
                .min(weights.duration_bonus_cap);
        }

        score
    }

    /// Cost half of the cost/quality blend
    ///
    /// Free and unmetered plans get the full credit. An unbounded rate on a
    /// metered plan means the catalog could not price the option, which earns
    /// nothing.
    fn cost_term(&self, cost_per_second: Quantity, plan: &Plan) -> f64 {
        let weights = &self.tables.composite;
        match cost_per_second {
            Quantity::Finite(rate) if rate > 0.0 => {
                (1.0 - rate / weights.cost_ceiling_per_second).max(0.0) * weights.blend_points
            }
            Quantity::Finite(_) => weights.blend_points,
            Quantity::Unbounded if plan.is_unlimited() => weights.blend_points,
            Quantity::Unbounded => 0.0,
        }
    }
}

/// Concurrency credited by the speed preference
///
/// Stricter than the time estimate: only platforms with full API access count
/// their API cap.
fn scoring_parallelism(plan: &Plan, platform: &Platform, expertise: SkillLevel) -> u32 {
    match plan.api_parallel {
        Some(api_cap)
            if platform.api_access == ApiAccess::Full && expertise != SkillLevel::Beginner =>
        {
            api_cap
        }
        _ => plan.gui_parallel,
    }
}

/// Cost mode: price the requested duration and check it against budget and deadline
fn evaluate_cost_mode(
    platform: &Platform,
    plan: &Plan,
    option: &GenerationOption,
    inputs: &RecommendationInputs,
) -> ModeOutcome {
    let total_cost = units::total_cost_for_workload(option, plan, inputs.duration_min);
    let estimate = timing::estimate(
        inputs.duration_min,
        option,
        plan,
        platform,
        inputs.deadline_days,
        inputs.expertise,
    );

    let mut reasons = Vec::new();
    if estimate.needs_extra_accounts() {
        reasons.push(BlockingReason::AccountsNeeded {
            accounts: estimate.accounts_needed,
        });
    }
    if total_cost.exceeds(inputs.budget_usd) {
        reasons.push(BlockingReason::OverBudget {
            cost: total_cost,
            budget: inputs.budget_usd,
        });
    }

    ModeOutcome {
        total_cost,
        estimate,
        achievable_minutes: inputs.duration_min,
        reasons,
    }
}

/// Duration mode: spend the budget, capped by what the deadline allows
fn evaluate_duration_mode(
    platform: &Platform,
    plan: &Plan,
    option: &GenerationOption,
    inputs: &RecommendationInputs,
) -> ModeOutcome {
    let raw_minutes = units::max_seconds_for_budget(option, plan, inputs.budget_usd)
        .map(|seconds| seconds / 60.0);

    let parallelism = timing::effective_parallelism(plan, platform, inputs.expertise);
    let max_clips = inputs.deadline_days * WORK_HOURS_PER_DAY * 60.0 / plan.avg_time_per_clip_min
        * parallelism as f64;
    let max_minutes_from_time = max_clips * option.max_duration_sec / 60.0;

    let achievable_minutes = match raw_minutes {
        Quantity::Finite(minutes) => minutes.min(max_minutes_from_time),
        Quantity::Unbounded => max_minutes_from_time,
    };

    let estimate = timing::estimate(
        achievable_minutes,
        option,
        plan,
        platform,
        inputs.deadline_days,
        inputs.expertise,
    );

    let mut reasons = Vec::new();
    if estimate.needs_extra_accounts() && achievable_minutes > 0.0 {
        reasons.push(BlockingReason::ChallengingDeadline {
            accounts: estimate.accounts_needed,
        });
    }

    ModeOutcome {
        total_cost: Quantity::Finite(inputs.budget_usd),
        estimate,
        achievable_minutes,
        reasons,
    }
}
