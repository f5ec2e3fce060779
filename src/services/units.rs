//! Conversion of heterogeneous billing units into USD amounts
//!
//! Plans bill in credits, tokens, compute-seconds, clips or raw seconds. Every
//! function here reduces an (option, plan) pair to USD per video-second, USD
//! for a workload, or video-seconds for a budget. Catalog data gaps come back
//! as `Quantity::Unbounded` instead of aborting the calculation.

use crate::models::{CostUnit, GenerationOption, Plan, Quantity};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Relative float noise tolerated when a ratio should land on a whole number
const ROUNDING_EPSILON: f64 = 1e-9;

/// Smallest whole count covering `amount`
///
/// A value a hair above an integer (`170.0 * 1.1 / 187.0`) counts as that integer.
fn whole_count_covering(amount: f64) -> f64 {
    (amount - ROUNDING_EPSILON * amount.abs().max(1.0)).ceil()
}

/// Largest whole count fitting in `amount`
fn whole_count_within(amount: f64) -> f64 {
    (amount + ROUNDING_EPSILON * amount.abs().max(1.0)).floor()
}

/// Number of clips required to cover `target_minutes` of footage
pub fn clips_needed(target_minutes: f64, option: &GenerationOption) -> f64 {
    let clips = target_minutes * SECONDS_PER_MINUTE / option.max_duration_sec;
    whole_count_covering(clips).max(0.0)
}

/// USD per produced video-second
///
/// Unlimited and zero-quota plans have no per-unit price and report
/// `Unbounded`, as does any cost unit that cannot be priced from a quota.
pub fn cost_per_second(option: &GenerationOption, plan: &Plan) -> Quantity {
    let average = option.cost.average();

    if option.cost_unit == CostUnit::PerSecond {
        return Quantity::from_f64(average);
    }

    if plan.is_unlimited() || plan.quota == 0 {
        return Quantity::Unbounded;
    }

    let unit_price = plan.monthly_cost / plan.quota as f64;

    match option.cost_unit {
        CostUnit::Credits | CostUnit::Tokens | CostUnit::Clips => {
            Quantity::from_f64(average * unit_price / option.max_duration_sec)
        }
        CostUnit::Ratio => Quantity::from_f64(average * unit_price),
        _ => Quantity::Unbounded,
    }
}

/// USD needed to produce `target_minutes` of footage on this plan
pub fn total_cost_for_workload(
    option: &GenerationOption,
    plan: &Plan,
    target_minutes: f64,
) -> Quantity {
    if target_minutes <= 0.0 {
        return Quantity::ZERO;
    }

    let average = option.cost.average();
    let video_seconds = target_minutes * SECONDS_PER_MINUTE;

    if plan.is_unlimited() {
        return match option.cost_unit {
            CostUnit::PerSecond => Quantity::from_f64(video_seconds * average),
            // One subscription covers any volume
            _ => Quantity::from_f64(plan.monthly_cost),
        };
    }

    if plan.quota == 0 {
        return Quantity::Unbounded;
    }

    let units_needed = match option.cost_unit {
        CostUnit::Ratio => video_seconds * average,
        _ => clips_needed(target_minutes, option) * average,
    };
    let subscriptions = whole_count_covering(units_needed / plan.quota as f64);

    Quantity::from_f64(subscriptions * plan.monthly_cost)
}

/// Video-seconds that `budget` buys on this plan
///
/// Quota-based plans only count whole clips, so feeding the result back into
/// [`total_cost_for_workload`] never exceeds the budget.
pub fn max_seconds_for_budget(option: &GenerationOption, plan: &Plan, budget: f64) -> Quantity {
    if budget <= 0.0 {
        return Quantity::ZERO;
    }

    let average = option.cost.average();

    if plan.is_unlimited() {
        return match option.cost_unit {
            CostUnit::PerSecond => per_unit(budget, average),
            _ if budget >= plan.monthly_cost => Quantity::Unbounded,
            _ => Quantity::ZERO,
        };
    }

    if plan.quota == 0 {
        return Quantity::ZERO;
    }

    if plan.monthly_cost <= 0.0 {
        return Quantity::Unbounded;
    }

    let subscriptions = whole_count_within(budget / plan.monthly_cost);
    let units = subscriptions * plan.quota as f64;

    match option.cost_unit {
        CostUnit::Ratio => per_unit(units, average),
        _ => per_unit(units, average)
            .map(|clips| whole_count_within(clips) * option.max_duration_sec),
    }
}

/// How many units priced at `unit_cost` fit into `amount`
fn per_unit(amount: f64, unit_cost: f64) -> Quantity {
    if unit_cost <= 0.0 {
        Quantity::Unbounded
    } else {
        Quantity::from_f64(amount / unit_cost)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Cost, PlanTier, QuotaUnit, Resolution};

    pub fn option(cost_unit: CostUnit, cost: Cost, max_duration_sec: f64) -> GenerationOption {
        GenerationOption {
            id: "test-model".to_string(),
            name: "Test Model".to_string(),
            max_duration_sec,
            resolution: Resolution::Hd1080,
            audio: false,
            cost_unit,
            cost,
            features: vec![],
        }
    }

    pub fn plan(monthly_cost: f64, quota: u64, quota_unit: QuotaUnit) -> Plan {
        Plan {
            name: "Standard".to_string(),
            tier: PlanTier::Standard,
            monthly_cost,
            quota,
            quota_unit,
            gui_parallel: 2,
            api_parallel: None,
            avg_time_per_clip_min: 4.0,
            options: vec![],
        }
    }

    #[test]
    fn test_per_second_cost_is_the_average() {
        let option = option(CostUnit::PerSecond, Cost::Range([0.25, 0.75]), 8.0);
        let plan = plan(0.0, 0, QuotaUnit::Unlimited);
        assert_eq!(cost_per_second(&option, &plan), Quantity::Finite(0.5));
    }

    #[test]
    fn test_credit_cost_per_second() {
        // $10 / 660 credits, 10 credits per 5 second clip
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(10.0, 660, QuotaUnit::Credits);
        let cps = cost_per_second(&option, &plan).finite().unwrap();
        assert!((cps - 10.0 * (10.0 / 660.0) / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_cost_per_second_ignores_clip_length() {
        let option = option(CostUnit::Ratio, Cost::Range([40.0, 60.0]), 5.0);
        let plan = plan(100.0, 36_000, QuotaUnit::ComputeSeconds);
        let cps = cost_per_second(&option, &plan).finite().unwrap();
        assert!((cps - 50.0 * (100.0 / 36_000.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unmetered_and_malformed_plans_are_unbounded() {
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        assert!(cost_per_second(&option, &plan(48.0, 0, QuotaUnit::Unlimited)).is_unbounded());
        assert!(cost_per_second(&option, &plan(10.0, 0, QuotaUnit::Credits)).is_unbounded());
    }

    #[test]
    fn test_unpriceable_units_are_unbounded() {
        let plan = plan(100.0, 36_000, QuotaUnit::ComputeSeconds);
        let option_a = option(CostUnit::ComputeSecondsRatio, Cost::Fixed(30.0), 5.0);
        let option_b = option(CostUnit::Unrecognized, Cost::Fixed(30.0), 5.0);
        assert!(cost_per_second(&option_a, &plan).is_unbounded());
        assert!(cost_per_second(&option_b, &plan).is_unbounded());
    }

    #[test]
    fn test_workload_cost_with_credits() {
        // 10 minutes at 5 s per clip = 120 clips, 1200 credits, 2 subscriptions
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(10.0, 660, QuotaUnit::Credits);
        assert_eq!(clips_needed(10.0, &option), 120.0);
        assert_eq!(total_cost_for_workload(&option, &plan, 10.0), Quantity::Finite(20.0));
    }

    #[test]
    fn test_workload_cost_with_ratio() {
        // 2 minutes = 120 video-seconds * 50 compute-seconds = 6000, fits one pack
        let option = option(CostUnit::Ratio, Cost::Range([40.0, 60.0]), 5.0);
        let plan = plan(100.0, 36_000, QuotaUnit::ComputeSeconds);
        assert_eq!(total_cost_for_workload(&option, &plan, 2.0), Quantity::Finite(100.0));

        // 7 minutes = 21000 compute-seconds, still one pack; 13 minutes needs two
        assert_eq!(total_cost_for_workload(&option, &plan, 7.0), Quantity::Finite(100.0));
        assert_eq!(total_cost_for_workload(&option, &plan, 13.0), Quantity::Finite(200.0));
    }

    #[test]
    fn test_workload_cost_on_unlimited_plans() {
        let unlimited = plan(48.0, 0, QuotaUnit::Unlimited);
        let flat = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        assert_eq!(total_cost_for_workload(&flat, &unlimited, 500.0), Quantity::Finite(48.0));

        let pay_as_you_go = plan(0.0, 0, QuotaUnit::Unlimited);
        let metered = option(CostUnit::PerSecond, Cost::Fixed(0.5), 8.0);
        assert_eq!(
            total_cost_for_workload(&metered, &pay_as_you_go, 2.0),
            Quantity::Finite(60.0)
        );
    }

    #[test]
    fn test_workload_cost_on_malformed_plan() {
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(10.0, 0, QuotaUnit::Credits);
        assert!(total_cost_for_workload(&option, &plan, 1.0).is_unbounded());
    }

    #[test]
    fn test_zero_workload_costs_nothing() {
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(48.0, 0, QuotaUnit::Unlimited);
        assert_eq!(total_cost_for_workload(&option, &plan, 0.0), Quantity::ZERO);
    }

    #[test]
    fn test_budget_on_unlimited_flat_plan() {
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(48.0, 0, QuotaUnit::Unlimited);
        assert!(max_seconds_for_budget(&option, &plan, 48.0).is_unbounded());
        assert_eq!(max_seconds_for_budget(&option, &plan, 47.99), Quantity::ZERO);
    }

    #[test]
    fn test_budget_on_per_second_plan() {
        let option = option(CostUnit::PerSecond, Cost::Fixed(0.5), 8.0);
        let plan = plan(0.0, 0, QuotaUnit::Unlimited);
        assert_eq!(max_seconds_for_budget(&option, &plan, 30.0), Quantity::Finite(60.0));
    }

    #[test]
    fn test_budget_on_credit_plan() {
        // $25 buys two $10 packs = 1320 credits = 132 clips of 5 s
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(10.0, 660, QuotaUnit::Credits);
        assert_eq!(max_seconds_for_budget(&option, &plan, 25.0), Quantity::Finite(660.0));
    }

    #[test]
    fn test_budget_on_ratio_plan() {
        let option = option(CostUnit::Ratio, Cost::Fixed(50.0), 5.0);
        let plan = plan(100.0, 36_000, QuotaUnit::ComputeSeconds);
        assert_eq!(max_seconds_for_budget(&option, &plan, 250.0), Quantity::Finite(1440.0));
    }

    #[test]
    fn test_budget_edge_cases() {
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        assert_eq!(
            max_seconds_for_budget(&option, &plan(10.0, 660, QuotaUnit::Credits), 0.0),
            Quantity::ZERO
        );
        assert_eq!(
            max_seconds_for_budget(&option, &plan(10.0, 0, QuotaUnit::Credits), 100.0),
            Quantity::ZERO
        );
        assert!(max_seconds_for_budget(&option, &plan(0.0, 660, QuotaUnit::Credits), 1.0)
            .is_unbounded());
    }

    #[test]
    fn test_budget_duration_feeds_back_within_budget() {
        let cases = [
            (Cost::Fixed(10.0), 5.0, 10.0, 660, 25.0),
            (Cost::Fixed(7.0), 4.0, 10.0, 660, 99.0),
            (Cost::Range([20.0, 45.0]), 10.0, 35.0, 2300, 150.0),
            (Cost::Fixed(160.0), 5.0, 29.99, 10_000, 61.0),
            // 170 * 1.1 lands just above the 187-credit quota in floating point
            (Cost::Fixed(1.1), 5.0, 10.0, 187, 10.0),
            (Cost::Fixed(1.1), 5.0, 10.0, 121, 30.0),
        ];

        for (cost, clip_len, monthly, quota, budget) in cases {
            let option = option(CostUnit::Credits, cost, clip_len);
            let plan = plan(monthly, quota, QuotaUnit::Credits);
            let seconds = max_seconds_for_budget(&option, &plan, budget).finite().unwrap();
            let cost_back = total_cost_for_workload(&option, &plan, seconds / 60.0)
                .finite()
                .unwrap();
            assert!(
                cost_back <= budget,
                "fed back {} for budget {} ({} s)",
                cost_back,
                budget,
                seconds
            );
        }
    }

    #[test]
    fn test_exactly_filled_quota_bills_one_subscription() {
        let option = option(CostUnit::Credits, Cost::Fixed(1.1), 5.0);
        let plan = plan(10.0, 187, QuotaUnit::Credits);

        // 170 clips of 5 s use the 187 credits exactly
        let minutes = 170.0 * 5.0 / 60.0;
        assert_eq!(
            total_cost_for_workload(&option, &plan, minutes),
            Quantity::Finite(10.0)
        );
        assert_eq!(
            max_seconds_for_budget(&option, &plan, 10.0),
            Quantity::Finite(850.0)
        );
    }

    #[test]
    fn test_budget_covering_whole_subscriptions() {
        // 0.3 / 0.1 is 2.9999999999999996 in floating point
        let option = option(CostUnit::Credits, Cost::Fixed(10.0), 5.0);
        let plan = plan(0.1, 100, QuotaUnit::Credits);
        assert_eq!(
            max_seconds_for_budget(&option, &plan, 0.3),
            Quantity::Finite(150.0)
        );
    }
}
