use crate::models::{Quantity, RoiSummary, Savings, ScoredPlatform, TraditionalBaseline};

/// Compares a recommendation with producing the same footage traditionally
pub fn compare(baseline: &TraditionalBaseline, recommendation: &ScoredPlatform) -> RoiSummary {
    let (cost_difference, cost_savings) = match recommendation.total_cost {
        Quantity::Finite(cost) => {
            let difference = baseline.cost_usd - cost;
            (Some(difference), savings(baseline.cost_usd, difference))
        }
        Quantity::Unbounded => (None, Savings::UnboundedLoss),
    };

    let time_difference = baseline.time_days - recommendation.time_days;

    RoiSummary {
        cost_difference,
        cost_savings,
        time_difference,
        time_savings: savings(baseline.time_days, time_difference),
    }
}

/// Percentage of `baseline` saved; a zero baseline cannot express a loss as a percentage
fn savings(baseline: f64, difference: f64) -> Savings {
    if baseline == 0.0 {
        if difference < 0.0 {
            Savings::UnboundedLoss
        } else {
            Savings::Percent(0.0)
        }
    } else {
        Savings::Percent(difference / baseline * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiAccess, Cost, CostUnit};
    use crate::services::units::tests::option;

    fn recommendation(total_cost: Quantity, time_days: f64) -> ScoredPlatform {
        ScoredPlatform {
            platform: "Kestrel".to_string(),
            plan: "Standard".to_string(),
            option: option(CostUnit::Credits, Cost::Fixed(10.0), 5.0),
            score: 80.0,
            total_cost,
            time_days,
            cost_per_second: Quantity::Finite(0.03),
            quality_score: 9.0,
            feasible: true,
            reasons: vec![],
            accounts_needed: 1,
            api_access: ApiAccess::None,
            achievable_duration_min: 10.0,
        }
    }

    #[test]
    fn test_savings_against_baseline() {
        let baseline = TraditionalBaseline {
            cost_usd: 200.0,
            time_days: 10.0,
        };
        let summary = compare(&baseline, &recommendation(Quantity::Finite(50.0), 2.5));

        assert_eq!(summary.cost_difference, Some(150.0));
        assert_eq!(summary.cost_savings, Savings::Percent(75.0));
        assert_eq!(summary.time_difference, 7.5);
        assert_eq!(summary.time_savings, Savings::Percent(75.0));
    }

    #[test]
    fn test_negative_savings() {
        let baseline = TraditionalBaseline {
            cost_usd: 40.0,
            time_days: 1.0,
        };
        let summary = compare(&baseline, &recommendation(Quantity::Finite(50.0), 2.0));

        assert_eq!(summary.cost_savings, Savings::Percent(-25.0));
        assert_eq!(summary.time_savings, Savings::Percent(-100.0));
    }

    #[test]
    fn test_zero_baseline() {
        let baseline = TraditionalBaseline {
            cost_usd: 0.0,
            time_days: 0.0,
        };
        let summary = compare(&baseline, &recommendation(Quantity::Finite(20.0), 0.0));

        assert_eq!(summary.cost_savings, Savings::UnboundedLoss);
        assert_eq!(summary.time_savings, Savings::Percent(0.0));
    }

    #[test]
    fn test_unbounded_cost() {
        let baseline = TraditionalBaseline {
            cost_usd: 500.0,
            time_days: 3.0,
        };
        let summary = compare(&baseline, &recommendation(Quantity::Unbounded, 1.0));

        assert_eq!(summary.cost_difference, None);
        assert_eq!(summary.cost_savings, Savings::UnboundedLoss);
    }
}
