use crate::models::{GenerationOption, Plan, Platform};
use crate::services::tables::QualityTables;

/// Rates the output quality of an option on a 0–10 scale
pub struct QualityScorer<'a> {
    tables: &'a QualityTables,
}

impl<'a> QualityScorer<'a> {
    pub fn new(tables: &'a QualityTables) -> Self {
        Self { tables }
    }

    /// Resolution base plus audio, plan tier, feature and reputation bonuses
    ///
    /// Clamped to the ceiling only; an emerging platform on a free tier can go
    /// below its resolution base.
    pub fn score(&self, option: &GenerationOption, plan: &Plan, platform: &Platform) -> f64 {
        let mut score = self.tables.resolution.base(option.resolution);

        if option.audio {
            score += self.tables.audio_bonus;
        }

        score += self.tables.plan_tier.bonus(plan.tier);
        score += option
            .features
            .iter()
            .map(|feature| self.tables.features.bonus(*feature))
            .sum::<f64>();
        score += self.tables.reputation.bonus(platform.reputation);

        score.min(self.tables.ceiling)
    }
}
