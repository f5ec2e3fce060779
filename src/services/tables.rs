//! Tunable constants behind the quality and composite scores
//!
//! Every table has a built-in default. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{AudioNeed, Feature, PlanTier, Reputation, Resolution, SkillLevel};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringTables {
    pub quality: QualityTables,
    pub expertise: ExpertiseMatrix,
    pub audio: AudioPreference,
    pub composite: CompositeWeights,
}

impl ScoringTables {
    /// Loads an override document from disk
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring tables {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid scoring tables {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityTables {
    pub resolution: ResolutionScores,
    pub audio_bonus: f64,
    pub plan_tier: PlanTierBonuses,
    pub features: FeatureBonuses,
    pub reputation: ReputationBonuses,
    /// Upper clamp for the final rating
    pub ceiling: f64,
}

impl Default for QualityTables {
    fn default() -> Self {
        Self {
            resolution: ResolutionScores::default(),
            audio_bonus: 0.5,
            plan_tier: PlanTierBonuses::default(),
            features: FeatureBonuses::default(),
            reputation: ReputationBonuses::default(),
            ceiling: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolutionScores {
    pub hd720: f64,
    pub hd1080: f64,
    pub hd1080_plus: f64,
    pub uhd4k: f64,
    pub unknown: f64,
}

impl Default for ResolutionScores {
    fn default() -> Self {
        Self {
            hd720: 7.0,
            hd1080: 8.0,
            hd1080_plus: 9.0,
            uhd4k: 10.0,
            unknown: 6.0,
        }
    }
}

impl ResolutionScores {
    pub fn base(&self, resolution: Resolution) -> f64 {
        match resolution {
            Resolution::Hd720 => self.hd720,
            Resolution::Hd1080 => self.hd1080,
            Resolution::Hd1080Plus => self.hd1080_plus,
            Resolution::Uhd4k => self.uhd4k,
            Resolution::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanTierBonuses {
    pub free: f64,
    pub starter: f64,
    pub standard: f64,
    pub pro: f64,
    pub enterprise: f64,
}

impl Default for PlanTierBonuses {
    fn default() -> Self {
        Self {
            free: 0.0,
            starter: 0.5,
            standard: 1.0,
            pro: 1.5,
            enterprise: 2.0,
        }
    }
}

impl PlanTierBonuses {
    pub fn bonus(&self, tier: PlanTier) -> f64 {
        match tier {
            PlanTier::Free => self.free,
            PlanTier::Starter => self.starter,
            PlanTier::Standard => self.standard,
            PlanTier::Pro => self.pro,
            PlanTier::Enterprise => self.enterprise,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureBonuses {
    pub motion_brush: f64,
    pub keyframe_editor: f64,
    pub storyboard_export: f64,
    pub audio_video_sync: f64,
}

impl Default for FeatureBonuses {
    fn default() -> Self {
        Self {
            motion_brush: 0.0,
            keyframe_editor: 0.5,
            storyboard_export: 1.0,
            audio_video_sync: 1.0,
        }
    }
}

impl FeatureBonuses {
    pub fn bonus(&self, feature: Feature) -> f64 {
        match feature {
            Feature::MotionBrush => self.motion_brush,
            Feature::KeyframeEditor => self.keyframe_editor,
            Feature::StoryboardExport => self.storyboard_export,
            Feature::AudioVideoSync => self.audio_video_sync,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReputationBonuses {
    pub emerging: f64,
    pub established: f64,
    pub recognized: f64,
    pub leading: f64,
    pub flagship: f64,
}

impl Default for ReputationBonuses {
    fn default() -> Self {
        Self {
            emerging: -0.5,
            established: 0.0,
            recognized: 0.5,
            leading: 1.0,
            flagship: 1.5,
        }
    }
}

impl ReputationBonuses {
    pub fn bonus(&self, reputation: Reputation) -> f64 {
        match reputation {
            Reputation::Emerging => self.emerging,
            Reputation::Established => self.established,
            Reputation::Recognized => self.recognized,
            Reputation::Leading => self.leading,
            Reputation::Flagship => self.flagship,
        }
    }
}

/// One row of the expertise matrix: bonus per platform skill level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SkillRow {
    pub beginner: f64,
    pub intermediate: f64,
    pub expert: f64,
}

impl SkillRow {
    fn get(&self, level: SkillLevel) -> f64 {
        match level {
            SkillLevel::Beginner => self.beginner,
            SkillLevel::Intermediate => self.intermediate,
            SkillLevel::Expert => self.expert,
        }
    }
}

/// Bonus for how well the user's expertise matches the platform's skill level, keyed by user expertise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExpertiseMatrix {
    pub beginner: SkillRow,
    pub intermediate: SkillRow,
    pub expert: SkillRow,
}

impl Default for ExpertiseMatrix {
    fn default() -> Self {
        Self {
            beginner: SkillRow {
                beginner: 20.0,
                intermediate: 5.0,
                expert: -10.0,
            },
            intermediate: SkillRow {
                beginner: 10.0,
                intermediate: 20.0,
                expert: 5.0,
            },
            expert: SkillRow {
                beginner: 5.0,
                intermediate: 10.0,
                expert: 20.0,
            },
        }
    }
}

impl ExpertiseMatrix {
    pub fn bonus(&self, user: SkillLevel, platform: SkillLevel) -> f64 {
        let row = match user {
            SkillLevel::Beginner => &self.beginner,
            SkillLevel::Intermediate => &self.intermediate,
            SkillLevel::Expert => &self.expert,
        };
        row.get(platform)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioPreference {
    pub advanced_with_audio: f64,
    pub advanced_without_audio: f64,
    pub basic_with_audio: f64,
    pub basic_without_audio: f64,
}

impl Default for AudioPreference {
    fn default() -> Self {
        Self {
            advanced_with_audio: 15.0,
            advanced_without_audio: -25.0,
            basic_with_audio: 5.0,
            basic_without_audio: -5.0,
        }
    }
}

impl AudioPreference {
    pub fn term(&self, need: AudioNeed, has_audio: bool) -> f64 {
        match (need, has_audio) {
            (AudioNeed::None, _) => 0.0,
            (AudioNeed::Basic, true) => self.basic_with_audio,
            (AudioNeed::Basic, false) => self.basic_without_audio,
            (AudioNeed::Advanced, true) => self.advanced_with_audio,
            (AudioNeed::Advanced, false) => self.advanced_without_audio,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompositeWeights {
    /// Starting score for feasible triples
    pub feasible_base: f64,
    /// Deducted per account when more than one is needed
    pub account_penalty: f64,
    /// Points per concurrent job at full speed preference
    pub parallelism_weight: f64,
    /// Points shared between the cost and quality terms
    pub blend_points: f64,
    /// USD per second at which the cost term reaches zero
    pub cost_ceiling_per_second: f64,
    /// Cap on the duration-mode bonus
    pub duration_bonus_cap: f64,
    /// Minutes of achievable footage per bonus point
    pub minutes_per_duration_point: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            feasible_base: 50.0,
            account_penalty: 2.0,
            parallelism_weight: 0.5,
            blend_points: 15.0,
            cost_ceiling_per_second: 5.0,
            duration_bonus_cap: 20.0,
            minutes_per_duration_point: 2.0,
        }
    }
}
