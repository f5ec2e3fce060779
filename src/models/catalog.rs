use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A versioned snapshot of every platform, plan and generation option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// Snapshot version (e.g., "2025.06")
    pub version: String,
    /// Date the prices in this snapshot were collected
    pub snapshot_date: NaiveDate,
    pub platforms: Vec<Platform>,
}

impl Catalog {
    /// Finds a platform by its unique name
    pub fn platform(&self, name: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.name == name)
    }

    /// Iterates every (platform, plan, option) triple in catalog order
    pub fn triples(&self) -> impl Iterator<Item = (&Platform, &Plan, &GenerationOption)> {
        self.platforms.iter().flat_map(|platform| {
            platform.plans.iter().flat_map(move |plan| {
                plan.options
                    .iter()
                    .map(move |option| (platform, plan, option))
            })
        })
    }

    pub fn plan_count(&self) -> usize {
        self.platforms.iter().map(|p| p.plans.len()).sum()
    }
}

/// One video-generation product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    pub name: String,
    pub api_access: ApiAccess,
    /// Lead time paid once per account before productive work starts
    pub setup_days: f64,
    /// Skill level needed to operate the platform
    pub tech_level: SkillLevel,
    pub reputation: Reputation,
    pub plans: Vec<Plan>,
}

/// A billing tier of a platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub name: String,
    pub tier: PlanTier,
    /// Monthly price in USD, 0 for pure pay-per-use
    pub monthly_cost: f64,
    /// Billing units included per month; 0 together with `QuotaUnit::Unlimited` means no ceiling
    pub quota: u64,
    pub quota_unit: QuotaUnit,
    /// Concurrent jobs allowed through the web interface
    pub gui_parallel: u32,
    /// Concurrent jobs allowed through the API, if the tier exposes one
    #[serde(default)]
    pub api_parallel: Option<u32>,
    /// Average human plus system minutes per produced clip
    pub avg_time_per_clip_min: f64,
    pub options: Vec<GenerationOption>,
}

impl Plan {
    pub fn is_unlimited(&self) -> bool {
        self.quota_unit == QuotaUnit::Unlimited
    }
}

/// One generation model/configuration offered under a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationOption {
    pub id: String,
    pub name: String,
    /// Longest clip producible in a single generation, in seconds
    pub max_duration_sec: f64,
    pub resolution: Resolution,
    pub audio: bool,
    pub cost_unit: CostUnit,
    pub cost: Cost,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl GenerationOption {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// Per-unit price, either fixed or a variable range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cost {
    Fixed(f64),
    Range([f64; 2]),
}

impl Cost {
    /// The value used downstream: the number itself or the midpoint of the range
    pub fn average(&self) -> f64 {
        match self {
            Cost::Fixed(value) => *value,
            Cost::Range([low, high]) => (low + high) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ApiAccess {
    None,
    Limited,
    EnterpriseOnly,
    Full,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// Market standing of a platform, drives the reputation bonus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reputation {
    Emerging,
    Established,
    Recognized,
    Leading,
    Flagship,
}

/// Position of a plan in its platform's price ladder, drives the plan-tier bonus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Starter,
    Standard,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuotaUnit {
    Credits,
    Tokens,
    ComputeSeconds,
    Clips,
    Unlimited,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CostUnit {
    Credits,
    Tokens,
    ComputeSecondsRatio,
    Clips,
    PerSecond,
    /// Compute-seconds consumed per produced video-second
    Ratio,
    /// Anything the catalog spells differently; priced as unbounded
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Hd1080,
    #[serde(rename = "1080p+")]
    Hd1080Plus,
    #[serde(rename = "4K")]
    Uhd4k,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    MotionBrush,
    KeyframeEditor,
    StoryboardExport,
    AudioVideoSync,
}
