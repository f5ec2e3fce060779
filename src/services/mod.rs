pub mod engine;
pub mod quality;
pub mod ranker;
pub mod roi;
pub mod tables;
pub mod timing;
pub mod units;

pub use engine::{EngineError, RecommendationEngine};
pub use tables::ScoringTables;
